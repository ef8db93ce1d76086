//! Generic paginated CRUD manager — one instance per managed entity.
//!
//! The four admin tables (students, educators, classes, subjects) share
//! this state machine: fetch a page, render it, mediate create / update /
//! delete / view against the backend, and resynchronize with a fresh list
//! fetch after every successful mutation.
//!
//! Ordering: mutations take `&mut self` and are awaited to completion by
//! the single UI task, so the post-mutation refresh is strictly sequenced
//! after the mutation. List and detail fetches are two-phase instead:
//! [`ResourceManager::begin_fetch`] claims a ticket and the result is
//! handed back with it, so callers may overlap fetches and a slow stale
//! reply is discarded on arrival rather than overwriting fresher rows.
//! [`ResourceManager::refresh`] is the sequential convenience wrapper.

use std::sync::Arc;

use campus_core::{
  Result,
  page::Page,
  resource::{Draft, Resource},
};

use crate::backend::ResourceBackend;

/// The modal currently open over the table, if any. At most one — a draft
/// never outlives its modal, and there are no concurrent edit sessions
/// within one manager.
pub enum Modal<R: Resource> {
  /// Create form.
  Add { draft: R::Draft },
  /// Edit form for an existing row.
  Edit { id: i64, draft: R::Draft },
  /// Read-only detail view.
  View { detail: R::Detail },
  /// Delete confirmation prompt; nothing is sent until confirmed.
  ConfirmDelete { id: i64, label: String },
}

/// Claim on one in-flight fetch. Only the newest ticket's result is
/// applied; see [`ResourceManager::begin_fetch`].
#[derive(Debug)]
pub struct FetchTicket {
  generation: u64,
}

/// Server-paginated table state plus CRUD workflow for one entity type.
pub struct ResourceManager<R: Resource, B: ResourceBackend<R>> {
  backend:     Arc<B>,
  rows:        Vec<R>,
  page:        u32,
  page_size:   u32,
  total_pages: u32,
  /// Row cursor within the current page (for keyboard navigation).
  cursor:      usize,
  busy:        bool,
  error:       Option<String>,
  modal:       Option<Modal<R>>,
  /// Monotonic fetch counter; responses from superseded fetches are
  /// discarded instead of applied.
  generation:  u64,
  loaded:      bool,
}

impl<R: Resource, B: ResourceBackend<R>> ResourceManager<R, B> {
  pub fn new(backend: Arc<B>, page_size: u32) -> Self {
    Self {
      backend,
      rows: Vec::new(),
      page: 0,
      page_size,
      total_pages: 0,
      cursor: 0,
      busy: false,
      error: None,
      modal: None,
      generation: 0,
      loaded: false,
    }
  }

  // ── Accessors ─────────────────────────────────────────────────────────

  pub fn rows(&self) -> &[R] {
    &self.rows
  }

  pub fn page(&self) -> u32 {
    self.page
  }

  pub fn total_pages(&self) -> u32 {
    self.total_pages
  }

  pub fn cursor(&self) -> usize {
    self.cursor
  }

  pub fn cursor_row(&self) -> Option<&R> {
    self.rows.get(self.cursor)
  }

  pub fn busy(&self) -> bool {
    self.busy
  }

  pub fn error(&self) -> Option<&str> {
    self.error.as_deref()
  }

  /// Surface a caller-side error (e.g. a form parse failure) in the same
  /// inline slot as server errors.
  pub fn set_error(&mut self, message: impl Into<String>) {
    self.error = Some(message.into());
  }

  /// Whether the first list fetch has completed at least once.
  pub fn loaded(&self) -> bool {
    self.loaded
  }

  pub fn modal(&self) -> Option<&Modal<R>> {
    self.modal.as_ref()
  }

  /// Mutable access to the open draft, for form editing.
  pub fn draft_mut(&mut self) -> Option<&mut R::Draft> {
    match self.modal.as_mut() {
      Some(Modal::Add { draft }) | Some(Modal::Edit { draft, .. }) => Some(draft),
      _ => None,
    }
  }

  /// "Previous" is enabled only off the first page and while idle.
  pub fn can_prev(&self) -> bool {
    !self.busy && !Page::<R>::is_first(self.page)
  }

  /// "Next" is enabled only off the last page and while idle.
  pub fn can_next(&self) -> bool {
    !self.busy && self.total_pages > 0 && self.page + 1 < self.total_pages
  }

  // ── List / pagination ─────────────────────────────────────────────────

  /// Claim the next fetch generation and mark the manager busy. The
  /// caller awaits the backend and hands the result back together with
  /// this ticket; starting another fetch in the meantime supersedes it.
  pub fn begin_fetch(&mut self) -> FetchTicket {
    self.generation += 1;
    self.busy = true;
    FetchTicket { generation: self.generation }
  }

  /// Whether `ticket` is still the newest fetch. A superseded ticket
  /// leaves all state alone, including the busy flag — the newer fetch
  /// is still in flight and clears it when its own result arrives.
  fn accept(&mut self, ticket: &FetchTicket) -> bool {
    if ticket.generation != self.generation {
      return false;
    }
    self.busy = false;
    true
  }

  /// Apply a list result for `ticket`. Stale responses (superseded by a
  /// newer [`Self::begin_fetch`]) are discarded. On failure the previous
  /// rows stay visible (stale-but-present beats a blank table) and the
  /// error is surfaced inline; a later successful fetch clears it.
  pub fn apply_list(&mut self, ticket: FetchTicket, result: Result<Page<R>>) {
    if !self.accept(&ticket) {
      return;
    }
    self.loaded = true;

    match result {
      Ok(page) => {
        self.rows = page.content;
        self.total_pages = page.total_pages;
        if self.cursor >= self.rows.len() {
          self.cursor = self.rows.len().saturating_sub(1);
        }
        self.error = None;
      }
      Err(e) => {
        self.error = Some(e.to_string());
      }
    }
  }

  /// Fetch the current page and apply it, start to finish.
  pub async fn refresh(&mut self) {
    let ticket = self.begin_fetch();
    let result = self.backend.list(self.page, self.page_size).await;
    self.apply_list(ticket, result);
  }

  pub async fn next_page(&mut self) {
    if !self.can_next() {
      return;
    }
    self.page += 1;
    self.cursor = 0;
    self.refresh().await;
  }

  pub async fn prev_page(&mut self) {
    if !self.can_prev() {
      return;
    }
    self.page -= 1;
    self.cursor = 0;
    self.refresh().await;
  }

  pub fn cursor_down(&mut self) {
    if self.cursor + 1 < self.rows.len() {
      self.cursor += 1;
    }
  }

  pub fn cursor_up(&mut self) {
    self.cursor = self.cursor.saturating_sub(1);
  }

  // ── Modals ────────────────────────────────────────────────────────────

  /// Open the create form with a blank draft.
  pub fn open_add(&mut self) {
    if self.busy {
      return;
    }
    self.modal = Some(Modal::Add { draft: R::Draft::default() });
  }

  /// Fetch the row's detail record and open the edit form prefilled
  /// from it.
  pub async fn open_edit(&mut self, id: i64) {
    if self.busy {
      return;
    }
    match self.detail(id).await {
      Ok(Some(detail)) => {
        self.modal = Some(Modal::Edit { id, draft: R::edit_draft(&detail) });
      }
      Ok(None) => {}
      Err(e) => self.error = Some(e.to_string()),
    }
  }

  /// Fetch and show the read-only detail view.
  pub async fn open_view(&mut self, id: i64) {
    if self.busy {
      return;
    }
    match self.detail(id).await {
      Ok(Some(detail)) => self.modal = Some(Modal::View { detail }),
      Ok(None) => {}
      Err(e) => self.error = Some(e.to_string()),
    }
  }

  /// Ask for confirmation before deleting; the request is only sent by
  /// [`Self::confirm_delete`].
  pub fn request_delete(&mut self, id: i64) {
    if self.busy {
      return;
    }
    let label = self
      .rows
      .iter()
      .find(|r| r.id() == id)
      .map(R::display_name)
      .unwrap_or_else(|| format!("#{id}"));
    self.modal = Some(Modal::ConfirmDelete { id, label });
  }

  /// Discard the open modal. Cancelling a form drops its draft.
  pub fn cancel_modal(&mut self) {
    self.modal = None;
  }

  // ── Mutations ─────────────────────────────────────────────────────────

  /// Submit the open add/edit form. On success the modal closes and the
  /// current page is refetched; on failure the modal stays open with the
  /// server's message so the user can correct and resubmit.
  pub async fn submit(&mut self) {
    let creating = match &self.modal {
      Some(Modal::Add { .. }) => true,
      Some(Modal::Edit { .. }) => false,
      _ => return,
    };
    if self.busy {
      return;
    }

    let result = self.submit_inner(creating).await;
    self.busy = false;
    match result {
      Ok(()) => {
        self.modal = None;
        self.error = None;
        self.refresh().await;
      }
      Err(e) => {
        self.error = Some(e.to_string());
      }
    }
  }

  async fn submit_inner(&mut self, creating: bool) -> Result<()> {
    let (id, draft) = match &self.modal {
      Some(Modal::Add { draft }) => (None, draft),
      Some(Modal::Edit { id, draft }) => (Some(*id), draft),
      _ => return Ok(()),
    };
    draft.validate(creating)?;

    self.busy = true;
    match id {
      None => self.backend.create(draft).await,
      Some(id) => self.backend.update(id, draft).await,
    }
  }

  /// Send the delete confirmed by the open prompt, then refetch the
  /// current page. The page index is deliberately left alone even when
  /// the delete empties the last page — the observed backend behavior is
  /// an empty page with "Previous" still enabled, not an auto-decrement.
  pub async fn confirm_delete(&mut self) {
    let id = match &self.modal {
      Some(Modal::ConfirmDelete { id, .. }) => *id,
      _ => return,
    };
    if self.busy {
      return;
    }

    self.busy = true;
    let result = self.backend.remove(id).await;
    self.busy = false;
    self.modal = None;

    match result {
      Ok(()) => {
        self.error = None;
        self.refresh().await;
      }
      Err(e) => {
        // Deleting an already-deleted row surfaces the failure but the
        // table itself stays intact until the next refresh.
        self.error = Some(e.to_string());
      }
    }
  }

  // ── Detail fetch ──────────────────────────────────────────────────────

  /// Fetch a detail record, treating a superseded response as `None`.
  async fn detail(&mut self, id: i64) -> Result<Option<R::Detail>> {
    let ticket = self.begin_fetch();
    let result = self.backend.fetch(id).await;
    if !self.accept(&ticket) {
      return Ok(None);
    }
    result.map(Some)
  }
}
