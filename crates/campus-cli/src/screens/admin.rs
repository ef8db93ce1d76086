//! Admin dashboard: four managed tables behind sidebar tabs.

use std::sync::Arc;

use campus_client::{ApiClient, Modal, ResourceManager, refdata::ReferenceData};
use campus_core::{
  class_room::ClassRoom, educator::Educator, student::Student, subject::Subject,
};
use crossterm::event::{KeyCode, KeyEvent};

use crate::bind::{FormState, Managed};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminTab {
  Students,
  Educators,
  Classes,
  Subjects,
}

impl AdminTab {
  pub const ALL: [AdminTab; 4] = [
    AdminTab::Students,
    AdminTab::Educators,
    AdminTab::Classes,
    AdminTab::Subjects,
  ];

  pub fn title(&self) -> &'static str {
    match self {
      AdminTab::Students => Student::TITLE,
      AdminTab::Educators => Educator::TITLE,
      AdminTab::Classes => ClassRoom::TITLE,
      AdminTab::Subjects => Subject::TITLE,
    }
  }
}

/// Page size shared by all four admin tables.
const PAGE_SIZE: u32 = 10;

/// State of the admin dashboard: one manager per entity plus the shared
/// dropdown reference data, all mounted together.
pub struct AdminScreen {
  pub tab:       AdminTab,
  pub students:  ResourceManager<Student, ApiClient>,
  pub educators: ResourceManager<Educator, ApiClient>,
  pub classes:   ResourceManager<ClassRoom, ApiClient>,
  pub subjects:  ResourceManager<Subject, ApiClient>,
  pub refdata:   ReferenceData,
  /// Text form mirroring the active manager's open draft.
  pub form:      Option<FormState>,
}

impl AdminScreen {
  /// Mount the screen: build the managers and issue the one-time bulk
  /// reference fetches for the relation pickers.
  pub async fn new(client: &ApiClient) -> Self {
    let backend = Arc::new(client.clone());
    Self {
      tab:       AdminTab::Students,
      students:  ResourceManager::new(backend.clone(), PAGE_SIZE),
      educators: ResourceManager::new(backend.clone(), PAGE_SIZE),
      classes:   ResourceManager::new(backend.clone(), PAGE_SIZE),
      subjects:  ResourceManager::new(backend, PAGE_SIZE),
      refdata:   ReferenceData::load(client).await,
      form:      None,
    }
  }

  /// Whether keystrokes currently go into a text input.
  pub fn input_active(&self) -> bool {
    self.form.is_some()
  }

  /// Refresh the active tab's table (first fetch on mount or tab switch).
  pub async fn refresh_active(&mut self) {
    match self.tab {
      AdminTab::Students => self.students.refresh().await,
      AdminTab::Educators => self.educators.refresh().await,
      AdminTab::Classes => self.classes.refresh().await,
      AdminTab::Subjects => self.subjects.refresh().await,
    }
  }

  pub async fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    // Tab switching is disabled while a form is open; the draft must not
    // outlive its modal.
    if self.form.is_none()
      && let Some(tab) = match key.code {
        KeyCode::Char('1') => Some(AdminTab::Students),
        KeyCode::Char('2') => Some(AdminTab::Educators),
        KeyCode::Char('3') => Some(AdminTab::Classes),
        KeyCode::Char('4') => Some(AdminTab::Subjects),
        _ => None,
      }
    {
      if tab != self.tab {
        self.tab = tab;
        self.refresh_active().await;
      }
      return Ok(true);
    }

    match self.tab {
      AdminTab::Students => {
        table_key(&mut self.students, &mut self.form, key).await
      }
      AdminTab::Educators => {
        table_key(&mut self.educators, &mut self.form, key).await
      }
      AdminTab::Classes => {
        table_key(&mut self.classes, &mut self.form, key).await
      }
      AdminTab::Subjects => {
        table_key(&mut self.subjects, &mut self.form, key).await
      }
    }
  }
}

/// Shared key handling for one managed table, generic over the entity.
async fn table_key<R: Managed>(
  mgr: &mut ResourceManager<R, ApiClient>,
  form: &mut Option<FormState>,
  key: KeyEvent,
) -> anyhow::Result<bool> {
  // Form mode: the open draft captures all input.
  if let Some(state) = form {
    match key.code {
      KeyCode::Esc => {
        mgr.cancel_modal();
        *form = None;
      }
      KeyCode::Enter => {
        let Some(draft) = mgr.draft_mut() else {
          *form = None;
          return Ok(true);
        };
        if let Err(message) = R::apply_form(state, draft) {
          // Parse errors stay local to the form; nothing is sent.
          mgr.set_error(message);
          return Ok(true);
        }
        mgr.submit().await;
        // On success the manager closed its modal; on failure both the
        // modal and this form stay open for correction.
        if mgr.modal().is_none() {
          *form = None;
        }
      }
      _ => {
        state.handle_key(key);
      }
    }
    return Ok(true);
  }

  // Confirmation prompt: only y / n / Esc are live.
  if matches!(mgr.modal(), Some(Modal::ConfirmDelete { .. })) {
    match key.code {
      KeyCode::Char('y') => mgr.confirm_delete().await,
      KeyCode::Char('n') | KeyCode::Esc => mgr.cancel_modal(),
      _ => {}
    }
    return Ok(true);
  }

  // Detail view: any dismiss key closes it.
  if matches!(mgr.modal(), Some(Modal::View { .. })) {
    if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
      mgr.cancel_modal();
    }
    return Ok(true);
  }

  match key.code {
    KeyCode::Char('q') => return Ok(false),

    // Navigation within the page.
    KeyCode::Down | KeyCode::Char('j') => mgr.cursor_down(),
    KeyCode::Up | KeyCode::Char('k') => mgr.cursor_up(),

    // Pagination: disabled at the bounds and while a request is in
    // flight (the manager enforces both).
    KeyCode::Char('n') | KeyCode::Right => mgr.next_page().await,
    KeyCode::Char('p') | KeyCode::Left => mgr.prev_page().await,

    KeyCode::Char('r') => mgr.refresh().await,

    // CRUD entry points.
    KeyCode::Char('a') => {
      mgr.open_add();
      if let Some(draft) = mgr.draft_mut() {
        *form = Some(R::form(&format!("Add — {}", R::TITLE), draft));
      }
    }
    KeyCode::Char('e') => {
      if let Some(id) = mgr.cursor_row().map(|r| r.id()) {
        mgr.open_edit(id).await;
        if let Some(draft) = mgr.draft_mut() {
          *form = Some(R::form(&format!("Edit — {}", R::TITLE), draft));
        }
      }
    }
    KeyCode::Char('v') | KeyCode::Enter => {
      if let Some(id) = mgr.cursor_row().map(|r| r.id()) {
        mgr.open_view(id).await;
      }
    }
    KeyCode::Char('d') => {
      if let Some(id) = mgr.cursor_row().map(|r| r.id()) {
        mgr.request_delete(id);
      }
    }

    _ => {}
  }
  Ok(true)
}
