//! Manager workflow tests against an in-memory fake backend.

use std::sync::{Arc, Mutex};

use campus_core::{
  Error, Result,
  page::Page,
  patch::Patch,
  resource::Resource,
  student::{Student, StudentDetail, StudentDraft},
};

use crate::{
  backend::{REFERENCE_PAGE_SIZE, ResourceBackend},
  manager::{Modal, ResourceManager},
};

// ─── Fake backend ────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct StoredStudent {
  detail:   StudentDetail,
  password: String,
}

#[derive(Default)]
struct FakeState {
  rows:           Vec<StoredStudent>,
  next_id:        i64,
  /// When set, the next `list` call fails once with this message.
  fail_next_list: Option<String>,
}

/// In-memory stand-in for the paginated students endpoint.
struct FakeBackend {
  state: Mutex<FakeState>,
}

impl FakeBackend {
  fn new() -> Arc<Self> {
    Arc::new(Self { state: Mutex::new(FakeState { next_id: 1, ..Default::default() }) })
  }

  fn seed(self: &Arc<Self>, count: usize) {
    let mut state = self.state.lock().unwrap();
    for _ in 0..count {
      let id = state.next_id;
      state.next_id += 1;
      state.rows.push(StoredStudent {
        detail:   detail_fixture(id, &format!("user{id}")),
        password: "hunter2".into(),
      });
    }
  }

  fn fail_next_list(&self, message: &str) {
    self.state.lock().unwrap().fail_next_list = Some(message.into());
  }

  fn stored(&self, id: i64) -> Option<StoredStudent> {
    self
      .state
      .lock()
      .unwrap()
      .rows
      .iter()
      .find(|s| s.detail.id == id)
      .cloned()
  }
}

fn detail_fixture(id: i64, username: &str) -> StudentDetail {
  StudentDetail {
    id,
    username: username.into(),
    email: format!("{username}@x.edu"),
    first_name: "First".into(),
    last_name: format!("Last{id}"),
    date_of_birth: None,
    gender: None,
    phone_number: None,
    address: None,
    grade: None,
    enrollment_date: None,
    profile_image_url: None,
    class_id: None,
    subject_ids: Vec::new(),
    role: campus_core::role::Role::Student,
  }
}

fn summary(detail: &StudentDetail) -> Student {
  Student {
    id:                detail.id,
    username:          detail.username.clone(),
    email:             detail.email.clone(),
    first_name:        detail.first_name.clone(),
    last_name:         detail.last_name.clone(),
    grade:             detail.grade.clone(),
    profile_image_url: detail.profile_image_url.clone(),
  }
}

fn apply_draft(detail: &mut StudentDetail, draft: &StudentDraft) {
  detail.username = draft.username.clone();
  detail.email = draft.email.clone();
  detail.first_name = draft.first_name.clone();
  detail.last_name = draft.last_name.clone();
  detail.grade = draft.grade.clone();
  detail.class_id = draft.class_id;
  detail.subject_ids = draft.subject_ids.clone();
}

impl ResourceBackend<Student> for FakeBackend {
  async fn list(&self, page: u32, size: u32) -> Result<Page<Student>> {
    let mut state = self.state.lock().unwrap();
    if let Some(message) = state.fail_next_list.take() {
      return Err(Error::Api { status: 500, message });
    }

    let size = size as usize;
    let total = state.rows.len();
    let total_pages = total.div_ceil(size) as u32;
    let start = (page as usize) * size;
    let content = state
      .rows
      .iter()
      .skip(start)
      .take(size)
      .map(|s| summary(&s.detail))
      .collect();
    Ok(Page { content, total_pages })
  }

  async fn list_all(&self) -> Result<Vec<Student>> {
    let page = self.list(0, REFERENCE_PAGE_SIZE).await?;
    Ok(page.content)
  }

  async fn fetch(&self, id: i64) -> Result<StudentDetail> {
    self
      .stored(id)
      .map(|s| s.detail)
      .ok_or_else(|| Error::NotFound(format!("student {id} not found")))
  }

  async fn create(&self, draft: &StudentDraft) -> Result<()> {
    let password = draft
      .password
      .as_set()
      .cloned()
      .ok_or_else(|| Error::Api { status: 400, message: "password required".into() })?;

    let mut state = self.state.lock().unwrap();
    if state.rows.iter().any(|s| s.detail.username == draft.username) {
      return Err(Error::Api { status: 400, message: "username taken".into() });
    }
    let id = state.next_id;
    state.next_id += 1;
    let mut detail = detail_fixture(id, &draft.username);
    apply_draft(&mut detail, draft);
    state.rows.push(StoredStudent { detail, password });
    Ok(())
  }

  async fn update(&self, id: i64, draft: &StudentDraft) -> Result<()> {
    let mut state = self.state.lock().unwrap();
    let stored = state
      .rows
      .iter_mut()
      .find(|s| s.detail.id == id)
      .ok_or_else(|| Error::NotFound(format!("student {id} not found")))?;

    apply_draft(&mut stored.detail, draft);
    // Omitted password means "no change"; only Set overwrites.
    if let Some(password) = draft.password.as_set() {
      stored.password = password.clone();
    }
    Ok(())
  }

  async fn remove(&self, id: i64) -> Result<()> {
    let mut state = self.state.lock().unwrap();
    let before = state.rows.len();
    state.rows.retain(|s| s.detail.id != id);
    if state.rows.len() == before {
      return Err(Error::NotFound(format!("student {id} not found")));
    }
    Ok(())
  }
}

fn manager(backend: Arc<FakeBackend>, page_size: u32) -> ResourceManager<Student, FakeBackend> {
  ResourceManager::new(backend, page_size)
}

fn draft(username: &str) -> StudentDraft {
  StudentDraft {
    username: username.into(),
    email: format!("{username}@x.edu"),
    password: Patch::Set("pw123".into()),
    first_name: "Jane".into(),
    last_name: "Doe".into(),
    ..Default::default()
  }
}

// ─── List / pagination ───────────────────────────────────────────────────────

#[tokio::test]
async fn refresh_populates_rows_and_total_pages() {
  let backend = FakeBackend::new();
  backend.seed(25);
  let mut mgr = manager(backend, 10);

  mgr.refresh().await;
  assert!(mgr.loaded());
  assert_eq!(mgr.rows().len(), 10);
  assert_eq!(mgr.total_pages(), 3);
  assert!(mgr.error().is_none());
}

#[tokio::test]
async fn list_failure_keeps_stale_rows_visible() {
  let backend = FakeBackend::new();
  backend.seed(5);
  let mut mgr = manager(backend.clone(), 10);
  mgr.refresh().await;
  assert_eq!(mgr.rows().len(), 5);

  backend.fail_next_list("database unavailable");
  mgr.refresh().await;
  // Stale-but-present: prior content untouched, error surfaced inline.
  assert_eq!(mgr.rows().len(), 5);
  assert!(mgr.error().unwrap().contains("database unavailable"));

  // A later successful retry clears the error.
  mgr.refresh().await;
  assert!(mgr.error().is_none());
}

#[tokio::test]
async fn pagination_is_bounded_and_zero_indexed() {
  let backend = FakeBackend::new();
  backend.seed(25);
  let mut mgr = manager(backend, 10);
  mgr.refresh().await;

  assert!(!mgr.can_prev());
  assert!(mgr.can_next());

  // Walking off the first page is a no-op.
  mgr.prev_page().await;
  assert_eq!(mgr.page(), 0);

  mgr.next_page().await;
  mgr.next_page().await;
  assert_eq!(mgr.page(), 2);
  assert_eq!(mgr.rows().len(), 5);
  assert!(!mgr.can_next());

  // Walking off the last page is a no-op too.
  mgr.next_page().await;
  assert_eq!(mgr.page(), 2);
}

#[tokio::test]
async fn superseded_list_response_is_discarded() {
  let backend = FakeBackend::new();
  backend.seed(3);
  let mut mgr = manager(backend.clone(), 10);

  // Two overlapping fetches: the second supersedes the first before
  // either result has been applied.
  let first_ticket = mgr.begin_fetch();
  let first_result = backend.list(0, 10).await;

  backend.seed(2);
  let second_ticket = mgr.begin_fetch();
  let second_result = backend.list(0, 10).await;

  // The stale result arrives first: dropped outright, and the manager
  // stays busy because the newer fetch is still outstanding.
  mgr.apply_list(first_ticket, first_result);
  assert!(mgr.rows().is_empty());
  assert!(mgr.busy());
  assert!(!mgr.loaded());

  // The newest result is the one that lands.
  mgr.apply_list(second_ticket, second_result);
  assert_eq!(mgr.rows().len(), 5);
  assert!(!mgr.busy());
}

#[tokio::test]
async fn stale_response_arriving_after_a_newer_one_cannot_overwrite_it() {
  let backend = FakeBackend::new();
  backend.seed(5);
  let mut mgr = manager(backend.clone(), 10);

  let slow_ticket = mgr.begin_fetch();
  let slow_result = backend.list(0, 10).await;

  // A re-trigger completes in full while the first reply is in flight.
  mgr.refresh().await;
  assert_eq!(mgr.rows().len(), 5);

  // Rows shrink server-side, then the old 5-row reply finally arrives.
  backend.remove(1).await.unwrap();
  mgr.refresh().await;
  assert_eq!(mgr.rows().len(), 4);

  mgr.apply_list(slow_ticket, slow_result);
  assert_eq!(mgr.rows().len(), 4, "stale reply must not resurrect rows");
  assert!(!mgr.busy());
}

#[tokio::test]
async fn each_page_holds_only_its_slice() {
  let backend = FakeBackend::new();
  backend.seed(12);
  let mut mgr = manager(backend, 10);
  mgr.refresh().await;

  let first_page_ids: Vec<i64> = mgr.rows().iter().map(|r| r.id()).collect();
  mgr.next_page().await;
  let second_page_ids: Vec<i64> = mgr.rows().iter().map(|r| r.id()).collect();

  assert_eq!(first_page_ids.len(), 10);
  assert_eq!(second_page_ids.len(), 2);
  assert!(second_page_ids.iter().all(|id| !first_page_ids.contains(id)));
}

// ─── Create ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_then_refresh_shows_submitted_fields() {
  let backend = FakeBackend::new();
  let mut mgr = manager(backend, 10);
  mgr.refresh().await;

  mgr.open_add();
  *mgr.draft_mut().unwrap() = draft("jdoe");
  mgr.submit().await;

  assert!(mgr.modal().is_none(), "modal closes on success");
  let row = mgr.rows().iter().find(|r| r.username == "jdoe").unwrap();
  assert_eq!(row.email, "jdoe@x.edu");
  assert_eq!(row.display_name(), "Jane Doe");
}

#[tokio::test]
async fn invalid_draft_is_rejected_locally_and_modal_stays_open() {
  let backend = FakeBackend::new();
  let mut mgr = manager(backend, 10);
  mgr.refresh().await;

  mgr.open_add();
  // Missing everything: local required-field check fires, nothing is sent.
  mgr.submit().await;

  assert!(matches!(mgr.modal(), Some(Modal::Add { .. })));
  assert!(mgr.error().unwrap().contains("required"));
}

#[tokio::test]
async fn server_rejection_keeps_modal_open_with_message() {
  let backend = FakeBackend::new();
  let mut mgr = manager(backend, 10);
  mgr.refresh().await;

  mgr.open_add();
  *mgr.draft_mut().unwrap() = draft("jdoe");
  mgr.submit().await;

  // Same username again → server-side validation failure.
  mgr.open_add();
  *mgr.draft_mut().unwrap() = draft("jdoe");
  mgr.submit().await;

  assert!(matches!(mgr.modal(), Some(Modal::Add { .. })));
  assert!(mgr.error().unwrap().contains("username taken"));
}

// ─── Update ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_with_blank_password_leaves_it_unchanged() {
  let backend = FakeBackend::new();
  backend.seed(1);
  let mut mgr = manager(backend.clone(), 10);
  mgr.refresh().await;

  mgr.open_edit(1).await;
  {
    let d = mgr.draft_mut().unwrap();
    assert_eq!(d.password, Patch::Keep, "edit draft never prefills the password");
    d.grade = Some("11".into());
  }
  mgr.submit().await;

  let stored = backend.stored(1).unwrap();
  assert_eq!(stored.password, "hunter2");
  assert_eq!(stored.detail.grade.as_deref(), Some("11"));
}

#[tokio::test]
async fn update_with_set_password_overwrites_it() {
  let backend = FakeBackend::new();
  backend.seed(1);
  let mut mgr = manager(backend.clone(), 10);
  mgr.refresh().await;

  mgr.open_edit(1).await;
  mgr.draft_mut().unwrap().password = Patch::Set("n3w-pw".into());
  mgr.submit().await;

  assert_eq!(backend.stored(1).unwrap().password, "n3w-pw");
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_requires_confirmation() {
  let backend = FakeBackend::new();
  backend.seed(3);
  let mut mgr = manager(backend.clone(), 10);
  mgr.refresh().await;

  mgr.request_delete(2);
  // Nothing sent yet.
  assert!(backend.stored(2).is_some());
  assert!(matches!(mgr.modal(), Some(Modal::ConfirmDelete { .. })));

  // Cancelling keeps the row.
  mgr.cancel_modal();
  assert!(backend.stored(2).is_some());

  mgr.request_delete(2);
  mgr.confirm_delete().await;
  assert!(backend.stored(2).is_none());
  assert_eq!(mgr.rows().len(), 2);
}

#[tokio::test]
async fn deleting_an_already_deleted_row_surfaces_error_without_corrupting() {
  let backend = FakeBackend::new();
  backend.seed(3);
  let mut mgr = manager(backend.clone(), 10);
  mgr.refresh().await;

  // Row 2 disappears server-side behind our back.
  backend.remove(2).await.unwrap();

  mgr.request_delete(2);
  mgr.confirm_delete().await;

  assert!(mgr.error().unwrap().contains("not found"));
  // Rows were refetched or left intact — never half-mutated.
  assert!(mgr.rows().iter().all(|r| r.id() != 2) || mgr.rows().len() == 3);
}

#[tokio::test]
async fn delete_emptying_last_page_does_not_decrement_page() {
  let backend = FakeBackend::new();
  backend.seed(11);
  let mut mgr = manager(backend, 10);
  mgr.refresh().await;
  mgr.next_page().await;
  assert_eq!(mgr.rows().len(), 1);

  let id = mgr.rows()[0].id();
  mgr.request_delete(id);
  mgr.confirm_delete().await;

  // Observed behavior preserved: the page index stays put and the now
  // out-of-range page renders empty, with "Previous" still available.
  assert_eq!(mgr.page(), 1);
  assert!(mgr.rows().is_empty());
  assert!(mgr.can_prev());
}

// ─── View ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn view_opens_full_detail_record() {
  let backend = FakeBackend::new();
  backend.seed(2);
  let mut mgr = manager(backend, 10);
  mgr.refresh().await;

  mgr.open_view(2).await;
  match mgr.modal() {
    Some(Modal::View { detail }) => assert_eq!(detail.username, "user2"),
    other => panic!("expected view modal, got {}", modal_kind(other)),
  }
}

#[tokio::test]
async fn view_of_missing_row_sets_error() {
  let backend = FakeBackend::new();
  let mut mgr = manager(backend, 10);
  mgr.refresh().await;

  mgr.open_view(99).await;
  assert!(mgr.modal().is_none());
  assert!(mgr.error().unwrap().contains("not found"));
}

fn modal_kind(modal: Option<&Modal<Student>>) -> &'static str {
  match modal {
    None => "none",
    Some(Modal::Add { .. }) => "add",
    Some(Modal::Edit { .. }) => "edit",
    Some(Modal::View { .. }) => "view",
    Some(Modal::ConfirmDelete { .. }) => "confirm-delete",
  }
}
