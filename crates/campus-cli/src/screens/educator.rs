//! Educator dashboard: profile, taught classes, per-class roster, and
//! feedback entry.

use campus_client::ApiClient;
use campus_core::{
  class_room::ClassRoom,
  educator::EducatorDetail,
  feedback::{Feedback, FeedbackDraft},
  page::Page,
  student::{Student, StudentDetail},
};
use crossterm::event::{KeyCode, KeyEvent};

/// Roster page size for the selected class.
const ROSTER_PAGE_SIZE: u32 = 10;

/// Feedback entry form for one student in one class.
pub struct FeedbackForm {
  pub student:  Student,
  pub text:     String,
  pub rating:   Option<u8>,
  pub existing: Vec<Feedback>,
}

pub struct EducatorScreen {
  pub profile:        Option<EducatorDetail>,
  pub classes:        Vec<ClassRoom>,
  pub selected_class: usize,
  pub roster:         Vec<Student>,
  pub roster_page:    u32,
  pub roster_pages:   u32,
  pub roster_cursor:  usize,
  pub detail:         Option<StudentDetail>,
  pub feedback:       Option<FeedbackForm>,
  pub error:          Option<String>,
  pub busy:           bool,
}

impl EducatorScreen {
  /// Mount: fetch profile and taught classes once, then the roster of
  /// the first class if there is one.
  pub async fn load(client: &ApiClient) -> Self {
    let mut screen = Self {
      profile:        None,
      classes:        Vec::new(),
      selected_class: 0,
      roster:         Vec::new(),
      roster_page:    0,
      roster_pages:   0,
      roster_cursor:  0,
      detail:         None,
      feedback:       None,
      error:          None,
      busy:           false,
    };

    match client.educator_profile().await {
      Ok(profile) => screen.profile = Some(profile),
      Err(e) => screen.error = Some(e.to_string()),
    }
    match client.educator_classes().await {
      Ok(classes) => screen.classes = classes,
      Err(e) => screen.error = Some(e.to_string()),
    }
    if !screen.classes.is_empty() {
      screen.load_roster(client).await;
    }
    screen
  }

  /// Whether keystrokes currently go into the feedback form or a modal.
  pub fn input_active(&self) -> bool {
    self.feedback.is_some() || self.detail.is_some()
  }

  pub fn selected_class_id(&self) -> Option<i64> {
    self.classes.get(self.selected_class).map(|c| c.id)
  }

  async fn load_roster(&mut self, client: &ApiClient) {
    let Some(class_id) = self.selected_class_id() else {
      self.roster.clear();
      self.roster_pages = 0;
      return;
    };
    self.busy = true;
    let result = client
      .class_students(class_id, self.roster_page, ROSTER_PAGE_SIZE)
      .await;
    self.busy = false;

    match result {
      Ok(Page { content, total_pages }) => {
        self.roster = content;
        self.roster_pages = total_pages;
        if self.roster_cursor >= self.roster.len() {
          self.roster_cursor = self.roster.len().saturating_sub(1);
        }
        self.error = None;
      }
      Err(e) => {
        self.error = Some(e.to_string());
        self.roster.clear();
      }
    }
  }

  pub async fn handle_key(&mut self, key: KeyEvent, client: &ApiClient) -> anyhow::Result<bool> {
    if self.busy {
      return Ok(true);
    }

    // Feedback form captures input while open.
    if let Some(form) = &mut self.feedback {
      match key.code {
        KeyCode::Esc => self.feedback = None,
        KeyCode::Backspace => {
          form.text.pop();
        }
        // Rating is a 1-5 star picker.
        KeyCode::Up => {
          form.rating = Some(form.rating.unwrap_or(0).saturating_add(1).min(5));
        }
        KeyCode::Down => {
          form.rating = form.rating.and_then(|r| (r > 1).then(|| r - 1));
        }
        KeyCode::Enter => self.submit_feedback(client).await,
        KeyCode::Char(c) => form.text.push(c),
        _ => {}
      }
      return Ok(true);
    }

    // Student detail modal.
    if self.detail.is_some() {
      if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
        self.detail = None;
      }
      return Ok(true);
    }

    match key.code {
      KeyCode::Char('q') => return Ok(false),

      // Cycle through taught classes; the roster restarts at page 0.
      KeyCode::Tab => {
        if !self.classes.is_empty() {
          self.selected_class = (self.selected_class + 1) % self.classes.len();
          self.roster_page = 0;
          self.roster_cursor = 0;
          self.load_roster(client).await;
        }
      }

      KeyCode::Down | KeyCode::Char('j') => {
        if self.roster_cursor + 1 < self.roster.len() {
          self.roster_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.roster_cursor = self.roster_cursor.saturating_sub(1);
      }

      KeyCode::Char('n') | KeyCode::Right => {
        if self.roster_pages > 0 && self.roster_page + 1 < self.roster_pages {
          self.roster_page += 1;
          self.roster_cursor = 0;
          self.load_roster(client).await;
        }
      }
      KeyCode::Char('p') | KeyCode::Left => {
        if self.roster_page > 0 {
          self.roster_page -= 1;
          self.roster_cursor = 0;
          self.load_roster(client).await;
        }
      }

      // View one student's detail record.
      KeyCode::Char('v') | KeyCode::Enter => {
        if let Some(student) = self.roster.get(self.roster_cursor) {
          match client.educator_student(student.id).await {
            Ok(detail) => self.detail = Some(detail),
            Err(e) => self.error = Some(e.to_string()),
          }
        }
      }

      // Open the feedback form, prefilled from the latest existing
      // feedback for this student in this class.
      KeyCode::Char('f') => {
        let (Some(student), Some(class_id)) =
          (self.roster.get(self.roster_cursor).cloned(), self.selected_class_id())
        else {
          return Ok(true);
        };
        let existing = match client.student_class_feedback(student.id, class_id).await {
          Ok(existing) => existing,
          Err(e) => {
            self.error = Some(e.to_string());
            Vec::new()
          }
        };
        let (text, rating) = existing
          .first()
          .map(|f| (f.feedback_text.clone(), f.rating))
          .unwrap_or_default();
        self.feedback = Some(FeedbackForm { student, text, rating, existing });
      }

      _ => {}
    }
    Ok(true)
  }

  async fn submit_feedback(&mut self, client: &ApiClient) {
    let (Some(form), Some(class_id), Some(profile)) =
      (&self.feedback, self.selected_class_id(), &self.profile)
    else {
      self.error = Some("class or profile not loaded for feedback".into());
      return;
    };

    let draft = FeedbackDraft {
      student_id:    form.student.id,
      educator_id:   profile.id,
      class_id,
      feedback_text: form.text.clone(),
      rating:        form.rating,
    };

    self.busy = true;
    let result = client.submit_feedback(&draft).await;
    self.busy = false;

    match result {
      Ok(()) => {
        self.feedback = None;
        self.error = None;
      }
      Err(e) => {
        // Keep the form open for correction.
        self.error = Some(e.to_string());
      }
    }
  }
}
