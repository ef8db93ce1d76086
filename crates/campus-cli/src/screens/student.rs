//! Student dashboard: own profile, enrolled classes, received feedback.
//! Read-only; everything loads once at mount.

use campus_client::ApiClient;
use campus_core::{class_room::ClassRoom, feedback::Feedback, student::StudentDetail};

pub struct StudentScreen {
  pub profile:  Option<StudentDetail>,
  /// Empty when the student has no class assignment yet — a normal
  /// state, rendered as such rather than an error.
  pub classes:  Vec<ClassRoom>,
  pub feedback: Vec<Feedback>,
  pub error:    Option<String>,
}

impl StudentScreen {
  pub async fn load(client: &ApiClient) -> Self {
    let mut screen = Self {
      profile:  None,
      classes:  Vec::new(),
      feedback: Vec::new(),
      error:    None,
    };

    match client.student_profile().await {
      Ok(profile) => screen.profile = Some(profile),
      Err(e) => {
        screen.error = Some(e.to_string());
        return screen;
      }
    }

    match client.student_enrolled_classes().await {
      Ok(classes) => screen.classes = classes,
      Err(e) => screen.error = Some(e.to_string()),
    }

    match client.student_feedback().await {
      Ok(feedback) => screen.feedback = feedback,
      Err(e) => screen.error = Some(e.to_string()),
    }

    screen
  }
}
