//! Bulk reference data for form dropdowns.
//!
//! Relation pickers (a student's class, a subject's educators and
//! students) are populated from one bulk fetch per collection at screen
//! mount, independent of the paginated tables. A failed fetch degrades to
//! an empty picker instead of blocking the whole screen.

use campus_core::{
  class_room::ClassRoom, educator::Educator, student::Student, subject::Subject,
};

use crate::{backend::ResourceBackend, client::ApiClient};

/// Read-only relation lists shared by the admin management screens.
#[derive(Default)]
pub struct ReferenceData {
  pub classes:   Vec<ClassRoom>,
  pub educators: Vec<Educator>,
  pub students:  Vec<Student>,
  pub subjects:  Vec<Subject>,
}

impl ReferenceData {
  /// Fetch all four collections, tolerating individual failures.
  pub async fn load(client: &ApiClient) -> Self {
    Self {
      classes:   fetch_or_empty(client, "classes").await,
      educators: fetch_or_empty(client, "educators").await,
      students:  fetch_or_empty(client, "students").await,
      subjects:  fetch_or_empty(client, "subjects").await,
    }
  }

  /// Display label for a class id picked from the reference list.
  pub fn class_label(&self, id: i64) -> Option<String> {
    self
      .classes
      .iter()
      .find(|c| c.id == id)
      .map(|c| format!("{} ({})", c.class_name, c.class_code))
  }

  pub fn educator_label(&self, id: i64) -> Option<String> {
    self
      .educators
      .iter()
      .find(|e| e.id == id)
      .map(|e| format!("{} {}", e.first_name, e.last_name))
  }

  pub fn student_label(&self, id: i64) -> Option<String> {
    self
      .students
      .iter()
      .find(|s| s.id == id)
      .map(|s| format!("{} {}", s.first_name, s.last_name))
  }

  pub fn subject_label(&self, id: i64) -> Option<String> {
    self.subjects.iter().find(|s| s.id == id).map(|s| s.subject_name.clone())
  }
}

async fn fetch_or_empty<R>(client: &ApiClient, name: &str) -> Vec<R>
where
  R: campus_core::resource::Resource,
  ApiClient: ResourceBackend<R>,
{
  match client.list_all().await {
    Ok(rows) => rows,
    Err(e) => {
      tracing::warn!(collection = name, error = %e, "reference fetch failed");
      Vec::new()
    }
  }
}
