//! Read paths for the role dashboards (`/api/student`, `/api/educator`).
//!
//! These are profile-scoped views resolved server-side from the bearer
//! token, not managed collections — no drafts, no pagination except the
//! per-class student roster.

use campus_core::{
  Result,
  class_room::ClassRoom,
  educator::EducatorDetail,
  feedback::{Feedback, FeedbackDraft},
  page::Page,
  student::{Student, StudentDetail},
};

use crate::client::ApiClient;

impl ApiClient {
  async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str, what: &str) -> Result<T> {
    let resp = self
      .auth(self.http().get(self.url(path)))
      .send()
      .await
      .map_err(|e| Self::transport(what, e))?;
    let resp = Self::check(resp, what).await?;
    resp
      .json()
      .await
      .map_err(|e| Self::transport(&format!("deserialising {what}"), e))
  }

  // ── Student dashboard ─────────────────────────────────────────────────

  /// `GET /api/student/profile`
  pub async fn student_profile(&self) -> Result<StudentDetail> {
    self.get_json("/student/profile", "student profile").await
  }

  /// `GET /api/student/enrolled-classes`
  ///
  /// A student with no class assignment gets an empty list — a normal
  /// state, not an error.
  pub async fn student_enrolled_classes(&self) -> Result<Vec<ClassRoom>> {
    match self.get_json("/student/enrolled-classes", "enrolled classes").await {
      Ok(classes) => Ok(classes),
      Err(e) if e.is_not_found() => Ok(Vec::new()),
      Err(e) => Err(e),
    }
  }

  /// `GET /api/student/feedback`
  pub async fn student_feedback(&self) -> Result<Vec<Feedback>> {
    self.get_json("/student/feedback", "student feedback").await
  }

  // ── Educator dashboard ────────────────────────────────────────────────

  /// `GET /api/educator/profile`
  pub async fn educator_profile(&self) -> Result<EducatorDetail> {
    self.get_json("/educator/profile", "educator profile").await
  }

  /// `GET /api/educator/classes`
  pub async fn educator_classes(&self) -> Result<Vec<ClassRoom>> {
    self.get_json("/educator/classes", "educator classes").await
  }

  /// `GET /api/educator/classes/{class_id}/students` — paginated roster
  /// of one taught class.
  pub async fn class_students(&self, class_id: i64, page: u32, size: u32) -> Result<Page<Student>> {
    let what = format!("GET /educator/classes/{class_id}/students");
    let resp = self
      .auth(
        self
          .http()
          .get(self.url(&format!("/educator/classes/{class_id}/students")))
          .query(&[("page", page), ("size", size)]),
      )
      .send()
      .await
      .map_err(|e| Self::transport(&what, e))?;
    let resp = Self::check(resp, &what).await?;
    resp
      .json()
      .await
      .map_err(|e| Self::transport("deserialising class roster", e))
  }

  /// `GET /api/educator/students/{id}` — detail record for a student the
  /// educator teaches.
  pub async fn educator_student(&self, id: i64) -> Result<StudentDetail> {
    self
      .get_json(&format!("/educator/students/{id}"), "student detail")
      .await
  }

  /// `GET /api/educator/students/{sid}/classes/{cid}/feedback`
  pub async fn student_class_feedback(
    &self,
    student_id: i64,
    class_id: i64,
  ) -> Result<Vec<Feedback>> {
    self
      .get_json(
        &format!("/educator/students/{student_id}/classes/{class_id}/feedback"),
        "existing feedback",
      )
      .await
  }

  /// `POST /api/educator/students/{sid}/classes/{cid}/feedback`
  pub async fn submit_feedback(&self, draft: &FeedbackDraft) -> Result<()> {
    draft.validate()?;
    let what = format!(
      "POST /educator/students/{}/classes/{}/feedback",
      draft.student_id, draft.class_id
    );
    let resp = self
      .auth(
        self
          .http()
          .post(self.url(&format!(
            "/educator/students/{}/classes/{}/feedback",
            draft.student_id, draft.class_id
          )))
          .json(draft),
      )
      .send()
      .await
      .map_err(|e| Self::transport(&what, e))?;
    Self::check(resp, &what).await?;
    Ok(())
  }
}
