//! The `ResourceBackend` trait and its HTTP implementation.
//!
//! [`crate::manager::ResourceManager`] drives CRUD through this trait,
//! not through [`ApiClient`] directly, so tests can substitute an
//! in-memory fake.

use std::future::Future;

use campus_core::{
  Error, Result,
  page::Page,
  patch::Patch,
  resource::{Draft, Resource},
};
use reqwest::multipart::{Form, Part};

use crate::client::ApiClient;

/// Page size used for reference-data bulk fetches ("effectively all").
pub const REFERENCE_PAGE_SIZE: u32 = 1000;

/// Abstraction over the CRUD endpoints for one managed collection.
pub trait ResourceBackend<R: Resource>: Send + Sync {
  /// One zero-indexed page of summary rows.
  fn list(&self, page: u32, size: u32) -> impl Future<Output = Result<Page<R>>> + Send + '_;

  /// Bulk fetch for dropdown reference data — page 0 at
  /// [`REFERENCE_PAGE_SIZE`], issued once per screen mount.
  fn list_all(&self) -> impl Future<Output = Result<Vec<R>>> + Send + '_;

  /// The full detail record for one row.
  fn fetch(&self, id: i64) -> impl Future<Output = Result<R::Detail>> + Send + '_;

  fn create<'a>(&'a self, draft: &'a R::Draft) -> impl Future<Output = Result<()>> + Send + 'a;

  fn update<'a>(
    &'a self,
    id: i64,
    draft: &'a R::Draft,
  ) -> impl Future<Output = Result<()>> + Send + 'a;

  fn remove(&self, id: i64) -> impl Future<Output = Result<()>> + Send + '_;
}

// ─── Wire assembly ───────────────────────────────────────────────────────────

/// The JSON body (or JSON part) for a create/update submission.
///
/// `Patch::Keep` fields are already omitted by the draft's serializer;
/// the one cross-field rule applied here is the explicit image clear
/// marker: `ImagePatch::Clear` becomes `profileImageUrl: null`, distinct
/// from the field being absent.
pub fn mutation_json<R: Resource>(draft: &R::Draft) -> Result<serde_json::Value> {
  let mut value = serde_json::to_value(draft)?;
  if let Some(image) = draft.image()
    && image.url_patch() == Patch::Clear
    && let Some(map) = value.as_object_mut()
  {
    map.insert("profileImageUrl".to_owned(), serde_json::Value::Null);
  }
  Ok(value)
}

/// Build the multipart form: one JSON part named after the entity, plus
/// an optional `profileImage` file part.
fn multipart_form<R: Resource>(part_name: &str, draft: &R::Draft) -> Result<Form> {
  let dto = mutation_json::<R>(draft)?;
  let json_part = Part::text(dto.to_string())
    .mime_str("application/json")
    .map_err(|e| Error::Transport(format!("building JSON part: {e}")))?;
  let mut form = Form::new().part(part_name.to_owned(), json_part);

  if let Some(att) = draft.image().and_then(|image| image.attachment()) {
    let file_part = Part::bytes(att.bytes.clone())
      .file_name(att.file_name.clone())
      .mime_str(&att.content_type)
      .map_err(|e| Error::Transport(format!("building file part: {e}")))?;
    form = form.part("profileImage", file_part);
  }
  Ok(form)
}

// ─── HTTP implementation ─────────────────────────────────────────────────────

impl<R: Resource> ResourceBackend<R> for ApiClient {
  async fn list(&self, page: u32, size: u32) -> Result<Page<R>> {
    let what = format!("GET /admin/{}", R::COLLECTION);
    let resp = self
      .auth(self.http().get(self.url(&format!("/admin/{}", R::COLLECTION))))
      .query(&[("page", page), ("size", size)])
      .send()
      .await
      .map_err(|e| Self::transport(&what, e))?;

    let resp = Self::check(resp, &what).await?;
    resp
      .json()
      .await
      .map_err(|e| Self::transport(&format!("deserialising {}", R::COLLECTION), e))
  }

  async fn list_all(&self) -> Result<Vec<R>> {
    let page: Page<R> = self.list(0, REFERENCE_PAGE_SIZE).await?;
    Ok(page.content)
  }

  async fn fetch(&self, id: i64) -> Result<R::Detail> {
    let what = format!("GET /admin/{}/{id}", R::COLLECTION);
    let resp = self
      .auth(self.http().get(self.url(&format!("/admin/{}/{id}", R::COLLECTION))))
      .send()
      .await
      .map_err(|e| Self::transport(&what, e))?;

    let resp = Self::check(resp, &what).await?;
    resp
      .json()
      .await
      .map_err(|e| Self::transport(&format!("deserialising {} detail", R::COLLECTION), e))
  }

  async fn create(&self, draft: &R::Draft) -> Result<()> {
    let what = format!("POST /admin/{}", R::COLLECTION);
    let req = self.auth(self.http().post(self.url(&format!("/admin/{}", R::COLLECTION))));
    let req = match R::MULTIPART_PART {
      Some(part_name) => req.multipart(multipart_form::<R>(part_name, draft)?),
      None => req.json(&mutation_json::<R>(draft)?),
    };

    let resp = req.send().await.map_err(|e| Self::transport(&what, e))?;
    Self::check(resp, &what).await?;
    tracing::debug!(collection = R::COLLECTION, "created");
    Ok(())
  }

  async fn update(&self, id: i64, draft: &R::Draft) -> Result<()> {
    let what = format!("PUT /admin/{}/{id}", R::COLLECTION);
    let req = self.auth(self.http().put(self.url(&format!("/admin/{}/{id}", R::COLLECTION))));
    let req = match R::MULTIPART_PART {
      Some(part_name) => req.multipart(multipart_form::<R>(part_name, draft)?),
      None => req.json(&mutation_json::<R>(draft)?),
    };

    let resp = req.send().await.map_err(|e| Self::transport(&what, e))?;
    Self::check(resp, &what).await?;
    tracing::debug!(collection = R::COLLECTION, id, "updated");
    Ok(())
  }

  async fn remove(&self, id: i64) -> Result<()> {
    let what = format!("DELETE /admin/{}/{id}", R::COLLECTION);
    let resp = self
      .auth(self.http().delete(self.url(&format!("/admin/{}/{id}", R::COLLECTION))))
      .send()
      .await
      .map_err(|e| Self::transport(&what, e))?;

    Self::check(resp, &what).await?;
    tracing::debug!(collection = R::COLLECTION, id, "deleted");
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use campus_core::{
    patch::{Attachment, ImagePatch, Patch},
    student::{Student, StudentDraft},
    subject::{Subject, SubjectDraft},
  };

  use super::*;

  fn student_draft() -> StudentDraft {
    StudentDraft {
      username: "jdoe".into(),
      email: "j@x.edu".into(),
      password: Patch::Set("pw123".into()),
      first_name: "Jane".into(),
      last_name: "Doe".into(),
      ..Default::default()
    }
  }

  #[test]
  fn clear_image_writes_explicit_null_marker() {
    let mut draft = student_draft();
    draft.image = ImagePatch::Clear;

    let json = mutation_json::<Student>(&draft).unwrap();
    assert!(json.get("profileImageUrl").is_some());
    assert!(json["profileImageUrl"].is_null());
  }

  #[test]
  fn kept_image_omits_the_url_field() {
    let json = mutation_json::<Student>(&student_draft()).unwrap();
    assert!(json.get("profileImageUrl").is_none());
  }

  #[test]
  fn upload_keeps_url_field_untouched() {
    let mut draft = student_draft();
    draft.image = ImagePatch::Upload(Attachment {
      file_name:    "me.png".into(),
      content_type: "image/png".into(),
      bytes:        vec![0x89, 0x50, 0x4e, 0x47],
    });

    // The server rewrites the URL after storing the file part.
    let json = mutation_json::<Student>(&draft).unwrap();
    assert!(json.get("profileImageUrl").is_none());
  }

  #[test]
  fn plain_json_entity_is_untouched() {
    let draft = SubjectDraft { subject_name: "Mathematics".into(), ..Default::default() };
    let json = mutation_json::<Subject>(&draft).unwrap();
    assert_eq!(json["subjectName"], "Mathematics");
    assert!(json.get("profileImageUrl").is_none());
  }
}
