//! Student — the most field-heavy managed entity.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
  error::Result,
  patch::{ImagePatch, Patch},
  resource::{Draft, Resource, require},
  role::Role,
};

/// Summary row shown in the paged students table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
  pub id:                i64,
  pub username:          String,
  pub email:             String,
  pub first_name:        String,
  pub last_name:         String,
  #[serde(default)]
  pub grade:             Option<String>,
  #[serde(default)]
  pub profile_image_url: Option<String>,
}

/// Full record returned by `GET /admin/students/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDetail {
  pub id:                i64,
  pub username:          String,
  pub email:             String,
  pub first_name:        String,
  pub last_name:         String,
  #[serde(default)]
  pub date_of_birth:     Option<NaiveDate>,
  #[serde(default)]
  pub gender:            Option<String>,
  #[serde(default)]
  pub phone_number:      Option<String>,
  #[serde(default)]
  pub address:           Option<String>,
  #[serde(default)]
  pub grade:             Option<String>,
  #[serde(default)]
  pub enrollment_date:   Option<NaiveDate>,
  #[serde(default)]
  pub profile_image_url: Option<String>,
  #[serde(default)]
  pub class_id:          Option<i64>,
  #[serde(default)]
  pub subject_ids:       Vec<i64>,
  #[serde(default = "default_role")]
  pub role:              Role,
}

fn default_role() -> Role {
  Role::Student
}

/// Editable fields staged in the add/edit modal.
///
/// `password` is write-only: `Keep` on update means "unchanged", and the
/// serializer omits the key entirely. `image` never serializes directly;
/// the client's wire layer turns it into a `profileImage` file part or an
/// explicit `profileImageUrl: null` clear marker.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDraft {
  pub username:          String,
  pub email:             String,
  #[serde(skip_serializing_if = "Patch::is_keep")]
  pub password:          Patch<String>,
  pub first_name:        String,
  pub last_name:         String,
  pub date_of_birth:     Option<NaiveDate>,
  pub gender:            Option<String>,
  pub phone_number:      Option<String>,
  pub address:           Option<String>,
  pub grade:             Option<String>,
  pub class_id:          Option<i64>,
  pub subject_ids:       Vec<i64>,
  #[serde(skip)]
  pub image:             ImagePatch,
}

impl StudentDraft {
  /// Prefill from an existing detail record for editing.
  pub fn from_detail(detail: &StudentDetail) -> Self {
    Self {
      username:          detail.username.clone(),
      email:             detail.email.clone(),
      password:          Patch::Keep,
      first_name:        detail.first_name.clone(),
      last_name:         detail.last_name.clone(),
      date_of_birth:     detail.date_of_birth,
      gender:            detail.gender.clone(),
      phone_number:      detail.phone_number.clone(),
      address:           detail.address.clone(),
      grade:             detail.grade.clone(),
      class_id:          detail.class_id,
      subject_ids:       detail.subject_ids.clone(),
      image:             ImagePatch::Keep,
    }
  }
}

impl Draft for StudentDraft {
  fn validate(&self, creating: bool) -> Result<()> {
    require("username", &self.username)?;
    require("email", &self.email)?;
    require("firstName", &self.first_name)?;
    require("lastName", &self.last_name)?;
    if creating && self.password.as_set().is_none() {
      return Err(crate::Error::Validation("password is required".into()));
    }
    Ok(())
  }

  fn image(&self) -> Option<&ImagePatch> {
    Some(&self.image)
  }
}

impl Resource for Student {
  const COLLECTION: &'static str = "students";
  const MULTIPART_PART: Option<&'static str> = Some("student");

  type Draft = StudentDraft;
  type Detail = StudentDetail;

  fn id(&self) -> i64 {
    self.id
  }

  fn display_name(&self) -> String {
    format!("{} {}", self.first_name, self.last_name)
  }

  fn edit_draft(detail: &Self::Detail) -> Self::Draft {
    StudentDraft::from_detail(detail)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn draft() -> StudentDraft {
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
  fn create_requires_password() {
    let mut d = draft();
    assert!(d.validate(true).is_ok());

    d.password = Patch::Keep;
    assert!(d.validate(true).is_err());
    // On update a blank password means "unchanged", not invalid.
    assert!(d.validate(false).is_ok());
  }

  #[test]
  fn blank_password_is_omitted_from_the_wire() {
    let mut d = draft();
    d.password = Patch::Keep;
    let json = serde_json::to_value(&d).unwrap();
    assert!(json.get("password").is_none());
    assert_eq!(json["username"], "jdoe");
  }

  #[test]
  fn summary_ignores_detail_only_fields() {
    let raw = r#"{
      "id": 4, "username": "jdoe", "email": "j@x.edu",
      "firstName": "Jane", "lastName": "Doe",
      "grade": "10", "address": "1 Main St", "classId": 2
    }"#;
    let s: Student = serde_json::from_str(raw).unwrap();
    assert_eq!(s.display_name(), "Jane Doe");
    assert_eq!(s.grade.as_deref(), Some("10"));
  }
}
