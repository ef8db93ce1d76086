//! Educator — staff entity, mirrors [`crate::student`] in shape.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
  error::Result,
  patch::{ImagePatch, Patch},
  resource::{Draft, Resource, require},
  role::Role,
};

/// Summary row shown in the paged educators table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Educator {
  pub id:                i64,
  pub username:          String,
  pub email:             String,
  pub first_name:        String,
  pub last_name:         String,
  #[serde(default)]
  pub qualification:     Option<String>,
  #[serde(default)]
  pub profile_image_url: Option<String>,
}

/// Full record returned by `GET /admin/educators/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducatorDetail {
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
  pub hire_date:         Option<NaiveDate>,
  #[serde(default)]
  pub qualification:     Option<String>,
  #[serde(default)]
  pub experience_years:  Option<u32>,
  #[serde(default)]
  pub profile_image_url: Option<String>,
  #[serde(default)]
  pub class_ids:         Vec<i64>,
  #[serde(default)]
  pub subject_id:        Option<i64>,
  #[serde(default = "default_role")]
  pub role:              Role,
}

fn default_role() -> Role {
  Role::Educator
}

/// Editable fields staged in the add/edit modal.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EducatorDraft {
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
  pub hire_date:         Option<NaiveDate>,
  pub qualification:     Option<String>,
  pub experience_years:  Option<u32>,
  pub class_ids:         Vec<i64>,
  pub subject_id:        Option<i64>,
  #[serde(skip)]
  pub image:             ImagePatch,
}

impl EducatorDraft {
  pub fn from_detail(detail: &EducatorDetail) -> Self {
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
      hire_date:         detail.hire_date,
      qualification:     detail.qualification.clone(),
      experience_years:  detail.experience_years,
      class_ids:         detail.class_ids.clone(),
      subject_id:        detail.subject_id,
      image:             ImagePatch::Keep,
    }
  }
}

impl Draft for EducatorDraft {
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

impl Resource for Educator {
  const COLLECTION: &'static str = "educators";
  const MULTIPART_PART: Option<&'static str> = Some("educator");

  type Draft = EducatorDraft;
  type Detail = EducatorDetail;

  fn id(&self) -> i64 {
    self.id
  }

  fn display_name(&self) -> String {
    format!("{} {}", self.first_name, self.last_name)
  }

  fn edit_draft(detail: &Self::Detail) -> Self::Draft {
    EducatorDraft::from_detail(detail)
  }
}
