//! Subject — a course taught by educators to enrolled students.
//! Plain-JSON entity; relations are id lists populated from bulk
//! reference fetches.

use serde::{Deserialize, Serialize};

use crate::{
  error::Result,
  resource::{Draft, Resource, require},
};

/// Summary row shown in the paged subjects table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
  pub id:           i64,
  pub subject_name: String,
  #[serde(default)]
  pub description:  Option<String>,
  #[serde(default)]
  pub educator_ids: Vec<i64>,
  #[serde(default)]
  pub student_ids:  Vec<i64>,
}

/// Full record returned by `GET /admin/subjects/{id}`. Same shape as the
/// summary; kept distinct so the view modal does not depend on whatever
/// the list happened to include.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectDetail {
  pub id:           i64,
  pub subject_name: String,
  #[serde(default)]
  pub description:  Option<String>,
  #[serde(default)]
  pub educator_ids: Vec<i64>,
  #[serde(default)]
  pub student_ids:  Vec<i64>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectDraft {
  pub subject_name: String,
  pub description:  Option<String>,
  pub educator_ids: Vec<i64>,
  pub student_ids:  Vec<i64>,
}

impl SubjectDraft {
  pub fn from_detail(detail: &SubjectDetail) -> Self {
    Self {
      subject_name: detail.subject_name.clone(),
      description:  detail.description.clone(),
      educator_ids: detail.educator_ids.clone(),
      student_ids:  detail.student_ids.clone(),
    }
  }
}

impl Draft for SubjectDraft {
  fn validate(&self, _creating: bool) -> Result<()> {
    require("subjectName", &self.subject_name)
  }
}

impl Resource for Subject {
  const COLLECTION: &'static str = "subjects";
  const MULTIPART_PART: Option<&'static str> = None;

  type Draft = SubjectDraft;
  type Detail = SubjectDetail;

  fn id(&self) -> i64 {
    self.id
  }

  fn display_name(&self) -> String {
    self.subject_name.clone()
  }

  fn edit_draft(detail: &Self::Detail) -> Self::Draft {
    SubjectDraft::from_detail(detail)
  }
}
