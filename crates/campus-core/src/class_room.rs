//! Class — a homeroom group taught by one educator. Plain-JSON entity.

use serde::{Deserialize, Serialize};

use crate::{
  error::Result,
  resource::{Draft, Resource, require},
};

/// Summary row shown in the paged classes table. The backend denormalises
/// the assigned educator's name for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassRoom {
  pub id:                  i64,
  pub class_name:          String,
  pub class_code:          String,
  #[serde(default)]
  pub description:         Option<String>,
  #[serde(default)]
  pub educator_id:         Option<i64>,
  #[serde(default)]
  pub educator_first_name: Option<String>,
  #[serde(default)]
  pub educator_last_name:  Option<String>,
}

/// Full record returned by `GET /admin/classes/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassRoomDetail {
  pub id:                  i64,
  pub class_name:          String,
  pub class_code:          String,
  #[serde(default)]
  pub description:         Option<String>,
  #[serde(default)]
  pub educator_id:         Option<i64>,
  #[serde(default)]
  pub educator_first_name: Option<String>,
  #[serde(default)]
  pub educator_last_name:  Option<String>,
  #[serde(default)]
  pub student_ids:         Vec<i64>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassRoomDraft {
  pub class_name:  String,
  pub class_code:  String,
  pub description: Option<String>,
  pub educator_id: Option<i64>,
}

impl ClassRoomDraft {
  pub fn from_detail(detail: &ClassRoomDetail) -> Self {
    Self {
      class_name:  detail.class_name.clone(),
      class_code:  detail.class_code.clone(),
      description: detail.description.clone(),
      educator_id: detail.educator_id,
    }
  }
}

impl Draft for ClassRoomDraft {
  fn validate(&self, _creating: bool) -> Result<()> {
    require("className", &self.class_name)?;
    require("classCode", &self.class_code)
  }
}

impl Resource for ClassRoom {
  const COLLECTION: &'static str = "classes";
  const MULTIPART_PART: Option<&'static str> = None;

  type Draft = ClassRoomDraft;
  type Detail = ClassRoomDetail;

  fn id(&self) -> i64 {
    self.id
  }

  fn display_name(&self) -> String {
    format!("{} ({})", self.class_name, self.class_code)
  }

  fn edit_draft(detail: &Self::Detail) -> Self::Draft {
    ClassRoomDraft::from_detail(detail)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn draft_requires_name_and_code() {
    let mut d = ClassRoomDraft {
      class_name: "Grade 10 A".into(),
      class_code: "G10A".into(),
      ..Default::default()
    };
    assert!(d.validate(true).is_ok());

    d.class_code = "  ".into();
    assert!(d.validate(true).is_err());
  }

  #[test]
  fn missing_educator_is_a_normal_state() {
    let raw = r#"{ "id": 1, "className": "Grade 10 A", "classCode": "G10A" }"#;
    let class: ClassRoom = serde_json::from_str(raw).unwrap();
    assert!(class.educator_id.is_none());
    assert_eq!(class.display_name(), "Grade 10 A (G10A)");
  }
}
