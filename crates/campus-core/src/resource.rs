//! The `Resource` trait — one implementation per managed entity.
//!
//! The four management screens (students, educators, classes, subjects)
//! run identical fetch-list / create / update / delete / view workflows;
//! only the endpoint path, the wire shape, and whether mutations carry a
//! file part differ. This trait captures exactly those differences so a
//! single generic manager can drive all of them.

use serde::{Serialize, de::DeserializeOwned};

use crate::{error::Result, patch::ImagePatch};

/// A summary row of a backend-managed collection.
pub trait Resource: DeserializeOwned + Send + Sync + 'static {
  /// Collection path segment under the admin API, e.g. `students`.
  const COLLECTION: &'static str;

  /// JSON part name for multipart mutations (`Some("student")`), or
  /// `None` for plain-JSON entities.
  const MULTIPART_PART: Option<&'static str>;

  /// Staging type for create/edit forms.
  type Draft: Draft;

  /// Full record returned by the single-item endpoint.
  type Detail: DeserializeOwned + Send + Sync + 'static;

  /// Server-assigned identifier.
  fn id(&self) -> i64;

  /// One-line label for confirmation prompts and log lines.
  fn display_name(&self) -> String;

  /// Prefill an edit draft from a fetched detail record.
  fn edit_draft(detail: &Self::Detail) -> Self::Draft;
}

/// A client-local staging copy of a resource's editable fields.
///
/// Serializes to the JSON body (or the JSON part of a multipart body)
/// the backend expects. Field omission and explicit-null semantics are
/// handled by [`crate::patch::Patch`] inside implementations.
pub trait Draft: Serialize + Default + Send + Sync {
  /// Local required-field check run before submission. Defense only;
  /// the server remains the source of truth for validation.
  fn validate(&self, creating: bool) -> Result<()>;

  /// The pending profile-image change, for entities that carry one.
  fn image(&self) -> Option<&ImagePatch> {
    None
  }
}

/// Shared helper: reject an empty required text field by name.
pub(crate) fn require(field: &str, value: &str) -> Result<()> {
  if value.trim().is_empty() {
    Err(crate::Error::Validation(format!("{field} is required")))
  } else {
    Ok(())
  }
}
