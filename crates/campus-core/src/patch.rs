//! Omit-versus-clear field semantics for update drafts.
//!
//! The backend distinguishes a field that is *absent* from the JSON body
//! (leave the stored value alone) from one that is explicitly `null`
//! (clear it). Loosely-typed drafts blur that line; [`Patch`] makes the
//! three states explicit in the type.

use serde::{Serialize, Serializer};

/// Tri-state value for an updatable field.
///
/// Annotate draft fields with
/// `#[serde(skip_serializing_if = "Patch::is_keep")]` so `Keep` produces
/// no key at all, `Clear` an explicit `null`, and `Set` the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Patch<T> {
  /// Leave the server-side value untouched (field omitted).
  #[default]
  Keep,
  /// Explicitly clear the value (field serialized as `null`).
  Clear,
  /// Replace the value.
  Set(T),
}

impl<T> Patch<T> {
  pub fn is_keep(&self) -> bool {
    matches!(self, Patch::Keep)
  }

  /// The value being written, if any.
  pub fn as_set(&self) -> Option<&T> {
    match self {
      Patch::Set(v) => Some(v),
      _ => None,
    }
  }
}

impl Patch<String> {
  /// Form-input convention: an empty text box means "no change".
  pub fn from_input(input: &str) -> Self {
    if input.is_empty() {
      Patch::Keep
    } else {
      Patch::Set(input.to_owned())
    }
  }
}

impl<T: Serialize> Serialize for Patch<T> {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    match self {
      // Only reachable without the skip_serializing_if annotation; emit
      // null so the wire meaning stays "no value" rather than failing.
      Patch::Keep => serializer.serialize_none(),
      Patch::Clear => serializer.serialize_none(),
      Patch::Set(v) => v.serialize(serializer),
    }
  }
}

// ─── File uploads ────────────────────────────────────────────────────────────

/// A file selected for upload, held in memory until submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
  pub file_name:    String,
  pub content_type: String,
  pub bytes:        Vec<u8>,
}

/// Pending change to an entity's profile image.
///
/// `Keep` leaves the stored image alone, `Clear` sends the explicit
/// clear marker (`profileImageUrl: null` in the JSON part), `Upload`
/// attaches a new file part.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ImagePatch {
  #[default]
  Keep,
  Clear,
  Upload(Attachment),
}

impl ImagePatch {
  /// The `profileImageUrl` patch to embed in the JSON part. An upload
  /// keeps the URL field untouched; the server rewrites it after storing
  /// the file.
  pub fn url_patch(&self) -> Patch<String> {
    match self {
      ImagePatch::Keep | ImagePatch::Upload(_) => Patch::Keep,
      ImagePatch::Clear => Patch::Clear,
    }
  }

  /// The file part to attach, if a new image was selected.
  pub fn attachment(&self) -> Option<&Attachment> {
    match self {
      ImagePatch::Upload(a) => Some(a),
      _ => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use serde::Serialize;

  use super::*;

  #[derive(Serialize)]
  struct Draft {
    name:     String,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    password: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    image:    Patch<String>,
  }

  #[test]
  fn keep_omits_clear_nulls_set_writes() {
    let draft = Draft {
      name:     "jdoe".into(),
      password: Patch::Keep,
      image:    Patch::Clear,
    };
    let json = serde_json::to_value(&draft).unwrap();
    assert_eq!(json, serde_json::json!({ "name": "jdoe", "image": null }));

    let draft = Draft {
      name:     "jdoe".into(),
      password: Patch::Set("pw123".into()),
      image:    Patch::Keep,
    };
    let json = serde_json::to_value(&draft).unwrap();
    assert_eq!(json, serde_json::json!({ "name": "jdoe", "password": "pw123" }));
  }

  #[test]
  fn blank_input_means_keep() {
    assert_eq!(Patch::from_input(""), Patch::Keep);
    assert_eq!(Patch::from_input("x"), Patch::Set("x".to_owned()));
  }

  #[test]
  fn image_patch_wire_mapping() {
    assert_eq!(ImagePatch::Keep.url_patch(), Patch::Keep);
    assert_eq!(ImagePatch::Clear.url_patch(), Patch::Clear);

    let upload = ImagePatch::Upload(Attachment {
      file_name:    "me.png".into(),
      content_type: "image/png".into(),
      bytes:        vec![1, 2, 3],
    });
    assert_eq!(upload.url_patch(), Patch::Keep);
    assert!(upload.attachment().is_some());
  }
}
