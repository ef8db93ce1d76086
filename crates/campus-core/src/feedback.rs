//! Feedback left by an educator for a student within a class.
//!
//! Not a managed collection — feedback is read and written through the
//! role dashboards, never through the paginated admin tables.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
  pub id:            i64,
  pub student_id:    i64,
  pub educator_id:   i64,
  pub class_id:      i64,
  pub feedback_text: String,
  #[serde(default)]
  pub rating:        Option<u8>,
  #[serde(default)]
  pub feedback_date: Option<NaiveDateTime>,
}

/// Staging form for submitting feedback from the educator dashboard.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackDraft {
  pub student_id:    i64,
  pub educator_id:   i64,
  pub class_id:      i64,
  pub feedback_text: String,
  pub rating:        Option<u8>,
}

impl FeedbackDraft {
  pub fn validate(&self) -> Result<()> {
    if self.feedback_text.trim().is_empty() {
      return Err(crate::Error::Validation("feedbackText is required".into()));
    }
    if let Some(rating) = self.rating
      && !(1..=5).contains(&rating)
    {
      return Err(crate::Error::Validation("rating must be between 1 and 5".into()));
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn text_and_rating_range_are_enforced() {
    let mut d = FeedbackDraft {
      student_id: 1,
      educator_id: 2,
      class_id: 3,
      feedback_text: "Strong participation this term.".into(),
      rating: Some(4),
    };
    assert!(d.validate().is_ok());

    d.rating = Some(6);
    assert!(d.validate().is_err());

    d.rating = None;
    d.feedback_text = " ".into();
    assert!(d.validate().is_err());
  }
}
