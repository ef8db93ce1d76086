//! The paging envelope returned by every collection endpoint.

use serde::{Deserialize, Serialize};

/// One zero-indexed page of a server-side collection.
///
/// Only the fields the client actually consumes are modelled; the backend
/// also sends `totalElements`, `size`, sort metadata and so on, which
/// deserialization ignores.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
  pub content:     Vec<T>,
  pub total_pages: u32,
}

impl<T> Page<T> {
  pub fn empty() -> Self {
    Self { content: Vec::new(), total_pages: 0 }
  }

  /// Whether `page` is the first page (the "Previous" bound).
  pub fn is_first(page: u32) -> bool {
    page == 0
  }

  /// Whether `page` is the last page given this envelope's `total_pages`
  /// (the "Next" bound). An empty collection has no next page either.
  pub fn is_last(&self, page: u32) -> bool {
    self.total_pages == 0 || page + 1 >= self.total_pages
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn bounds() {
    let page: Page<u32> = Page { content: vec![1, 2], total_pages: 3 };
    assert!(Page::<u32>::is_first(0));
    assert!(!Page::<u32>::is_first(2));
    assert!(!page.is_last(0));
    assert!(!page.is_last(1));
    assert!(page.is_last(2));

    let empty: Page<u32> = Page::empty();
    assert!(empty.is_last(0));
  }

  #[test]
  fn extra_envelope_fields_are_ignored() {
    let raw = r#"{
      "content": [7],
      "totalPages": 2,
      "totalElements": 11,
      "size": 10,
      "number": 0
    }"#;
    let page: Page<u32> = serde_json::from_str(raw).unwrap();
    assert_eq!(page.content, vec![7]);
    assert_eq!(page.total_pages, 2);
  }
}
