//! # Wire Envelopes
//!
//! Serde shapes for the backend's Spring-Data-style page envelope and its
//! error bodies, kept separate from the domain types in mercato-core.
//!
//! ## Page Envelope
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET /customers?page=1&size=10&sort=name,asc&name=ana                   │
//! │                                                                         │
//! │  {                                                                      │
//! │    "content":       [ {...}, {...} ],   ← records, server sort order   │
//! │    "number":        1,                  ← 0-based page index           │
//! │    "size":          10,                                                 │
//! │    "totalElements": 15,                                                 │
//! │    "totalPages":    2,                                                  │
//! │    "first":         false,                                              │
//! │    "last":          true,               ← drives has_more              │
//! │    "empty":         false                                               │
//! │  }                                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Deserialize;

use mercato_core::PageResponse;

// =============================================================================
// Page Envelope
// =============================================================================

/// One page as the backend serializes it.
///
/// Only `content`, `number` and `last` drive the engine; the remaining
/// fields are accepted so a stricter deserializer never trips on them.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageEnvelope<T> {
    /// Records in server sort order
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,

    /// 0-based page index
    pub number: u32,

    /// Page size the server actually used
    #[serde(default)]
    pub size: u32,

    /// Total records across all pages
    #[serde(default)]
    pub total_elements: i64,

    /// Total page count
    #[serde(default)]
    pub total_pages: u32,

    /// True for page 0
    #[serde(default)]
    pub first: bool,

    /// True for the final page
    pub last: bool,

    /// True when `content` is empty
    #[serde(default)]
    pub empty: bool,
}

impl<T> PageEnvelope<T> {
    /// Converts the wire shape into the engine's page response.
    pub fn into_page_response(self) -> PageResponse<T> {
        PageResponse {
            content: self.content,
            page_index: self.number,
            is_last_page: self.last,
        }
    }
}

// =============================================================================
// Error Body
// =============================================================================

/// Error body shapes the backend is known to produce.
///
/// Older endpoints answer `{"erro": ...}`, newer ones `{"message": ...}`.
/// Either may be absent.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    /// Legacy error field
    #[serde(default)]
    pub erro: Option<String>,

    /// Conventional error field
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// The server-provided message, preferring the legacy field, skipping
    /// blank strings.
    pub fn into_message(self) -> Option<String> {
        let non_blank = |text: &String| !text.trim().is_empty();
        self.erro
            .filter(non_blank)
            .or(self.message.filter(non_blank))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use mercato_core::Customer;

    #[test]
    fn test_envelope_decodes_spring_shape() {
        let json = r#"{
            "content": [{"id":"c-1","name":"Ana Souza"}],
            "number": 0,
            "size": 10,
            "totalElements": 15,
            "totalPages": 2,
            "first": true,
            "last": false,
            "empty": false
        }"#;

        let envelope: PageEnvelope<Customer> = serde_json::from_str(json).unwrap();
        let page = envelope.into_page_response();
        assert_eq!(page.content.len(), 1);
        assert_eq!(page.page_index, 0);
        assert!(!page.is_last_page);
    }

    #[test]
    fn test_envelope_tolerates_missing_optionals() {
        let json = r#"{"content": [], "number": 3, "last": true}"#;
        let envelope: PageEnvelope<Customer> = serde_json::from_str(json).unwrap();
        let page = envelope.into_page_response();
        assert!(page.content.is_empty());
        assert_eq!(page.page_index, 3);
        assert!(page.is_last_page);
    }

    #[test]
    fn test_error_body_field_preference() {
        let body: ErrorBody = serde_json::from_str(r#"{"erro":"a","message":"b"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("a"));

        let body: ErrorBody = serde_json::from_str(r#"{"message":"b"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("b"));

        let body: ErrorBody = serde_json::from_str(r#"{"erro":"","message":"b"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("b"));

        let body: ErrorBody = serde_json::from_str(r#"{"message":"  "}"#).unwrap();
        assert_eq!(body.into_message(), None);
    }
}
