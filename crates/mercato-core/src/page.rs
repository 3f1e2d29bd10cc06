//! # Page Types
//!
//! Request and response shapes for one fetch against a paginated endpoint.
//!
//! ## Paging Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Deterministic Paging Contract                          │
//! │                                                                         │
//! │  PageRequest { page_index: 0, page_size: 10, sort: name,asc }          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Server slices ONE deterministic ordering:                             │
//! │                                                                         │
//! │    [ Ana, Bia, Caio, ... ]  [ Lia, Mel, Nuno, ... ]  [ Zoe ]           │
//! │         page 0                   page 1               page 2           │
//! │                                                                         │
//! │  No two pages for the same parameters overlap, and `is_last_page`      │
//! │  is accurate. The client therefore never deduplicates: append is       │
//! │  plain concatenation.                                                  │
//! │                                                                         │
//! │  The sort MUST have a stable tiebreak (e.g. name + id) or records      │
//! │  can be skipped or doubled across page boundaries.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

// =============================================================================
// Sort
// =============================================================================

/// Direction of a server-side sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending (A→Z, oldest first)
    #[default]
    Asc,

    /// Descending (Z→A, newest first)
    Desc,
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

/// A deterministic server-side sort: field plus direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    /// Field the backend orders by (e.g. "name", "soldAt")
    pub field: String,

    /// Sort direction
    pub direction: SortDirection,
}

impl Sort {
    /// Ascending sort on the given field.
    pub fn asc(field: impl Into<String>) -> Self {
        Sort {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    /// Descending sort on the given field.
    pub fn desc(field: impl Into<String>) -> Self {
        Sort {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }

    /// Renders the backend's `sort` query parameter value, e.g. `name,asc`.
    pub fn to_param(&self) -> String {
        format!("{},{}", self.field, self.direction)
    }
}

// =============================================================================
// Page Request
// =============================================================================

/// Everything needed to fetch one page from a paginated endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// 0-based page index
    pub page_index: u32,

    /// Fixed page size (records per page)
    pub page_size: u32,

    /// Deterministic server-side sort
    pub sort: Sort,

    /// Optional substring filter on the entity's text field.
    /// `None` means "no filter"; empty/whitespace input is normalized to
    /// `None` before it gets here.
    pub filter_text: Option<String>,
}

impl PageRequest {
    /// Builds a request for the given page.
    ///
    /// Whitespace-only filters are normalized to `None` (the backend
    /// treats a blank filter the same as no filter).
    pub fn new(page_index: u32, page_size: u32, sort: Sort, filter_text: Option<&str>) -> Self {
        let filter_text = filter_text
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_owned);

        PageRequest {
            page_index,
            page_size,
            sort,
            filter_text,
        }
    }
}

// =============================================================================
// Page Response
// =============================================================================

/// One server-returned page, already decoded from the wire envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResponse<T> {
    /// Records in server sort order
    pub content: Vec<T>,

    /// 0-based index of this page as reported by the server
    pub page_index: u32,

    /// True when this is the final page for the request parameters
    pub is_last_page: bool,
}

impl<T> PageResponse<T> {
    /// An empty final page.
    ///
    /// Used when the backend answers `204 No Content` or an empty body:
    /// the list clears and paging stops.
    pub fn empty(page_index: u32) -> Self {
        PageResponse {
            content: Vec::new(),
            page_index,
            is_last_page: true,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_param_rendering() {
        assert_eq!(Sort::asc("name").to_param(), "name,asc");
        assert_eq!(Sort::desc("soldAt").to_param(), "soldAt,desc");
    }

    #[test]
    fn test_blank_filter_normalized_to_none() {
        let request = PageRequest::new(0, 10, Sort::asc("name"), Some("   "));
        assert_eq!(request.filter_text, None);

        let request = PageRequest::new(0, 10, Sort::asc("name"), Some("  ana "));
        assert_eq!(request.filter_text.as_deref(), Some("ana"));
    }

    #[test]
    fn test_empty_page_is_last() {
        let page: PageResponse<()> = PageResponse::empty(0);
        assert!(page.is_last_page);
        assert!(page.content.is_empty());
    }
}
