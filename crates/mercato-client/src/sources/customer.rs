//! # Customer Source
//!
//! HTTP operations for the `/customers` endpoint. Customers are listed
//! alphabetically and can be filtered by a name substring.

use async_trait::async_trait;

use mercato_core::{Customer, FetchResult, PageRequest, PageResponse, Sort};

use crate::api::ApiClient;
use crate::source::{EntityWriter, RemoteListSource};
use serde::Serialize;

/// Collection path on the backend.
const PATH: &str = "customers";

/// Query parameter carrying the name-substring filter.
const FILTER_PARAM: &str = "name";

/// Generic message when the server body carries no usable error text.
const FALLBACK: &str = "Could not load customers.";

/// Payload for creating or replacing a customer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDraft {
    /// Customer name (required by the backend)
    pub name: String,

    /// Optional phone number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Optional email address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Source for the customers list.
#[derive(Clone)]
pub struct CustomerSource {
    api: ApiClient,
}

impl CustomerSource {
    /// Creates a source over the shared API client.
    pub fn new(api: ApiClient) -> Self {
        CustomerSource { api }
    }

    /// The deterministic sort the customer list uses: name ascending.
    ///
    /// The backend breaks name ties by id, so page boundaries are stable.
    pub fn default_sort() -> Sort {
        Sort::asc("name")
    }
}

#[async_trait]
impl RemoteListSource for CustomerSource {
    type Item = Customer;

    async fn fetch_page(&self, request: &PageRequest) -> FetchResult<PageResponse<Customer>> {
        self.api
            .get_page(PATH, request, Some(FILTER_PARAM), FALLBACK)
            .await
    }

    async fn fetch_all(&self) -> FetchResult<Vec<Customer>> {
        self.api.get_all(PATH, FALLBACK).await
    }
}

#[async_trait]
impl EntityWriter for CustomerSource {
    type Draft = CustomerDraft;

    async fn create(&self, draft: &CustomerDraft) -> FetchResult<()> {
        self.api.post_json(&[PATH], draft, FALLBACK).await
    }

    async fn update(&self, id: &str, draft: &CustomerDraft) -> FetchResult<()> {
        self.api.put_json(&[PATH, id], draft, FALLBACK).await
    }

    async fn remove(&self, id: &str) -> FetchResult<()> {
        self.api.delete(&[PATH, id], FALLBACK).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_omits_empty_optionals() {
        let draft = CustomerDraft {
            name: "Ana Souza".into(),
            phone: None,
            email: Some("ana@example.com".into()),
        };
        let json = serde_json::to_string(&draft).unwrap();
        assert!(!json.contains("phone"));
        assert!(json.contains("ana@example.com"));
    }

    #[test]
    fn test_default_sort_is_name_asc() {
        assert_eq!(CustomerSource::default_sort().to_param(), "name,asc");
    }
}
