//! # Supplier Source
//!
//! HTTP operations for the `/suppliers` endpoint. Same list shape as
//! customers: alphabetical, name-substring filter.

use async_trait::async_trait;
use serde::Serialize;

use mercato_core::{FetchResult, PageRequest, PageResponse, Sort, Supplier};

use crate::api::ApiClient;
use crate::source::{EntityWriter, RemoteListSource};

const PATH: &str = "suppliers";
const FILTER_PARAM: &str = "name";
const FALLBACK: &str = "Could not load suppliers.";

/// Payload for creating or replacing a supplier.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierDraft {
    /// Supplier name (required by the backend)
    pub name: String,

    /// Optional company tax identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,

    /// Optional phone number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Optional email address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Source for the suppliers list.
#[derive(Clone)]
pub struct SupplierSource {
    api: ApiClient,
}

impl SupplierSource {
    /// Creates a source over the shared API client.
    pub fn new(api: ApiClient) -> Self {
        SupplierSource { api }
    }

    /// Name ascending, ties broken by id server-side.
    pub fn default_sort() -> Sort {
        Sort::asc("name")
    }
}

#[async_trait]
impl RemoteListSource for SupplierSource {
    type Item = Supplier;

    async fn fetch_page(&self, request: &PageRequest) -> FetchResult<PageResponse<Supplier>> {
        self.api
            .get_page(PATH, request, Some(FILTER_PARAM), FALLBACK)
            .await
    }

    async fn fetch_all(&self) -> FetchResult<Vec<Supplier>> {
        self.api.get_all(PATH, FALLBACK).await
    }
}

#[async_trait]
impl EntityWriter for SupplierSource {
    type Draft = SupplierDraft;

    async fn create(&self, draft: &SupplierDraft) -> FetchResult<()> {
        self.api.post_json(&[PATH], draft, FALLBACK).await
    }

    async fn update(&self, id: &str, draft: &SupplierDraft) -> FetchResult<()> {
        self.api.put_json(&[PATH, id], draft, FALLBACK).await
    }

    async fn remove(&self, id: &str) -> FetchResult<()> {
        self.api.delete(&[PATH, id], FALLBACK).await
    }
}
