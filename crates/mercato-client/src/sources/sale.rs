//! # Sale Source
//!
//! HTTP operations for the `/sales` endpoint. The sales history lists
//! newest-first and has no text filter; the screen has no search box, so
//! `fetch_page` never sends a filter parameter.

use async_trait::async_trait;
use serde::Serialize;

use mercato_core::{FetchResult, PageRequest, PageResponse, Sale, Sort};

use crate::api::ApiClient;
use crate::source::{EntityWriter, RemoteListSource};

const PATH: &str = "sales";
const FALLBACK: &str = "Could not load sales history.";

/// One line of a sale being registered.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleItemDraft {
    /// Product being sold
    pub product_id: String,

    /// Units sold
    pub quantity: i64,
}

/// Payload for registering a sale.
///
/// The backend freezes product names and prices at creation time and
/// computes the total; the client only sends ids and quantities.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleDraft {
    /// Customer the sale is for, when one was picked
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,

    /// Line items (must be non-empty; the backend rejects empty sales)
    pub items: Vec<SaleItemDraft>,
}

/// Source for the sales history list.
#[derive(Clone)]
pub struct SaleSource {
    api: ApiClient,
}

impl SaleSource {
    /// Creates a source over the shared API client.
    pub fn new(api: ApiClient) -> Self {
        SaleSource { api }
    }

    /// Most recent sales first, ties broken by id server-side.
    pub fn default_sort() -> Sort {
        Sort::desc("soldAt")
    }
}

#[async_trait]
impl RemoteListSource for SaleSource {
    type Item = Sale;

    async fn fetch_page(&self, request: &PageRequest) -> FetchResult<PageResponse<Sale>> {
        // No filter parameter: the sales list is not searchable.
        self.api.get_page(PATH, request, None, FALLBACK).await
    }

    async fn fetch_all(&self) -> FetchResult<Vec<Sale>> {
        self.api.get_all(PATH, FALLBACK).await
    }
}

#[async_trait]
impl EntityWriter for SaleSource {
    type Draft = SaleDraft;

    async fn create(&self, draft: &SaleDraft) -> FetchResult<()> {
        self.api.post_json(&[PATH], draft, FALLBACK).await
    }

    async fn update(&self, id: &str, draft: &SaleDraft) -> FetchResult<()> {
        self.api.put_json(&[PATH, id], draft, FALLBACK).await
    }

    async fn remove(&self, id: &str) -> FetchResult<()> {
        self.api.delete(&[PATH, id], FALLBACK).await
    }
}
