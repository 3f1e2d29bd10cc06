//! # Product Source
//!
//! HTTP operations for the `/products` endpoint. The inventory list is
//! alphabetical with a name-substring filter; the sale-composition picker
//! fetches the full set and additionally drops out-of-stock products
//! client-side (see the engine's picker module).

use async_trait::async_trait;
use serde::Serialize;

use mercato_core::{FetchResult, PageRequest, PageResponse, Product, Sort};

use crate::api::ApiClient;
use crate::source::{EntityWriter, RemoteListSource};

const PATH: &str = "products";
const FILTER_PARAM: &str = "name";
const FALLBACK: &str = "Could not load inventory.";

/// Payload for creating or replacing a product.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    /// Product name (required by the backend)
    pub name: String,

    /// Unit price in integer cents
    pub price_cents: i64,

    /// Units in stock
    pub stock: i64,

    /// Supplier the product is bought from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<String>,
}

/// Source for the inventory list.
#[derive(Clone)]
pub struct ProductSource {
    api: ApiClient,
}

impl ProductSource {
    /// Creates a source over the shared API client.
    pub fn new(api: ApiClient) -> Self {
        ProductSource { api }
    }

    /// Name ascending, ties broken by id server-side.
    pub fn default_sort() -> Sort {
        Sort::asc("name")
    }
}

#[async_trait]
impl RemoteListSource for ProductSource {
    type Item = Product;

    async fn fetch_page(&self, request: &PageRequest) -> FetchResult<PageResponse<Product>> {
        self.api
            .get_page(PATH, request, Some(FILTER_PARAM), FALLBACK)
            .await
    }

    async fn fetch_all(&self) -> FetchResult<Vec<Product>> {
        self.api.get_all(PATH, FALLBACK).await
    }
}

#[async_trait]
impl EntityWriter for ProductSource {
    type Draft = ProductDraft;

    async fn create(&self, draft: &ProductDraft) -> FetchResult<()> {
        self.api.post_json(&[PATH], draft, FALLBACK).await
    }

    async fn update(&self, id: &str, draft: &ProductDraft) -> FetchResult<()> {
        self.api.put_json(&[PATH, id], draft, FALLBACK).await
    }

    async fn remove(&self, id: &str) -> FetchResult<()> {
        self.api.delete(&[PATH, id], FALLBACK).await
    }
}
