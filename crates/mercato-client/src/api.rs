//! # API Client
//!
//! Thin reqwest wrapper shared by all entity sources: base URL handling,
//! bearer-token injection, status checking, envelope decoding.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      One Paginated Fetch                                │
//! │                                                                         │
//! │  get_page("customers", request)                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Build URL: /customers?page=0&size=10&sort=name,asc[&name=ana]          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  TokenProvider.bearer_token()  ── None ──►  FetchError::Unauthorized    │
//! │       │ Some(token)                                                     │
//! │       ▼                                                                 │
//! │  GET with Authorization: Bearer <token>                                 │
//! │       │                                                                 │
//! │       ├── transport error ──►  classify_transport (Network/Unknown)     │
//! │       ├── 204 No Content  ──►  empty final page                         │
//! │       ├── non-2xx         ──►  classify_status (Unauthorized/Server)    │
//! │       ▼                                                                 │
//! │  Decode PageEnvelope<T> ──► PageResponse<T>                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Token Handling
//! The client never stores credentials. Every request asks the
//! [`TokenProvider`] collaborator for the current bearer token; a missing
//! token short-circuits to `Unauthorized` without touching the network,
//! which routes to the session-expiry handler like any other 401.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use url::Url;

use mercato_core::{FetchError, FetchResult, PageRequest, PageResponse};

use crate::error::{classify_status, classify_transport, ClientError};
use crate::wire::PageEnvelope;

// =============================================================================
// Token Provider
// =============================================================================

/// Collaborator that owns the session token.
///
/// Implemented outside this workspace (secure storage on mobile, keychain on
/// desktop). Returning `None` means "no session": the request is refused
/// locally as `Unauthorized`.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// The current bearer token, if a session exists.
    async fn bearer_token(&self) -> Option<String>;
}

/// Fixed-token provider for tests and command-line tooling.
pub struct StaticToken(String);

impl StaticToken {
    /// Wraps an already-obtained token.
    pub fn new(token: impl Into<String>) -> Self {
        StaticToken(token.into())
    }
}

#[async_trait]
impl TokenProvider for StaticToken {
    async fn bearer_token(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

// =============================================================================
// API Client
// =============================================================================

/// Shared HTTP client for the business backend.
///
/// Cloning is cheap; all sources for one backend share the same underlying
/// connection pool.
#[derive(Clone)]
pub struct ApiClient {
    /// Underlying reqwest client (connection pool)
    http: reqwest::Client,

    /// Base URL of the backend, e.g. `http://192.168.1.5:8080`
    base_url: Url,

    /// Session token collaborator
    tokens: Arc<dyn TokenProvider>,
}

impl ApiClient {
    /// Creates a client for the given backend base URL.
    pub fn new(base_url: &str, tokens: Arc<dyn TokenProvider>) -> Result<Self, ClientError> {
        let parsed = Url::parse(base_url).map_err(|err| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: err.to_string(),
        })?;

        if parsed.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "URL cannot serve as a base".to_string(),
            });
        }

        Ok(ApiClient {
            http: reqwest::Client::new(),
            base_url: parsed,
            tokens,
        })
    }

    /// Builds an endpoint URL from path segments, e.g. `["customers", id]`.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty();
            path.extend(segments);
        }
        url
    }

    /// Sends a request with the bearer token attached.
    async fn authorized(&self, builder: reqwest::RequestBuilder) -> FetchResult<reqwest::Response> {
        let token = self
            .tokens
            .bearer_token()
            .await
            .ok_or(FetchError::Unauthorized)?;

        builder
            .bearer_auth(token)
            .send()
            .await
            .map_err(classify_transport)
    }

    /// Turns a non-success status into a classified error.
    async fn check_status(
        response: reqwest::Response,
        fallback: &str,
    ) -> FetchResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(classify_status(status, &body, fallback))
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Fetches one page from a paginated endpoint.
    ///
    /// `filter_param` names the entity's substring-filter query parameter;
    /// `None` for endpoints without text search. A `204 No Content` answer
    /// becomes an empty final page.
    pub async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        request: &PageRequest,
        filter_param: Option<&str>,
        fallback: &str,
    ) -> FetchResult<PageResponse<T>> {
        let mut url = self.endpoint(&[path]);
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("page", &request.page_index.to_string());
            query.append_pair("size", &request.page_size.to_string());
            query.append_pair("sort", &request.sort.to_param());
            if let (Some(param), Some(text)) = (filter_param, request.filter_text.as_deref()) {
                query.append_pair(param, text);
            }
        }

        debug!(url = %url, page = request.page_index, "fetching page");

        let response = self.authorized(self.http.get(url)).await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(PageResponse::empty(request.page_index));
        }
        let response = Self::check_status(response, fallback).await?;

        let envelope: PageEnvelope<T> = response.json().await.map_err(classify_transport)?;
        Ok(envelope.into_page_response())
    }

    /// Fetches the full, unpaged candidate set from an endpoint.
    ///
    /// Used by the sale-composition pickers, which filter locally. A `204`
    /// or empty body yields an empty set.
    pub async fn get_all<T: DeserializeOwned>(
        &self,
        path: &str,
        fallback: &str,
    ) -> FetchResult<Vec<T>> {
        let url = self.endpoint(&[path]);
        debug!(url = %url, "fetching full candidate set");

        let response = self.authorized(self.http.get(url)).await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(Vec::new());
        }
        let response = Self::check_status(response, fallback).await?;

        response.json().await.map_err(classify_transport)
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// POSTs a JSON body to a collection endpoint.
    pub async fn post_json<B: Serialize + Sync>(
        &self,
        segments: &[&str],
        body: &B,
        fallback: &str,
    ) -> FetchResult<()> {
        let url = self.endpoint(segments);
        debug!(url = %url, "create");
        let response = self.authorized(self.http.post(url).json(body)).await?;
        Self::check_status(response, fallback).await?;
        Ok(())
    }

    /// PUTs a JSON body to an item endpoint.
    pub async fn put_json<B: Serialize + Sync>(
        &self,
        segments: &[&str],
        body: &B,
        fallback: &str,
    ) -> FetchResult<()> {
        let url = self.endpoint(segments);
        debug!(url = %url, "update");
        let response = self.authorized(self.http.put(url).json(body)).await?;
        Self::check_status(response, fallback).await?;
        Ok(())
    }

    /// DELETEs an item endpoint.
    pub async fn delete(&self, segments: &[&str], fallback: &str) -> FetchResult<()> {
        let url = self.endpoint(segments);
        debug!(url = %url, "delete");
        let response = self.authorized(self.http.delete(url)).await?;
        Self::check_status(response, fallback).await?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use mercato_core::Sort;

    fn client() -> ApiClient {
        ApiClient::new("http://backend:8080", Arc::new(StaticToken::new("t"))).unwrap()
    }

    #[test]
    fn test_endpoint_building() {
        let api = client();
        assert_eq!(
            api.endpoint(&["customers"]).as_str(),
            "http://backend:8080/customers"
        );
        assert_eq!(
            api.endpoint(&["customers", "c-1"]).as_str(),
            "http://backend:8080/customers/c-1"
        );
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let result = ApiClient::new("not a url", Arc::new(StaticToken::new("t")));
        assert!(matches!(result, Err(ClientError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn test_page_query_parameters() {
        let api = client();
        let request = PageRequest::new(2, 10, Sort::asc("name"), Some("ana"));

        // Rebuild the URL the way get_page does.
        let mut url = api.endpoint(&["customers"]);
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("page", &request.page_index.to_string());
            query.append_pair("size", &request.page_size.to_string());
            query.append_pair("sort", &request.sort.to_param());
            if let Some(text) = request.filter_text.as_deref() {
                query.append_pair("name", text);
            }
        }

        assert_eq!(
            url.as_str(),
            "http://backend:8080/customers?page=2&size=10&sort=name%2Casc&name=ana"
        );
    }
}
