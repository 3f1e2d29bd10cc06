//! # HTTP Error Classification
//!
//! Maps transport and status failures onto the core fetch taxonomy.
//!
//! ## Classification Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Classification                                 │
//! │                                                                         │
//! │  reqwest::Error (no response)  ──────────────►  FetchError::Network     │
//! │  reqwest::Error (body decode)  ──────────────►  FetchError::Unknown     │
//! │                                                                         │
//! │  HTTP 401 / 403                ──────────────►  FetchError::Unauthorized│
//! │  HTTP other 4xx/5xx                                                     │
//! │    body {"erro": "..."}        ──────────────►  Server { that text }    │
//! │    body {"message": "..."}     ──────────────►  Server { that text }    │
//! │    anything else               ──────────────►  Server { fallback }     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use reqwest::StatusCode;
use thiserror::Error;

use mercato_core::FetchError;

use crate::wire::ErrorBody;

// =============================================================================
// Client Construction Errors
// =============================================================================

/// Errors raised while constructing the API client itself.
///
/// Runtime fetch failures never use this type; they are classified into
/// [`FetchError`] instead.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The configured base URL does not parse.
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

// =============================================================================
// Classification
// =============================================================================

/// Classifies a transport-level failure (no usable HTTP response).
pub(crate) fn classify_transport(err: reqwest::Error) -> FetchError {
    if err.is_decode() {
        return FetchError::Unknown(err.to_string());
    }
    // Connect failures, timeouts, DNS, aborted requests: nothing was
    // received, so this is a network error in the taxonomy.
    FetchError::Network(err.to_string())
}

/// Classifies a non-success HTTP status plus whatever body came with it.
///
/// `fallback` is the per-entity generic message used when the server body
/// carries no usable text.
pub(crate) fn classify_status(status: StatusCode, body: &str, fallback: &str) -> FetchError {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return FetchError::Unauthorized;
    }

    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.into_message())
        .unwrap_or_else(|| fallback.to_string());

    FetchError::Server { message }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_statuses() {
        assert!(classify_status(StatusCode::UNAUTHORIZED, "", "fallback").is_unauthorized());
        assert!(classify_status(StatusCode::FORBIDDEN, "{}", "fallback").is_unauthorized());
    }

    #[test]
    fn test_server_message_preferred_over_fallback() {
        let err = classify_status(
            StatusCode::CONFLICT,
            r#"{"erro":"Cliente possui vendas"}"#,
            "Could not load customers.",
        );
        assert_eq!(
            err,
            FetchError::Server {
                message: "Cliente possui vendas".into()
            }
        );

        let err = classify_status(
            StatusCode::BAD_REQUEST,
            r#"{"message":"name is required"}"#,
            "Could not load customers.",
        );
        assert_eq!(
            err,
            FetchError::Server {
                message: "name is required".into()
            }
        );
    }

    #[test]
    fn test_fallback_when_body_unusable() {
        let err = classify_status(
            StatusCode::INTERNAL_SERVER_ERROR,
            "<html>nginx</html>",
            "Could not load sales history.",
        );
        assert_eq!(
            err,
            FetchError::Server {
                message: "Could not load sales history.".into()
            }
        );
    }
}
