//! Error types for the typed API client.
//!
//! # Design
//! Only transport-level and client-side failures are errors. A non-2xx
//! response is a successful invocation whose decoded body lands in the `Err`
//! arm of [`crate::client::Outcome`]; it never surfaces here.

use thiserror::Error;

/// Errors returned by `ApiClient` build, decode, and invocation methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No serializer is registered for the requested content-type token.
    #[error("missing {content_type} serializer")]
    MissingSerializer { content_type: String },

    /// The request payload could not be encoded by its serializer.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The response body could not be decoded into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The built request could not be handed to the transport (bad URL,
    /// method, or header).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The underlying network call failed. Passed through uninterpreted.
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The per-request timeout from `RequestInit` elapsed.
    #[error("request timed out")]
    Timeout,

    /// The caller's cancellation token fired before the response arrived.
    #[error("request cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, ApiError>;
