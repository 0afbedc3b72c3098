//! Error types for external lookups.

/// Errors from a single outbound provider call.
///
/// These never reach the host: each lookup renders its failure into a
/// user-facing message at the trait boundary. The variants exist so
/// the renderers can distinguish provider-reported errors from
/// transport, parse, and shape failures.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// The provider answered with its own error payload.
    #[error("{0}")]
    Provider(String),
    /// The provider answered with a non-success HTTP status.
    #[error("status {0}")]
    Status(u16),
    /// The request never completed (connect, timeout, TLS, ...).
    #[error("transport error: {0}")]
    Transport(String),
    /// The response body was not valid JSON.
    #[error("parse error: {0}")]
    Parse(String),
    /// The response parsed but had an unexpected structure.
    #[error("unexpected response shape: {0}")]
    Shape(String),
}
