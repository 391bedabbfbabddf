use thiserror::Error;

/// Failures a domain service can report. The services never swallow these;
/// the transport adapter is the sole translator to HTTP status codes.
///
/// Lookup misses are not failures — operations that can legitimately find
/// nothing return `Ok(None)` instead.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A field was missing, blank, or out of range.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    /// A uniqueness rule was violated.
    #[error("conflict: {0}")]
    Conflict(&'static str),

    /// Credentials did not match any account.
    #[error("unauthorized")]
    Unauthorized,

    /// A referenced entity is absent where presence is required.
    #[error("not found: {0}")]
    NotFound(&'static str),

    /// Unexpected persistence-layer anomaly. Never retried here; retry
    /// policy belongs to the storage collaborator or an outer layer.
    #[error("storage failure")]
    Storage(#[from] anyhow::Error),
}
