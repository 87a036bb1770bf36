//! Quota Engine Error Types
//!
//! All variants are validation errors: deterministic, caller-caused, and
//! never retried by the engine. The HTTP layer maps them to a 400 response.

/// Errors produced by quota operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuotaError {
    /// API key missing or blank
    #[error("API key must not be empty")]
    EmptyKey,

    /// Requested units not strictly positive
    #[error("units must be positive")]
    NonPositiveUnits,

    /// Policy field failed validation
    #[error("invalid policy: {0}")]
    InvalidPolicy(&'static str),
}
