//! Quota Policy
//!
//! The immutable budget every key is held to: how many units may be spent
//! per window, and how long a window lasts.

use serde::{Deserialize, Serialize};

use super::error::QuotaError;

/// Immutable quota policy shared by every bucket.
///
/// Fields are private so a constructed policy can never hold a zero limit
/// or a zero window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaPolicy {
    limit_units: u64,
    window_ms: u64,
}

impl QuotaPolicy {
    /// Create a policy, failing fast if either field is zero.
    pub fn new(limit_units: u64, window_ms: u64) -> Result<Self, QuotaError> {
        let policy = Self {
            limit_units,
            window_ms,
        };
        policy.validate()?;
        Ok(policy)
    }

    /// Re-check the policy invariants.
    pub fn validate(&self) -> Result<(), QuotaError> {
        if self.limit_units == 0 {
            return Err(QuotaError::InvalidPolicy("limit_units must be positive"));
        }
        if self.window_ms == 0 {
            return Err(QuotaError::InvalidPolicy("window_ms must be positive"));
        }
        Ok(())
    }

    /// Maximum units consumable per window.
    pub fn limit_units(&self) -> u64 {
        self.limit_units
    }

    /// Window length in milliseconds.
    pub fn window_ms(&self) -> u64 {
        self.window_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_policy() {
        let policy = QuotaPolicy::new(100, 60_000).unwrap();
        assert_eq!(policy.limit_units(), 100);
        assert_eq!(policy.window_ms(), 60_000);
    }

    #[test]
    fn test_zero_limit_rejected() {
        let err = QuotaPolicy::new(0, 60_000).unwrap_err();
        assert_eq!(err, QuotaError::InvalidPolicy("limit_units must be positive"));
    }

    #[test]
    fn test_zero_window_rejected() {
        let err = QuotaPolicy::new(100, 0).unwrap_err();
        assert_eq!(err, QuotaError::InvalidPolicy("window_ms must be positive"));
    }

    #[test]
    fn test_policy_serialization() {
        let policy = QuotaPolicy::new(100, 60_000).unwrap();
        let json = serde_json::to_string(&policy).unwrap();
        let parsed: QuotaPolicy = serde_json::from_str(&json).unwrap();
        assert_eq!(policy, parsed);
    }
}
