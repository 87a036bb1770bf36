//! Quota Decision
//!
//! The outcome of a single consume call. Rejection is an expected, frequent
//! outcome, not an error: both variants carry the metadata callers need to
//! schedule a retry.

/// Result of a quota consumption attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaDecision {
    /// The debit was applied.
    Accepted {
        /// Units left in the current window after the debit
        remaining: u64,
        /// Instant (ms) at which the current window ends
        reset_at_ms: u64,
    },
    /// The debit was refused; bucket usage is unchanged.
    Rejected {
        /// Units left in the current window, unchanged by this call
        remaining: u64,
        /// Instant (ms) at which the current window ends
        reset_at_ms: u64,
    },
}

impl QuotaDecision {
    /// Whether the debit was applied.
    pub fn is_accepted(&self) -> bool {
        matches!(self, QuotaDecision::Accepted { .. })
    }

    /// Units left in the current window.
    pub fn remaining(&self) -> u64 {
        match self {
            QuotaDecision::Accepted { remaining, .. } => *remaining,
            QuotaDecision::Rejected { remaining, .. } => *remaining,
        }
    }

    /// Instant (ms) at which the current window ends.
    pub fn reset_at_ms(&self) -> u64 {
        match self {
            QuotaDecision::Accepted { reset_at_ms, .. } => *reset_at_ms,
            QuotaDecision::Rejected { reset_at_ms, .. } => *reset_at_ms,
        }
    }
}
