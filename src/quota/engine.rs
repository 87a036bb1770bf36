//! Quota Engine
//!
//! Per-key fixed-window accounting. Each key owns one bucket; a consume call
//! rolls the window over if it has expired, then applies an all-or-nothing
//! debit against the remaining budget.

use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

use super::clock::{Clock, SystemClock};
use super::decision::QuotaDecision;
use super::error::QuotaError;
use super::policy::QuotaPolicy;

/// Per-key window state.
///
/// Owned exclusively by the engine's map and mutated only while the entry
/// guard is held; no reference escapes a consume call.
#[derive(Debug)]
struct Bucket {
    window_start_ms: u64,
    used_units: u64,
}

/// Fixed-window quota engine
#[derive(Debug)]
pub struct QuotaEngine {
    /// Shared immutable policy
    policy: QuotaPolicy,

    /// Injected time source
    clock: Arc<dyn Clock>,

    /// Per-key buckets, created lazily on first consumption
    buckets: DashMap<String, Bucket>,
}

impl QuotaEngine {
    /// Create an engine backed by the system clock.
    pub fn new(policy: QuotaPolicy) -> Self {
        Self::with_clock(policy, Arc::new(SystemClock))
    }

    /// Create an engine with an injected clock (test seam).
    pub fn with_clock(policy: QuotaPolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            policy,
            clock,
            buckets: DashMap::new(),
        }
    }

    /// The policy this engine enforces.
    pub fn policy(&self) -> &QuotaPolicy {
        &self.policy
    }

    /// Number of distinct keys seen so far. Buckets are never evicted, so
    /// this grows with the number of identities ever observed.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Attempt to consume `units` from the budget of `key`.
    ///
    /// Returns `Accepted` and commits the debit when the current window has
    /// enough budget left, `Rejected` without any debit otherwise. A request
    /// exactly equal to the remaining budget is accepted. Validation
    /// failures return a [`QuotaError`] before any state is touched.
    pub fn consume(&self, key: &str, units: u64) -> Result<QuotaDecision, QuotaError> {
        if key.trim().is_empty() {
            return Err(QuotaError::EmptyKey);
        }
        if units == 0 {
            return Err(QuotaError::NonPositiveUnits);
        }
        self.policy.validate()?;

        let now = self.clock.now_ms();
        let limit = self.policy.limit_units();
        let window = self.policy.window_ms();

        // The entry guard holds its shard's write lock for the whole
        // read-modify-write, so concurrent calls for the same key are
        // linearized while other keys proceed in parallel.
        let mut bucket = self.buckets.entry(key.to_owned()).or_insert_with(|| Bucket {
            window_start_ms: now,
            used_units: 0,
        });

        // Lazy fixed-window reset, anchored at `now` rather than at a
        // boundary aligned to multiples of the window length.
        if now.saturating_sub(bucket.window_start_ms) >= window {
            bucket.window_start_ms = now;
            bucket.used_units = 0;
        }

        // Saturating: a valid but huge window must not overflow past u64.
        let reset_at_ms = bucket.window_start_ms.saturating_add(window);

        let decision = match bucket.used_units.checked_add(units) {
            Some(candidate) if candidate <= limit => {
                bucket.used_units = candidate;
                QuotaDecision::Accepted {
                    remaining: limit - bucket.used_units,
                    reset_at_ms,
                }
            }
            // Over budget (or additive overflow): all-or-nothing, no debit.
            _ => QuotaDecision::Rejected {
                remaining: limit - bucket.used_units,
                reset_at_ms,
            },
        };
        drop(bucket);

        debug!(
            key,
            units,
            accepted = decision.is_accepted(),
            remaining = decision.remaining(),
            "quota decision"
        );

        Ok(decision)
    }
}
