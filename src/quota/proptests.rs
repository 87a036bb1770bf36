//! Property-Based Tests for the Quota Engine
//!
//! Verifies the accounting invariants hold for random call sequences:
//! usage never exceeds the policy limit, and the total accepted within a
//! single window never exceeds the budget.

use proptest::prelude::*;
use std::sync::Arc;

use super::clock::{Clock, ManualClock};
use super::engine::QuotaEngine;
use super::policy::QuotaPolicy;

proptest! {
    #[test]
    fn usage_never_exceeds_limit(
        limit in 1u64..500,
        window_ms in 1u64..10_000,
        ops in prop::collection::vec((1u64..600, 0u64..15_000), 1..64),
    ) {
        let clock = Arc::new(ManualClock::new(0));
        let policy = QuotaPolicy::new(limit, window_ms).unwrap();
        let engine = QuotaEngine::with_clock(policy, Arc::clone(&clock) as Arc<dyn Clock>);

        for (units, advance_ms) in ops {
            clock.advance(advance_ms);
            let decision = engine.consume("key", units).unwrap();

            // remaining = limit - used, so used <= limit iff this holds.
            prop_assert!(decision.remaining() <= limit);
            if decision.is_accepted() {
                prop_assert!(units <= limit);
            }
        }
    }

    #[test]
    fn accepted_total_within_one_window_never_exceeds_limit(
        limit in 1u64..500,
        ops in prop::collection::vec(1u64..50, 1..100),
    ) {
        // Clock never advances, so every call lands in the first window.
        let clock = Arc::new(ManualClock::new(0));
        let policy = QuotaPolicy::new(limit, 1_000_000).unwrap();
        let engine = QuotaEngine::with_clock(policy, Arc::clone(&clock) as Arc<dyn Clock>);

        let mut accepted_total = 0u64;
        for units in ops {
            let decision = engine.consume("key", units).unwrap();
            if decision.is_accepted() {
                accepted_total += units;
            }
            prop_assert_eq!(decision.remaining(), limit - accepted_total);
        }
        prop_assert!(accepted_total <= limit);
    }
}
