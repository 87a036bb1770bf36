//! Quota Accounting Module
//!
//! This module provides per-key fixed-window quota accounting: each API key
//! may consume a configured number of units per window; once the budget is
//! spent, further consumption is rejected until the window rolls over.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                    Quota Engine                      │
//! ├──────────────┬───────────────────┬──────────────────┤
//! │  QuotaPolicy │   Clock (seam)    │  QuotaDecision   │
//! │  (immutable) │  System / Manual  │ Accepted/Rejected│
//! ├──────────────┴───────────────────┴──────────────────┤
//! │       Bucket Store (DashMap, per-entry locking)      │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! Windows are rolled over lazily on the next access to a key; there is no
//! background sweep and no eviction of inactive keys.

pub mod clock;
pub mod decision;
pub mod engine;
pub mod error;
pub mod policy;

#[cfg(test)]
mod proptests;

pub use clock::{Clock, ManualClock, SystemClock};
pub use decision::QuotaDecision;
pub use engine::QuotaEngine;
pub use error::QuotaError;
pub use policy::QuotaPolicy;
