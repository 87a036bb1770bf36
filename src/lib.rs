//! Quotad Library
//!
//! This library provides the core functionality for the quotad service:
//! per-key fixed-window quota accounting and the HTTP surface that fronts it.

pub mod config;
pub mod quota;
pub mod server;
