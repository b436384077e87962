//! Cache module for memoizing API responses in memory
//!
//! This module provides a response cache that keeps the last successful result of
//! each query for a configurable TTL (time-to-live). It supports graceful degradation
//! by serving stale entries when a refresh fails, and an empty default when no entry
//! was ever stored.

mod manager;

pub use manager::{DataSource, Fetched, ResponseCache};
