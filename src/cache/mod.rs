//! In-memory response cache for API reads
//!
//! This module provides a bounded, time-expiring map from request key to the
//! raw JSON payload the server returned. Entries older than the TTL read as
//! absent, and once the capacity is exceeded the earliest-inserted entry is
//! evicted.

mod response;

pub use response::{ResponseCache, DEFAULT_CAPACITY, DEFAULT_TTL_SECS};
