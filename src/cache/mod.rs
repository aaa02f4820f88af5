//! Cache module for reusing aggregated upstream responses
//!
//! This module provides a volatile, process-local cache with a fixed TTL.
//! The service owns one instance and consults it before calling upstream,
//! so repeated lookups inside the TTL window cost no network round-trips.

mod manager;

pub use manager::{CacheKey, CachedData, TtlCache};
