//! In-memory cache for API responses
//!
//! This module provides a TTL cache that holds fetched responses for the
//! lifetime of the process. Entries expire lazily on read; a separate
//! `peek` accessor ignores expiry so the data client can fall back to
//! stale data when the API is unavailable.

mod store;

pub use store::{CacheStats, TtlCache, CACHE_TTL_SECS};
