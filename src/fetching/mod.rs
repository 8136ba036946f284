//! Page fetching
//!
//! This module fetches pages over HTTP and schedules the fetches
//! for a whole URL list with a bounded or unbounded strategy.

pub mod driver;
pub mod fetcher;

// Re-export commonly used items
pub use driver::{BoundedPool, DriveFetches, OnFetched, UnboundedJoin};
pub use fetcher::{FetchPage, HttpFetcher};
