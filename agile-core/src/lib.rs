//! agile-core
//!
//! Core types, traits, and utilities shared across the agile ecosystem.
//!
//! - `connector`: the `RateSource` trait implemented by data sources.
//! - `store`: the ordered, deduplicating `RateStore` that merges pages.
//! - `retry`: the pure retry decision and linear backoff policy.
//! - `resolve`: current / next / cheapest-slot queries over a sorted snapshot.
//! - `display`: local-time rendering of slot boundaries.
//!
//! Slot timestamps are validated when a page is ingested, so every query in
//! this crate works on well-formed instants and never has to skip a record
//! it cannot parse.
#![warn(missing_docs)]

/// The `RateSource` connector trait.
pub mod connector;
pub mod display;
/// Wire-to-domain page conversion.
pub mod ingest;
pub mod resolve;
pub mod retry;
/// The merge engine.
pub mod store;

pub use agile_types::*;
pub use connector::RateSource;
pub use ingest::ingest_page;
pub use retry::{RetryPolicy, should_retry};
pub use store::RateStore;
