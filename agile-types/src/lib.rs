//! Agile-specific data transfer objects, configuration primitives and the unified error type.
#![warn(missing_docs)]

mod config;
mod error;
mod page;
mod rate;

pub use config::{AgileConfig, RetryConfig};
pub use error::{AgileError, TransportKind};
pub use page::{FetchTarget, PageToken, RatesPage, RawRatesPage};
pub use rate::{RateKey, RawUnitRate, UnitRate};
