//! Paginated responses and request targets.

use serde::{Deserialize, Serialize};

use crate::{AgileError, RawUnitRate, UnitRate};

/// Opaque continuation value returned by the upstream source.
///
/// Tokens are only ever round-tripped; nothing in the workspace parses or
/// builds them except the connector that turns one into a request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageToken(String);

impl PageToken {
    /// Wrap a raw token value.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Borrow the raw token value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PageToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a single fetch should request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FetchTarget {
    /// The source's fixed default endpoint.
    Default,
    /// A continuation token from a previous page, used as a full request target.
    Continuation(PageToken),
}

impl std::fmt::Display for FetchTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => f.write_str("default"),
            Self::Continuation(token) => write!(f, "{token}"),
        }
    }
}

/// One page of slots in domain form.
///
/// `older` and `newer` are already mapped from the upstream's inverted
/// `next`/`previous` fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RatesPage {
    /// Total number of slots the upstream reports across all pages.
    pub total_count: u64,
    /// Continuation for data further back in time.
    pub older: Option<PageToken>,
    /// Continuation for more recent data.
    pub newer: Option<PageToken>,
    /// Slots carried by this page, in upstream order.
    pub records: Vec<UnitRate>,
}

impl RatesPage {
    /// Convert a wire page, splitting accepted slots from rejected ones.
    ///
    /// Upstream pages are ordered newest-first, so `next` leads to older data
    /// and `previous` to newer data.
    #[must_use]
    pub fn from_raw(raw: RawRatesPage) -> (Self, Vec<AgileError>) {
        let mut records = Vec::with_capacity(raw.results.len());
        let mut rejected = Vec::new();
        for r in raw.results {
            match UnitRate::try_from(r) {
                Ok(rate) => records.push(rate),
                Err(e) => rejected.push(e),
            }
        }
        let page = Self {
            total_count: raw.count,
            older: raw.next.map(PageToken::new),
            newer: raw.previous.map(PageToken::new),
            records,
        };
        (page, rejected)
    }
}

/// Wire form of a page: `{ count, next, previous, results }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRatesPage {
    /// Total number of slots across all pages.
    #[serde(default)]
    pub count: u64,
    /// Token that fetches older data.
    #[serde(default)]
    pub next: Option<String>,
    /// Token that fetches newer data.
    #[serde(default)]
    pub previous: Option<String>,
    /// Slots in upstream (newest-first) order.
    #[serde(default)]
    pub results: Vec<RawUnitRate>,
}
