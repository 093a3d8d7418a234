//! agile-octopus
//!
//! Public connector that implements `RateSource` against the Octopus Energy
//! REST API. One call performs one GET of either the configured tariff's
//! standard-unit-rates endpoint or a continuation URL handed back by a
//! previous page.
#![warn(missing_docs)]

mod config;

pub use config::OctopusConfig;

use std::error::Error as _;
use std::io;

use agile_core::{
    AgileError, FetchTarget, RateSource, RatesPage, RawRatesPage, TransportKind, ingest_page,
};
use async_trait::async_trait;
use url::Url;

/// Connector backed by `reqwest`.
pub struct OctopusSource {
    client: reqwest::Client,
    default_url: Url,
}

impl OctopusSource {
    /// Static connector key used in logs.
    pub const KEY: &'static str = "agile-octopus";

    /// Build a connector from explicit settings.
    ///
    /// # Errors
    /// Returns `AgileError::Config` if the base URL does not parse or the
    /// HTTP client cannot be constructed.
    pub fn new(config: OctopusConfig) -> Result<Self, AgileError> {
        let default_url = rates_url(&config)?;
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("agile-octopus/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AgileError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            default_url,
        })
    }

    /// Build a connector for the default Agile tariff.
    ///
    /// # Errors
    /// See [`OctopusSource::new`].
    pub fn new_default() -> Result<Self, AgileError> {
        Self::new(OctopusConfig::default())
    }

    /// Build a connector from `AGILE_*` environment overrides.
    ///
    /// # Errors
    /// See [`OctopusSource::new`].
    pub fn from_env() -> Result<Self, AgileError> {
        Self::new(OctopusConfig::from_env())
    }

    /// The URL requested for [`FetchTarget::Default`].
    #[must_use]
    pub const fn default_url(&self) -> &Url {
        &self.default_url
    }

    fn resolve(&self, target: &FetchTarget) -> Result<Url, AgileError> {
        match target {
            FetchTarget::Default => Ok(self.default_url.clone()),
            FetchTarget::Continuation(token) => Url::parse(token.as_str())
                .map_err(|e| AgileError::InvalidTarget(format!("{token}: {e}"))),
        }
    }
}

fn rates_url(config: &OctopusConfig) -> Result<Url, AgileError> {
    let mut base = config.base_url.clone();
    if !base.ends_with('/') {
        base.push('/');
    }
    let base = Url::parse(&base)
        .map_err(|e| AgileError::Config(format!("invalid base URL '{}': {e}", config.base_url)))?;
    let path = format!(
        "v1/products/{}/electricity-tariffs/{}/standard-unit-rates/",
        config.product_code, config.tariff_code
    );
    base.join(&path)
        .map_err(|e| AgileError::Config(format!("invalid tariff path '{path}': {e}")))
}

/// Map a `reqwest` failure that happened before a status was available.
fn classify_transport(err: &reqwest::Error) -> AgileError {
    let mut detail = err.to_string();
    let mut io_kind = None;
    let mut dns = false;

    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if text.contains("dns error") || text.contains("failed to lookup address") {
            dns = true;
        }
        if io_kind.is_none() {
            io_kind = cause.downcast_ref::<io::Error>().map(io::Error::kind);
        }
        detail.push_str(": ");
        detail.push_str(&text);
        source = cause.source();
    }

    let kind = if err.is_timeout() || io_kind == Some(io::ErrorKind::TimedOut) {
        TransportKind::Timeout
    } else if dns {
        TransportKind::HostResolution
    } else if io_kind == Some(io::ErrorKind::ConnectionRefused) {
        TransportKind::ConnectionRefused
    } else if err.is_connect() || err.is_request() || err.is_body() || io_kind.is_some() {
        TransportKind::Io
    } else {
        return AgileError::unexpected(detail);
    };
    AgileError::transport(kind, detail)
}

/// Decode a successful response body.
fn parse_body(body: &[u8]) -> Result<RatesPage, AgileError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(AgileError::EmptyBody);
    }
    match serde_json::from_slice::<Option<RawRatesPage>>(body) {
        Ok(Some(raw)) => Ok(ingest_page(raw)),
        Ok(None) => Err(AgileError::EmptyBody),
        Err(e) => Err(AgileError::unexpected(format!("malformed response body: {e}"))),
    }
}

#[async_trait]
impl RateSource for OctopusSource {
    fn name(&self) -> &'static str {
        Self::KEY
    }

    fn vendor(&self) -> &'static str {
        "Octopus Energy"
    }

    async fn fetch_page(&self, target: &FetchTarget) -> Result<RatesPage, AgileError> {
        let url = self.resolve(target)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(url = %url, "requesting unit rates");

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_transport(&e))?;

        let status = resp.status();
        if !status.is_success() {
            #[cfg(feature = "tracing")]
            tracing::warn!(status = status.as_u16(), "unit rate request rejected");
            return Err(AgileError::http_status(status.as_u16()));
        }

        let body = resp.bytes().await.map_err(|e| classify_transport(&e))?;
        let page = parse_body(&body)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(
            records = page.records.len(),
            total = page.total_count,
            has_older = page.older.is_some(),
            has_newer = page.newer.is_some(),
            "unit rate page received"
        );
        Ok(page)
    }
}
