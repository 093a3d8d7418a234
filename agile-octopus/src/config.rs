use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Connection settings for the Octopus Energy REST API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OctopusConfig {
    /// API root, e.g. `https://api.octopus.energy/`.
    pub base_url: String,
    /// Product code, e.g. `AGILE-24-10-01`.
    pub product_code: String,
    /// Tariff code within the product, e.g. `E-1R-AGILE-24-10-01-G`.
    pub tariff_code: String,
    /// Per-request timeout enforced by the HTTP client.
    pub request_timeout: Duration,
}

impl Default for OctopusConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.octopus.energy/".to_string(),
            product_code: "AGILE-24-10-01".to_string(),
            tariff_code: "E-1R-AGILE-24-10-01-G".to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl OctopusConfig {
    /// Defaults overridden by `AGILE_BASE_URL`, `AGILE_PRODUCT_CODE` and
    /// `AGILE_TARIFF_CODE` when those are set.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for the same keys as
    /// [`from_env`](Self::from_env).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(v) = lookup("AGILE_BASE_URL") {
            cfg.base_url = v;
        }
        if let Some(v) = lookup("AGILE_PRODUCT_CODE") {
            cfg.product_code = v;
        }
        if let Some(v) = lookup("AGILE_TARIFF_CODE") {
            cfg.tariff_code = v;
        }
        cfg
    }
}
