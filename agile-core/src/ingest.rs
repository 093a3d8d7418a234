use crate::{AgileError, RatesPage, RawRatesPage};

/// Convert a wire page into domain form, dropping slots that fail validation.
///
/// Rejected slots are logged (with the `tracing` feature) and otherwise
/// ignored, so a malformed record never fails the page it came in.
#[must_use]
pub fn ingest_page(raw: RawRatesPage) -> RatesPage {
    let (page, rejected) = RatesPage::from_raw(raw);
    log_rejected(&rejected);
    page
}

#[cfg(feature = "tracing")]
fn log_rejected(rejected: &[AgileError]) {
    for err in rejected {
        tracing::warn!(error = %err, "dropping rate record at ingestion");
    }
}

#[cfg(not(feature = "tracing"))]
const fn log_rejected(_rejected: &[AgileError]) {}
