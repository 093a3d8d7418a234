//! Unit-rate slots and their wire representation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::AgileError;

/// One pricing slot: a single price applying over the half-open interval
/// `[valid_from, valid_to)`.
///
/// Instances can only be built through [`UnitRate::new`] or by deserializing,
/// both of which reject slots whose start is not strictly before their end.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawUnitRate")]
pub struct UnitRate {
    #[serde(with = "rust_decimal::serde::float")]
    value_exc_vat: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    value_inc_vat: Decimal,
    valid_from: DateTime<Utc>,
    valid_to: DateTime<Utc>,
    payment_method: Option<String>,
}

impl UnitRate {
    /// Build a slot.
    ///
    /// # Errors
    /// Returns `AgileError::InvalidRecord` if `valid_from >= valid_to`.
    pub fn new(
        value_exc_vat: Decimal,
        value_inc_vat: Decimal,
        valid_from: DateTime<Utc>,
        valid_to: DateTime<Utc>,
        payment_method: Option<String>,
    ) -> Result<Self, AgileError> {
        if valid_from >= valid_to {
            return Err(AgileError::InvalidRecord(format!(
                "valid_from {valid_from} is not before valid_to {valid_to}"
            )));
        }
        Ok(Self {
            value_exc_vat,
            value_inc_vat,
            valid_from,
            valid_to,
            payment_method,
        })
    }

    /// Price excluding VAT.
    #[must_use]
    pub const fn value_exc_vat(&self) -> Decimal {
        self.value_exc_vat
    }

    /// Price including VAT. This is the value used for ordering and comparisons.
    #[must_use]
    pub const fn value_inc_vat(&self) -> Decimal {
        self.value_inc_vat
    }

    /// Inclusive start of the slot.
    #[must_use]
    pub const fn valid_from(&self) -> DateTime<Utc> {
        self.valid_from
    }

    /// Exclusive end of the slot.
    #[must_use]
    pub const fn valid_to(&self) -> DateTime<Utc> {
        self.valid_to
    }

    /// Payment method reported upstream, if any.
    #[must_use]
    pub fn payment_method(&self) -> Option<&str> {
        self.payment_method.as_deref()
    }

    /// Whether `at` falls inside `[valid_from, valid_to)`.
    #[must_use]
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.valid_from <= at && at < self.valid_to
    }

    /// Identity and sort key: `valid_from`, then `value_inc_vat`.
    ///
    /// `valid_to` does not participate, so two slots with the same start and
    /// price but different ends collapse into one when merged.
    #[must_use]
    pub const fn key(&self) -> RateKey {
        RateKey {
            valid_from: self.valid_from,
            value_inc_vat: self.value_inc_vat,
        }
    }
}

/// Ordering and deduplication key of a [`UnitRate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RateKey {
    /// Slot start.
    pub valid_from: DateTime<Utc>,
    /// Price including VAT, used as tie-break.
    pub value_inc_vat: Decimal,
}

/// Wire form of a slot as returned by the upstream API.
///
/// Timestamps stay as strings here so one malformed record can be rejected
/// without failing the whole page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawUnitRate {
    /// Price excluding VAT.
    #[serde(with = "rust_decimal::serde::float")]
    pub value_exc_vat: Decimal,
    /// Price including VAT.
    #[serde(with = "rust_decimal::serde::float")]
    pub value_inc_vat: Decimal,
    /// ISO-8601 date-time with offset.
    #[serde(default)]
    pub valid_from: Option<String>,
    /// ISO-8601 date-time with offset.
    #[serde(default)]
    pub valid_to: Option<String>,
    /// Nullable payment method.
    #[serde(default)]
    pub payment_method: Option<String>,
}

fn parse_instant(field: &str, value: Option<&str>) -> Result<DateTime<Utc>, AgileError> {
    let raw = value.ok_or_else(|| AgileError::InvalidRecord(format!("missing {field}")))?;
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AgileError::InvalidRecord(format!("unparseable {field} {raw:?}: {e}")))
}

impl TryFrom<RawUnitRate> for UnitRate {
    type Error = AgileError;

    fn try_from(raw: RawUnitRate) -> Result<Self, Self::Error> {
        let valid_from = parse_instant("valid_from", raw.valid_from.as_deref())?;
        let valid_to = parse_instant("valid_to", raw.valid_to.as_deref())?;
        Self::new(
            raw.value_exc_vat,
            raw.value_inc_vat,
            valid_from,
            valid_to,
            raw.payment_method,
        )
    }
}
