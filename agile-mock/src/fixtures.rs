//! Deterministic half-hour slot fixtures.

use agile_core::{PageToken, RatesPage, UnitRate};
use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal::Decimal;

/// Length of one tariff slot.
pub const SLOT: TimeDelta = TimeDelta::minutes(30);

fn exc_vat(inc: Decimal) -> Decimal {
    (inc * Decimal::from(100) / Decimal::from(105)).round_dp(4)
}

/// Contiguous half-hour slots starting at `start`, one per price (inc. VAT, pence).
#[must_use]
pub fn half_hour_slots(start: DateTime<Utc>, prices: &[Decimal]) -> Vec<UnitRate> {
    let mut from = start;
    let mut out = Vec::with_capacity(prices.len());
    for &price in prices {
        let to = from + SLOT;
        if let Ok(rate) = UnitRate::new(exc_vat(price), price, from, to, None) {
            out.push(rate);
        }
        from = to;
    }
    out
}

/// Same as [`half_hour_slots`] with whole-pence prices.
#[must_use]
pub fn slots_from_pence(start: DateTime<Utc>, pence: &[i64]) -> Vec<UnitRate> {
    let prices: Vec<Decimal> = pence.iter().map(|&p| Decimal::from(p)).collect();
    half_hour_slots(start, &prices)
}

/// A day of 48 slots with an overnight trough and a 16:00-19:00 peak.
#[must_use]
pub fn agile_day(start: DateTime<Utc>) -> Vec<UnitRate> {
    let prices: Vec<Decimal> = (0..48i64)
        .map(|i| {
            let tenths = match i {
                0..=7 => 150 + i * 5,
                8..=13 => 110 - (i - 8) * 8,
                14..=31 => 190 + (i % 4) * 12,
                32..=37 => 320 + (i - 32) * 15,
                _ => 220 - (i - 38) * 6,
            };
            Decimal::new(tenths, 1)
        })
        .collect();
    half_hour_slots(start, &prices)
}

/// Wrap slots as an upstream page (newest first) with optional continuations.
#[must_use]
pub fn page(mut records: Vec<UnitRate>, older: Option<&str>, newer: Option<&str>) -> RatesPage {
    records.reverse();
    RatesPage {
        total_count: records.len() as u64,
        older: older.map(PageToken::new),
        newer: newer.map(PageToken::new),
        records,
    }
}
