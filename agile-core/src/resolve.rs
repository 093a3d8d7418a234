//! Point-in-time queries over an ascending slice of slots.
//!
//! All queries treat slots as half-open intervals `[valid_from, valid_to)` and
//! borrow from the input; none of them allocate.

use chrono::{DateTime, TimeDelta, Utc};

use crate::UnitRate;

/// The slot covering `now`, if any.
///
/// With well-formed input at most one slot matches. Overlapping input
/// resolves to the first match in ascending order.
#[must_use]
pub fn current(rates: &[UnitRate], now: DateTime<Utc>) -> Option<&UnitRate> {
    rates.iter().find(|r| r.contains(now))
}

/// The slot immediately after [`current`] in ascending order.
///
/// `None` when nothing covers `now` or the covering slot is the last one.
#[must_use]
pub fn next(rates: &[UnitRate], now: DateTime<Utc>) -> Option<&UnitRate> {
    let idx = rates.iter().position(|r| r.contains(now))?;
    rates.get(idx + 1)
}

/// The cheapest slot intersecting `[now, now + 24h)`.
#[must_use]
pub fn lowest_in_next_24h(rates: &[UnitRate], now: DateTime<Utc>) -> Option<&UnitRate> {
    lowest_in_window(rates, now, TimeDelta::hours(24))
}

/// The cheapest slot intersecting `[now, now + window)`.
///
/// A slot qualifies when `valid_from < now + window` and `valid_to > now`.
/// Ties on `value_inc_vat` go to the earliest `valid_from`.
#[must_use]
pub fn lowest_in_window(
    rates: &[UnitRate],
    now: DateTime<Utc>,
    window: TimeDelta,
) -> Option<&UnitRate> {
    let horizon = now.checked_add_signed(window);
    rates
        .iter()
        .filter(|r| r.valid_to() > now && horizon.is_none_or(|h| r.valid_from() < h))
        .min_by(|a, b| {
            a.value_inc_vat()
                .cmp(&b.value_inc_vat())
                .then_with(|| a.valid_from().cmp(&b.valid_from()))
        })
}
