//! Amount type for whole-unit currency values.
//!
//! Amounts in the mock data are whole rupees, so `Amount` wraps a `u64`. Formatting with a currency
//! symbol and thousands separators is done on demand, and the rounding helpers used by the
//! aggregator go through `Decimal` so that halves round away from zero.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::iter::Sum;
use std::num::NonZeroU32;

/// Represents a non-negative amount of money in whole currency units.
///
/// # Examples
///
/// ```
/// # use rupee_roast::model::Amount;
/// let amount = Amount::new(1400);
/// assert_eq!(amount.to_string(), "1400");
/// assert_eq!(amount.grouped(), "1,400");
/// assert_eq!(amount.with_symbol("₹"), "₹1400");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Amount(u64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the underlying number of currency units.
    pub const fn value(&self) -> u64 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Adds `other`, returning `None` on overflow.
    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }

    /// Divides by `periods` and rounds to the nearest whole unit, halves rounding up.
    pub fn average_over(self, periods: NonZeroU32) -> Amount {
        let avg = (Decimal::from(self.0) / Decimal::from(periods.get()))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        // The quotient can never exceed the dividend, which is a u64.
        Amount(avg.to_u64().unwrap_or(self.0))
    }

    /// The share of `total` represented by `self`, as a whole percentage rounded half up. A zero
    /// `total` yields 0.
    pub fn percent_of(self, total: Amount) -> u32 {
        if total.is_zero() {
            return 0;
        }
        let pct = (Decimal::from(self.0) * Decimal::ONE_HUNDRED / Decimal::from(total.0))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        pct.to_u32().unwrap_or(u32::MAX)
    }

    /// Formats the amount with commas as thousands separators, e.g. `1,234,567`.
    pub fn grouped(&self) -> String {
        let digits = self.0.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (ix, c) in digits.chars().enumerate() {
            if ix > 0 && (digits.len() - ix) % 3 == 0 {
                out.push(',');
            }
            out.push(c);
        }
        out
    }

    /// Formats the amount prefixed with `symbol` and no separators, e.g. `₹450`.
    pub fn with_symbol(&self, symbol: &str) -> String {
        format!("{symbol}{}", self.0)
    }

    /// Formats the amount prefixed with `symbol` and with separators, e.g. `₹1,400`.
    pub fn grouped_with_symbol(&self, symbol: &str) -> String {
        format!("{symbol}{}", self.grouped())
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Amount(value)
    }
}

impl From<Amount> for u64 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

/// Saturates at `u64::MAX`; use `checked_add` where overflow must be detected.
impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        Amount(iter.fold(0u64, |acc, a| acc.saturating_add(a.0)))
    }
}
