//! Value objects: equality by value, not identity.
//!
//! Value objects have **no identity**; they are defined entirely by their
//! attribute values. Two prices of 109.95 are the same price.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one (see [`Price::discounted`]).
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

const CENTS_PER_UNIT: u64 = 100;
const FULL_PERCENT: f64 = 100.0;

/// Past this many binary fraction digits the discount is worth less than half
/// a cent on any price, so the price is kept as is.
const MAX_DISCOUNT_SCALE: u32 = 118;

/// Non-negative unit price, held as integer cents.
///
/// Decimal input is rounded to the nearest cent, half away from zero. On the
/// wire a price is a plain decimal number (`109.95`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Price {
    cents: u64,
}

impl Price {
    pub const ZERO: Price = Price { cents: 0 };

    pub const fn from_cents(cents: u64) -> Self {
        Self { cents }
    }

    /// Build a price from a decimal amount (e.g. `109.95`).
    pub fn from_decimal(amount: f64) -> DomainResult<Self> {
        if !amount.is_finite() {
            return Err(DomainError::validation("price must be a finite number"));
        }
        if amount < 0.0 {
            return Err(DomainError::validation(format!(
                "price cannot be negative (got {amount})"
            )));
        }

        let cents = (amount * CENTS_PER_UNIT as f64).round();
        if cents > u64::MAX as f64 {
            return Err(DomainError::validation("price is too large"));
        }

        Ok(Self {
            cents: cents as u64,
        })
    }

    pub fn cents(&self) -> u64 {
        self.cents
    }

    pub fn as_decimal(&self) -> f64 {
        self.cents as f64 / CENTS_PER_UNIT as f64
    }

    /// Apply a percentage discount: `round2(price * (1 - percent / 100))`.
    ///
    /// The percent is taken at its exact binary value `m / 2^k`, so the amount
    /// off is the rational `cents * m / (100 * 2^k)`, computed in integers and
    /// rounded so the result lands half away from zero. A 0% discount returns
    /// `self` unchanged; 100% returns zero. The result never exceeds the
    /// original price.
    pub fn discounted(self, discount: DiscountPercent) -> Price {
        let (numerator, scale) = discount.as_ratio();
        if numerator == 0 || scale >= MAX_DISCOUNT_SCALE {
            return self;
        }

        // cents < 2^64 and numerator < 2^53, so the product fits in u128.
        let scaled = u128::from(self.cents) * u128::from(numerator);
        let denominator = 100u128 << scale;
        let whole = scaled / denominator;
        let rest = scaled % denominator;

        // Round the amount off half toward zero, which rounds the remaining
        // price half away from zero.
        let off = if rest * 2 > denominator { whole + 1 } else { whole };

        // percent <= 100, so off <= cents.
        Price {
            cents: self.cents - off as u64,
        }
    }
}

impl ValueObject for Price {}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{}.{:02}",
            self.cents / CENTS_PER_UNIT,
            self.cents % CENTS_PER_UNIT
        )
    }
}

impl TryFrom<f64> for Price {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Price::from_decimal(value)
    }
}

impl From<Price> for f64 {
    fn from(value: Price) -> Self {
        value.as_decimal()
    }
}

/// Discount percentage in `[0, 100]`, kept at full `f64` precision.
///
/// Always finite and never negative zero, which makes bit comparison agree
/// with numeric comparison.
#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct DiscountPercent {
    percent: f64,
}

impl DiscountPercent {
    /// Discount applied when the caller does not supply one.
    pub const DEFAULT: DiscountPercent = DiscountPercent { percent: 15.0 };

    pub const NONE: DiscountPercent = DiscountPercent { percent: 0.0 };

    pub const FULL: DiscountPercent = DiscountPercent {
        percent: FULL_PERCENT,
    };

    pub fn new(percent: f64) -> DomainResult<Self> {
        if !percent.is_finite() || !(0.0..=FULL_PERCENT).contains(&percent) {
            return Err(DomainError::validation(format!(
                "discount percent must be within 0..=100 (got {percent})"
            )));
        }

        // -0.0 passes the range check; store it as 0.0.
        Ok(Self {
            percent: percent + 0.0,
        })
    }

    /// Whole-percent constructor for call sites with literal values.
    pub fn whole(percent: u8) -> DomainResult<Self> {
        Self::new(f64::from(percent))
    }

    pub fn as_f64(&self) -> f64 {
        self.percent
    }

    /// Exact `(m, k)` with `percent == m / 2^k`, `k` as small as possible.
    fn as_ratio(&self) -> (u64, u32) {
        let bits = self.percent.to_bits();
        let biased_exponent = ((bits >> 52) & 0x7ff) as i32;
        let fraction = bits & ((1u64 << 52) - 1);

        let (mantissa, exponent) = if biased_exponent == 0 {
            (fraction, -1074)
        } else {
            (fraction | (1u64 << 52), biased_exponent - 1075)
        };
        if mantissa == 0 {
            return (0, 0);
        }
        if exponent >= 0 {
            // Integers up to 100 always carry a negative exponent; kept total.
            return (mantissa << exponent, 0);
        }

        let scale = exponent.unsigned_abs();
        let shift = mantissa.trailing_zeros().min(scale);
        (mantissa >> shift, scale - shift)
    }
}

impl Default for DiscountPercent {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl PartialEq for DiscountPercent {
    fn eq(&self, other: &Self) -> bool {
        self.percent.to_bits() == other.percent.to_bits()
    }
}

impl Eq for DiscountPercent {}

impl PartialOrd for DiscountPercent {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DiscountPercent {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.percent.to_bits().cmp(&other.percent.to_bits())
    }
}

impl core::hash::Hash for DiscountPercent {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.percent.to_bits().hash(state);
    }
}

impl ValueObject for DiscountPercent {}

impl core::fmt::Display for DiscountPercent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}%", self.percent)
    }
}

impl core::str::FromStr for DiscountPercent {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .trim_end_matches('%')
            .parse::<f64>()
            .map_err(|e| DomainError::validation(format!("discount percent: {e}")))?;
        Self::new(value)
    }
}

impl TryFrom<f64> for DiscountPercent {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        DiscountPercent::new(value)
    }
}

impl From<DiscountPercent> for f64 {
    fn from(value: DiscountPercent) -> Self {
        value.as_f64()
    }
}
