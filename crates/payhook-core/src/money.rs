//! Monetary amounts.
//!
//! Amounts travel in minor currency units (cents). Users type them in major
//! units, which are scaled by 100 and truncated toward zero, so `19.99`
//! becomes `1998` because `19.99 * 100.0` is `1998.9999999999998` in binary
//! floating point. Downstream fixtures rely on that exact behavior.

use crate::error::BuildError;
use std::fmt;
use std::str::FromStr;

/// Amount used when none is supplied and the event has no plan price.
pub const DEFAULT_AMOUNT_MINOR: i64 = 4700;

/// Percentage of the charge kept by the platform.
const PLATFORM_FEE_PERCENT: i64 = 11;
/// Percentage of the charge settled to the producer.
const NET_SHARE_PERCENT: i64 = 89;

/// Largest charge, in minor units, the fee arithmetic accepts.
pub const MAX_AMOUNT_MINOR: i64 = i64::MAX / 100;

/// Currency of every simulated charge.
pub const CURRENCY: &str = "BRL";

/// A non-negative amount in major currency units, as typed on the command line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MajorAmount(f64);

impl MajorAmount {
    pub fn new(value: f64) -> Result<Self, BuildError> {
        if !value.is_finite() {
            return Err(BuildError::InvalidArgument(format!(
                "amount must be a finite number, got {value}"
            )));
        }
        if value < 0.0 {
            return Err(BuildError::InvalidArgument(format!(
                "amount must not be negative, got {value}"
            )));
        }
        #[allow(clippy::cast_precision_loss)]
        let ceiling = MAX_AMOUNT_MINOR as f64;
        if value * 100.0 >= ceiling {
            return Err(BuildError::InvalidArgument(format!(
                "amount {value} is too large"
            )));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Scales to minor units and truncates toward zero.
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_minor_units(self) -> i64 {
        (self.0 * 100.0) as i64
    }
}

impl TryFrom<f64> for MajorAmount {
    type Error = BuildError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for MajorAmount {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value: f64 = trimmed.parse().map_err(|_| {
            BuildError::InvalidArgument(format!("amount '{trimmed}' is not a number"))
        })?;
        Self::new(value)
    }
}

impl fmt::Display for MajorAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Platform fee and producer share of a charge.
///
/// Both shares are truncated independently, so for amounts that are not a
/// multiple of 100 they can add up to one cent less than the charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeSplit {
    pub platform_fee: i64,
    pub net: i64,
}

impl FeeSplit {
    /// Integer form of `trunc(amount * 0.11)` and `trunc(amount * 0.89)`.
    pub fn of(amount_minor: i64) -> Self {
        Self {
            platform_fee: share(amount_minor, PLATFORM_FEE_PERCENT),
            net: share(amount_minor, NET_SHARE_PERCENT),
        }
    }

    /// Cents lost to truncation (0 or 1).
    pub fn rounding_loss(self, amount_minor: i64) -> i64 {
        amount_minor - self.platform_fee - self.net
    }
}

// Widened so the product cannot overflow; a share never exceeds the amount.
#[allow(clippy::cast_possible_truncation)]
fn share(amount_minor: i64, percent: i64) -> i64 {
    (i128::from(amount_minor) * i128::from(percent) / 100) as i64
}
