//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are single-currency: the display symbol is a presentation concern
//! supplied by the caller, not part of the value.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Quantity;

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative (got {0})")]
    Negative(Decimal),
    /// The amount is above [`Price::MAX`].
    #[error("price cannot exceed {max}")]
    TooLarge {
        /// Largest accepted amount.
        max: Decimal,
    },
    /// The amount has more decimal places than [`Price::MAX_SCALE`].
    #[error("price cannot have more than {max_scale} decimal places")]
    TooPrecise {
        /// Largest accepted number of decimal places.
        max_scale: u32,
    },
    /// The input could not be read as a decimal number.
    #[error("invalid price: {0}")]
    Invalid(String),
}

/// A non-negative amount in the store currency's standard unit.
///
/// Serialized as a plain JSON number so stored carts read as
/// `{"price": 10}` rather than `{"price": "10"}`. Amounts are bounded by
/// [`Price::MAX`] and [`Price::MAX_SCALE`], which keeps every price exact
/// through that number and keeps line totals far from `Decimal` overflow.
///
/// ```
/// use souq_core::Price;
///
/// let price: Price = "12.50".parse().unwrap();
/// assert_eq!(price.to_string(), "12.5");
/// assert!("-1".parse::<Price>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Largest accepted unit price: ten billion currency units.
    pub const MAX: Self = Self(Decimal::from_parts(0x540B_E400, 2, 0, false, 0));

    /// Most decimal places a unit price may carry.
    pub const MAX_SCALE: u32 = 4;

    /// Create a price from a decimal amount.
    ///
    /// Trailing zeros do not count towards the scale, so `"12.50000"` is
    /// accepted as `12.5`.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is below zero,
    /// [`PriceError::TooLarge`] above [`Price::MAX`], and
    /// [`PriceError::TooPrecise`] with more than [`Price::MAX_SCALE`]
    /// decimal places.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        let amount = Self::in_range(amount)?;
        if amount.scale() > Self::MAX_SCALE {
            return Err(PriceError::TooPrecise {
                max_scale: Self::MAX_SCALE,
            });
        }
        Ok(Self(amount))
    }

    /// Sign and magnitude checks shared by [`Price::new`] and
    /// deserialization. Returns the normalized amount.
    fn in_range(amount: Decimal) -> Result<Decimal, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        if amount > Self::MAX.0 {
            return Err(PriceError::TooLarge { max: Self::MAX.0 });
        }
        Ok(amount.normalize())
    }

    /// Create a price from a whole number of currency units.
    #[must_use]
    pub fn from_units(units: u32) -> Self {
        Self(Decimal::from(units))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units at this unit price.
    ///
    /// Saturates at `Decimal::MAX` instead of overflowing.
    #[must_use]
    pub fn times(self, quantity: Quantity) -> Self {
        Self(
            self.0
                .checked_mul(Decimal::from(quantity.get()))
                .unwrap_or(Decimal::MAX),
        )
    }

    /// Format with a trailing currency symbol, e.g. `"25 ر.س"`.
    #[must_use]
    pub fn display_with(&self, symbol: &str) -> String {
        if symbol.is_empty() {
            self.to_string()
        } else {
            format!("{self} {symbol}")
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl std::str::FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = s
            .trim()
            .parse::<Decimal>()
            .map_err(|e| PriceError::Invalid(e.to_string()))?;
        Self::new(amount)
    }
}

impl Add for Price {
    type Output = Self;

    /// Saturates at `Decimal::MAX` instead of overflowing.
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.checked_add(rhs.0).unwrap_or(Decimal::MAX))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0.normalize(), serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // The float path can leave binary noise past the last stored digit.
        let amount: Decimal = rust_decimal::serde::float::deserialize(deserializer)?;
        Self::in_range(amount)
            .map(|amount| Self(amount.round_dp(Self::MAX_SCALE).normalize()))
            .map_err(serde::de::Error::custom)
    }
}
