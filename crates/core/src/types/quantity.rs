//! Line-item quantities.

use core::fmt;
use core::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Quantity`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QuantityError {
    /// Quantities start at one.
    #[error("quantity must be at least 1")]
    Zero,
}

/// A positive unit count for a cart entry.
///
/// There is no zero quantity: an entry that would drop to zero or below is
/// removed instead, which [`Quantity::apply`] expresses by returning `None`.
///
/// ```
/// use souq_core::Quantity;
///
/// let one = Quantity::ONE;
/// assert_eq!(one.apply(1).map(Quantity::get), Some(2));
/// assert_eq!(one.apply(-1), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(NonZeroU32);

impl Quantity {
    /// A single unit.
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Create a quantity.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError::Zero`] for zero.
    pub fn new(n: u32) -> Result<Self, QuantityError> {
        NonZeroU32::new(n).map(Self).ok_or(QuantityError::Zero)
    }

    /// The unit count.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// One more unit, saturating at `u32::MAX`.
    #[must_use]
    pub const fn increment(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Apply a signed change.
    ///
    /// Returns `None` when the result is zero or negative. Large positive
    /// results saturate at `u32::MAX`.
    #[must_use]
    pub fn apply(self, delta: i64) -> Option<Self> {
        let next = i64::from(self.get()).saturating_add(delta);
        if next <= 0 {
            return None;
        }
        let clamped = u32::try_from(next).unwrap_or(u32::MAX);
        NonZeroU32::new(clamped).map(Self)
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for Quantity {
    type Error = QuantityError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.get()
    }
}
