//! Customer display name collected at checkout.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`CustomerName`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CustomerNameError {
    /// The input is empty or whitespace only.
    #[error("customer name cannot be empty")]
    Empty,
    /// The input is too long.
    #[error("customer name must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
}

/// The name a customer typed into the checkout form.
///
/// Only used for the confirmation message; it is never persisted.
///
/// ```
/// use souq_core::CustomerName;
///
/// assert_eq!(CustomerName::parse(" Layla ").unwrap().as_str(), "Layla");
/// assert!(CustomerName::parse("").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct CustomerName(String);

impl CustomerName {
    /// Maximum length of a customer name.
    pub const MAX_LENGTH: usize = 100;

    /// Parse a `CustomerName` from form input.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty or longer than
    /// [`Self::MAX_LENGTH`] characters.
    pub fn parse(s: &str) -> Result<Self, CustomerNameError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(CustomerNameError::Empty);
        }
        if trimmed.chars().count() > Self::MAX_LENGTH {
            return Err(CustomerNameError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CustomerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for CustomerName {
    type Err = CustomerNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CustomerName {
    type Error = CustomerNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CustomerName> for String {
    fn from(name: CustomerName) -> Self {
        name.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty() {
        assert_eq!(CustomerName::parse(""), Err(CustomerNameError::Empty));
        assert_eq!(CustomerName::parse(" \t"), Err(CustomerNameError::Empty));
    }

    #[test]
    fn test_parse_too_long() {
        let long = "ن".repeat(CustomerName::MAX_LENGTH + 1);
        assert!(matches!(
            CustomerName::parse(&long),
            Err(CustomerNameError::TooLong { .. })
        ));
    }

    #[test]
    fn test_length_counts_chars_not_bytes() {
        let name = "ن".repeat(CustomerName::MAX_LENGTH);
        assert!(CustomerName::parse(&name).is_ok());
    }
}
