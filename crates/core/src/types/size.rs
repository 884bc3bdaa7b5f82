//! Garment size label type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`SizeLabel`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SizeError {
    /// The input string is empty (or only whitespace).
    #[error("size label cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("size label must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains something other than ASCII letters and digits.
    #[error("size label contains invalid character {0:?}")]
    InvalidCharacter(char),
}

/// A garment size label such as `M` or `XXL`.
///
/// Labels are normalized to upper case so `m` and `M` name the same size,
/// which keeps cart lines for one size from splitting in two.
///
/// ## Constraints
///
/// - Length: 1-8 characters after trimming
/// - ASCII letters and digits only
///
/// ## Examples
///
/// ```
/// use groovy_core::SizeLabel;
///
/// assert_eq!(SizeLabel::parse(" xl ").unwrap().as_str(), "XL");
/// assert!(SizeLabel::parse("").is_err());
/// assert!(SizeLabel::parse("X L").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct SizeLabel(String);

impl SizeLabel {
    /// Maximum length of a size label.
    pub const MAX_LENGTH: usize = 8;

    /// Sizes offered by the storefront's size filter, smallest first.
    pub const STANDARD: [&'static str; 7] = ["XS", "S", "M", "ML", "L", "XL", "XXL"];

    /// Parse a `SizeLabel` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input:
    /// - Is empty
    /// - Is longer than 8 characters
    /// - Contains anything other than ASCII letters and digits
    pub fn parse(s: &str) -> Result<Self, SizeError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(SizeError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(SizeError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if let Some(c) = s.chars().find(|c| !c.is_ascii_alphanumeric()) {
            return Err(SizeError::InvalidCharacter(c));
        }

        Ok(Self(s.to_ascii_uppercase()))
    }

    /// The standard filter sizes as parsed labels.
    #[must_use]
    pub fn standard() -> Vec<Self> {
        Self::STANDARD
            .iter()
            .map(|s| Self((*s).to_owned()))
            .collect()
    }

    /// Returns the label as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SizeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for SizeLabel {
    type Err = SizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SizeLabel {
    type Error = SizeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SizeLabel> for String {
    fn from(size: SizeLabel) -> Self {
        size.0
    }
}

impl AsRef<str> for SizeLabel {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_standard_sizes() {
        for size in SizeLabel::STANDARD {
            assert_eq!(SizeLabel::parse(size).unwrap().as_str(), size);
        }
    }

    #[test]
    fn test_parse_normalizes_case_and_whitespace() {
        assert_eq!(SizeLabel::parse("  ml ").unwrap().as_str(), "ML");
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(SizeLabel::parse(""), Err(SizeError::Empty)));
        assert!(matches!(SizeLabel::parse("   "), Err(SizeError::Empty)));
    }

    #[test]
    fn test_parse_too_long() {
        assert!(matches!(
            SizeLabel::parse("XXXXXXXXXL"),
            Err(SizeError::TooLong { .. })
        ));
    }

    #[test]
    fn test_parse_invalid_character() {
        assert_eq!(
            SizeLabel::parse("X-L"),
            Err(SizeError::InvalidCharacter('-'))
        );
    }

    #[test]
    fn test_standard_matches_constant() {
        let standard = SizeLabel::standard();
        assert_eq!(standard.len(), SizeLabel::STANDARD.len());
        assert_eq!(standard.first().unwrap().as_str(), "XS");
    }

    #[test]
    fn test_serde_validates_on_deserialize() {
        let size: SizeLabel = serde_json::from_str("\"xl\"").unwrap();
        assert_eq!(size.as_str(), "XL");
        assert!(serde_json::from_str::<SizeLabel>("\"\"").is_err());
        assert_eq!(serde_json::to_string(&size).unwrap(), "\"XL\"");
    }
}
