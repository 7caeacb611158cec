//! Domain identifier types with proper encapsulation.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use super::error::SlugError;

/// Contract identifier - the platform's market id, used verbatim when
/// placing orders.
///
/// The inner String is private to ensure all construction goes through
/// the defined constructors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContractId(String);

impl ContractId {
    /// Create a new `ContractId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the contract ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ContractId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for ContractId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Market slug - the human-readable last path segment of a market URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarketSlug(String);

impl MarketSlug {
    /// Parse a slug from either a bare slug or a full market URL.
    ///
    /// For URLs the last non-empty path segment is taken, so
    /// `https://manifold.markets/alice/will-it-rain?r=abc` yields
    /// `will-it-rain`.
    ///
    /// # Errors
    ///
    /// Returns [`SlugError`] if the input is empty, the URL has no path
    /// segment, or the slug contains whitespace.
    pub fn parse(input: &str) -> Result<Self, SlugError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(SlugError::Empty);
        }

        let candidate = match Url::parse(trimmed) {
            Ok(url) => url
                .path_segments()
                .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
                .map(str::to_string)
                .ok_or_else(|| SlugError::NoPath {
                    url: trimmed.to_string(),
                })?,
            Err(_) => trimmed
                .split('/')
                .filter(|s| !s.is_empty())
                .last()
                .unwrap_or_default()
                .to_string(),
        };

        if candidate.is_empty() {
            return Err(SlugError::Empty);
        }
        if candidate.chars().any(char::is_whitespace) {
            return Err(SlugError::Whitespace { slug: candidate });
        }

        Ok(Self(candidate))
    }

    /// Get the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MarketSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contract_id_round_trips_through_display() {
        let id = ContractId::from("abc123");
        assert_eq!(id.as_str(), "abc123");
        assert_eq!(id.to_string(), "abc123");
    }

    #[test]
    fn slug_from_bare_slug() {
        let slug = MarketSlug::parse("will-it-rain-tomorrow").unwrap();
        assert_eq!(slug.as_str(), "will-it-rain-tomorrow");
    }

    #[test]
    fn slug_from_url_ignores_query_and_fragment() {
        let slug =
            MarketSlug::parse("https://manifold.markets/alice/will-it-rain?r=QWxpY2U#comments")
                .unwrap();
        assert_eq!(slug.as_str(), "will-it-rain");
    }

    #[test]
    fn slug_from_url_with_trailing_slash() {
        let slug = MarketSlug::parse("https://manifold.markets/alice/will-it-rain/").unwrap();
        assert_eq!(slug.as_str(), "will-it-rain");
    }

    #[test]
    fn slug_from_creator_path() {
        let slug = MarketSlug::parse("alice/will-it-rain").unwrap();
        assert_eq!(slug.as_str(), "will-it-rain");
    }

    #[test]
    fn slug_rejects_empty_input() {
        assert!(matches!(MarketSlug::parse("   "), Err(SlugError::Empty)));
    }

    #[test]
    fn slug_rejects_url_without_path() {
        assert!(matches!(
            MarketSlug::parse("https://manifold.markets/"),
            Err(SlugError::NoPath { .. })
        ));
    }

    #[test]
    fn slug_rejects_whitespace() {
        assert!(matches!(
            MarketSlug::parse("will it rain"),
            Err(SlugError::Whitespace { .. })
        ));
    }
}
