//! The single origin a session may navigate within

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::NavigationError;
use crate::Result;

/// Immutable destination URI. Set at session creation and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Destination {
    url: Url,
}

impl Destination {
    /// Parse and validate a destination. Only `http`/`https` URLs with a host
    /// are accepted.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        let url = Url::parse(input)
            .map_err(|e| NavigationError::InvalidDestination(format!("{}: {}", input, e)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(NavigationError::UnsupportedScheme(url.scheme().to_string()));
        }

        if url.host_str().map_or(true, str::is_empty) {
            return Err(NavigationError::MissingHost(input.to_string()));
        }

        Ok(Self { url })
    }

    /// Host the session is scoped to (lowercased by the URL parser).
    pub fn host(&self) -> &str {
        self.url.host_str().unwrap_or_default()
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    /// `scheme://host[:port]`, with default ports omitted.
    pub fn origin(&self) -> String {
        self.url.origin().ascii_serialization()
    }

    /// Whether `url` points at the destination host. Port and path are ignored.
    pub fn matches_host(&self, url: &Url) -> bool {
        url.host_str()
            .is_some_and(|host| host.eq_ignore_ascii_case(self.host()))
    }
}

impl std::fmt::Display for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.url)
    }
}

impl std::str::FromStr for Destination {
    type Err = NavigationError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Destination {
    type Error = NavigationError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Destination> for String {
    fn from(destination: Destination) -> Self {
        destination.url.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_destination() {
        let dest = Destination::parse("https://MyProjectPlatform.com/").unwrap();
        assert_eq!(dest.host(), "myprojectplatform.com");
        assert_eq!(dest.as_str(), "https://myprojectplatform.com/");
    }

    #[test]
    fn test_rejects_non_web_destinations() {
        assert!(matches!(
            Destination::parse("mailto:someone@example.com"),
            Err(NavigationError::UnsupportedScheme(_))
        ));
        assert!(matches!(
            Destination::parse("file:///etc/hosts"),
            Err(NavigationError::UnsupportedScheme(_))
        ));
        assert!(matches!(
            Destination::parse("not a url"),
            Err(NavigationError::InvalidDestination(_))
        ));
    }

    #[test]
    fn test_matches_host_ignores_port_and_path() {
        let dest = Destination::parse("https://example.com/app").unwrap();
        assert!(dest.matches_host(&Url::parse("http://example.com:8080/other?q=1").unwrap()));
        assert!(dest.matches_host(&Url::parse("https://EXAMPLE.com").unwrap()));
        assert!(!dest.matches_host(&Url::parse("https://www.example.com").unwrap()));
        assert!(!dest.matches_host(&Url::parse("https://example.com.evil.net").unwrap()));
    }

    #[test]
    fn test_origin() {
        let dest = Destination::parse("https://Example.org:443/app?x=1").unwrap();
        assert_eq!(dest.origin(), "https://example.org");

        let dest = Destination::parse("http://localhost:8080/app").unwrap();
        assert_eq!(dest.origin(), "http://localhost:8080");
    }

    #[test]
    fn test_serde_round_trip_validates() {
        let dest: Destination = serde_json::from_str("\"https://example.com/\"").unwrap();
        assert_eq!(dest.host(), "example.com");
        assert!(serde_json::from_str::<Destination>("\"ftp://example.com\"").is_err());
    }
}
