//! Session state record
//!
//! ```text
//! Loading ──finish──► Loaded
//!    │                  │
//!    └──fail──► Errored ◄┘ (late failure)
//!                  │
//!                  └──retry──► Loading
//! ```
//!
//! There is no terminal state. `has_error` implies `!loading`.

use serde::{Deserialize, Serialize};

/// User-facing failure category. Overwritten on the next failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    /// Connectivity failure (offline, DNS, connection reset)
    Network,
    /// The server answered with an error status
    Http,
    /// The engine gave up waiting
    Timeout,
    #[default]
    Unknown,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Http => "http",
            ErrorCategory::Timeout => "timeout",
            ErrorCategory::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ErrorCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "network" => Ok(ErrorCategory::Network),
            "http" => Ok(ErrorCategory::Http),
            "timeout" => Ok(ErrorCategory::Timeout),
            "unknown" => Ok(ErrorCategory::Unknown),
            _ => Err(format!("Unknown error category: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub loading: bool,
    pub can_go_back: bool,
    pub has_error: bool,
    pub error_type: ErrorCategory,
    /// A reload was explicitly requested and has not resolved yet
    pub refreshing: bool,
}

impl SessionState {
    /// State at session creation. Loading, because the initial navigation is
    /// issued as soon as the session is built.
    pub fn initial() -> Self {
        Self {
            loading: true,
            can_go_back: false,
            has_error: false,
            error_type: ErrorCategory::Unknown,
            refreshing: false,
        }
    }

    /// Full-screen loading indicator. Hidden while a pull-to-refresh spinner
    /// is already visible.
    pub fn shows_loading_overlay(&self) -> bool {
        self.loading && !self.refreshing
    }

    pub fn shows_error(&self) -> bool {
        self.has_error
    }

    /// The active error category, if any.
    pub fn error(&self) -> Option<ErrorCategory> {
        self.has_error.then_some(self.error_type)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = SessionState::initial();
        assert!(state.loading);
        assert!(!state.can_go_back);
        assert!(!state.has_error);
        assert_eq!(state.error_type, ErrorCategory::Unknown);
        assert!(!state.refreshing);
        assert!(state.shows_loading_overlay());
        assert_eq!(state.error(), None);
    }

    #[test]
    fn test_overlay_hidden_while_refreshing() {
        let state = SessionState {
            refreshing: true,
            ..SessionState::initial()
        };
        assert!(!state.shows_loading_overlay());
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("NETWORK".parse::<ErrorCategory>().unwrap(), ErrorCategory::Network);
        assert_eq!("http".parse::<ErrorCategory>().unwrap(), ErrorCategory::Http);
        assert!("offline".parse::<ErrorCategory>().is_err());
    }

    #[test]
    fn test_state_serializes_for_presentation() {
        let state = SessionState {
            loading: false,
            has_error: true,
            error_type: ErrorCategory::Http,
            ..SessionState::initial()
        };
        let json = serde_json::to_value(state).unwrap();
        assert_eq!(json["hasError"], true);
        assert_eq!(json["errorType"], "http");
        assert_eq!(json["canGoBack"], false);
    }
}
