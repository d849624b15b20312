//! User-facing copy for the error view

use serde::Serialize;

use tether_session::ErrorCategory;

pub const RETRY_LABEL: &str = "Try again";
pub const PULL_TO_REFRESH_HINT: &str = "Or pull down to refresh";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ErrorMessage {
    pub title: &'static str,
    pub subtitle: &'static str,
}

impl ErrorMessage {
    pub fn for_category(category: ErrorCategory) -> Self {
        match category {
            ErrorCategory::Network => Self {
                title: "No internet connection",
                subtitle: "Check your network connection and try again",
            },
            ErrorCategory::Http => Self {
                title: "Server error",
                subtitle: "The site is unavailable right now, please try again later",
            },
            ErrorCategory::Timeout => Self {
                title: "Connection timed out",
                subtitle: "The connection is too slow, try again",
            },
            ErrorCategory::Unknown => Self {
                title: "Unable to load the page",
                subtitle: "Check your internet connection and try again",
            },
        }
    }
}

impl From<ErrorCategory> for ErrorMessage {
    fn from(category: ErrorCategory) -> Self {
        Self::for_category(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_has_distinct_title() {
        let titles: std::collections::HashSet<_> = [
            ErrorCategory::Network,
            ErrorCategory::Http,
            ErrorCategory::Timeout,
            ErrorCategory::Unknown,
        ]
        .into_iter()
        .map(|c| ErrorMessage::for_category(c).title)
        .collect();
        assert_eq!(titles.len(), 4);
    }
}
