//! Navigation guard
//!
//! Invoked synchronously on every navigation attempt the engine signals,
//! including the initial load. It must answer before the engine proceeds,
//! so it never blocks and never starts a navigation of its own; the only
//! side effect is the fire-and-forget OS handoff.

use std::sync::Arc;
use url::Url;

use crate::destination::Destination;
use crate::opener::ExternalOpener;

/// Schemes that always leave the app, checked before parsing.
const HANDOFF_SCHEMES: &[&str] = &["tel:", "mailto:", "sms:"];

/// Schemes the embedded engine may load in place.
const WEB_SCHEMES: &[&str] = &["http", "https"];

/// A single navigation attempt reported by the engine. Not retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    pub uri: String,
    pub is_main_frame: bool,
}

impl NavigationRequest {
    pub fn new(uri: impl Into<String>, is_main_frame: bool) -> Self {
        Self {
            uri: uri.into(),
            is_main_frame,
        }
    }

    pub fn main_frame(uri: impl Into<String>) -> Self {
        Self::new(uri, true)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Load in place.
    Allow,
    /// Block the in-place load and hand the URI to the OS.
    DelegateToOs,
    /// Block the in-place load without a handoff.
    Suppress,
}

impl GuardDecision {
    /// Whether the engine may proceed with the load.
    pub fn permits_load(&self) -> bool {
        matches!(self, GuardDecision::Allow)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GuardDecision::Allow => "allow",
            GuardDecision::DelegateToOs => "delegate_to_os",
            GuardDecision::Suppress => "suppress",
        }
    }
}

impl std::fmt::Display for GuardDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Decide what to do with `requested` given the configured destination.
///
/// Pure: performs no handoff. A URI that fails to parse is allowed so the
/// engine can make its own call.
pub fn decide(requested: &str, destination: &Destination) -> GuardDecision {
    let requested = requested.trim();

    if has_handoff_scheme(requested) {
        return GuardDecision::DelegateToOs;
    }

    let Ok(url) = Url::parse(requested) else {
        return GuardDecision::Allow;
    };

    if !WEB_SCHEMES.contains(&url.scheme()) {
        return GuardDecision::DelegateToOs;
    }

    if !destination.matches_host(&url) {
        return GuardDecision::DelegateToOs;
    }

    GuardDecision::Allow
}

fn has_handoff_scheme(uri: &str) -> bool {
    HANDOFF_SCHEMES.iter().any(|scheme| {
        uri.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

/// Guard bound to one destination and one OS handoff capability.
pub struct NavigationGuard {
    destination: Destination,
    opener: Arc<dyn ExternalOpener>,
}

impl NavigationGuard {
    pub fn new(destination: Destination, opener: Arc<dyn ExternalOpener>) -> Self {
        Self {
            destination,
            opener,
        }
    }

    pub fn destination(&self) -> &Destination {
        &self.destination
    }

    /// Decide on an engine navigation attempt and perform the handoff if needed.
    ///
    /// Sub-frame requests that would be delegated are suppressed instead, so an
    /// embedded frame cannot launch external apps.
    pub fn check(&self, request: &NavigationRequest) -> GuardDecision {
        let decision = match decide(&request.uri, &self.destination) {
            GuardDecision::DelegateToOs if !request.is_main_frame => GuardDecision::Suppress,
            decision => decision,
        };

        match decision {
            GuardDecision::Allow => {
                tracing::debug!(url = %request.uri, main_frame = request.is_main_frame, "Navigation allowed");
            }
            GuardDecision::DelegateToOs => {
                tracing::info!(url = %request.uri, "Navigation delegated to OS");
                self.hand_off(&request.uri);
            }
            GuardDecision::Suppress => {
                tracing::debug!(url = %request.uri, "Sub-frame navigation suppressed");
            }
        }

        decision
    }

    /// Shorthand for a main-frame attempt; returns whether the load may proceed.
    pub fn should_load(&self, uri: &str) -> bool {
        self.check(&NavigationRequest::main_frame(uri)).permits_load()
    }

    fn hand_off(&self, uri: &str) {
        if let Err(e) = self.opener.open_externally(uri) {
            tracing::warn!(url = %uri, error = %e, "External handoff failed");
        }
    }
}
