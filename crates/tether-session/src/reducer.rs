//! Lifecycle reducer
//!
//! Pure `(state, event) -> state` transition function plus a small owner
//! that keeps the current state and logs transitions.

use crate::classify::classify;
use crate::state::{ErrorCategory, SessionState};

/// Events consumed by the reducer. Most come from the engine; `RefreshRequested`
/// is synthesized by the retry controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A load attempt began (initial load, link, reload or retry).
    LoadStarted,
    /// The current load completed, successfully or not.
    LoadFinished,
    /// The engine's back history changed.
    NavigationChanged { can_go_back: bool },
    /// Transport-level failure with the engine's description.
    LoadFailed {
        description: Option<String>,
        code: Option<i32>,
    },
    /// The server answered with an error status.
    HttpStatusFailed { status: Option<u16> },
    /// Pull-to-refresh was triggered.
    RefreshRequested,
}

impl SessionEvent {
    pub fn load_failed(description: impl Into<String>) -> Self {
        SessionEvent::LoadFailed {
            description: Some(description.into()),
            code: None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SessionEvent::LoadStarted => "load_started",
            SessionEvent::LoadFinished => "load_finished",
            SessionEvent::NavigationChanged { .. } => "navigation_changed",
            SessionEvent::LoadFailed { .. } => "load_failed",
            SessionEvent::HttpStatusFailed { .. } => "http_status_failed",
            SessionEvent::RefreshRequested => "refresh_requested",
        }
    }
}

/// Apply one event to a state.
pub fn reduce(state: SessionState, event: &SessionEvent) -> SessionState {
    match event {
        SessionEvent::LoadStarted => SessionState {
            loading: true,
            has_error: false,
            ..state
        },
        // Leaves `has_error` alone: only a new attempt clears an error.
        SessionEvent::LoadFinished => SessionState {
            loading: false,
            refreshing: false,
            ..state
        },
        SessionEvent::NavigationChanged { can_go_back } => SessionState {
            can_go_back: *can_go_back,
            ..state
        },
        SessionEvent::LoadFailed { description, .. } => SessionState {
            loading: false,
            refreshing: false,
            has_error: true,
            error_type: classify(description.as_deref()),
            ..state
        },
        SessionEvent::HttpStatusFailed { .. } => SessionState {
            loading: false,
            refreshing: false,
            has_error: true,
            error_type: ErrorCategory::Http,
            ..state
        },
        // Keeps `has_error`: the refresh may surface the same failure again.
        SessionEvent::RefreshRequested => SessionState {
            refreshing: true,
            ..state
        },
    }
}

/// Sole writer of a session's `SessionState`.
#[derive(Debug, Clone, Default)]
pub struct LifecycleReducer {
    state: SessionState,
}

impl LifecycleReducer {
    pub fn new() -> Self {
        Self {
            state: SessionState::initial(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Apply an event and return the resulting state.
    pub fn apply(&mut self, event: &SessionEvent) -> SessionState {
        let next = reduce(self.state, event);

        if let SessionEvent::LoadFailed { description, code } = event {
            tracing::debug!(
                description = description.as_deref().unwrap_or(""),
                code = ?code,
                category = %next.error_type,
                "Load failed"
            );
        }

        if next != self.state {
            tracing::debug!(
                event = event.name(),
                from = ?self.state,
                to = ?next,
                "Session state transition"
            );
        }

        self.state = next;
        next
    }
}
