//! Tauri IPC Commands
//!
//! These commands bridge the platform and presentation layers to the session.
//! Rust owns all state; every transition is published as a `session-state` event.

pub mod navigation;
pub mod session;
pub mod webview;

use serde::Serialize;
use tauri::{AppHandle, Emitter};
use tether_core::SessionState;

pub const CONTENT_WEBVIEW_LABEL: &str = "content";
pub const SESSION_STATE_EVENT: &str = "session-state";

#[derive(Debug, Serialize)]
pub struct CommandResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

/// Broadcast a new session state to every listener.
pub fn publish(app: &AppHandle, state: SessionState) {
    if let Err(e) = app.emit(SESSION_STATE_EVENT, state) {
        tracing::warn!(error = %e, "Failed to publish session state");
    }
}
