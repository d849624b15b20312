//! Session state and recovery commands

use serde::Serialize;
use tauri::{AppHandle, State};
use tether_core::{ErrorMessage, SessionState, PULL_TO_REFRESH_HINT, RETRY_LABEL};

use super::{publish, CommandResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SessionSnapshot {
    pub destination: String,
    pub state: SessionState,
    pub message: Option<ErrorMessage>,
    pub retry_label: &'static str,
    pub pull_to_refresh_hint: &'static str,
}

#[tauri::command]
pub fn get_session_state(state: State<AppState>) -> CommandResult<SessionSnapshot> {
    let shell = state.shell();
    CommandResult::ok(SessionSnapshot {
        destination: shell.destination().to_string(),
        state: shell.state(),
        message: shell.error_message(),
        retry_label: RETRY_LABEL,
        pull_to_refresh_hint: PULL_TO_REFRESH_HINT,
    })
}

#[tauri::command]
pub fn retry_load(app: AppHandle, state: State<AppState>) -> CommandResult<SessionState> {
    let next = state.shell().retry();
    publish(&app, next);
    CommandResult::ok(next)
}

#[tauri::command]
pub fn pull_to_refresh(app: AppHandle, state: State<AppState>) -> CommandResult<SessionState> {
    let next = state.shell().pull_to_refresh();
    publish(&app, next);
    CommandResult::ok(next)
}

#[tauri::command]
pub fn clear_cache_and_reload(
    app: AppHandle,
    state: State<AppState>,
) -> CommandResult<SessionState> {
    let next = state.shell().clear_cache_and_reload();
    publish(&app, next);
    CommandResult::ok(next)
}

/// Failure reported by platform glue that sees engine errors directly.
#[tauri::command]
pub fn report_load_error(
    app: AppHandle,
    state: State<AppState>,
    description: Option<String>,
    code: Option<i32>,
) -> CommandResult<SessionState> {
    let next = state.shell().on_error(description.as_deref(), code);
    publish(&app, next);
    CommandResult::ok(next)
}

#[tauri::command]
pub fn report_http_error(
    app: AppHandle,
    state: State<AppState>,
    status: Option<u16>,
) -> CommandResult<SessionState> {
    if let Some(status) = status.filter(|s| *s < 400) {
        return CommandResult::err(format!("Not an error status: {}", status));
    }

    let next = state.shell().on_http_error(status);
    publish(&app, next);
    CommandResult::ok(next)
}
