//! History and back navigation commands

use tauri::{AppHandle, State};
use tether_core::{BackAction, SessionState};

use super::{publish, CommandResult};
use crate::state::AppState;

/// Reported by the history bridge script on every history change.
#[tauri::command]
pub fn history_changed(
    app: AppHandle,
    state: State<AppState>,
    can_go_back: bool,
) -> CommandResult<SessionState> {
    let next = state.shell().on_history_changed(can_go_back);
    publish(&app, next);
    CommandResult::ok(next)
}

/// System back signal. `PassThrough` tells the platform to apply its default.
#[tauri::command]
pub fn handle_back_request(state: State<AppState>) -> CommandResult<BackAction> {
    let action = state.dispatch_back();
    tracing::debug!(?action, "Back request handled");
    CommandResult::ok(action)
}
