//! Tether - Tauri Application
//!
//! One window, one content webview, one destination.
//! - The webview is content only
//! - Rust owns the session state
//! - Off-site navigation is handed to the OS

mod commands;
mod engine;
mod opener;
mod probe;
mod state;

use std::sync::Arc;

use engine::TauriEngine;
use opener::SystemOpener;
use state::AppState;
use tauri::window::WindowBuilder;
use tauri::{Manager, RunEvent};
use tether_core::{Config, Shell};

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Initialize logging
    tether_core::init_logging();

    let app = tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .setup(|app| {
            let config = Config::load()?;
            let title = config.app_name.clone();

            let engine = Arc::new(TauriEngine::new(
                app.handle().clone(),
                commands::CONTENT_WEBVIEW_LABEL,
            ));
            let opener = Arc::new(SystemOpener::new(app.handle().clone()));
            let shell = Arc::new(Shell::new(config, engine, opener)?);

            // The destination is configurable, so its IPC access is too
            app.add_capability(commands::webview::content_capability(shell.destination()))?;

            // Store state in Tauri before the webview can raise events
            app.manage(AppState::new(Arc::clone(&shell)));

            let window = WindowBuilder::new(app, "main")
                .title(&title)
                .inner_size(1280.0, 800.0)
                .min_inner_size(400.0, 600.0)
                .center()
                .build()?;

            commands::webview::build_content_webview(app.handle(), &window, &shell)?;

            tracing::info!(destination = %shell.destination(), "Tether started");

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Session commands
            commands::session::get_session_state,
            commands::session::retry_load,
            commands::session::pull_to_refresh,
            commands::session::clear_cache_and_reload,
            commands::session::report_load_error,
            commands::session::report_http_error,
            // Navigation commands
            commands::navigation::history_changed,
            commands::navigation::handle_back_request,
        ])
        .build(tauri::generate_context!())
        .expect("error while building Tether");

    app.run(|app, event| {
        if let RunEvent::Exit = event {
            if let Some(state) = app.try_state::<AppState>() {
                state.teardown();
            }
        }
    });
}
