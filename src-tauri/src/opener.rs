//! OS handoff through the opener plugin

use tauri::AppHandle;
use tauri_plugin_opener::OpenerExt;
use tether_core::{ExternalOpener, OpenError};

pub struct SystemOpener {
    app: AppHandle,
}

impl SystemOpener {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

impl ExternalOpener for SystemOpener {
    /// Dispatches the open off the navigation callback and returns at once.
    /// Failures are logged where they happen and never reach the caller.
    fn open_externally(&self, uri: &str) -> Result<(), OpenError> {
        let app = self.app.clone();
        let uri = uri.to_string();

        tauri::async_runtime::spawn_blocking(move || {
            if let Err(e) = app.opener().open_url(uri.as_str(), None::<&str>) {
                tracing::warn!(url = %uri, error = %e, "Failed to open URL externally");
            }
        });

        Ok(())
    }
}
