//! `BrowsingEngine` backed by the content webview
//!
//! Looks the webview up by label on every command, so the engine can be
//! handed to the session before the webview exists.

use tauri::{AppHandle, Manager, Webview};
use tether_core::{BrowsingEngine, EngineError};

pub struct TauriEngine {
    app: AppHandle,
    label: String,
}

impl TauriEngine {
    pub fn new(app: AppHandle, label: impl Into<String>) -> Self {
        Self {
            app,
            label: label.into(),
        }
    }

    fn webview(&self) -> Result<Webview, EngineError> {
        self.app
            .get_webview(&self.label)
            .ok_or_else(|| EngineError::Unavailable(format!("Webview not found: {}", self.label)))
    }
}

impl BrowsingEngine for TauriEngine {
    fn load(&self, uri: &str) -> Result<(), EngineError> {
        let parsed: url::Url = uri
            .parse()
            .map_err(|e| EngineError::Command(format!("Invalid URL {}: {}", uri, e)))?;

        self.webview()?
            .navigate(parsed)
            .map_err(|e| EngineError::Command(format!("Navigation failed: {}", e)))?;
        tracing::info!(label = %self.label, url = %uri, "Navigated webview");
        Ok(())
    }

    fn reload(&self) -> Result<(), EngineError> {
        self.webview()?
            .reload()
            .map_err(|e| EngineError::Command(format!("Reload failed: {}", e)))
    }

    fn go_back(&self) -> Result<(), EngineError> {
        self.webview()?
            .eval("history.back()")
            .map_err(|e| EngineError::Command(format!("Back navigation failed: {}", e)))
    }

    fn supports_cache_clearing(&self) -> bool {
        true
    }

    fn clear_cache(&self) -> Result<(), EngineError> {
        self.webview()?
            .clear_all_browsing_data()
            .map_err(|e| EngineError::Command(format!("Clearing browsing data failed: {}", e)))
    }
}
