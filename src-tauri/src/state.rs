//! Application state management
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tether_core::{BackAction, BackDispatcher, BackRegistration, Shell};

use crate::probe::Prober;

/// Thread-safe application state wrapper
pub struct AppState {
    shell: Arc<Shell>,
    back: BackDispatcher,
    back_registration: Mutex<Option<BackRegistration>>,
    prober: Option<Prober>,
}

impl AppState {
    pub fn new(shell: Arc<Shell>) -> Self {
        let back = BackDispatcher::new();
        let registration = shell.attach_back_handler(&back);

        let config = shell.config();
        let probe = &config.probe;
        let prober = if probe.enabled {
            // Same user agent as the webview, so bot filters treat both alike
            let user_agent = config.webview.user_agent.as_deref();
            match Prober::new(Duration::from_secs(probe.timeout_secs), user_agent) {
                Ok(prober) => Some(prober),
                Err(e) => {
                    tracing::warn!(error = %e, "Probe client unavailable, HTTP errors will go unreported");
                    None
                }
            }
        } else {
            None
        };

        Self {
            shell,
            back,
            back_registration: Mutex::new(Some(registration)),
            prober,
        }
    }

    pub fn shell(&self) -> &Shell {
        &self.shell
    }

    pub fn prober(&self) -> Option<&Prober> {
        self.prober.as_ref()
    }

    /// Deliver a system back signal to the registered handlers.
    pub fn dispatch_back(&self) -> BackAction {
        self.back.dispatch()
    }

    /// Drop the session's back handler so no stale listener survives shutdown.
    pub fn teardown(&self) {
        if self.back_registration.lock().take().is_some() {
            tracing::info!("Session torn down");
        }
    }
}
