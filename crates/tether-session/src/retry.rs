//! Recovery actions
//!
//! Each action pushes a fixed event sequence into the reducer and then
//! commands the engine. The reload's outcome arrives later as a regular
//! engine event. A reload command that fails outright is recorded as a
//! load failure so the session stays recoverable.
//!
//! Events go through an `apply` sink rather than a borrowed reducer, so the
//! owner never has to hold its reducer lock while the engine runs.

use std::sync::Arc;

use crate::engine::BrowsingEngine;
use crate::reducer::SessionEvent;
use crate::state::SessionState;

pub struct RetryController {
    engine: Arc<dyn BrowsingEngine>,
}

impl RetryController {
    pub fn new(engine: Arc<dyn BrowsingEngine>) -> Self {
        Self { engine }
    }

    /// Explicit retry: start a new attempt (clearing any error) and reload.
    pub fn manual_retry<F>(&self, mut apply: F) -> SessionState
    where
        F: FnMut(SessionEvent) -> SessionState,
    {
        tracing::info!("Manual retry");
        let started = apply(SessionEvent::LoadStarted);
        self.reload(started, apply)
    }

    /// Pull-to-refresh: mark refreshing without clearing the error, then reload.
    pub fn pull_to_refresh<F>(&self, mut apply: F) -> SessionState
    where
        F: FnMut(SessionEvent) -> SessionState,
    {
        tracing::info!("Pull to refresh");
        let requested = apply(SessionEvent::RefreshRequested);
        self.reload(requested, apply)
    }

    /// Purge the engine cache when supported, then retry. Engines without the
    /// capability get a plain retry.
    pub fn clear_cache_and_reload<F>(&self, apply: F) -> SessionState
    where
        F: FnMut(SessionEvent) -> SessionState,
    {
        if self.engine.supports_cache_clearing() {
            if let Err(e) = self.engine.clear_cache() {
                tracing::warn!(error = %e, "Cache purge failed, reloading anyway");
            }
        } else {
            tracing::debug!("Engine cannot clear cache, falling back to retry");
        }

        self.manual_retry(apply)
    }

    fn reload<F>(&self, current: SessionState, mut apply: F) -> SessionState
    where
        F: FnMut(SessionEvent) -> SessionState,
    {
        match self.engine.reload() {
            Ok(()) => current,
            Err(e) => {
                tracing::warn!(error = %e, "Reload command failed");
                apply(SessionEvent::load_failed(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reducer::LifecycleReducer;
    use crate::state::ErrorCategory;
    use crate::test_utils::{EngineCall, RecordingEngine};

    fn failed_reducer() -> LifecycleReducer {
        let mut reducer = LifecycleReducer::new();
        reducer.apply(&SessionEvent::load_failed("net::ERR_CONNECTION_REFUSED"));
        reducer
    }

    #[test]
    fn test_manual_retry() {
        let engine = Arc::new(RecordingEngine::new());
        let controller = RetryController::new(engine.clone());
        let mut reducer = failed_reducer();

        let state = controller.manual_retry(|e| reducer.apply(&e));
        assert!(state.loading);
        assert!(!state.has_error);
        assert_eq!(engine.calls(), vec![EngineCall::Reload]);
    }

    #[test]
    fn test_repeated_retry_is_stable() {
        let engine = Arc::new(RecordingEngine::new());
        let controller = RetryController::new(engine.clone());
        let mut reducer = failed_reducer();

        controller.manual_retry(|e| reducer.apply(&e));
        let state = controller.manual_retry(|e| reducer.apply(&e));
        assert!(state.loading);
        assert!(!state.has_error);
        assert_eq!(engine.calls(), vec![EngineCall::Reload, EngineCall::Reload]);
    }

    #[test]
    fn test_pull_to_refresh_keeps_error() {
        let engine = Arc::new(RecordingEngine::new());
        let controller = RetryController::new(engine.clone());
        let mut reducer = failed_reducer();

        let state = controller.pull_to_refresh(|e| reducer.apply(&e));
        assert!(state.refreshing);
        assert!(state.has_error);
        assert_eq!(engine.calls(), vec![EngineCall::Reload]);

        let state = reducer.apply(&SessionEvent::LoadFinished);
        assert!(!state.refreshing);
        assert!(!state.loading);
        assert!(state.has_error);
    }

    #[test]
    fn test_clear_cache_then_retry() {
        let engine = Arc::new(RecordingEngine::with_cache_clearing());
        let controller = RetryController::new(engine.clone());
        let mut reducer = failed_reducer();

        let state = controller.clear_cache_and_reload(|e| reducer.apply(&e));
        assert!(state.loading);
        assert!(!state.has_error);
        assert_eq!(engine.calls(), vec![EngineCall::ClearCache, EngineCall::Reload]);
    }

    #[test]
    fn test_clear_cache_degrades_to_retry() {
        let engine = Arc::new(RecordingEngine::new());
        let controller = RetryController::new(engine.clone());
        let mut reducer = failed_reducer();

        let state = controller.clear_cache_and_reload(|e| reducer.apply(&e));
        assert!(state.loading);
        assert_eq!(engine.calls(), vec![EngineCall::Reload]);
    }

    #[test]
    fn test_clear_cache_failure_still_reloads() {
        let engine = Arc::new(RecordingEngine {
            fail_clear_cache: true,
            ..RecordingEngine::with_cache_clearing()
        });
        let controller = RetryController::new(engine.clone());
        let mut reducer = failed_reducer();

        let state = controller.clear_cache_and_reload(|e| reducer.apply(&e));
        assert!(state.loading);
        assert_eq!(engine.calls(), vec![EngineCall::ClearCache, EngineCall::Reload]);
    }

    #[test]
    fn test_failed_reload_command_lands_in_state() {
        let engine = Arc::new(RecordingEngine {
            fail_reload: true,
            ..RecordingEngine::new()
        });
        let controller = RetryController::new(engine.clone());
        let mut reducer = LifecycleReducer::new();

        let state = controller.manual_retry(|e| reducer.apply(&e));
        assert!(!state.loading);
        assert!(state.has_error);
        assert_eq!(state.error_type, ErrorCategory::Unknown);
    }
}
