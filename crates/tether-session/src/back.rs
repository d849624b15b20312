//! System back navigation
//!
//! `BackNavigationBridge` decides whether a back gesture steps through the
//! engine's history or falls through to the OS default (usually leaving the
//! app). `BackDispatcher` is the registration point the platform layer
//! drives; a handler stays registered for as long as its `BackRegistration`
//! lives.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use crate::engine::BrowsingEngine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackAction {
    /// Handled in-app; the OS default must not run.
    Consumed,
    /// Not handled; the OS applies its default action.
    PassThrough,
}

impl BackAction {
    pub fn is_consumed(&self) -> bool {
        matches!(self, BackAction::Consumed)
    }
}

pub struct BackNavigationBridge {
    engine: Arc<dyn BrowsingEngine>,
}

impl BackNavigationBridge {
    pub fn new(engine: Arc<dyn BrowsingEngine>) -> Self {
        Self { engine }
    }

    pub fn handle_back_request(&self, can_go_back: bool) -> BackAction {
        if !can_go_back {
            tracing::debug!("No engine history, passing back to OS");
            return BackAction::PassThrough;
        }

        if let Err(e) = self.engine.go_back() {
            tracing::warn!(error = %e, "Back navigation command failed");
        }
        BackAction::Consumed
    }
}

type BackHandler = Arc<dyn Fn() -> BackAction + Send + Sync>;
type HandlerList = RwLock<Vec<(u64, BackHandler)>>;

/// Registered back handlers, asked newest first.
#[derive(Default)]
pub struct BackDispatcher {
    handlers: Arc<HandlerList>,
    next_id: AtomicU64,
}

impl BackDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler. It is removed when the returned registration drops.
    #[must_use = "the handler is deregistered as soon as the registration is dropped"]
    pub fn register<F>(&self, handler: F) -> BackRegistration
    where
        F: Fn() -> BackAction + Send + Sync + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.handlers.write().push((id, Arc::new(handler)));
        tracing::debug!(handler_id = id, "Back handler registered");

        BackRegistration {
            id,
            handlers: Arc::downgrade(&self.handlers),
        }
    }

    /// Deliver a back signal. The first handler that consumes it wins.
    pub fn dispatch(&self) -> BackAction {
        // Snapshot so handlers can register or drop registrations while running
        let handlers: Vec<BackHandler> = self
            .handlers
            .read()
            .iter()
            .rev()
            .map(|(_, handler)| Arc::clone(handler))
            .collect();

        for handler in handlers {
            if handler().is_consumed() {
                return BackAction::Consumed;
            }
        }

        BackAction::PassThrough
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.read().len()
    }
}

/// Keeps a back handler registered. Dropping it deregisters the handler.
pub struct BackRegistration {
    id: u64,
    handlers: Weak<HandlerList>,
}

impl BackRegistration {
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl Drop for BackRegistration {
    fn drop(&mut self) {
        if let Some(handlers) = self.handlers.upgrade() {
            handlers.write().retain(|(id, _)| *id != self.id);
            tracing::debug!(handler_id = self.id, "Back handler deregistered");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{EngineCall, RecordingEngine};

    #[test]
    fn test_pass_through_without_history() {
        let engine = Arc::new(RecordingEngine::new());
        let bridge = BackNavigationBridge::new(engine.clone());

        assert_eq!(bridge.handle_back_request(false), BackAction::PassThrough);
        assert!(engine.calls().is_empty());
    }

    #[test]
    fn test_consumed_with_history() {
        let engine = Arc::new(RecordingEngine::new());
        let bridge = BackNavigationBridge::new(engine.clone());

        assert_eq!(bridge.handle_back_request(true), BackAction::Consumed);
        assert_eq!(engine.calls(), vec![EngineCall::GoBack]);
    }

    #[test]
    fn test_dispatch_newest_first() {
        let dispatcher = BackDispatcher::new();
        let _outer = dispatcher.register(|| BackAction::Consumed);
        let _inner = dispatcher.register(|| BackAction::PassThrough);

        assert_eq!(dispatcher.dispatch(), BackAction::Consumed);
        assert_eq!(dispatcher.handler_count(), 2);
    }

    #[test]
    fn test_drop_deregisters() {
        let dispatcher = BackDispatcher::new();
        let registration = dispatcher.register(|| BackAction::Consumed);
        assert_eq!(dispatcher.dispatch(), BackAction::Consumed);

        drop(registration);
        assert_eq!(dispatcher.handler_count(), 0);
        assert_eq!(dispatcher.dispatch(), BackAction::PassThrough);
    }

    #[test]
    fn test_registration_outliving_dispatcher() {
        let dispatcher = BackDispatcher::new();
        let registration = dispatcher.register(|| BackAction::Consumed);
        drop(dispatcher);
        drop(registration);
    }

    #[test]
    fn test_bridge_behind_dispatcher() {
        let engine = Arc::new(RecordingEngine::new());
        let bridge = BackNavigationBridge::new(engine.clone());
        let can_go_back = Arc::new(std::sync::atomic::AtomicBool::new(false));

        let dispatcher = BackDispatcher::new();
        let flag = Arc::clone(&can_go_back);
        let _registration =
            dispatcher.register(move || bridge.handle_back_request(flag.load(Ordering::SeqCst)));

        assert_eq!(dispatcher.dispatch(), BackAction::PassThrough);
        can_go_back.store(true, Ordering::SeqCst);
        assert_eq!(dispatcher.dispatch(), BackAction::Consumed);
        assert_eq!(engine.calls(), vec![EngineCall::GoBack]);
    }
}
