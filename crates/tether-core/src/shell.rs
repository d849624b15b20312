//! Session coordinator
//!
//! `Shell` is the single entry point for everything that touches the
//! session: engine callbacks, user recovery actions and the back signal.
//! The reducer sits behind a lock so it stays the only writer no matter
//! which thread a callback arrives on. The lock is held per event, never
//! across an engine command.
//!
//! Every `LoadStarted` bumps a load generation. Results that arrive out of
//! band (the reachability check) carry the `LoadTicket` of the attempt they
//! belong to and are dropped once a newer attempt has started.

use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tether_navigation::{Destination, ExternalOpener, NavigationGuard, NavigationRequest};
use tether_session::{
    BackAction, BackDispatcher, BackNavigationBridge, BackRegistration, BrowsingEngine,
    LifecycleReducer, RetryController, SessionEvent, SessionState,
};

use crate::config::Config;
use crate::message::ErrorMessage;
use crate::Result;

/// Identifies one load attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

pub struct Shell {
    config: Config,
    guard: NavigationGuard,
    reducer: RwLock<LifecycleReducer>,
    /// Bumped under the reducer write lock on every `LoadStarted`
    load_generation: AtomicU64,
    retry: RetryController,
    back: BackNavigationBridge,
    engine: Arc<dyn BrowsingEngine>,
}

impl Shell {
    /// Build a session for `config`. Fails only if the destination is invalid.
    pub fn new(
        config: Config,
        engine: Arc<dyn BrowsingEngine>,
        opener: Arc<dyn ExternalOpener>,
    ) -> Result<Self> {
        config.validate()?;
        let destination = config.destination()?;

        tracing::info!(destination = %destination, "Session created");

        Ok(Self {
            config,
            guard: NavigationGuard::new(destination, opener),
            reducer: RwLock::new(LifecycleReducer::new()),
            load_generation: AtomicU64::new(0),
            retry: RetryController::new(Arc::clone(&engine)),
            back: BackNavigationBridge::new(Arc::clone(&engine)),
            engine,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn destination(&self) -> &Destination {
        self.guard.destination()
    }

    pub fn state(&self) -> SessionState {
        self.reducer.read().state()
    }

    /// Copy for the error view, if the session is showing an error.
    pub fn error_message(&self) -> Option<ErrorMessage> {
        self.state().error().map(ErrorMessage::for_category)
    }

    /// Issue the initial navigation. Engines that are created already
    /// pointing at the destination skip this.
    pub fn start(&self) -> SessionState {
        let destination = self.destination().as_str().to_string();
        match self.engine.load(&destination) {
            Ok(()) => self.state(),
            Err(e) => {
                tracing::warn!(destination = %destination, error = %e, "Initial load failed");
                self.apply(SessionEvent::load_failed(e.to_string()))
            }
        }
    }

    // === Engine events ===

    /// Decision callback for every navigation attempt. Returns whether the
    /// engine may load the request in place.
    pub fn on_navigation_attempt(&self, uri: &str, is_main_frame: bool) -> bool {
        self.guard
            .check(&NavigationRequest::new(uri, is_main_frame))
            .permits_load()
    }

    pub fn on_load_start(&self) -> SessionState {
        self.begin_load().0
    }

    /// Start a load attempt. The ticket tags results reported for this
    /// attempt after the fact.
    pub fn begin_load(&self) -> (SessionState, LoadTicket) {
        self.apply_tracked(SessionEvent::LoadStarted)
    }

    pub fn current_load(&self) -> LoadTicket {
        LoadTicket(self.load_generation.load(Ordering::Acquire))
    }

    pub fn on_load_end(&self) -> SessionState {
        self.apply(SessionEvent::LoadFinished)
    }

    pub fn on_error(&self, description: Option<&str>, code: Option<i32>) -> SessionState {
        self.apply(SessionEvent::LoadFailed {
            description: description.map(str::to_string),
            code,
        })
    }

    pub fn on_http_error(&self, status: Option<u16>) -> SessionState {
        self.apply(SessionEvent::HttpStatusFailed { status })
    }

    /// Failure for the attempt behind `ticket`. `None` if it was superseded.
    pub fn on_error_for(
        &self,
        ticket: LoadTicket,
        description: Option<&str>,
        code: Option<i32>,
    ) -> Option<SessionState> {
        self.apply_for(
            ticket,
            SessionEvent::LoadFailed {
                description: description.map(str::to_string),
                code,
            },
        )
    }

    /// Error status for the attempt behind `ticket`. `None` if it was superseded.
    pub fn on_http_error_for(&self, ticket: LoadTicket, status: Option<u16>) -> Option<SessionState> {
        self.apply_for(ticket, SessionEvent::HttpStatusFailed { status })
    }

    pub fn on_history_changed(&self, can_go_back: bool) -> SessionState {
        self.apply(SessionEvent::NavigationChanged { can_go_back })
    }

    // === User actions ===

    pub fn retry(&self) -> SessionState {
        self.retry.manual_retry(|event| self.apply(event))
    }

    pub fn pull_to_refresh(&self) -> SessionState {
        self.retry.pull_to_refresh(|event| self.apply(event))
    }

    pub fn clear_cache_and_reload(&self) -> SessionState {
        self.retry.clear_cache_and_reload(|event| self.apply(event))
    }

    /// Arbitrate a system back signal against the current history state.
    pub fn handle_back_request(&self) -> BackAction {
        let can_go_back = self.state().can_go_back;
        self.back.handle_back_request(can_go_back)
    }

    /// Register this session's back handling. Drop the registration on teardown.
    pub fn attach_back_handler(self: &Arc<Self>, dispatcher: &BackDispatcher) -> BackRegistration {
        let shell = Arc::downgrade(self);
        dispatcher.register(move || {
            shell
                .upgrade()
                .map_or(BackAction::PassThrough, |shell| shell.handle_back_request())
        })
    }

    fn apply(&self, event: SessionEvent) -> SessionState {
        self.apply_tracked(event).0
    }

    fn apply_tracked(&self, event: SessionEvent) -> (SessionState, LoadTicket) {
        let mut reducer = self.reducer.write();
        let generation = if matches!(event, SessionEvent::LoadStarted) {
            self.load_generation.fetch_add(1, Ordering::AcqRel) + 1
        } else {
            self.load_generation.load(Ordering::Acquire)
        };
        (reducer.apply(&event), LoadTicket(generation))
    }

    fn apply_for(&self, ticket: LoadTicket, event: SessionEvent) -> Option<SessionState> {
        let mut reducer = self.reducer.write();
        if self.load_generation.load(Ordering::Acquire) != ticket.0 {
            tracing::debug!(event = event.name(), ticket = ticket.0, "Dropping result for superseded load");
            return None;
        }
        Some(reducer.apply(&event))
    }
}
