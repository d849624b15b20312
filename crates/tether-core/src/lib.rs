//! Tether Core
//!
//! Coordination layer for the single-destination shell. Rust owns the
//! session state; the embedded engine only reports events and executes
//! commands.

mod config;
mod error;
mod message;
mod shell;

pub use config::{CacheMode, Config, ProbeSettings, StorageSettings, WebviewSettings};
pub use error::CoreError;
pub use message::{ErrorMessage, PULL_TO_REFRESH_HINT, RETRY_LABEL};
pub use shell::{LoadTicket, Shell};

// Re-export core components
pub use tether_navigation::{
    decide, Destination, ExternalOpener, GuardDecision, NavigationError, NavigationGuard,
    NavigationRequest, NoopOpener, OpenError,
};
pub use tether_session::{
    classify, BackAction, BackDispatcher, BackNavigationBridge, BackRegistration, BrowsingEngine,
    EngineError, ErrorCategory, LifecycleReducer, RetryController, SessionEvent, SessionState,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
