//! Tether Session Lifecycle
//!
//! Mediates between the embedded engine's raw event stream and the
//! user-visible session state:
//!
//! ```text
//! engine events ──► LifecycleReducer ──► SessionState ──► presentation
//!      ▲                    ▲
//!      │                    │ synthetic events
//!      └── RetryController / BackNavigationBridge ◄── user actions
//! ```
//!
//! The reducer is the only writer of `SessionState`.

mod back;
mod classify;
mod engine;
mod error;
mod reducer;
mod retry;
mod state;
#[cfg(test)]
pub(crate) mod test_utils;

pub use back::{BackAction, BackDispatcher, BackNavigationBridge, BackRegistration};
pub use classify::classify;
pub use engine::BrowsingEngine;
pub use error::EngineError;
pub use reducer::{reduce, LifecycleReducer, SessionEvent};
pub use retry::RetryController;
pub use state::{ErrorCategory, SessionState};

pub type Result<T> = std::result::Result<T, EngineError>;
