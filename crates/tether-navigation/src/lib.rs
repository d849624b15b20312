//! Tether Navigation Guard
//!
//! Keeps in-place navigation scoped to the configured destination:
//! 1. `tel:`, `mailto:`, `sms:` and any other non-web scheme → hand off to the OS
//! 2. Host differs from the destination host → hand off to the OS
//! 3. Unparseable URI → allow (the engine decides)
//! 4. Everything else → allow

mod destination;
mod error;
mod guard;
mod opener;

pub use destination::Destination;
pub use error::NavigationError;
pub use guard::{decide, GuardDecision, NavigationGuard, NavigationRequest};
pub use opener::{ExternalOpener, NoopOpener, OpenError};

pub type Result<T> = std::result::Result<T, NavigationError>;
