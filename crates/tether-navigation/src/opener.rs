//! OS handoff capability
//!
//! Delegated URIs are handed to the platform's default handler. The handoff
//! is best-effort: callers log a failure and move on, nothing propagates.

use thiserror::Error;

#[derive(Error, Debug)]
#[error("Failed to open {uri} externally: {reason}")]
pub struct OpenError {
    pub uri: String,
    pub reason: String,
}

impl OpenError {
    pub fn new(uri: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            reason: reason.into(),
        }
    }
}

/// Hands a URI to the OS default handler (browser, dialer, mail client).
///
/// Implementations must not block the caller: the navigation guard invokes
/// this synchronously from the engine's decision callback.
pub trait ExternalOpener: Send + Sync {
    fn open_externally(&self, uri: &str) -> Result<(), OpenError>;
}

/// Opener that drops every request. Used where no OS handoff exists.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopOpener;

impl ExternalOpener for NoopOpener {
    fn open_externally(&self, uri: &str) -> Result<(), OpenError> {
        tracing::debug!(uri = %uri, "No external opener configured, dropping handoff");
        Ok(())
    }
}
