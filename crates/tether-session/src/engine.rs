//! Embedded browsing engine capability
//!
//! The narrow set of commands the session issues to whatever engine renders
//! the destination. Completion of `load`/`reload` arrives later as engine
//! events, never as the return value.

use crate::error::EngineError;
use crate::Result;

pub trait BrowsingEngine: Send + Sync {
    /// Navigate to `uri`.
    fn load(&self, uri: &str) -> Result<()>;

    /// Reload the current page.
    fn reload(&self) -> Result<()>;

    /// Step back one history entry.
    fn go_back(&self) -> Result<()>;

    /// Whether `clear_cache` is available on this engine.
    fn supports_cache_clearing(&self) -> bool {
        false
    }

    /// Purge the engine's cache.
    fn clear_cache(&self) -> Result<()> {
        Err(EngineError::Unsupported("clear_cache"))
    }
}
