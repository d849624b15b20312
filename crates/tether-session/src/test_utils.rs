//! Shared test utilities for the session crate.
//!
//! Provides a [`RecordingEngine`] that logs every command it receives and
//! can be told to fail or to lack cache clearing.

use parking_lot::Mutex;

use crate::engine::BrowsingEngine;
use crate::error::EngineError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    Load(String),
    Reload,
    GoBack,
    ClearCache,
}

#[derive(Default)]
pub struct RecordingEngine {
    pub calls: Mutex<Vec<EngineCall>>,
    pub cache_clearing: bool,
    pub fail_reload: bool,
    pub fail_clear_cache: bool,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cache_clearing() -> Self {
        Self {
            cache_clearing: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.lock().clone()
    }
}

impl BrowsingEngine for RecordingEngine {
    fn load(&self, uri: &str) -> Result<()> {
        self.calls.lock().push(EngineCall::Load(uri.to_string()));
        Ok(())
    }

    fn reload(&self) -> Result<()> {
        self.calls.lock().push(EngineCall::Reload);
        if self.fail_reload {
            return Err(EngineError::Unavailable("webview closed".to_string()));
        }
        Ok(())
    }

    fn go_back(&self) -> Result<()> {
        self.calls.lock().push(EngineCall::GoBack);
        Ok(())
    }

    fn supports_cache_clearing(&self) -> bool {
        self.cache_clearing
    }

    fn clear_cache(&self) -> Result<()> {
        if !self.cache_clearing {
            return Err(EngineError::Unsupported("clear_cache"));
        }
        self.calls.lock().push(EngineCall::ClearCache);
        if self.fail_clear_cache {
            return Err(EngineError::Command("purge failed".to_string()));
        }
        Ok(())
    }
}
