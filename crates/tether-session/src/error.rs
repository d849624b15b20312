//! Engine command error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Engine unavailable: {0}")]
    Unavailable(String),

    #[error("Engine does not support {0}")]
    Unsupported(&'static str),

    #[error("Engine command failed: {0}")]
    Command(String),
}
