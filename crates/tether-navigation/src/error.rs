//! Navigation error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NavigationError {
    #[error("Invalid destination: {0}")]
    InvalidDestination(String),

    #[error("Unsupported destination scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Destination has no host: {0}")]
    MissingHost(String),
}
