//! Failure classification
//!
//! Maps the engine's free-text failure description to an `ErrorCategory`.
//! `Http` is never derived from text; status-level failures are assigned
//! directly by the reducer.

use crate::state::ErrorCategory;

/// Checked first. Any match means a connectivity problem.
const NETWORK_MARKERS: &[&str] = &["net::", "network", "internet"];

const TIMEOUT_MARKERS: &[&str] = &["timeout"];

/// Case-insensitive substring match in priority order: network, then timeout.
/// Missing or empty descriptions classify as `Unknown`.
pub fn classify(description: Option<&str>) -> ErrorCategory {
    let description = match description {
        Some(d) if !d.trim().is_empty() => d.to_lowercase(),
        _ => return ErrorCategory::Unknown,
    };

    if NETWORK_MARKERS.iter().any(|m| description.contains(m)) {
        ErrorCategory::Network
    } else if TIMEOUT_MARKERS.iter().any(|m| description.contains(m)) {
        ErrorCategory::Timeout
    } else {
        ErrorCategory::Unknown
    }
}
