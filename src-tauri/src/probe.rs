//! Reachability probe
//!
//! The desktop webview reports neither HTTP status nor transport failures,
//! so each main-frame load inside the destination is shadowed by a cheap
//! request whose outcome is fed back as an engine event. Best-effort:
//! a successful probe reports nothing.
//!
//! The request carries no webview cookies, so 401 and 403 are treated as
//! reachable: a signed-in page can answer them to a bare client while the
//! webview renders it fine.

use reqwest::redirect::Policy;
use reqwest::StatusCode;
use std::error::Error as _;
use std::time::Duration;
use tether_core::{LoadTicket, SessionState, Shell};
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Reachable(u16),
    HttpError(u16),
    Failed(String),
}

impl ProbeOutcome {
    fn from_status(status: StatusCode) -> Self {
        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            ProbeOutcome::Reachable(status.as_u16())
        } else if status.is_client_error() || status.is_server_error() {
            ProbeOutcome::HttpError(status.as_u16())
        } else {
            ProbeOutcome::Reachable(status.as_u16())
        }
    }

    /// Feed the outcome into the session for the load behind `ticket`.
    /// Returns the new state if it changed anything.
    pub fn report(self, shell: &Shell, ticket: LoadTicket) -> Option<SessionState> {
        match self {
            ProbeOutcome::Reachable(_) => None,
            ProbeOutcome::HttpError(status) => shell.on_http_error_for(ticket, Some(status)),
            ProbeOutcome::Failed(description) => {
                shell.on_error_for(ticket, Some(&description), None)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FailureKind {
    Timeout,
    Connect,
    Request,
    Other,
}

/// Rewrite a client failure into the engine-style description the session
/// classifier understands.
fn failure_description(kind: FailureKind, message: &str) -> String {
    match kind {
        FailureKind::Timeout => format!("timeout: {}", message),
        FailureKind::Connect => {
            let lowered = message.to_lowercase();
            if lowered.contains("dns") || lowered.contains("resolve") {
                format!("net::ERR_NAME_NOT_RESOLVED: {}", message)
            } else if lowered.contains("tls")
                || lowered.contains("certificate")
                || lowered.contains("handshake")
            {
                format!("ssl error: {}", message)
            } else {
                format!("net::ERR_CONNECTION_FAILED: {}", message)
            }
        }
        FailureKind::Request => format!("net::ERR_FAILED: {}", message),
        FailureKind::Other => message.to_string(),
    }
}

fn describe(error: reqwest::Error) -> String {
    let kind = if error.is_timeout() {
        FailureKind::Timeout
    } else if error.is_connect() {
        FailureKind::Connect
    } else if error.is_request() {
        FailureKind::Request
    } else {
        FailureKind::Other
    };

    // The URL would leak page words like "internet" into classification
    let error = error.without_url();

    // reqwest keeps the useful detail (dns, tls) in the source chain
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }

    failure_description(kind, &message)
}

#[derive(Clone)]
pub struct Prober {
    client: reqwest::Client,
}

impl Prober {
    pub fn new(timeout: Duration, user_agent: Option<&str>) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder()
            .redirect(Policy::limited(5))
            .timeout(timeout);

        if let Some(user_agent) = user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder.build()?;
        Ok(Self { client })
    }

    /// HEAD first; servers that refuse HEAD get a one-byte ranged GET.
    pub async fn probe(&self, url: Url) -> ProbeOutcome {
        let head = self.client.head(url.clone()).send().await;

        let response = match head {
            Ok(resp) if resp.status() != StatusCode::METHOD_NOT_ALLOWED => Ok(resp),
            _ => {
                self.client
                    .get(url.clone())
                    .header(reqwest::header::RANGE, "bytes=0-0")
                    .send()
                    .await
            }
        };

        let outcome = match response {
            Ok(resp) => ProbeOutcome::from_status(resp.status()),
            Err(e) => ProbeOutcome::Failed(describe(e)),
        };

        tracing::debug!(url = %url, outcome = ?outcome, "Probe finished");
        outcome
    }
}
