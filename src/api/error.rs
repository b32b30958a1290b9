use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Failure of a single API call.
///
/// The client does not try to recover from any of these; the caller decides.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("could not reach the server: {0}")]
    Network(#[from] reqwest::Error),
    #[error("server responded with {status}: {message}")]
    Status { status: StatusCode, message: String },
    #[error("unexpected response from {endpoint}: {source}")]
    Deserialization {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Coarse classification of a [`RequestError`], for user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    /// 401 or 403: credential missing or rejected.
    Auth,
    /// Any other 4xx.
    Validation,
    Server,
    Deserialization,
}

impl RequestError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            RequestError::Status { status, .. } => Some(*status),
            RequestError::Network(err) => err.status(),
            RequestError::Deserialization { .. } => None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            RequestError::Network(_) => ErrorKind::Network,
            RequestError::Deserialization { .. } => ErrorKind::Deserialization,
            RequestError::Status { status, .. } => match *status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ErrorKind::Auth,
                status if status.is_client_error() => ErrorKind::Validation,
                _ => ErrorKind::Server,
            },
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(alias = "error")]
    message: String,
}

/// Picks the human-readable part of an error body: the `message` (or
/// `error`) field of a JSON body, otherwise the raw text, otherwise the
/// status reason.
pub(crate) fn server_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        return parsed.message;
    }
    let body = body.trim();
    if !body.is_empty() {
        return body.to_string();
    }
    status.canonical_reason().unwrap_or("request failed").to_string()
}
