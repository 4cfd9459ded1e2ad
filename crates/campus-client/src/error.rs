use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

pub const MISSING_TOKEN_MESSAGE: &str = "Authentication token is missing";
pub const TRANSPORT_MESSAGE: &str = "Network error, please check your connection";
pub const MALFORMED_MESSAGE: &str = "Unexpected response from server";

/// Which of the four failure classes an [`ApiError`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A required bearer token was not supplied. No request was sent.
    MissingToken,
    /// The request never produced an HTTP response (DNS, refused, reset,
    /// timeout).
    Transport,
    /// The server answered with a status outside the accepted range.
    Http,
    /// The server answered with a success status but the body did not
    /// decode into the expected record.
    Malformed,
}

/// Failure outcome of one API call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ErrorKind,
    pub status: Option<u16>,
    pub message: String,
}

/// Why an [`crate::ApiClient`] could not be constructed.
#[derive(Error, Debug)]
pub enum ClientBuildError {
    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Could not build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// Outcome of one API call: `Ok(payload)` or `Err(ApiError)`.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// The `{status, message}` pair handed to error callbacks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorInfo {
    pub status: Option<u16>,
    pub message: String,
}

impl ApiError {
    pub fn missing_token() -> Self {
        Self {
            kind: ErrorKind::MissingToken,
            status: None,
            message: MISSING_TOKEN_MESSAGE.to_string(),
        }
    }

    pub fn transport(err: &reqwest::Error) -> Self {
        tracing::debug!(error = %err, timeout = err.is_timeout(), "transport error");
        Self {
            kind: ErrorKind::Transport,
            status: None,
            message: TRANSPORT_MESSAGE.to_string(),
        }
    }

    pub fn malformed(status: u16, err: &serde_json::Error) -> Self {
        tracing::debug!(status, error = %err, "response body did not decode");
        Self {
            kind: ErrorKind::Malformed,
            status: Some(status),
            message: MALFORMED_MESSAGE.to_string(),
        }
    }

    /// Build the failure for a non-success response from its raw body.
    ///
    /// The message is the server's `detail` when it has one (a plain string,
    /// or the `msg` of each entry of a validation-error list), then a
    /// top-level `message` / `error` string, then a generic fallback.
    pub fn http(status: u16, body: &[u8]) -> Self {
        let message = serde_json::from_slice::<Value>(body)
            .ok()
            .and_then(|value| server_message(&value))
            .unwrap_or_else(|| format!("Request failed with status {status}"));

        Self {
            kind: ErrorKind::Http,
            status: Some(status),
            message,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == ErrorKind::MissingToken || self.status == Some(401)
    }

    pub fn info(&self) -> ErrorInfo {
        ErrorInfo {
            status: self.status,
            message: self.message.clone(),
        }
    }
}

impl From<ApiError> for ErrorInfo {
    fn from(err: ApiError) -> Self {
        ErrorInfo {
            status: err.status,
            message: err.message,
        }
    }
}

fn server_message(body: &Value) -> Option<String> {
    if let Some(detail) = body.get("detail") {
        match detail {
            Value::String(s) if !s.trim().is_empty() => return Some(s.clone()),
            Value::Array(items) => {
                let joined = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(Value::as_str))
                    .collect::<Vec<_>>()
                    .join("; ");
                if !joined.is_empty() {
                    return Some(joined);
                }
            }
            Value::Object(_) => {
                if let Some(inner) = server_message(detail) {
                    return Some(inner);
                }
            }
            _ => {}
        }
    }

    ["message", "error"]
        .iter()
        .filter_map(|field| body.get(*field).and_then(Value::as_str))
        .find(|s| !s.trim().is_empty())
        .map(str::to_string)
}
