//! Request plumbing shared by every resource function.
//!
//! A call moves `Idle -> Sent -> {Succeeded | Failed}` exactly once. There
//! are no retries and no cancellation at this layer; both terminal states
//! produce a value, never a panic.

use std::time::Instant;

use reqwest::{Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{normalize_base_url, ClientConfig};
use crate::error::{ApiError, ApiResult, ClientBuildError, ErrorKind};

/// Which statuses count as success for a given endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expect {
    /// Any 2xx.
    Success,
    /// Exactly 200 OK.
    Ok200,
}

impl Expect {
    pub fn accepts(self, status: StatusCode) -> bool {
        match self {
            Expect::Success => status.is_success(),
            Expect::Ok200 => status == StatusCode::OK,
        }
    }
}

/// Handle to the school-management REST API.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientBuildError> {
        let base_url = normalize_base_url(&config.api_url)
            .and_then(|normalized| Url::parse(&normalized).map_err(|e| e.to_string()))
            .map_err(ClientBuildError::InvalidBaseUrl)?;

        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self { http, base_url })
    }

    /// Client for `base_url` with every other setting at its default.
    pub fn with_base_url(base_url: &str) -> Result<Self, ClientBuildError> {
        Self::new(&ClientConfig {
            api_url: base_url.to_string(),
            ..ClientConfig::default()
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Base URL with `segments` appended, each one percent-encoded.
    fn url(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError {
                kind: ErrorKind::Transport,
                status: None,
                message: format!("Cannot build a request path on {}", self.base_url),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Request without credentials (login only).
    pub(crate) fn public(&self, method: Method, path: &[&str]) -> ApiResult<RequestBuilder> {
        Ok(self.http.request(method, self.url(path)?))
    }

    /// Request carrying `Authorization: Bearer <token>`.
    ///
    /// Fails with [`ErrorKind::MissingToken`] before anything is sent when
    /// the token is absent or blank.
    pub(crate) fn authed(
        &self,
        method: Method,
        path: &[&str],
        token: Option<&str>,
    ) -> ApiResult<RequestBuilder> {
        let token = require_token(token)?;
        Ok(self.http.request(method, self.url(path)?).bearer_auth(token))
    }

    /// Send `request` and translate the response into an outcome.
    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        op: &'static str,
        request: RequestBuilder,
        expect: Expect,
    ) -> ApiResult<T> {
        let started = Instant::now();
        debug!(op, "sending request");

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(op, error = %e, "request failed before a response");
                return Err(ApiError::transport(&e));
            }
        };

        let status = response.status();
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                warn!(op, status = status.as_u16(), error = %e, "response body interrupted");
                return Err(ApiError::transport(&e));
            }
        };

        if !expect.accepts(status) {
            let err = ApiError::http(status.as_u16(), &body);
            warn!(op, status = status.as_u16(), message = %err.message, "request rejected");
            return Err(err);
        }

        let value = decode(&body).map_err(|e| {
            warn!(op, status = status.as_u16(), "unexpected response body");
            ApiError::malformed(status.as_u16(), &e)
        })?;

        debug!(
            op,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "request succeeded"
        );
        Ok(value)
    }
}

pub(crate) fn require_token(token: Option<&str>) -> ApiResult<&str> {
    match token.map(str::trim) {
        Some(t) if !t.is_empty() => Ok(t),
        _ => Err(ApiError::missing_token()),
    }
}

// An empty body (204, bare 200) decodes as JSON null.
fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        serde_json::from_value(Value::Null)
    } else {
        serde_json::from_slice(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expect_rules() {
        assert!(Expect::Success.accepts(StatusCode::CREATED));
        assert!(Expect::Success.accepts(StatusCode::NO_CONTENT));
        assert!(!Expect::Success.accepts(StatusCode::FOUND));
        assert!(Expect::Ok200.accepts(StatusCode::OK));
        assert!(!Expect::Ok200.accepts(StatusCode::CREATED));
    }

    #[test]
    fn token_precondition() {
        assert_eq!(require_token(Some(" abc ")).unwrap(), "abc");
        assert_eq!(
            require_token(Some("   ")).unwrap_err().kind,
            ErrorKind::MissingToken
        );
        assert_eq!(require_token(None).unwrap_err().kind, ErrorKind::MissingToken);
    }

    #[test]
    fn empty_body_decodes_as_null() {
        let value: Value = decode(b"").unwrap();
        assert_eq!(value, Value::Null);
        assert!(decode::<Vec<u32>>(b"  ").is_err());
        assert_eq!(decode::<Vec<u32>>(b"[1]").unwrap(), vec![1]);
    }

    #[test]
    fn urls_join_cleanly() {
        let client = ApiClient::with_base_url("http://localhost:8000/api/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000/api");
        assert_eq!(
            client.url(&["students"]).unwrap().as_str(),
            "http://localhost:8000/api/students"
        );
        assert_eq!(
            client.url(&["students", "7"]).unwrap().as_str(),
            "http://localhost:8000/api/students/7"
        );

        let root = ApiClient::with_base_url("http://localhost:8000").unwrap();
        assert_eq!(
            root.url(&["events"]).unwrap().as_str(),
            "http://localhost:8000/events"
        );
    }

    #[test]
    fn segments_are_escaped() {
        let client = ApiClient::with_base_url("http://localhost:8000").unwrap();
        assert_eq!(
            client.url(&["students", "a/b c"]).unwrap().as_str(),
            "http://localhost:8000/students/a%2Fb%20c"
        );
        assert_eq!(
            client.url(&["students", "s-1"]).unwrap().path(),
            "/students/s-1"
        );
    }

    #[test]
    fn invalid_base_url_is_a_build_error() {
        assert!(matches!(
            ApiClient::with_base_url("not a url"),
            Err(ClientBuildError::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            ApiClient::with_base_url("ftp://files.school.test"),
            Err(ClientBuildError::InvalidBaseUrl(_))
        ));
    }
}
