use campus_shared::models::{Credentials, LoginResponse, UserProfile};
use reqwest::Method;
use tracing::info;

use crate::client::{ApiClient, Expect};
use crate::error::{ApiError, ApiResult, ErrorKind, MALFORMED_MESSAGE};

impl ApiClient {
    /// `POST /auth/login`. The only call sent without a bearer token.
    ///
    /// Persisting the returned token is the caller's job; see
    /// [`AppSession::login`](crate::AppSession::login).
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<LoginResponse> {
        let request = self.public(Method::POST, &["auth", "login"])?.json(credentials);
        let response: LoginResponse = self.execute("login", request, Expect::Ok200).await?;

        if response.access_token.trim().is_empty() {
            return Err(ApiError {
                kind: ErrorKind::Malformed,
                status: Some(200),
                message: MALFORMED_MESSAGE.to_string(),
            });
        }

        info!(role = %response.role, "login accepted");
        Ok(response)
    }

    /// `GET /users/me`
    pub async fn fetch_current_user(&self, token: Option<&str>) -> ApiResult<UserProfile> {
        let request = self.authed(Method::GET, &["users", "me"], token)?;
        self.execute("fetch_current_user", request, Expect::Ok200)
            .await
    }
}
