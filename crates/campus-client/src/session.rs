//! Signed-in state shared by every screen.
//!
//! [`AppSession`] keeps an in-memory copy of the persisted [`Session`] so
//! that reading the token for each API call does not touch the database.
//! Every mutation writes through to the [`SessionStore`] first and only then
//! updates the cached copy.

use campus_shared::models::{Credentials, UserProfile};
use campus_shared::types::Role;
use campus_store::{Session, SessionStore, StoreError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::client::ApiClient;
use crate::error::ApiError;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session store error: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

pub struct AppSession {
    store: SessionStore,
    state: RwLock<Session>,
}

impl AppSession {
    /// Load whatever the store holds. Corrupt fields come back absent.
    pub async fn init(store: SessionStore) -> Result<Self, SessionError> {
        let session = store.load().await?;
        info!(logged_in = session.is_logged_in(), "session restored");
        Ok(Self {
            store,
            state: RwLock::new(session),
        })
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub async fn snapshot(&self) -> Session {
        self.state.read().await.clone()
    }

    /// The bearer token to pass to [`ApiClient`] calls.
    pub async fn token(&self) -> Option<String> {
        self.state.read().await.auth_token.clone()
    }

    pub async fn profile(&self) -> Option<UserProfile> {
        self.state.read().await.user_info.clone()
    }

    pub async fn is_logged_in(&self) -> bool {
        self.state.read().await.is_logged_in()
    }

    /// Sign in and persist the token and profile.
    ///
    /// The profile comes from the login body when the server embeds it,
    /// otherwise from `GET /users/me`. Once the token is stored the call
    /// succeeds: if the profile cannot be fetched or written, the session is
    /// signed in without a cached profile and the failure is logged.
    /// An `Err` therefore always means nothing was persisted.
    pub async fn login(
        &self,
        api: &ApiClient,
        credentials: &Credentials,
    ) -> Result<Session, SessionError> {
        let response = api.login(credentials).await?;
        self.store.set_token(&response.access_token).await?;
        self.state.write().await.auth_token = Some(response.access_token.clone());

        let profile = match response.user {
            Some(profile) => Some(profile),
            None => match api.fetch_current_user(Some(&response.access_token)).await {
                Ok(profile) => Some(profile),
                Err(e) => {
                    warn!(status = ?e.status, error = %e, "could not fetch profile after login");
                    None
                }
            },
        };

        if let Some(mut profile) = profile {
            if profile.role == Role::Unknown {
                profile.role = response.role;
            }
            match self.store.set_user_info(&profile).await {
                Ok(_) => self.state.write().await.user_info = Some(profile),
                Err(e) => warn!(error = %e, "could not cache profile after login"),
            }
        }

        Ok(self.snapshot().await)
    }

    /// Re-fetch `/users/me` and replace the cached profile.
    pub async fn refresh_profile(&self, api: &ApiClient) -> Result<UserProfile, SessionError> {
        let token = self.token().await;
        let profile = api.fetch_current_user(token.as_deref()).await?;
        self.store.set_user_info(&profile).await?;
        self.state.write().await.user_info = Some(profile.clone());
        Ok(profile)
    }

    /// Cache the classroom context (a [`campus_shared::models::Classroom`] or any other JSON
    /// shape). A blank value leaves the current one.
    pub async fn set_class_info<T: Serialize>(&self, info: &T) -> Result<(), SessionError> {
        let value = serde_json::to_value(info).map_err(StoreError::from)?;
        if self.store.set_class_info(&value).await? {
            self.state.write().await.class_info = Some(value);
        }
        Ok(())
    }

    /// The cached classroom context decoded as `T`; `None` when absent or
    /// of another shape.
    pub async fn class_info<T: DeserializeOwned>(&self) -> Option<T> {
        let value = self.state.read().await.class_info.clone()?;
        serde_json::from_value(value).ok()
    }

    /// Record the push device token. An empty token leaves the current one.
    pub async fn set_notification_token(&self, token: &str) -> Result<(), SessionError> {
        if self.store.set_notification_token(token).await? {
            self.state.write().await.notification_token = Some(token.to_string());
        }
        Ok(())
    }

    /// Forget everything, on disk and in memory.
    pub async fn logout(&self) -> Result<(), SessionError> {
        self.store.clear_all().await?;
        *self.state.write().await = Session::default();
        info!("logged out");
        Ok(())
    }
}
