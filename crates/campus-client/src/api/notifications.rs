use campus_shared::models::Notification;
use campus_shared::types::Page;
use reqwest::Method;

use crate::client::{ApiClient, Expect};
use crate::error::ApiResult;

impl ApiClient {
    /// `GET /notifications?type=..` (e.g. `fee`, `event`, `general`).
    pub async fn list_notifications_by_type(
        &self,
        token: Option<&str>,
        kind: &str,
    ) -> ApiResult<Page<Notification>> {
        let request = self
            .authed(Method::GET, &["notifications"], token)?
            .query(&[("type", kind)]);
        self.execute("list_notifications_by_type", request, Expect::Success)
            .await
    }

    /// `GET /notifications/recipient/{id}`
    pub async fn list_notifications_for_recipient(
        &self,
        token: Option<&str>,
        recipient_id: &str,
    ) -> ApiResult<Page<Notification>> {
        let request = self.authed(
            Method::GET,
            &["notifications", "recipient", recipient_id],
            token,
        )?;
        self.execute("list_notifications_for_recipient", request, Expect::Success)
            .await
    }
}
