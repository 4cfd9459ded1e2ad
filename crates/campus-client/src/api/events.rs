use campus_shared::models::{Event, EventInput};
use campus_shared::types::Page;
use reqwest::Method;

use crate::client::{ApiClient, Expect};
use crate::error::ApiResult;

impl ApiClient {
    pub async fn list_events(&self, token: Option<&str>) -> ApiResult<Page<Event>> {
        let request = self.authed(Method::GET, &["events"], token)?;
        self.execute("list_events", request, Expect::Success).await
    }

    pub async fn create_event(&self, token: Option<&str>, input: &EventInput) -> ApiResult<Event> {
        let request = self.authed(Method::POST, &["events"], token)?.json(input);
        self.execute("create_event", request, Expect::Success).await
    }
}
