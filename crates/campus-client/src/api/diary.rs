use campus_shared::models::{DiaryEntry, DiaryEntryInput};
use campus_shared::types::Page;
use chrono::NaiveDate;
use reqwest::multipart::Form;
use reqwest::Method;
use serde_json::Value;

use super::attachment_part;
use crate::client::{ApiClient, Expect};
use crate::error::ApiResult;

impl ApiClient {
    /// `GET /diary?classroom_id=..[&date=YYYY-MM-DD]`
    pub async fn list_diary_entries(
        &self,
        token: Option<&str>,
        classroom_id: &str,
        date: Option<NaiveDate>,
    ) -> ApiResult<Page<DiaryEntry>> {
        let mut query = vec![("classroom_id", classroom_id.to_string())];
        if let Some(date) = date {
            query.push(("date", date.format("%Y-%m-%d").to_string()));
        }

        let request = self.authed(Method::GET, &["diary"], token)?.query(&query);
        self.execute("list_diary_entries", request, Expect::Success)
            .await
    }

    /// `POST /diary` as a multipart form; the optional file goes in the
    /// `attachment` part.
    pub async fn create_diary_entry(
        &self,
        token: Option<&str>,
        input: &DiaryEntryInput,
    ) -> ApiResult<DiaryEntry> {
        let mut form = Form::new()
            .text("classroom_id", input.classroom_id.clone())
            .text("title", input.title.clone())
            .text("content", input.content.clone())
            .text("date", input.date.format("%Y-%m-%d").to_string());
        if let Some(ref subject) = input.subject {
            form = form.text("subject", subject.clone());
        }
        if let Some(ref attachment) = input.attachment {
            form = form.part("attachment", attachment_part(attachment));
        }

        let request = self.authed(Method::POST, &["diary"], token)?.multipart(form);
        self.execute("create_diary_entry", request, Expect::Success)
            .await
    }

    pub async fn delete_diary_entry(&self, token: Option<&str>, id: &str) -> ApiResult<Value> {
        let request = self.authed(Method::DELETE, &["diary", id], token)?;
        self.execute("delete_diary_entry", request, Expect::Success)
            .await
    }
}
