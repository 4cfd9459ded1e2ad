use campus_shared::models::{Teacher, TeacherInput};
use campus_shared::types::Page;
use reqwest::Method;
use serde_json::Value;

use super::PageRequest;
use crate::client::{ApiClient, Expect};
use crate::error::ApiResult;

impl ApiClient {
    pub async fn list_teachers(
        &self,
        token: Option<&str>,
        page: PageRequest,
    ) -> ApiResult<Page<Teacher>> {
        let mut query = Vec::new();
        page.push_query(&mut query);
        let request = self.authed(Method::GET, &["teachers"], token)?.query(&query);
        self.execute("list_teachers", request, Expect::Success).await
    }

    pub async fn get_teacher(&self, token: Option<&str>, id: &str) -> ApiResult<Teacher> {
        let request = self.authed(Method::GET, &["teachers", id], token)?;
        self.execute("get_teacher", request, Expect::Success).await
    }

    pub async fn create_teacher(
        &self,
        token: Option<&str>,
        input: &TeacherInput,
    ) -> ApiResult<Teacher> {
        let request = self.authed(Method::POST, &["teachers"], token)?.json(input);
        self.execute("create_teacher", request, Expect::Success).await
    }

    pub async fn update_teacher(
        &self,
        token: Option<&str>,
        id: &str,
        input: &TeacherInput,
    ) -> ApiResult<Teacher> {
        let request = self.authed(Method::PUT, &["teachers", id], token)?.json(input);
        self.execute("update_teacher", request, Expect::Success).await
    }

    pub async fn delete_teacher(&self, token: Option<&str>, id: &str) -> ApiResult<Value> {
        let request = self.authed(Method::DELETE, &["teachers", id], token)?;
        self.execute("delete_teacher", request, Expect::Success).await
    }
}
