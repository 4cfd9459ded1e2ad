use campus_shared::models::{Classroom, ClassroomInput};
use campus_shared::types::Page;
use reqwest::Method;
use serde_json::Value;

use super::PageRequest;
use crate::client::{ApiClient, Expect};
use crate::error::ApiResult;

impl ApiClient {
    pub async fn list_classrooms(
        &self,
        token: Option<&str>,
        page: PageRequest,
    ) -> ApiResult<Page<Classroom>> {
        let mut query = Vec::new();
        page.push_query(&mut query);
        let request = self.authed(Method::GET, &["classrooms"], token)?.query(&query);
        self.execute("list_classrooms", request, Expect::Success).await
    }

    pub async fn get_classroom(&self, token: Option<&str>, id: &str) -> ApiResult<Classroom> {
        let request = self.authed(Method::GET, &["classrooms", id], token)?;
        self.execute("get_classroom", request, Expect::Success).await
    }

    pub async fn create_classroom(
        &self,
        token: Option<&str>,
        input: &ClassroomInput,
    ) -> ApiResult<Classroom> {
        let request = self.authed(Method::POST, &["classrooms"], token)?.json(input);
        self.execute("create_classroom", request, Expect::Success).await
    }

    pub async fn update_classroom(
        &self,
        token: Option<&str>,
        id: &str,
        input: &ClassroomInput,
    ) -> ApiResult<Classroom> {
        let request = self.authed(Method::PUT, &["classrooms", id], token)?.json(input);
        self.execute("update_classroom", request, Expect::Success).await
    }

    pub async fn delete_classroom(&self, token: Option<&str>, id: &str) -> ApiResult<Value> {
        let request = self.authed(Method::DELETE, &["classrooms", id], token)?;
        self.execute("delete_classroom", request, Expect::Success).await
    }
}
