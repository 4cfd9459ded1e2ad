use campus_shared::models::{Student, StudentInput};
use campus_shared::types::Page;
use reqwest::Method;
use serde_json::Value;

use super::PageRequest;
use crate::client::{ApiClient, Expect};
use crate::error::ApiResult;

/// Optional narrowing of `GET /students`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentFilter {
    pub classroom_id: Option<String>,
    pub search: Option<String>,
}

impl ApiClient {
    pub async fn list_students(
        &self,
        token: Option<&str>,
        page: PageRequest,
        filter: &StudentFilter,
    ) -> ApiResult<Page<Student>> {
        let mut query = Vec::new();
        page.push_query(&mut query);
        if let Some(ref classroom_id) = filter.classroom_id {
            query.push(("classroom_id", classroom_id.clone()));
        }
        if let Some(search) = filter.search.as_deref().map(str::trim) {
            if !search.is_empty() {
                query.push(("search", search.to_string()));
            }
        }

        let request = self.authed(Method::GET, &["students"], token)?.query(&query);
        self.execute("list_students", request, Expect::Success).await
    }

    pub async fn get_student(&self, token: Option<&str>, id: &str) -> ApiResult<Student> {
        let request = self.authed(Method::GET, &["students", id], token)?;
        self.execute("get_student", request, Expect::Success).await
    }

    pub async fn create_student(
        &self,
        token: Option<&str>,
        input: &StudentInput,
    ) -> ApiResult<Student> {
        let request = self.authed(Method::POST, &["students"], token)?.json(input);
        self.execute("create_student", request, Expect::Success).await
    }

    pub async fn update_student(
        &self,
        token: Option<&str>,
        id: &str,
        input: &StudentInput,
    ) -> ApiResult<Student> {
        let request = self.authed(Method::PUT, &["students", id], token)?.json(input);
        self.execute("update_student", request, Expect::Success).await
    }

    /// Returns whatever the server echoes back (`null` for an empty body).
    pub async fn delete_student(&self, token: Option<&str>, id: &str) -> ApiResult<Value> {
        let request = self.authed(Method::DELETE, &["students", id], token)?;
        self.execute("delete_student", request, Expect::Success).await
    }
}
