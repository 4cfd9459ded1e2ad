use campus_shared::models::{FeePost, FeePostUpdate, FeeReceipt, FeeReceiptInput};
use campus_shared::types::Page;
use reqwest::multipart::Form;
use reqwest::Method;

use super::{attachment_part, PageRequest};
use crate::client::{ApiClient, Expect};
use crate::error::ApiResult;

/// Optional narrowing of `GET /fees/posts`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeePostFilter {
    pub classroom_id: Option<String>,
    pub student_id: Option<String>,
}

impl ApiClient {
    /// `GET /fees/receipts?student_id=..&page=..&limit=..`
    pub async fn list_fee_receipts(
        &self,
        token: Option<&str>,
        student_id: &str,
        page: PageRequest,
    ) -> ApiResult<Page<FeeReceipt>> {
        let mut query = vec![("student_id", student_id.to_string())];
        page.push_query(&mut query);

        let request = self.authed(Method::GET, &["fees", "receipts"], token)?.query(&query);
        self.execute("list_fee_receipts", request, Expect::Success)
            .await
    }

    /// `POST /fees/receipts` as a multipart form, with the optional proof
    /// of payment in the `document` part.
    pub async fn create_fee_receipt(
        &self,
        token: Option<&str>,
        input: &FeeReceiptInput,
    ) -> ApiResult<FeeReceipt> {
        let mut form = Form::new()
            .text("student_id", input.student_id.clone())
            .text("amount", format!("{:.2}", input.amount));
        if let Some(ref fee_post_id) = input.fee_post_id {
            form = form.text("fee_post_id", fee_post_id.clone());
        }
        if let Some(ref method) = input.payment_method {
            form = form.text("payment_method", method.clone());
        }
        if let Some(ref transaction_id) = input.transaction_id {
            form = form.text("transaction_id", transaction_id.clone());
        }
        if let Some(ref document) = input.document {
            form = form.part("document", attachment_part(document));
        }

        let request = self
            .authed(Method::POST, &["fees", "receipts"], token)?
            .multipart(form);
        self.execute("create_fee_receipt", request, Expect::Success)
            .await
    }

    pub async fn list_fee_posts(
        &self,
        token: Option<&str>,
        filter: &FeePostFilter,
    ) -> ApiResult<Page<FeePost>> {
        let mut query = Vec::new();
        if let Some(ref classroom_id) = filter.classroom_id {
            query.push(("classroom_id", classroom_id.clone()));
        }
        if let Some(ref student_id) = filter.student_id {
            query.push(("student_id", student_id.clone()));
        }

        let request = self.authed(Method::GET, &["fees", "posts"], token)?.query(&query);
        self.execute("list_fee_posts", request, Expect::Success).await
    }

    pub async fn update_fee_post(
        &self,
        token: Option<&str>,
        id: &str,
        update: &FeePostUpdate,
    ) -> ApiResult<FeePost> {
        let request = self.authed(Method::PUT, &["fees", "posts", id], token)?.json(update);
        self.execute("update_fee_post", request, Expect::Success).await
    }
}
