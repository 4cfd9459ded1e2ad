//! Per-resource REST calls.
//!
//! Each sub-module adds one `impl ApiClient` block for a resource. Every
//! function performs exactly one round trip (or none, when the bearer token
//! is missing) and returns an [`ApiResult`](crate::ApiResult). None of them
//! calls another, and none of them touches the session store.

pub mod attendance;
pub mod auth;
pub mod classrooms;
pub mod diary;
pub mod events;
pub mod fees;
pub mod gallery;
pub mod notifications;
pub mod students;
pub mod teachers;

use campus_shared::constants::DEFAULT_PAGE_LIMIT;
use campus_shared::models::Attachment;
use reqwest::multipart::Part;

/// `page` / `limit` query pair of list endpoints. Pages start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    pub(crate) fn push_query(&self, query: &mut Vec<(&'static str, String)>) {
        query.push(("page", self.page.to_string()));
        query.push(("limit", self.limit.to_string()));
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_LIMIT)
    }
}

/// Multipart part for a picked file. The boundary and the form's own
/// content type are left to reqwest.
pub(crate) fn attachment_part(attachment: &Attachment) -> Part {
    let plain = || Part::bytes(attachment.bytes.clone()).file_name(attachment.file_name.clone());

    match attachment.mime_type.as_deref() {
        Some(mime) => plain().mime_str(mime).unwrap_or_else(|e| {
            tracing::warn!(mime, error = %e, "ignoring invalid attachment mime type");
            plain()
        }),
        None => plain(),
    }
}
