//! Adapters from [`ApiResult`] to the older calling conventions.
//!
//! Screens written against the callback pair use [`dispatch`] /
//! [`with_callbacks`]; those expecting a `{success, data, message}` value
//! use [`ApiResponse`]. Both sit on top of the single result type.

use std::future::Future;

use serde::Serialize;

use crate::error::{ApiResult, ErrorInfo};

/// Invoke exactly one of `on_success` / `on_error`.
pub fn dispatch<T, S, E>(result: ApiResult<T>, on_success: S, on_error: E)
where
    S: FnOnce(T),
    E: FnOnce(ErrorInfo),
{
    match result {
        Ok(data) => on_success(data),
        Err(err) => on_error(err.into()),
    }
}

/// Await `call`, then [`dispatch`] its outcome.
///
/// A call that fails its token precondition resolves on the first poll, so
/// `on_error` runs before any I/O is attempted.
pub async fn with_callbacks<T, F, S, E>(call: F, on_success: S, on_error: E)
where
    F: Future<Output = ApiResult<T>>,
    S: FnOnce(T),
    E: FnOnce(ErrorInfo),
{
    dispatch(call.await, on_success, on_error)
}

/// Value-shaped outcome: `{success: true, data}` or
/// `{success: false, status, message}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> From<ApiResult<T>> for ApiResponse<T> {
    fn from(result: ApiResult<T>) -> Self {
        match result {
            Ok(data) => Self {
                success: true,
                data: Some(data),
                status: None,
                message: None,
            },
            Err(err) => Self {
                success: false,
                data: None,
                status: err.status,
                message: Some(err.message),
            },
        }
    }
}
