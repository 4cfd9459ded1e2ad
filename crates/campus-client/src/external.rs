//! Seams for the platform services the API layer hands work to.
//!
//! Payment checkout, push registration, third-party sign-in and opening
//! files all live outside this crate. Each is a trait so a shell (mobile
//! bridge, CLI, test) can plug in its own implementation. The only concrete
//! implementation here is [`HttpFileDownloader`], which fetches an
//! attachment URL to local disk.

use std::future::Future;
use std::path::{Path, PathBuf};

use campus_shared::constants::DEFAULT_CURRENCY;
use campus_shared::models::{FeePost, FeeReceiptInput};
use futures::StreamExt;
use percent_encoding::percent_decode_str;
use reqwest::Url;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::client::ApiClient;

// ---------------------------------------------------------------------------
// Payments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRequest {
    pub amount: f64,
    pub currency: String,
    pub description: String,
    pub student_id: String,
    pub fee_post_id: Option<String>,
}

impl PaymentRequest {
    /// Checkout for the full amount of one fee post.
    pub fn for_fee_post(post: &FeePost, student_id: &str) -> Self {
        Self {
            amount: post.amount,
            currency: DEFAULT_CURRENCY.to_string(),
            description: post.title.clone(),
            student_id: student_id.to_string(),
            fee_post_id: Some(post.id.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    Completed { transaction_id: String },
    Cancelled,
    Failed { message: String },
}

impl PaymentOutcome {
    /// Receipt body to record a completed payment; `None` for anything else.
    pub fn into_receipt(self, request: &PaymentRequest, method: &str) -> Option<FeeReceiptInput> {
        match self {
            PaymentOutcome::Completed { transaction_id } => Some(FeeReceiptInput {
                student_id: request.student_id.clone(),
                fee_post_id: request.fee_post_id.clone(),
                amount: request.amount,
                payment_method: Some(method.to_string()),
                transaction_id: Some(transaction_id),
                document: None,
            }),
            PaymentOutcome::Cancelled | PaymentOutcome::Failed { .. } => None,
        }
    }
}

pub trait PaymentCheckout: Send + Sync {
    fn checkout(&self, request: &PaymentRequest) -> impl Future<Output = PaymentOutcome> + Send;
}

// ---------------------------------------------------------------------------
// Push notifications, sign-in providers, file viewers
// ---------------------------------------------------------------------------

pub trait PushNotifications: Send + Sync {
    /// Ask the platform for a device token. `None` when permission is denied.
    fn device_token(&self) -> impl Future<Output = Option<String>> + Send;
    fn subscribe(&self, topic: &str) -> impl Future<Output = Result<(), String>> + Send;
    fn unsubscribe(&self, topic: &str) -> impl Future<Output = Result<(), String>> + Send;
}

/// Third-party identity provider. Each call returns the provider's session
/// id, which `activate` then makes current.
pub trait AuthProvider: Send + Sync {
    fn sign_in(&self, identifier: &str, secret: &str)
        -> impl Future<Output = Result<String, String>> + Send;
    fn sign_up(&self, identifier: &str, secret: &str)
        -> impl Future<Output = Result<String, String>> + Send;
    fn activate(&self, session_id: &str) -> impl Future<Output = Result<(), String>> + Send;
}

/// Turns a remote file URL into a local path a viewer can open.
pub trait FileOpener: Send + Sync {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<PathBuf, DownloadError>> + Send;
}

// ---------------------------------------------------------------------------
// Downloads
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("Download failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Download failed with status {0}")]
    Status(u16),

    #[error("Could not write file: {0}")]
    Io(#[from] std::io::Error),
}

/// Streams remote attachments into `target_dir`.
#[derive(Debug, Clone)]
pub struct HttpFileDownloader {
    http: reqwest::Client,
    target_dir: PathBuf,
}

impl HttpFileDownloader {
    /// Share `api`'s connection pool. Downloads carry no bearer token.
    pub fn new(api: &ApiClient, target_dir: impl Into<PathBuf>) -> Self {
        Self {
            http: api.http().clone(),
            target_dir: target_dir.into(),
        }
    }

    /// Download `url` and return the path written.
    ///
    /// The body is streamed into a hidden `.part` file next to the target
    /// and renamed into place only once it is complete. On failure the
    /// partial file is removed and any earlier file at the target is left
    /// as it was.
    pub async fn download(&self, url: &str) -> Result<PathBuf, DownloadError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::Status(status.as_u16()));
        }

        tokio::fs::create_dir_all(&self.target_dir).await?;
        let name = file_name_from_url(url);
        let path = self.target_dir.join(&name);
        let partial = self.target_dir.join(format!(".{name}.part"));

        let result = match stream_to_file(response, &partial).await {
            Ok(written) => tokio::fs::rename(&partial, &path)
                .await
                .map(|()| written)
                .map_err(DownloadError::from),
            Err(e) => Err(e),
        };

        match result {
            Ok(written) => {
                info!(path = %path.display(), bytes = written, "download complete");
                Ok(path)
            }
            Err(e) => {
                warn!(url, error = %e, "download failed, discarding partial file");
                if let Err(cleanup) = tokio::fs::remove_file(&partial).await {
                    debug!(path = %partial.display(), error = %cleanup, "partial file not removed");
                }
                Err(e)
            }
        }
    }
}

async fn stream_to_file(response: reqwest::Response, path: &Path) -> Result<u64, DownloadError> {
    let mut file = tokio::fs::File::create(path).await?;
    let mut written: u64 = 0;
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk: bytes::Bytes = chunk?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;
    Ok(written)
}

impl FileOpener for HttpFileDownloader {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<PathBuf, DownloadError>> + Send {
        self.download(url)
    }
}

/// Last non-empty path segment, percent-decoded, or `download`.
fn file_name_from_url(url: &str) -> String {
    let name = Url::parse(url)
        .ok()
        .and_then(|parsed| {
            let last = parsed.path_segments()?.filter(|s| !s.is_empty()).last()?;
            Some(decode_segment(last))
        })
        .unwrap_or_else(|| "download".to_string());
    debug!(url, name = %name, "resolved download file name");
    name
}

// Keep the encoded form when decoding would yield a path separator or a
// relative component.
fn decode_segment(segment: &str) -> String {
    match percent_decode_str(segment).decode_utf8() {
        Ok(name) if !name.contains(['/', '\\']) && name != "." && name != ".." => {
            name.into_owned()
        }
        _ => segment.to_string(),
    }
}
