//! Typed access to the school-management REST API.
//!
//! [`ApiClient`] exposes one async function per endpoint, each resolving to
//! an [`ApiResult`]. [`AppSession`] owns the persisted sign-in state and
//! supplies the bearer token those functions take. [`ViewScope`] and the
//! [`callback`] adapters shape outcomes for UI code.

pub mod api;
pub mod callback;
pub mod client;
pub mod config;
pub mod error;
pub mod external;
pub mod scope;
pub mod session;

pub use api::PageRequest;
pub use callback::{dispatch, with_callbacks, ApiResponse};
pub use client::{ApiClient, Expect};
pub use config::ClientConfig;
pub use error::{ApiError, ApiResult, ClientBuildError, ErrorInfo, ErrorKind};
pub use scope::{CallTicket, ViewScope};
pub use session::{AppSession, SessionError};
