//! Generation-counter cancellation for outcomes delivered to a view.
//!
//! A screen owns a [`ViewScope`]. Before starting a call it takes a
//! [`CallTicket`]; when the screen goes away (or wants to drop everything in
//! flight, e.g. on pull-to-refresh) it calls [`ViewScope::invalidate`].
//! Delivering through a ticket from an older generation is a no-op, so a
//! response that arrives after unmount can never touch discarded state.
//! The request itself is not aborted.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::callback::dispatch;
use crate::error::{ApiResult, ErrorInfo};

#[derive(Debug, Clone, Default)]
pub struct ViewScope {
    generation: Arc<AtomicU64>,
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ticket(&self) -> CallTicket {
        CallTicket {
            generation: Arc::clone(&self.generation),
            issued: self.generation.load(Ordering::Acquire),
        }
    }

    /// Make every outstanding ticket stale.
    pub fn invalidate(&self) {
        let previous = self.generation.fetch_add(1, Ordering::AcqRel);
        tracing::trace!(generation = previous + 1, "view scope invalidated");
    }

    /// Guard that invalidates the scope when dropped (tie it to the
    /// lifetime of the screen).
    pub fn guard(&self) -> ScopeGuard {
        ScopeGuard {
            scope: self.clone(),
        }
    }

    /// Take a ticket, await `call`, deliver through the ticket. Returns
    /// whether a callback ran.
    pub async fn run<T, F, S, E>(&self, call: F, on_success: S, on_error: E) -> bool
    where
        F: Future<Output = ApiResult<T>>,
        S: FnOnce(T),
        E: FnOnce(ErrorInfo),
    {
        let ticket = self.ticket();
        let result = call.await;
        ticket.deliver(result, on_success, on_error)
    }
}

#[derive(Debug)]
pub struct CallTicket {
    generation: Arc<AtomicU64>,
    issued: u64,
}

impl CallTicket {
    pub fn is_current(&self) -> bool {
        self.generation.load(Ordering::Acquire) == self.issued
    }

    /// Dispatch `result` if the ticket is still current. Returns `false`
    /// (and drops the result) otherwise.
    pub fn deliver<T, S, E>(self, result: ApiResult<T>, on_success: S, on_error: E) -> bool
    where
        S: FnOnce(T),
        E: FnOnce(ErrorInfo),
    {
        if !self.is_current() {
            tracing::debug!(issued = self.issued, "dropping outcome for stale view");
            return false;
        }
        dispatch(result, on_success, on_error);
        true
    }
}

#[derive(Debug)]
pub struct ScopeGuard {
    scope: ViewScope,
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        self.scope.invalidate();
    }
}
