use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use uuid::Uuid;

use crate::error::{AdapterError, Result};
use crate::request::RequestData;

/// Everything known about a failed unit of work.
#[derive(Debug)]
pub struct FailureReport {
    pub request_id: Uuid,
    pub command: String,
    /// Source location the work was started from.
    pub origin: &'static str,
    pub error: AdapterError,
}

impl FailureReport {
    /// Message of the innermost error in the source chain.
    pub fn root_cause(&self) -> String {
        let mut cause: &(dyn std::error::Error + 'static) = &self.error;
        while let Some(next) = cause.source() {
            cause = next;
        }
        cause.to_string()
    }
}

/// Receives failure details that are kept out of the response.
pub trait ErrorReporter: Send + Sync {
    fn report(&self, failure: FailureReport);
}

/// Writes failure reports to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl ErrorReporter for LogReporter {
    fn report(&self, failure: FailureReport) {
        log::error!(
            "[{}] request {} failed with {} error in {}: {} (root cause: {})",
            failure.command,
            failure.request_id,
            failure.error.class().as_str(),
            failure.origin,
            failure.error,
            failure.root_cause()
        );
    }
}

/// Runs a unit of work so that no error or panic inside it escapes.
#[derive(Clone)]
pub struct ErrorIsolationBoundary {
    reporter: Arc<dyn ErrorReporter>,
}

impl ErrorIsolationBoundary {
    pub fn new(reporter: Arc<dyn ErrorReporter>) -> Self {
        Self { reporter }
    }

    /// Returns the work's value, or reports the failure and returns `None`.
    pub fn isolate<T, F>(&self, request: &RequestData, origin: &'static str, work: F) -> Option<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let error = match panic::catch_unwind(AssertUnwindSafe(work)) {
            Ok(Ok(value)) => return Some(value),
            Ok(Err(error)) => error,
            Err(payload) => AdapterError::Panicked(panic_message(payload.as_ref())),
        };

        self.reporter.report(FailureReport {
            request_id: request.request_id,
            command: request.command.clone(),
            origin,
            error,
        });
        None
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
