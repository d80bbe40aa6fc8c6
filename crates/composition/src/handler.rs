//! Capabilities the orchestrator invokes around a fetch.

use std::fmt;
use std::sync::Arc;

use http::{Response, StatusCode};

/// What went wrong with one fetch, as reported to an [`ErrHandler`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchFailure {
    pub url: String,
    /// Status returned by the upstream, if it answered at all.
    pub status: Option<u16>,
    pub message: String,
}

pub trait ErrHandler: Send + Sync {
    /// Response sent to the client in place of the failed page.
    fn handle(&self, failure: &FetchFailure) -> Response<Vec<u8>>;
}

/// Logs the failure and answers with the upstream error status, or
/// `502 Bad Gateway` when there is none.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DefaultErrHandler;

impl ErrHandler for DefaultErrHandler {
    fn handle(&self, failure: &FetchFailure) -> Response<Vec<u8>> {
        log::error!(
            target: "uic.fetch",
            "error fetching {} (status {:?}): {}",
            failure.url,
            failure.status,
            failure.message
        );
        let status = failure
            .status
            .and_then(|code| StatusCode::from_u16(code).ok())
            .filter(|status| status.as_u16() >= 400)
            .unwrap_or(StatusCode::BAD_GATEWAY);
        let mut response = Response::new(format!("Error: {}", failure.message).into_bytes());
        *response.status_mut() = status;
        response
    }
}

/// Error handler slot of a fetch definition.
#[derive(Clone, Default)]
pub enum ErrHandlerRef {
    #[default]
    Default,
    Custom(Arc<dyn ErrHandler>),
}

impl ErrHandlerRef {
    pub fn handle(&self, failure: &FetchFailure) -> Response<Vec<u8>> {
        match self {
            ErrHandlerRef::Default => DefaultErrHandler.handle(failure),
            ErrHandlerRef::Custom(handler) => handler.handle(failure),
        }
    }
}

impl PartialEq for ErrHandlerRef {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ErrHandlerRef::Default, ErrHandlerRef::Default) => true,
            (ErrHandlerRef::Custom(a), ErrHandlerRef::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for ErrHandlerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrHandlerRef::Default => f.write_str("Default"),
            ErrHandlerRef::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("response processing failed: {0}")]
    Failed(String),

    #[error("response body is not valid UTF-8")]
    InvalidBody(#[from] std::string::FromUtf8Error),
}

/// Transforms a successful response before it is stored.
pub trait ResponseProcessor: Send + Sync {
    fn process(&self, response: &mut Response<Vec<u8>>, url: &str) -> Result<(), ProcessError>;
}
