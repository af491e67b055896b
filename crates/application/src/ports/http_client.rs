//! HTTP client port
//!
//! The fetch capability the runner depends on. Implementations execute a
//! [`RequestSpec`] and either return the received [`Response`] or classify
//! why the request never completed.

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;
use vigil_domain::request::RequestSpec;
use vigil_domain::response::Response;

/// Errors raised when a request could not complete.
///
/// These cover the transport half of the failure taxonomy; a response that
/// arrived but failed its checks is a case verdict, not a client error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HttpClientError {
    /// The request exceeded its timeout.
    #[error("request timed out after {timeout_ms} ms")]
    Timeout {
        /// The timeout that was exceeded, in milliseconds.
        timeout_ms: u64,
    },

    /// The host name could not be resolved.
    #[error("DNS resolution failed for {host}: {message}")]
    Dns {
        /// Host that failed to resolve.
        host: String,
        /// Resolver error detail.
        message: String,
    },

    /// The server actively refused the connection.
    #[error("connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host.
        host: String,
        /// Target port.
        port: u16,
    },

    /// The connection failed for another reason.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The request URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Any other transport-level failure.
    #[error("{0}")]
    Other(String),
}

/// Port for executing HTTP requests.
///
/// `execute` borrows the request and returns a boxed future so the trait
/// stays object-safe; the runner holds implementations behind a generic
/// bound, tests hand it scripted stubs.
pub trait HttpClient: Send + Sync {
    /// Executes a request, returning the response or a transport error.
    fn execute(
        &self,
        request: &RequestSpec,
    ) -> Pin<Box<dyn Future<Output = Result<Response, HttpClientError>> + Send + '_>>;
}
