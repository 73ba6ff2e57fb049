//! Transport seam.
//!
//! quill only builds requests. Sending them is the job of a [`Transport`],
//! typically a thin wrapper over an HTTP client owned by the caller.

use crate::{Request, Response, Result};

/// Sends an encoded request and returns the response.
///
/// Closures implement this trait, which is convenient for tests:
///
/// ```
/// use quill_core::{Request, Response, Transport};
///
/// let transport = |request: Request| {
///     Ok(Response::new(http::StatusCode::OK, http::HeaderMap::new(), request.path().to_string()))
/// };
///
/// let request = Request::parse(http::Method::GET, "https://api.example.com/ping").expect("url");
/// let response = transport.send(request).expect("sent");
/// assert_eq!(response.text().expect("utf8"), "/ping");
/// ```
pub trait Transport {
    /// Sends the request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be delivered or the response
    /// cannot be read.
    fn send(&self, request: Request) -> Result<Response>;
}

impl<F> Transport for F
where
    F: Fn(Request) -> Result<Response>,
{
    fn send(&self, request: Request) -> Result<Response> {
        self(request)
    }
}
