//! Per-call encoding state shared along the encoder chain.

use crate::{Param, Request, Response, Result, ScalarMode, Value};

/// State of one outgoing call while its parameters are encoded.
///
/// The context borrows the in-flight request mutably and the caller's
/// parameter list immutably. Exactly one parameter is current at a time,
/// selected by [`RequestContext::set_index`]; encoders only ever look at that
/// one.
///
/// # Example
///
/// ```
/// use quill_core::{Param, Request, RequestContext};
///
/// let mut request = Request::parse(http::Method::GET, "https://api.example.com").expect("url");
/// let params = vec![Param::from("hello")];
/// let mut context = RequestContext::new(&mut request, &params);
///
/// assert_eq!(context.param().map(Param::kind), Some("text"));
/// context.set_index(1);
/// assert!(context.param().is_none());
/// ```
#[derive(Debug)]
pub struct RequestContext<'a> {
    request: &'a mut Request,
    response: Option<&'a Response>,
    params: &'a [Param],
    index: usize,
    scalar_mode: ScalarMode,
}

impl<'a> RequestContext<'a> {
    /// Creates a context positioned on the first parameter.
    pub fn new(request: &'a mut Request, params: &'a [Param]) -> Self {
        Self {
            request,
            response: None,
            params,
            index: 0,
            scalar_mode: ScalarMode::default(),
        }
    }

    /// Attaches a previously received response.
    #[must_use]
    pub fn with_response(mut self, response: &'a Response) -> Self {
        self.response = Some(response);
        self
    }

    /// Sets how encoders convert non-scalar values.
    #[must_use]
    pub fn with_scalar_mode(mut self, scalar_mode: ScalarMode) -> Self {
        self.scalar_mode = scalar_mode;
        self
    }

    /// The in-flight request.
    #[must_use]
    pub fn request(&self) -> &Request {
        &*self.request
    }

    /// Mutable access to the in-flight request.
    pub fn request_mut(&mut self) -> &mut Request {
        &mut *self.request
    }

    /// The previously received response, if any.
    #[must_use]
    pub const fn response(&self) -> Option<&'a Response> {
        self.response
    }

    /// All parameters of the call, in caller order.
    #[must_use]
    pub const fn params(&self) -> &'a [Param] {
        self.params
    }

    /// The parameter being encoded.
    #[must_use]
    pub fn param(&self) -> Option<&'a Param> {
        self.params.get(self.index)
    }

    /// Position of the current parameter.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Selects the current parameter.
    pub fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    /// Scalar conversion mode.
    #[must_use]
    pub const fn scalar_mode(&self) -> ScalarMode {
        self.scalar_mode
    }

    /// Converts a value with the configured scalar mode.
    pub fn scalar(&self, value: &Value) -> Result<String> {
        self.scalar_mode.encode(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, Query};

    fn request() -> Request {
        Request::parse(http::Method::GET, "https://api.example.com").expect("valid URL")
    }

    #[test]
    fn context_cursor() {
        let mut request = request();
        let params = vec![Param::from(Query::new()), Param::from("body")];
        let mut context = RequestContext::new(&mut request, &params);

        assert_eq!(context.index(), 0);
        assert_eq!(context.params().len(), 2);
        assert_eq!(context.param().map(Param::kind), Some("query"));

        context.set_index(1);
        assert_eq!(context.param().map(Param::kind), Some("text"));
    }

    #[test]
    fn context_param_outlives_request_borrow() {
        let mut request = request();
        let params = vec![Param::from("body")];
        let mut context = RequestContext::new(&mut request, &params);

        let param = context.param();
        context.request_mut().set_body("mutated");
        assert!(matches!(param, Some(Param::Text(text)) if text == "body"));
        assert!(context.request().body().is_some());
    }

    #[test]
    fn context_response() {
        let mut request = request();
        let response = Response::new(http::StatusCode::OK, http::HeaderMap::new(), "prior");
        let context = RequestContext::new(&mut request, &[]).with_response(&response);

        assert_eq!(
            context.response().map(Response::status),
            Some(http::StatusCode::OK)
        );
    }

    #[test]
    fn context_scalar_mode() {
        let mut request = request();
        let context = RequestContext::new(&mut request, &[]);
        assert_eq!(context.scalar(&Value::Null).expect("lenient"), "");

        let context = context.with_scalar_mode(ScalarMode::Strict);
        let err = context.scalar(&Value::Null).expect_err("strict");
        assert!(matches!(err, Error::UnsupportedValue(_)));
    }
}
