//! The parameter encoding driver.

use quill_core::{EncoderChain, Param, Request, RequestContext, Response, Result};
use tracing::debug_span;

use crate::{EncoderConfig, default_chain};

/// Encodes a parameter list into a request, one chain dispatch per parameter.
///
/// Parameters are processed in order. Each dispatch starts from the head of
/// the chain; the first failure stops the walk and leaves the request as the
/// previous parameters (and possibly the failing one) left it.
///
/// # Example
///
/// ```
/// use quill::{EncoderConfig, Json, Method, Param, ParamEncoder, Path, Query, Request};
///
/// let encoder = ParamEncoder::new(EncoderConfig::default());
/// let mut request = Request::parse(Method::POST, "https://api.example.com/users/:id")
///     .expect("url");
///
/// let params: Vec<Param> = vec![
///     Path::new().with("id", 42).into(),
///     Query::new().with("tags", vec![1, 2]).into(),
///     Json::raw(r#"{"a":1}"#).into(),
/// ];
/// encoder.encode(&mut request, &params).expect("encoded");
///
/// assert_eq!(request.url().as_str(), "https://api.example.com/users/42?tags=1&tags=2");
/// assert_eq!(request.content_type(), Some("application/json; charset=utf-8"));
/// ```
#[derive(Debug, Clone)]
pub struct ParamEncoder {
    config: EncoderConfig,
    chain: EncoderChain,
}

impl ParamEncoder {
    /// Creates a driver over the default chain for `config`.
    #[must_use]
    pub fn new(config: EncoderConfig) -> Self {
        let chain = default_chain(&config);
        Self { config, chain }
    }

    /// Creates a driver over a custom chain.
    ///
    /// Only the scalar mode of `config` applies; the chain's encoders were
    /// configured when they were built.
    #[must_use]
    pub fn with_chain(config: EncoderConfig, chain: EncoderChain) -> Self {
        Self { config, chain }
    }

    /// The configuration.
    #[must_use]
    pub const fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// The encoder chain.
    #[must_use]
    pub const fn chain(&self) -> &EncoderChain {
        &self.chain
    }

    /// Encodes every parameter into `request`.
    ///
    /// # Errors
    ///
    /// Returns the first encoder failure, or [`quill_core::Error::EncoderNotFound`]
    /// for a parameter no encoder recognizes.
    pub fn encode(&self, request: &mut Request, params: &[Param]) -> Result<()> {
        let span = debug_span!(
            "encode",
            method = %request.method(),
            url = %request.url(),
            params = params.len()
        );
        let _guard = span.enter();

        let context = RequestContext::new(request, params);
        self.dispatch_all(context)
    }

    /// Encodes every parameter, exposing a prior response to the encoders.
    ///
    /// # Errors
    ///
    /// Same as [`ParamEncoder::encode`].
    pub fn encode_with_response(
        &self,
        request: &mut Request,
        response: &Response,
        params: &[Param],
    ) -> Result<()> {
        let span = debug_span!(
            "encode",
            method = %request.method(),
            url = %request.url(),
            params = params.len(),
            response_status = %response.status()
        );
        let _guard = span.enter();

        let context = RequestContext::new(request, params).with_response(response);
        self.dispatch_all(context)
    }

    fn dispatch_all(&self, context: RequestContext<'_>) -> Result<()> {
        let mut context = context.with_scalar_mode(self.config.scalar_mode);
        let mut chain = self.chain.clone();

        for index in 0..context.params().len() {
            context.set_index(index);
            chain.rewind();
            chain.next(&mut context)?;
        }

        Ok(())
    }
}

impl Default for ParamEncoder {
    fn default() -> Self {
        Self::new(EncoderConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use quill_core::{Header, Path, Query, User};

    use super::*;

    fn request(url: &str) -> Request {
        Request::parse(http::Method::POST, url).expect("valid URL")
    }

    #[test]
    fn parameters_are_encoded_in_order() {
        let encoder = ParamEncoder::default();
        let mut request = request("https://api.example.com/users/:id");
        let params: Vec<Param> = vec![
            Path::new().with("id", 7).into(),
            Header::new().with("X-Step", "one").into(),
            Header::new().with("X-Step", "two").into(),
            User::new("u", "p").into(),
        ];
        encoder.encode(&mut request, &params).expect("encoded");

        assert_eq!(request.path(), "/users/7");
        assert_eq!(request.header_values("x-step"), ["one", "two"]);
        assert!(request.basic_auth().is_some());
    }

    #[test]
    fn first_failure_stops_the_walk() {
        let mut chain = EncoderChain::new();
        chain.add(crate::QueryEncoder);
        let encoder = ParamEncoder::with_chain(EncoderConfig::default(), chain);

        let mut request = request("https://api.example.com");
        let params: Vec<Param> = vec![
            Query::new().with("a", 1).into(),
            Param::from("no text encoder"),
            Query::new().with("b", 2).into(),
        ];
        let err = encoder.encode(&mut request, &params).expect_err("text unsupported");

        assert!(matches!(
            err,
            quill_core::Error::EncoderNotFound {
                kind: "text",
                index: 1
            }
        ));
        assert_eq!(request.query(), Some("a=1"));
    }

    #[test]
    fn empty_parameter_list_is_a_no_op() {
        let encoder = ParamEncoder::default();
        let mut request = request("https://api.example.com/ping");
        encoder.encode(&mut request, &[]).expect("nothing to encode");

        assert_eq!(request.url().as_str(), "https://api.example.com/ping");
        assert!(request.body().is_none());
    }

    #[test]
    fn default_driver_uses_default_chain() {
        let encoder = ParamEncoder::default();
        assert_eq!(encoder.chain().len(), 11);
        assert_eq!(*encoder.config(), EncoderConfig::default());
    }
}
