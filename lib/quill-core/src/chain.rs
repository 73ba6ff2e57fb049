//! Encoder trait and the chain that dispatches parameters to encoders.
//!
//! An [`EncoderChain`] is an ordered list of encoders plus a cursor. Calling
//! [`EncoderChain::next`] runs the encoder under the cursor after moving the
//! cursor past it. An encoder that recognizes the current parameter mutates
//! the request and stops there; one that does not delegates to the next
//! encoder exactly once. When the cursor runs off the end, dispatch fails
//! with [`Error::EncoderNotFound`].
//!
//! Registration order is dispatch priority.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::{Error, Param, RequestContext, Result};

/// Result of an encoder looking at the current parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The parameter was recognized and encoded; dispatch stops.
    Handled,
    /// The parameter is not this encoder's shape; dispatch moves on.
    NotApplicable,
}

/// Encodes one parameter variant into the request.
///
/// Implementors only write [`Encoder::apply`]. The provided
/// [`Encoder::encode`] turns [`Outcome::NotApplicable`] into a single call to
/// [`EncoderChain::next`] and returns its result unchanged.
///
/// # Example
///
/// ```
/// use quill_core::{Encoder, EncoderChain, Outcome, Param, Request, RequestContext, Result};
///
/// #[derive(Debug)]
/// struct ShoutEncoder;
///
/// impl Encoder for ShoutEncoder {
///     fn name(&self) -> &'static str {
///         "shout"
///     }
///
///     fn apply(&self, context: &mut RequestContext<'_>) -> Result<Outcome> {
///         let Some(Param::Text(text)) = context.param() else {
///             return Ok(Outcome::NotApplicable);
///         };
///         context.request_mut().set_body(text.to_uppercase());
///         Ok(Outcome::Handled)
///     }
/// }
///
/// let mut chain = EncoderChain::new();
/// chain.add(ShoutEncoder);
///
/// let mut request = Request::parse(http::Method::POST, "https://api.example.com").expect("url");
/// let params = vec![Param::from("hello")];
/// let mut context = RequestContext::new(&mut request, &params);
/// chain.next(&mut context).expect("encoded");
///
/// assert_eq!(request.body().map(|b| b.to_vec()), Some(b"HELLO".to_vec()));
/// ```
pub trait Encoder: fmt::Debug + Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Encodes the current parameter if it has this encoder's shape.
    fn apply(&self, context: &mut RequestContext<'_>) -> Result<Outcome>;

    /// Encodes the current parameter or delegates to the rest of the chain.
    fn encode(&self, context: &mut RequestContext<'_>, chain: &mut EncoderChain) -> Result<()> {
        match self.apply(context)? {
            Outcome::Handled => {
                debug!(
                    encoder = self.name(),
                    kind = context.param().map_or("none", Param::kind),
                    index = context.index(),
                    "parameter encoded"
                );
                Ok(())
            }
            Outcome::NotApplicable => {
                trace!(encoder = self.name(), "delegating to next encoder");
                chain.next(context)
            }
        }
    }
}

/// Ordered encoders with a dispatch cursor.
#[derive(Debug, Clone, Default)]
pub struct EncoderChain {
    encoders: Vec<Arc<dyn Encoder>>,
    index: usize,
}

impl EncoderChain {
    /// Creates an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a chain from shared encoders, keeping their order.
    #[must_use]
    pub fn from_encoders(encoders: impl IntoIterator<Item = Arc<dyn Encoder>>) -> Self {
        let mut chain = Self::new();
        chain.extend(encoders);
        chain
    }

    /// Runs the encoder under the cursor, moving the cursor past it first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EncoderNotFound`] when the cursor is past the last
    /// encoder, or whatever the invoked encoder returns.
    pub fn next(&mut self, context: &mut RequestContext<'_>) -> Result<()> {
        let Some(encoder) = self.encoders.get(self.index).cloned() else {
            let kind = context.param().map_or("none", Param::kind);
            return Err(Error::encoder_not_found(kind, context.index()));
        };
        self.index += 1;
        encoder.encode(context, self)
    }

    /// Removes every encoder and zeroes the cursor.
    pub fn reset(&mut self) -> &mut Self {
        self.encoders.clear();
        self.index = 0;
        self
    }

    /// Zeroes the cursor, keeping the encoders.
    pub fn rewind(&mut self) -> &mut Self {
        self.index = 0;
        self
    }

    /// Appends an encoder.
    pub fn add(&mut self, encoder: impl Encoder + 'static) -> &mut Self {
        self.encoders.push(Arc::new(encoder));
        self
    }

    /// Appends shared encoders, keeping their order.
    pub fn extend(&mut self, encoders: impl IntoIterator<Item = Arc<dyn Encoder>>) -> &mut Self {
        self.encoders.extend(encoders);
        self
    }

    /// The head encoder, if any.
    #[must_use]
    pub fn first(&self) -> Option<&dyn Encoder> {
        self.encoders.first().map(AsRef::as_ref)
    }

    /// The encoders, in dispatch order.
    #[must_use]
    pub fn encoders(&self) -> &[Arc<dyn Encoder>] {
        &self.encoders
    }

    /// Names of the encoders, in dispatch order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.encoders.iter().map(|encoder| encoder.name())
    }

    /// Cursor position: the index of the next encoder to run.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.index
    }

    /// Number of encoders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.encoders.len()
    }

    /// Returns `true` if there are no encoders.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.encoders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Query, Request};

    /// Handles text parameters by appending its tag to `X-Handled-By`.
    #[derive(Debug)]
    struct TextTagger(&'static str);

    impl Encoder for TextTagger {
        fn name(&self) -> &'static str {
            self.0
        }

        fn apply(&self, context: &mut RequestContext<'_>) -> Result<Outcome> {
            if !matches!(context.param(), Some(Param::Text(_))) {
                return Ok(Outcome::NotApplicable);
            }
            context.request_mut().append_header("X-Handled-By", self.0)?;
            Ok(Outcome::Handled)
        }
    }

    /// Never matches.
    #[derive(Debug)]
    struct Skipper;

    impl Encoder for Skipper {
        fn name(&self) -> &'static str {
            "skipper"
        }

        fn apply(&self, _context: &mut RequestContext<'_>) -> Result<Outcome> {
            Ok(Outcome::NotApplicable)
        }
    }

    fn request() -> Request {
        Request::parse(http::Method::POST, "https://api.example.com").expect("valid URL")
    }

    #[test]
    fn empty_chain_is_encoder_not_found() {
        let mut request = request();
        let params = vec![Param::from("text")];
        let mut context = RequestContext::new(&mut request, &params);

        let mut chain = EncoderChain::new();
        assert!(chain.first().is_none());

        let err = chain.next(&mut context).expect_err("no encoder");
        assert!(matches!(
            err,
            Error::EncoderNotFound {
                kind: "text",
                index: 0
            }
        ));
    }

    #[test]
    fn unmatched_parameter_exhausts_chain_without_mutation() {
        let mut request = request();
        let params = vec![Param::from(Query::new().with("q", "x"))];
        let mut chain = EncoderChain::new();
        chain.add(Skipper).add(TextTagger("text"));

        let mut context = RequestContext::new(&mut request, &params);
        let err = chain.next(&mut context).expect_err("no encoder for query");

        assert!(err.is_encoder_not_found());
        assert_eq!(chain.position(), 2);
        assert!(request.headers().is_empty());
        assert!(request.query().is_none());
    }

    #[test]
    fn first_match_wins_and_stops() {
        let mut request = request();
        let params = vec![Param::from("text")];
        let mut chain = EncoderChain::new();
        chain
            .add(Skipper)
            .add(TextTagger("primary"))
            .add(TextTagger("secondary"));

        let mut context = RequestContext::new(&mut request, &params);
        chain.next(&mut context).expect("encoded");

        assert_eq!(chain.position(), 2);
        assert_eq!(request.header_values("x-handled-by"), ["primary"]);
    }

    #[test]
    fn rewind_restarts_from_head() {
        let mut request = request();
        let params = vec![Param::from("a"), Param::from("b")];
        let mut chain = EncoderChain::new();
        chain.add(TextTagger("text"));

        let mut context = RequestContext::new(&mut request, &params);
        chain.next(&mut context).expect("first");

        // Without rewinding, the cursor is already past the only encoder
        context.set_index(1);
        assert!(chain.next(&mut context).is_err());

        chain.rewind();
        chain.next(&mut context).expect("second");
        assert_eq!(request.header_values("x-handled-by"), ["text", "text"]);
    }

    #[test]
    fn reset_clears_encoders() {
        let mut chain = EncoderChain::new();
        chain.add(Skipper).add(TextTagger("text"));
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.first().map(|encoder| encoder.name()), Some("skipper"));

        let chain = chain.reset().add(TextTagger("fresh"));
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.position(), 0);
        assert_eq!(chain.names().collect::<Vec<_>>(), ["fresh"]);
    }

    #[test]
    fn from_encoders_keeps_order() {
        let encoders: Vec<Arc<dyn Encoder>> =
            vec![Arc::new(TextTagger("one")), Arc::new(Skipper)];
        let chain = EncoderChain::from_encoders(encoders);

        assert_eq!(chain.names().collect::<Vec<_>>(), ["one", "skipper"]);
        assert!(!chain.is_empty());
    }
}
