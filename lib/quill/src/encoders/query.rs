//! Query string encoding.

use quill_core::{Encoder, Outcome, Param, RequestContext, Result};

/// Appends [`Param::Query`] entries to the URL query string.
///
/// Lists add one entry per element under the same key, in order. Existing
/// query parameters are kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryEncoder;

impl Encoder for QueryEncoder {
    fn name(&self) -> &'static str {
        "query"
    }

    fn apply(&self, context: &mut RequestContext<'_>) -> Result<Outcome> {
        let Some(Param::Query(query)) = context.param() else {
            return Ok(Outcome::NotApplicable);
        };

        let mut pairs = Vec::with_capacity(query.len());
        for (name, value) in query.iter() {
            for item in value.expand() {
                pairs.push((name.as_str(), context.scalar(item)?));
            }
        }

        let request = context.request_mut();
        for (name, value) in &pairs {
            request.append_query(name, value);
        }

        Ok(Outcome::Handled)
    }
}

#[cfg(test)]
mod tests {
    use quill_core::{Header, Query, Request, ScalarMode, Value};

    use super::*;
    use crate::encoders::test_support::{encode_one, encode_one_with, request};

    #[test]
    fn lists_repeat_the_key() {
        let mut request = request();
        let query = Query::new().with("tags", vec![1, 2, 3]);
        encode_one(QueryEncoder, &mut request, query.into()).expect("encoded");

        assert_eq!(request.query(), Some("tags=1&tags=2&tags=3"));
    }

    #[test]
    fn scalars_keep_insertion_order_and_existing_query() {
        let mut request = Request::parse(
            http::Method::GET,
            "https://api.example.com/search?page=2",
        )
        .expect("valid URL");
        let query = Query::new()
            .with("q", "rust lang")
            .with("exact", true)
            .with("ratio", 3.5);
        encode_one(QueryEncoder, &mut request, query.into()).expect("encoded");

        assert_eq!(
            request.query(),
            Some("page=2&q=rust+lang&exact=true&ratio=3.5")
        );
    }

    #[test]
    fn null_is_empty_in_lenient_mode() {
        let mut request = request();
        let query = Query::new().with("empty", Value::Null);
        encode_one(QueryEncoder, &mut request, query.into()).expect("encoded");

        assert_eq!(request.query(), Some("empty="));
    }

    #[test]
    fn strict_mode_fails_before_mutating() {
        let mut request = request();
        let query = Query::new().with("ok", 1).with("bad", Value::Null);
        let err = encode_one_with(QueryEncoder, &mut request, query.into(), ScalarMode::Strict)
            .expect_err("null is not a scalar");

        assert!(matches!(err, quill_core::Error::UnsupportedValue("null")));
        assert_eq!(request.query(), None);
    }

    #[test]
    fn other_variants_are_delegated() {
        let mut request = request();
        let err = encode_one(QueryEncoder, &mut request, Header::new().into())
            .expect_err("not a query parameter");

        assert!(err.is_encoder_not_found());
    }
}
