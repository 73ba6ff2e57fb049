//! XML body.

use quill_core::{ContentType, Encoder, Outcome, Param, RequestContext, Result};

use super::default_content_type;

/// Sets the body from a [`Param::Xml`] payload.
///
/// Raw strings are emitted verbatim; values are serialized with `serde-xml-rs`.
#[derive(Debug, Clone, Copy)]
pub struct XmlEncoder {
    default_content_type: bool,
}

impl XmlEncoder {
    /// Creates the encoder; `default_content_type` enables the
    /// `text/xml; charset=utf-8` default.
    #[must_use]
    pub const fn new(default_content_type: bool) -> Self {
        Self {
            default_content_type,
        }
    }
}

impl Default for XmlEncoder {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Encoder for XmlEncoder {
    fn name(&self) -> &'static str {
        "xml"
    }

    fn apply(&self, context: &mut RequestContext<'_>) -> Result<Outcome> {
        let Some(Param::Xml(xml)) = context.param() else {
            return Ok(Outcome::NotApplicable);
        };

        let body = xml.to_bytes()?;
        let request = context.request_mut();
        request.set_body(body);
        default_content_type(request, self.default_content_type, ContentType::Xml.as_str())?;

        Ok(Outcome::Handled)
    }
}

#[cfg(test)]
mod tests {
    use quill_core::Xml;
    use serde::Serialize;

    use super::*;
    use crate::encoders::test_support::{encode_one, request};

    #[derive(Serialize)]
    #[serde(rename = "note")]
    struct Note {
        to: String,
    }

    #[test]
    fn raw_xml_is_verbatim() {
        let mut request = request();
        encode_one(XmlEncoder::default(), &mut request, Xml::raw("<a>1</a>").into())
            .expect("encoded");

        assert_eq!(request.body().map(|b| b.to_vec()), Some(b"<a>1</a>".to_vec()));
        assert_eq!(request.content_type(), Some("text/xml; charset=utf-8"));
    }

    #[test]
    fn values_are_serialized() {
        let mut request = request();
        let note = Note {
            to: "Bob".to_string(),
        };
        encode_one(XmlEncoder::default(), &mut request, Xml::value(note).into())
            .expect("encoded");

        let body = request
            .body()
            .map(|b| String::from_utf8_lossy(b).into_owned())
            .unwrap_or_default();
        assert!(body.contains("<to>Bob</to>"), "unexpected XML: {body}");
    }

    #[test]
    fn serialization_failure_leaves_request_untouched() {
        let mut request = request();
        let err = encode_one(XmlEncoder::default(), &mut request, Xml::value(vec![1, 2, 3]).into())
            .expect_err("sequence at document root");

        assert!(err.is_serialization());
        assert!(request.body().is_none());
        assert_eq!(request.content_type(), None);
    }

    #[test]
    fn other_variants_are_delegated() {
        let mut request = request();
        let err = encode_one(XmlEncoder::default(), &mut request, Param::from("text"))
            .expect_err("not an xml parameter");

        assert!(err.is_encoder_not_found());
    }
}
