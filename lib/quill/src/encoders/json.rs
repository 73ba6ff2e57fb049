//! JSON body.

use quill_core::{ContentType, Encoder, Outcome, Param, RequestContext, Result};

use super::default_content_type;

/// Sets the body from a [`Param::Json`] payload.
///
/// Pre-formed bytes and strings are validated and emitted verbatim, empty
/// input as `null`. Values are serialized with `serde_json`.
#[derive(Debug, Clone, Copy)]
pub struct JsonEncoder {
    default_content_type: bool,
}

impl JsonEncoder {
    /// Creates the encoder; `default_content_type` enables the
    /// `application/json; charset=utf-8` default.
    #[must_use]
    pub const fn new(default_content_type: bool) -> Self {
        Self {
            default_content_type,
        }
    }
}

impl Default for JsonEncoder {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Encoder for JsonEncoder {
    fn name(&self) -> &'static str {
        "json"
    }

    fn apply(&self, context: &mut RequestContext<'_>) -> Result<Outcome> {
        let Some(Param::Json(json)) = context.param() else {
            return Ok(Outcome::NotApplicable);
        };

        let body = json.to_bytes()?;
        let request = context.request_mut();
        request.set_body(body);
        default_content_type(request, self.default_content_type, ContentType::Json.as_str())?;

        Ok(Outcome::Handled)
    }
}
