//! Plain text body.

use quill_core::{ContentType, Encoder, Outcome, Param, RequestContext, Result};

use super::default_content_type;

/// Sets the body to a [`Param::Text`] string, verbatim.
#[derive(Debug, Clone, Copy)]
pub struct TextEncoder {
    default_content_type: bool,
}

impl TextEncoder {
    /// Creates the encoder; `default_content_type` enables the
    /// `text/plain; charset=utf-8` default.
    #[must_use]
    pub const fn new(default_content_type: bool) -> Self {
        Self {
            default_content_type,
        }
    }
}

impl Default for TextEncoder {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Encoder for TextEncoder {
    fn name(&self) -> &'static str {
        "text"
    }

    fn apply(&self, context: &mut RequestContext<'_>) -> Result<Outcome> {
        let Some(Param::Text(text)) = context.param() else {
            return Ok(Outcome::NotApplicable);
        };

        let request = context.request_mut();
        request.set_body(text.clone());
        default_content_type(
            request,
            self.default_content_type,
            ContentType::PlainText.as_str(),
        )?;

        Ok(Outcome::Handled)
    }
}
