//! Header encoding.

use quill_core::{Encoder, Outcome, Param, RequestContext, Result};

/// Appends [`Param::Header`] entries as additional header values.
///
/// Existing values for the same name are kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderEncoder;

impl Encoder for HeaderEncoder {
    fn name(&self) -> &'static str {
        "header"
    }

    fn apply(&self, context: &mut RequestContext<'_>) -> Result<Outcome> {
        let Some(Param::Header(headers)) = context.param() else {
            return Ok(Outcome::NotApplicable);
        };

        for (name, value) in headers.iter() {
            let value = context.scalar(value)?;
            context.request_mut().append_header(name, &value)?;
        }

        Ok(Outcome::Handled)
    }
}
