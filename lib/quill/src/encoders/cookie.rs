//! Cookie encoding.

use quill_core::{Encoder, Outcome, Param, RequestContext, Result};

/// Adds one cookie per [`Param::Cookie`] entry to the `Cookie` header.
#[derive(Debug, Clone, Copy, Default)]
pub struct CookieEncoder;

impl Encoder for CookieEncoder {
    fn name(&self) -> &'static str {
        "cookie"
    }

    fn apply(&self, context: &mut RequestContext<'_>) -> Result<Outcome> {
        let Some(Param::Cookie(cookies)) = context.param() else {
            return Ok(Outcome::NotApplicable);
        };

        for (name, value) in cookies.iter() {
            let value = context.scalar(value)?;
            context.request_mut().add_cookie(name, &value)?;
        }

        Ok(Outcome::Handled)
    }
}
