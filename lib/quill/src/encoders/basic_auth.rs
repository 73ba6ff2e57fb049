//! Basic authentication.

use quill_core::{Encoder, Outcome, Param, RequestContext, Result};

/// Sets `Authorization: Basic <base64(name:password)>` from [`Param::User`].
///
/// Any existing `Authorization` header is overwritten.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicAuthEncoder;

impl Encoder for BasicAuthEncoder {
    fn name(&self) -> &'static str {
        "basic_auth"
    }

    fn apply(&self, context: &mut RequestContext<'_>) -> Result<Outcome> {
        let Some(Param::User(user)) = context.param() else {
            return Ok(Outcome::NotApplicable);
        };

        context
            .request_mut()
            .set_basic_auth(&user.name, &user.password)?;

        Ok(Outcome::Handled)
    }
}
