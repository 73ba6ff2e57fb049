//! Raw request mutation.

use quill_core::{Encoder, Outcome, Param, RequestContext, Result};

/// Invokes a [`Param::Mapper`] callback on the request.
#[derive(Debug, Clone, Copy, Default)]
pub struct MapperEncoder;

impl Encoder for MapperEncoder {
    fn name(&self) -> &'static str {
        "mapper"
    }

    fn apply(&self, context: &mut RequestContext<'_>) -> Result<Outcome> {
        let Some(Param::Mapper(mapper)) = context.param() else {
            return Ok(Outcome::NotApplicable);
        };

        mapper.apply(context.request_mut());

        Ok(Outcome::Handled)
    }
}
