//! Multipart body.

use quill_core::{
    Encoder, MultiPartValue, MultipartWriter, Outcome, Param, RequestContext, Result,
};

use super::default_content_type;

/// Streams a [`Param::MultiPart`] into a `multipart/form-data` body.
///
/// Fields are written as form fields and files as file parts named after their
/// handle. The writer is closed on every exit path, so the closing boundary is
/// written even when a part fails.
#[derive(Debug, Clone, Copy)]
pub struct MultiPartEncoder {
    default_content_type: bool,
}

impl MultiPartEncoder {
    /// Creates the encoder; `default_content_type` enables the
    /// `multipart/form-data; boundary=...` default.
    #[must_use]
    pub const fn new(default_content_type: bool) -> Self {
        Self {
            default_content_type,
        }
    }
}

impl Default for MultiPartEncoder {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Encoder for MultiPartEncoder {
    fn name(&self) -> &'static str {
        "multipart"
    }

    fn apply(&self, context: &mut RequestContext<'_>) -> Result<Outcome> {
        let Some(Param::MultiPart(parts)) = context.param() else {
            return Ok(Outcome::NotApplicable);
        };

        let mut body = Vec::new();
        let mut writer = MultipartWriter::new(&mut body);
        let content_type = writer.content_type();
        for (name, part) in parts.iter() {
            match part {
                MultiPartValue::Field(value) => {
                    writer.write_field(name, &context.scalar(value)?)?;
                }
                MultiPartValue::File(file) => {
                    writer.write_file(name, file.name(), file)?;
                }
            }
        }
        writer.close()?;
        drop(writer);

        let request = context.request_mut();
        request.set_body(body);
        default_content_type(request, self.default_content_type, &content_type)?;

        Ok(Outcome::Handled)
    }
}
