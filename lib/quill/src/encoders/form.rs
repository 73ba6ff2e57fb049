//! URL-encoded form body.

use quill_core::{ContentType, Encoder, Outcome, Param, RequestContext, Result, to_form};

use super::default_content_type;

/// Merges [`Param::Form`] fields into the request's form state.
///
/// Lists add one field per element under the same name. The body is replaced
/// by the whole encoded form, so several form parameters accumulate into one
/// body.
#[derive(Debug, Clone, Copy)]
pub struct FormEncoder {
    default_content_type: bool,
}

impl FormEncoder {
    /// Creates the encoder; `default_content_type` enables the
    /// `application/x-www-form-urlencoded` default.
    #[must_use]
    pub const fn new(default_content_type: bool) -> Self {
        Self {
            default_content_type,
        }
    }
}

impl Default for FormEncoder {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Encoder for FormEncoder {
    fn name(&self) -> &'static str {
        "form"
    }

    fn apply(&self, context: &mut RequestContext<'_>) -> Result<Outcome> {
        let Some(Param::Form(form)) = context.param() else {
            return Ok(Outcome::NotApplicable);
        };

        let mut fields = Vec::with_capacity(form.len());
        for (name, value) in form.iter() {
            for item in value.expand() {
                fields.push((name, context.scalar(item)?));
            }
        }

        let request = context.request_mut();
        for (name, value) in fields {
            request
                .post_form_mut()
                .entry(name.clone())
                .or_default()
                .push(value);
        }
        let body = to_form(request.post_form())?;
        request.set_body(body);
        default_content_type(
            request,
            self.default_content_type,
            ContentType::FormUrlEncoded.as_str(),
        )?;

        Ok(Outcome::Handled)
    }
}

#[cfg(test)]
mod tests {
    use quill_core::{Form, Query};

    use super::*;
    use crate::encoders::test_support::{encode_one, request};

    fn body(request: &quill_core::Request) -> Option<String> {
        request
            .body()
            .map(|b| String::from_utf8_lossy(b).into_owned())
    }

    #[test]
    fn fields_are_encoded() {
        let mut request = request();
        let form = Form::new()
            .with("name", "Alice Doe")
            .with("tags", vec!["a", "b"]);
        encode_one(FormEncoder::default(), &mut request, form.into()).expect("encoded");

        assert_eq!(body(&request).as_deref(), Some("name=Alice+Doe&tags=a&tags=b"));
        assert_eq!(
            request.content_type(),
            Some("application/x-www-form-urlencoded")
        );
        assert_eq!(
            request.post_form().get("tags"),
            Some(&vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn forms_accumulate() {
        let mut request = request();
        encode_one(
            FormEncoder::default(),
            &mut request,
            Form::new().with("a", 1).into(),
        )
        .expect("encoded");
        encode_one(
            FormEncoder::default(),
            &mut request,
            Form::new().with("b", 2).with("a", 3).into(),
        )
        .expect("encoded");

        assert_eq!(body(&request).as_deref(), Some("a=1&a=3&b=2"));
    }

    #[test]
    fn other_variants_are_delegated() {
        let mut request = request();
        let err = encode_one(FormEncoder::default(), &mut request, Query::new().into())
            .expect_err("not a form parameter");

        assert!(err.is_encoder_not_found());
        assert!(request.post_form().is_empty());
    }
}
