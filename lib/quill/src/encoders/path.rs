//! Path placeholder substitution.

use quill_core::{Encoder, Outcome, Param, Path, RequestContext, Result};
use tracing::warn;

/// How `:name` placeholders in the URL path are substituted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PathMode {
    /// Each `:name` token, up to the next `/`, is replaced once by its value.
    ///
    /// Substituted text is never rescanned. Placeholders without a value are
    /// left in place.
    ///
    /// `/users/:id/:id2` with `{id: 42, id2: "x"}` gives `/users/42/x`.
    #[default]
    Segment,
    /// Every literal occurrence of `:name` anywhere in the path is replaced,
    /// including prefixes of longer placeholders, and placeholders without a
    /// value become empty.
    ///
    /// `/users/:id/:id2` with `{id: 42, id2: "x"}` gives `/users/42/422`.
    Legacy,
}

/// Substitutes [`Param::Path`] values into the URL path.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathEncoder {
    mode: PathMode,
}

impl PathEncoder {
    /// Creates an encoder using the given substitution mode.
    #[must_use]
    pub const fn new(mode: PathMode) -> Self {
        Self { mode }
    }

    /// The substitution mode.
    #[must_use]
    pub const fn mode(&self) -> PathMode {
        self.mode
    }
}

impl Encoder for PathEncoder {
    fn name(&self) -> &'static str {
        "path"
    }

    fn apply(&self, context: &mut RequestContext<'_>) -> Result<Outcome> {
        let Some(Param::Path(values)) = context.param() else {
            return Ok(Outcome::NotApplicable);
        };

        let template = context.request().path().to_string();
        let path = match self.mode {
            PathMode::Segment => substitute_segments(&template, values, context)?,
            PathMode::Legacy => substitute_legacy(&template, values, context)?,
        };
        context.request_mut().set_path(&path);

        Ok(Outcome::Handled)
    }
}

fn substitute_segments(template: &str, values: &Path, context: &RequestContext<'_>) -> Result<String> {
    let mut path = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find(':') {
        let (before, placeholder) = rest.split_at(start);
        path.push_str(before);

        let end = placeholder.find('/').unwrap_or(placeholder.len());
        let (token, tail) = placeholder.split_at(end);
        let key = token.strip_prefix(':').unwrap_or(token);

        if let Some(value) = values.get(key) {
            path.push_str(&context.scalar(value)?);
        } else {
            warn!(placeholder = key, template, "no value for path placeholder");
            path.push_str(token);
        }
        rest = tail;
    }
    path.push_str(rest);

    Ok(path)
}

fn substitute_legacy(template: &str, values: &Path, context: &RequestContext<'_>) -> Result<String> {
    let mut path = template.to_string();
    let mut index = 0;

    // The offset is not adjusted after a replacement, so it may point into
    // substituted text.
    while index < path.len() {
        if path.as_bytes().get(index) == Some(&b':') {
            let placeholder = path.get(index..).unwrap_or_default();
            let end = placeholder.find('/').unwrap_or(placeholder.len());
            let token = placeholder.get(..end).unwrap_or_default().to_string();
            let key = token.strip_prefix(':').unwrap_or(&token);

            let value = match values.get(key) {
                Some(value) => context.scalar(value)?,
                None => String::new(),
            };
            path = path.replace(&token, &value);
        }
        index += 1;
    }

    Ok(path)
}
