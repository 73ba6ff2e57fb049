//! Encoder configuration types.

use quill_core::ScalarMode;

use crate::PathMode;

/// Configuration for the built-in encoders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderConfig {
    /// How `:name` placeholders are substituted.
    pub path_mode: PathMode,
    /// How non-scalar values are converted to strings.
    pub scalar_mode: ScalarMode,
    /// Whether body encoders set a Content-Type when none is present.
    pub default_content_types: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            path_mode: PathMode::Segment,
            scalar_mode: ScalarMode::Lenient,
            default_content_types: true,
        }
    }
}

impl EncoderConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> EncoderConfigBuilder {
        EncoderConfigBuilder::default()
    }
}

/// Builder for [`EncoderConfig`].
#[derive(Debug, Clone, Default)]
pub struct EncoderConfigBuilder {
    path_mode: Option<PathMode>,
    scalar_mode: Option<ScalarMode>,
    default_content_types: Option<bool>,
}

impl EncoderConfigBuilder {
    /// Set the path substitution mode.
    #[must_use]
    pub const fn path_mode(mut self, mode: PathMode) -> Self {
        self.path_mode = Some(mode);
        self
    }

    /// Set the scalar conversion mode.
    #[must_use]
    pub const fn scalar_mode(mut self, mode: ScalarMode) -> Self {
        self.scalar_mode = Some(mode);
        self
    }

    /// Set whether body encoders default the Content-Type.
    #[must_use]
    pub const fn default_content_types(mut self, enabled: bool) -> Self {
        self.default_content_types = Some(enabled);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> EncoderConfig {
        let defaults = EncoderConfig::default();
        EncoderConfig {
            path_mode: self.path_mode.unwrap_or(defaults.path_mode),
            scalar_mode: self.scalar_mode.unwrap_or(defaults.scalar_mode),
            default_content_types: self
                .default_content_types
                .unwrap_or(defaults.default_content_types),
        }
    }
}
