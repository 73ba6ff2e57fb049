//! Error types for quill.

use derive_more::{Display, Error, From};

/// Main error type for quill operations.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// The encoder chain was exhausted without any encoder recognizing the
    /// current parameter.
    #[display("no encoder found for {kind} parameter at index {index}")]
    #[from(skip)]
    EncoderNotFound {
        /// Kind of the parameter that was not recognized.
        kind: &'static str,
        /// Position of the parameter in the caller's list.
        index: usize,
    },

    /// JSON serialization error.
    #[display("JSON serialization error: {_0}")]
    #[from]
    JsonSerialization(serde_json::Error),

    /// XML serialization error.
    #[display("XML serialization error: {_0}")]
    #[from]
    XmlSerialization(serde_xml_rs::Error),

    /// Form URL-encoded serialization error.
    #[display("form serialization error: {_0}")]
    #[from]
    FormSerialization(serde_html_form::ser::Error),

    /// I/O error while reading a multipart file.
    #[display("I/O error: {_0}")]
    #[from]
    Io(std::io::Error),

    /// Header name or value rejected by the `http` crate.
    #[display("invalid header: {_0}")]
    #[from(skip)]
    InvalidHeader(#[error(not(source))] String),

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),

    /// Non-scalar value converted in strict scalar mode.
    #[display("unsupported scalar value: {_0}")]
    #[from(skip)]
    UnsupportedValue(#[error(not(source))] &'static str),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an encoder-not-found error.
    #[must_use]
    pub const fn encoder_not_found(kind: &'static str, index: usize) -> Self {
        Self::EncoderNotFound { kind, index }
    }

    /// Create an invalid header error.
    #[must_use]
    pub fn invalid_header(message: impl Into<String>) -> Self {
        Self::InvalidHeader(message.into())
    }

    /// Returns `true` if no encoder recognized the parameter.
    #[must_use]
    pub const fn is_encoder_not_found(&self) -> bool {
        matches!(self, Self::EncoderNotFound { .. })
    }

    /// Returns `true` if this is a JSON, XML or form serialization error.
    #[must_use]
    pub const fn is_serialization(&self) -> bool {
        matches!(
            self,
            Self::JsonSerialization(_) | Self::XmlSerialization(_) | Self::FormSerialization(_)
        )
    }

    /// Returns `true` if this is an I/O error.
    #[must_use]
    pub const fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}

impl From<http::header::InvalidHeaderName> for Error {
    fn from(err: http::header::InvalidHeaderName) -> Self {
        Self::invalid_header(err.to_string())
    }
}

impl From<http::header::InvalidHeaderValue> for Error {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Self::invalid_header(err.to_string())
    }
}
