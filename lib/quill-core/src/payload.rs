//! JSON and XML body payloads.
//!
//! A payload is either pre-formed text supplied by the caller or an arbitrary
//! serializable value. Values are captured as deferred serializers so that a
//! serialization failure surfaces when the body is encoded, not when the
//! parameter is built.

use std::fmt;

use bytes::Bytes;
use serde::Serialize;

use crate::{Result, to_json, to_xml, validate_json};

type Deferred = Box<dyn Fn() -> Result<Bytes>>;

/// Source of a JSON body.
pub enum JsonPayload {
    /// Pre-formed JSON bytes, validated and emitted verbatim.
    Bytes(Bytes),
    /// Pre-formed JSON text, validated and emitted verbatim.
    Raw(String),
    /// A value serialized with `serde_json`.
    Value(Deferred),
}

impl fmt::Debug for JsonPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bytes(bytes) => f.debug_tuple("Bytes").field(bytes).finish(),
            Self::Raw(raw) => f.debug_tuple("Raw").field(raw).finish(),
            Self::Value(_) => f.write_str("Value(..)"),
        }
    }
}

/// A JSON request body.
///
/// # Example
///
/// ```
/// use quill_core::Json;
///
/// let json = Json::value(serde_json::json!({"a": 1}));
/// assert_eq!(json.to_bytes().expect("serialize").as_ref(), br#"{"a":1}"#);
///
/// let raw = Json::raw(r#"{"a":1}"#);
/// assert_eq!(raw.to_bytes().expect("valid").as_ref(), br#"{"a":1}"#);
/// ```
#[derive(Debug)]
pub struct Json(JsonPayload);

impl Json {
    /// Pre-formed JSON bytes.
    ///
    /// Empty bytes are sent as `null`.
    #[must_use]
    pub fn bytes(bytes: impl Into<Bytes>) -> Self {
        Self(JsonPayload::Bytes(bytes.into()))
    }

    /// Pre-formed JSON text.
    ///
    /// The text is validated but not reformatted. Empty text is sent as `null`
    /// rather than as an empty body.
    #[must_use]
    pub fn raw(json: impl Into<String>) -> Self {
        Self(JsonPayload::Raw(json.into()))
    }

    /// Any serializable value.
    #[must_use]
    pub fn value<T: Serialize + 'static>(value: T) -> Self {
        Self(JsonPayload::Value(Box::new(move || to_json(&value))))
    }

    /// The payload source.
    #[must_use]
    pub const fn payload(&self) -> &JsonPayload {
        &self.0
    }

    /// Body bytes: validated pre-formed JSON or the serialized value.
    pub fn to_bytes(&self) -> Result<Bytes> {
        match &self.0 {
            JsonPayload::Bytes(bytes) => validate_json(bytes),
            JsonPayload::Raw(raw) => validate_json(raw.as_bytes()),
            JsonPayload::Value(serialize) => serialize(),
        }
    }
}

impl From<serde_json::Value> for Json {
    fn from(value: serde_json::Value) -> Self {
        Self::value(value)
    }
}

/// Source of an XML body.
pub enum XmlPayload {
    /// Pre-formed XML text, emitted verbatim.
    Raw(String),
    /// A value serialized with `serde-xml-rs`.
    Value(Deferred),
}

impl fmt::Debug for XmlPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raw(raw) => f.debug_tuple("Raw").field(raw).finish(),
            Self::Value(_) => f.write_str("Value(..)"),
        }
    }
}

/// An XML request body.
#[derive(Debug)]
pub struct Xml(XmlPayload);

impl Xml {
    /// Pre-formed XML text.
    #[must_use]
    pub fn raw(xml: impl Into<String>) -> Self {
        Self(XmlPayload::Raw(xml.into()))
    }

    /// Any serializable value.
    #[must_use]
    pub fn value<T: Serialize + 'static>(value: T) -> Self {
        Self(XmlPayload::Value(Box::new(move || to_xml(&value))))
    }

    /// The payload source.
    #[must_use]
    pub const fn payload(&self) -> &XmlPayload {
        &self.0
    }

    /// Body bytes: the raw text or the serialized value.
    pub fn to_bytes(&self) -> Result<Bytes> {
        match &self.0 {
            XmlPayload::Raw(raw) => Ok(Bytes::copy_from_slice(raw.as_bytes())),
            XmlPayload::Value(serialize) => serialize(),
        }
    }
}
