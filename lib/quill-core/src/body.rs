//! Body serialization utilities.

use bytes::Bytes;
use serde::de::IgnoredAny;

use crate::{FormValues, Result};

/// Default content types written by the body encoders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// `application/json; charset=utf-8`.
    Json,
    /// `application/x-www-form-urlencoded`.
    FormUrlEncoded,
    /// `text/plain; charset=utf-8`.
    PlainText,
    /// `text/xml; charset=utf-8`.
    Xml,
}

impl ContentType {
    /// Get the header value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "application/json; charset=utf-8",
            Self::FormUrlEncoded => "application/x-www-form-urlencoded",
            Self::PlainText => "text/plain; charset=utf-8",
            Self::Xml => "text/xml; charset=utf-8",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Serialize a value to JSON bytes.
///
/// # Example
///
/// ```
/// use quill_core::to_json;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct User { name: String }
///
/// let user = User { name: "Alice".to_string() };
/// let bytes = to_json(&user).expect("serialize");
/// assert_eq!(bytes.as_ref(), br#"{"name":"Alice"}"#);
/// ```
pub fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<Bytes> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(Into::into)
}

/// Check that bytes hold a single JSON document and return them unchanged.
///
/// Empty input is emitted as `null`.
///
/// # Example
///
/// ```
/// use quill_core::validate_json;
///
/// let bytes = validate_json(br#"{"a":1}"#).expect("valid");
/// assert_eq!(bytes.as_ref(), br#"{"a":1}"#);
/// assert!(validate_json(b"{").is_err());
/// ```
pub fn validate_json(raw: &[u8]) -> Result<Bytes> {
    if raw.is_empty() {
        return Ok(Bytes::from_static(b"null"));
    }
    serde_json::from_slice::<IgnoredAny>(raw)?;
    Ok(Bytes::copy_from_slice(raw))
}

/// Serialize a value to an XML document.
pub fn to_xml<T: serde::Serialize>(value: &T) -> Result<Bytes> {
    serde_xml_rs::to_string(value)
        .map(Bytes::from)
        .map_err(Into::into)
}

/// Serialize form fields to URL-encoded bytes.
///
/// Repeated values become repeated fields (`tags=a&tags=b`).
///
/// # Example
///
/// ```
/// use quill_core::{FormValues, to_form};
///
/// let mut form = FormValues::new();
/// form.insert("name".to_string(), vec!["Alice Doe".to_string()]);
/// form.insert("tags".to_string(), vec!["a".to_string(), "b".to_string()]);
///
/// let bytes = to_form(&form).expect("serialize");
/// assert_eq!(bytes.as_ref(), b"name=Alice+Doe&tags=a&tags=b");
/// ```
pub fn to_form(form: &FormValues) -> Result<Bytes> {
    let pairs: Vec<(&str, &str)> = form
        .iter()
        .flat_map(|(name, values)| values.iter().map(move |value| (name.as_str(), value.as_str())))
        .collect();
    serde_html_form::to_string(&pairs)
        .map(|s| Bytes::from(s.into_bytes()))
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_as_str() {
        assert_eq!(ContentType::Json.as_str(), "application/json; charset=utf-8");
        assert_eq!(
            ContentType::FormUrlEncoded.as_str(),
            "application/x-www-form-urlencoded"
        );
        assert_eq!(ContentType::PlainText.as_str(), "text/plain; charset=utf-8");
        assert_eq!(ContentType::Xml.to_string(), "text/xml; charset=utf-8");
    }

    #[test]
    fn to_json_serialize() {
        #[derive(serde::Serialize)]
        struct User {
            name: String,
            age: u32,
        }

        let user = User {
            name: "Alice".to_string(),
            age: 30,
        };

        let bytes = to_json(&user).expect("serialize");
        assert_eq!(bytes.as_ref(), br#"{"name":"Alice","age":30}"#);
    }

    #[test]
    fn validate_json_keeps_bytes() {
        let raw = br#"{ "a" : [1, 2] }"#;
        let bytes = validate_json(raw).expect("valid");
        assert_eq!(bytes.as_ref(), raw);
    }

    #[test]
    fn validate_json_empty_is_null() {
        assert_eq!(validate_json(b"").expect("empty").as_ref(), b"null");
    }

    #[test]
    fn validate_json_rejects_garbage() {
        let err = validate_json(b"not json").expect_err("invalid");
        assert!(err.is_serialization());

        let err = validate_json(b"{} {}").expect_err("trailing");
        assert!(err.is_serialization());
    }

    #[test]
    fn to_xml_serialize() {
        #[derive(serde::Serialize)]
        #[serde(rename = "user")]
        struct User {
            name: String,
        }

        let bytes = to_xml(&User {
            name: "Alice".to_string(),
        })
        .expect("serialize");
        let xml = String::from_utf8(bytes.to_vec()).expect("utf8");
        assert!(xml.contains("<user>"), "unexpected XML: {xml}");
        assert!(xml.contains("<name>Alice</name>"), "unexpected XML: {xml}");
    }

    #[test]
    fn to_form_empty() {
        assert!(to_form(&FormValues::new()).expect("serialize").is_empty());
    }
}
