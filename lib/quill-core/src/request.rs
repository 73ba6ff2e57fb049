//! The outgoing HTTP request mutated by encoders.
//!
//! A [`Request`] is created once per outgoing call and handed to the encoder
//! chain, which mutates its URL, headers, parsed form and body in place.
//!
//! # Example
//!
//! ```
//! use quill_core::Request;
//!
//! let mut request = Request::parse(http::Method::GET, "https://api.example.com/users/:id")
//!     .expect("valid URL");
//! request.append_header("Accept", "application/json").expect("valid header");
//! request.add_cookie("session", "abc").expect("valid cookie");
//!
//! assert_eq!(request.path(), "/users/:id");
//! assert_eq!(request.header("cookie"), Some("session=abc"));
//! ```

use base64::Engine;
use bytes::Bytes;
use http::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, HeaderMap, HeaderName, HeaderValue};
use indexmap::IndexMap;
use url::Url;

use crate::Result;

/// Parsed form fields, in insertion order, each with its repeated values.
pub type FormValues = IndexMap<String, Vec<String>>;

/// An outgoing HTTP request.
#[derive(Debug, Clone)]
pub struct Request {
    method: http::Method,
    url: Url,
    headers: HeaderMap,
    post_form: FormValues,
    body: Option<Bytes>,
}

impl Request {
    /// Creates a request with no headers and no body.
    #[must_use]
    pub fn new(method: http::Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            post_form: FormValues::new(),
            body: None,
        }
    }

    /// Creates a request from a URL string.
    pub fn parse(method: http::Method, url: &str) -> Result<Self> {
        let url = Url::parse(url)?;
        Ok(Self::new(method, url))
    }

    /// Creates a new [`RequestBuilder`].
    #[must_use]
    pub fn builder(method: http::Method, url: Url) -> RequestBuilder {
        RequestBuilder::new(method, url)
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> &http::Method {
        &self.method
    }

    /// Request URL.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Mutable access to the URL.
    #[must_use]
    pub fn url_mut(&mut self) -> &mut Url {
        &mut self.url
    }

    /// URL path.
    #[must_use]
    pub fn path(&self) -> &str {
        self.url.path()
    }

    /// Replaces the URL path.
    pub fn set_path(&mut self, path: &str) {
        self.url.set_path(path);
    }

    /// URL query string, if any.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.url.query()
    }

    /// Appends a query parameter, keeping existing ones.
    pub fn append_query(&mut self, name: &str, value: &str) {
        self.url.query_pairs_mut().append_pair(name, value);
    }

    /// Request headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Mutable access to headers.
    #[must_use]
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// First value of a header, if present and valid UTF-8.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// All values of a header, in insertion order.
    #[must_use]
    pub fn header_values(&self, name: &str) -> Vec<&str> {
        self.headers
            .get_all(name)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect()
    }

    /// Adds a header value without replacing existing values for the name.
    pub fn append_header(&mut self, name: &str, value: &str) -> Result<()> {
        let name = HeaderName::from_bytes(name.as_bytes())?;
        let value = HeaderValue::from_str(value)?;
        self.headers.append(name, value);
        Ok(())
    }

    /// Sets a header, replacing any existing values.
    pub fn set_header(&mut self, name: &str, value: &str) -> Result<()> {
        let name = HeaderName::from_bytes(name.as_bytes())?;
        let value = HeaderValue::from_str(value)?;
        self.headers.insert(name, value);
        Ok(())
    }

    /// Content type, if set.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.header(CONTENT_TYPE.as_str())
    }

    /// Sets the content type only if none is set yet.
    ///
    /// Returns `true` if the header was written.
    pub fn set_default_content_type(&mut self, content_type: &str) -> Result<bool> {
        if self.headers.contains_key(CONTENT_TYPE) {
            return Ok(false);
        }
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_str(content_type)?);
        Ok(true)
    }

    /// Adds a cookie to the `Cookie` header, joining with `; `.
    ///
    /// Name bytes outside the token set become `-`. Value bytes that cannot
    /// appear in a cookie (`;`, `"`, `\`, controls, non-ASCII) are dropped, and
    /// a value containing a space or comma is quoted. The existing header is
    /// kept byte for byte.
    pub fn add_cookie(&mut self, name: &str, value: &str) -> Result<()> {
        let pair = format!(
            "{}={}",
            sanitize_cookie_name(name),
            sanitize_cookie_value(value)
        );
        let mut cookie = match self.headers.get(COOKIE).map(HeaderValue::as_bytes) {
            Some(existing) if !existing.is_empty() => {
                let mut cookie = existing.to_vec();
                cookie.extend_from_slice(b"; ");
                cookie
            }
            _ => Vec::new(),
        };
        cookie.extend_from_slice(pair.as_bytes());
        self.headers.insert(COOKIE, HeaderValue::from_bytes(&cookie)?);
        Ok(())
    }

    /// Cookies sent by this request, as `(name, value)` pairs.
    #[must_use]
    pub fn cookies(&self) -> Vec<(&str, &str)> {
        self.header_values(COOKIE.as_str())
            .into_iter()
            .flat_map(|header| header.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .collect()
    }

    /// Sets HTTP Basic authentication, overwriting any `Authorization` header.
    pub fn set_basic_auth(&mut self, username: &str, password: &str) -> Result<()> {
        let credentials = format!("{username}:{password}");
        let encoded = base64::engine::general_purpose::STANDARD.encode(credentials);
        let value = HeaderValue::from_str(&format!("Basic {encoded}"))?;
        self.headers.insert(AUTHORIZATION, value);
        Ok(())
    }

    /// Decoded Basic authentication credentials, if present.
    #[must_use]
    pub fn basic_auth(&self) -> Option<(String, String)> {
        let encoded = self.header(AUTHORIZATION.as_str())?.strip_prefix("Basic ")?;
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .ok()?;
        let decoded = String::from_utf8(decoded).ok()?;
        let (username, password) = decoded.split_once(':')?;
        Some((username.to_string(), password.to_string()))
    }

    /// Parsed form fields.
    #[must_use]
    pub fn post_form(&self) -> &FormValues {
        &self.post_form
    }

    /// Mutable access to the parsed form fields.
    #[must_use]
    pub fn post_form_mut(&mut self) -> &mut FormValues {
        &mut self.post_form
    }

    /// Request body.
    #[must_use]
    pub const fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Replaces the request body.
    pub fn set_body(&mut self, body: impl Into<Bytes>) {
        self.body = Some(body.into());
    }

    /// Consume into (method, url, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (http::Method, Url, HeaderMap, Option<Bytes>) {
        (self.method, self.url, self.headers, self.body)
    }
}

fn sanitize_cookie_name(name: &str) -> String {
    name.bytes()
        .map(|b| {
            if b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b) {
                char::from(b)
            } else {
                '-'
            }
        })
        .collect()
}

fn sanitize_cookie_value(value: &str) -> String {
    let value: String = value
        .bytes()
        .filter(|&b| (0x20..0x7f).contains(&b) && !matches!(b, b'"' | b';' | b'\\'))
        .map(char::from)
        .collect();
    if value.contains([' ', ',']) {
        format!("\"{value}\"")
    } else {
        value
    }
}

/// Builder for constructing [`Request`] instances.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    request: Request,
    headers: Vec<(String, String)>,
}

impl RequestBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new(method: http::Method, url: Url) -> Self {
        Self {
            request: Request::new(method, url),
            headers: Vec::new(),
        }
    }

    /// Adds a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Appends a query parameter to the URL.
    #[must_use]
    pub fn query(mut self, name: &str, value: &str) -> Self {
        self.request.append_query(name, value);
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.request.set_body(body);
        self
    }

    /// Builds the [`Request`].
    ///
    /// # Errors
    ///
    /// Returns an error if a header name or value is invalid.
    pub fn build(self) -> Result<Request> {
        let mut request = self.request;
        for (name, value) in &self.headers {
            request.append_header(name, value)?;
        }
        Ok(request)
    }
}
