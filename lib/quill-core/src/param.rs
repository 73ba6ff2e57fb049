//! Parameter variants accepted by the encoder chain.
//!
//! A caller describes an outgoing request as an ordered list of [`Param`]s.
//! Each variant targets one part of the request: path placeholders, query
//! string, headers, form body, JSON or XML body, cookies, basic auth,
//! multipart body, plain text body, or a raw mutation callback.
//!
//! # Example
//!
//! ```
//! use quill_core::{Header, Json, Param, Path, Query};
//!
//! let params: Vec<Param> = vec![
//!     Path::new().with("id", 42).into(),
//!     Query::new().with("tags", vec!["a", "b"]).into(),
//!     Header::new().with("X-Trace", "on").into(),
//!     Json::raw(r#"{"name":"Alice"}"#).into(),
//! ];
//!
//! assert_eq!(params[0].kind(), "path");
//! assert_eq!(params[3].kind(), "json");
//! ```

use std::fmt;
use std::ops::{Deref, DerefMut};

use derive_more::From;
use indexmap::IndexMap;

use crate::{Json, MultiPart, Request, Value, Xml};

/// Insertion-ordered map of parameter names to values.
pub type ParamMap = IndexMap<String, Value>;

macro_rules! param_map {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name(ParamMap);

        impl $name {
            /// Creates an empty map.
            #[must_use]
            pub fn new() -> Self {
                Self::default()
            }

            /// Adds an entry, returning the map.
            #[must_use]
            pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
                self.0.insert(key.into(), value.into());
                self
            }

            /// Consumes into the underlying map.
            #[must_use]
            pub fn into_inner(self) -> ParamMap {
                self.0
            }
        }

        impl Deref for $name {
            type Target = ParamMap;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl DerefMut for $name {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.0
            }
        }

        impl From<ParamMap> for $name {
            fn from(map: ParamMap) -> Self {
                Self(map)
            }
        }

        impl<K, V> FromIterator<(K, V)> for $name
        where
            K: Into<String>,
            V: Into<Value>,
        {
            fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
                Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
            }
        }

        impl<K, V, const N: usize> From<[(K, V); N]> for $name
        where
            K: Into<String>,
            V: Into<Value>,
        {
            fn from(entries: [(K, V); N]) -> Self {
                entries.into_iter().collect()
            }
        }
    };
}

param_map! {
    /// Values substituted into `:name` placeholders of the URL path.
    Path
}

param_map! {
    /// Query string entries; lists expand into repeated keys.
    Query
}

param_map! {
    /// Header values appended to the request.
    Header
}

param_map! {
    /// URL-encoded form fields; lists expand into repeated fields.
    Form
}

param_map! {
    /// Cookies added to the `Cookie` header.
    Cookie
}

/// Basic authentication credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    /// User name.
    pub name: String,
    /// Password.
    pub password: String,
}

impl User {
    /// Creates a credential pair.
    #[must_use]
    pub fn new(name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("name", &self.name)
            .field("password", &"***")
            .finish()
    }
}

/// Callback with unrestricted access to the request.
pub struct Mapper(Box<dyn Fn(&mut Request)>);

impl Mapper {
    /// Wraps a callback.
    pub fn new(mapper: impl Fn(&mut Request) + 'static) -> Self {
        Self(Box::new(mapper))
    }

    /// Invokes the callback.
    pub fn apply(&self, request: &mut Request) {
        (self.0)(request);
    }
}

impl fmt::Debug for Mapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Mapper(..)")
    }
}

/// One typed parameter of an outgoing request.
#[derive(Debug, From)]
pub enum Param {
    /// Path placeholder values.
    Path(Path),
    /// Query string entries.
    Query(Query),
    /// Additional headers.
    Header(Header),
    /// URL-encoded form body.
    Form(Form),
    /// JSON body.
    Json(Json),
    /// Cookies.
    Cookie(Cookie),
    /// Basic authentication.
    User(User),
    /// Multipart body.
    MultiPart(MultiPart),
    /// Plain text body.
    Text(String),
    /// XML body.
    Xml(Xml),
    /// Raw request mutation.
    Mapper(Mapper),
}

impl Param {
    /// Stable name of the variant.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Path(_) => "path",
            Self::Query(_) => "query",
            Self::Header(_) => "header",
            Self::Form(_) => "form",
            Self::Json(_) => "json",
            Self::Cookie(_) => "cookie",
            Self::User(_) => "user",
            Self::MultiPart(_) => "multipart",
            Self::Text(_) => "text",
            Self::Xml(_) => "xml",
            Self::Mapper(_) => "mapper",
        }
    }

    /// Wraps a callback as a [`Param::Mapper`].
    pub fn mapper(mapper: impl Fn(&mut Request) + 'static) -> Self {
        Self::Mapper(Mapper::new(mapper))
    }
}

impl From<&str> for Param {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn param_map_builder_keeps_order() {
        let query = Query::new().with("b", 1).with("a", "x").with("c", true);
        let keys: Vec<&str> = query.keys().map(String::as_str).collect();
        assert_eq!(keys, ["b", "a", "c"]);
        assert_eq!(query.get("a"), Some(&Value::from("x")));
    }

    #[test]
    fn param_map_from_array() {
        let path = Path::from([("id", 42), ("page", 2)]);
        assert_eq!(path.len(), 2);
        assert_eq!(path.get("id"), Some(&Value::I32(42)));
    }

    #[test]
    fn param_kind() {
        assert_eq!(Param::from(Path::new()).kind(), "path");
        assert_eq!(Param::from(Query::new()).kind(), "query");
        assert_eq!(Param::from(Header::new()).kind(), "header");
        assert_eq!(Param::from(Form::new()).kind(), "form");
        assert_eq!(Param::from(Cookie::new()).kind(), "cookie");
        assert_eq!(Param::from(User::new("u", "p")).kind(), "user");
        assert_eq!(Param::from("hello").kind(), "text");
        assert_eq!(Param::from(String::from("hello")).kind(), "text");
        assert_eq!(Param::mapper(|_| {}).kind(), "mapper");
    }

    #[test]
    fn user_debug_hides_password() {
        let debug = format!("{:?}", User::new("alice", "secret"));
        assert!(debug.contains("alice"));
        assert!(!debug.contains("secret"));
    }

    #[test]
    fn mapper_applies_callback() {
        let mapper = Mapper::new(|request| request.set_body("mapped"));
        let mut request =
            Request::parse(http::Method::POST, "https://api.example.com").expect("valid URL");
        mapper.apply(&mut request);
        assert_eq!(request.body(), Some(&bytes::Bytes::from("mapped")));
    }
}
