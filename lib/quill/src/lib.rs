//! Type-directed encoding of request parameters into HTTP requests.
//!
//! A caller describes an outgoing request as an ordered list of typed
//! [`Param`]s. [`ParamEncoder`] walks the list and hands each parameter to an
//! [`EncoderChain`]: the first encoder that recognizes the variant mutates the
//! request, the others delegate. Sending the request is left to a
//! [`Transport`].
//!
//! # Example
//!
//! ```
//! use quill::prelude::*;
//!
//! let encoder = ParamEncoder::default();
//! let mut request = Request::parse(Method::POST, "https://api.example.com/users/:id/avatar")
//!     .expect("url");
//!
//! let params: Vec<Param> = vec![
//!     Path::new().with("id", 42).into(),
//!     Cookie::new().with("session", "abc").into(),
//!     User::new("alice", "secret").into(),
//!     MultiPart::new()
//!         .field("caption", "me")
//!         .file("avatar", FileHandle::from_bytes("me.png", &b"PNG"[..]))
//!         .into(),
//! ];
//! encoder.encode(&mut request, &params)?;
//!
//! assert_eq!(request.path(), "/users/42/avatar");
//! assert_eq!(request.header("cookie"), Some("session=abc"));
//! assert!(request.content_type().is_some_and(|ct| ct.starts_with("multipart/form-data")));
//! # Ok::<(), quill::Error>(())
//! ```
//!
//! # Custom encoders
//!
//! Implement [`Encoder`] and register it with [`EncoderChain::add`];
//! registration order is dispatch priority. [`default_chain`] builds the
//! built-in chain to extend.

mod config;
mod encoders;
mod encoding;
pub mod prelude;

pub use config::{EncoderConfig, EncoderConfigBuilder};
pub use encoders::{
    BasicAuthEncoder, CookieEncoder, FormEncoder, HeaderEncoder, JsonEncoder, MapperEncoder,
    MultiPartEncoder, PathEncoder, PathMode, QueryEncoder, TextEncoder, XmlEncoder, default_chain,
};
pub use encoding::ParamEncoder;

// Re-export core types
pub use quill_core::{
    ContentType, Cookie, Encoder, EncoderChain, Error, FileHandle, Form, FormValues, Header, Json,
    JsonPayload, Mapper, MultiPart, MultiPartValue, MultipartWriter, Outcome, Param, ParamMap,
    Path, Query, Request, RequestBuilder, RequestContext, Response, Result, ScalarMode, Transport,
    User, Value, Xml, XmlPayload, encode_scalar,
};

// Re-export http types for methods, status codes and headers
pub use quill_core::{Method, StatusCode, header};
