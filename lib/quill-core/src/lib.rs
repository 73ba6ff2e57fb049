//! Core types and dispatch chain for quill.
//!
//! This crate provides the foundational types used by quill:
//! - [`Param`] - the typed parameters a caller hands over, one variant per request part
//! - [`Value`] and [`ScalarMode`] - dynamic scalar values and their string conversion
//! - [`Request`] and [`RequestBuilder`] - the outgoing request encoders mutate
//! - [`Response`] - a prior response a context may carry
//! - [`RequestContext`] - per-call state shared along the chain
//! - [`Encoder`] and [`EncoderChain`] - type-directed dispatch
//! - [`MultipartWriter`] - streaming `multipart/form-data` bodies
//! - [`Transport`] - the seam to an HTTP client
//! - [`Error`] and [`Result`] - error handling
//!
//! The built-in encoders and the driver live in the `quill` crate.

mod body;
mod chain;
mod context;
mod error;
mod multipart;
mod param;
mod payload;
pub mod prelude;
mod request;
mod response;
mod transport;
mod value;

pub use body::{ContentType, to_form, to_json, to_xml, validate_json};
pub use chain::{Encoder, EncoderChain, Outcome};
pub use context::RequestContext;
pub use error::{Error, Result};
pub use multipart::{FileHandle, MultiPart, MultiPartValue, MultipartWriter};
pub use param::{Cookie, Form, Header, Mapper, Param, ParamMap, Path, Query, User};
pub use payload::{Json, JsonPayload, Xml, XmlPayload};
pub use request::{FormValues, Request, RequestBuilder};
pub use response::Response;
pub use transport::Transport;
pub use value::{ScalarMode, Value, encode_scalar};

// Re-export http crate types for methods, status codes and headers
pub use http::{Method, StatusCode, header};
