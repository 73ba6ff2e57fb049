//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types for easy glob
//! importing:
//!
//! ```
//! use quill::prelude::*;
//! ```

pub use crate::{
    Cookie, Encoder, EncoderChain, EncoderConfig, Error, FileHandle, Form, Header, Json, Method,
    MultiPart, Outcome, Param, ParamEncoder, Path, PathMode, Query, Request, RequestContext,
    Response, Result, ScalarMode, StatusCode, Transport, User, Value, Xml,
};
