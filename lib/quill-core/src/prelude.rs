//! Prelude module for convenient imports.
//!
//! ```
//! use quill_core::prelude::*;
//! ```

pub use crate::{
    Cookie, Encoder, EncoderChain, Error, FileHandle, Form, Header, Json, MultiPart, Outcome,
    Param, Path, Query, Request, RequestContext, Response, Result, Transport, User, Value, Xml,
};
