//! Built-in encoders, one per [`Param`](quill_core::Param) variant.
//!
//! Each encoder recognizes exactly one variant and delegates everything else
//! down the chain. Body encoders set a default Content-Type only when the
//! request has none, so a Content-Type set earlier in the same parameter list
//! wins.
//!
//! | Encoder | Variant | Default Content-Type |
//! |---------|---------|----------------------|
//! | [`PathEncoder`] | `Path` | |
//! | [`QueryEncoder`] | `Query` | |
//! | [`HeaderEncoder`] | `Header` | |
//! | [`FormEncoder`] | `Form` | `application/x-www-form-urlencoded` |
//! | [`JsonEncoder`] | `Json` | `application/json; charset=utf-8` |
//! | [`CookieEncoder`] | `Cookie` | |
//! | [`BasicAuthEncoder`] | `User` | |
//! | [`MultiPartEncoder`] | `MultiPart` | `multipart/form-data; boundary=...` |
//! | [`TextEncoder`] | `Text` | `text/plain; charset=utf-8` |
//! | [`XmlEncoder`] | `Xml` | `text/xml; charset=utf-8` |
//! | [`MapperEncoder`] | `Mapper` | |

mod basic_auth;
mod cookie;
mod form;
mod header;
mod json;
mod mapper;
mod multipart;
mod path;
mod query;
mod text;
mod xml;

pub use basic_auth::BasicAuthEncoder;
pub use cookie::CookieEncoder;
pub use form::FormEncoder;
pub use header::HeaderEncoder;
pub use json::JsonEncoder;
pub use mapper::MapperEncoder;
pub use multipart::MultiPartEncoder;
pub use path::{PathEncoder, PathMode};
pub use query::QueryEncoder;
pub use text::TextEncoder;
pub use xml::XmlEncoder;

use quill_core::{EncoderChain, Request, Result};

use crate::EncoderConfig;

/// Builds the default chain for a configuration.
///
/// Registration order: path, query, header, form, json, cookie, basic auth,
/// multipart, text, xml, mapper.
#[must_use]
pub fn default_chain(config: &EncoderConfig) -> EncoderChain {
    let content_type = config.default_content_types;
    let mut chain = EncoderChain::new();
    chain
        .add(PathEncoder::new(config.path_mode))
        .add(QueryEncoder)
        .add(HeaderEncoder)
        .add(FormEncoder::new(content_type))
        .add(JsonEncoder::new(content_type))
        .add(CookieEncoder)
        .add(BasicAuthEncoder)
        .add(MultiPartEncoder::new(content_type))
        .add(TextEncoder::new(content_type))
        .add(XmlEncoder::new(content_type))
        .add(MapperEncoder);
    chain
}

fn default_content_type(request: &mut Request, enabled: bool, content_type: &str) -> Result<()> {
    if enabled {
        request.set_default_content_type(content_type)?;
    }
    Ok(())
}
