//! Multipart form data support for file uploads.
//!
//! [`MultiPart`] is the parameter a caller supplies; [`MultipartWriter`]
//! streams it into a buffer. The writer writes the closing boundary when it is
//! closed or dropped, so every exit path produces a terminated body.
//!
//! # Example
//!
//! ```
//! use quill_core::{FileHandle, MultipartWriter};
//!
//! let mut body = Vec::new();
//! {
//!     let mut writer = MultipartWriter::with_boundary(&mut body, "b0undary");
//!     writer.write_field("name", "John Doe").expect("field");
//!     let avatar = FileHandle::from_bytes("photo.png", vec![0x89, 0x50]);
//!     writer.write_file("avatar", avatar.name(), &avatar).expect("file");
//! }
//!
//! assert!(body.ends_with(b"\r\n--b0undary--\r\n"));
//! ```

use std::cell::RefCell;
use std::fmt;
use std::io::{self, Cursor, Read, Write};

use bytes::Bytes;
use indexmap::IndexMap;
use tracing::warn;

use crate::{Result, Value};

/// A named readable byte stream uploaded as a multipart file part.
pub struct FileHandle {
    name: String,
    reader: RefCell<Box<dyn Read>>,
}

impl FileHandle {
    /// Wraps a reader under the given name.
    pub fn new(name: impl Into<String>, reader: impl Read + 'static) -> Self {
        Self {
            name: name.into(),
            reader: RefCell::new(Box::new(reader)),
        }
    }

    /// In-memory file content.
    pub fn from_bytes(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self::new(name, Cursor::new(data.into()))
    }

    /// Opens a file on disk, named after its file name.
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let name = path.file_name().map_or_else(
            || path.display().to_string(),
            |name| name.to_string_lossy().into_owned(),
        );
        Ok(Self::new(name, file))
    }

    /// Handle name, used as the part filename.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Streams the remaining content into `writer`.
    pub fn copy_to<W: Write + ?Sized>(&self, writer: &mut W) -> Result<u64> {
        let mut reader = self
            .reader
            .try_borrow_mut()
            .map_err(|_| io::Error::other(format!("file `{}` is already being read", self.name)))?;
        Ok(io::copy(&mut *reader, writer)?)
    }
}

impl fmt::Debug for FileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileHandle")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A multipart entry: a plain field or a file.
#[derive(Debug)]
pub enum MultiPartValue {
    /// Form field, scalar-converted.
    Field(Value),
    /// File part.
    File(FileHandle),
}

impl From<FileHandle> for MultiPartValue {
    fn from(file: FileHandle) -> Self {
        Self::File(file)
    }
}

impl From<Value> for MultiPartValue {
    fn from(value: Value) -> Self {
        Self::Field(value)
    }
}

/// Multipart body fields and files, in insertion order.
#[derive(Debug, Default)]
pub struct MultiPart(IndexMap<String, MultiPartValue>);

impl MultiPart {
    /// Creates an empty multipart parameter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a form field.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0
            .insert(name.into(), MultiPartValue::Field(value.into()));
        self
    }

    /// Adds a file.
    #[must_use]
    pub fn file(mut self, name: impl Into<String>, file: FileHandle) -> Self {
        self.0.insert(name.into(), MultiPartValue::File(file));
        self
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MultiPartValue)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Streaming `multipart/form-data` writer.
///
/// The closing boundary is written by [`MultipartWriter::close`], or on drop
/// if the writer was not closed explicitly.
pub struct MultipartWriter<'a, W: Write> {
    inner: &'a mut W,
    boundary: String,
    has_parts: bool,
    closed: bool,
}

impl<'a, W: Write> MultipartWriter<'a, W> {
    /// Creates a writer with a generated boundary.
    pub fn new(inner: &'a mut W) -> Self {
        Self::with_boundary(inner, generate_boundary())
    }

    /// Creates a writer with a custom boundary.
    ///
    /// The boundary should be a unique string that doesn't appear in any part data.
    pub fn with_boundary(inner: &'a mut W, boundary: impl Into<String>) -> Self {
        Self {
            inner,
            boundary: boundary.into(),
            has_parts: false,
            closed: false,
        }
    }

    /// Get the boundary string.
    #[must_use]
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Returns `multipart/form-data; boundary=<boundary>`.
    #[must_use]
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Returns `true` once the closing boundary is written.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    /// Writes a form field part.
    pub fn write_field(&mut self, name: &str, value: &str) -> Result<()> {
        let disposition = format!("form-data; name=\"{}\"", escape_quotes(name));
        self.begin_part(&disposition, None)?;
        self.inner.write_all(value.as_bytes())?;
        Ok(())
    }

    /// Writes a file part, streaming the handle's content.
    pub fn write_file(&mut self, name: &str, filename: &str, file: &FileHandle) -> Result<u64> {
        let disposition = format!(
            "form-data; name=\"{}\"; filename=\"{}\"",
            escape_quotes(name),
            escape_quotes(filename)
        );
        self.begin_part(&disposition, Some(guess_content_type(filename)))?;
        file.copy_to(&mut *self.inner)
    }

    /// Writes the closing boundary. Closing twice is a no-op.
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        let prefix = if self.has_parts { "\r\n" } else { "" };
        write!(self.inner, "{prefix}--{}--\r\n", self.boundary)?;
        Ok(())
    }

    fn begin_part(&mut self, disposition: &str, content_type: Option<&str>) -> Result<()> {
        if self.closed {
            return Err(io::Error::other("multipart writer is closed").into());
        }
        let prefix = if self.has_parts { "\r\n" } else { "" };
        self.has_parts = true;

        write!(self.inner, "{prefix}--{}\r\n", self.boundary)?;
        write!(self.inner, "Content-Disposition: {disposition}\r\n")?;
        if let Some(content_type) = content_type {
            write!(self.inner, "Content-Type: {content_type}\r\n")?;
        }
        self.inner.write_all(b"\r\n")?;
        Ok(())
    }
}

impl<W: Write> Drop for MultipartWriter<'_, W> {
    fn drop(&mut self) {
        if let Err(err) = self.close() {
            warn!(boundary = %self.boundary, error = %err, "failed to close multipart writer");
        }
    }
}

impl<W: Write> fmt::Debug for MultipartWriter<'_, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultipartWriter")
            .field("boundary", &self.boundary)
            .field("has_parts", &self.has_parts)
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}

fn escape_quotes(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Guess the content type from a filename extension.
fn guess_content_type(filename: &str) -> &'static str {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        "html" | "htm" => "text/html",
        "csv" => "text/csv",
        "json" => "application/json",
        "xml" => "application/xml",
        "zip" => "application/zip",
        "gz" | "gzip" => "application/gzip",
        _ => "application/octet-stream",
    }
}

/// Generate a boundary string.
fn generate_boundary() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);

    format!("----QuillBoundary{timestamp:x}")
}
