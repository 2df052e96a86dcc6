//! Contains the Error and Result type used by the crate.

use std::fmt;

use crate::TagType;

/// Various errors that can occur while reading or writing NBT.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    msg: String,
    kind: ErrorKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The input ran out of bytes part way through a value.
    EndOfStream,

    /// The input is structurally malformed: an unknown tag type, a negative
    /// length, a root that is not a Compound, and so on.
    InvalidFormat,

    /// The API was used out of order, eg. reading a value that is not there
    /// or closing a container that was never opened.
    InvalidOperation,

    /// A streaming reader hit an error earlier and cannot be used any more.
    InvalidReaderState,

    /// An argument broke a precondition, eg. a duplicate name in a compound.
    Argument,

    /// A numeric argument was outside of its allowed range.
    ArgumentOutOfRange,

    /// A fixed-size buffer would have had to grow.
    BufferNotExpandable,

    /// A seek would have moved before the start of the buffer.
    SeekBeforeBegin,

    /// Compressed data could not be inflated or deflated.
    Compression,

    /// Any other IO error, eg. from the file system.
    Io,
}

impl Error {
    /// Get the kind of error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Get the message describing the error.
    pub fn message(&self) -> &str {
        &self.msg
    }

    pub fn is_eof(&self) -> bool {
        self.kind == ErrorKind::EndOfStream
    }

    /// Errors that mean the bytes being decoded are bad or incomplete, as
    /// opposed to the API being misused.
    pub(crate) fn is_decode_error(&self) -> bool {
        matches!(self.kind, ErrorKind::EndOfStream | ErrorKind::InvalidFormat)
    }

    pub(crate) fn new(kind: ErrorKind, msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            kind,
        }
    }

    pub(crate) fn end_of_stream() -> Self {
        Self::new(ErrorKind::EndOfStream, "unexpected end of stream")
    }

    pub(crate) fn invalid_format(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidFormat, msg)
    }

    pub(crate) fn invalid_tag_type(t: u8) -> Self {
        Self::invalid_format(format!("NBT tag type out of range: {}", t))
    }

    pub(crate) fn negative_length(len: i32) -> Self {
        Self::invalid_format(format!("Negative tag length given: {}", len))
    }

    pub(crate) fn too_deep(max: usize) -> Self {
        Self::invalid_format(format!("NBT nested deeper than {} levels", max))
    }

    pub(crate) fn unsupported_tag_type(t: TagType) -> Self {
        Self::invalid_format(format!("Unsupported tag type found: {}", t))
    }

    pub(crate) fn invalid_operation(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidOperation, msg)
    }

    pub(crate) fn invalid_reader_state() -> Self {
        Self::new(
            ErrorKind::InvalidReaderState,
            "NbtReader is in an erroneous state!",
        )
    }

    pub(crate) fn argument(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Argument, msg)
    }

    pub(crate) fn out_of_range(arg: &str, msg: impl fmt::Display) -> Self {
        Self::new(ErrorKind::ArgumentOutOfRange, format!("{}: {}", arg, msg))
    }

    pub(crate) fn not_expandable() -> Self {
        Self::new(
            ErrorKind::BufferNotExpandable,
            "buffer is backed by a fixed array and cannot grow",
        )
    }

    pub(crate) fn seek_before_begin() -> Self {
        Self::new(
            ErrorKind::SeekBeforeBegin,
            "attempted to seek before the start of the buffer",
        )
    }

    pub(crate) fn compression(e: std::io::Error) -> Self {
        Self::new(ErrorKind::Compression, e.to_string())
    }
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.msg)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::UnexpectedEof => Self::end_of_stream(),
            _ => Self::new(ErrorKind::Io, e.to_string()),
        }
    }
}

/// Convenience type for Result.
pub type Result<T> = std::result::Result<T, Error>;
