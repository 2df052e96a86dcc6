//! streamnbt is a codec for the NBT (Named Binary Tag) format, the typed,
//! tree-structured binary format used by Minecraft saves and network data.
//!
//! There are three ways in and out of the format:
//!
//! * [`NbtFile`] loads and saves complete trees, handling GZip/Zlib
//!   compression. Loading materializes the data into [`Tag`] values, optionally
//!   pruning subtrees with a skip predicate.
//! * [`NbtReader`] walks the bytes of a stream forward-only, without building a
//!   tree. It can skip whole subtrees, read single values, or materialize just
//!   the part of the tree the caller is interested in.
//! * [`NbtWriter`] emits a stream call by call and refuses any call that would
//!   make the output structurally invalid, before any byte is written.
//!
//! All of these sit on a [`Buffer`], an in-memory seekable byte store, and the
//! [`binary`] primitives which handle endianness and string encoding.
//!
//! # Example
//!
//! ```
//! use streamnbt::{Buffer, NbtReader, NbtWriter, TagType, Value};
//!
//! # fn main() -> streamnbt::Result<()> {
//! let mut buf = Buffer::new();
//! let mut writer = NbtWriter::new(&mut buf, "hello world")?;
//! writer.write_named_string("name", "Bananarama")?;
//! writer.end_compound()?;
//! writer.finish()?;
//!
//! assert_eq!(buf.len(), 34);
//!
//! buf.set_position(0)?;
//! let mut reader = NbtReader::new(&mut buf);
//! assert!(reader.advance_to_named("name")?);
//! assert_eq!(reader.tag_type(), TagType::String);
//! assert_eq!(reader.read_value()?, Value::String("Bananarama".to_owned()));
//! # Ok(())
//! # }
//! ```

use std::convert::TryFrom;
use std::fmt;

use serde::Serialize;

pub mod binary;
pub mod buffer;
pub mod error;
pub mod file;
pub mod reader;
pub mod tag;
pub mod writer;

pub use buffer::{Buffer, SeekOrigin};
pub use error::{Error, ErrorKind, Result};
pub use file::{Compression, NbtFile};
pub use reader::{ListElement, NbtReader, ParseState};
pub use tag::{Compound, List, Tag, TagInfo, Value};
pub use writer::NbtWriter;

#[cfg(test)]
mod test;

/// The kind of an NBT tag, and the byte used for it on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum TagType {
    /// Marks the end of a Compound.
    End = 0,
    /// Equivalent to i8.
    Byte = 1,
    /// Equivalent to i16.
    Short = 2,
    /// Equivalent to i32.
    Int = 3,
    /// Equivalent to i64.
    Long = 4,
    /// Equivalent to f32.
    Float = 5,
    /// Equivalent to f64.
    Double = 6,
    /// Length-prefixed array of Byte (i8).
    ByteArray = 7,
    /// Length-prefixed UTF-8 string.
    String = 8,
    /// Homogeneous list of unnamed payloads.
    List = 9,
    /// Collection of uniquely named tags.
    Compound = 10,
    /// Length-prefixed array of Int (i32).
    IntArray = 11,
    /// Length-prefixed array of Long (i64).
    LongArray = 12,
    /// Element type of an empty list whose type has not been decided yet.
    /// Only exists in memory, it is never written.
    Unknown = 0xFF,
}

impl TagType {
    /// Whether a tag of this kind carries a value that can be read directly,
    /// ie. it is not a container and not End.
    pub fn has_value(self) -> bool {
        !matches!(
            self,
            TagType::End | TagType::List | TagType::Compound | TagType::Unknown
        )
    }

    /// Whether a tag of this kind is prefixed with an element count.
    pub fn has_length(self) -> bool {
        matches!(
            self,
            TagType::ByteArray | TagType::IntArray | TagType::LongArray | TagType::List
        )
    }

    pub fn is_container(self) -> bool {
        matches!(self, TagType::List | TagType::Compound)
    }
}

impl TryFrom<u8> for TagType {
    type Error = ();

    fn try_from(value: u8) -> std::result::Result<Self, ()> {
        use TagType::*;
        Ok(match value {
            0 => End,
            1 => Byte,
            2 => Short,
            3 => Int,
            4 => Long,
            5 => Float,
            6 => Double,
            7 => ByteArray,
            8 => String,
            9 => List,
            10 => Compound,
            11 => IntArray,
            12 => LongArray,
            13..=u8::MAX => return Err(()),
        })
    }
}

impl From<TagType> for u8 {
    fn from(tag: TagType) -> Self {
        tag as u8
    }
}

impl fmt::Display for TagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TagType::End => "TAG_End",
            TagType::Byte => "TAG_Byte",
            TagType::Short => "TAG_Short",
            TagType::Int => "TAG_Int",
            TagType::Long => "TAG_Long",
            TagType::Float => "TAG_Float",
            TagType::Double => "TAG_Double",
            TagType::ByteArray => "TAG_Byte_Array",
            TagType::String => "TAG_String",
            TagType::List => "TAG_List",
            TagType::Compound => "TAG_Compound",
            TagType::IntArray => "TAG_Int_Array",
            TagType::LongArray => "TAG_Long_Array",
            TagType::Unknown => "TAG_Unknown",
        };
        f.write_str(name)
    }
}

/// Byte order of the fixed-width numbers in a stream. Java edition data is
/// big-endian, Bedrock edition data is little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endianness {
    #[default]
    Big,
    Little,
}
