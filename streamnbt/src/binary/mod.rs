//! Primitive encode/decode of the values NBT is built from: tag types,
//! fixed-width numbers, length-prefixed strings and raw byte runs.

mod reader;
mod writer;

pub use reader::BinaryReader;
pub use writer::BinaryWriter;

/// Size of the scratch space used when skipping or copying bytes in bulk.
pub(crate) const CHUNK_SIZE: usize = 8 * 1024;
