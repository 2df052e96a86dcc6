use std::convert::TryFrom;

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use super::CHUNK_SIZE;
use crate::error::{Error, Result};
use crate::{Buffer, Endianness, TagType};

/// Encodes primitives into a [`Buffer`] in the configured byte order.
pub struct BinaryWriter<'a> {
    buf: &'a mut Buffer,
    endian: Endianness,
}

macro_rules! write_fixed {
    ($name:ident, $ty:ty, $size:literal) => {
        pub fn $name(&mut self, value: $ty) -> Result<()> {
            let mut bytes = [0u8; $size];
            match self.endian {
                Endianness::Big => BigEndian::$name(&mut bytes, value),
                Endianness::Little => LittleEndian::$name(&mut bytes, value),
            }
            self.buf.write(&bytes)
        }
    };
}

impl<'a> BinaryWriter<'a> {
    pub fn new(buf: &'a mut Buffer, endian: Endianness) -> Self {
        Self { buf, endian }
    }

    pub fn endianness(&self) -> Endianness {
        self.endian
    }

    /// Gets a reference to the underlying buffer.
    pub fn get_ref(&self) -> &Buffer {
        self.buf
    }

    /// Write a tag type byte. `Unknown` has no wire representation.
    pub fn write_tag_type(&mut self, tag: TagType) -> Result<()> {
        if tag == TagType::Unknown {
            return Err(Error::invalid_format("TAG_Unknown cannot be written"));
        }
        self.buf.write_byte(tag.into())
    }

    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.buf.write_byte(value)
    }

    pub fn write_i8(&mut self, value: i8) -> Result<()> {
        self.buf.write_byte(value as u8)
    }

    write_fixed!(write_i16, i16, 2);
    write_fixed!(write_i32, i32, 4);
    write_fixed!(write_i64, i64, 8);
    write_fixed!(write_f32, f32, 4);
    write_fixed!(write_f64, f64, 8);

    /// Write an element count as an i32.
    pub fn write_length(&mut self, len: usize) -> Result<()> {
        let len = i32::try_from(len).map_err(|_| Error::out_of_range("length", "too large"))?;
        self.write_i32(len)
    }

    /// Write a string as its i16 UTF-8 byte length followed by the bytes.
    pub fn write_str(&mut self, value: &str) -> Result<()> {
        let len = i16::try_from(value.len())
            .map_err(|_| Error::out_of_range("value", "string is too long to be written"))?;
        self.write_i16(len)?;
        self.buf.write(value.as_bytes())
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.buf.write(bytes)
    }

    pub fn write_i8_slice(&mut self, values: &[i8]) -> Result<()> {
        let mut chunk = Vec::with_capacity(values.len().min(CHUNK_SIZE));
        for part in values.chunks(CHUNK_SIZE) {
            chunk.clear();
            chunk.extend(part.iter().map(|&b| b as u8));
            self.buf.write(&chunk)?;
        }
        Ok(())
    }

    pub fn write_i32_slice(&mut self, values: &[i32]) -> Result<()> {
        for v in values {
            self.write_i32(*v)?;
        }
        Ok(())
    }

    pub fn write_i64_slice(&mut self, values: &[i64]) -> Result<()> {
        for v in values {
            self.write_i64(*v)?;
        }
        Ok(())
    }

    /// Copy `count` bytes from the cursor of `src`. Fails with `EndOfStream`
    /// before writing anything if `src` does not have that many bytes left.
    pub fn write_from_buffer(&mut self, src: &mut Buffer, count: usize) -> Result<()> {
        if src.remaining() < count {
            return Err(Error::end_of_stream());
        }

        let mut chunk = vec![0u8; count.min(CHUNK_SIZE)];
        let mut left = count;
        while left > 0 {
            let want = left.min(CHUNK_SIZE);
            let n = src.read(&mut chunk[..want]);
            if n == 0 {
                return Err(Error::end_of_stream());
            }
            self.buf.write(&chunk[..n])?;
            left -= n;
        }
        Ok(())
    }
}
