use std::convert::TryFrom;

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use log::trace;

use super::CHUNK_SIZE;
use crate::error::{Error, Result};
use crate::{Buffer, Endianness, TagType};

/// Decodes primitives from a [`Buffer`] in the configured byte order.
///
/// Every fixed-width read fails with `EndOfStream` if not enough bytes are
/// left. Strings that are not valid UTF-8 are decoded as Latin-1 instead,
/// since some producers store binary keys in string fields.
pub struct BinaryReader<'a> {
    buf: &'a mut Buffer,
    endian: Endianness,
    scratch: Vec<u8>,
}

macro_rules! read_fixed {
    ($(#[$meta:meta])* $name:ident, $ty:ty, $size:literal) => {
        $(#[$meta])*
        pub fn $name(&mut self) -> Result<$ty> {
            let bytes = self.read_array::<$size>()?;
            Ok(match self.endian {
                Endianness::Big => BigEndian::$name(&bytes),
                Endianness::Little => LittleEndian::$name(&bytes),
            })
        }
    };
}

impl<'a> BinaryReader<'a> {
    pub fn new(buf: &'a mut Buffer, endian: Endianness) -> Self {
        Self {
            buf,
            endian,
            scratch: Vec::new(),
        }
    }

    pub fn endianness(&self) -> Endianness {
        self.endian
    }

    /// Gets a reference to the underlying buffer.
    pub fn get_ref(&self) -> &Buffer {
        self.buf
    }

    /// Gets a mutable reference to the underlying buffer.
    pub fn get_mut(&mut self) -> &mut Buffer {
        self.buf
    }

    /// Read a tag type byte. Fails with `InvalidFormat` if the byte is not a
    /// known kind.
    pub fn read_tag_type(&mut self) -> Result<TagType> {
        let t = self.buf.read_byte().ok_or_else(Error::end_of_stream)?;
        TagType::try_from(t).map_err(|_| Error::invalid_tag_type(t))
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        self.buf.read_byte().ok_or_else(Error::end_of_stream)
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    read_fixed!(read_i16, i16, 2);
    read_fixed!(read_i32, i32, 4);
    read_fixed!(read_i64, i64, 8);
    read_fixed!(read_f32, f32, 4);
    read_fixed!(read_f64, f64, 8);

    /// Read an i32 element count. Negative counts are `InvalidFormat`.
    pub fn read_length(&mut self) -> Result<usize> {
        let len = self.read_i32()?;
        if len < 0 {
            return Err(Error::negative_length(len));
        }
        Ok(len as usize)
    }

    /// Read a string prefixed with its i16 byte length.
    pub fn read_string(&mut self) -> Result<String> {
        let len = self.read_string_length()?;
        let bytes = self.read_exact_bytes(len)?;

        match String::from_utf8(bytes) {
            Ok(s) => Ok(s),
            Err(e) => {
                trace!("string of {} bytes is not UTF-8, decoding as Latin-1", len);
                Ok(e.into_bytes().into_iter().map(char::from).collect())
            }
        }
    }

    /// Read up to `count` bytes. The result is shorter than `count` if the
    /// buffer ran out.
    pub fn read_bytes(&mut self, count: usize) -> Vec<u8> {
        let count = count.min(self.buf.remaining());
        let mut out = vec![0; count];
        let mut filled = 0;
        while filled < count {
            let n = self.buf.read(&mut out[filled..]);
            if n == 0 {
                break;
            }
            filled += n;
        }
        out.truncate(filled);
        out
    }

    /// Read exactly `count` bytes or fail with `EndOfStream`.
    pub fn read_exact_bytes(&mut self, count: usize) -> Result<Vec<u8>> {
        let bytes = self.read_bytes(count);
        if bytes.len() < count {
            return Err(Error::end_of_stream());
        }
        Ok(bytes)
    }

    pub fn read_i8_array(&mut self, count: usize) -> Result<Vec<i8>> {
        let bytes = self.read_exact_bytes(count)?;
        Ok(bytes.into_iter().map(|b| b as i8).collect())
    }

    pub fn read_i32_array(&mut self, count: usize) -> Result<Vec<i32>> {
        // Cap the up-front allocation, the count comes from the input.
        let mut out = Vec::with_capacity(count.min(CHUNK_SIZE));
        for _ in 0..count {
            out.push(self.read_i32()?);
        }
        Ok(out)
    }

    pub fn read_i64_array(&mut self, count: usize) -> Result<Vec<i64>> {
        let mut out = Vec::with_capacity(count.min(CHUNK_SIZE));
        for _ in 0..count {
            out.push(self.read_i64()?);
        }
        Ok(out)
    }

    /// Advance past `count` bytes without keeping them.
    pub fn skip(&mut self, count: usize) -> Result<()> {
        if self.scratch.is_empty() {
            self.scratch = vec![0; CHUNK_SIZE];
        }

        let mut left = count;
        while left > 0 {
            let want = left.min(CHUNK_SIZE);
            let n = self.buf.read(&mut self.scratch[..want]);
            if n == 0 {
                return Err(Error::end_of_stream());
            }
            left -= n;
        }
        Ok(())
    }

    /// Advance past a length-prefixed string without decoding it.
    pub fn skip_string(&mut self) -> Result<()> {
        let len = self.read_string_length()?;
        self.skip(len)
    }

    fn read_string_length(&mut self) -> Result<usize> {
        let len = self.read_i16()?;
        if len < 0 {
            return Err(Error::invalid_format("Negative string length given!"));
        }
        Ok(len as usize)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut bytes = [0u8; N];
        if self.buf.read(&mut bytes) < N {
            return Err(Error::end_of_stream());
        }
        Ok(bytes)
    }
}
