//! In-memory byte store the codec reads from and writes to.

use std::io;

use crate::error::{Error, Result};

/// Largest array the buffer will ever allocate.
const MAX_BYTE_ARRAY_LEN: usize = 0x7FFF_FFC7;
/// Largest position or length a buffer can be given.
const MAX_BUFFER_LEN: usize = i32::MAX as usize;
/// Smallest allocation made when an empty buffer first grows.
const MIN_GROWTH: usize = 256;

/// Reference point for [`Buffer::seek`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekOrigin {
    Begin,
    Current,
    End,
}

/// A growable, seekable byte store with an explicit read/write cursor.
///
/// A buffer made with [`Buffer::new`] or [`Buffer::with_capacity`] grows as
/// it is written to. A buffer made over an existing array with
/// [`Buffer::from_vec`] or [`Buffer::from_window`] is fixed: it can be read,
/// and overwritten within its capacity, but it never reallocates. A window
/// starts at an `origin` inside the array, and all positions and lengths are
/// relative to it.
///
/// Reads never fail when data runs out, they return fewer bytes. Deciding that
/// a short read is an error is left to the caller.
#[derive(Debug, Clone, Default)]
pub struct Buffer {
    data: Vec<u8>,
    origin: usize,
    // Absolute indexes into `data`.
    position: usize,
    length: usize,
    capacity: usize,
    expandable: bool,
}

impl Buffer {
    /// Create an empty, expandable buffer.
    pub fn new() -> Self {
        Self {
            expandable: true,
            ..Default::default()
        }
    }

    /// Create an empty, expandable buffer with `capacity` bytes allocated.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        if capacity > MAX_BYTE_ARRAY_LEN {
            return Err(Error::out_of_range("capacity", "too large"));
        }
        Ok(Self {
            data: vec![0; capacity],
            capacity,
            expandable: true,
            ..Default::default()
        })
    }

    /// Create a fixed buffer over all of `data`, positioned at the start.
    pub fn from_vec(data: Vec<u8>) -> Self {
        let len = data.len();
        Self {
            data,
            origin: 0,
            position: 0,
            length: len,
            capacity: len,
            expandable: false,
        }
    }

    /// Create a fixed buffer over `count` bytes of `data` starting at `index`.
    pub fn from_window(data: Vec<u8>, index: usize, count: usize) -> Result<Self> {
        if data.len().saturating_sub(index) < count {
            return Err(Error::argument(
                "offset and length were out of bounds for the array",
            ));
        }
        Ok(Self {
            data,
            origin: index,
            position: index,
            length: index + count,
            capacity: index + count,
            expandable: false,
        })
    }

    /// Current cursor position, relative to the start of the buffer.
    pub fn position(&self) -> usize {
        self.position - self.origin
    }

    /// Move the cursor. Moving past the end is allowed; a later write fills
    /// the gap with zeros.
    pub fn set_position(&mut self, position: usize) -> Result<()> {
        if position > MAX_BUFFER_LEN - self.origin {
            return Err(Error::out_of_range(
                "position",
                "value must be less than 2^31 - 1 - origin",
            ));
        }
        self.position = self.origin + position;
        Ok(())
    }

    /// Number of bytes of content.
    pub fn len(&self) -> usize {
        self.length - self.origin
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes left between the cursor and the end of the content.
    pub fn remaining(&self) -> usize {
        self.length.saturating_sub(self.position)
    }

    /// Number of bytes that can be held without reallocating.
    pub fn capacity(&self) -> usize {
        self.capacity - self.origin
    }

    /// Whether this buffer may reallocate to grow.
    pub fn is_expandable(&self) -> bool {
        self.expandable
    }

    /// Change the allocated size. A fixed buffer only accepts its current
    /// capacity.
    pub fn set_capacity(&mut self, capacity: usize) -> Result<()> {
        if capacity < self.len() {
            return Err(Error::out_of_range(
                "capacity",
                "capacity cannot be less than the current size",
            ));
        }
        if !self.expandable {
            if capacity != self.capacity() {
                return Err(Error::not_expandable());
            }
            return Ok(());
        }
        if capacity > MAX_BYTE_ARRAY_LEN {
            return Err(Error::out_of_range("capacity", "too large"));
        }

        // Expandable buffers always have an origin of zero.
        if capacity != self.capacity {
            self.data.truncate(self.length);
            self.data.resize(capacity, 0);
            self.capacity = capacity;
        }
        Ok(())
    }

    /// Change the length of the content, truncating or zero-extending it.
    pub fn set_len(&mut self, len: usize) -> Result<()> {
        if len > MAX_BUFFER_LEN - self.origin {
            return Err(Error::out_of_range(
                "length",
                "stream length must be less than 2^31 - 1 - origin",
            ));
        }

        let new_len = self.origin + len;
        let reallocated = self.ensure_capacity(new_len)?;
        if !reallocated && new_len > self.length {
            self.data[self.length..new_len].fill(0);
        }
        self.length = new_len;
        if self.position > new_len {
            self.position = new_len;
        }
        Ok(())
    }

    /// Copy bytes at the cursor into `dst`, advancing the cursor. Returns the
    /// number of bytes copied, which is zero at the end of the buffer.
    pub fn read(&mut self, dst: &mut [u8]) -> usize {
        let n = self.remaining().min(dst.len());
        if n == 0 {
            return 0;
        }
        dst[..n].copy_from_slice(&self.data[self.position..self.position + n]);
        self.position += n;
        n
    }

    /// Read a single byte, or `None` at the end of the buffer.
    pub fn read_byte(&mut self) -> Option<u8> {
        if self.position >= self.length {
            return None;
        }
        let b = self.data[self.position];
        self.position += 1;
        Some(b)
    }

    /// Move the cursor relative to `origin`, returning the new position.
    pub fn seek(&mut self, offset: i64, origin: SeekOrigin) -> Result<usize> {
        if offset > MAX_BUFFER_LEN as i64 {
            return Err(Error::out_of_range(
                "offset",
                "value must be less than 2^31 - 1 - origin",
            ));
        }

        let base = match origin {
            SeekOrigin::Begin => self.origin,
            SeekOrigin::Current => self.position,
            SeekOrigin::End => self.length,
        };
        let target = base as i64 + offset;
        if target < self.origin as i64 {
            return Err(Error::seek_before_begin());
        }

        self.position = target as usize;
        Ok(self.position())
    }

    /// Write `src` at the cursor, growing the buffer if needed.
    pub fn write(&mut self, src: &[u8]) -> Result<()> {
        let end = self
            .position
            .checked_add(src.len())
            .ok_or_else(|| Error::invalid_operation("stream too long"))?;

        if end > self.length {
            let mut must_zero = self.position > self.length;
            if end > self.capacity && self.ensure_capacity(end)? {
                must_zero = false;
            }
            if must_zero {
                self.data[self.length..self.position].fill(0);
            }
            self.length = end;
        }

        self.data[self.position..end].copy_from_slice(src);
        self.position = end;
        Ok(())
    }

    pub fn write_byte(&mut self, value: u8) -> Result<()> {
        self.write(&[value])
    }

    /// The content of the buffer, regardless of the cursor.
    pub fn as_slice(&self) -> &[u8] {
        &self.data[self.origin..self.length]
    }

    /// Copy of the content of the buffer, regardless of the cursor.
    pub fn to_vec(&self) -> Vec<u8> {
        self.as_slice().to_vec()
    }

    /// Grow so that `required` absolute bytes fit. Returns whether a new
    /// allocation was made.
    fn ensure_capacity(&mut self, required: usize) -> Result<bool> {
        if required <= self.capacity {
            return Ok(false);
        }
        if required > MAX_BYTE_ARRAY_LEN {
            return Err(Error::invalid_operation("stream too long"));
        }

        let doubled = self.capacity.saturating_mul(2);
        let new_capacity = if doubled > MAX_BYTE_ARRAY_LEN {
            MAX_BYTE_ARRAY_LEN
        } else {
            required.max(MIN_GROWTH).max(doubled)
        };

        self.set_capacity(new_capacity)?;
        Ok(true)
    }
}

impl io::Read for Buffer {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(Buffer::read(self, buf))
    }
}

impl io::Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Buffer::write(self, buf).map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl io::Seek for Buffer {
    fn seek(&mut self, pos: io::SeekFrom) -> io::Result<u64> {
        let (offset, origin) = match pos {
            io::SeekFrom::Start(n) => (
                i64::try_from(n).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?,
                SeekOrigin::Begin,
            ),
            io::SeekFrom::Current(n) => (n, SeekOrigin::Current),
            io::SeekFrom::End(n) => (n, SeekOrigin::End),
        };
        Buffer::seek(self, offset, origin)
            .map(|p| p as u64)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))
    }
}
