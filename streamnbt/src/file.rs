//! Loading and saving complete NBT files, compressed or not.

use std::io::{self, Read, Write};
use std::path::Path;

use flate2::read::{GzDecoder, ZlibDecoder};
use flate2::write::{GzEncoder, ZlibEncoder};
use log::debug;

use crate::binary::{BinaryReader, BinaryWriter};
use crate::error::{Error, Result};
use crate::tag::{read_root, write_tag, Tag, TagInfo};
use crate::{Buffer, Endianness, TagType};

/// How the bytes of a file are compressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    /// Decide from the first byte when loading. Cannot be used for saving.
    AutoDetect,
    None,
    /// GZip, as used by level.dat and most standalone files.
    GZip,
    /// Zlib (RFC 1950), as used by chunks inside region files.
    ZLib,
}

impl Compression {
    /// Classify data by its first byte. Uncompressed NBT always starts with
    /// the root's Compound tag type.
    pub fn detect(first_byte: u8) -> Result<Self> {
        match first_byte {
            0x0A => Ok(Compression::None),
            0x1F => Ok(Compression::GZip),
            0x78 => Ok(Compression::ZLib),
            b => Err(Error::invalid_format(format!(
                "Could not auto-detect compression format, first byte was {:#04x}.",
                b
            ))),
        }
    }
}

/// Inflate `bytes` compressed with `compression`, which may be `AutoDetect`.
/// Returns the data along with the compression that was actually used.
pub fn decompress(bytes: &[u8], compression: Compression) -> Result<(Vec<u8>, Compression)> {
    let compression = match compression {
        Compression::AutoDetect => {
            let first = *bytes.first().ok_or_else(Error::end_of_stream)?;
            let detected = Compression::detect(first)?;
            debug!("detected compression {:?}", detected);
            detected
        }
        c => c,
    };

    let mut out = Vec::new();
    match compression {
        Compression::GZip => {
            GzDecoder::new(bytes)
                .read_to_end(&mut out)
                .map_err(Error::compression)?;
        }
        Compression::ZLib => {
            ZlibDecoder::new(bytes)
                .read_to_end(&mut out)
                .map_err(Error::compression)?;
        }
        _ => out.extend_from_slice(bytes),
    }
    Ok((out, compression))
}

/// Deflate `bytes` with `compression` at the default level.
pub fn compress(bytes: &[u8], compression: Compression) -> Result<Vec<u8>> {
    match compression {
        Compression::AutoDetect => Err(Error::argument(
            "AutoDetect is not a valid Compression value for saving.",
        )),
        Compression::None => Ok(bytes.to_vec()),
        Compression::GZip => {
            let mut encoder = GzEncoder::new(Vec::new(), flate2::Compression::default());
            encoder.write_all(bytes).map_err(Error::compression)?;
            encoder.finish().map_err(Error::compression)
        }
        Compression::ZLib => {
            let mut encoder = ZlibEncoder::new(Vec::new(), flate2::Compression::default());
            encoder.write_all(bytes).map_err(Error::compression)?;
            encoder.finish().map_err(Error::compression)
        }
    }
}

/// A complete NBT tree with the settings it was loaded or will be saved
/// with.
///
/// ```no_run
/// use streamnbt::{Compression, NbtFile};
/// # fn main() -> streamnbt::Result<()> {
/// let mut file = NbtFile::new();
/// file.load_from_path("level.dat", Compression::AutoDetect)?;
/// let data = file.root().get("Data");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NbtFile {
    root: Tag,
    endianness: Endianness,
    compression: Compression,
    file_name: Option<String>,
}

impl Default for NbtFile {
    fn default() -> Self {
        Self::new()
    }
}

impl NbtFile {
    /// An empty file: a root compound named "", big-endian.
    pub fn new() -> Self {
        Self {
            root: Tag::compound(""),
            endianness: Endianness::Big,
            compression: Compression::AutoDetect,
            file_name: None,
        }
    }

    pub fn with_root(root: Tag) -> Result<Self> {
        let mut file = Self::new();
        file.set_root(root)?;
        Ok(file)
    }

    pub fn root(&self) -> &Tag {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Tag {
        &mut self.root
    }

    pub fn into_root(self) -> Tag {
        self.root
    }

    /// Replace the root. It must be a named compound, the name may be empty.
    pub fn set_root(&mut self, root: Tag) -> Result<()> {
        if root.name().is_none() {
            return Err(Error::argument("Root tag must be named."));
        }
        if root.tag_type() != TagType::Compound {
            return Err(Error::argument(format!(
                "Root tag must be a {}, found {}.",
                TagType::Compound,
                root.tag_type()
            )));
        }
        self.root = root;
        Ok(())
    }

    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    pub fn set_endianness(&mut self, endianness: Endianness) {
        self.endianness = endianness;
    }

    /// Compression used by the most recent load or save.
    pub fn compression(&self) -> Compression {
        self.compression
    }

    /// Path of the most recent load or save from the file system.
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// Load the tree from `bytes`, replacing the root. Returns the number of
    /// uncompressed bytes the tree took up.
    pub fn load_from_bytes(&mut self, bytes: &[u8], compression: Compression) -> Result<usize> {
        self.load_from_bytes_with(bytes, compression, |_| false)
    }

    /// Load the tree from `bytes`, leaving out every tag for which `skip`
    /// returns true along with everything under it.
    pub fn load_from_bytes_with<F>(
        &mut self,
        bytes: &[u8],
        compression: Compression,
        mut skip: F,
    ) -> Result<usize>
    where
        F: FnMut(&TagInfo<'_>) -> bool,
    {
        let (data, compression) = decompress(bytes, compression)?;
        if data.is_empty() {
            return Err(Error::end_of_stream());
        }

        let mut buf = Buffer::from_vec(data);
        let mut reader = BinaryReader::new(&mut buf, self.endianness);
        let root = read_root(&mut reader, &mut skip)?;
        let read = reader.get_ref().position();

        debug!(
            "loaded {} bytes ({:?}), root {:?}",
            read,
            compression,
            root.name()
        );
        self.root = root;
        self.compression = compression;
        Ok(read)
    }

    pub fn load_from_path(
        &mut self,
        path: impl AsRef<Path>,
        compression: Compression,
    ) -> Result<usize> {
        self.load_from_path_with(path, compression, |_| false)
    }

    pub fn load_from_path_with<F>(
        &mut self,
        path: impl AsRef<Path>,
        compression: Compression,
        skip: F,
    ) -> Result<usize>
    where
        F: FnMut(&TagInfo<'_>) -> bool,
    {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let read = self.load_from_bytes_with(&bytes, compression, skip)?;
        self.file_name = Some(path.display().to_string());
        Ok(read)
    }

    /// Encode the tree. Returns the (possibly compressed) bytes and the
    /// uncompressed size.
    pub fn save_to_vec(&mut self, compression: Compression) -> Result<(Vec<u8>, usize)> {
        if self.root.name().is_none() {
            return Err(Error::invalid_format(
                "Cannot save NbtFile: root tag is not named. Its name may be an empty string, but not nil.",
            ));
        }
        if self.root.tag_type() != TagType::Compound {
            return Err(Error::invalid_format(format!(
                "Cannot save NbtFile: root tag must be a {}, found {}.",
                TagType::Compound,
                self.root.tag_type()
            )));
        }
        if compression == Compression::AutoDetect {
            return Err(Error::argument(
                "AutoDetect is not a valid Compression value for saving.",
            ));
        }

        let mut buf = Buffer::new();
        let mut writer = BinaryWriter::new(&mut buf, self.endianness);
        write_tag(&mut writer, &self.root)?;
        let raw = buf.to_vec();
        let bytes = compress(&raw, compression)?;

        debug!(
            "saved {} bytes ({:?}, {} compressed)",
            raw.len(),
            compression,
            bytes.len()
        );
        self.compression = compression;
        Ok((bytes, raw.len()))
    }

    /// Write the tree to the file system. Returns the uncompressed size.
    pub fn save_to_path(
        &mut self,
        path: impl AsRef<Path>,
        compression: Compression,
    ) -> Result<usize> {
        let path = path.as_ref();
        let (bytes, size) = self.save_to_vec(compression)?;
        std::fs::write(path, bytes)?;
        self.file_name = Some(path.display().to_string());
        Ok(size)
    }

    /// Write the tree to any sink. Returns the uncompressed size.
    pub fn save_to_writer<W: io::Write>(
        &mut self,
        mut out: W,
        compression: Compression,
    ) -> Result<usize> {
        let (bytes, size) = self.save_to_vec(compression)?;
        out.write_all(&bytes)?;
        Ok(size)
    }
}
