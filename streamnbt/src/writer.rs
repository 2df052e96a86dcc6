//! Emitting an NBT stream one call at a time.
//!
//! [`NbtWriter`] tracks which container it is in and refuses any call that
//! would make the output structurally invalid: a named tag inside a list, an
//! unnamed one inside a compound, an element of the wrong type, too many
//! elements, or anything at all after the root has been closed. The check
//! happens before any byte of the offending tag is written.

use std::convert::TryFrom;

use log::trace;

use crate::binary::BinaryWriter;
use crate::error::{Error, Result};
use crate::tag::{write_payload, write_tag, Tag};
use crate::{Buffer, Endianness, TagType};

/// Context of an enclosing container, saved while writing inside a child.
#[derive(Debug, Clone, Copy)]
struct Frame {
    parent_type: TagType,
    list_type: TagType,
    list_size: usize,
    list_index: usize,
}

/// Writes NBT into a [`Buffer`].
///
/// The root compound's header is written on construction. Every
/// `begin_*` call must be matched by the corresponding `end_*`, including one
/// final [`end_compound`](NbtWriter::end_compound) for the root.
///
/// Inside compounds use the `*_named_*` methods, inside lists use the
/// unnamed ones.
///
/// ```
/// use streamnbt::{Buffer, NbtWriter, TagType};
/// # fn main() -> streamnbt::Result<()> {
/// let mut buf = Buffer::new();
/// let mut writer = NbtWriter::new(&mut buf, "root")?;
/// writer.begin_named_list("heights", TagType::Int, 2)?;
/// writer.write_int(64)?;
/// writer.write_int(70)?;
/// writer.end_list()?;
/// writer.end_compound()?;
/// writer.finish()?;
/// # Ok(())
/// # }
/// ```
pub struct NbtWriter<'a> {
    writer: BinaryWriter<'a>,
    frames: Vec<Frame>,
    parent_type: TagType,
    list_type: TagType,
    list_size: usize,
    list_index: usize,
    done: bool,
}

macro_rules! scalar_writes {
    ($($unnamed:ident, $named:ident, $ty:ty, $tag:ident, $write:ident;)*) => {
        $(
            #[doc = concat!("Write an unnamed ", stringify!($tag), " as a list element.")]
            pub fn $unnamed(&mut self, value: $ty) -> Result<()> {
                self.enforce_constraints(None, TagType::$tag)?;
                self.writer.$write(value)
            }

            #[doc = concat!("Write a named ", stringify!($tag), " inside a compound.")]
            pub fn $named(&mut self, name: &str, value: $ty) -> Result<()> {
                self.enforce_constraints(Some(name), TagType::$tag)?;
                self.write_header(TagType::$tag, name)?;
                self.writer.$write(value)
            }
        )*
    };
}

macro_rules! array_writes {
    ($($unnamed:ident, $named:ident, $ty:ty, $tag:ident, $write:ident;)*) => {
        $(
            #[doc = concat!("Write an unnamed ", stringify!($tag), " as a list element.")]
            pub fn $unnamed(&mut self, data: &[$ty]) -> Result<()> {
                check_length(data.len())?;
                self.enforce_constraints(None, TagType::$tag)?;
                self.writer.write_length(data.len())?;
                self.writer.$write(data)
            }

            #[doc = concat!("Write a named ", stringify!($tag), " inside a compound.")]
            pub fn $named(&mut self, name: &str, data: &[$ty]) -> Result<()> {
                check_length(data.len())?;
                self.enforce_constraints(Some(name), TagType::$tag)?;
                self.write_header(TagType::$tag, name)?;
                self.writer.write_length(data.len())?;
                self.writer.$write(data)
            }
        )*
    };
}

impl<'a> NbtWriter<'a> {
    /// Start a big-endian stream, writing the root compound's header.
    pub fn new(buf: &'a mut Buffer, root_name: &str) -> Result<Self> {
        Self::with_endianness(buf, root_name, Endianness::Big)
    }

    pub fn with_endianness(
        buf: &'a mut Buffer,
        root_name: &str,
        endian: Endianness,
    ) -> Result<Self> {
        check_string(root_name)?;
        let mut writer = BinaryWriter::new(buf, endian);
        writer.write_tag_type(TagType::Compound)?;
        writer.write_str(root_name)?;
        trace!("started stream with root {:?}", root_name);

        Ok(Self {
            writer,
            frames: Vec::new(),
            parent_type: TagType::Compound,
            list_type: TagType::Unknown,
            list_size: 0,
            list_index: 0,
            done: false,
        })
    }

    /// Gets a reference to the underlying buffer.
    pub fn get_ref(&self) -> &Buffer {
        self.writer.get_ref()
    }

    /// Whether the root compound has been closed.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Begin an unnamed compound, as a list element.
    pub fn begin_compound(&mut self) -> Result<()> {
        self.enforce_constraints(None, TagType::Compound)?;
        self.go_down(TagType::Compound);
        Ok(())
    }

    pub fn begin_named_compound(&mut self, name: &str) -> Result<()> {
        self.enforce_constraints(Some(name), TagType::Compound)?;
        self.write_header(TagType::Compound, name)?;
        self.go_down(TagType::Compound);
        Ok(())
    }

    /// Close the innermost compound. Closing the root finishes the stream.
    pub fn end_compound(&mut self) -> Result<()> {
        if self.done || self.parent_type != TagType::Compound {
            return Err(Error::invalid_operation("Not currently in a compound."));
        }
        self.go_up();
        self.writer.write_tag_type(TagType::End)
    }

    /// Begin an unnamed list of `size` elements of type `element_type`, as an
    /// element of the enclosing list.
    pub fn begin_list(&mut self, element_type: TagType, size: usize) -> Result<()> {
        check_list(element_type, size)?;
        self.enforce_constraints(None, TagType::List)?;
        self.writer.write_tag_type(element_type)?;
        self.writer.write_length(size)?;
        self.open_list(element_type, size);
        Ok(())
    }

    pub fn begin_named_list(
        &mut self,
        name: &str,
        element_type: TagType,
        size: usize,
    ) -> Result<()> {
        check_list(element_type, size)?;
        self.enforce_constraints(Some(name), TagType::List)?;
        self.write_header(TagType::List, name)?;
        self.writer.write_tag_type(element_type)?;
        self.writer.write_length(size)?;
        self.open_list(element_type, size);
        Ok(())
    }

    /// Close the innermost list. All of its elements must have been written.
    pub fn end_list(&mut self) -> Result<()> {
        if self.done || self.parent_type != TagType::List {
            return Err(Error::invalid_operation("Not currently in a list."));
        }
        if self.list_index < self.list_size {
            return Err(Error::invalid_operation(format!(
                "Cannot end list: not all elements have been written yet. Expected: {}, written: {}",
                self.list_size, self.list_index
            )));
        }
        self.go_up();
        Ok(())
    }

    scalar_writes! {
        write_byte, write_named_byte, i8, Byte, write_i8;
        write_short, write_named_short, i16, Short, write_i16;
        write_int, write_named_int, i32, Int, write_i32;
        write_long, write_named_long, i64, Long, write_i64;
        write_float, write_named_float, f32, Float, write_f32;
        write_double, write_named_double, f64, Double, write_f64;
    }

    array_writes! {
        write_byte_array, write_named_byte_array, i8, ByteArray, write_i8_slice;
        write_int_array, write_named_int_array, i32, IntArray, write_i32_slice;
        write_long_array, write_named_long_array, i64, LongArray, write_i64_slice;
    }

    /// Write an unnamed String as a list element.
    pub fn write_string(&mut self, value: &str) -> Result<()> {
        check_string(value)?;
        self.enforce_constraints(None, TagType::String)?;
        self.writer.write_str(value)
    }

    /// Write a named String inside a compound.
    pub fn write_named_string(&mut self, name: &str, value: &str) -> Result<()> {
        check_string(value)?;
        self.enforce_constraints(Some(name), TagType::String)?;
        self.write_header(TagType::String, name)?;
        self.writer.write_str(value)
    }

    /// Write a byte array whose contents are the next `count` bytes of
    /// `source`, without collecting them first. With a name it is written as
    /// a compound member, without one as a list element. Fails before writing
    /// anything if `source` has fewer than `count` bytes left.
    pub fn write_byte_array_from(
        &mut self,
        name: Option<&str>,
        source: &mut Buffer,
        count: usize,
    ) -> Result<()> {
        check_length(count)?;
        if source.remaining() < count {
            return Err(Error::end_of_stream());
        }
        self.enforce_constraints(name, TagType::ByteArray)?;
        if let Some(name) = name {
            self.write_header(TagType::ByteArray, name)?;
        }
        self.writer.write_length(count)?;
        self.writer.write_from_buffer(source, count)
    }

    /// Write a complete tag and everything in it. A named tag is written as
    /// a compound member, an unnamed one as a list element.
    ///
    /// Building [`Tag`] trees only to hand them to a writer gives up the
    /// point of streaming, so keep this for small pieces.
    pub fn write_tag(&mut self, tag: &Tag) -> Result<()> {
        if let Some(name) = tag.name() {
            check_string(name)?;
        }
        self.enforce_constraints(tag.name(), tag.tag_type())?;
        if tag.name().is_some() {
            write_tag(&mut self.writer, tag)
        } else {
            write_payload(&mut self.writer, tag.value())
        }
    }

    /// Check that every container has been closed. Writes nothing.
    pub fn finish(&self) -> Result<()> {
        if !self.done {
            return Err(Error::invalid_operation(
                "Cannot finish: not all tags have been closed yet.",
            ));
        }
        Ok(())
    }

    fn write_header(&mut self, tag_type: TagType, name: &str) -> Result<()> {
        self.writer.write_tag_type(tag_type)?;
        self.writer.write_str(name)
    }

    fn open_list(&mut self, element_type: TagType, size: usize) {
        self.go_down(TagType::List);
        self.list_type = element_type;
        self.list_size = size;
    }

    fn go_down(&mut self, this_type: TagType) {
        self.frames.push(Frame {
            parent_type: self.parent_type,
            list_type: self.list_type,
            list_size: self.list_size,
            list_index: self.list_index,
        });
        self.parent_type = this_type;
        self.list_type = TagType::Unknown;
        self.list_size = 0;
        self.list_index = 0;
    }

    fn go_up(&mut self) {
        match self.frames.pop() {
            Some(frame) => {
                self.parent_type = frame.parent_type;
                self.list_type = frame.list_type;
                self.list_size = frame.list_size;
                self.list_index = frame.list_index;
            }
            None => {
                trace!("root compound closed");
                self.done = true;
            }
        }
    }

    /// Fail if a tag called `name` of kind `desired` may not be written here.
    /// Counts the tag against the enclosing list's size if it may.
    fn enforce_constraints(&mut self, name: Option<&str>, desired: TagType) -> Result<()> {
        if self.done {
            return Err(Error::invalid_operation(
                "Cannot write any more tags: root tag has been closed.",
            ));
        }
        if self.parent_type == TagType::List {
            if name.is_some() {
                return Err(Error::invalid_format("Expecting an unnamed tag."));
            }
            if self.list_type != desired {
                return Err(Error::invalid_format(format!(
                    "Unexpected tag type (expected: {}, given: {})",
                    self.list_type, desired
                )));
            }
            if self.list_index >= self.list_size {
                return Err(Error::invalid_operation("Given list size exceeded."));
            }
            self.list_index += 1;
        } else {
            match name {
                Some(name) => check_string(name)?,
                None => return Err(Error::invalid_format("Expecting a named tag.")),
            }
        }
        Ok(())
    }
}

fn check_list(element_type: TagType, size: usize) -> Result<()> {
    let code = u8::from(element_type);
    if !(u8::from(TagType::Byte)..=u8::from(TagType::LongArray)).contains(&code) {
        return Err(Error::out_of_range("elementType", "Unrecognized tag type."));
    }
    check_length(size)
}

fn check_length(len: usize) -> Result<()> {
    i32::try_from(len)
        .map(drop)
        .map_err(|_| Error::out_of_range("length", "too large"))
}

fn check_string(value: &str) -> Result<()> {
    i16::try_from(value.len())
        .map(drop)
        .map_err(|_| Error::out_of_range("value", "string is too long to be written"))
}
