//! Reading, skipping and writing tag payloads.
//!
//! Compounds and lists drive the recursion: a compound reads header after
//! header until End, a list reads its element type and count and then that
//! many bare payloads.

use log::trace;

use super::{Compound, List, Tag, Value};
use crate::binary::{BinaryReader, BinaryWriter};
use crate::error::{Error, Result};
use crate::TagType;

/// Deepest nesting of compounds and lists accepted in a tree, counting the
/// root as 1. Trees are read and written recursively.
pub const MAX_DEPTH: usize = 512;

/// What a skip predicate knows about a tag when deciding whether to skip it.
///
/// The header has been read at this point, and for arrays so has the length,
/// but nothing else of the payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TagInfo<'a> {
    pub name: Option<&'a str>,
    pub tag_type: TagType,
    /// Element count of an array. `None` for every other kind.
    pub length: Option<usize>,
    /// Name of the containing compound or list.
    pub parent_name: Option<&'a str>,
    pub parent_type: TagType,
    /// The root compound is at depth 1.
    pub depth: usize,
}

/// Where a payload being read lives.
#[derive(Clone, Copy)]
struct Parent<'a> {
    name: Option<&'a str>,
    tag_type: TagType,
    depth: usize,
}

type Skip<'s> = dyn for<'a, 'b> FnMut(&'a TagInfo<'b>) -> bool + 's;

/// Read a complete stream: a named root compound and everything in it. The
/// root itself is never offered to the skip predicate.
pub fn read_root(reader: &mut BinaryReader, skip: &mut Skip<'_>) -> Result<Tag> {
    if reader.read_tag_type()? != TagType::Compound {
        return Err(Error::invalid_format(
            "Given NBT stream does not start with TAG_Compound.",
        ));
    }
    let name = reader.read_string()?;
    trace!("reading root compound {:?}", name);

    let root = Parent {
        name: Some(&name),
        tag_type: TagType::Compound,
        depth: 1,
    };
    let compound = read_compound(reader, root, skip)?;
    Ok(Tag::from_parts(Some(name), Value::Compound(compound)))
}

/// Read the payload of a tag of kind `tag_type` whose header has already been
/// read. Returns `None` if the skip predicate chose to skip it, in which case
/// the cursor has been moved past the payload.
fn read_payload(
    reader: &mut BinaryReader,
    tag_type: TagType,
    name: Option<&str>,
    parent: Parent<'_>,
    skip: &mut Skip<'_>,
) -> Result<Option<Value>> {
    let mut info = TagInfo {
        name,
        tag_type,
        length: None,
        parent_name: parent.name,
        parent_type: parent.tag_type,
        depth: parent.depth + 1,
    };

    if tag_type.is_container() && info.depth > MAX_DEPTH {
        return Err(Error::too_deep(MAX_DEPTH));
    }

    if matches!(
        tag_type,
        TagType::ByteArray | TagType::IntArray | TagType::LongArray
    ) {
        let len = reader.read_length()?;
        info.length = Some(len);
        if skip(&info) {
            reader.skip(array_bytes(tag_type, len)?)?;
            return Ok(None);
        }
        return Ok(Some(match tag_type {
            TagType::ByteArray => Value::ByteArray(reader.read_i8_array(len)?),
            TagType::IntArray => Value::IntArray(reader.read_i32_array(len)?),
            _ => Value::LongArray(reader.read_i64_array(len)?),
        }));
    }

    if skip(&info) {
        skip_nested(reader, tag_type, info.depth)?;
        return Ok(None);
    }

    let here = Parent {
        name,
        tag_type,
        depth: info.depth,
    };
    let value = match tag_type {
        TagType::Byte => Value::Byte(reader.read_i8()?),
        TagType::Short => Value::Short(reader.read_i16()?),
        TagType::Int => Value::Int(reader.read_i32()?),
        TagType::Long => Value::Long(reader.read_i64()?),
        TagType::Float => Value::Float(reader.read_f32()?),
        TagType::Double => Value::Double(reader.read_f64()?),
        TagType::String => Value::String(reader.read_string()?),
        TagType::List => Value::List(read_list(reader, here, skip)?),
        TagType::Compound => Value::Compound(read_compound(reader, here, skip)?),
        _ => return Err(Error::unsupported_tag_type(tag_type)),
    };
    Ok(Some(value))
}

fn read_compound(
    reader: &mut BinaryReader,
    this: Parent<'_>,
    skip: &mut Skip<'_>,
) -> Result<Compound> {
    let mut compound = Compound::new();
    loop {
        let tag_type = reader.read_tag_type()?;
        if tag_type == TagType::End {
            return Ok(compound);
        }
        let name = reader.read_string()?;
        if let Some(value) = read_payload(reader, tag_type, Some(&name), this, skip)? {
            if compound.contains(&name) {
                return Err(Error::invalid_format(format!(
                    "Duplicate tag name in compound: {}",
                    name
                )));
            }
            compound.append(Tag::from_parts(Some(name), value))?;
        }
    }
}

fn read_list(reader: &mut BinaryReader, this: Parent<'_>, skip: &mut Skip<'_>) -> Result<List> {
    let (list_type, len) = read_list_header(reader)?;
    let mut list = List::with_type(list_type)?;
    for _ in 0..len {
        if let Some(value) = read_payload(reader, list_type, None, this, skip)? {
            list.append(Tag::unnamed(value))?;
        }
    }
    Ok(list)
}

/// Read a list's element type and count.
pub(crate) fn read_list_header(reader: &mut BinaryReader) -> Result<(TagType, usize)> {
    let list_type = reader.read_tag_type()?;
    let len = reader.read_length()?;
    if list_type == TagType::End && len > 0 {
        return Err(Error::invalid_format(format!(
            "List of {} cannot have elements, found {}",
            TagType::End,
            len
        )));
    }
    Ok((list_type, len))
}

/// Move the cursor past a payload of kind `tag_type` without decoding it.
/// Containers are still parsed structurally to find their end, and may nest
/// at most [`MAX_DEPTH`] levels.
pub fn skip_payload(reader: &mut BinaryReader, tag_type: TagType) -> Result<()> {
    skip_nested(reader, tag_type, 1)
}

fn skip_nested(reader: &mut BinaryReader, tag_type: TagType, depth: usize) -> Result<()> {
    if tag_type.is_container() && depth > MAX_DEPTH {
        return Err(Error::too_deep(MAX_DEPTH));
    }
    if let Some(size) = fixed_size(tag_type) {
        return reader.skip(size);
    }

    match tag_type {
        TagType::ByteArray | TagType::IntArray | TagType::LongArray => {
            let len = reader.read_length()?;
            reader.skip(array_bytes(tag_type, len)?)
        }
        TagType::String => reader.skip_string(),
        TagType::List => {
            let (list_type, len) = read_list_header(reader)?;
            match fixed_size(list_type) {
                Some(size) => reader.skip(checked_bytes(size, len)?),
                None => {
                    for _ in 0..len {
                        skip_nested(reader, list_type, depth + 1)?;
                    }
                    Ok(())
                }
            }
        }
        TagType::Compound => loop {
            let child = reader.read_tag_type()?;
            if child == TagType::End {
                return Ok(());
            }
            reader.skip_string()?;
            skip_nested(reader, child, depth + 1)?;
        },
        _ => Err(Error::unsupported_tag_type(tag_type)),
    }
}

/// Write a value's payload. Compounds write each member with its header
/// followed by End, lists write their element type and count followed by
/// the bare payloads. Fails part way through if the value nests deeper than
/// [`MAX_DEPTH`].
pub fn write_payload(writer: &mut BinaryWriter, value: &Value) -> Result<()> {
    write_nested(writer, value, 1)
}

fn write_nested(writer: &mut BinaryWriter, value: &Value, depth: usize) -> Result<()> {
    if value.tag_type().is_container() && depth > MAX_DEPTH {
        return Err(Error::too_deep(MAX_DEPTH));
    }
    match value {
        Value::Byte(v) => writer.write_i8(*v),
        Value::Short(v) => writer.write_i16(*v),
        Value::Int(v) => writer.write_i32(*v),
        Value::Long(v) => writer.write_i64(*v),
        Value::Float(v) => writer.write_f32(*v),
        Value::Double(v) => writer.write_f64(*v),
        Value::String(v) => writer.write_str(v),
        Value::ByteArray(v) => {
            writer.write_length(v.len())?;
            writer.write_i8_slice(v)
        }
        Value::IntArray(v) => {
            writer.write_length(v.len())?;
            writer.write_i32_slice(v)
        }
        Value::LongArray(v) => {
            writer.write_length(v.len())?;
            writer.write_i64_slice(v)
        }
        Value::List(list) => {
            // An untyped list is always empty, and goes on the wire as End.
            let list_type = match list.list_type() {
                TagType::Unknown => TagType::End,
                t => t,
            };
            writer.write_tag_type(list_type)?;
            writer.write_length(list.len())?;
            for item in list {
                write_nested(writer, item.value(), depth + 1)?;
            }
            Ok(())
        }
        Value::Compound(compound) => {
            for tag in compound.iter() {
                write_header(writer, tag)?;
                write_nested(writer, tag.value(), depth + 1)?;
            }
            writer.write_tag_type(TagType::End)
        }
    }
}

/// Write a tag's type, name and payload. The tag must be named.
pub fn write_tag(writer: &mut BinaryWriter, tag: &Tag) -> Result<()> {
    write_header(writer, tag)?;
    write_payload(writer, tag.value())
}

fn write_header(writer: &mut BinaryWriter, tag: &Tag) -> Result<()> {
    let name = tag.name().ok_or_else(|| {
        Error::invalid_format(format!(
            "Cannot write unnamed {} with a header, only list elements may be unnamed.",
            tag.tag_type()
        ))
    })?;
    writer.write_tag_type(tag.tag_type())?;
    writer.write_str(name)
}

fn fixed_size(tag_type: TagType) -> Option<usize> {
    match tag_type {
        TagType::Byte => Some(1),
        TagType::Short => Some(2),
        TagType::Int | TagType::Float => Some(4),
        TagType::Long | TagType::Double => Some(8),
        _ => None,
    }
}

fn array_bytes(tag_type: TagType, len: usize) -> Result<usize> {
    let size = match tag_type {
        TagType::IntArray => 4,
        TagType::LongArray => 8,
        _ => 1,
    };
    checked_bytes(size, len)
}

fn checked_bytes(size: usize, len: usize) -> Result<usize> {
    size.checked_mul(len)
        .ok_or_else(|| Error::invalid_format(format!("Tag length too large: {}", len)))
}
