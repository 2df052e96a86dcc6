//! Forward-only traversal of an NBT stream without building a tree.
//!
//! [`NbtReader`] keeps a byte cursor and a logical position in the tree in
//! step. Each call to [`NbtReader::advance_to_next`] moves to the next tag in
//! pre-order, and the reader exposes that tag's name, kind, depth, length and
//! so on. Values are only decoded when asked for; anything not asked for is
//! skipped over. Any part of the tree can be materialized on demand with
//! [`NbtReader::materialize_as_tag`].
//!
//! ```
//! use streamnbt::{Buffer, NbtReader, Tag, NbtFile};
//! # fn main() -> streamnbt::Result<()> {
//! # let mut root = Tag::compound("root");
//! # let mut level = Tag::compound("Level");
//! # level.as_compound_mut().unwrap().append(Tag::named("xPos", 3))?;
//! # root.as_compound_mut().unwrap().append(level)?;
//! # let (bytes, _) = NbtFile::with_root(root)?.save_to_vec(streamnbt::Compression::None)?;
//! let mut buf = Buffer::from_vec(bytes);
//! let mut reader = NbtReader::new(&mut buf);
//!
//! if reader.advance_to_named("Level")? {
//!     let level = reader.materialize_as_tag()?;
//!     assert_eq!(level.get("xPos").unwrap().value().as_i64(), Some(3));
//! }
//! # Ok(())
//! # }
//! ```

use std::fmt;

use log::{debug, trace};

use crate::binary::{BinaryReader, CHUNK_SIZE};
use crate::error::{Error, Result};
use crate::tag::{read_list_header, Compound, List, Tag, Value, MAX_DEPTH};
use crate::{Buffer, Endianness, TagType};

const NO_VALUE_TO_READ: &str = "Value already read, or no value to read.";
const NON_VALUE_TAG: &str = "Trying to read value of a non-value tag.";
const INVALID_PARENT: &str = "Parent tag is neither a Compound nor a List.";

/// Where the reader is in the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    AtStreamBeginning,
    AtCompoundBeginning,
    InCompound,
    AtCompoundEnd,
    AtListBeginning,
    InList,
    AtStreamEnd,
    /// Decoding failed. The reader cannot be used any more.
    Error,
}

/// Context of an enclosing container, saved while inside one of its children.
#[derive(Debug, Clone)]
struct Frame {
    parent_name: Option<String>,
    parent_tag_type: TagType,
    list_type: TagType,
    parent_tag_length: usize,
    list_index: Option<usize>,
}

/// A cursor over an NBT stream held in a [`Buffer`].
///
/// The reader borrows the buffer and starts at the buffer's current position.
/// It is positioned before the root until the first call to
/// [`advance_to_next`](NbtReader::advance_to_next).
///
/// If the input turns out to be malformed the reader latches into
/// [`ParseState::Error`], after which every navigation call fails with
/// `InvalidReaderState`.
pub struct NbtReader<'a> {
    reader: BinaryReader<'a>,
    state: ParseState,
    frames: Vec<Frame>,
    stream_start: usize,

    at_value: bool,
    value_cache: Option<Value>,
    cache_tag_values: bool,
    skip_end_tags: bool,

    root_name: Option<String>,
    parent_name: Option<String>,
    tag_name: Option<String>,
    parent_tag_type: TagType,
    tag_type: TagType,
    tag_start_offset: usize,
    tags_read: usize,
    depth: usize,
    list_type: TagType,
    tag_length: usize,
    parent_tag_length: usize,
    // None before the first element of a list has been visited.
    list_index: Option<usize>,
}

impl<'a> NbtReader<'a> {
    /// Create a reader over big-endian data.
    pub fn new(buf: &'a mut Buffer) -> Self {
        Self::with_endianness(buf, Endianness::Big)
    }

    pub fn with_endianness(buf: &'a mut Buffer, endian: Endianness) -> Self {
        let stream_start = buf.position();
        Self {
            reader: BinaryReader::new(buf, endian),
            state: ParseState::AtStreamBeginning,
            frames: Vec::new(),
            stream_start,
            at_value: false,
            value_cache: None,
            cache_tag_values: false,
            skip_end_tags: true,
            root_name: None,
            parent_name: None,
            tag_name: None,
            parent_tag_type: TagType::Unknown,
            tag_type: TagType::Unknown,
            tag_start_offset: 0,
            tags_read: 0,
            depth: 0,
            list_type: TagType::Unknown,
            tag_length: 0,
            parent_tag_length: 0,
            list_index: None,
        }
    }

    /// Gets a reference to the underlying buffer.
    pub fn get_ref(&self) -> &Buffer {
        self.reader.get_ref()
    }

    pub fn state(&self) -> ParseState {
        self.state
    }

    pub fn skip_end_tags(&self) -> bool {
        self.skip_end_tags
    }

    /// Whether End tags are passed over silently (the default) or visited
    /// like any other tag.
    pub fn set_skip_end_tags(&mut self, skip: bool) {
        self.skip_end_tags = skip;
    }

    pub fn cache_tag_values(&self) -> bool {
        self.cache_tag_values
    }

    /// Whether the last value read is kept, so that
    /// [`read_value`](NbtReader::read_value) can be called again until the
    /// reader moves. Off by default.
    pub fn set_cache_tag_values(&mut self, cache: bool) {
        self.cache_tag_values = cache;
        if !cache {
            self.value_cache = None;
        }
    }

    /// Name of the root compound, once it has been read.
    pub fn root_name(&self) -> Option<&str> {
        self.root_name.as_deref()
    }

    pub fn tag_name(&self) -> Option<&str> {
        self.tag_name.as_deref()
    }

    pub fn parent_name(&self) -> Option<&str> {
        self.parent_name.as_deref()
    }

    pub fn tag_type(&self) -> TagType {
        self.tag_type
    }

    /// Kind of the enclosing container, `Unknown` for the root.
    pub fn parent_tag_type(&self) -> TagType {
        self.parent_tag_type
    }

    /// Element type of the current tag if it is a list.
    pub fn list_type(&self) -> TagType {
        self.list_type
    }

    /// Element count of the current array or list. Zero for other kinds.
    pub fn tag_length(&self) -> usize {
        self.tag_length
    }

    /// Element count of the enclosing list.
    pub fn parent_tag_length(&self) -> usize {
        self.parent_tag_length
    }

    /// Index of the current tag within its enclosing list.
    pub fn list_index(&self) -> usize {
        self.list_index.unwrap_or(0)
    }

    /// Nesting depth of the current tag. The root is at depth 1.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of tags visited so far.
    pub fn tags_read(&self) -> usize {
        self.tags_read
    }

    /// Offset of the current tag's first byte from the start of the stream.
    pub fn tag_start_offset(&self) -> usize {
        self.tag_start_offset
    }

    pub fn has_value(&self) -> bool {
        self.tag_type.has_value()
    }

    pub fn has_length(&self) -> bool {
        self.tag_type.has_length()
    }

    pub fn has_name(&self) -> bool {
        self.tag_name.is_some()
    }

    pub fn is_compound(&self) -> bool {
        self.tag_type == TagType::Compound
    }

    pub fn is_list(&self) -> bool {
        self.tag_type == TagType::List
    }

    pub fn is_list_element(&self) -> bool {
        self.parent_tag_type == TagType::List
    }

    pub fn is_at_stream_end(&self) -> bool {
        self.state == ParseState::AtStreamEnd
    }

    pub fn is_in_error_state(&self) -> bool {
        self.state == ParseState::Error
    }

    /// Move to the next tag in pre-order. Returns `false` once the root
    /// compound has been closed.
    pub fn advance_to_next(&mut self) -> Result<bool> {
        if self.state == ParseState::Error {
            return Err(Error::invalid_reader_state());
        }
        self.value_cache = None;
        let result = self.advance();
        self.latch(result)
    }

    /// Move forward until a tag called `name` is found, at any depth.
    pub fn advance_to_named(&mut self, name: &str) -> Result<bool> {
        while self.advance_to_next()? {
            if self.tag_name.as_deref() == Some(name) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Move forward until a descendant of the current tag called `name` is
    /// found. Returns `false` if the current tag's subtree ends first, leaving
    /// the reader on whatever follows it.
    pub fn advance_to_descendant(&mut self, name: &str) -> Result<bool> {
        match self.state {
            ParseState::Error => return Err(Error::invalid_reader_state()),
            ParseState::AtStreamEnd => return Ok(false),
            _ => {}
        }
        let start_depth = self.depth;
        while self.advance_to_next()? {
            if self.depth <= start_depth {
                return Ok(false);
            }
            if self.tag_name.as_deref() == Some(name) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Move to the next tag at the current depth, skipping the current tag's
    /// descendants. Returns `false` if the enclosing container ends first.
    pub fn advance_to_next_sibling(&mut self) -> Result<bool> {
        match self.state {
            ParseState::Error => return Err(Error::invalid_reader_state()),
            ParseState::AtStreamEnd => return Ok(false),
            _ => {}
        }
        let start_depth = self.depth;
        while self.advance_to_next()? {
            if self.depth == start_depth {
                return Ok(true);
            }
            if self.depth < start_depth {
                return Ok(false);
            }
        }
        Ok(false)
    }

    /// Move to the next sibling called `name`.
    pub fn advance_to_next_sibling_named(&mut self, name: &str) -> Result<bool> {
        while self.advance_to_next_sibling()? {
            if self.tag_name.as_deref() == Some(name) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Skip the current tag, its descendants and its following siblings.
    /// Returns how many tags were passed over, zero at the end of the stream.
    pub fn skip_subtree(&mut self) -> Result<usize> {
        match self.state {
            ParseState::Error => return Err(Error::invalid_reader_state()),
            ParseState::AtStreamEnd => return Ok(0),
            _ => {}
        }
        let start_depth = self.depth;
        let mut skipped = 0;
        while self.advance_to_next()? && self.depth >= start_depth {
            skipped += 1;
        }
        Ok(skipped)
    }

    /// Read the current tag and everything under it into a [`Tag`], leaving
    /// the reader on whatever follows it. Subtrees nesting deeper than
    /// [`MAX_DEPTH`] levels are refused.
    pub fn materialize_as_tag(&mut self) -> Result<Tag> {
        match self.state {
            ParseState::Error => return Err(Error::invalid_reader_state()),
            ParseState::AtStreamEnd => return Err(Error::end_of_stream()),
            ParseState::AtStreamBeginning | ParseState::AtCompoundEnd => {
                self.advance_to_next()?;
            }
            _ => {}
        }
        let result = self.materialize();
        self.latch(result)
    }

    /// Read the value of the current tag. Only scalars, strings and arrays
    /// have values. A value can be read once, or again until the reader
    /// moves if value caching is on.
    pub fn read_value(&mut self) -> Result<Value> {
        match self.state {
            ParseState::Error => return Err(Error::invalid_reader_state()),
            ParseState::AtStreamEnd => return Err(Error::end_of_stream()),
            _ => {}
        }
        if !self.at_value {
            if !self.cache_tag_values {
                return Err(Error::invalid_operation(NO_VALUE_TO_READ));
            }
            return self
                .value_cache
                .clone()
                .ok_or_else(|| Error::invalid_operation("No value to read."));
        }

        let result = self.read_pending_value();
        let value = self.latch(result)?;
        if self.cache_tag_values {
            self.value_cache = Some(value.clone());
        }
        Ok(value)
    }

    /// Read the remaining elements of the current list, converting each to
    /// `T`. Must be positioned on a list or on one of its elements, and the
    /// elements must be scalars or strings. Afterwards the reader is on the
    /// list's last element, so the next advance leaves the list.
    pub fn read_list_as_array<T: ListElement>(&mut self) -> Result<Vec<T>> {
        let element_type = match self.state {
            ParseState::AtStreamEnd => return Err(Error::end_of_stream()),
            ParseState::Error => return Err(Error::invalid_reader_state()),
            ParseState::AtListBeginning => self.list_type,
            ParseState::InList => self.tag_type,
            _ => {
                return Err(Error::invalid_operation(
                    "ReadListAsArray may only be used on List tags.",
                ))
            }
        };
        if !matches!(
            element_type,
            TagType::End
                | TagType::Byte
                | TagType::Short
                | TagType::Int
                | TagType::Long
                | TagType::Float
                | TagType::Double
                | TagType::String
        ) {
            return Err(Error::invalid_operation(
                "ReadListAsArray may only be used on lists of value types.",
            ));
        }

        if self.state == ParseState::AtListBeginning {
            self.go_down();
            self.tag_type = self.list_type;
            self.state = ParseState::InList;
        }

        let pending = self.at_value;
        let start = match self.list_index {
            None => 0,
            Some(i) if pending => i,
            Some(i) => i + 1,
        };
        let count = self.parent_tag_length.saturating_sub(start);

        self.at_value = false;
        self.value_cache = None;
        let result = self.read_elements(element_type, count);
        let values = self.latch(result)?;

        self.tags_read += count - usize::from(pending);
        self.list_index = self.parent_tag_length.checked_sub(1);
        Ok(values)
    }

    fn advance(&mut self) -> Result<bool> {
        loop {
            match self.state {
                ParseState::AtStreamBeginning => {
                    self.tag_start_offset = self.offset();
                    if self.reader.read_tag_type()? != TagType::Compound {
                        return Err(Error::invalid_format(
                            "Given NBT stream does not start with TAG_Compound.",
                        ));
                    }
                    self.depth = 1;
                    self.tag_type = TagType::Compound;
                    self.read_tag_header(true)?;
                    self.root_name = self.tag_name.clone();
                    trace!("stream root is {:?}", self.root_name);
                    return Ok(true);
                }
                ParseState::AtCompoundBeginning => {
                    self.go_down();
                    self.state = ParseState::InCompound;
                }
                ParseState::InCompound => {
                    if self.at_value {
                        self.skip_value()?;
                    }
                    self.tag_start_offset = self.offset();
                    self.tag_type = self.reader.read_tag_type()?;

                    if self.tag_type != TagType::End {
                        self.read_tag_header(true)?;
                        return Ok(true);
                    }

                    self.tag_name = None;
                    self.state = ParseState::AtCompoundEnd;
                    if !self.skip_end_tags {
                        self.tags_read += 1;
                        return Ok(true);
                    }
                }
                ParseState::AtListBeginning => {
                    self.go_down();
                    self.tag_type = self.list_type;
                    self.state = ParseState::InList;
                }
                ParseState::InList => {
                    if self.at_value {
                        self.skip_value()?;
                    }
                    let next = self.list_index.map_or(0, |i| i + 1);
                    if next < self.parent_tag_length {
                        self.list_index = Some(next);
                        self.tag_start_offset = self.offset();
                        self.read_tag_header(false)?;
                        return Ok(true);
                    }

                    self.go_up()?;
                    match self.parent_tag_type {
                        TagType::List => {
                            self.state = ParseState::InList;
                            self.tag_type = TagType::List;
                        }
                        TagType::Compound => self.state = ParseState::InCompound,
                        _ => return Err(Error::invalid_format(INVALID_PARENT)),
                    }
                }
                ParseState::AtCompoundEnd => {
                    self.go_up()?;
                    match self.parent_tag_type {
                        TagType::List => {
                            self.state = ParseState::InList;
                            self.tag_type = TagType::Compound;
                        }
                        TagType::Compound => self.state = ParseState::InCompound,
                        TagType::Unknown => {
                            self.state = ParseState::AtStreamEnd;
                            return Ok(false);
                        }
                        _ => return Err(Error::invalid_format(INVALID_PARENT)),
                    }
                }
                ParseState::AtStreamEnd => return Ok(false),
                ParseState::Error => return Err(Error::invalid_reader_state()),
            }
        }
    }

    fn read_tag_header(&mut self, read_name: bool) -> Result<()> {
        self.tags_read += 1;
        self.tag_name = if read_name {
            Some(self.reader.read_string()?)
        } else {
            None
        };
        self.tag_length = 0;
        self.list_type = TagType::Unknown;

        match self.tag_type {
            TagType::Byte
            | TagType::Short
            | TagType::Int
            | TagType::Long
            | TagType::Float
            | TagType::Double
            | TagType::String => self.at_value = true,
            TagType::ByteArray | TagType::IntArray | TagType::LongArray => {
                self.tag_length = self.reader.read_length()?;
                self.at_value = true;
            }
            TagType::List => {
                let (list_type, len) = read_list_header(&mut self.reader)?;
                self.list_type = list_type;
                self.tag_length = len;
                self.state = ParseState::AtListBeginning;
            }
            TagType::Compound => self.state = ParseState::AtCompoundBeginning,
            _ => return Err(Error::invalid_format("Trying to read tag of unknown type.")),
        }
        Ok(())
    }

    fn go_down(&mut self) {
        self.frames.push(Frame {
            parent_name: self.parent_name.take(),
            parent_tag_type: self.parent_tag_type,
            list_type: self.list_type,
            parent_tag_length: self.parent_tag_length,
            list_index: self.list_index,
        });

        self.parent_name = self.tag_name.clone();
        self.parent_tag_type = self.tag_type;
        self.parent_tag_length = self.tag_length;
        self.list_index = None;
        self.tag_length = 0;
        self.depth += 1;
    }

    fn go_up(&mut self) -> Result<()> {
        let frame = self
            .frames
            .pop()
            .ok_or_else(|| Error::invalid_format(INVALID_PARENT))?;

        self.parent_name = frame.parent_name;
        self.parent_tag_type = frame.parent_tag_type;
        self.parent_tag_length = frame.parent_tag_length;
        self.list_index = frame.list_index;
        self.list_type = frame.list_type;
        self.tag_length = 0;
        self.depth -= 1;
        Ok(())
    }

    fn skip_value(&mut self) -> Result<()> {
        match self.tag_type {
            TagType::Byte => self.reader.skip(1)?,
            TagType::Short => self.reader.skip(2)?,
            TagType::Int | TagType::Float => self.reader.skip(4)?,
            TagType::Long | TagType::Double => self.reader.skip(8)?,
            TagType::ByteArray => self.reader.skip(self.tag_length)?,
            TagType::IntArray => self.reader.skip(4 * self.tag_length)?,
            TagType::LongArray => self.reader.skip(8 * self.tag_length)?,
            TagType::String => self.reader.skip_string()?,
            _ => return Err(Error::invalid_operation(NON_VALUE_TAG)),
        }
        self.at_value = false;
        self.value_cache = None;
        Ok(())
    }

    fn read_pending_value(&mut self) -> Result<Value> {
        self.at_value = false;
        self.value_cache = None;
        let r = &mut self.reader;
        Ok(match self.tag_type {
            TagType::Byte => Value::Byte(r.read_i8()?),
            TagType::Short => Value::Short(r.read_i16()?),
            TagType::Int => Value::Int(r.read_i32()?),
            TagType::Long => Value::Long(r.read_i64()?),
            TagType::Float => Value::Float(r.read_f32()?),
            TagType::Double => Value::Double(r.read_f64()?),
            TagType::String => Value::String(r.read_string()?),
            TagType::ByteArray => Value::ByteArray(r.read_i8_array(self.tag_length)?),
            TagType::IntArray => Value::IntArray(r.read_i32_array(self.tag_length)?),
            TagType::LongArray => Value::LongArray(r.read_i64_array(self.tag_length)?),
            _ => return Err(Error::invalid_operation(NON_VALUE_TAG)),
        })
    }

    fn read_value_as_tag(&mut self) -> Result<Tag> {
        if !self.at_value {
            return Err(Error::invalid_operation(NO_VALUE_TO_READ));
        }
        let value = self.read_pending_value()?;
        Ok(Tag::from_parts(self.tag_name.clone(), value))
    }

    fn read_elements<T: ListElement>(
        &mut self,
        element_type: TagType,
        count: usize,
    ) -> Result<Vec<T>> {
        let mut out = Vec::with_capacity(count.min(CHUNK_SIZE));
        let r = &mut self.reader;
        for _ in 0..count {
            let value = match element_type {
                TagType::Byte => Value::Byte(r.read_i8()?),
                TagType::Short => Value::Short(r.read_i16()?),
                TagType::Int => Value::Int(r.read_i32()?),
                TagType::Long => Value::Long(r.read_i64()?),
                TagType::Float => Value::Float(r.read_f32()?),
                TagType::Double => Value::Double(r.read_f64()?),
                TagType::String => Value::String(r.read_string()?),
                _ => return Err(Error::invalid_operation(NON_VALUE_TAG)),
            };
            out.push(T::from_value(value)?);
        }
        Ok(out)
    }

    fn materialize(&mut self) -> Result<Tag> {
        let root = match self.tag_type {
            TagType::Compound | TagType::List => self.container_tag()?,
            _ if self.at_value => {
                let tag = self.read_value_as_tag()?;
                self.advance_to_next()?;
                return Ok(tag);
            }
            // End tags have no counterpart in the tree.
            _ => return Err(Error::invalid_operation(NO_VALUE_TO_READ)),
        };

        let start_depth = self.depth;
        let mut stack = vec![(root, start_depth)];
        loop {
            self.advance_to_next()?;
            while stack.len() > 1 && stack.last().map_or(false, |(_, d)| self.depth <= *d) {
                close_top(&mut stack)?;
            }
            if self.depth <= start_depth {
                break;
            }

            match self.tag_type {
                TagType::Compound | TagType::List => {
                    if stack.len() >= MAX_DEPTH {
                        return Err(Error::too_deep(MAX_DEPTH));
                    }
                    let tag = self.container_tag()?;
                    stack.push((tag, self.depth));
                }
                TagType::End => {}
                _ => {
                    let tag = self.read_value_as_tag()?;
                    if let Some((parent, _)) = stack.last_mut() {
                        attach(parent, tag)?;
                    }
                }
            }
        }

        while stack.len() > 1 {
            close_top(&mut stack)?;
        }
        stack
            .pop()
            .map(|(tag, _)| tag)
            .ok_or_else(|| Error::invalid_operation(NO_VALUE_TO_READ))
    }

    /// An empty container matching the current tag.
    fn container_tag(&self) -> Result<Tag> {
        let value = if self.tag_type == TagType::List {
            Value::List(List::with_type(self.list_type)?)
        } else {
            Value::Compound(Compound::new())
        };
        Ok(Tag::from_parts(self.tag_name.clone(), value))
    }

    fn latch<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            if e.is_decode_error() && self.state != ParseState::Error {
                debug!("reader entering error state: {}", e);
                self.state = ParseState::Error;
            }
        }
        result
    }

    fn offset(&self) -> usize {
        self.reader.get_ref().position() - self.stream_start
    }
}

/// Pop the innermost open container and add it to the one enclosing it.
fn close_top(stack: &mut Vec<(Tag, usize)>) -> Result<()> {
    if let Some((child, _)) = stack.pop() {
        if let Some((parent, _)) = stack.last_mut() {
            attach(parent, child)?;
        }
    }
    Ok(())
}

fn attach(parent: &mut Tag, child: Tag) -> Result<()> {
    let result = match parent.value_mut() {
        Value::Compound(c) => c.append(child),
        Value::List(l) => l.append(child),
        _ => return Err(Error::invalid_format(INVALID_PARENT)),
    };
    result.map_err(|e| Error::invalid_format(e.message()))
}

impl fmt::Display for NbtReader<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}. {}", self.tags_read, self.tag_type)?;
        if self.is_list() {
            write!(f, "<{}>", self.list_type)?;
        }
        if self.has_length() {
            write!(f, "[{}]", self.tag_length)?;
        }
        write!(f, " {}", self.tag_name.as_deref().unwrap_or(""))
    }
}

/// Types a list's elements can be read as with
/// [`NbtReader::read_list_as_array`].
///
/// Numbers convert between each other with `as` casts, so narrowing wraps or
/// saturates. Numbers and strings convert through their text form.
pub trait ListElement: Sized {
    fn from_value(value: Value) -> Result<Self>;
}

macro_rules! numeric_element {
    ($($ty:ty),*) => {
        $(
            impl ListElement for $ty {
                fn from_value(value: Value) -> Result<Self> {
                    match value {
                        Value::Byte(v) => Ok(v as $ty),
                        Value::Short(v) => Ok(v as $ty),
                        Value::Int(v) => Ok(v as $ty),
                        Value::Long(v) => Ok(v as $ty),
                        Value::Float(v) => Ok(v as $ty),
                        Value::Double(v) => Ok(v as $ty),
                        Value::String(s) => s.trim().parse::<$ty>().map_err(|_| {
                            Error::invalid_format(format!(
                                "Cannot convert {:?} to {}",
                                s,
                                stringify!($ty)
                            ))
                        }),
                        other => Err(Error::invalid_format(format!(
                            "Cannot convert {} to {}",
                            other.tag_type(),
                            stringify!($ty)
                        ))),
                    }
                }
            }
        )*
    };
}

numeric_element!(i8, u8, i16, i32, i64, f32, f64);

impl ListElement for String {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            Value::Byte(v) => Ok(v.to_string()),
            Value::Short(v) => Ok(v.to_string()),
            Value::Int(v) => Ok(v.to_string()),
            Value::Long(v) => Ok(v.to_string()),
            Value::Float(v) => Ok(v.to_string()),
            Value::Double(v) => Ok(v.to_string()),
            other => Err(Error::invalid_format(format!(
                "Cannot convert {} to String",
                other.tag_type()
            ))),
        }
    }
}
