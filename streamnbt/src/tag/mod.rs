//! The in-memory tag tree, and the codec that reads and writes it.
//!
//! A [`Tag`] is a name plus a [`Value`]. [`Compound`] and [`List`] own their
//! children, so every tag has at most one parent simply because it can only
//! be stored in one place. Moving a tag to another container means removing
//! it from the first one, which hands back ownership.
//!
//! Names of tags that are already inside a container cannot be changed
//! directly: containers only lend out `&Tag` or `&mut Value`. Renaming a
//! compound member goes through [`Compound::rename`], which keeps the name
//! index consistent.

mod codec;
mod compound;
mod list;
mod value;

pub use codec::{read_root, skip_payload, write_payload, write_tag, TagInfo, MAX_DEPTH};
pub use compound::Compound;
pub use list::List;
pub use value::Value;

pub(crate) use codec::read_list_header;

use serde::Serialize;

use crate::TagType;

/// A node in an NBT tree.
///
/// The name is `None` for list elements, and for tags that have been built but
/// not yet named. Cloning produces a deep, detached copy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tag {
    name: Option<String>,
    value: Value,
}

impl Tag {
    /// A named tag, ready to be put in a compound.
    pub fn named(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: Some(name.into()),
            value: value.into(),
        }
    }

    /// An unnamed tag, ready to be put in a list.
    pub fn unnamed(value: impl Into<Value>) -> Self {
        Self {
            name: None,
            value: value.into(),
        }
    }

    pub(crate) fn from_parts(name: Option<String>, value: Value) -> Self {
        Self { name, value }
    }

    /// An empty named compound.
    pub fn compound(name: impl Into<String>) -> Self {
        Self::named(name, Compound::new())
    }

    /// An empty named list of the given element type.
    pub fn list(name: impl Into<String>, list_type: TagType) -> crate::Result<Self> {
        Ok(Self::named(name, List::with_type(list_type)?))
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Change the name. Only possible on a tag that is not in a container.
    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    pub fn tag_type(&self) -> TagType {
        self.value.tag_type()
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut Value {
        &mut self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    pub fn into_parts(self) -> (Option<String>, Value) {
        (self.name, self.value)
    }

    /// The child with the given name, if this is a compound.
    pub fn get(&self, name: &str) -> Option<&Tag> {
        self.value.as_compound()?.get(name)
    }

    /// The element at `index`, if this is a list.
    pub fn at(&self, index: usize) -> Option<&Tag> {
        self.value.as_list()?.get(index)
    }

    pub fn as_compound(&self) -> Option<&Compound> {
        self.value.as_compound()
    }

    pub fn as_compound_mut(&mut self) -> Option<&mut Compound> {
        self.value.as_compound_mut()
    }

    pub fn as_list(&self) -> Option<&List> {
        self.value.as_list()
    }

    pub fn as_list_mut(&mut self) -> Option<&mut List> {
        self.value.as_list_mut()
    }
}
