use serde::{Serialize, Serializer};

use super::{Compound, Tag};
use crate::error::{Error, Result};
use crate::TagType;

/// An ordered sequence of unnamed tags that all have the same kind.
///
/// The element kind (`list_type`) starts as [`TagType::Unknown`] unless given,
/// and is pinned by the first element added. While the list is empty it may
/// be changed freely, including to `End` for a list that is deliberately left
/// untyped.
#[derive(Debug, Clone, PartialEq)]
pub struct List {
    list_type: TagType,
    items: Vec<Tag>,
}

impl Default for List {
    fn default() -> Self {
        Self::new()
    }
}

impl List {
    /// An empty list whose element type will be taken from its first element.
    pub fn new() -> Self {
        Self {
            list_type: TagType::Unknown,
            items: Vec::new(),
        }
    }

    /// An empty list of the given element type.
    pub fn with_type(list_type: TagType) -> Result<Self> {
        let mut list = Self::new();
        list.set_list_type(list_type)?;
        Ok(list)
    }

    /// Build a list from unnamed tags, failing on the first one that does not
    /// fit.
    pub fn from_tags(tags: impl IntoIterator<Item = Tag>) -> Result<Self> {
        let mut list = Self::new();
        for tag in tags {
            list.append(tag)?;
        }
        Ok(list)
    }

    pub fn list_type(&self) -> TagType {
        self.list_type
    }

    /// Set the element type. A non-empty list only accepts the type of the
    /// elements it already holds.
    pub fn set_list_type(&mut self, list_type: TagType) -> Result<()> {
        if list_type == TagType::End && !self.items.is_empty() {
            return Err(Error::argument(
                "Only empty list tags may have TagType of End.",
            ));
        }
        if let Some(first) = self.items.first() {
            let actual = first.tag_type();
            if actual != list_type {
                return Err(Error::argument(format!(
                    "Given tag type ({}) does not match actual element type ({}).",
                    list_type, actual
                )));
            }
        }
        self.list_type = list_type;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn append(&mut self, tag: Tag) -> Result<()> {
        self.insert(self.items.len(), tag)
    }

    /// Insert an unnamed tag at `index`. On failure the list is unchanged.
    pub fn insert(&mut self, index: usize, tag: Tag) -> Result<()> {
        self.check_element(&tag)?;
        if index > self.items.len() {
            return Err(Error::out_of_range(
                "index",
                "the given value is not a valid index in the list",
            ));
        }
        if self.list_type == TagType::Unknown {
            self.list_type = tag.tag_type();
        }
        self.items.insert(index, tag);
        Ok(())
    }

    /// Replace the element at `index`, returning the old one.
    pub fn replace(&mut self, index: usize, tag: Tag) -> Result<Tag> {
        self.check_element(&tag)?;
        let slot = self.items.get_mut(index).ok_or_else(|| {
            Error::out_of_range("index", "the given value is not a valid index in the list")
        })?;
        Ok(std::mem::replace(slot, tag))
    }

    pub fn get(&self, index: usize) -> Option<&Tag> {
        self.items.get(index)
    }

    /// The compound at `index`, for editing in place.
    pub fn compound_mut(&mut self, index: usize) -> Option<&mut Compound> {
        self.items.get_mut(index)?.as_compound_mut()
    }

    /// The list at `index`, for editing in place.
    pub fn list_mut(&mut self, index: usize) -> Option<&mut List> {
        self.items.get_mut(index)?.as_list_mut()
    }

    /// Index of the first element equal to `tag`.
    pub fn index_of(&self, tag: &Tag) -> Option<usize> {
        self.items.iter().position(|t| t == tag)
    }

    pub fn contains(&self, tag: &Tag) -> bool {
        self.index_of(tag).is_some()
    }

    /// Remove and return the element at `index`. The list keeps its type.
    pub fn remove_at(&mut self, index: usize) -> Result<Tag> {
        if index >= self.items.len() {
            return Err(Error::out_of_range(
                "index",
                "the given value is not a valid index in the list",
            ));
        }
        Ok(self.items.remove(index))
    }

    /// Remove the first element equal to `tag`. Returns whether one was found.
    pub fn remove(&mut self, tag: &Tag) -> bool {
        match self.index_of(tag) {
            Some(i) => {
                self.items.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn remove_all(&mut self) {
        self.items.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tag> {
        self.items.iter()
    }

    fn check_element(&self, tag: &Tag) -> Result<()> {
        if tag.name().is_some() {
            return Err(Error::argument(
                "Named tag given. A list may only contain unnamed tags.",
            ));
        }
        if self.list_type != TagType::Unknown && tag.tag_type() != self.list_type {
            return Err(Error::argument(format!(
                "Items in this list must be of type {}. Given type: {}.",
                self.list_type,
                tag.tag_type()
            )));
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Tag;
    type IntoIter = std::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for List {
    type Item = Tag;
    type IntoIter = std::vec::IntoIter<Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl Serialize for List {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.items.iter().map(Tag::value))
    }
}
