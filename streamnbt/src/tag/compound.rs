use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use super::{Tag, Value};
use crate::error::{Error, Result};

/// An ordered collection of uniquely named tags.
///
/// Iteration follows insertion order, lookups go through a name index. Every
/// member's name is its key in the index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Compound {
    tags: IndexMap<String, Tag>,
}

impl Compound {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a compound from named tags, failing on the first unnamed or
    /// duplicate one.
    pub fn from_tags(tags: impl IntoIterator<Item = Tag>) -> Result<Self> {
        let mut compound = Self::new();
        compound.extend(tags)?;
        Ok(compound)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Add a tag to the end. The tag must be named, and no member may
    /// already have that name. On failure the compound is unchanged.
    pub fn append(&mut self, tag: Tag) -> Result<()> {
        let name = match tag.name() {
            Some(name) => name.to_owned(),
            None => {
                return Err(Error::argument(
                    "Only named tags are allowed in compound tags.",
                ))
            }
        };
        if self.tags.contains_key(&name) {
            return Err(Error::argument(format!(
                "A tag with the name '{}' has already been added.",
                name
            )));
        }
        self.tags.insert(name, tag);
        Ok(())
    }

    /// Append every tag in turn, stopping at the first failure. Tags appended
    /// before the failure stay.
    pub fn extend(&mut self, tags: impl IntoIterator<Item = Tag>) -> Result<()> {
        for tag in tags {
            self.append(tag)?;
        }
        Ok(())
    }

    /// Put a named tag in the compound, replacing any member of the same name
    /// in place. Returns the replaced member, now detached.
    pub fn insert(&mut self, tag: Tag) -> Result<Option<Tag>> {
        let name = tag
            .name()
            .ok_or_else(|| Error::argument("Only named tags are allowed in compound tags."))?
            .to_owned();
        Ok(self.tags.insert(name, tag))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tags.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Tag> {
        self.tags.get(name)
    }

    /// Mutable access to a member's value. Its name stays fixed, use
    /// [`Compound::rename`] for that.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.tags.get_mut(name).map(Tag::value_mut)
    }

    /// Position of the named member in iteration order.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.tags.get_index_of(name)
    }

    /// Remove the named member, keeping the order of the rest. The removed
    /// tag keeps its name and can be added elsewhere.
    pub fn remove(&mut self, name: &str) -> Option<Tag> {
        self.tags.shift_remove(name)
    }

    pub fn remove_all(&mut self) {
        self.tags.clear();
    }

    /// Rename a member in place. Fails if there is no member called `old`, or
    /// if another member is already called `new`.
    pub fn rename(&mut self, old: &str, new: &str) -> Result<()> {
        if old == new {
            return Ok(());
        }
        if self.tags.contains_key(new) {
            return Err(Error::argument(format!(
                "Cannot rename: a tag named '{}' already exists in this compound.",
                new
            )));
        }
        if !self.tags.contains_key(old) {
            return Err(Error::argument(format!(
                "Cannot rename: no tag named '{}' found.",
                old
            )));
        }

        // Rebuild to keep the member at the same position.
        self.tags = std::mem::take(&mut self.tags)
            .into_iter()
            .map(|(name, mut tag)| {
                if name == old {
                    tag.set_name(Some(new.to_owned()));
                    (new.to_owned(), tag)
                } else {
                    (name, tag)
                }
            })
            .collect();
        Ok(())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tags.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.tags.values()
    }

    /// Iterate over members' names with mutable access to their values.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Value)> {
        self.tags
            .iter_mut()
            .map(|(name, tag)| (name.as_str(), tag.value_mut()))
    }
}

impl IntoIterator for Compound {
    type Item = Tag;
    type IntoIter = indexmap::map::IntoValues<String, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.into_values()
    }
}

impl Serialize for Compound {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.tags.iter().map(|(name, tag)| (name, tag.value())))
    }
}
