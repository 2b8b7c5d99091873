//! Ordered member lists for groups and arrays.

use crate::lookup::names_match;
use crate::setting::SettingId;

/// Number of slots the backing storage grows by when full
pub const CHUNK_SIZE: usize = 10;

/// Ordered, growable sequence of settings owned by a group or array.
///
/// Holds handles into the owning [`Config`](crate::Config); the settings
/// themselves live in the tree's arena. Order reflects insertion order and
/// survives removals.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SettingList {
    elements: Vec<SettingId>,
}

impl SettingList {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Allocated slots, including unused ones
    pub fn capacity(&self) -> usize {
        self.elements.capacity()
    }

    pub fn get(&self, index: usize) -> Option<SettingId> {
        self.elements.get(index).copied()
    }

    pub fn first(&self) -> Option<SettingId> {
        self.elements.first().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = SettingId> + '_ {
        self.elements.iter().copied()
    }

    /// Append a setting, growing storage by [`CHUNK_SIZE`] when full
    pub fn append(&mut self, setting: SettingId) {
        if self.elements.len() == self.elements.capacity() {
            self.elements.reserve_exact(CHUNK_SIZE);
        }
        self.elements.push(setting);
    }

    /// Linear search for the first member whose name matches `name` up to
    /// the first path delimiter. Unnamed members never match.
    pub fn find<'a, F>(&self, name: &str, name_of: F) -> Option<(SettingId, usize)>
    where
        F: Fn(SettingId) -> Option<&'a str>,
    {
        self.elements
            .iter()
            .enumerate()
            .find(|(_, id)| name_of(**id).is_some_and(|stored| names_match(name, stored)))
            .map(|(index, id)| (*id, index))
    }

    /// Remove the member at `index`, shifting later members left.
    /// Capacity is left as is.
    pub fn remove(&mut self, index: usize) -> Option<SettingId> {
        if index < self.elements.len() {
            Some(self.elements.remove(index))
        } else {
            None
        }
    }

    /// Detach every member, leaving the list empty
    pub(crate) fn take_all(&mut self) -> Vec<SettingId> {
        std::mem::take(&mut self.elements)
    }
}
