//! List registry: sortable groups, their containers, and ordered items.
//!
//! A group is keyed by a [`ListKey`] and holds every container and item that
//! may exchange items with each other. Each container owns the ordered
//! collection of its item ids; the engine reorders those collections when a
//! drag is committed and the host mirrors the change into its own models.
//!
//! The registry is an explicit service object. Whoever builds the sortable
//! surface owns it and hands it to the engine; there is no ambient state.
//! A group exists exactly as long as it has at least one member.

#[cfg(test)]
#[path = "registry_test.rs"]
mod registry_test;

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use tracing::trace;
use uuid::Uuid;

use crate::SortableError;
use crate::reorder;

/// Opaque handle for a draggable item.
pub type ItemId = Uuid;

/// Opaque handle for a container.
pub type ContainerId = Uuid;

/// Identifier grouping containers that may exchange items.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ListKey(String);

impl ListKey {
    /// # Errors
    ///
    /// Returns `MissingIdentifier` for an empty or blank name.
    pub fn new(name: &str) -> Result<Self, SortableError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SortableError::MissingIdentifier);
        }
        Ok(Self(name.to_owned()))
    }

    /// The configured group name when present, otherwise the scope id.
    ///
    /// # Errors
    ///
    /// Returns `MissingIdentifier` when neither is usable.
    pub fn resolve(group: Option<&str>, scope_id: &str) -> Result<Self, SortableError> {
        match group.map(str::trim).filter(|g| !g.is_empty()) {
            Some(name) => Self::new(name),
            None => Self::new(scope_id),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ListKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One registered participant, in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Member {
    Container(ContainerId),
    Item(ItemId),
}

/// User-designated helper and placeholder nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Templates {
    pub helper: Option<Uuid>,
    pub placeholder: Option<Uuid>,
}

#[derive(Debug, Clone, Default)]
struct ContainerEntry {
    items: Vec<ItemId>,
    templates: Templates,
}

#[derive(Debug, Clone)]
struct ItemEntry {
    container: ContainerId,
    templates: Templates,
    handles: Vec<Uuid>,
}

/// The result of a committed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub from_container: ContainerId,
    pub to_container: ContainerId,
    pub index_from: usize,
    pub index_to: usize,
}

impl Move {
    /// Whether the item ended up somewhere other than where it started.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.from_container != self.to_container || self.index_from != self.index_to
    }
}

/// All members of one sortable group.
#[derive(Debug, Clone, Default)]
pub struct Group {
    members: Vec<Member>,
    containers: HashMap<ContainerId, ContainerEntry>,
    items: HashMap<ItemId, ItemEntry>,
    version: u64,
    sorting: bool,
}

impl Group {
    /// Members in registration order.
    #[must_use]
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    #[must_use]
    pub fn contains(&self, member: Member) -> bool {
        match member {
            Member::Container(id) => self.containers.contains_key(&id),
            Member::Item(id) => self.items.contains_key(&id),
        }
    }

    /// Ordered item ids of `container`.
    #[must_use]
    pub fn items(&self, container: ContainerId) -> Option<&[ItemId]> {
        self.containers.get(&container).map(|c| c.items.as_slice())
    }

    #[must_use]
    pub fn container_of(&self, item: ItemId) -> Option<ContainerId> {
        self.items.get(&item).map(|i| i.container)
    }

    #[must_use]
    pub fn index_of(&self, item: ItemId) -> Option<usize> {
        let container = self.containers.get(&self.container_of(item)?)?;
        container.items.iter().position(|id| *id == item)
    }

    /// Templates for `item`, falling back to its container's.
    #[must_use]
    pub fn templates(&self, item: ItemId) -> Templates {
        let Some(entry) = self.items.get(&item) else {
            return Templates::default();
        };
        let inherited = self
            .containers
            .get(&entry.container)
            .map(|c| c.templates)
            .unwrap_or_default();
        Templates {
            helper: entry.templates.helper.or(inherited.helper),
            placeholder: entry.templates.placeholder.or(inherited.placeholder),
        }
    }

    /// Bumped on every membership or ordering change.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Whether a drag is in progress for this group.
    #[must_use]
    pub fn is_sorting(&self) -> bool {
        self.sorting
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    fn touch(&mut self) {
        self.version = self.version.wrapping_add(1);
    }
}

/// Registry of sortable groups keyed by [`ListKey`].
#[derive(Debug, Clone, Default)]
pub struct ListRegistry {
    groups: HashMap<ListKey, Group>,
    owners: HashMap<Uuid, ListKey>,
    handles: HashMap<Uuid, ItemId>,
}

impl ListRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a container under `key`, creating the group on first use.
    pub fn register_container(&mut self, key: &ListKey, id: ContainerId) -> Result<(), SortableError> {
        if self.owners.contains_key(&id) {
            return Err(SortableError::DuplicateContainer(id));
        }
        let group = self.groups.entry(key.clone()).or_default();
        group.members.push(Member::Container(id));
        group.containers.insert(id, ContainerEntry::default());
        group.touch();
        self.owners.insert(id, key.clone());
        trace!(%key, %id, "registry: container registered");
        Ok(())
    }

    /// Register an item into `container` at `index` (appended when `None` or
    /// past the end). Returns the index it landed at.
    pub fn register_item(
        &mut self,
        key: &ListKey,
        container: ContainerId,
        item: ItemId,
        index: Option<usize>,
    ) -> Result<usize, SortableError> {
        if self.owners.contains_key(&item) {
            return Err(SortableError::DuplicateItem(item));
        }
        let group = self
            .groups
            .get_mut(key)
            .ok_or(SortableError::UnknownContainer(container))?;
        let entry = group
            .containers
            .get_mut(&container)
            .ok_or(SortableError::UnknownContainer(container))?;
        let at = reorder::insert_clamped(&mut entry.items, index.unwrap_or(usize::MAX), item);
        group.members.push(Member::Item(item));
        group
            .items
            .insert(item, ItemEntry { container, templates: Templates::default(), handles: Vec::new() });
        group.touch();
        self.owners.insert(item, key.clone());
        trace!(%key, %container, %item, index = at, "registry: item registered");
        Ok(at)
    }

    /// Remove a container or item. Removing a container also removes its
    /// items. The group disappears with its last member.
    ///
    /// Returns the key the id was registered under.
    pub fn deregister(&mut self, id: Uuid) -> Option<ListKey> {
        let key = self.owners.remove(&id)?;
        let Some(group) = self.groups.get_mut(&key) else {
            return Some(key);
        };

        let mut removed_items = Vec::new();
        if let Some(entry) = group.items.remove(&id) {
            if let Some(container) = group.containers.get_mut(&entry.container) {
                container.items.retain(|i| *i != id);
            }
            removed_items.push((id, entry));
        } else if let Some(container) = group.containers.remove(&id) {
            for item in container.items {
                if let Some(entry) = group.items.remove(&item) {
                    removed_items.push((item, entry));
                }
            }
        }

        group.members.retain(|m| match m {
            Member::Container(c) => *c != id,
            Member::Item(i) => *i != id && !removed_items.iter().any(|(r, _)| r == i),
        });
        group.touch();

        for (item, entry) in &removed_items {
            if *item != id {
                self.owners.remove(item);
            }
            for handle in &entry.handles {
                self.handles.remove(handle);
            }
        }

        if group.members.is_empty() {
            self.groups.remove(&key);
            trace!(%key, "registry: group removed");
        }
        trace!(%key, %id, "registry: deregistered");
        Some(key)
    }

    /// Key an id is registered under.
    #[must_use]
    pub fn key_of(&self, id: Uuid) -> Option<&ListKey> {
        self.owners.get(&id)
    }

    #[must_use]
    pub fn group(&self, key: &ListKey) -> Option<&Group> {
        self.groups.get(key)
    }

    /// Whether `id` is registered under `key`.
    #[must_use]
    pub fn is_registered(&self, key: &ListKey, id: Uuid) -> bool {
        self.owners.get(&id) == Some(key)
    }

    /// Ordered item ids of `container`, wherever it is registered.
    #[must_use]
    pub fn items(&self, container: ContainerId) -> Option<&[ItemId]> {
        let key = self.owners.get(&container)?;
        self.groups.get(key)?.items(container)
    }

    /// Container and index of `item`.
    #[must_use]
    pub fn position(&self, item: ItemId) -> Option<(ContainerId, usize)> {
        let group = self.groups.get(self.owners.get(&item)?)?;
        Some((group.container_of(item)?, group.index_of(item)?))
    }

    /// Number of live groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &ListKey> {
        self.groups.keys()
    }

    /// Attach an extra drag handle to `item`.
    pub fn add_handle(&mut self, item: ItemId, handle: Uuid) -> Result<(), SortableError> {
        let entry = self.item_entry_mut(item)?;
        entry.handles.push(handle);
        self.handles.insert(handle, item);
        Ok(())
    }

    /// Map a pointer-down target (an item or one of its handles) to its item.
    #[must_use]
    pub fn resolve_target(&self, target: Uuid) -> Option<ItemId> {
        if let Some(item) = self.handles.get(&target) {
            return Some(*item);
        }
        let group = self.groups.get(self.owners.get(&target)?)?;
        group.items.contains_key(&target).then_some(target)
    }

    pub fn set_item_templates(&mut self, item: ItemId, templates: Templates) -> Result<(), SortableError> {
        self.item_entry_mut(item)?.templates = templates;
        Ok(())
    }

    pub fn set_container_templates(
        &mut self,
        container: ContainerId,
        templates: Templates,
    ) -> Result<(), SortableError> {
        let key = self
            .owners
            .get(&container)
            .ok_or(SortableError::UnknownContainer(container))?;
        let entry = self
            .groups
            .get_mut(key)
            .and_then(|g| g.containers.get_mut(&container))
            .ok_or(SortableError::UnknownContainer(container))?;
        entry.templates = templates;
        Ok(())
    }

    pub(crate) fn set_sorting(&mut self, key: &ListKey, sorting: bool) {
        if let Some(group) = self.groups.get_mut(key) {
            group.sorting = sorting;
        }
    }

    /// Splice `item` out of its container and into `dest`.
    ///
    /// `target_index` is the index of the candidate the item was dropped on,
    /// before the source removal; `after` places it behind that candidate.
    pub(crate) fn commit_move(
        &mut self,
        item: ItemId,
        dest: ContainerId,
        target_index: usize,
        after: bool,
    ) -> Option<Move> {
        let key = self.owners.get(&item)?;
        let group = self.groups.get_mut(key)?;
        if !group.containers.contains_key(&dest) {
            return None;
        }
        let source = group.items.get(&item)?.container;
        let index_from = group.containers.get(&source)?.items.iter().position(|i| *i == item)?;

        let mut index_to = target_index;
        if source == dest && index_to > index_from {
            index_to -= 1;
        }
        if after {
            index_to += 1;
        }

        if source == dest {
            let entry = group.containers.get_mut(&source)?;
            index_to = index_to.min(entry.items.len() - 1);
            reorder::move_item(&mut entry.items, index_from, index_to);
        } else {
            let from_entry = group.containers.get_mut(&source)?;
            from_entry.items.remove(index_from);
            let to_entry = group.containers.get_mut(&dest)?;
            index_to = reorder::insert_clamped(&mut to_entry.items, index_to, item);
            if let Some(entry) = group.items.get_mut(&item) {
                entry.container = dest;
            }
        }
        group.touch();

        Some(Move { from_container: source, to_container: dest, index_from, index_to })
    }

    fn item_entry_mut(&mut self, item: ItemId) -> Result<&mut ItemEntry, SortableError> {
        let key = self.owners.get(&item).ok_or(SortableError::UnknownItem(item))?;
        self.groups
            .get_mut(key)
            .and_then(|g| g.items.get_mut(&item))
            .ok_or(SortableError::UnknownItem(item))
    }
}
