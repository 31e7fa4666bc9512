//! Selection state for the tree-list model.
//!
//! The selection mode is fixed when the tree is constructed (from its
//! [`StyleFlags`](crate::StyleFlags)): single-selection trees keep at most
//! one selected item, multi-selection trees keep an ordered set. Selection
//! order is preserved so that enumerating the selection is deterministic.

use std::collections::HashSet;

use crate::item::ItemId;

/// How many items may be selected at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// At most one item is selected; selecting replaces the previous one.
    #[default]
    Single,
    /// Any number of items may be selected.
    Multi,
}

/// Ordered selection set with O(1) membership checks.
#[derive(Debug, Default)]
pub(crate) struct SelectionSet {
    mode: SelectionMode,
    /// Selected items in selection order.
    order: Vec<ItemId>,
    /// Membership index over `order`.
    members: HashSet<ItemId>,
}

impl SelectionSet {
    pub(crate) fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            order: Vec::new(),
            members: HashSet::new(),
        }
    }

    pub(crate) fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Adds an item to the selection, honoring the mode.
    pub(crate) fn select(&mut self, id: ItemId) {
        if self.members.contains(&id) {
            return;
        }
        if self.mode == SelectionMode::Single {
            self.clear();
        }
        self.members.insert(id);
        self.order.push(id);
    }

    pub(crate) fn unselect(&mut self, id: ItemId) {
        if self.members.remove(&id) {
            self.order.retain(|&other| other != id);
        }
    }

    pub(crate) fn clear(&mut self) {
        self.order.clear();
        self.members.clear();
    }

    pub(crate) fn contains(&self, id: ItemId) -> bool {
        self.members.contains(&id)
    }

    /// First selected item in selection order.
    pub(crate) fn first(&self) -> Option<ItemId> {
        self.order.first().copied()
    }

    pub(crate) fn as_slice(&self) -> &[ItemId] {
        &self.order
    }

    /// Drops every listed item from the selection (used when items are
    /// deleted from the tree).
    pub(crate) fn purge(&mut self, removed: &[ItemId]) {
        let mut changed = false;
        for id in removed {
            changed |= self.members.remove(id);
        }
        if changed {
            self.order.retain(|id| self.members.contains(id));
        }
    }
}
