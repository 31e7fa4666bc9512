//! Hierarchical tree-list model.
//!
//! [`TreeListModel`] is the data layer of a tree-list control: a forest of
//! items anchored by a synthetic root, where each item carries one text
//! value per column, an expansion flag, a tri-state checkbox and a pair of
//! icon ids. Items are addressed by stable [`ItemId`] handles.
//!
//! The model is single-threaded and synchronous: every operation runs to
//! completion on the calling thread, matching a widget object model where
//! mutation happens on the UI thread. It owns all item and column records;
//! handles are borrow-only references.
//!
//! # Example
//!
//! ```
//! use arbor_treelist::{ColumnAlignment, StyleFlags, TreeListModel};
//!
//! let mut tree = TreeListModel::with_style(StyleFlags::default().with_three_state());
//! tree.create_column("Name", 120, ColumnAlignment::Left);
//!
//! let root = tree.root();
//! let docs = tree.append(root, "Documents").unwrap();
//! let file = tree.append(docs, "notes.txt").unwrap();
//!
//! assert_eq!(tree.parent_of(file), Some(docs));
//! assert_eq!(tree.text(file, 0), "notes.txt");
//! ```

use slotmap::SlotMap;
use tracing::{debug, trace};

use crate::buffer::{copy_utf8_truncated, TextCopy};
use crate::column::{Column, ColumnAlignment};
use crate::error::{Error, Result};
use crate::item::{CheckState, ItemId, ItemRecord, NO_IMAGE};
use crate::selection::{SelectionMode, SelectionSet};
use crate::style::StyleFlags;

/// Active sort key: column index and direction.
#[derive(Debug, Clone, Copy)]
struct SortKey {
    column: usize,
    ascending: bool,
}

/// Where a new item goes among its siblings.
enum InsertPos {
    Append,
    Prepend,
    After(ItemId),
}

/// An ordered forest of items with per-item text columns, expand/collapse
/// state, selection and tri-state checkboxes.
///
/// Structural invariants, maintained by every operation:
///
/// - every item except the synthetic root has exactly one parent, and the
///   children of a parent form an ordered sequence (no cycles);
/// - the root is a valid handle but is never deletable, never selectable
///   and never has text;
/// - handles of deleted items are never reissued for new items.
///
/// Operations given a stale or foreign handle return the neutral value
/// (empty text, `false`, `None`); only malformed structural requests return
/// an [`Error`].
pub struct TreeListModel {
    items: SlotMap<ItemId, ItemRecord>,
    root: ItemId,
    columns: Vec<Column>,
    selection: SelectionSet,
    style: StyleFlags,
    sort: Option<SortKey>,
}

impl Default for TreeListModel {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeListModel {
    /// Creates an empty tree with default style: no checkboxes, single
    /// selection.
    pub fn new() -> Self {
        Self::with_style(StyleFlags::default())
    }

    /// Creates an empty tree with the given style flags.
    ///
    /// The style (checkbox support, indeterminate support and the selection
    /// mode) is fixed for the lifetime of the tree.
    pub fn with_style(style: StyleFlags) -> Self {
        let mut items = SlotMap::with_key();
        let root = items.insert(ItemRecord::root());
        let mode = if style.multiple {
            SelectionMode::Multi
        } else {
            SelectionMode::Single
        };
        debug!(style = style.bits(), ?mode, "created tree-list model");
        Self {
            items,
            root,
            columns: Vec::new(),
            selection: SelectionSet::new(mode),
            style,
            sort: None,
        }
    }

    /// Returns the style flags the tree was created with.
    pub fn style(&self) -> StyleFlags {
        self.style
    }

    /// Returns the synthetic root item.
    ///
    /// The root is always present, anchors the top-level items as its
    /// children, and is never itself visible.
    pub fn root(&self) -> ItemId {
        self.root
    }

    /// Returns `true` if the handle refers to a live item in this tree.
    pub fn contains(&self, item: ItemId) -> bool {
        self.items.contains_key(item)
    }

    /// Number of items in the tree, excluding the synthetic root.
    pub fn item_count(&self) -> usize {
        self.items.len() - 1
    }

    // =========================================================================
    // Columns
    // =========================================================================

    /// Appends a column and returns its index.
    pub fn create_column(
        &mut self,
        label: impl Into<String>,
        width: i32,
        alignment: ColumnAlignment,
    ) -> usize {
        self.columns.push(Column::new(label, width, alignment));
        self.columns.len() - 1
    }

    /// Deletes the column at `index`.
    ///
    /// Returns `false` if the index is out of range. On success the column's
    /// text slot is removed from every item and later columns shift down by
    /// one; an active sort key on the deleted column is cleared, one past it
    /// is renumbered.
    pub fn delete_column(&mut self, index: usize) -> bool {
        if index >= self.columns.len() {
            return false;
        }
        self.columns.remove(index);
        for rec in self.items.values_mut() {
            if index < rec.texts.len() {
                rec.texts.remove(index);
            }
        }
        self.sort = match self.sort {
            Some(key) if key.column == index => None,
            Some(key) if key.column > index => Some(SortKey {
                column: key.column - 1,
                ascending: key.ascending,
            }),
            other => other,
        };
        true
    }

    /// Deletes all columns and every item's column texts.
    pub fn clear_columns(&mut self) {
        self.columns.clear();
        for rec in self.items.values_mut() {
            rec.texts.clear();
        }
        self.sort = None;
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Gets the column at `index`.
    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Sets a column's width. Out-of-range indices are ignored.
    pub fn set_column_width(&mut self, index: usize, width: i32) {
        if let Some(col) = self.columns.get_mut(index) {
            col.set_width(width);
        }
    }

    /// Gets a column's width, or 0 for out-of-range indices.
    pub fn column_width(&self, index: usize) -> i32 {
        self.columns.get(index).map(Column::width).unwrap_or(0)
    }

    // =========================================================================
    // Item lifecycle
    // =========================================================================

    /// Appends a new item as the last child of `parent`.
    ///
    /// `text` becomes the item's column-0 text. Fails with
    /// [`Error::UnknownParent`] if `parent` is not a live item.
    pub fn append(&mut self, parent: ItemId, text: &str) -> Result<ItemId> {
        self.insert_at(parent, InsertPos::Append, text)
    }

    /// Inserts a new item as the first child of `parent`.
    pub fn prepend(&mut self, parent: ItemId, text: &str) -> Result<ItemId> {
        self.insert_at(parent, InsertPos::Prepend, text)
    }

    /// Inserts a new item under `parent`, after the sibling `after`.
    ///
    /// `None` means "before the first child". Fails with
    /// [`Error::UnknownParent`] if `parent` is not a live item, and with
    /// [`Error::NotASibling`] if `after` is not one of its children.
    pub fn insert(&mut self, parent: ItemId, after: Option<ItemId>, text: &str) -> Result<ItemId> {
        match after {
            Some(anchor) => self.insert_at(parent, InsertPos::After(anchor), text),
            None => self.insert_at(parent, InsertPos::Prepend, text),
        }
    }

    fn insert_at(&mut self, parent: ItemId, pos: InsertPos, text: &str) -> Result<ItemId> {
        if !self.items.contains_key(parent) {
            return Err(Error::UnknownParent {
                handle: parent.as_raw(),
            });
        }
        let index = match pos {
            InsertPos::Append => self.items[parent].children.len(),
            InsertPos::Prepend => 0,
            InsertPos::After(anchor) => {
                let anchor_parent = self.items.get(anchor).and_then(|rec| rec.parent);
                if anchor_parent != Some(parent) {
                    return Err(Error::NotASibling {
                        handle: anchor.as_raw(),
                    });
                }
                let children = &self.items[parent].children;
                children
                    .iter()
                    .position(|&c| c == anchor)
                    .map(|i| i + 1)
                    .unwrap_or(children.len())
            }
        };
        let id = self.items.insert(ItemRecord::child(parent, text));
        self.items[parent].children.insert(index, id);
        trace!(item = id.as_raw(), parent = parent.as_raw(), "inserted item");
        if self.sort.is_some() {
            self.resort_children_of(parent);
        }
        Ok(id)
    }

    /// Deletes an item and all its descendants.
    ///
    /// Returns `false` for the root or a stale handle. All handles into the
    /// deleted subtree become permanently invalid, and any selected items in
    /// it leave the selection.
    pub fn delete(&mut self, item: ItemId) -> bool {
        if item == self.root || !self.items.contains_key(item) {
            return false;
        }
        if let Some(parent) = self.items[item].parent {
            if let Some(rec) = self.items.get_mut(parent) {
                rec.children.retain(|&c| c != item);
            }
        }
        let removed = self.remove_subtree(item);
        self.selection.purge(&removed);
        trace!(item = item.as_raw(), removed = removed.len(), "deleted subtree");
        true
    }

    /// Deletes every item, leaving only the synthetic root.
    pub fn delete_all(&mut self) {
        let top_level = std::mem::take(&mut self.items[self.root].children);
        for id in top_level {
            self.remove_subtree(id);
        }
        self.selection.clear();
        debug!("deleted all items");
    }

    /// Removes a detached subtree with an explicit worklist (deep trees must
    /// not recurse on the call stack). Returns the removed ids.
    fn remove_subtree(&mut self, item: ItemId) -> Vec<ItemId> {
        let mut removed = Vec::new();
        let mut stack = vec![item];
        while let Some(id) = stack.pop() {
            if let Some(rec) = self.items.remove(id) {
                stack.extend(rec.children);
                removed.push(id);
            }
        }
        removed
    }

    // =========================================================================
    // Item text
    // =========================================================================

    /// Sets an item's text in the given column.
    ///
    /// No-op for the root, a stale handle, or a column index that is out of
    /// range. Renaming the active sort column re-sorts the item's siblings.
    pub fn set_text(&mut self, item: ItemId, col: usize, text: &str) {
        if item == self.root || col >= self.columns.len() {
            return;
        }
        let Some(rec) = self.items.get_mut(item) else {
            return;
        };
        if rec.texts.len() <= col {
            rec.texts.resize_with(col + 1, String::new);
        }
        rec.texts[col] = text.to_owned();
        let parent = rec.parent;
        if self.sort.is_some_and(|key| key.column == col) {
            if let Some(parent) = parent {
                self.resort_children_of(parent);
            }
        }
    }

    /// Gets an item's text in the given column.
    ///
    /// Returns the empty string for the root, a stale handle, or a column
    /// index that is out of range.
    pub fn text(&self, item: ItemId, col: usize) -> &str {
        if item == self.root || col >= self.columns.len() {
            return "";
        }
        self.items
            .get(item)
            .and_then(|rec| rec.texts.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Copies an item's text into a caller-supplied buffer.
    ///
    /// Copies as many whole UTF-8 characters as fit and reports both the
    /// copied and the full byte length, so a caller that needs the complete
    /// text can detect truncation and retry with a larger buffer.
    pub fn text_into(&self, item: ItemId, col: usize, buf: &mut [u8]) -> TextCopy {
        copy_utf8_truncated(self.text(item, col), buf)
    }

    // =========================================================================
    // Item images
    // =========================================================================

    /// Sets the icon ids shown while the item is collapsed / expanded.
    pub fn set_item_image(&mut self, item: ItemId, closed: i32, opened: i32) {
        if item == self.root {
            return;
        }
        if let Some(rec) = self.items.get_mut(item) {
            rec.closed_image = closed;
            rec.opened_image = opened;
        }
    }

    /// Gets an item's `(closed, opened)` icon ids, [`NO_IMAGE`] when unset
    /// or for a stale handle.
    pub fn item_image(&self, item: ItemId) -> (i32, i32) {
        self.items
            .get(item)
            .map(|rec| (rec.closed_image, rec.opened_image))
            .unwrap_or((NO_IMAGE, NO_IMAGE))
    }

    // =========================================================================
    // Expand / collapse
    // =========================================================================

    /// Expands an item. Idempotent; no-op for leaf items and stale handles.
    pub fn expand(&mut self, item: ItemId) {
        if let Some(rec) = self.items.get_mut(item) {
            if !rec.children.is_empty() {
                rec.expanded = true;
            }
        }
    }

    /// Collapses an item. Idempotent; no-op for leaf items, the root and
    /// stale handles.
    pub fn collapse(&mut self, item: ItemId) {
        if item == self.root {
            return;
        }
        if let Some(rec) = self.items.get_mut(item) {
            if !rec.children.is_empty() {
                rec.expanded = false;
            }
        }
    }

    /// Returns `true` if the item has children and is expanded.
    pub fn is_expanded(&self, item: ItemId) -> bool {
        self.items
            .get(item)
            .map(|rec| !rec.children.is_empty() && rec.expanded)
            .unwrap_or(false)
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Gets an item's parent, `None` for the root and stale handles.
    pub fn parent_of(&self, item: ItemId) -> Option<ItemId> {
        self.items.get(item).and_then(|rec| rec.parent)
    }

    /// Gets an item's first child.
    pub fn first_child_of(&self, item: ItemId) -> Option<ItemId> {
        self.items
            .get(item)
            .and_then(|rec| rec.children.first().copied())
    }

    /// Gets the sibling ordered directly after `item`.
    pub fn next_sibling_of(&self, item: ItemId) -> Option<ItemId> {
        let parent = self.parent_of(item)?;
        let rec = self.items.get(parent)?;
        let pos = rec.children.iter().position(|&c| c == item)?;
        rec.children.get(pos + 1).copied()
    }

    /// First visible item: the first child of the root (the root itself is
    /// never visible).
    pub fn first_item(&self) -> Option<ItemId> {
        self.first_child_of(self.root)
    }

    /// Next item in depth-first order, skipping the contents of collapsed
    /// subtrees.
    ///
    /// From an expanded item with children this is its first child;
    /// otherwise the walk climbs to the nearest ancestor that still has a
    /// following sibling. Returns `None` after the last visible item.
    pub fn next_visible(&self, item: ItemId) -> Option<ItemId> {
        let rec = self.items.get(item)?;
        if rec.expanded && !rec.children.is_empty() {
            return rec.children.first().copied();
        }
        let mut cur = item;
        while cur != self.root {
            if let Some(next) = self.next_sibling_of(cur) {
                return Some(next);
            }
            cur = self.parent_of(cur)?;
        }
        None
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// The selection mode fixed at construction.
    pub fn selection_mode(&self) -> SelectionMode {
        self.selection.mode()
    }

    /// Selects an item. In single-selection mode this replaces the current
    /// selection. No-op for the root and stale handles.
    pub fn select(&mut self, item: ItemId) {
        if item == self.root || !self.items.contains_key(item) {
            return;
        }
        self.selection.select(item);
    }

    /// Removes an item from the selection.
    pub fn unselect(&mut self, item: ItemId) {
        self.selection.unselect(item);
    }

    /// Clears the selection.
    pub fn unselect_all(&mut self) {
        self.selection.clear();
    }

    /// Selects every item in the tree, in depth-first order.
    ///
    /// Only valid in multi-selection mode; a no-op otherwise.
    pub fn select_all(&mut self) {
        if self.selection.mode() != SelectionMode::Multi {
            return;
        }
        let mut stack: Vec<ItemId> = self.items[self.root]
            .children
            .iter()
            .rev()
            .copied()
            .collect();
        while let Some(id) = stack.pop() {
            self.selection.select(id);
            if let Some(rec) = self.items.get(id) {
                stack.extend(rec.children.iter().rev().copied());
            }
        }
    }

    /// Returns `true` if the item is selected.
    pub fn is_selected(&self, item: ItemId) -> bool {
        self.selection.contains(item)
    }

    /// The selected item in single-selection mode.
    ///
    /// If several items are selected (multi mode), this is the earliest one
    /// in selection order, an arbitrary but deterministic choice.
    pub fn selection(&self) -> Option<ItemId> {
        self.selection.first()
    }

    /// All selected items, in selection order.
    pub fn selections(&self) -> &[ItemId] {
        self.selection.as_slice()
    }

    /// Copies the selection into a caller-supplied buffer.
    ///
    /// Fills at most `out.len()` entries and returns the *total* number of
    /// selected items, which may exceed the number copied, the usual
    /// "count succeeds, buffer truncates" convention.
    pub fn selections_into(&self, out: &mut [ItemId]) -> usize {
        let all = self.selection.as_slice();
        let n = all.len().min(out.len());
        out[..n].copy_from_slice(&all[..n]);
        all.len()
    }

    // =========================================================================
    // Checkboxes
    // =========================================================================

    /// Sets an item's check state directly.
    ///
    /// No-op unless the tree was created with checkbox support; without
    /// three-state support a requested `Indeterminate` is coerced to
    /// `Unchecked`.
    pub fn check_item(&mut self, item: ItemId, state: CheckState) {
        if !self.style.checkboxes || item == self.root {
            return;
        }
        let state = self.admit(state);
        if let Some(rec) = self.items.get_mut(item) {
            rec.check = state;
        }
    }

    /// Shorthand for [`check_item`](Self::check_item) with `Unchecked`.
    pub fn uncheck_item(&mut self, item: ItemId) {
        self.check_item(item, CheckState::Unchecked);
    }

    /// Gets an item's check state, `Unchecked` for stale handles or trees
    /// without checkbox support.
    pub fn check_state(&self, item: ItemId) -> CheckState {
        if !self.style.checkboxes {
            return CheckState::Unchecked;
        }
        self.items
            .get(item)
            .map(|rec| rec.check)
            .unwrap_or(CheckState::Unchecked)
    }

    /// Sets an item and its entire subtree to `state`.
    ///
    /// Only the two definite states apply uniformly to a subtree; an
    /// `Indeterminate` request degenerates to a plain
    /// [`check_item`](Self::check_item) on the target.
    pub fn check_item_recursively(&mut self, item: ItemId, state: CheckState) {
        if !self.style.checkboxes || item == self.root {
            return;
        }
        let state = self.admit(state);
        if state == CheckState::Indeterminate {
            self.check_item(item, state);
            return;
        }
        let mut stack = vec![item];
        while let Some(id) = stack.pop() {
            if let Some(rec) = self.items.get_mut(id) {
                rec.check = state;
                stack.extend(rec.children.iter().copied());
            }
        }
    }

    /// Returns `true` iff every direct child of `item` has check state
    /// `state`. Vacuously true for leaf items; `false` for stale handles.
    pub fn are_all_children_in_state(&self, item: ItemId, state: CheckState) -> bool {
        let Some(rec) = self.items.get(item) else {
            return false;
        };
        rec.children
            .iter()
            .all(|&c| self.items.get(c).map(|r| r.check) == Some(state))
    }

    /// Re-derives ancestor check states after `item` changed.
    ///
    /// Walking upward from the item's parent, each ancestor becomes
    /// `Checked` when all of its children are checked, `Unchecked` when all
    /// are unchecked, and `Indeterminate` otherwise (three-state trees
    /// only). The walk stops as soon as an ancestor's computed state equals
    /// its current one, so repeated calls are idempotent.
    pub fn update_item_parent_state(&mut self, item: ItemId) {
        if !self.style.checkboxes {
            return;
        }
        let mut cur = self.parent_of(item);
        while let Some(parent) = cur {
            if parent == self.root {
                break;
            }
            let Some(derived) = self.derived_children_state(parent) else {
                break;
            };
            if self.items[parent].check == derived {
                break;
            }
            self.items[parent].check = derived;
            cur = self.parent_of(parent);
        }
    }

    /// Check state implied by an item's direct children, or `None` when the
    /// children are mixed and the tree has no indeterminate state.
    fn derived_children_state(&self, item: ItemId) -> Option<CheckState> {
        if self.are_all_children_in_state(item, CheckState::Checked) {
            return Some(CheckState::Checked);
        }
        if self.are_all_children_in_state(item, CheckState::Unchecked) {
            return Some(CheckState::Unchecked);
        }
        if self.style.three_state {
            Some(CheckState::Indeterminate)
        } else {
            None
        }
    }

    /// Coerces caller-supplied states the tree cannot represent.
    fn admit(&self, state: CheckState) -> CheckState {
        if state == CheckState::Indeterminate && !self.style.three_state {
            CheckState::Unchecked
        } else {
            state
        }
    }

    // =========================================================================
    // Sorting
    // =========================================================================

    /// Sets the sort column and direction, re-sorting every sibling group
    /// immediately. No-op if `column` is out of range.
    ///
    /// While a sort column is active, sibling order is maintained on every
    /// structural mutation (append, insert, prepend and renames of the sort
    /// column), not just on demand. Comparison is lexical and
    /// case-sensitive on the column's text.
    pub fn set_sort_column(&mut self, column: usize, ascending: bool) {
        if column >= self.columns.len() {
            return;
        }
        self.sort = Some(SortKey { column, ascending });
        debug!(column, ascending, "sort column changed");
        self.resort_all();
    }

    /// The active sort column and direction, `None` when unsorted.
    pub fn sort_column(&self) -> Option<(usize, bool)> {
        self.sort.map(|key| (key.column, key.ascending))
    }

    fn resort_all(&mut self) {
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            self.resort_children_of(id);
            if let Some(rec) = self.items.get(id) {
                stack.extend(rec.children.iter().copied());
            }
        }
    }

    /// Stable-sorts one sibling group by the active sort key.
    fn resort_children_of(&mut self, parent: ItemId) {
        let Some(key) = self.sort else {
            return;
        };
        let mut children = match self.items.get_mut(parent) {
            Some(rec) if rec.children.len() > 1 => std::mem::take(&mut rec.children),
            _ => return,
        };
        children.sort_by(|&a, &b| {
            let ta = self
                .items
                .get(a)
                .and_then(|rec| rec.texts.get(key.column))
                .map(String::as_str)
                .unwrap_or("");
            let tb = self
                .items
                .get(b)
                .and_then(|rec| rec.texts.get(key.column))
                .map(String::as_str)
                .unwrap_or("");
            let ord = ta.cmp(tb);
            if key.ascending { ord } else { ord.reverse() }
        });
        if let Some(rec) = self.items.get_mut(parent) {
            rec.children = children;
        }
    }
}
