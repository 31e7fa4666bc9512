//! Item handles and per-item state.
//!
//! Items are stored in a generation-checked arena ([`slotmap`]), so an
//! [`ItemId`] is a stable handle rather than a memory address: once the item
//! it referred to is deleted, the handle goes stale and is never reissued
//! for a different item. Lookups through stale handles simply miss.

use slotmap::new_key_type;

new_key_type! {
    /// A stable handle to an item in a [`TreeListModel`](crate::TreeListModel).
    ///
    /// Handles remain valid as the tree changes around them and become
    /// permanently invalid when their item is deleted. The raw 64-bit form
    /// (see [`as_raw`](ItemId::as_raw)) reserves 0 as "no item": no live
    /// item ever encodes to 0.
    pub struct ItemId;
}

impl ItemId {
    /// Converts the handle to its raw 64-bit value.
    ///
    /// Useful for interop with external systems that need a numeric ID.
    /// The value can be converted back with [`ItemId::from_raw`].
    #[inline]
    pub fn as_raw(self) -> u64 {
        use slotmap::Key;
        self.data().as_ffi()
    }

    /// Reconstructs a handle from a raw 64-bit value.
    ///
    /// This does not check whether the item still exists; a raw value that
    /// never came from [`as_raw`](ItemId::as_raw) (including 0) yields a
    /// handle that matches no live item.
    #[inline]
    pub fn from_raw(raw: u64) -> Self {
        Self::from(slotmap::KeyData::from_ffi(raw))
    }
}

// The raw handle form is part of the boundary contract.
static_assertions::assert_eq_size!(ItemId, u64);

/// Sentinel for "no icon assigned" in [`item_image`](crate::TreeListModel::item_image).
pub const NO_IMAGE: i32 = -1;

/// Check state for item checkboxes.
///
/// The raw integer encoding (0 = unchecked, 1 = checked, 2 = indeterminate)
/// is part of the boundary contract; any unrecognized value decodes as
/// [`Unchecked`](Self::Unchecked).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CheckState {
    /// Item is unchecked.
    #[default]
    Unchecked,
    /// Item is checked.
    Checked,
    /// Mixed state: some descendants are checked and some are not.
    Indeterminate,
}

impl CheckState {
    /// Decodes a raw check-state value, falling back to `Unchecked` for
    /// unrecognized inputs.
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            1 => Self::Checked,
            2 => Self::Indeterminate,
            _ => Self::Unchecked,
        }
    }

    /// Returns the raw integer encoding of this state.
    pub fn as_raw(self) -> i32 {
        match self {
            Self::Unchecked => 0,
            Self::Checked => 1,
            Self::Indeterminate => 2,
        }
    }
}

/// Per-item record stored in the arena.
#[derive(Debug)]
pub(crate) struct ItemRecord {
    /// Parent item; `None` only for the synthetic root.
    pub(crate) parent: Option<ItemId>,
    /// Ordered children.
    pub(crate) children: Vec<ItemId>,
    /// One text value per column; may be shorter than the column count.
    pub(crate) texts: Vec<String>,
    /// Expansion flag, meaningful only while the item has children.
    pub(crate) expanded: bool,
    /// Checkbox state.
    pub(crate) check: CheckState,
    /// Icon id shown while collapsed.
    pub(crate) closed_image: i32,
    /// Icon id shown while expanded.
    pub(crate) opened_image: i32,
}

impl ItemRecord {
    /// The synthetic root: no parent, no text, always expanded.
    pub(crate) fn root() -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            texts: Vec::new(),
            expanded: true,
            check: CheckState::Unchecked,
            closed_image: NO_IMAGE,
            opened_image: NO_IMAGE,
        }
    }

    /// A regular item created under `parent` with its column-0 text.
    pub(crate) fn child(parent: ItemId, text: &str) -> Self {
        Self {
            parent: Some(parent),
            children: Vec::new(),
            texts: vec![text.to_owned()],
            expanded: false,
            check: CheckState::Unchecked,
            closed_image: NO_IMAGE,
            opened_image: NO_IMAGE,
        }
    }
}
