//! Error types for the tree-list model.
//!
//! The model follows the error policy of a widget boundary layer: lookups
//! with stale or foreign handles quietly produce the neutral value (empty
//! text, `false`, `None`), and out-of-range column indices are tolerated the
//! same way. Only malformed *structural* requests surface as an [`Error`]:
//! attaching an item to a parent that is not in the tree, or anchoring an
//! insertion on a handle that is not a sibling. Silently redirecting those
//! to the root would mask caller bugs.

/// Result type alias for tree-list operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when mutating the tree structure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The parent handle does not refer to a live item in this tree.
    #[error("unknown parent handle {handle:#x}")]
    UnknownParent {
        /// Raw value of the offending handle.
        handle: u64,
    },

    /// The `after` anchor of an insertion is not a child of the target parent.
    #[error("insertion anchor {handle:#x} is not a child of the target parent")]
    NotASibling {
        /// Raw value of the offending anchor handle.
        handle: u64,
    },
}
