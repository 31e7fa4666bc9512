//! A hierarchical tree-list data model with columns, selection and
//! tri-state checkboxes.
//!
//! The centerpiece is [`TreeListModel`]: an ordered forest of items anchored
//! by a synthetic root, where every item carries one text per column, an
//! expand/collapse flag, a checkbox and a pair of icon ids. Items are
//! addressed by [`ItemId`] handles backed by a generation-checked arena, so
//! a handle to a deleted item goes stale instead of dangling and is never
//! reissued.
//!
//! Capabilities are fixed at construction through [`StyleFlags`]: whether
//! checkboxes exist, whether they support the indeterminate third state, and
//! whether selection is single or multi.
//!
//! # Example
//!
//! ```
//! use arbor_treelist::{CheckState, ColumnAlignment, StyleFlags, TreeListModel};
//!
//! let style = StyleFlags::default().with_three_state().with_multiple();
//! let mut tree = TreeListModel::with_style(style);
//! tree.create_column("Name", 160, ColumnAlignment::Left);
//! tree.create_column("Size", 80, ColumnAlignment::Right);
//!
//! let docs = tree.append(tree.root(), "Documents").unwrap();
//! let file = tree.append(docs, "report.pdf").unwrap();
//! tree.set_text(file, 1, "48 KiB");
//!
//! tree.expand(docs);
//! tree.check_item(file, CheckState::Checked);
//! tree.update_item_parent_state(file);
//! assert_eq!(tree.check_state(docs), CheckState::Checked);
//! ```
//!
//! Structural mutations emit [`tracing`] events at debug/trace level;
//! install a subscriber (e.g. `tracing_subscriber::fmt()`) to see them.

mod buffer;
mod column;
mod error;
mod item;
mod selection;
mod style;
mod tree;

pub use buffer::TextCopy;
pub use column::{Column, ColumnAlignment};
pub use error::{Error, Result};
pub use item::{CheckState, ItemId, NO_IMAGE};
pub use selection::SelectionMode;
pub use style::StyleFlags;
pub use tree::TreeListModel;
