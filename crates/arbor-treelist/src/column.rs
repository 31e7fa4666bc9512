//! Column definitions for the tree-list model.

/// Horizontal alignment of a column's content.
///
/// The raw integer encoding (0 = left, 1 = right, 2 = center) is part of the
/// boundary contract; any unrecognized value decodes as [`Left`](Self::Left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColumnAlignment {
    /// Align to the left edge (default).
    #[default]
    Left,
    /// Align to the right edge.
    Right,
    /// Align to the center.
    Center,
}

impl ColumnAlignment {
    /// Decodes a raw alignment value, falling back to `Left` for
    /// unrecognized inputs.
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            1 => Self::Right,
            2 => Self::Center,
            _ => Self::Left,
        }
    }

    /// Returns the raw integer encoding of this alignment.
    pub fn as_raw(self) -> i32 {
        match self {
            Self::Left => 0,
            Self::Right => 1,
            Self::Center => 2,
        }
    }
}

/// A single column: header label, width and content alignment.
///
/// Columns are owned by the [`TreeListModel`](crate::TreeListModel) and
/// addressed by index; deleting a column renumbers the ones after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    label: String,
    width: i32,
    alignment: ColumnAlignment,
}

impl Column {
    /// Creates a new column.
    pub fn new(label: impl Into<String>, width: i32, alignment: ColumnAlignment) -> Self {
        Self {
            label: label.into(),
            width,
            alignment,
        }
    }

    /// Gets the header label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Sets the header label.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// Gets the column width.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Sets the column width.
    pub fn set_width(&mut self, width: i32) {
        self.width = width;
    }

    /// Gets the content alignment.
    pub fn alignment(&self) -> ColumnAlignment {
        self.alignment
    }
}
