//! Construction-time style flags.
//!
//! A [`TreeListModel`](crate::TreeListModel) is configured once, when it is
//! created, from a small bitmask in the manner of native toolkit window
//! styles. The raw encoding is part of the boundary contract; unrecognized
//! bits are ignored.

/// Behavior flags fixed at tree construction.
///
/// The raw bitmask encoding is:
///
/// | bit | meaning                                   |
/// |-----|-------------------------------------------|
/// | 0   | items carry checkboxes                    |
/// | 1   | checkboxes support the indeterminate state |
/// | 2   | multiple items may be selected at once    |
///
/// Bit 1 implies bit 0: a tree cannot have indeterminate checkboxes without
/// having checkboxes at all, so [`from_bits`](Self::from_bits) normalizes
/// that combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StyleFlags {
    /// Items carry a checkbox.
    pub checkboxes: bool,
    /// Checkboxes support the indeterminate ("mixed") state.
    pub three_state: bool,
    /// More than one item may be selected at a time.
    pub multiple: bool,
}

impl StyleFlags {
    /// Raw bit enabling per-item checkboxes.
    pub const CHECKBOX: u32 = 1 << 0;
    /// Raw bit enabling the indeterminate checkbox state.
    pub const THREE_STATE: u32 = 1 << 1;
    /// Raw bit enabling multi-selection.
    pub const MULTIPLE: u32 = 1 << 2;

    /// Decodes a raw style bitmask. Unknown bits are ignored.
    pub fn from_bits(bits: u32) -> Self {
        let three_state = bits & Self::THREE_STATE != 0;
        Self {
            checkboxes: bits & Self::CHECKBOX != 0 || three_state,
            three_state,
            multiple: bits & Self::MULTIPLE != 0,
        }
    }

    /// Returns the raw bitmask form of these flags.
    pub fn bits(self) -> u32 {
        let mut bits = 0;
        if self.checkboxes {
            bits |= Self::CHECKBOX;
        }
        if self.three_state {
            bits |= Self::THREE_STATE;
        }
        if self.multiple {
            bits |= Self::MULTIPLE;
        }
        bits
    }

    /// Creates flags with checkboxes enabled.
    pub fn with_checkboxes(mut self) -> Self {
        self.checkboxes = true;
        self
    }

    /// Creates flags with tri-state checkboxes enabled (implies checkboxes).
    pub fn with_three_state(mut self) -> Self {
        self.checkboxes = true;
        self.three_state = true;
        self
    }

    /// Creates flags with multi-selection enabled.
    pub fn with_multiple(mut self) -> Self {
        self.multiple = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bits_roundtrip() {
        let flags = StyleFlags::from_bits(StyleFlags::CHECKBOX | StyleFlags::MULTIPLE);
        assert!(flags.checkboxes);
        assert!(!flags.three_state);
        assert!(flags.multiple);
        assert_eq!(flags.bits(), StyleFlags::CHECKBOX | StyleFlags::MULTIPLE);
    }

    #[test]
    fn test_three_state_implies_checkboxes() {
        let flags = StyleFlags::from_bits(StyleFlags::THREE_STATE);
        assert!(flags.checkboxes);
        assert!(flags.three_state);
    }

    #[test]
    fn test_unknown_bits_ignored() {
        let flags = StyleFlags::from_bits(0xFFFF_FFF8);
        assert_eq!(flags, StyleFlags::default());
    }

    #[test]
    fn test_builders() {
        let flags = StyleFlags::default().with_three_state().with_multiple();
        assert_eq!(
            flags.bits(),
            StyleFlags::CHECKBOX | StyleFlags::THREE_STATE | StyleFlags::MULTIPLE
        );
    }
}
