//! Truncating UTF-8 copy-out for caller-supplied buffers.
//!
//! Text retrieval across a widget boundary often has to fill a fixed-size
//! buffer the caller owns. The contract here is the usual one: copy as much
//! as fits without splitting a UTF-8 sequence, and report the full length so
//! the caller can detect truncation and retry with a larger buffer.

/// Outcome of copying text into a caller-supplied buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextCopy {
    /// Bytes actually written to the buffer. Always ends on a UTF-8
    /// character boundary, so the written prefix is valid UTF-8.
    pub copied: usize,
    /// Bytes the full text occupies. When this exceeds `copied`, the copy
    /// was truncated.
    pub required: usize,
}

impl TextCopy {
    /// Returns `true` if the buffer was too small for the full text.
    pub fn is_truncated(&self) -> bool {
        self.copied < self.required
    }
}

/// Copies `src` into `dst`, truncating at the last UTF-8 character boundary
/// that fits. Never overflows `dst`.
pub(crate) fn copy_utf8_truncated(src: &str, dst: &mut [u8]) -> TextCopy {
    let required = src.len();
    let mut end = required.min(dst.len());
    while !src.is_char_boundary(end) {
        end -= 1;
    }
    dst[..end].copy_from_slice(&src.as_bytes()[..end]);
    TextCopy {
        copied: end,
        required,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_fit() {
        let mut buf = [0u8; 5];
        let copy = copy_utf8_truncated("café", &mut buf);
        assert_eq!(copy, TextCopy { copied: 5, required: 5 });
        assert!(!copy.is_truncated());
        assert_eq!(&buf[..copy.copied], "café".as_bytes());
    }

    #[test]
    fn test_truncates_on_char_boundary() {
        // "café" is 5 bytes; a 4-byte buffer cannot hold half of 'é'.
        let mut buf = [0u8; 4];
        let copy = copy_utf8_truncated("café", &mut buf);
        assert_eq!(copy.copied, 3);
        assert_eq!(copy.required, 5);
        assert!(copy.is_truncated());
        assert_eq!(std::str::from_utf8(&buf[..copy.copied]).unwrap(), "caf");
    }

    #[test]
    fn test_empty_buffer() {
        let mut buf = [0u8; 0];
        let copy = copy_utf8_truncated("abc", &mut buf);
        assert_eq!(copy, TextCopy { copied: 0, required: 3 });
    }

    #[test]
    fn test_empty_text() {
        let mut buf = [0u8; 8];
        let copy = copy_utf8_truncated("", &mut buf);
        assert_eq!(copy, TextCopy { copied: 0, required: 0 });
        assert!(!copy.is_truncated());
    }
}
