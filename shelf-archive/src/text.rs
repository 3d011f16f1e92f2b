//! Bounded, null-padded text fields.

use std::fmt;

/// A text field stored in a fixed `N`-byte buffer.
///
/// At most `N - 1` bytes of content are kept so the image always ends in at
/// least one zero byte. Longer input is cut at the byte boundary, even in the
/// middle of a multi-byte character, and the cut is recorded in `truncated`.
#[derive(Clone, PartialEq, Eq)]
pub struct FixedText<const N: usize> {
    buf: [u8; N],
    truncated: bool,
}

impl<const N: usize> FixedText<N> {
    /// Maximum number of content bytes the field can hold.
    pub const CAPACITY: usize = N - 1;

    /// Copy `text` into a fresh buffer, zero-filling the remainder.
    ///
    /// Copying stops at the capacity or at an interior NUL, whichever comes
    /// first. Either case marks the field as truncated.
    pub fn encode(text: &str) -> Self {
        let src = text.as_bytes();
        let limit = src.len().min(Self::CAPACITY);
        let end = src[..limit].iter().position(|&b| b == 0).unwrap_or(limit);

        let mut buf = [0u8; N];
        buf[..end].copy_from_slice(&src[..end]);
        Self {
            buf,
            truncated: end < src.len(),
        }
    }

    /// Wrap a buffer image read from disk.
    pub fn from_bytes(bytes: &[u8; N]) -> Self {
        Self {
            buf: *bytes,
            truncated: false,
        }
    }

    /// The full `N`-byte image, padding included.
    pub fn image(&self) -> &[u8; N] {
        &self.buf
    }

    /// Stored content: bytes up to the first zero, or the whole buffer.
    pub fn as_bytes(&self) -> &[u8] {
        let end = self.buf.iter().position(|&b| b == 0).unwrap_or(N);
        &self.buf[..end]
    }

    /// Decode the stored content, replacing invalid UTF-8 with U+FFFD.
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(self.as_bytes()).into_owned()
    }

    /// Whether encoding dropped any input bytes.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn is_empty(&self) -> bool {
        self.buf[0] == 0
    }
}

impl<const N: usize> Default for FixedText<N> {
    fn default() -> Self {
        Self {
            buf: [0u8; N],
            truncated: false,
        }
    }
}

impl<const N: usize> fmt::Debug for FixedText<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedText")
            .field("capacity", &Self::CAPACITY)
            .field("text", &self.to_string_lossy())
            .field("truncated", &self.truncated)
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/text_tests.rs"]
mod tests;
