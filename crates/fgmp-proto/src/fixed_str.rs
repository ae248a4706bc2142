use std::borrow::Cow;
use std::fmt;

use crate::error::ProtoError;

/// Nul-terminated string stored in a fixed `N`-byte wire field.
///
/// At most `N - 1` visible bytes are kept and the remainder is zero, so the
/// last byte is always a terminator. Inbound fields go through
/// [`FixedStr::from_wire`], which enforces the same invariant.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedStr<const N: usize> {
    bytes: [u8; N],
}

impl<const N: usize> FixedStr<N> {
    /// Visible capacity: the field width minus the terminator.
    pub const CAPACITY: usize = N - 1;

    /// Store `s`, cutting it to [`Self::CAPACITY`] bytes if needed.
    ///
    /// The cut is byte-wise and may split a multi-byte UTF-8 sequence;
    /// peers treat the field as raw bytes.
    pub fn new(s: &str) -> Self {
        Self::from_bytes_truncated(s.as_bytes())
    }

    /// Like [`FixedStr::new`] but refuses to truncate.
    pub fn try_new(s: &str) -> Result<Self, ProtoError> {
        if s.len() > Self::CAPACITY {
            return Err(ProtoError::EncodingOverflow {
                width: N,
                len: s.len(),
            });
        }
        Ok(Self::new(s))
    }

    pub fn from_bytes_truncated(src: &[u8]) -> Self {
        let visible = src.iter().position(|&b| b == 0).unwrap_or(src.len());
        let n = visible.min(Self::CAPACITY);
        let mut bytes = [0u8; N];
        bytes[..n].copy_from_slice(&src[..n]);
        Self { bytes }
    }

    /// Accept a field as received. Bytes after the first zero are dropped
    /// and the last byte is forced to zero.
    pub fn from_wire(raw: [u8; N]) -> Self {
        Self::from_bytes_truncated(&raw)
    }

    pub fn to_wire(&self) -> [u8; N] {
        self.bytes
    }

    /// Visible bytes, up to the terminator.
    pub fn as_bytes(&self) -> &[u8] {
        let len = self.len();
        &self.bytes[..len]
    }

    pub fn as_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.as_bytes())
    }

    pub fn len(&self) -> usize {
        self.bytes.iter().position(|&b| b == 0).unwrap_or(N)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<const N: usize> Default for FixedStr<N> {
    fn default() -> Self {
        Self { bytes: [0u8; N] }
    }
}

impl<const N: usize> fmt::Debug for FixedStr<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

impl<const N: usize> fmt::Display for FixedStr<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::FixedStr;
    use crate::error::ProtoError;

    #[test]
    fn short_string_is_zero_padded() {
        let s = FixedStr::<8>::new("AFMC");
        assert_eq!(s.to_wire(), *b"AFMC\0\0\0\0");
        assert_eq!(s.as_bytes(), b"AFMC");
        assert_eq!(s.len(), 4);
    }

    #[test]
    fn long_string_keeps_width_minus_one() {
        let input = "ABCDEFGHIJKLM"; // width + 5
        let s = FixedStr::<8>::new(input);
        assert_eq!(s.to_wire(), *b"ABCDEFG\0");
        assert_eq!(s.len(), FixedStr::<8>::CAPACITY);
    }

    #[test]
    fn exact_capacity_fits() {
        let s = FixedStr::<8>::try_new("ABCDEFG").unwrap();
        assert_eq!(s.to_wire(), *b"ABCDEFG\0");
    }

    #[test]
    fn try_new_reports_overflow() {
        assert_eq!(
            FixedStr::<8>::try_new("ABCDEFGH"),
            Err(ProtoError::EncodingOverflow { width: 8, len: 8 })
        );
    }

    #[test]
    fn from_wire_forces_terminator() {
        let s = FixedStr::<4>::from_wire(*b"WXYZ");
        assert_eq!(s.to_wire(), *b"WXY\0");

        let s = FixedStr::<6>::from_wire(*b"AB\0CDE");
        assert_eq!(s.to_wire(), *b"AB\0\0\0\0");
        assert_eq!(s.as_str(), "AB");
    }

    #[test]
    fn interior_nul_ends_the_string() {
        let s = FixedStr::<8>::new("AB\0CD");
        assert_eq!(s.as_bytes(), b"AB");
        assert!(!s.is_empty());
        assert!(FixedStr::<8>::new("").is_empty());
    }
}
