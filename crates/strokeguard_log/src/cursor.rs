//! Bounds-checked reader over a binary stroke log.

use crate::error::{CodecError, CodecResult};

/// Forward-only cursor over a byte slice.
///
/// Every read is bounds-checked and fails with
/// [`CodecError::TruncatedStream`] instead of panicking.
#[derive(Debug, Clone, Copy)]
pub struct ByteCursor<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> ByteCursor<'a> {
    /// Create a cursor at the start of `bytes`
    #[must_use]
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    /// Current offset
    #[must_use]
    pub const fn pos(&self) -> usize {
        self.position
    }

    /// Bytes left to read
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.position)
    }

    /// Check if every byte has been consumed
    #[must_use]
    pub fn is_end(&self) -> bool {
        self.position >= self.bytes.len()
    }

    /// Read one byte
    ///
    /// # Errors
    ///
    /// Returns error if the stream is exhausted
    pub fn read_u8(&mut self) -> CodecResult<u8> {
        let byte = *self
            .bytes
            .get(self.position)
            .ok_or(CodecError::TruncatedStream {
                offset: self.position,
                needed: 1,
                available: 0,
            })?;
        self.position += 1;
        Ok(byte)
    }

    /// Read `len` bytes
    ///
    /// # Errors
    ///
    /// Returns error if fewer than `len` bytes remain
    pub fn read_slice(&mut self, len: usize) -> CodecResult<&'a [u8]> {
        let available = self.remaining();
        if len > available {
            return Err(CodecError::TruncatedStream {
                offset: self.position,
                needed: len,
                available,
            });
        }
        let slice = &self.bytes[self.position..self.position + len];
        self.position += len;
        Ok(slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_new() {
        let cursor = ByteCursor::new(&[1, 2, 3]);
        assert_eq!(cursor.pos(), 0);
        assert_eq!(cursor.remaining(), 3);
        assert!(!cursor.is_end());
    }

    #[test]
    fn test_cursor_read_u8() {
        let mut cursor = ByteCursor::new(&[7, 8]);
        assert_eq!(cursor.read_u8().unwrap(), 7);
        assert_eq!(cursor.read_u8().unwrap(), 8);
        assert!(cursor.is_end());
        assert_eq!(
            cursor.read_u8(),
            Err(CodecError::TruncatedStream {
                offset: 2,
                needed: 1,
                available: 0
            })
        );
    }

    #[test]
    fn test_cursor_read_slice() {
        let mut cursor = ByteCursor::new(b"abcdef");
        assert_eq!(cursor.read_slice(2).unwrap(), b"ab");
        assert_eq!(cursor.pos(), 2);
        assert_eq!(cursor.read_slice(4).unwrap(), b"cdef");
        assert_eq!(cursor.read_slice(0).unwrap(), b"");
    }

    #[test]
    fn test_cursor_read_slice_truncated() {
        let mut cursor = ByteCursor::new(b"abc");
        let err = cursor.read_slice(10).unwrap_err();
        assert_eq!(
            err,
            CodecError::TruncatedStream {
                offset: 0,
                needed: 10,
                available: 3
            }
        );
        // failed reads do not advance
        assert_eq!(cursor.pos(), 0);
    }
}
