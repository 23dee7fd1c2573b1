//! Bounds-checked binary reader with cursor tracking.

use crate::BufferError;

/// A binary reader over a borrowed byte slice.
///
/// Every read is bounds-checked and leaves the cursor untouched when it fails,
/// so a caller can report the exact offset of a truncated value.
///
/// # Example
///
/// ```
/// use widecol_buffers::Reader;
///
/// let data = [0x00, 0x02, b'h', b'i'];
/// let mut reader = Reader::new(&data);
///
/// let len = reader.u16().unwrap() as usize;
/// assert_eq!(reader.buf(len).unwrap(), b"hi");
/// assert!(reader.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    x: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, x: 0 }
    }

    /// Current cursor position.
    pub fn position(&self) -> usize {
        self.x
    }

    /// Number of bytes left to read.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.x
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    #[inline]
    fn check(&self, needed: usize) -> Result<(), BufferError> {
        let remaining = self.remaining();
        if needed > remaining {
            Err(BufferError::EndOfBuffer { needed, remaining })
        } else {
            Ok(())
        }
    }

    #[inline]
    fn array<const N: usize>(&mut self) -> Result<[u8; N], BufferError> {
        self.check(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(&self.data[self.x..self.x + N]);
        self.x += N;
        Ok(out)
    }

    /// Reads an unsigned 8-bit integer.
    #[inline]
    pub fn u8(&mut self) -> Result<u8, BufferError> {
        self.check(1)?;
        let val = self.data[self.x];
        self.x += 1;
        Ok(val)
    }

    /// Reads an unsigned 16-bit integer (big-endian).
    #[inline]
    pub fn u16(&mut self) -> Result<u16, BufferError> {
        self.array().map(u16::from_be_bytes)
    }

    /// Reads a signed 32-bit integer (big-endian).
    #[inline]
    pub fn i32(&mut self) -> Result<i32, BufferError> {
        self.array().map(i32::from_be_bytes)
    }

    /// Reads a signed 64-bit integer (big-endian).
    #[inline]
    pub fn i64(&mut self) -> Result<i64, BufferError> {
        self.array().map(i64::from_be_bytes)
    }

    /// Reads a 32-bit float (big-endian).
    #[inline]
    pub fn f32(&mut self) -> Result<f32, BufferError> {
        self.array().map(f32::from_be_bytes)
    }

    /// Reads a 64-bit float (big-endian).
    #[inline]
    pub fn f64(&mut self) -> Result<f64, BufferError> {
        self.array().map(f64::from_be_bytes)
    }

    /// Returns the next `size` bytes as a subslice and advances the cursor.
    pub fn buf(&mut self, size: usize) -> Result<&'a [u8], BufferError> {
        self.check(size)?;
        let start = self.x;
        self.x += size;
        Ok(&self.data[start..self.x])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u8_and_u16() {
        let data = [0x01, 0x02, 0x03];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.u8(), Ok(0x01));
        assert_eq!(reader.u16(), Ok(0x0203));
        assert!(reader.is_empty());
    }

    #[test]
    fn test_i64_big_endian() {
        let data = (-2i64).to_be_bytes();
        let mut reader = Reader::new(&data);
        assert_eq!(reader.i64(), Ok(-2));
    }

    #[test]
    fn test_end_of_buffer_does_not_advance() {
        let data = [0x01];
        let mut reader = Reader::new(&data);
        assert_eq!(
            reader.u16(),
            Err(BufferError::EndOfBuffer {
                needed: 2,
                remaining: 1
            })
        );
        assert_eq!(reader.position(), 0);
        assert_eq!(reader.u8(), Ok(0x01));
    }

    #[test]
    fn test_buf_zero_length() {
        let data: [u8; 0] = [];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.buf(0), Ok(&[][..]));
        assert!(reader.buf(1).is_err());
    }
}
