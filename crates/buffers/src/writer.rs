//! Binary buffer writer with auto-growing capacity.

/// A binary writer that appends big-endian values to an owned buffer.
///
/// # Example
///
/// ```
/// use widecol_buffers::Writer;
///
/// let mut writer = Writer::with_capacity(3);
/// writer.u16(0x0001);
/// writer.u8(0x2a);
/// assert_eq!(writer.flush(), [0x00, 0x01, 0x2a]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a writer that can hold `capacity` bytes without reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Number of bytes written since the last flush.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Returns the written bytes and leaves the writer empty.
    pub fn flush(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.buf)
    }

    /// Writes an unsigned 8-bit integer.
    #[inline]
    pub fn u8(&mut self, val: u8) {
        self.buf.push(val);
    }

    /// Writes an unsigned 16-bit integer (big-endian).
    #[inline]
    pub fn u16(&mut self, val: u16) {
        self.buf.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes a signed 32-bit integer (big-endian).
    #[inline]
    pub fn i32(&mut self, val: i32) {
        self.buf.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes a signed 64-bit integer (big-endian).
    #[inline]
    pub fn i64(&mut self, val: i64) {
        self.buf.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes a 32-bit float (big-endian).
    #[inline]
    pub fn f32(&mut self, val: f32) {
        self.buf.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes a 64-bit float (big-endian).
    #[inline]
    pub fn f64(&mut self, val: f64) {
        self.buf.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes a byte slice.
    pub fn buf(&mut self, buf: &[u8]) {
        self.buf.extend_from_slice(buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u16_big_endian() {
        let mut writer = Writer::new();
        writer.u16(0x0102);
        assert_eq!(writer.flush(), [0x01, 0x02]);
    }

    #[test]
    fn test_flush_resets() {
        let mut writer = Writer::new();
        writer.buf(b"abc");
        assert_eq!(writer.len(), 3);
        assert_eq!(writer.flush(), b"abc");
        assert!(writer.is_empty());
        writer.i32(-1);
        assert_eq!(writer.flush(), [0xff; 4]);
    }

    #[test]
    fn test_floats() {
        let mut writer = Writer::new();
        writer.f32(1.5);
        writer.f64(-0.25);
        let out = writer.flush();
        assert_eq!(&out[..4], &1.5f32.to_be_bytes());
        assert_eq!(&out[4..], &(-0.25f64).to_be_bytes());
    }
}
