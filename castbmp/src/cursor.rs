use byteorder::ByteOrder;
use snafu::{ensure, Snafu};

#[derive(Debug, Snafu)]
#[snafu(module)]
pub enum CursorError {
    #[snafu(display("unexpected end of data: wanted {wanted} bytes at offset {offset}"))]
    EndOfData { offset: usize, wanted: usize },
}

/// Sequential reader over an in-memory buffer.
///
/// There is a single position shared by every read. Byte order is chosen per call, so big- and
/// little-endian fields can be interleaved without a second reader over the same data.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    #[inline]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Number of unread bytes.
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Returns `true` while there is at least one unread byte.
    #[inline]
    pub const fn available(&self) -> bool {
        self.pos < self.data.len()
    }

    /// The unread part of the buffer.
    #[inline]
    pub fn rest(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    /// Consumes `n` bytes and returns them.
    pub fn take(&mut self, n: usize) -> Result<&'a [u8], CursorError> {
        ensure!(
            n <= self.remaining(),
            cursor_error::EndOfDataSnafu {
                offset: self.pos,
                wanted: n
            }
        );

        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    pub fn skip(&mut self, n: usize) -> Result<(), CursorError> {
        self.take(n).map(|_| ())
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], CursorError> {
        let mut out = [0; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    #[inline]
    pub fn read_u8(&mut self) -> Result<u8, CursorError> {
        Ok(self.take(1)?[0])
    }

    #[inline]
    pub fn read_u16<B: ByteOrder>(&mut self) -> Result<u16, CursorError> {
        self.take(2).map(B::read_u16)
    }

    #[inline]
    pub fn read_i16<B: ByteOrder>(&mut self) -> Result<i16, CursorError> {
        self.take(2).map(B::read_i16)
    }

    #[inline]
    pub fn read_u32<B: ByteOrder>(&mut self) -> Result<u32, CursorError> {
        self.take(4).map(B::read_u32)
    }

    #[inline]
    pub fn read_i32<B: ByteOrder>(&mut self) -> Result<i32, CursorError> {
        self.take(4).map(B::read_i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::{BigEndian, LittleEndian};

    #[test]
    fn mixed_endianness_shares_position() {
        let data = [0x12, 0x34, 0x78, 0x56, 0x34, 0x12, 0xFF];
        let mut cursor = ByteCursor::new(&data);

        assert_eq!(cursor.read_u16::<BigEndian>().unwrap(), 0x1234);
        assert_eq!(cursor.read_u32::<LittleEndian>().unwrap(), 0x1234_5678);
        assert_eq!(cursor.position(), 6);
        assert!(cursor.available());
        assert_eq!(cursor.read_u8().unwrap(), 0xFF);
        assert!(!cursor.available());
    }

    #[test]
    fn signed_reads() {
        let data = [0xFF, 0xFE, 0xFF, 0xFF, 0xFF, 0xFE];
        let mut cursor = ByteCursor::new(&data);

        assert_eq!(cursor.read_i16::<BigEndian>().unwrap(), -2);
        assert_eq!(cursor.read_i32::<BigEndian>().unwrap(), -2);
    }

    #[test]
    fn reading_past_the_end_fails_without_consuming() {
        let data = [1, 2, 3];
        let mut cursor = ByteCursor::new(&data);
        cursor.skip(2).unwrap();

        let err = cursor.read_u16::<BigEndian>().unwrap_err();
        assert!(matches!(
            err,
            CursorError::EndOfData {
                offset: 2,
                wanted: 2
            }
        ));
        assert_eq!(cursor.remaining(), 1);
        assert_eq!(cursor.read_u8().unwrap(), 3);
        assert!(cursor.read_u8().is_err());
    }

    #[test]
    fn skip_past_the_end_fails() {
        let mut cursor = ByteCursor::new(&[0; 4]);
        assert!(cursor.skip(5).is_err());
        assert!(cursor.skip(4).is_ok());
        assert_eq!(cursor.rest(), &[] as &[u8]);
    }
}
