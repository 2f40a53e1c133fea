use zerocopy::{FromBytes, Immutable, KnownLayout};

use crate::error::{Error, Result};
use crate::protocol::primitive::*;

/// Sequential reader over one packet body
///
/// Every read either advances past the value it returns or fails and leaves
/// the cursor where it was. Returned slices borrow the underlying buffer.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Offset from the start of the packet body
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of unread bytes
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn has_remaining(&self) -> bool {
        !self.data.is_empty()
    }

    /// The unread bytes, without advancing
    #[inline]
    pub fn rest(&self) -> &'a [u8] {
        self.data
    }

    #[inline]
    fn advance<T>(&mut self, (value, rest): (T, &'a [u8])) -> T {
        self.position += self.data.len() - rest.len();
        self.data = rest;
        value
    }

    pub fn read_int_1(&mut self) -> Result<u8> {
        let read = read_int_1(self.data)?;
        Ok(self.advance(read))
    }

    pub fn read_int_2(&mut self) -> Result<u16> {
        let read = read_int_2(self.data)?;
        Ok(self.advance(read))
    }

    pub fn read_int_3(&mut self) -> Result<u32> {
        let read = read_int_3(self.data)?;
        Ok(self.advance(read))
    }

    pub fn read_int_4(&mut self) -> Result<u32> {
        let read = read_int_4(self.data)?;
        Ok(self.advance(read))
    }

    pub fn read_int_8(&mut self) -> Result<u64> {
        let read = read_int_8(self.data)?;
        Ok(self.advance(read))
    }

    pub fn read_int_lenenc(&mut self) -> Result<u64> {
        let read = read_int_lenenc(self.data)?;
        Ok(self.advance(read))
    }

    pub fn read_int_lenenc_nullable(&mut self) -> Result<Option<u64>> {
        let read = read_int_lenenc_nullable(self.data)?;
        Ok(self.advance(read))
    }

    pub fn read_fixed(&mut self, len: usize) -> Result<&'a [u8]> {
        let read = read_string_fix(self.data, len)?;
        Ok(self.advance(read))
    }

    /// Read a run of fixed-width fields laid out as `T`
    pub fn read_fixed_fields<T>(&mut self) -> Result<&'a T>
    where
        T: FromBytes + KnownLayout + Immutable,
    {
        let read = T::ref_from_prefix(self.data).map_err(|_| Error::TruncatedPacket {
            needed: size_of::<T>(),
            remaining: self.data.len(),
        })?;
        Ok(self.advance(read))
    }

    pub fn skip(&mut self, len: usize) -> Result<()> {
        self.read_fixed(len).map(drop)
    }

    pub fn read_string_null(&mut self) -> Result<&'a [u8]> {
        let read = read_string_null(self.data)?;
        Ok(self.advance(read))
    }

    pub fn read_bytes_lenenc(&mut self) -> Result<&'a [u8]> {
        let read = read_string_lenenc(self.data)?;
        Ok(self.advance(read))
    }

    /// Read a 1-byte length followed by that many bytes
    pub fn read_bytes_u8_prefixed(&mut self) -> Result<&'a [u8]> {
        let (len, rest) = read_int_1(self.data)?;
        let (bytes, rest) = read_string_prefixed(rest, u64::from(len))?;
        Ok(self.advance((bytes, rest)))
    }
}
