use crate::error::{Error, Result};
use zerocopy::FromBytes;
use zerocopy::byteorder::little_endian::{U16 as U16LE, U32 as U32LE, U64 as U64LE};

/// Marker for a NULL length-encoded value
pub const LENENC_NULL: u8 = 0xFB;

#[inline]
fn truncated(needed: usize, data: &[u8]) -> Error {
    Error::TruncatedPacket {
        needed,
        remaining: data.len(),
    }
}

/// Read 1-byte integer
pub fn read_int_1(data: &[u8]) -> Result<(u8, &[u8])> {
    match data.split_first() {
        Some((&value, rest)) => Ok((value, rest)),
        None => Err(truncated(1, data)),
    }
}

/// Read 2-byte little-endian integer
pub fn read_int_2(data: &[u8]) -> Result<(u16, &[u8])> {
    let (value, rest) = U16LE::read_from_prefix(data).map_err(|_| truncated(2, data))?;
    Ok((value.get(), rest))
}

/// Read 3-byte little-endian integer
pub fn read_int_3(data: &[u8]) -> Result<(u32, &[u8])> {
    let (bytes, rest) = read_string_fix(data, 3)?;
    let value = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], 0]);
    Ok((value, rest))
}

/// Read 4-byte little-endian integer
pub fn read_int_4(data: &[u8]) -> Result<(u32, &[u8])> {
    let (value, rest) = U32LE::read_from_prefix(data).map_err(|_| truncated(4, data))?;
    Ok((value.get(), rest))
}

/// Read 8-byte little-endian integer
pub fn read_int_8(data: &[u8]) -> Result<(u64, &[u8])> {
    let (value, rest) = U64LE::read_from_prefix(data).map_err(|_| truncated(8, data))?;
    Ok((value.get(), rest))
}

/// Read length-encoded integer which may be NULL (0xFB)
pub fn read_int_lenenc_nullable(data: &[u8]) -> Result<(Option<u64>, &[u8])> {
    let (marker, rest) = read_int_1(data)?;

    match marker {
        0xFC => {
            // 2-byte integer
            let (val, rest) = read_int_2(rest)?;
            Ok((Some(u64::from(val)), rest))
        }
        0xFD => {
            // 3-byte integer
            let (val, rest) = read_int_3(rest)?;
            Ok((Some(u64::from(val)), rest))
        }
        0xFE => {
            // 8-byte integer
            let (val, rest) = read_int_8(rest)?;
            Ok((Some(val), rest))
        }
        LENENC_NULL => Ok((None, rest)),
        0xFF => Err(Error::MalformedVarint(marker)),
        val => {
            // 1-byte integer
            Ok((Some(u64::from(val)), rest))
        }
    }
}

/// Read length-encoded integer where NULL is not allowed
pub fn read_int_lenenc(data: &[u8]) -> Result<(u64, &[u8])> {
    match read_int_lenenc_nullable(data)? {
        (Some(value), rest) => Ok((value, rest)),
        (None, _) => Err(Error::MalformedVarint(LENENC_NULL)),
    }
}

/// Read fixed-length string
pub fn read_string_fix(data: &[u8], len: usize) -> Result<(&[u8], &[u8])> {
    data.split_at_checked(len).ok_or_else(|| truncated(len, data))
}

/// Read null-terminated string. The terminator is consumed but not returned.
pub fn read_string_null(data: &[u8]) -> Result<(&[u8], &[u8])> {
    match data.iter().position(|&byte| byte == 0) {
        Some(i) => Ok((&data[..i], &data[i + 1..])),
        None => Err(truncated(data.len() + 1, data)),
    }
}

/// Read a string whose length was given by a header already consumed.
///
/// Unlike [`read_string_fix`], a short buffer means the header lied, which is
/// reported as [`Error::MalformedLengthPrefix`].
pub fn read_string_prefixed(data: &[u8], length: u64) -> Result<(&[u8], &[u8])> {
    let malformed = || Error::MalformedLengthPrefix {
        length,
        remaining: data.len(),
    };
    let len = usize::try_from(length).map_err(|_| malformed())?;
    data.split_at_checked(len).ok_or_else(malformed)
}

/// Read length-encoded string. NULL (0xFB) reads as an empty string.
pub fn read_string_lenenc(data: &[u8]) -> Result<(&[u8], &[u8])> {
    match read_int_lenenc_nullable(data)? {
        (Some(len), rest) => read_string_prefixed(rest, len),
        (None, rest) => Ok((&rest[..0], rest)),
    }
}

/// Write 1-byte integer
pub fn write_int_1(out: &mut Vec<u8>, value: u8) {
    out.push(value);
}

/// Write 2-byte little-endian integer
pub fn write_int_2(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// Write 3-byte little-endian integer
pub fn write_int_3(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes()[..3]);
}

/// Write 4-byte little-endian integer
pub fn write_int_4(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// Write 8-byte little-endian integer
pub fn write_int_8(out: &mut Vec<u8>, value: u64) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// Write length-encoded integer
pub fn write_int_lenenc(out: &mut Vec<u8>, value: u64) {
    if value < 251 {
        out.push(value as u8);
    } else if value < (1 << 16) {
        out.push(0xfc);
        write_int_2(out, value as u16);
    } else if value < (1 << 24) {
        out.push(0xfd);
        write_int_3(out, value as u32);
    } else {
        out.push(0xfe);
        write_int_8(out, value);
    }
}

/// Write fixed-length bytes
pub fn write_bytes_fix(out: &mut Vec<u8>, data: &[u8]) {
    out.extend_from_slice(data);
}

/// Write null-terminated bytes
pub fn write_bytes_null(out: &mut Vec<u8>, data: &[u8]) {
    out.extend_from_slice(data);
    out.push(0);
}

/// Write null-terminated string
pub fn write_string_null(out: &mut Vec<u8>, s: &str) {
    write_bytes_null(out, s.as_bytes());
}

/// Write length-encoded string
pub fn write_string_lenenc(out: &mut Vec<u8>, s: &str) {
    write_bytes_lenenc(out, s.as_bytes());
}

/// Write length-encoded bytes
pub fn write_bytes_lenenc(out: &mut Vec<u8>, data: &[u8]) {
    write_int_lenenc(out, data.len() as u64);
    out.extend_from_slice(data);
}
