//! Little-endian field readers over a record body
//!
//! Each reader takes the body and a cursor position, and moves the cursor
//! past what it consumed. A short body leaves the cursor untouched.

use crate::error::{XlsError, XlsResult};

fn truncated(at: usize, wanted: usize, have: usize) -> XlsError {
    XlsError::Parse(format!(
        "record body ends at {} but {} byte(s) are needed from offset {}",
        have, wanted, at
    ))
}

pub fn read_bytes<'a>(data: &'a [u8], offset: &mut usize, len: usize) -> XlsResult<&'a [u8]> {
    let start = *offset;
    let slice = start
        .checked_add(len)
        .and_then(|end| data.get(start..end))
        .ok_or_else(|| truncated(start, len, data.len()))?;
    *offset += len;
    Ok(slice)
}

fn read_array<const N: usize>(data: &[u8], offset: &mut usize) -> XlsResult<[u8; N]> {
    let start = *offset;
    let bytes = read_bytes(data, offset, N)?;
    <[u8; N]>::try_from(bytes).map_err(|_| truncated(start, N, data.len()))
}

pub fn read_u8(data: &[u8], offset: &mut usize) -> XlsResult<u8> {
    read_array::<1>(data, offset).map(|[b]| b)
}

pub fn read_u16(data: &[u8], offset: &mut usize) -> XlsResult<u16> {
    read_array(data, offset).map(u16::from_le_bytes)
}

pub fn read_u32(data: &[u8], offset: &mut usize) -> XlsResult<u32> {
    read_array(data, offset).map(u32::from_le_bytes)
}

/// Eight undecoded bytes, e.g. the cached result of a FORMULA record
pub fn read_8_bytes(data: &[u8], offset: &mut usize) -> XlsResult<[u8; 8]> {
    read_array(data, offset)
}

pub fn read_f64(data: &[u8], offset: &mut usize) -> XlsResult<f64> {
    read_array(data, offset).map(f64::from_le_bytes)
}

pub fn skip(data: &[u8], offset: &mut usize, len: usize) -> XlsResult<()> {
    read_bytes(data, offset, len).map(drop)
}

/// Expand a 32-bit RK number
///
/// Bit 1 set means the upper 30 bits are a signed integer, clear means they
/// are the high bits of a double. Bit 0 set divides the result by 100.
pub fn decode_rk(rk: u32) -> f64 {
    let payload = if rk & 0b10 == 0 {
        f64::from_bits(u64::from(rk & !0b11) << 32)
    } else {
        f64::from((rk as i32) >> 2)
    };
    match rk & 0b01 {
        0 => payload,
        _ => payload / 100.0,
    }
}

pub fn read_rk(data: &[u8], offset: &mut usize) -> XlsResult<f64> {
    Ok(decode_rk(read_u32(data, offset)?))
}
