//! BIFF8 Unicode strings.
//!
//! A BIFF8 string is a character count, an option byte and the characters:
//! - bit 0 (`fHighByte`): 0 = compressed Latin-1, 1 = UTF-16LE
//! - bit 2 (`fExtSt`): a 4-byte extended data size follows the header
//! - bit 3 (`fRichSt`): a 2-byte rich text run count follows the header
//!
//! After the characters come the rich text runs (4 bytes each) and the
//! extended data, both of which are skipped.
//!
//! Inside the SST, character data may run into a CONTINUE record. The
//! continuation then starts with a fresh option byte, so the encoding can
//! switch from compressed to UTF-16 in the middle of a string.

use super::parser::{read_bytes, read_u16, read_u32, read_u8, skip};
use super::records::MAX_RECORD_LEN;
use crate::error::{XlsError, XlsResult};

/// Longest text a cell can hold, in UTF-16 code units
pub const MAX_CELL_TEXT_UNITS: usize = 32_767;

const FLAG_WIDE: u8 = 0x01;
const FLAG_EXT: u8 = 0x04;
const FLAG_RICH: u8 = 0x08;

/// Read a string with a 1-byte length prefix (BOUNDSHEET, FONT).
pub fn read_short_string(data: &[u8], offset: &mut usize) -> XlsResult<String> {
    let char_count = read_u8(data, offset)? as usize;
    let flags = read_u8(data, offset)?;
    read_characters(data, offset, &[], char_count, flags)
}

/// Read a string with a 2-byte length prefix (LABEL, STRING, FORMAT).
///
/// CONTINUE boundaries are not considered; SST entries go through
/// [`parse_sst`].
pub fn read_unicode_string(data: &[u8], offset: &mut usize) -> XlsResult<String> {
    read_string_at(data, offset, &[])
}

fn read_string_at(data: &[u8], offset: &mut usize, boundaries: &[usize]) -> XlsResult<String> {
    let char_count = read_u16(data, offset)? as usize;
    let flags = read_u8(data, offset)?;

    let run_count = if flags & FLAG_RICH != 0 {
        read_u16(data, offset)? as usize
    } else {
        0
    };
    let ext_size = if flags & FLAG_EXT != 0 {
        read_u32(data, offset)? as usize
    } else {
        0
    };

    let text = read_characters(data, offset, boundaries, char_count, flags)?;

    skip(data, offset, run_count * 4)?;
    skip(data, offset, ext_size)?;
    Ok(text)
}

/// Read `count` characters, honouring CONTINUE `boundaries` in `data`.
fn read_characters(
    data: &[u8],
    offset: &mut usize,
    boundaries: &[usize],
    count: usize,
    flags: u8,
) -> XlsResult<String> {
    let mut wide = flags & FLAG_WIDE != 0;
    let mut units: Vec<u16> = Vec::with_capacity(count);
    let mut remaining = count;

    while remaining > 0 {
        let limit = boundaries
            .iter()
            .copied()
            .find(|&b| b >= *offset)
            .unwrap_or(data.len());
        let width = if wide { 2 } else { 1 };
        let fit = ((limit - *offset) / width).min(remaining);

        if fit == 0 {
            if *offset != limit || limit >= data.len() {
                return Err(XlsError::Parse(format!(
                    "string data too short: {} character(s) missing at offset {}",
                    remaining, *offset
                )));
            }
            // Continuation: a new option byte precedes the rest of the characters
            wide = read_u8(data, offset)? & FLAG_WIDE != 0;
            continue;
        }

        let bytes = read_bytes(data, offset, fit * width)?;
        if wide {
            units.extend(
                bytes
                    .chunks_exact(2)
                    .map(|pair| u16::from_le_bytes([pair[0], pair[1]])),
            );
        } else {
            units.extend(bytes.iter().map(|&b| b as u16));
        }
        remaining -= fit;
    }

    String::from_utf16(&units).map_err(|e| XlsError::Parse(format!("invalid UTF-16 string: {e}")))
}

/// Parse the Shared String Table.
///
/// `data` is the SST body with its CONTINUE bodies appended and
/// `continue_offsets` the positions where each continuation starts.
/// The body begins with the total reference count and the unique string
/// count (both u32), followed by the strings.
pub fn parse_sst(data: &[u8], continue_offsets: &[usize]) -> XlsResult<Vec<String>> {
    let mut offset = 0;

    let _total_refs = read_u32(data, &mut offset)?;
    let unique_count = read_u32(data, &mut offset)? as usize;

    // The count comes from the file; don't trust it for the allocation
    let mut strings = Vec::with_capacity(unique_count.min(data.len() / 3));

    for i in 0..unique_count {
        match read_string_at(data, &mut offset, continue_offsets) {
            Ok(s) => strings.push(s),
            Err(e) => {
                log::warn!("SST parse error at string {i}/{unique_count}: {e}");
                break;
            }
        }
    }

    Ok(strings)
}

fn utf16_units(s: &str, max: usize) -> Vec<u16> {
    let mut units: Vec<u16> = s.encode_utf16().collect();
    if units.len() > max {
        log::warn!(
            "truncating string of {} UTF-16 units to {} for XLS",
            units.len(),
            max
        );
        units.truncate(max);
        // Don't leave half a surrogate pair behind
        if units.last().is_some_and(|u| (0xD800..0xDC00).contains(u)) {
            units.pop();
        }
    }
    units
}

/// Append a string with a 1-byte length prefix, stored as UTF-16.
pub fn write_short_string(out: &mut Vec<u8>, s: &str) -> XlsResult<()> {
    let units: Vec<u16> = s.encode_utf16().collect();
    let count = u8::try_from(units.len())
        .map_err(|_| XlsError::InvalidFormat(format!("string too long for XLS: {s}")))?;
    out.push(count);
    out.push(FLAG_WIDE);
    for unit in units {
        out.extend_from_slice(&unit.to_le_bytes());
    }
    Ok(())
}

/// Encode a Shared String Table.
///
/// Returns the record bodies in order: the SST body first, then one body
/// per CONTINUE record. Strings are stored as UTF-16; a string header
/// always shares a record with its first character, and characters that
/// spill into a continuation are preceded by a new option byte.
pub fn encode_sst(strings: &[&str], total_refs: u32) -> Vec<Vec<u8>> {
    let mut bodies = Vec::new();
    let mut current = Vec::with_capacity(MAX_RECORD_LEN);
    current.extend_from_slice(&total_refs.to_le_bytes());
    current.extend_from_slice(&(strings.len() as u32).to_le_bytes());

    for s in strings {
        let units = utf16_units(s, MAX_CELL_TEXT_UNITS);

        let header_len = if units.is_empty() { 3 } else { 5 };
        if MAX_RECORD_LEN - current.len() < header_len {
            bodies.push(std::mem::take(&mut current));
        }
        current.extend_from_slice(&(units.len() as u16).to_le_bytes());
        current.push(FLAG_WIDE);

        let mut rest = units.as_slice();
        loop {
            let room = (MAX_RECORD_LEN - current.len()) / 2;
            let (now, later) = rest.split_at(room.min(rest.len()));
            for unit in now {
                current.extend_from_slice(&unit.to_le_bytes());
            }
            rest = later;
            if rest.is_empty() {
                break;
            }
            bodies.push(std::mem::take(&mut current));
            current.push(FLAG_WIDE);
        }
    }

    bodies.push(current);
    bodies
}
