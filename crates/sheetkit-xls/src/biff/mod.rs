//! Record framing for BIFF8 streams
//!
//! Every record is a little-endian `u16` type and `u16` length followed by
//! that many body bytes. Bodies longer than [`records::MAX_RECORD_LEN`] spill
//! into CONTINUE records, which are folded into the record they extend.

pub mod parser;
pub mod records;
pub mod strings;

use std::io::{ErrorKind, Read, Seek};

use crate::error::{XlsError, XlsResult};
use parser::read_u16;

/// One logical record, CONTINUE bodies included
#[derive(Debug)]
pub struct BiffRecord {
    pub record_type: u16,
    pub data: Vec<u8>,
    /// Where in `data` each folded CONTINUE body begins. Strings split at
    /// one of these carry a fresh option byte.
    pub continue_offsets: Vec<usize>,
    /// Position of the record header in the stream
    pub stream_offset: u64,
}

/// Header position, type and body of the next raw record, `None` at the end
fn next_raw<R: Read + Seek>(stream: &mut R) -> XlsResult<Option<(u64, u16, Vec<u8>)>> {
    let at = stream.stream_position()?;
    let mut header = [0u8; 4];
    if let Err(err) = stream.read_exact(&mut header) {
        return match err.kind() {
            ErrorKind::UnexpectedEof => Ok(None),
            _ => Err(err.into()),
        };
    }
    let [t0, t1, l0, l1] = header;
    let mut body = vec![0; usize::from(u16::from_le_bytes([l0, l1]))];
    stream.read_exact(&mut body)?;
    Ok(Some((at, u16::from_le_bytes([t0, t1]), body)))
}

/// Split a stream into logical records
pub fn read_all_records<R: Read + Seek>(stream: &mut R) -> XlsResult<Vec<BiffRecord>> {
    let mut out: Vec<BiffRecord> = Vec::new();
    while let Some((at, record_type, body)) = next_raw(stream)? {
        if record_type != records::CONTINUE {
            out.push(BiffRecord {
                record_type,
                data: body,
                continue_offsets: Vec::new(),
                stream_offset: at,
            });
            continue;
        }
        let Some(parent) = out.last_mut() else {
            log::debug!("CONTINUE at {} has nothing to extend", at);
            continue;
        };
        parent.continue_offsets.push(parent.data.len());
        parent.data.extend(body);
    }
    Ok(out)
}

/// `(version, substream type)` from a BOF body
pub fn parse_bof(data: &[u8]) -> XlsResult<(u16, u16)> {
    let mut at = 0;
    let fields = read_u16(data, &mut at).and_then(|v| Ok((v, read_u16(data, &mut at)?)));
    fields.map_err(|_| XlsError::InvalidFormat(format!("BOF body of {} bytes", data.len())))
}

/// Frame `body` as one record at the end of `out`
///
/// Splitting into CONTINUE records is left to the caller.
pub fn write_record(out: &mut Vec<u8>, record_type: u16, body: &[u8]) -> XlsResult<()> {
    let len = u16::try_from(body.len())
        .ok()
        .filter(|&len| usize::from(len) <= records::MAX_RECORD_LEN)
        .ok_or_else(|| {
            XlsError::InvalidFormat(format!(
                "record 0x{:04X} would hold {} bytes",
                record_type,
                body.len()
            ))
        })?;
    out.extend(record_type.to_le_bytes());
    out.extend(len.to_le_bytes());
    out.extend_from_slice(body);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn framed(parts: &[(u16, &[u8])]) -> Vec<u8> {
        let mut out = Vec::new();
        for (kind, body) in parts {
            write_record(&mut out, *kind, body).unwrap();
        }
        out
    }

    #[test]
    fn test_continue_bodies_fold_into_parent() {
        let bytes = framed(&[
            (records::SST, &[9, 8, 7]),
            (records::CONTINUE, &[6, 5]),
            (records::CONTINUE, &[4]),
            (records::EOF, &[]),
        ]);
        let found = read_all_records(&mut Cursor::new(bytes)).unwrap();

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].data, vec![9, 8, 7, 6, 5, 4]);
        assert_eq!(found[0].continue_offsets, vec![3, 5]);
        assert_eq!(found[1].record_type, records::EOF);
        // 7 + 6 + 5 bytes of framed records precede the EOF header
        assert_eq!(found[1].stream_offset, 18);
    }

    #[test]
    fn test_leading_continue_is_dropped() {
        let bytes = framed(&[(records::CONTINUE, &[1]), (records::EOF, &[])]);
        let found = read_all_records(&mut Cursor::new(bytes)).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].stream_offset, 5);
    }

    #[test]
    fn test_cut_off_body_is_an_error() {
        let mut bytes = framed(&[(records::NUMBER, &[0; 14])]);
        bytes.truncate(10);
        assert!(read_all_records(&mut Cursor::new(bytes)).is_err());
    }

    #[test]
    fn test_body_limit() {
        let mut out = Vec::new();
        assert!(write_record(&mut out, records::SST, &vec![0; records::MAX_RECORD_LEN + 1]).is_err());
        assert!(out.is_empty());
        write_record(&mut out, records::SST, &vec![0; records::MAX_RECORD_LEN]).unwrap();
        assert_eq!(out.len(), records::MAX_RECORD_LEN + 4);
    }

    #[test]
    fn test_bof_fields() {
        assert_eq!(
            parse_bof(&[0x00, 0x06, 0x10, 0x00, 0xFF]).unwrap(),
            (records::BIFF8_VERSION, records::BOF_WORKSHEET)
        );
        assert!(matches!(parse_bof(&[0x00, 0x06]), Err(XlsError::InvalidFormat(_))));
    }
}
