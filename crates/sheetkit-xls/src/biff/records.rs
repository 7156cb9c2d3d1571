//! Record identifiers used by the reader and writer, see [MS-XLS] 2.3

/// Substream start; its body carries the BIFF version and substream kind
pub const BOF: u16 = 0x0809;
pub const EOF: u16 = 0x000A;
/// Overflow body appended to the record before it
pub const CONTINUE: u16 = 0x003C;

/// Version word written in every BOF
pub const BIFF8_VERSION: u16 = 0x0600;
pub const BOF_WORKBOOK_GLOBALS: u16 = 0x0005;
pub const BOF_WORKSHEET: u16 = 0x0010;

/// Upper bound on a record body before a CONTINUE is needed
pub const MAX_RECORD_LEN: usize = 8224;

// globals substream
pub const DATEMODE: u16 = 0x0022;
pub const FONT: u16 = 0x0031;
pub const WINDOW1: u16 = 0x003D;
pub const CODEPAGE: u16 = 0x0042;
pub const BOUNDSHEET: u16 = 0x0085;
pub const XF: u16 = 0x00E0;
pub const SST: u16 = 0x00FC;
pub const STYLE: u16 = 0x0293;
pub const FORMAT: u16 = 0x041E;

// sheet substreams
pub const FORMULA: u16 = 0x0006;
pub const MULRK: u16 = 0x00BD;
pub const LABELSST: u16 = 0x00FD;
pub const DIMENSION: u16 = 0x0200;
pub const NUMBER: u16 = 0x0203;
pub const LABEL: u16 = 0x0204;
pub const BOOLERR: u16 = 0x0205;
/// String result of the FORMULA record just before it
pub const STRING: u16 = 0x0207;
pub const WINDOW2: u16 = 0x023E;
pub const RK: u16 = 0x027E;
