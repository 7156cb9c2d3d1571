//! XML plumbing shared by the reader, writer and stylesheet code

use std::borrow::Cow;
use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::XlsxResult;

/// Feed every event of a part to `handle`, stopping at end of input
pub(crate) fn scan<B, F>(xml: &mut Reader<B>, mut handle: F) -> XlsxResult<()>
where
    B: BufRead,
    F: FnMut(Event<'_>) -> XlsxResult<()>,
{
    let mut buf = Vec::new();
    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Eof => return Ok(()),
            event => handle(event)?,
        }
        buf.clear();
    }
}

/// Unescaped value of the attribute whose qualified name is `key`
pub(crate) fn attr(element: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    element
        .attributes()
        .flatten()
        .find(|a| a.key.as_ref() == key)
        .and_then(|a| a.unescape_value().ok())
        .map(Cow::into_owned)
}

/// Namespace of relationship ids in workbook and sheet parts
pub(crate) const DOC_RELS_NS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Prefixes that `element` binds to `namespace` with `xmlns:` declarations
pub(crate) fn bound_prefixes(element: &BytesStart<'_>, namespace: &str) -> Vec<Vec<u8>> {
    element
        .attributes()
        .flatten()
        .filter(|a| &*a.value == namespace.as_bytes())
        .filter_map(|a| a.key.as_ref().strip_prefix(b"xmlns:").map(<[u8]>::to_vec))
        .collect()
}

/// Unescaped value of the attribute called `local` under one of `prefixes`
pub(crate) fn prefixed_attr(
    element: &BytesStart<'_>,
    prefixes: &[Vec<u8>],
    local: &[u8],
) -> Option<String> {
    element
        .attributes()
        .flatten()
        .find(|a| {
            a.key.local_name().as_ref() == local
                && a.key.prefix().is_some_and(|p| prefixes.iter().any(|q| q == p.as_ref()))
        })
        .and_then(|a| a.unescape_value().ok())
        .map(Cow::into_owned)
}

/// `1` and `true` (any case) are true, everything else false
pub(crate) fn flag(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}

/// Escape `&`, `<`, `>` and both quote characters
pub(crate) fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 16);
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

/// Character encoded by a `_xHHHH_` sequence at the start of `text`
fn escaped_char(text: &str) -> Option<char> {
    let rest = text.strip_prefix("_x")?;
    let hex = rest.get(..4)?;
    if rest.as_bytes().get(4) != Some(&b'_') || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
}

const ESCAPE_LEN: usize = "_x0000_".len();

/// Turn `_xHHHH_` sequences back into the characters they stand for
///
/// Malformed or partial sequences stay as written.
pub(crate) fn decode_escapes(text: &str) -> Cow<'_, str> {
    if !text.contains("_x") {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len());
    let mut resume = 0;
    for (at, ch) in text.char_indices() {
        if at < resume {
            continue;
        }
        match escaped_char(&text[at..]) {
            Some(decoded) => {
                out.push(decoded);
                resume = at + ESCAPE_LEN;
            }
            None => out.push(ch),
        }
    }
    Cow::Owned(out)
}

/// Write control characters XML 1.0 cannot hold as `_xHHHH_`
///
/// An underscore that would otherwise start a valid sequence is itself
/// written as `_x005F_`, so the text decodes to what was stored.
pub(crate) fn encode_escapes(text: &str) -> Cow<'_, str> {
    let awkward = |ch: char| ch < ' ' && !matches!(ch, '\t' | '\n' | '\r');
    if !text.chars().any(|ch| awkward(ch) || ch == '_') {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for (at, ch) in text.char_indices() {
        if awkward(ch) {
            out.push_str(&format!("_x{:04X}_", u32::from(ch)));
        } else if ch == '_' && escaped_char(&text[at..]).is_some() {
            out.push_str("_x005F_");
        } else {
            out.push(ch);
        }
    }
    Cow::Owned(out)
}
