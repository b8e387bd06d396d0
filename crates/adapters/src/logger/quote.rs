//! Double-quoted string escaping for the text formatter.
//!
//! Output follows Go `strconv.Quote` conventions: `"` and `\` are escaped,
//! the usual short escapes are used for bell through carriage return, other
//! ASCII controls become `\xHH`, and non-printable code points become
//! `\uHHHH` or `\UHHHHHHHH`. Printable Unicode passes through untouched.

use std::fmt;

/// Append `text` wrapped in double quotes, escaped.
pub(crate) fn quote_into(buf: &mut Vec<u8>, text: &str) {
    buf.push(b'"');
    escape_into(buf, text);
    buf.push(b'"');
}

/// `fmt::Write` adapter that escapes everything written through it.
///
/// Lets `Display` output be quoted without an intermediate `String`.
pub(crate) struct Escaper<'a>(pub(crate) &'a mut Vec<u8>);

impl fmt::Write for Escaper<'_> {
    fn write_str(&mut self, text: &str) -> fmt::Result {
        escape_into(self.0, text);
        Ok(())
    }
}

/// Append the quoted `Display` output of `value`.
pub(crate) fn quote_display_into(buf: &mut Vec<u8>, value: &dyn fmt::Display) -> fmt::Result {
    buf.push(b'"');
    fmt::write(&mut Escaper(&mut *buf), format_args!("{value}"))?;
    buf.push(b'"');
    Ok(())
}

fn escape_into(buf: &mut Vec<u8>, text: &str) {
    let mut utf8 = [0_u8; 4];
    for ch in text.chars() {
        match ch {
            '"' => buf.extend_from_slice(b"\\\""),
            '\\' => buf.extend_from_slice(b"\\\\"),
            '\u{07}' => buf.extend_from_slice(b"\\a"),
            '\u{08}' => buf.extend_from_slice(b"\\b"),
            '\u{0c}' => buf.extend_from_slice(b"\\f"),
            '\n' => buf.extend_from_slice(b"\\n"),
            '\r' => buf.extend_from_slice(b"\\r"),
            '\t' => buf.extend_from_slice(b"\\t"),
            '\u{0b}' => buf.extend_from_slice(b"\\v"),
            ch if ch.is_ascii_control() => push_hex(buf, b"\\x", u32::from(ch), 2),
            ch if !is_printable(ch) => {
                if u32::from(ch) <= 0xFFFF {
                    push_hex(buf, b"\\u", u32::from(ch), 4);
                } else {
                    push_hex(buf, b"\\U", u32::from(ch), 8);
                }
            },
            ch => buf.extend_from_slice(ch.encode_utf8(&mut utf8).as_bytes()),
        }
    }
}

fn push_hex(buf: &mut Vec<u8>, prefix: &[u8], code: u32, width: u32) {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    buf.extend_from_slice(prefix);
    for shift in (0..width).rev() {
        let nibble = (code >> (shift * 4)) & 0xF;
        buf.push(HEX[nibble as usize]);
    }
}

/// Printability check: everything except controls, non-ASCII spaces,
/// separators, and common invisible format characters.
fn is_printable(ch: char) -> bool {
    if ch == ' ' {
        return true;
    }
    if ch.is_control() || ch.is_whitespace() {
        return false;
    }
    !matches!(
        ch,
        '\u{ad}'
            | '\u{600}'..='\u{605}'
            | '\u{61c}'
            | '\u{180e}'
            | '\u{200b}'..='\u{200f}'
            | '\u{202a}'..='\u{202e}'
            | '\u{2060}'..='\u{2064}'
            | '\u{2066}'..='\u{206f}'
            | '\u{feff}'
            | '\u{fff9}'..='\u{fffb}'
            | '\u{e000}'..='\u{f8ff}'
            | '\u{f0000}'..='\u{10ffff}'
    )
}
