//! Code page conversion for thermal printers
//!
//! Receipt text is assembled as UTF-8 with ESC/POS commands inline. Printers
//! expect a single code page, so widths are measured in encoded bytes and the
//! finished text is converted right before it is sent. A character the code
//! page cannot express is printed as `?`.

use encoding_rs::{Encoding, GBK, WINDOWS_1252};
use std::fmt;
use std::str::FromStr;
use tracing::instrument;

const REPLACEMENT: u8 = b'?';

/// Printer code page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Charset {
    /// Western European, the usual default of receipt printers
    #[default]
    Windows1252,
    /// Simplified Chinese, double-byte
    Gbk,
}

impl Charset {
    fn encoding(self) -> &'static Encoding {
        match self {
            Self::Windows1252 => WINDOWS_1252,
            Self::Gbk => GBK,
        }
    }

    /// Commands selecting this code page
    fn select(self) -> &'static [u8] {
        match self {
            // ESC t 16 - WPC1252
            Self::Windows1252 => &[0x1B, 0x74, 16],
            // FS & (Chinese mode), FS C 1 (GBK)
            Self::Gbk => &[0x1C, 0x26, 0x1C, 0x43, 0x01],
        }
    }

    /// Commands leaving this code page at the end of a job
    fn release(self) -> &'static [u8] {
        match self {
            Self::Windows1252 => &[],
            // FS .
            Self::Gbk => &[0x1C, 0x2E],
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Windows1252 => write!(f, "windows-1252"),
            Self::Gbk => write!(f, "gbk"),
        }
    }
}

impl FromStr for Charset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "windows-1252" | "cp1252" | "latin" => Ok(Self::Windows1252),
            "gbk" => Ok(Self::Gbk),
            other => Err(format!("unknown charset: {}", other)),
        }
    }
}

/// Append the encoded form of `c`
fn push_encoded(c: char, charset: Charset, out: &mut Vec<u8>) {
    if c.is_ascii() {
        out.push(c as u8);
        return;
    }
    let mut utf8 = [0u8; 4];
    let (bytes, _, had_errors) = charset.encoding().encode(c.encode_utf8(&mut utf8));
    if had_errors {
        out.push(REPLACEMENT);
    } else {
        out.extend_from_slice(&bytes);
    }
}

fn char_width(c: char, charset: Charset) -> usize {
    if c.is_ascii() {
        return 1;
    }
    let mut buf = Vec::with_capacity(2);
    push_encoded(c, charset, &mut buf);
    buf.len()
}

/// Printed width of `s` in columns
pub fn text_width(s: &str, charset: Charset) -> usize {
    s.chars().map(|c| char_width(c, charset)).sum()
}

/// Cut `s` so it fits `max_width` columns
pub fn truncate_to_width(s: &str, max_width: usize, charset: Charset) -> String {
    let mut width = 0;
    let mut result = String::new();
    for c in s.chars() {
        let w = char_width(c, charset);
        if width + w > max_width {
            break;
        }
        result.push(c);
        width += w;
    }
    result
}

/// Pad `s` with spaces to exactly `width` columns, truncating when longer
pub fn pad_to_width(s: &str, width: usize, align_right: bool, charset: Charset) -> String {
    let current = text_width(s, charset);
    if current >= width {
        return truncate_to_width(s, width, charset);
    }
    let spaces = " ".repeat(width - current);
    if align_right {
        format!("{}{}", spaces, s)
    } else {
        format!("{}{}", s, spaces)
    }
}

/// Convert UTF-8 receipt text with inline ESC/POS commands to printer bytes
///
/// ASCII passes through untouched so commands survive. Every printer reset
/// (ESC @) drops the code page, so it is selected again right after.
#[instrument(skip(text), fields(len = text.len()))]
pub fn encode_for_printer(text: &str, charset: Charset) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() + 8);
    out.extend_from_slice(charset.select());

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1B' && chars.peek() == Some(&'@') {
            chars.next();
            out.extend_from_slice(&[0x1B, 0x40]);
            out.extend_from_slice(charset.select());
            continue;
        }
        push_encoded(c, charset, &mut out);
    }

    out.extend_from_slice(charset.release());
    out
}
