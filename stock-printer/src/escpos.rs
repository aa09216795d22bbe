//! ESC/POS text builder
//!
//! Accumulates receipt content as a UTF-8 `String` with ESC/POS commands
//! inline; convert it with [`encode_for_printer`](crate::encode_for_printer)
//! before sending. A builder made with [`EscPosTextBuilder::plain`] drops
//! every command, which gives the same layout for a terminal.

use crate::encoding::{Charset, text_width};

const ALIGN_LEFT: &str = "\x1B\x61\x00";
const ALIGN_CENTER: &str = "\x1B\x61\x01";
const ALIGN_RIGHT: &str = "\x1B\x61\x02";
const BOLD_ON: &str = "\x1B\x45\x01";
const BOLD_OFF: &str = "\x1B\x45\x00";
const SIZE_DOUBLE: &str = "\x1D\x21\x11";
const SIZE_RESET: &str = "\x1D\x21\x00";
const INIT: &str = "\x1B\x40";

/// String-based ESC/POS command builder
pub struct EscPosTextBuilder {
    buf: String,
    width: usize,
    charset: Charset,
    styled: bool,
}

impl EscPosTextBuilder {
    /// Printer builder for a paper width in characters
    ///
    /// Common widths:
    /// - 58mm paper: 32 characters
    /// - 80mm paper: 48 characters
    pub fn new(width: usize) -> Self {
        let mut builder = Self {
            buf: String::new(),
            width,
            charset: Charset::default(),
            styled: true,
        };
        builder.command(INIT);
        builder
    }

    /// Builder that emits text only, no commands
    pub fn plain(width: usize) -> Self {
        Self {
            buf: String::new(),
            width,
            charset: Charset::default(),
            styled: false,
        }
    }

    /// Measure widths in `charset`
    pub fn with_charset(mut self, charset: Charset) -> Self {
        self.charset = charset;
        self
    }

    /// Get the configured paper width
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn charset(&self) -> Charset {
        self.charset
    }

    fn command(&mut self, seq: &str) -> &mut Self {
        if self.styled {
            self.buf.push_str(seq);
        }
        self
    }

    // === Text Output ===

    /// Write raw text
    pub fn write(&mut self, s: &str) -> &mut Self {
        self.buf.push_str(s);
        self
    }

    /// Write text followed by newline
    pub fn write_line(&mut self, s: &str) -> &mut Self {
        self.buf.push_str(s);
        self.buf.push('\n');
        self
    }

    pub fn newline(&mut self) -> &mut Self {
        self.buf.push('\n');
        self
    }

    // === Alignment ===

    pub fn align_left(&mut self) -> &mut Self {
        self.command(ALIGN_LEFT)
    }

    pub fn align_center(&mut self) -> &mut Self {
        self.command(ALIGN_CENTER)
    }

    pub fn align_right(&mut self) -> &mut Self {
        self.command(ALIGN_RIGHT)
    }

    // === Text Style ===

    pub fn bold_on(&mut self) -> &mut Self {
        self.command(BOLD_ON)
    }

    pub fn bold_off(&mut self) -> &mut Self {
        self.command(BOLD_OFF)
    }

    /// Double width and height
    pub fn size_double(&mut self) -> &mut Self {
        self.command(SIZE_DOUBLE)
    }

    pub fn size_reset(&mut self) -> &mut Self {
        self.command(SIZE_RESET)
    }

    // === Separators ===

    /// Print a line of '=' characters
    pub fn eq_sep(&mut self) -> &mut Self {
        self.write_line(&"=".repeat(self.width))
    }

    /// Print a line of '-' characters
    pub fn dash_sep(&mut self) -> &mut Self {
        self.write_line(&"-".repeat(self.width))
    }

    // === Layout Helpers ===

    /// Print a centered line
    ///
    /// Printers center by command; plain output is padded instead.
    pub fn text_center(&mut self, s: &str) -> &mut Self {
        if self.styled {
            self.align_center();
            self.write_line(s);
            self.align_left()
        } else {
            let pad = self.width.saturating_sub(text_width(s, self.charset)) / 2;
            self.write(&" ".repeat(pad));
            self.write_line(s)
        }
    }

    /// Print left and right text on the same line
    ///
    /// Falls back to a single space between them when they do not fit.
    pub fn line_lr(&mut self, left: &str, right: &str) -> &mut Self {
        let lw = text_width(left, self.charset);
        let rw = text_width(right, self.charset);

        if lw + rw >= self.width {
            self.write_line(&format!("{} {}", left, right))
        } else {
            let spaces = self.width - lw - rw;
            self.write(left);
            self.write(&" ".repeat(spaces));
            self.write_line(right)
        }
    }

    // === Paper Control ===

    /// Feed `lines` and cut (GS V 66 n)
    ///
    /// `lines` is capped at 127 so the command stays single-byte ASCII.
    pub fn cut(&mut self, lines: u8) -> &mut Self {
        if self.styled {
            self.buf.push_str("\x1D\x56\x42");
            self.buf.push(char::from(lines.min(0x7F)));
        }
        self
    }

    // === Build ===

    /// Finalize and return the accumulated string
    pub fn finalize(self) -> String {
        self.buf
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }
}

impl Default for EscPosTextBuilder {
    fn default() -> Self {
        Self::new(48)
    }
}
