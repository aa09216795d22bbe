//! # stock-printer
//!
//! ESC/POS receipt printing, the low-level half only.
//!
//! ## Scope
//!
//! This crate handles HOW to print:
//! - ESC/POS command text building
//! - Code page conversion for Latin (Windows-1252) and GBK printers
//! - Network printing (TCP port 9100)
//!
//! The receipt layout itself lives in the desk application.
//!
//! ## Example
//!
//! ```ignore
//! use stock_printer::{Charset, EscPosTextBuilder, NetworkPrinter, Printer, encode_for_printer};
//!
//! let mut b = EscPosTextBuilder::new(48);
//! b.text_center("TABLE 12");
//! b.dash_sep();
//! b.line_lr("Coke x3", "1500.00");
//! b.cut(4);
//!
//! let bytes = encode_for_printer(&b.finalize(), Charset::Windows1252);
//! NetworkPrinter::from_addr("192.168.1.100:9100")?.print(&bytes).await?;
//! ```

mod encoding;
mod error;
mod escpos;
mod printer;

// Re-exports
pub use encoding::{Charset, encode_for_printer, pad_to_width, text_width, truncate_to_width};
pub use error::{PrintError, PrintResult};
pub use escpos::EscPosTextBuilder;
pub use printer::{DEFAULT_PORT, NetworkPrinter, Printer};
