//! Table receipt layout
//!
//! One layout, two outputs: ESC/POS text for the printer and plain text
//! for the terminal. Paper narrower than [`NARROW_WIDTH`] stacks each
//! line as name, then quantity, unit price and amount.

use crate::utils::format::money;
use chrono::Local;
use shared::Receipt;
use stock_printer::{Charset, EscPosTextBuilder, pad_to_width, truncate_to_width};

pub const NARROW_WIDTH: usize = 40;

const QTY_W: usize = 3;
const PRICE_W: usize = 10;
const AMOUNT_W: usize = 11;

pub struct ReceiptRenderer<'a> {
    receipt: &'a Receipt,
    width: usize,
    currency: &'a str,
    charset: Charset,
}

impl<'a> ReceiptRenderer<'a> {
    pub fn new(receipt: &'a Receipt, width: usize) -> Self {
        Self {
            receipt,
            width,
            currency: "NGN",
            charset: Charset::default(),
        }
    }

    pub fn with_currency(mut self, currency: &'a str) -> Self {
        self.currency = currency;
        self
    }

    pub fn with_charset(mut self, charset: Charset) -> Self {
        self.charset = charset;
        self
    }

    /// ESC/POS text, still UTF-8; encode before sending
    pub fn render(&self) -> String {
        let mut b = EscPosTextBuilder::new(self.width).with_charset(self.charset);
        self.layout(&mut b);
        b.cut(4);
        b.finalize()
    }

    pub fn render_plain(&self) -> String {
        let mut b = EscPosTextBuilder::plain(self.width).with_charset(self.charset);
        self.layout(&mut b);
        b.finalize()
    }

    fn layout(&self, b: &mut EscPosTextBuilder) {
        let r = self.receipt;

        b.bold_on().size_double();
        b.text_center(&format!("TABLE {}", r.table_number));
        b.size_reset().bold_off();
        if let Some(waiter) = &r.waiter_name {
            b.text_center(&format!("Waiter: {}", waiter));
        }
        let printed_at = r.printed_at.with_timezone(&Local);
        b.text_center(&printed_at.format("%Y-%m-%d %H:%M").to_string());
        b.eq_sep();

        if r.is_empty() {
            b.text_center("No orders");
        } else if self.width < NARROW_WIDTH {
            for line in &r.lines {
                b.write_line(&truncate_to_width(&line.item_name, self.width, self.charset));
                b.line_lr(
                    &format!("  {} x {}", line.quantity, money(line.unit_price)),
                    &money(line.line_total),
                );
            }
        } else {
            let name_w = self.width - QTY_W - PRICE_W - AMOUNT_W - 3;
            b.write_line(&self.columns("QTY", "ITEM", "PRICE", "AMOUNT", name_w));
            b.dash_sep();
            for line in &r.lines {
                b.write_line(&self.columns(
                    &line.quantity.to_string(),
                    &line.item_name,
                    &money(line.unit_price),
                    &money(line.line_total),
                    name_w,
                ));
            }
        }

        b.dash_sep();
        b.bold_on();
        b.line_lr("TOTAL", &format!("{} {}", self.currency, money(r.total)));
        b.bold_off();
        b.eq_sep();
        b.text_center("Thank you");
    }

    fn columns(&self, qty: &str, name: &str, price: &str, amount: &str, name_w: usize) -> String {
        format!(
            "{} {} {} {}",
            pad_to_width(qty, QTY_W, true, self.charset),
            pad_to_width(name, name_w, false, self.charset),
            pad_to_width(price, PRICE_W, true, self.charset),
            pad_to_width(amount, AMOUNT_W, true, self.charset),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use shared::models::{DiningTable, Item, Order, Waiter};
    use shared::{Decimal, JoinKey};

    fn receipt(orders: &[Order]) -> Receipt {
        let table = DiningTable {
            id: 5,
            number: 12,
            waiter_id: 1,
            cleared: false,
            name: None,
        };
        let waiter = Waiter {
            id: 1,
            name: "Ada".into(),
        };
        let items = vec![
            Item {
                id: 1,
                name: "Coke".into(),
                quantity: 40,
                price: Decimal::from(500),
                description: None,
            },
            Item {
                id: 2,
                name: "Chicken suya with extra pepper".into(),
                quantity: 5,
                price: Decimal::new(25005, 1),
                description: None,
            },
        ];
        let printed_at = Utc.with_ymd_and_hms(2024, 3, 1, 19, 30, 0).unwrap();
        Receipt::finalize(&table, Some(&waiter), orders, &items, JoinKey::Id, printed_at)
    }

    #[test]
    fn test_plain_layout() {
        let r = receipt(&[Order::new(1, 5, 1, 3), Order::new(2, 5, 2, 1)]);
        let text = ReceiptRenderer::new(&r, 48).render_plain();

        assert!(text.contains("TABLE 12"));
        assert!(text.contains("Waiter: Ada"));
        assert!(text.contains(&format!(
            "  3 {:<21}     500.00     1500.00\n",
            "Coke"
        )));
        // Long names are cut to the column
        assert!(text.contains("  1 Chicken suya with ext    2500.50     2500.50\n"));
        assert!(text.contains(&format!("TOTAL{}NGN 4000.50", " ".repeat(32))));
        assert!(text.lines().all(|l| l.chars().count() <= 48));
        assert!(!text.contains('\x1B'));
    }

    #[test]
    fn test_narrow_paper_stacks_lines() {
        let r = receipt(&[Order::new(1, 5, 1, 3)]);
        let text = ReceiptRenderer::new(&r, 32)
            .with_currency("EUR")
            .render_plain();

        assert!(text.contains("Coke\n"));
        assert!(text.contains("  3 x 500.00"));
        assert!(text.contains("EUR 1500.00"));
        assert!(text.lines().all(|l| l.chars().count() <= 32));
    }

    #[test]
    fn test_unknown_item_prints_zero() {
        let r = receipt(&[Order::new(1, 5, 99, 2)]);
        let text = ReceiptRenderer::new(&r, 48).render_plain();

        assert!(text.contains("0.00"));
        assert!(text.contains("NGN 0.00"));
    }

    #[test]
    fn test_empty_receipt() {
        let r = receipt(&[]);
        let text = ReceiptRenderer::new(&r, 48).render_plain();
        assert!(text.contains("No orders"));
        assert!(text.contains("NGN 0.00"));
    }

    #[test]
    fn test_printer_output_has_commands() {
        let r = receipt(&[Order::new(1, 5, 1, 3)]);
        let text = ReceiptRenderer::new(&r, 48).render();

        assert!(text.starts_with("\x1B\x40"));
        assert!(text.contains("\x1B\x45\x01"));
        assert!(text.ends_with("\x1D\x56\x42\x04"));
    }
}
