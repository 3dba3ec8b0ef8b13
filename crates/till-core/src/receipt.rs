//! # Receipt Rendering
//!
//! Turns a [`CheckoutResult`] into a fixed-width plain-text receipt.
//!
//! ## Layout
//! ```text
//! ===== Grocery Store Receipt =====
//! Item                 Qty/Weight       Unit       Line
//! -----------------------------------------------
//! Bag of Chips                  3      35.00      70.00
//!    -> Promotion: buy 1 get 1 free
//! Rice (kg)                 2.500      45.00     112.50
//! -----------------------------------------------
//! Savings:                                        35.00
//! TOTAL:                                         182.50
//! ===============================================
//! ```
//!
//! Money shows 2 decimals with thousands separators, weights 3 decimals,
//! piece counts as plain integers. Display rounding goes through the same
//! half-up helper as the checkout engine.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::fmt;

use crate::checkout::{CheckoutResult, LineQuantity, PriceLine};
use crate::money::{round_half_up, Money, Weight, MONEY_SCALE, WEIGHT_SCALE};

const RULE_WIDTH: usize = 47;

/// Store name printed when none is configured.
pub const DEFAULT_STORE_NAME: &str = "Grocery Store";

/// Presentation settings for a receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptOptions {
    /// Printed in the title row.
    pub store_name: String,

    /// Printed under the title when set.
    pub issued_at: Option<DateTime<Utc>>,
}

impl Default for ReceiptOptions {
    fn default() -> Self {
        ReceiptOptions {
            store_name: DEFAULT_STORE_NAME.to_string(),
            issued_at: None,
        }
    }
}

/// A renderable receipt. Use `to_string()` or [`render`].
#[derive(Debug, Clone, Copy)]
pub struct Receipt<'a> {
    result: &'a CheckoutResult,
    options: &'a ReceiptOptions,
}

impl<'a> Receipt<'a> {
    pub fn new(result: &'a CheckoutResult, options: &'a ReceiptOptions) -> Self {
        Receipt { result, options }
    }

    fn write_line(f: &mut fmt::Formatter<'_>, line: &PriceLine) -> fmt::Result {
        let quantity = match line.quantity() {
            LineQuantity::Pieces(count) => count.to_string(),
            LineQuantity::Weight(weight) => format_weight(weight),
        };

        writeln!(
            f,
            "{:<20} {:>10} {:>10} {:>10}",
            line.product().name(),
            quantity,
            format_money(line.unit_price()),
            format_money(line.line_total())
        )?;

        if let Some(promotion) = line.promotion() {
            writeln!(
                f,
                "   -> Promotion: buy {} get {} free",
                promotion.buy(),
                promotion.free()
            )?;
        }

        Ok(())
    }
}

impl fmt::Display for Receipt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(RULE_WIDTH);

        writeln!(f, "===== {} Receipt =====", self.options.store_name)?;
        if let Some(issued_at) = self.options.issued_at {
            writeln!(f, "Date: {}", issued_at.format("%Y-%m-%d %H:%M:%S UTC"))?;
        }
        writeln!(f, "{:<20} {:>10} {:>10} {:>10}", "Item", "Qty/Weight", "Unit", "Line")?;
        writeln!(f, "{}", rule)?;

        for line in self.result.lines() {
            Self::write_line(f, line)?;
        }

        writeln!(f, "{}", rule)?;
        writeln!(f, "{:<42} {:>10}", "Savings:", format_money(self.result.savings()))?;
        writeln!(f, "{:<42} {:>10}", "TOTAL:", format_money(self.result.total()))?;
        writeln!(f, "{}", "=".repeat(RULE_WIDTH))
    }
}

/// Renders `result` as receipt text.
pub fn render(result: &CheckoutResult, options: &ReceiptOptions) -> String {
    Receipt::new(result, options).to_string()
}

/// Formats money as `1,234.50`.
pub fn format_money(money: Money) -> String {
    format_grouped(money.amount(), MONEY_SCALE)
}

/// Formats a weight as `1,234.500`.
pub fn format_weight(weight: Weight) -> String {
    format_grouped(weight.kilograms(), WEIGHT_SCALE)
}

fn format_grouped(value: Decimal, scale: u32) -> String {
    let rounded = round_half_up(value, scale);
    let digits = rounded.abs().to_string();
    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (digits.as_str(), None),
    };

    let mut out = String::with_capacity(digits.len() + whole.len() / 3 + 1);
    if rounded.is_sign_negative() {
        out.push('-');
    }
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Checkout, Product, Promotion, ScannedItem, UnitType};
    use chrono::TimeZone;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn sample_result() -> CheckoutResult {
        let chips = Arc::new(
            Product::new("CHIPS", "Bag of Chips", UnitType::Piece, Money::from_cents(3500)).unwrap(),
        );
        let rice = Arc::new(
            Product::new("RICE", "Rice (kg)", UnitType::Weight, Money::from_cents(4500)).unwrap(),
        );

        let mut checkout = Checkout::with_promotions([Promotion::new("CHIPS", 1, 1).unwrap()]);
        checkout.scan(ScannedItem::pieces(chips, 3).unwrap());
        checkout.scan(ScannedItem::weighed(rice, Weight::from_decimal(dec!(2.5))).unwrap());
        checkout.calculate_totals()
    }

    #[test]
    fn test_format_money_groups_thousands() {
        assert_eq!(format_money(Money::from_cents(0)), "0.00");
        assert_eq!(format_money(Money::from_cents(99)), "0.99");
        assert_eq!(format_money(Money::from_cents(100_000)), "1,000.00");
        assert_eq!(format_money(Money::from_cents(123_456_789)), "1,234,567.89");
        assert_eq!(format_money(Money::from_cents(-123_450)), "-1,234.50");
        assert_eq!(format_money(Money::from_decimal(dec!(2.995))), "3.00");
    }

    #[test]
    fn test_format_weight() {
        assert_eq!(format_weight(Weight::from_decimal(dec!(2.5))), "2.500");
        assert_eq!(format_weight(Weight::from_decimal(dec!(1234.5))), "1,234.500");
    }

    #[test]
    fn test_receipt_layout() {
        let text = render(&sample_result(), &ReceiptOptions::default());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "===== Grocery Store Receipt =====");
        assert_eq!(lines[1], "Item                 Qty/Weight       Unit       Line");
        assert_eq!(lines[2], "-".repeat(47));
        assert_eq!(lines[3], "Bag of Chips                  3      35.00      70.00");
        assert_eq!(lines[4], "   -> Promotion: buy 1 get 1 free");
        assert_eq!(lines[5], "Rice (kg)                 2.500      45.00     112.50");
        assert_eq!(lines[6], "-".repeat(47));
        assert_eq!(lines[7], format!("{:<42} {:>10}", "Savings:", "35.00"));
        assert_eq!(lines[8], format!("{:<42} {:>10}", "TOTAL:", "182.50"));
        assert_eq!(lines[9], "=".repeat(47));
        assert_eq!(lines.len(), 10);
    }

    #[test]
    fn test_receipt_with_store_name_and_date() {
        let options = ReceiptOptions {
            store_name: "Corner Shop".to_string(),
            issued_at: Some(Utc.with_ymd_and_hms(2026, 10, 17, 9, 30, 0).unwrap()),
        };
        let text = render(&sample_result(), &options);

        assert!(text.starts_with("===== Corner Shop Receipt =====\n"));
        assert!(text.contains("Date: 2026-10-17 09:30:00 UTC\n"));
    }

    #[test]
    fn test_empty_receipt() {
        let text = render(&Checkout::new().calculate_totals(), &ReceiptOptions::default());
        assert!(text.contains("TOTAL:"));
        assert!(!text.contains("Promotion"));
        assert_eq!(text.lines().count(), 7);
    }
}
