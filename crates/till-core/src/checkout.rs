//! # Checkout Engine
//!
//! Accumulates scans for one till session and prices them on demand.
//!
//! ## Two-Phase API
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout Session                                     │
//! │                                                                         │
//! │  Phase 1: mutate                    Phase 2: compute                    │
//! │  ───────────────                    ────────────────                    │
//! │                                                                         │
//! │  add_promotion(p) ──► promotions    calculate_totals()                  │
//! │                       (1 per id)         │                              │
//! │  scan(item) ────────► scans              ├─► group scans by product id  │
//! │                       (append-only)      ├─► apply promotions           │
//! │                                          ├─► round each line (2 dp)     │
//! │  reset() ───────────► scans cleared      └─► CheckoutResult             │
//! │                                                                         │
//! │  calculate_totals() is pure: call it as often as you like, nothing      │
//! │  is cached and nothing is mutated.                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Pricing Rules
//! - **Piece lines**: `unit_price × chargeable_units`, rounded to 2 dp.
//!   Savings are `unit_price × qty` (unrounded) minus the rounded line total,
//!   summed at full precision and rounded once at the end.
//! - **Weight lines**: summed weight rounded to 3 dp, times unit price, rounded
//!   to 2 dp. Promotions never apply and savings are zero.
//! - **Grand total**: sum of rounded line totals, rounded to 2 dp.
//!
//! ## Example
//! ```rust
//! use till_core::{Checkout, Money, Product, Promotion, ScannedItem, UnitType};
//!
//! let chips = Product::new("CHIPS", "Bag of Chips", UnitType::Piece, Money::from_cents(3500))?;
//!
//! let mut checkout = Checkout::with_promotions([Promotion::new("CHIPS", 1, 1)?]);
//! checkout.scan(ScannedItem::pieces(chips, 3)?);
//!
//! let result = checkout.calculate_totals();
//! assert_eq!(result.total().to_string(), "70.00");
//! assert_eq!(result.savings().to_string(), "35.00");
//! # Ok::<(), till_core::CoreError>(())
//! ```

use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::money::{Money, Weight};
use crate::promotion::{chargeable_units, Promotion};
use crate::scan::{ScanQuantity, ScannedItem};
use crate::types::{Product, UnitType};

// =============================================================================
// Checkout
// =============================================================================

/// A single checkout session.
///
/// ## Thread Safety
/// None needed: one till owns one `Checkout`. Sharing a session between
/// threads requires wrapping it in a `Mutex` at the call site.
#[derive(Debug, Clone)]
pub struct Checkout {
    session_id: Uuid,
    scans: Vec<ScannedItem>,
    promotions: HashMap<String, Promotion>,
}

impl Checkout {
    /// Starts an empty session with no promotions.
    pub fn new() -> Self {
        Checkout {
            session_id: Uuid::new_v4(),
            scans: Vec::new(),
            promotions: HashMap::new(),
        }
    }

    /// Starts an empty session with promotions pre-registered.
    ///
    /// Later entries for the same product id replace earlier ones.
    pub fn with_promotions(promotions: impl IntoIterator<Item = Promotion>) -> Self {
        let mut checkout = Checkout::new();
        for promotion in promotions {
            checkout.add_promotion(promotion);
        }
        checkout
    }

    /// Identifier of the current session, regenerated on [`Checkout::reset`].
    #[inline]
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Registers a promotion, replacing any promotion already bound to the
    /// same product id. Returns the replaced promotion.
    pub fn add_promotion(&mut self, promotion: Promotion) -> Option<Promotion> {
        self.promotions
            .insert(promotion.product_id().to_string(), promotion)
    }

    /// Promotion currently registered for `product_id`.
    pub fn promotion(&self, product_id: &str) -> Option<&Promotion> {
        self.promotions.get(product_id)
    }

    /// Appends a scan. Nothing is priced until [`Checkout::calculate_totals`].
    pub fn scan(&mut self, item: ScannedItem) {
        self.scans.push(item);
    }

    /// Scans in the order they were made.
    #[inline]
    pub fn scans(&self) -> &[ScannedItem] {
        &self.scans
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.scans.is_empty()
    }

    /// Discards all scans and starts a new session. Promotions are kept.
    pub fn reset(&mut self) {
        self.scans.clear();
        self.session_id = Uuid::new_v4();
    }

    /// Prices the current scans.
    ///
    /// Never fails: every scan and promotion was validated when it was built.
    pub fn calculate_totals(&self) -> CheckoutResult {
        let mut lines = Vec::new();
        let mut total = Money::zero();
        let mut savings = Money::zero();

        for group in self.group_scans() {
            let unit_price = group.product.price_per_unit();

            let line = match group.unit_type {
                UnitType::Piece => {
                    let promotion = self.promotions.get(group.product.id());
                    let charged = chargeable_units(group.pieces, promotion);
                    let line_total = unit_price.multiply_quantity(charged).round();
                    savings += unit_price.multiply_quantity(group.pieces) - line_total;

                    PriceLine {
                        product: Arc::clone(group.product),
                        quantity: LineQuantity::Pieces(group.pieces),
                        unit_price,
                        line_total,
                        promotion: promotion.cloned(),
                    }
                }
                UnitType::Weight => {
                    let weight = group.weight.round();
                    let line_total = unit_price.multiply_weight(weight).round();

                    PriceLine {
                        product: Arc::clone(group.product),
                        quantity: LineQuantity::Weight(weight),
                        unit_price,
                        line_total,
                        promotion: None,
                    }
                }
            };

            total += line.line_total;
            lines.push(line);
        }

        CheckoutResult {
            lines,
            total: total.round(),
            savings: savings.round(),
        }
    }

    /// Groups scans by product id, in order of first appearance.
    ///
    /// The first product record seen for an id supplies the price. The unit
    /// type is part of the key, so a catalog that re-binds an id to the other
    /// unit type mid-session yields two lines rather than mixing pieces with
    /// kilograms.
    fn group_scans(&self) -> Vec<ScanGroup<'_>> {
        let mut groups: Vec<ScanGroup<'_>> = Vec::new();
        let mut index: HashMap<(&str, UnitType), usize> = HashMap::new();

        for scan in &self.scans {
            let quantity = scan.quantity();
            let key = (scan.product().id(), quantity.unit_type());

            let position = *index.entry(key).or_insert_with(|| {
                groups.push(ScanGroup::new(scan.product(), quantity.unit_type()));
                groups.len() - 1
            });
            groups[position].add(quantity);
        }

        groups
    }
}

impl Default for Checkout {
    fn default() -> Self {
        Checkout::new()
    }
}

/// Running sums for one product id.
struct ScanGroup<'a> {
    product: &'a Arc<Product>,
    unit_type: UnitType,
    pieces: u64,
    weight: Weight,
}

impl<'a> ScanGroup<'a> {
    fn new(product: &'a Arc<Product>, unit_type: UnitType) -> Self {
        ScanGroup {
            product,
            unit_type,
            pieces: 0,
            weight: Weight::zero(),
        }
    }

    fn add(&mut self, quantity: ScanQuantity) {
        match quantity {
            ScanQuantity::Pieces(count) => self.pieces += u64::from(count),
            ScanQuantity::Weight(weight) => self.weight += weight,
        }
    }
}

// =============================================================================
// Result Types
// =============================================================================

/// Aggregated amount on a price line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LineQuantity {
    /// Total pieces scanned (before promotions).
    Pieces(u64),
    /// Total weight scanned, rounded to 3 dp.
    Weight(Weight),
}

/// One priced row of a checkout, one per distinct product id.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceLine {
    product: Arc<Product>,
    quantity: LineQuantity,
    unit_price: Money,
    line_total: Money,
    promotion: Option<Promotion>,
}

impl PriceLine {
    #[inline]
    pub fn product(&self) -> &Arc<Product> {
        &self.product
    }

    #[inline]
    pub fn quantity(&self) -> LineQuantity {
        self.quantity
    }

    /// Aggregated piece count, `None` on weight lines.
    pub fn pieces(&self) -> Option<u64> {
        match self.quantity {
            LineQuantity::Pieces(count) => Some(count),
            LineQuantity::Weight(_) => None,
        }
    }

    /// Aggregated weight, `None` on piece lines.
    pub fn weight(&self) -> Option<Weight> {
        match self.quantity {
            LineQuantity::Weight(weight) => Some(weight),
            LineQuantity::Pieces(_) => None,
        }
    }

    #[inline]
    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// Charged amount for the line, rounded to 2 dp.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.line_total
    }

    /// Promotion applied to this line, if any.
    #[inline]
    pub fn promotion(&self) -> Option<&Promotion> {
        self.promotion.as_ref()
    }
}

/// Priced checkout: lines in first-scan order plus grand total and savings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResult {
    lines: Vec<PriceLine>,
    total: Money,
    savings: Money,
}

impl CheckoutResult {
    /// Lines in order of first appearance in the scan sequence.
    #[inline]
    pub fn lines(&self) -> &[PriceLine] {
        &self.lines
    }

    /// Line for `product_id`, if it was scanned.
    pub fn line(&self, product_id: &str) -> Option<&PriceLine> {
        self.lines.iter().find(|line| line.product.id() == product_id)
    }

    #[inline]
    pub fn total(&self) -> Money {
        self.total
    }

    #[inline]
    pub fn savings(&self) -> Money {
        self.savings
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CoreError;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn piece(id: &str, name: &str, price: Decimal) -> Arc<Product> {
        Arc::new(Product::new(id, name, UnitType::Piece, Money::from_decimal(price)).unwrap())
    }

    fn weighed(id: &str, name: &str, price: Decimal) -> Arc<Product> {
        Arc::new(Product::new(id, name, UnitType::Weight, Money::from_decimal(price)).unwrap())
    }

    fn kg(amount: Decimal) -> Weight {
        Weight::from_decimal(amount)
    }

    #[test]
    fn test_empty_checkout() {
        let result = Checkout::new().calculate_totals();
        assert!(result.is_empty());
        assert_eq!(result.total().to_string(), "0.00");
        assert_eq!(result.savings().to_string(), "0.00");
    }

    #[test]
    fn test_piece_product_without_promotion() {
        let chips = piece("CHIPS", "Bag of Chips", dec!(35.00));
        let mut checkout = Checkout::new();
        checkout.scan(ScannedItem::pieces(chips, 2).unwrap());

        let result = checkout.calculate_totals();
        assert_eq!(result.total().amount(), dec!(70.00));
        assert_eq!(result.savings().amount(), dec!(0.00));
        assert_eq!(result.line("CHIPS").unwrap().pieces(), Some(2));
    }

    #[test]
    fn test_weight_product() {
        let rice = weighed("RICE", "Rice (kg)", dec!(45.00));
        let mut checkout = Checkout::new();
        checkout.scan(ScannedItem::weighed(rice, kg(dec!(1.2))).unwrap());

        let result = checkout.calculate_totals();
        assert_eq!(result.total().amount(), dec!(54.00));
        let line = result.line("RICE").unwrap();
        assert_eq!(line.weight().unwrap().to_string(), "1.200");
        assert!(line.promotion().is_none());
    }

    #[test]
    fn test_buy_one_get_one_with_odd_quantity() {
        let chips = piece("CHIPS", "Bag of Chips", dec!(35.00));
        let mut checkout = Checkout::with_promotions([Promotion::new("CHIPS", 1, 1).unwrap()]);
        checkout.scan(ScannedItem::pieces(chips, 3).unwrap());

        let result = checkout.calculate_totals();
        assert_eq!(result.total().amount(), dec!(70.00));
        assert_eq!(result.savings().amount(), dec!(35.00));
        assert_eq!(result.line("CHIPS").unwrap().promotion().unwrap().buy(), 1);
    }

    #[test]
    fn test_buy_two_get_one() {
        let candy = piece("CANDY", "Candy Pack", dec!(10.00));
        let mut checkout = Checkout::with_promotions([Promotion::new("CANDY", 2, 1).unwrap()]);
        checkout.scan(ScannedItem::pieces(candy, 7).unwrap());

        let result = checkout.calculate_totals();
        assert_eq!(result.total().amount(), dec!(50.00));
        assert_eq!(result.savings().amount(), dec!(20.00));
    }

    #[test]
    fn test_two_promotions_in_one_basket() {
        let chips = piece("CHIPS", "Bag of Chips", dec!(35.00));
        let candy = piece("CANDY", "Candy Pack", dec!(10.00));
        let mut checkout = Checkout::with_promotions([
            Promotion::new("CHIPS", 1, 1).unwrap(),
            Promotion::new("CANDY", 2, 1).unwrap(),
        ]);
        checkout.scan(ScannedItem::pieces(chips, 3).unwrap());
        checkout.scan(ScannedItem::pieces(candy, 7).unwrap());

        let result = checkout.calculate_totals();
        assert_eq!(result.total().amount(), dec!(120.00));
        // (105.00 - 70.00) + (70.00 - 50.00)
        assert_eq!(result.savings().amount(), dec!(55.00));
    }

    #[test]
    fn test_scans_of_same_product_are_summed_before_promotion() {
        let chips = piece("CHIPS", "Bag of Chips", dec!(35.00));
        let mut checkout = Checkout::with_promotions([Promotion::new("CHIPS", 1, 1).unwrap()]);
        checkout.scan(ScannedItem::pieces(Arc::clone(&chips), 1).unwrap());
        checkout.scan(ScannedItem::pieces(Arc::clone(&chips), 1).unwrap());

        let result = checkout.calculate_totals();
        assert_eq!(result.lines().len(), 1);
        assert_eq!(result.line("CHIPS").unwrap().pieces(), Some(2));
        assert_eq!(result.total().amount(), dec!(35.00));
    }

    #[test]
    fn test_weight_scans_match_single_combined_scan() {
        let rice = weighed("RICE", "Rice (kg)", dec!(45.00));

        let mut split = Checkout::new();
        split.scan(ScannedItem::weighed(Arc::clone(&rice), kg(dec!(0.4))).unwrap());
        split.scan(ScannedItem::weighed(Arc::clone(&rice), kg(dec!(0.8))).unwrap());

        let mut single = Checkout::new();
        single.scan(ScannedItem::weighed(rice, kg(dec!(1.2))).unwrap());

        assert_eq!(split.calculate_totals().total(), single.calculate_totals().total());
    }

    #[test]
    fn test_weight_is_rounded_after_summing() {
        // 0.0004 + 0.0004 = 0.0008 → 0.001 kg; each alone would round to 0.000
        let saffron = weighed("SAFFRON", "Saffron (kg)", dec!(1000.00));
        let mut checkout = Checkout::new();
        checkout.scan(ScannedItem::weighed(Arc::clone(&saffron), kg(dec!(0.0004))).unwrap());
        checkout.scan(ScannedItem::weighed(saffron, kg(dec!(0.0004))).unwrap());

        let result = checkout.calculate_totals();
        assert_eq!(result.line("SAFFRON").unwrap().weight(), Some(kg(dec!(0.001))));
        assert_eq!(result.total().amount(), dec!(1.00));
    }

    #[test]
    fn test_weight_line_rounds_half_up() {
        // 2.99 × 1.234 = 3.68966
        let apples = weighed("APPLE", "Fresh Apple (kg)", dec!(2.99));
        let mut checkout = Checkout::new();
        checkout.scan(ScannedItem::weighed(apples, kg(dec!(1.234))).unwrap());

        assert_eq!(checkout.calculate_totals().total().amount(), dec!(3.69));
    }

    #[test]
    fn test_promotion_on_weight_product_is_ignored() {
        let rice = weighed("RICE", "Rice (kg)", dec!(45.00));
        let mut checkout = Checkout::with_promotions([Promotion::new("RICE", 1, 1).unwrap()]);
        checkout.scan(ScannedItem::weighed(rice, kg(dec!(2))).unwrap());

        let result = checkout.calculate_totals();
        assert_eq!(result.total().amount(), dec!(90.00));
        assert_eq!(result.savings().amount(), dec!(0.00));
        assert!(result.line("RICE").unwrap().promotion().is_none());
    }

    #[test]
    fn test_lines_follow_first_appearance() {
        let rice = weighed("RICE", "Rice (kg)", dec!(45.00));
        let chips = piece("CHIPS", "Bag of Chips", dec!(35.00));
        let choc = piece("CHOC", "Chocolate Bar", dec!(2.99));

        let mut checkout = Checkout::new();
        checkout.scan(ScannedItem::weighed(Arc::clone(&rice), kg(dec!(2.5))).unwrap());
        checkout.scan(ScannedItem::pieces(Arc::clone(&chips), 3).unwrap());
        checkout.scan(ScannedItem::weighed(rice, kg(dec!(0.5))).unwrap());
        checkout.scan(ScannedItem::pieces(choc, 5).unwrap());
        checkout.scan(ScannedItem::pieces(chips, 1).unwrap());

        let result = checkout.calculate_totals();
        let ids: Vec<&str> = result.lines().iter().map(|l| l.product().id()).collect();
        assert_eq!(ids, vec!["RICE", "CHIPS", "CHOC"]);
        assert_eq!(result.line("RICE").unwrap().weight(), Some(kg(dec!(3.000))));
        assert_eq!(result.line("CHIPS").unwrap().pieces(), Some(4));
    }

    #[test]
    fn test_grand_total_is_sum_of_line_totals() {
        let chips = piece("CHIPS", "Bag of Chips", dec!(35.00));
        let rice = weighed("RICE", "Rice (kg)", dec!(45.00));
        let choc = piece("CHOC", "Chocolate Bar", dec!(2.99));

        let mut checkout = Checkout::with_promotions([Promotion::new("CHIPS", 1, 1).unwrap()]);
        checkout.scan(ScannedItem::pieces(chips, 3).unwrap());
        checkout.scan(ScannedItem::weighed(rice, kg(dec!(2.5))).unwrap());
        checkout.scan(ScannedItem::pieces(choc, 5).unwrap());

        let result = checkout.calculate_totals();
        let sum: Money = result.lines().iter().map(PriceLine::line_total).sum();
        assert_eq!(result.total(), sum.round());
        // 70.00 + 112.50 + 14.95
        assert_eq!(result.total().amount(), dec!(197.45));
    }

    #[test]
    fn test_savings_accumulate_at_full_precision() {
        // Each line: 0.335 unrounded vs 0.34 charged → -0.005.
        // Summed first: -0.010 → -0.01. Rounded per line it would be -0.02.
        let a = piece("A", "Item A", dec!(0.335));
        let b = piece("B", "Item B", dec!(0.335));
        let mut checkout = Checkout::new();
        checkout.scan(ScannedItem::pieces(a, 1).unwrap());
        checkout.scan(ScannedItem::pieces(b, 1).unwrap());

        let result = checkout.calculate_totals();
        assert_eq!(result.total().amount(), dec!(0.68));
        assert_eq!(result.savings().amount(), dec!(-0.01));
    }

    #[test]
    fn test_later_promotion_replaces_earlier() {
        let mut checkout = Checkout::new();
        assert!(checkout.add_promotion(Promotion::new("CHIPS", 1, 1).unwrap()).is_none());

        let replaced = checkout.add_promotion(Promotion::new("CHIPS", 2, 1).unwrap());
        assert_eq!(replaced.unwrap().buy(), 1);
        assert_eq!(checkout.promotion("CHIPS").unwrap().buy(), 2);
    }

    #[test]
    fn test_calculate_totals_is_repeatable() {
        let chips = piece("CHIPS", "Bag of Chips", dec!(35.00));
        let mut checkout = Checkout::new();
        checkout.scan(ScannedItem::pieces(chips, 2).unwrap());

        let first = checkout.calculate_totals();
        let second = checkout.calculate_totals();
        assert_eq!(first, second);
        assert_eq!(checkout.scans().len(), 1);
    }

    #[test]
    fn test_reset_clears_scans_keeps_promotions() {
        let chips = piece("CHIPS", "Bag of Chips", dec!(35.00));
        let mut checkout = Checkout::with_promotions([Promotion::new("CHIPS", 1, 1).unwrap()]);
        checkout.scan(ScannedItem::pieces(chips, 2).unwrap());
        let before = checkout.session_id();

        checkout.reset();

        assert!(checkout.is_empty());
        assert!(checkout.calculate_totals().is_empty());
        assert!(checkout.promotion("CHIPS").is_some());
        assert_ne!(checkout.session_id(), before);
    }

    #[test]
    fn test_mismatched_scan_never_reaches_checkout() {
        let rice = weighed("RICE", "Rice (kg)", dec!(45.00));
        let err = ScannedItem::pieces(rice, 2).unwrap_err();
        assert!(matches!(err, CoreError::UnitTypeMismatch { .. }));
    }

    #[test]
    fn test_totals_at_price_and_quantity_limits() {
        use crate::validation::{MAX_PRICE, MAX_QUANTITY};

        let gold = piece("GOLD", "Gold Bar", MAX_PRICE);
        let mut checkout = Checkout::with_promotions([Promotion::new("GOLD", 1, 1).unwrap()]);
        for _ in 0..3 {
            checkout.scan(ScannedItem::pieces(Arc::clone(&gold), MAX_QUANTITY).unwrap());
        }

        let result = checkout.calculate_totals();
        assert_eq!(result.line("GOLD").unwrap().pieces(), Some(3_000_000));
        assert_eq!(result.total().amount(), dec!(1500000000000000.00));
        assert_eq!(result.savings().amount(), dec!(1500000000000000.00));
    }

    #[test]
    fn test_totals_at_price_and_weight_limits() {
        use crate::validation::{MAX_PRICE, MAX_WEIGHT};

        let saffron = weighed("SAFFRON", "Saffron (kg)", MAX_PRICE);
        let mut checkout = Checkout::new();
        for _ in 0..3 {
            checkout.scan(ScannedItem::weighed(Arc::clone(&saffron), kg(MAX_WEIGHT)).unwrap());
        }

        let result = checkout.calculate_totals();
        assert_eq!(result.line("SAFFRON").unwrap().weight(), Some(kg(dec!(3000000.000))));
        assert_eq!(result.total().amount(), dec!(3000000000000000.00));
    }

    #[test]
    fn test_amounts_past_limits_never_reach_checkout() {
        let err = Product::new(
            "GOLD",
            "Gold Bar",
            UnitType::Piece,
            Money::from_decimal(dec!(10000000000000000000000000000)),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(crate::ValidationError::TooLarge { .. })
        ));

        let chips = piece("CHIPS", "Bag of Chips", dec!(35.00));
        assert!(ScannedItem::pieces(chips, u32::MAX).is_err());

        let rice = weighed("RICE", "Rice (kg)", dec!(45.00));
        assert!(ScannedItem::weighed(rice, kg(dec!(40000000000000000000000000000))).is_err());
    }

    #[test]
    fn test_result_serializes() {
        let chips = piece("CHIPS", "Bag of Chips", dec!(35.00));
        let mut checkout = Checkout::with_promotions([Promotion::new("CHIPS", 1, 1).unwrap()]);
        checkout.scan(ScannedItem::pieces(chips, 2).unwrap());

        let json = serde_json::to_value(checkout.calculate_totals()).unwrap();
        assert_eq!(json["total"], "35.00");
        assert_eq!(json["lines"][0]["quantity"]["pieces"], 2);
        assert_eq!(json["lines"][0]["promotion"]["buy"], 1);
        assert_eq!(json["lines"][0]["product"]["id"], "CHIPS");
    }
}
