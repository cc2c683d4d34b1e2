//! # Order Module
//!
//! Immutable records of completed purchases.
//!
//! An [`Order`] uses the snapshot pattern: each [`OrderLine`] freezes the
//! book's ISBN, title and unit price at the moment of purchase, so later
//! catalog edits never rewrite purchase history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::book::Isbn;
use crate::money::Money;

// =============================================================================
// Order Line
// =============================================================================

/// One purchased book, frozen at checkout time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    isbn: Isbn,
    /// Title at time of purchase (frozen).
    title: String,
    /// Unit price at time of purchase (frozen).
    unit_price: Money,
    quantity: u32,
}

impl OrderLine {
    pub fn new(isbn: Isbn, title: &str, unit_price: Money, quantity: u32) -> Self {
        OrderLine {
            isbn,
            title: title.to_string(),
            unit_price,
            quantity,
        }
    }

    #[inline]
    pub fn isbn(&self) -> &Isbn {
        &self.isbn
    }

    #[inline]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[inline]
    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    #[inline]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Order
// =============================================================================

/// A completed purchase.
///
/// Created only by the checkout flow; immutable after creation. Owned by
/// value in the customer's order history, never shared back to the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    order_id: String,
    customer_id: String,
    placed_at: DateTime<Utc>,
    total: Money,
    lines: Vec<OrderLine>,
}

impl Order {
    /// Assembles an order record. Callers outside the checkout flow should
    /// have no reason to construct one.
    pub fn new(
        order_id: String,
        customer_id: String,
        placed_at: DateTime<Utc>,
        total: Money,
        lines: Vec<OrderLine>,
    ) -> Self {
        Order {
            order_id,
            customer_id,
            placed_at,
            total,
            lines,
        }
    }

    #[inline]
    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    #[inline]
    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    #[inline]
    pub fn placed_at(&self) -> DateTime<Utc> {
        self.placed_at
    }

    #[inline]
    pub fn total(&self) -> Money {
        self.total
    }

    #[inline]
    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Order ID: {}, Customer ID: {}, Order Date: {}, Order Total: {}",
            self.order_id, self.customer_id, self.placed_at, self.total
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn line(isbn: &str, title: &str, cents: i64, qty: u32) -> OrderLine {
        OrderLine::new(
            Isbn::parse(isbn).unwrap(),
            title,
            Money::from_cents(cents),
            qty,
        )
    }

    #[test]
    fn test_line_total() {
        let l = line("978-3-8747-4427-0", "Two Towers", 299, 2);
        assert_eq!(l.line_total().cents(), 598);
    }

    #[test]
    fn test_order_preserves_snapshot() {
        let lines = vec![
            line("978-3-8747-4427-0", "Two Towers", 299, 2),
            line("978-0-7330-7673-2", "Witcher", 370, 4),
        ];
        let total: Money = lines.iter().map(OrderLine::line_total).sum();
        assert_eq!(total.cents(), 2078);

        let order = Order::new(
            "order-1".to_string(),
            "cust-1".to_string(),
            Utc::now(),
            total,
            lines,
        );
        assert_eq!(order.lines().len(), 2);
        assert_eq!(order.lines()[0].title(), "Two Towers");
        assert_eq!(order.total().cents(), 2078);
    }
}
