//! # Shopping Cart
//!
//! A per-customer mapping from catalog book to desired quantity,
//! validated against the shared [`Inventory`] at add time.
//!
//! ## Design Notes
//! - The cart references its owner by `customer_id`; it does not own the
//!   customer
//! - Stock checks read the inventory under its lock, but the cart NEVER
//!   decrements stock: that only happens at checkout. Two customers can
//!   therefore overcommit the same copies until one of them checks out,
//!   which is accepted behavior - checkout re-verifies
//! - Lines hold ISBNs only; prices always come from the current catalog
//!   record, so a price edit between add and checkout is reflected in the
//!   subtotal

use std::collections::HashMap;
use std::sync::Arc;

use tome_core::{CoreError, CoreResult, Isbn, Money};

use crate::inventory::{Inventory, StockOutcome};

/// A volatile cart; cleared on successful checkout.
#[derive(Debug)]
pub struct ShoppingCart {
    customer_id: String,
    inventory: Arc<Inventory>,
    lines: HashMap<Isbn, u32>,
}

impl ShoppingCart {
    /// Creates an empty cart for a customer, bound to the inventory that
    /// will be checked on every add.
    pub fn new(inventory: Arc<Inventory>, customer_id: &str) -> Self {
        ShoppingCart {
            customer_id: customer_id.to_string(),
            inventory,
            lines: HashMap::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Id of the owning customer.
    #[inline]
    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    /// The inventory this cart validates against.
    #[inline]
    pub fn inventory(&self) -> &Arc<Inventory> {
        &self.inventory
    }

    /// Current lines, ISBN to desired quantity.
    #[inline]
    pub fn lines(&self) -> &HashMap<Isbn, u32> {
        &self.lines
    }

    /// Desired quantity for one ISBN; 0 when not in the cart.
    pub fn quantity(&self, isbn: &Isbn) -> u32 {
        self.lines.get(isbn).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total copies across all lines.
    pub fn total_copies(&self) -> u32 {
        self.lines.values().sum()
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Adds copies of a book to the cart.
    ///
    /// The book must exist in the associated inventory, and the requested
    /// total (existing line + `copies`) must not exceed the stock recorded
    /// there right now. New line -> [`StockOutcome::Added`], existing ->
    /// [`StockOutcome::Increased`].
    pub fn add(&mut self, isbn: &Isbn, copies: u32) -> CoreResult<StockOutcome> {
        tome_core::validation::validate_copies(copies)?;

        let on_hand = self
            .inventory
            .on_hand(isbn)
            .ok_or_else(|| CoreError::BookNotFound {
                key: isbn.to_string(),
            })?;

        // A total that overflows u32 exceeds any possible stock level.
        let in_cart = self.quantity(isbn);
        let requested = match in_cart.checked_add(copies) {
            Some(total) if total <= on_hand => total,
            total => {
                return Err(CoreError::OutOfStock {
                    isbn: isbn.to_string(),
                    available: on_hand,
                    requested: total.unwrap_or(u32::MAX),
                });
            }
        };

        let outcome = if in_cart == 0 {
            self.lines.insert(isbn.clone(), copies);
            StockOutcome::Added
        } else {
            self.lines.insert(isbn.clone(), requested);
            StockOutcome::Increased
        };
        Ok(outcome)
    }

    /// Removes copies of a book from the cart.
    ///
    /// A book that is not in the cart is a [`CoreError::BookNotFound`].
    /// Removing at least as many copies as the line holds deletes the line
    /// ([`StockOutcome::Removed`]); otherwise the quantity drops
    /// ([`StockOutcome::Decreased`]).
    pub fn remove(&mut self, isbn: &Isbn, copies: u32) -> CoreResult<StockOutcome> {
        tome_core::validation::validate_copies(copies)?;

        let in_cart = self.quantity(isbn);
        if in_cart == 0 {
            return Err(CoreError::BookNotFound {
                key: isbn.to_string(),
            });
        }

        if in_cart <= copies {
            self.lines.remove(isbn);
            Ok(StockOutcome::Removed)
        } else {
            self.lines.insert(isbn.clone(), in_cart - copies);
            Ok(StockOutcome::Decreased)
        }
    }

    /// Empties the cart. Idempotent.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    // -------------------------------------------------------------------------
    // Pricing
    // -------------------------------------------------------------------------

    /// Sum of price x quantity over all lines, priced from the current
    /// catalog records. An empty cart totals zero.
    ///
    /// Fails with [`CoreError::BookNotFound`] if a line's book has been
    /// force-removed from the catalog since it was added.
    pub fn subtotal(&self) -> CoreResult<Money> {
        let mut total = Money::zero();
        for (isbn, quantity) in &self.lines {
            let book = self.inventory.find_by_isbn(isbn)?;
            total += book.price().multiply_quantity(*quantity);
        }
        Ok(total)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tome_core::{Book, BookFormat, CoverType};

    fn hardcover(isbn: &str, title: &str, price_cents: i64) -> Book {
        Book::new(
            isbn,
            title,
            Money::from_cents(price_cents),
            BookFormat::Physical {
                weight_grams: 322.0,
                pages: 448,
                cover: CoverType::Hardcover,
            },
        )
        .unwrap()
    }

    /// Seeds the inventory used by most tests: 5 copies of Two Towers at
    /// 299 and 8 copies of Witcher at 370.
    fn seeded() -> (Arc<Inventory>, Isbn, Isbn) {
        let inventory = Arc::new(Inventory::new());
        let two_towers = hardcover("978-3-8747-4427-0", "Lord of the Rings: Two Towers", 299);
        let witcher = hardcover("978-0-7330-7673-2", "Witcher", 370);
        let isbn_a = two_towers.isbn().clone();
        let isbn_b = witcher.isbn().clone();
        inventory.add_book(two_towers, 5).unwrap();
        inventory.add_book(witcher, 8).unwrap();
        (inventory, isbn_a, isbn_b)
    }

    #[test]
    fn test_add_in_stock_book() {
        let (inventory, isbn_a, _) = seeded();
        let mut cart = ShoppingCart::new(inventory, "cust-1");

        let outcome = cart.add(&isbn_a, 1).unwrap();
        assert_eq!(outcome, StockOutcome::Added);
        assert_eq!(cart.quantity(&isbn_a), 1);
    }

    #[test]
    fn test_add_existing_line_increases_quantity() {
        let (inventory, isbn_a, _) = seeded();
        let mut cart = ShoppingCart::new(inventory, "cust-1");

        cart.add(&isbn_a, 1).unwrap();
        let outcome = cart.add(&isbn_a, 2).unwrap();

        assert_eq!(outcome, StockOutcome::Increased);
        assert_eq!(cart.quantity(&isbn_a), 3);
        assert_eq!(cart.line_count(), 1);
    }

    #[test]
    fn test_add_unknown_book_fails() {
        let (inventory, _, _) = seeded();
        let mut cart = ShoppingCart::new(inventory, "cust-1");

        let unknown = Isbn::parse("0-3599-3099-9").unwrap();
        let err = cart.add(&unknown, 1).unwrap_err();
        assert!(matches!(err, CoreError::BookNotFound { .. }));
    }

    #[test]
    fn test_add_out_of_stock_book_fails() {
        let (inventory, _, _) = seeded();
        let snowman = hardcover("0-3599-3099-9", "Snømannen", 599);
        let isbn = snowman.isbn().clone();
        inventory.add_book(snowman, 1).unwrap();
        inventory.decrease_book(&isbn, 1).unwrap(); // now 0 in stock

        let mut cart = ShoppingCart::new(inventory, "cust-1");
        let err = cart.add(&isbn, 1).unwrap_err();
        assert!(matches!(err, CoreError::OutOfStock { available: 0, .. }));
    }

    #[test]
    fn test_cart_total_never_exceeds_stock() {
        let (inventory, isbn_a, _) = seeded();
        let mut cart = ShoppingCart::new(inventory, "cust-1");

        cart.add(&isbn_a, 5).unwrap(); // exactly the stock
        let err = cart.add(&isbn_a, 1).unwrap_err();
        assert!(matches!(
            err,
            CoreError::OutOfStock {
                available: 5,
                requested: 6,
                ..
            }
        ));
        assert_eq!(cart.quantity(&isbn_a), 5);
    }

    #[test]
    fn test_add_overflowing_total_fails_as_out_of_stock() {
        let (inventory, isbn_a, _) = seeded();
        let mut cart = ShoppingCart::new(inventory, "cust-1");
        cart.add(&isbn_a, 1).unwrap();

        // 1 + u32::MAX is not representable, let alone in stock
        let err = cart.add(&isbn_a, u32::MAX).unwrap_err();
        assert!(matches!(
            err,
            CoreError::OutOfStock {
                available: 5,
                requested: u32::MAX,
                ..
            }
        ));
        assert_eq!(cart.quantity(&isbn_a), 1);
    }

    #[test]
    fn test_remove_decrements_then_deletes() {
        let (inventory, isbn_a, _) = seeded();
        let mut cart = ShoppingCart::new(inventory, "cust-1");
        cart.add(&isbn_a, 3).unwrap();

        assert_eq!(cart.remove(&isbn_a, 1).unwrap(), StockOutcome::Decreased);
        assert_eq!(cart.quantity(&isbn_a), 2);

        // removing more than the line holds deletes the line
        assert_eq!(cart.remove(&isbn_a, 5).unwrap(), StockOutcome::Removed);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_missing_line_fails() {
        let (inventory, isbn_a, _) = seeded();
        let mut cart = ShoppingCart::new(inventory, "cust-1");

        let err = cart.remove(&isbn_a, 1).unwrap_err();
        assert!(matches!(err, CoreError::BookNotFound { .. }));
    }

    #[test]
    fn test_subtotal_empty_cart_is_zero() {
        let (inventory, _, _) = seeded();
        let cart = ShoppingCart::new(inventory, "cust-1");
        assert_eq!(cart.subtotal().unwrap(), Money::zero());
    }

    #[test]
    fn test_subtotal_worked_example() {
        // {Two Towers: 2 @ 299, Witcher: 4 @ 370} = 2*299 + 4*370 = 2078
        let (inventory, isbn_a, isbn_b) = seeded();
        let mut cart = ShoppingCart::new(inventory, "cust-1");
        cart.add(&isbn_a, 2).unwrap();
        cart.add(&isbn_b, 4).unwrap();

        assert_eq!(cart.subtotal().unwrap().cents(), 2078);
        assert_eq!(cart.line_count(), 2);
        assert_eq!(cart.total_copies(), 6);
    }

    #[test]
    fn test_subtotal_tracks_current_catalog_price() {
        let (inventory, isbn_a, _) = seeded();
        let mut cart = ShoppingCart::new(Arc::clone(&inventory), "cust-1");
        cart.add(&isbn_a, 2).unwrap();

        // catalog price edit after the line was added
        let mut book = inventory.find_by_isbn(&isbn_a).unwrap();
        book.set_price(Money::from_cents(399)).unwrap();
        inventory.remove_book(&isbn_a, true).unwrap();
        inventory.add_book(book, 5).unwrap();

        assert_eq!(cart.subtotal().unwrap().cents(), 798);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let (inventory, isbn_a, _) = seeded();
        let mut cart = ShoppingCart::new(inventory, "cust-1");
        cart.add(&isbn_a, 2).unwrap();

        cart.clear();
        assert!(cart.is_empty());
        cart.clear();
        assert!(cart.is_empty());
    }
}
