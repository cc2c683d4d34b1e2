//! # Checkout
//!
//! Converts a validated cart into a completed [`Order`].
//!
//! ## Purchase Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  purchase_order(customer, cart)                                     │
//! │                                                                     │
//! │  1. processor configured?          ── NoProcessorConfigured         │
//! │  2. cart non-empty, owned by       ── EmptyCart /                   │
//! │     this customer?                    CustomerMismatch              │
//! │                                                                     │
//! │  ┌── inventory lock acquired ─────────────────────────────────┐     │
//! │  │ 3. every line in stock? price lines, sum subtotal          │     │
//! │  │ 4. charge processor                ── PaymentFailed,       │     │
//! │  │                                       zero side effects    │     │
//! │  │ 5. decrement stock (verified in 3, cannot fail)            │     │
//! │  └── inventory lock released ─────────────────────────────────┘     │
//! │                                                                     │
//! │  6. append Order to customer history                                │
//! │  7. clear cart                                                      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Steps 3-5 run under one inventory lock acquisition, so the stock
//! re-check and the decrement can never be separated by another writer.
//! A cart that was overcommitted since it was filled fails step 3 with
//! `OutOfStock` before any money moves.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use tome_core::{
    CoreError, CoreResult, Customer, IdGenerator, Money, Order, OrderLine, UuidGenerator,
};

use crate::cart::ShoppingCart;
use crate::inventory::Inventory;
use crate::payment::PaymentProcessor;

/// Orchestrates checkout against one inventory.
///
/// The payment processor is one-shot: it is consumed by the charge
/// attempt, success or failure, and must be set again for the next
/// purchase.
pub struct CheckoutManager {
    inventory: Arc<Inventory>,
    processor: Option<Box<dyn PaymentProcessor>>,
    ids: Box<dyn IdGenerator>,
}

impl CheckoutManager {
    /// Creates a manager with no processor configured and UUID order ids.
    pub fn new(inventory: Arc<Inventory>) -> Self {
        CheckoutManager {
            inventory,
            processor: None,
            ids: Box::new(UuidGenerator),
        }
    }

    /// Creates a manager with an injected id source, for deterministic
    /// order ids in tests.
    pub fn with_id_generator(inventory: Arc<Inventory>, ids: Box<dyn IdGenerator>) -> Self {
        CheckoutManager {
            inventory,
            processor: None,
            ids,
        }
    }

    /// Configures the processor for the next purchase attempt.
    pub fn set_processor(&mut self, processor: Box<dyn PaymentProcessor>) {
        self.processor = Some(processor);
    }

    /// Whether a processor is currently configured.
    pub fn has_processor(&self) -> bool {
        self.processor.is_some()
    }

    /// Checks the checkout preconditions on a cart.
    ///
    /// Fails with [`CoreError::EmptyCart`] for a cart with no lines and
    /// with [`CoreError::CustomerMismatch`] when the cart belongs to a
    /// different customer.
    pub fn validate_customer_owns_cart(
        &self,
        customer: &Customer,
        cart: &ShoppingCart,
    ) -> CoreResult<()> {
        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }
        if customer.customer_id() != cart.customer_id() {
            return Err(CoreError::CustomerMismatch {
                cart_owner: cart.customer_id().to_string(),
                customer: customer.customer_id().to_string(),
            });
        }
        Ok(())
    }

    /// Executes a purchase: charge, record the order, decrement stock,
    /// clear the cart.
    ///
    /// All-or-nothing from the caller's point of view: on any failure the
    /// wallet, the inventory, the order history and the cart are exactly
    /// as they were before the call (except that the one-shot processor
    /// has been consumed by a failed charge).
    pub fn purchase_order(
        &mut self,
        customer: &mut Customer,
        cart: &mut ShoppingCart,
    ) -> CoreResult<Order> {
        if self.processor.is_none() {
            return Err(CoreError::NoProcessorConfigured);
        }
        self.validate_customer_owns_cart(customer, cart)?;

        let processor = self
            .processor
            .take()
            .ok_or(CoreError::NoProcessorConfigured)?;

        let ids = &self.ids;
        let result = self.inventory.with_entries(|entries| {
            // Verify and price every line before any mutation. Pricing
            // reads the entries directly: the lock is already held here,
            // and ShoppingCart::subtotal would try to take it again.
            let mut lines = Vec::with_capacity(cart.line_count());
            let mut subtotal = Money::zero();
            for (isbn, &quantity) in cart.lines() {
                let entry = entries.get(isbn).ok_or_else(|| CoreError::BookNotFound {
                    key: isbn.to_string(),
                })?;
                if quantity > entry.on_hand {
                    return Err(CoreError::OutOfStock {
                        isbn: isbn.to_string(),
                        available: entry.on_hand,
                        requested: quantity,
                    });
                }
                let line =
                    OrderLine::new(isbn.clone(), entry.book.title(), entry.book.price(), quantity);
                subtotal += line.line_total();
                lines.push(line);
            }

            // Charge. A refusal aborts the purchase with inventory, cart
            // and history untouched.
            processor
                .process_payment(customer, subtotal)
                .map_err(|err| match err {
                    failed @ CoreError::PaymentFailed { .. } => failed,
                    other => CoreError::PaymentFailed {
                        method: processor.name().to_string(),
                        reason: other.to_string(),
                    },
                })?;

            // Commit. Every line was verified under this same lock, so the
            // subtraction cannot underflow.
            for line in &lines {
                if let Some(entry) = entries.get_mut(line.isbn()) {
                    entry.on_hand -= line.quantity();
                }
            }

            Ok(Order::new(
                ids.next_id(),
                customer.customer_id().to_string(),
                Utc::now(),
                subtotal,
                lines,
            ))
        });

        match result {
            Ok(order) => {
                customer.record_order(order.clone());
                cart.clear();
                info!(
                    order_id = order.order_id(),
                    customer_id = customer.customer_id(),
                    total = %order.total(),
                    lines = order.lines().len(),
                    method = processor.name(),
                    "purchase completed"
                );
                Ok(order)
            }
            Err(err) => {
                warn!(
                    customer_id = customer.customer_id(),
                    error = %err,
                    "purchase aborted"
                );
                Err(err)
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::StockOutcome;
    use crate::payment::WalletProcessor;
    use tome_core::{Book, BookFormat, CoverType, Isbn, SequenceGenerator};

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

    struct Fixture {
        inventory: Arc<Inventory>,
        manager: CheckoutManager,
        customer: Customer,
        cart: ShoppingCart,
        isbn: Isbn,
    }

    /// Inventory with 2 copies of one book at 299; customer cart holding
    /// both copies; wallet funding left to each test.
    fn fixture() -> Fixture {
        let inventory = Arc::new(Inventory::new());
        let book = hardcover("978-3-8747-4427-0", "Lord of the Rings: Two Towers", 299);
        let isbn = book.isbn().clone();
        inventory.add_book(book, 2).unwrap();

        let ids = SequenceGenerator::new("cust");
        let customer = Customer::new(&ids, "reader@example.com").unwrap();
        let mut cart = ShoppingCart::new(Arc::clone(&inventory), customer.customer_id());
        cart.add(&isbn, 2).unwrap();

        let mut manager = CheckoutManager::with_id_generator(
            Arc::clone(&inventory),
            Box::new(SequenceGenerator::new("order")),
        );
        manager.set_processor(Box::new(WalletProcessor));

        Fixture {
            inventory,
            manager,
            customer,
            cart,
            isbn,
        }
    }

    #[test]
    fn test_successful_purchase() {
        let mut fx = fixture();
        fx.customer.deposit(Money::from_cents(9999)).unwrap();

        let order = fx
            .manager
            .purchase_order(&mut fx.customer, &mut fx.cart)
            .unwrap();

        assert_eq!(order.order_id(), "order-1");
        assert_eq!(order.total().cents(), 598);
        assert_eq!(order.lines().len(), 1);
        assert_eq!(order.lines()[0].quantity(), 2);

        // inventory drained to zero but the entry survives
        assert_eq!(fx.inventory.on_hand(&fx.isbn), Some(0));
        // history gained exactly one order; cart is empty; wallet charged
        assert_eq!(fx.customer.orders().len(), 1);
        assert_eq!(fx.customer.orders()[0].total().cents(), 598);
        assert!(fx.cart.is_empty());
        assert_eq!(fx.customer.wallet().cents(), 9999 - 598);
    }

    #[test]
    fn test_insufficient_funds_changes_nothing() {
        let mut fx = fixture();
        fx.customer.deposit(Money::from_cents(100)).unwrap();

        let err = fx
            .manager
            .purchase_order(&mut fx.customer, &mut fx.cart)
            .unwrap_err();
        assert!(matches!(err, CoreError::PaymentFailed { .. }));

        // nothing moved
        assert_eq!(fx.inventory.on_hand(&fx.isbn), Some(2));
        assert!(fx.customer.orders().is_empty());
        assert_eq!(fx.cart.quantity(&fx.isbn), 2);
        assert_eq!(fx.customer.wallet().cents(), 100);
    }

    #[test]
    fn test_empty_cart_rejected() {
        let mut fx = fixture();
        fx.cart.clear();
        fx.customer.deposit(Money::from_cents(9999)).unwrap();

        let err = fx
            .manager
            .purchase_order(&mut fx.customer, &mut fx.cart)
            .unwrap_err();
        assert!(matches!(err, CoreError::EmptyCart));
    }

    #[test]
    fn test_wrong_customer_rejected() {
        let mut fx = fixture();
        let ids = SequenceGenerator::new("other");
        let mut intruder = Customer::new(&ids, "intruder@example.com").unwrap();
        intruder.deposit(Money::from_cents(9999)).unwrap();

        let err = fx
            .manager
            .purchase_order(&mut intruder, &mut fx.cart)
            .unwrap_err();
        assert!(matches!(err, CoreError::CustomerMismatch { .. }));
        assert_eq!(fx.inventory.on_hand(&fx.isbn), Some(2));
    }

    #[test]
    fn test_no_processor_configured() {
        let mut fx = fixture();
        fx.customer.deposit(Money::from_cents(9999)).unwrap();
        let mut bare = CheckoutManager::new(Arc::clone(&fx.inventory));

        let err = bare
            .purchase_order(&mut fx.customer, &mut fx.cart)
            .unwrap_err();
        assert!(matches!(err, CoreError::NoProcessorConfigured));
    }

    #[test]
    fn test_processor_is_one_shot() {
        let mut fx = fixture();
        fx.customer.deposit(Money::from_cents(9999)).unwrap();

        fx.manager
            .purchase_order(&mut fx.customer, &mut fx.cart)
            .unwrap();
        assert!(!fx.manager.has_processor());

        // second purchase without re-configuring fails
        fx.cart.add(&fx.isbn, 0).unwrap_err(); // cart stays empty, stock is 0 anyway
        let err = fx
            .manager
            .purchase_order(&mut fx.customer, &mut fx.cart)
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::EmptyCart | CoreError::NoProcessorConfigured
        ));
    }

    #[test]
    fn test_failed_charge_also_consumes_processor() {
        let mut fx = fixture();
        fx.customer.deposit(Money::from_cents(100)).unwrap();

        fx.manager
            .purchase_order(&mut fx.customer, &mut fx.cart)
            .unwrap_err();
        assert!(!fx.manager.has_processor());
    }

    #[test]
    fn test_stock_drained_after_cart_was_filled_aborts_cleanly() {
        let mut fx = fixture();
        fx.customer.deposit(Money::from_cents(9999)).unwrap();

        // another sale drains one copy after this cart reserved two
        fx.inventory.decrease_book(&fx.isbn, 1).unwrap();

        let err = fx
            .manager
            .purchase_order(&mut fx.customer, &mut fx.cart)
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::OutOfStock {
                available: 1,
                requested: 2,
                ..
            }
        ));
        // no charge happened
        assert_eq!(fx.customer.wallet().cents(), 9999);
        assert!(fx.customer.orders().is_empty());
    }

    #[test]
    fn test_multi_line_purchase_decrements_every_line() {
        let mut fx = fixture();
        let witcher = hardcover("978-0-7330-7673-2", "Witcher", 370);
        let witcher_isbn = witcher.isbn().clone();
        fx.inventory.add_book(witcher, 8).unwrap();
        assert_eq!(
            fx.cart.add(&witcher_isbn, 3).unwrap(),
            StockOutcome::Added
        );
        fx.customer.deposit(Money::from_cents(9999)).unwrap();

        let order = fx
            .manager
            .purchase_order(&mut fx.customer, &mut fx.cart)
            .unwrap();

        // 2*299 + 3*370 = 1708
        assert_eq!(order.total().cents(), 1708);
        assert_eq!(fx.inventory.on_hand(&fx.isbn), Some(0));
        assert_eq!(fx.inventory.on_hand(&witcher_isbn), Some(5));
    }
}
