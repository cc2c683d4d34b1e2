//! # Customer Module
//!
//! Customer identity, wallet and order history.
//!
//! ## Wallet Invariant
//! The balance is only reachable through [`Customer::deposit`] and
//! [`Customer::withdraw`], both of which validate their amount, so the
//! wallet can never go negative.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::ids::IdGenerator;
use crate::money::Money;
use crate::order::Order;
use crate::validation;

/// A customer who can fund a wallet, fill a cart and place orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    customer_id: String,
    email: String,
    first_name: String,
    last_name: String,
    wallet: Money,
    orders: Vec<Order>,
}

impl Customer {
    /// Creates a customer with a generated id and a validated email.
    /// Names start empty, the wallet starts at zero.
    ///
    /// ## Example
    /// ```rust
    /// use tome_core::{Customer, UuidGenerator};
    ///
    /// let customer = Customer::new(&UuidGenerator, "reader@example.com").unwrap();
    /// assert!(customer.wallet().is_zero());
    /// assert!(customer.orders().is_empty());
    /// ```
    pub fn new(ids: &dyn IdGenerator, email: &str) -> Result<Self, ValidationError> {
        validation::validate_email(email)?;
        Ok(Customer {
            customer_id: ids.next_id(),
            email: email.to_string(),
            first_name: String::new(),
            last_name: String::new(),
            wallet: Money::zero(),
            orders: Vec::new(),
        })
    }

    /// Creates a customer with full name information.
    pub fn with_name(
        ids: &dyn IdGenerator,
        email: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<Self, ValidationError> {
        let mut customer = Customer::new(ids, email)?;
        customer.set_first_name(first_name)?;
        customer.set_last_name(last_name)?;
        Ok(customer)
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// The generated opaque id; immutable for the customer's lifetime.
    #[inline]
    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    #[inline]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[inline]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    #[inline]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Current wallet balance; never negative.
    #[inline]
    pub fn wallet(&self) -> Money {
        self.wallet
    }

    /// Order history in insertion order, oldest first.
    #[inline]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    // -------------------------------------------------------------------------
    // Validating Setters
    // -------------------------------------------------------------------------

    pub fn set_email(&mut self, email: &str) -> Result<(), ValidationError> {
        validation::validate_email(email)?;
        self.email = email.to_string();
        Ok(())
    }

    pub fn set_first_name(&mut self, first_name: &str) -> Result<(), ValidationError> {
        validation::validate_name("first name", first_name)?;
        self.first_name = first_name.to_string();
        Ok(())
    }

    pub fn set_last_name(&mut self, last_name: &str) -> Result<(), ValidationError> {
        validation::validate_name("last name", last_name)?;
        self.last_name = last_name.to_string();
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Wallet
    // -------------------------------------------------------------------------

    /// Adds funds to the wallet. The amount must be strictly positive.
    pub fn deposit(&mut self, amount: Money) -> CoreResult<()> {
        validation::validate_amount_cents(amount.cents())?;
        self.wallet += amount;
        Ok(())
    }

    /// Removes funds from the wallet.
    ///
    /// Fails with [`CoreError::InsufficientFunds`] if the balance cannot
    /// cover the amount; the balance is left unchanged in that case.
    pub fn withdraw(&mut self, amount: Money) -> CoreResult<()> {
        validation::validate_amount_cents(amount.cents())?;
        if amount > self.wallet {
            return Err(CoreError::InsufficientFunds {
                available_cents: self.wallet.cents(),
                required_cents: amount.cents(),
            });
        }
        self.wallet -= amount;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Order History
    // -------------------------------------------------------------------------

    /// Appends a completed order to the history.
    ///
    /// Called by the checkout flow after a successful charge; the history
    /// is append-only and keeps insertion order.
    pub fn record_order(&mut self, order: Order) {
        self.orders.push(order);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
