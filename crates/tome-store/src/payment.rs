//! # Payment
//!
//! The pluggable charging seam used by checkout.
//!
//! A [`PaymentProcessor`] takes a customer and an amount and either
//! collects the money or fails without side effects. The only shipped
//! implementation is [`WalletProcessor`], which draws on the customer's
//! in-store wallet; an external gateway would implement the same trait.

use tome_core::{CoreResult, Customer, Money};

/// Something that can collect a payment from a customer.
pub trait PaymentProcessor {
    /// Human-readable name of the payment method, for order logs and
    /// error messages.
    fn name(&self) -> &str;

    /// Charges `amount` against the customer.
    ///
    /// Must be all-or-nothing: on failure the customer's funds are
    /// untouched.
    fn process_payment(&self, customer: &mut Customer, amount: Money) -> CoreResult<()>;
}

/// Charges the customer's in-store wallet balance.
#[derive(Debug, Default, Clone, Copy)]
pub struct WalletProcessor;

impl PaymentProcessor for WalletProcessor {
    fn name(&self) -> &str {
        "wallet"
    }

    fn process_payment(&self, customer: &mut Customer, amount: Money) -> CoreResult<()> {
        customer.withdraw(amount)
    }
}
