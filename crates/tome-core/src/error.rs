//! # Error Types
//!
//! Domain-specific error types for tome-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                 │
//! │                                                                     │
//! │  tome-core errors (this file)                                       │
//! │  ├── CoreError        - Domain / bookkeeping failures               │
//! │  └── ValidationError  - Input validation failures                   │
//! │                                                                     │
//! │  Flow: ValidationError ──from──► CoreError ──► caller               │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (ISBN, counts, balances)
//! 3. Errors are enum variants, never String
//! 4. Validation failures at a boundary are not recoverable locally:
//!    callers must supply valid data

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Domain errors raised by inventory, cart and checkout operations.
///
/// These represent business rule violations. Checkout-time failures
/// (`PaymentFailed`, `OutOfStock`) are guaranteed to leave prior state
/// unchanged: no partial charge, no partial inventory mutation.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No book matched the given ISBN or title.
    #[error("No book found for {key}")]
    BookNotFound { key: String },

    /// Requested quantity exceeds the copies currently on hand.
    ///
    /// Raised by inventory decrements and by the cart-vs-inventory stock
    /// check. Stock is never silently clamped to zero.
    #[error("Out of stock for {isbn}: available {available}, requested {requested}")]
    OutOfStock {
        isbn: String,
        available: u32,
        requested: u32,
    },

    /// A catalog entry still has copies on hand and removal was not forced.
    #[error("Cannot remove {isbn}: {on_hand} copies remain (pass force to override)")]
    CopiesRemain { isbn: String, on_hand: u32 },

    /// Checkout was attempted against a cart with no lines.
    #[error("Shopping cart is empty")]
    EmptyCart,

    /// The customer attempting checkout does not own the cart.
    #[error("Cart belongs to customer {cart_owner}, not {customer}")]
    CustomerMismatch { cart_owner: String, customer: String },

    /// Checkout was attempted with no payment processor configured.
    #[error("No payment processor configured")]
    NoProcessorConfigured,

    /// Wallet balance cannot cover the requested amount.
    #[error("Insufficient funds: available {available_cents} cents, required {required_cents} cents")]
    InsufficientFunds {
        available_cents: i64,
        required_cents: i64,
    },

    /// The configured payment processor declined the charge.
    #[error("Payment via {method} failed: {reason}")]
    PaymentFailed { method: String, reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised immediately at construction/setter boundaries, before any
/// business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// Field value exceeds its maximum length.
    #[error("{field} is too long, max {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: &'static str },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
    },

    /// The string does not match the accepted ISBN-10/ISBN-13 format.
    #[error("Invalid ISBN format: {value}")]
    InvalidIsbn { value: String },

    /// The string is not a plausible email address.
    #[error("Invalid email format: {value}")]
    InvalidEmail { value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
