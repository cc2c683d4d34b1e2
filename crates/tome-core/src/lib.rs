//! # tome-core: Pure Domain Logic for the Tome Bookstore
//!
//! This crate is the **heart** of Tome. It contains the bookstore domain
//! model as pure types and functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Tome Architecture                            │
//! │                                                                     │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │                 Host program / test harness                 │   │
//! │  │     seeds catalog ──► fills cart ──► runs checkout          │   │
//! │  └─────────────────────────────┬───────────────────────────────┘   │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼───────────────────────────────┐   │
//! │  │                 tome-store (stateful layer)                 │   │
//! │  │     Inventory ──► ShoppingCart ──► CheckoutManager          │   │
//! │  └─────────────────────────────┬───────────────────────────────┘   │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼───────────────────────────────┐   │
//! │  │               ★ tome-core (THIS CRATE) ★                    │   │
//! │  │                                                             │   │
//! │  │   ┌────────┐ ┌────────┐ ┌──────────┐ ┌────────┐ ┌───────┐  │   │
//! │  │   │  book  │ │ money  │ │ customer │ │ order  │ │  ids  │  │   │
//! │  │   └────────┘ └────────┘ └──────────┘ └────────┘ └───────┘  │   │
//! │  │                                                             │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS        │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`book`] - [`Book`] with its format variants, [`Isbn`], [`CoverType`]
//! - [`money`] - [`Money`] type with integer arithmetic (no floating point!)
//! - [`customer`] - [`Customer`] identity, wallet and order history
//! - [`order`] - Immutable [`Order`] records produced by checkout
//! - [`ids`] - [`IdGenerator`] seam replacing a hidden global GUID source
//! - [`error`] - Domain error types
//! - [`validation`] - ISBN / email / range validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use tome_core::{Book, BookFormat, CoverType, Money};
//!
//! let book = Book::new(
//!     "978-3-8747-4427-0",
//!     "Lord of the Rings: Two Towers",
//!     Money::from_cents(299),
//!     BookFormat::Physical {
//!         weight_grams: 322.0,
//!         pages: 448,
//!         cover: CoverType::Hardcover,
//!     },
//! )
//! .unwrap();
//!
//! assert_eq!(book.isbn().as_str(), "978-3-8747-4427-0");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod book;
pub mod customer;
pub mod error;
pub mod ids;
pub mod money;
pub mod order;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use tome_core::Money` instead of
// `use tome_core::money::Money`

pub use book::{Book, BookFormat, CoverType, Isbn};
pub use customer::Customer;
pub use error::{CoreError, CoreResult, ValidationError};
pub use ids::{IdGenerator, SequenceGenerator, UuidGenerator};
pub use money::Money;
pub use order::{Order, OrderLine};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a book title, in characters.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length of a book description, in characters.
pub const MAX_DESCRIPTION_LENGTH: usize = 5000;

/// Upper bound for an audiobook's running time.
///
/// The longest commercial audiobooks run around 150 hours; anything past
/// this is a data-entry error, not a real recording.
pub const MAX_AUDIOBOOK_SECONDS: u64 = 500 * 60 * 60;
