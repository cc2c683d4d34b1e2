//! # tome-store: Stateful Managers for the Tome Bookstore
//!
//! This crate sequences the pure rules of `tome-core` over shared mutable
//! state: the inventory ledger, per-customer shopping carts and the
//! checkout flow.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Purchase Lifecycle                             │
//! │                                                                     │
//! │  seed catalog ──► Inventory::add_book                               │
//! │                        │                                            │
//! │  fill cart ──────► ShoppingCart::add  (stock check under the        │
//! │                        │               inventory lock)              │
//! │                        ▼                                            │
//! │  checkout ───────► CheckoutManager::purchase_order                  │
//! │                        │                                            │
//! │                        ├── validate ownership                       │
//! │                        ├── verify stock + price lines  ┐ one lock   │
//! │                        ├── charge processor            │ held       │
//! │                        ├── decrement inventory         ┘ throughout │
//! │                        ├── append Order to history                  │
//! │                        └── clear cart                               │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency Model
//!
//! Each [`Inventory`] instance owns one exclusive `Mutex` over its stock
//! map, held across every read-check-then-write sequence. Carts from
//! different customers may still overcommit the same stock between adding
//! and checking out; checkout re-verifies every line under the lock before
//! charging, so the loser gets a clean `OutOfStock` with no side effects.

pub mod cart;
pub mod checkout;
pub mod inventory;
pub mod payment;

pub use cart::ShoppingCart;
pub use checkout::CheckoutManager;
pub use inventory::{Inventory, StockOutcome};
pub use payment::{PaymentProcessor, WalletProcessor};
