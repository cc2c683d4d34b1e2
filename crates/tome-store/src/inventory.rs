//! # Inventory
//!
//! The canonical ledger mapping each catalog [`Book`] to its
//! quantity-on-hand.
//!
//! ## Invariants
//! - A book present in the ledger always has quantity >= 0
//! - Decrementing to zero KEEPS the entry: the book retains its catalog
//!   identity while out of stock, and removal is a separate, explicit act
//! - Collaborators (carts, checkout) query through read-only accessors and
//!   never mutate the map directly
//!
//! ## Thread Safety
//! The map sits behind a single `Mutex` per inventory instance. Every
//! operation acquires it exactly once, so a read-check-then-write sequence
//! such as "verify stock, then decrement" can never interleave with
//! another writer.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::debug;

use tome_core::{Book, CoreError, CoreResult, Isbn};

// =============================================================================
// Stock Outcome
// =============================================================================

/// The outcome of a successful stock or cart mutation.
///
/// Failures are [`CoreError`] values, not outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockOutcome {
    /// A new entry was created.
    Added,
    /// An existing entry's quantity went up.
    Increased,
    /// An existing entry's quantity went down.
    Decreased,
    /// The entry was deleted.
    Removed,
}

// =============================================================================
// Stock Entry
// =============================================================================

/// A catalog book together with its copies on hand.
#[derive(Debug, Clone)]
pub(crate) struct StockEntry {
    pub(crate) book: Book,
    pub(crate) on_hand: u32,
}

// =============================================================================
// Inventory
// =============================================================================

/// The stock ledger. Cheap to share via `Arc`; all methods take `&self`.
#[derive(Debug, Default)]
pub struct Inventory {
    entries: Mutex<HashMap<Isbn, StockEntry>>,
}

impl Inventory {
    /// Creates an empty inventory.
    pub fn new() -> Self {
        Inventory::default()
    }

    /// Runs a closure with exclusive access to the stock map.
    ///
    /// This is how checkout keeps verify-charge-decrement atomic: the lock
    /// is held for the whole closure.
    pub(crate) fn with_entries<R>(&self, f: impl FnOnce(&mut HashMap<Isbn, StockEntry>) -> R) -> R {
        let mut entries = self.entries.lock().expect("inventory mutex poisoned");
        f(&mut entries)
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Registers copies of a book.
    ///
    /// If the ISBN is new the book is inserted with `copies` on hand
    /// (outcome [`StockOutcome::Added`]); if it already exists the count is
    /// incremented and the existing catalog record is kept
    /// ([`StockOutcome::Increased`]). The combined count must stay within
    /// `u32`; past that the call fails and the ledger is untouched.
    pub fn add_book(&self, book: Book, copies: u32) -> CoreResult<StockOutcome> {
        tome_core::validation::validate_copies(copies)?;

        self.with_entries(|entries| {
            let isbn = book.isbn().clone();
            let outcome = match entries.get_mut(&isbn) {
                Some(entry) => {
                    // The combined count must stay representable.
                    entry.on_hand = entry.on_hand.checked_add(copies).ok_or(
                        tome_core::ValidationError::OutOfRange {
                            field: "copies",
                            min: 1,
                            max: u32::MAX as i64,
                        },
                    )?;
                    StockOutcome::Increased
                }
                None => {
                    entries.insert(isbn.clone(), StockEntry { book, on_hand: copies });
                    StockOutcome::Added
                }
            };
            debug!(isbn = %isbn, copies, ?outcome, "inventory add");
            Ok(outcome)
        })
    }

    /// Decreases a book's on-hand count.
    ///
    /// Fails with [`CoreError::BookNotFound`] for an unknown ISBN and with
    /// [`CoreError::OutOfStock`] when `copies` exceeds the count on hand;
    /// stock is never clamped and never goes negative. Decrementing to
    /// zero keeps the entry in the ledger.
    pub fn decrease_book(&self, isbn: &Isbn, copies: u32) -> CoreResult<StockOutcome> {
        tome_core::validation::validate_copies(copies)?;

        self.with_entries(|entries| {
            let entry = entries.get_mut(isbn).ok_or_else(|| CoreError::BookNotFound {
                key: isbn.to_string(),
            })?;
            if copies > entry.on_hand {
                return Err(CoreError::OutOfStock {
                    isbn: isbn.to_string(),
                    available: entry.on_hand,
                    requested: copies,
                });
            }
            entry.on_hand -= copies;
            debug!(isbn = %isbn, copies, on_hand = entry.on_hand, "inventory decrease");
            Ok(StockOutcome::Decreased)
        })
    }

    /// Deletes a book's ledger entry entirely.
    ///
    /// An entry with copies still on hand is only deleted when `force` is
    /// set; otherwise the call fails with [`CoreError::CopiesRemain`].
    pub fn remove_book(&self, isbn: &Isbn, force: bool) -> CoreResult<StockOutcome> {
        self.with_entries(|entries| {
            let entry = entries.get(isbn).ok_or_else(|| CoreError::BookNotFound {
                key: isbn.to_string(),
            })?;
            if entry.on_hand > 0 && !force {
                return Err(CoreError::CopiesRemain {
                    isbn: isbn.to_string(),
                    on_hand: entry.on_hand,
                });
            }
            entries.remove(isbn);
            debug!(isbn = %isbn, force, "inventory remove");
            Ok(StockOutcome::Removed)
        })
    }

    // -------------------------------------------------------------------------
    // Lookups
    // -------------------------------------------------------------------------

    /// Finds a book by exact ISBN, cloning the catalog record.
    pub fn find_by_isbn(&self, isbn: &Isbn) -> CoreResult<Book> {
        self.try_find_by_isbn(isbn)
            .ok_or_else(|| CoreError::BookNotFound {
                key: isbn.to_string(),
            })
    }

    /// Non-failing variant of [`Inventory::find_by_isbn`].
    pub fn try_find_by_isbn(&self, isbn: &Isbn) -> Option<Book> {
        self.with_entries(|entries| entries.get(isbn).map(|entry| entry.book.clone()))
    }

    /// Finds a book by exact title. Linear scan; the catalog is small.
    pub fn find_by_title(&self, title: &str) -> CoreResult<Book> {
        self.try_find_by_title(title)
            .ok_or_else(|| CoreError::BookNotFound {
                key: title.to_string(),
            })
    }

    /// Non-failing variant of [`Inventory::find_by_title`].
    pub fn try_find_by_title(&self, title: &str) -> Option<Book> {
        self.with_entries(|entries| {
            entries
                .values()
                .find(|entry| entry.book.title() == title)
                .map(|entry| entry.book.clone())
        })
    }

    // -------------------------------------------------------------------------
    // Read-only Views
    // -------------------------------------------------------------------------

    /// Copies on hand for an ISBN; `None` when the book is not in the
    /// ledger at all (distinct from `Some(0)`, an out-of-stock entry).
    pub fn on_hand(&self, isbn: &Isbn) -> Option<u32> {
        self.with_entries(|entries| entries.get(isbn).map(|entry| entry.on_hand))
    }

    /// Number of distinct catalog entries.
    pub fn len(&self) -> usize {
        self.with_entries(|entries| entries.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A point-in-time copy of the whole ledger, for display or seeding
    /// checks. Collaborators mutate through the methods above, never
    /// through this view.
    pub fn snapshot(&self) -> Vec<(Book, u32)> {
        self.with_entries(|entries| {
            entries
                .values()
                .map(|entry| (entry.book.clone(), entry.on_hand))
                .collect()
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
