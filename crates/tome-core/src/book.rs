//! # Book Module
//!
//! The catalog entity: a [`Book`] with shared descriptive fields and a
//! per-variant [`BookFormat`] payload.
//!
//! ## Identity
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  A Book IS its ISBN                                                 │
//! │                                                                     │
//! │  Equality and hashing use the ISBN alone. Two Book values with      │
//! │  the same ISBN are the same logical catalog entity, even if their   │
//! │  descriptive metadata differs. This is what lets the inventory      │
//! │  and cart key their maps by Isbn.                                   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Variants
//! The source of this model used an inheritance hierarchy
//! (Book -> PhysicalBook/AudioBook/EBook). Here that is a tagged union
//! dispatched by pattern matching: the shared fields live on [`Book`],
//! the variant payload on [`BookFormat`].

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation;

// =============================================================================
// Isbn
// =============================================================================

/// A validated ISBN-10 or ISBN-13 string.
///
/// Construction goes through [`Isbn::parse`], so any `Isbn` value in the
/// system is known to match the catalog format. The inner string is kept
/// exactly as supplied (hyphens and prefix included): the ISBN is an opaque
/// identity key, not a number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Isbn(String);

impl Isbn {
    /// Parses and validates an ISBN string.
    ///
    /// ## Example
    /// ```rust
    /// use tome_core::Isbn;
    ///
    /// let isbn = Isbn::parse("978-3-8747-4427-0").unwrap();
    /// assert_eq!(isbn.as_str(), "978-3-8747-4427-0");
    ///
    /// assert!(Isbn::parse("888-8-8362-285-32").is_err());
    /// ```
    pub fn parse(isbn: &str) -> Result<Self, ValidationError> {
        validation::validate_isbn(isbn)?;
        Ok(Isbn(isbn.to_string()))
    }

    /// Returns the ISBN exactly as it was supplied.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Isbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Isbn {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Isbn::parse(s)
    }
}

impl TryFrom<String> for Isbn {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Isbn::parse(&value)
    }
}

impl From<Isbn> for String {
    fn from(isbn: Isbn) -> String {
        isbn.0
    }
}

// =============================================================================
// Cover Type
// =============================================================================

/// The binding or form of a physical book.
///
/// The source model carried a `None = 0` sentinel that setters then had to
/// reject; here an unspecified cover is simply not representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverType {
    Hardcover,
    Paperback,
    Leatherbound,
    Magazine,
    Spiral,
    Comicbook,
    Coloringbook,
}

// =============================================================================
// Book Format
// =============================================================================

/// Variant-specific payload of a [`Book`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "snake_case")]
pub enum BookFormat {
    /// A printed book.
    Physical {
        /// Shipping weight, strictly positive.
        weight_grams: f64,
        /// Page count, strictly positive.
        pages: u32,
        cover: CoverType,
    },
    /// A narrated recording.
    Audio {
        /// Running time, in (0, [`crate::MAX_AUDIOBOOK_SECONDS`]].
        duration: Duration,
        narrator: Option<String>,
    },
    /// A downloadable file.
    Ebook {
        /// File size in megabytes, strictly positive.
        file_size_mb: f64,
    },
}

impl BookFormat {
    /// Validates the variant-specific range rules.
    fn validate(&self) -> Result<(), ValidationError> {
        match self {
            BookFormat::Physical {
                weight_grams,
                pages,
                ..
            } => {
                validation::validate_weight(*weight_grams)?;
                validation::validate_pages(*pages)?;
            }
            BookFormat::Audio { duration, .. } => {
                validation::validate_duration(*duration)?;
            }
            BookFormat::Ebook { file_size_mb } => {
                validation::validate_file_size(*file_size_mb)?;
            }
        }
        Ok(())
    }
}

// =============================================================================
// Book
// =============================================================================

/// A catalog entity identified by ISBN.
///
/// ## Lifecycle
/// - Constructed once; the ISBN can never change afterwards
/// - Descriptive fields (title, description, price, metadata) are mutable
///   through validating setters
/// - Never deleted: a book keeps its catalog identity even when its stock
///   reaches zero
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    isbn: Isbn,
    title: String,
    price: Money,
    description: String,
    author: Option<String>,
    language: Option<String>,
    publisher: Option<String>,
    release_date: Option<NaiveDate>,
    format: BookFormat,
}

impl Book {
    /// Creates a new book, validating the ISBN, title, price and the
    /// format's range rules.
    ///
    /// ## Example
    /// ```rust
    /// use tome_core::{Book, BookFormat, Money};
    ///
    /// let ebook = Book::new(
    ///     "978-0-7330-7673-2",
    ///     "Witcher",
    ///     Money::from_cents(370),
    ///     BookFormat::Ebook { file_size_mb: 2.4 },
    /// )
    /// .unwrap();
    /// assert_eq!(ebook.title(), "Witcher");
    /// ```
    pub fn new(
        isbn: &str,
        title: &str,
        price: Money,
        format: BookFormat,
    ) -> Result<Self, ValidationError> {
        let isbn = Isbn::parse(isbn)?;
        validation::validate_title(title)?;
        validation::validate_price_cents(price.cents())?;
        format.validate()?;

        Ok(Book {
            isbn,
            title: title.to_string(),
            price,
            description: String::new(),
            author: None,
            language: None,
            publisher: None,
            release_date: None,
            format,
        })
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[inline]
    pub fn isbn(&self) -> &Isbn {
        &self.isbn
    }

    #[inline]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[inline]
    pub fn price(&self) -> Money {
        self.price
    }

    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[inline]
    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    #[inline]
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    #[inline]
    pub fn publisher(&self) -> Option<&str> {
        self.publisher.as_deref()
    }

    #[inline]
    pub fn release_date(&self) -> Option<NaiveDate> {
        self.release_date
    }

    #[inline]
    pub fn format(&self) -> &BookFormat {
        &self.format
    }

    // -------------------------------------------------------------------------
    // Validating Setters
    // -------------------------------------------------------------------------

    /// Updates the title, enforcing the maximum length.
    pub fn set_title(&mut self, title: &str) -> Result<(), ValidationError> {
        validation::validate_title(title)?;
        self.title = title.to_string();
        Ok(())
    }

    /// Updates the description, enforcing the maximum length.
    pub fn set_description(&mut self, description: &str) -> Result<(), ValidationError> {
        validation::validate_description(description)?;
        self.description = description.to_string();
        Ok(())
    }

    /// Updates the price; zero is allowed, negative is not.
    pub fn set_price(&mut self, price: Money) -> Result<(), ValidationError> {
        validation::validate_price_cents(price.cents())?;
        self.price = price;
        Ok(())
    }

    /// Replaces the variant payload, revalidating its range rules.
    pub fn set_format(&mut self, format: BookFormat) -> Result<(), ValidationError> {
        format.validate()?;
        self.format = format;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Descriptive Metadata (builder style, no validation needed)
    // -------------------------------------------------------------------------

    pub fn with_author(mut self, author: &str) -> Self {
        self.author = Some(author.to_string());
        self
    }

    pub fn with_language(mut self, language: &str) -> Self {
        self.language = Some(language.to_string());
        self
    }

    pub fn with_publisher(mut self, publisher: &str) -> Self {
        self.publisher = Some(publisher.to_string());
        self
    }

    pub fn with_release_date(mut self, release_date: NaiveDate) -> Self {
        self.release_date = Some(release_date);
        self
    }

    /// Sets the description at construction time.
    pub fn with_description(mut self, description: &str) -> Result<Self, ValidationError> {
        self.set_description(description)?;
        Ok(self)
    }
}

// =============================================================================
// Identity: equality and hashing by ISBN only
// =============================================================================

impl PartialEq for Book {
    fn eq(&self, other: &Self) -> bool {
        self.isbn == other.isbn
    }
}

impl Eq for Book {}

impl Hash for Book {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.isbn.hash(state);
    }
}

// =============================================================================
// Display
// =============================================================================

/// Renders a stable one-line summary: title and ISBN always, price if
/// nonzero, author if present, release date if set.
impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Title: {}, ISBN: {}", self.title, self.isbn)?;
        if !self.price.is_zero() {
            write!(f, ", Price: {}", self.price)?;
        }
        if let Some(author) = &self.author {
            write!(f, ", Author: {}", author)?;
        }
        if let Some(release_date) = self.release_date {
            write!(f, ", Release date: {}", release_date)?;
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
