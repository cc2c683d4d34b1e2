//! # Validation Module
//!
//! Boundary validation rules for the Tome domain model.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                              │
//! │                                                                     │
//! │  Layer 1: Constructors (Book::new, Customer::new)                   │
//! │  └── THIS MODULE: format and range rules, fail fast                 │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 2: Managers (Inventory, ShoppingCart, CheckoutManager)       │
//! │  └── Stateful rules: stock levels, ownership, funds                 │
//! │                                                                     │
//! │  A value that reaches layer 2 is already structurally valid.        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;

use crate::error::ValidationError;
use crate::{MAX_AUDIOBOOK_SECONDS, MAX_DESCRIPTION_LENGTH, MAX_TITLE_LENGTH};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// ISBN
// =============================================================================
//
// The accepted format is the classic catalog pattern
//
//   ^(?:ISBN(?:-1[03])?:? )?(?=[-0-9 ]{17}$|[-0-9X ]{13}$|[0-9X]{10}$)
//    (?:97[89][- ]?)?[0-9]{1,5}[- ]?(?:[0-9]+[- ]?){2}[0-9X]$   (case-insensitive)
//
// It accepts ISBN-10 and ISBN-13 shapes with optional hyphens/spaces and an
// optional "ISBN-13: " style prefix. It validates format only, not the
// checksum digit. The `regex` crate has no look-ahead support, so the
// `(?=...)` overall-shape assertion is compiled as a separate anchored
// pattern applied to the same slice.

/// Optional "ISBN", "ISBN-10: ", "ISBN-13: " style prefix.
const ISBN_PREFIX_PATTERN: &str = r"^(?i:ISBN(?:-1[03])?:? )";

/// The look-ahead of the catalog pattern: the part after the prefix must be
/// exactly 17 chars of digits/hyphens/spaces, 13 chars allowing X, or a bare
/// 10-char block.
const ISBN_SHAPE_PATTERN: &str = r"^(?:[-0-9 ]{17}|[-0-9xX ]{13}|[0-9xX]{10})$";

/// Group structure of the number itself: optional 978/979 EAN prefix, then
/// registration/registrant/publication groups, then the check digit.
const ISBN_BODY_PATTERN: &str = r"(?i)^(?:97[89][- ]?)?[0-9]{1,5}[- ]?(?:[0-9]+[- ]?){2}[0-9X]$";

struct IsbnPatterns {
    prefix: Regex,
    shape: Regex,
    body: Regex,
}

fn isbn_patterns() -> &'static IsbnPatterns {
    static PATTERNS: OnceLock<IsbnPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| IsbnPatterns {
        prefix: Regex::new(ISBN_PREFIX_PATTERN).expect("ISBN prefix pattern is valid"),
        shape: Regex::new(ISBN_SHAPE_PATTERN).expect("ISBN shape pattern is valid"),
        body: Regex::new(ISBN_BODY_PATTERN).expect("ISBN body pattern is valid"),
    })
}

/// Checks whether a string matches the accepted ISBN-10/ISBN-13 format.
///
/// ## Example
/// ```rust
/// use tome_core::validation::is_valid_isbn;
///
/// assert!(is_valid_isbn("978-3-8747-4427-0"));
/// assert!(is_valid_isbn("0-2711-2752-X"));
/// assert!(!is_valid_isbn("888-8-8362-285-32"));
/// ```
pub fn is_valid_isbn(isbn: &str) -> bool {
    if isbn.is_empty() {
        return false;
    }

    let patterns = isbn_patterns();
    let digits = match patterns.prefix.find(isbn) {
        Some(m) => &isbn[m.end()..],
        None => isbn,
    };

    patterns.shape.is_match(digits) && patterns.body.is_match(digits)
}

/// Validates an ISBN, reporting the offending value on failure.
pub fn validate_isbn(isbn: &str) -> ValidationResult<()> {
    if is_valid_isbn(isbn) {
        Ok(())
    } else {
        Err(ValidationError::InvalidIsbn {
            value: isbn.to_string(),
        })
    }
}

// =============================================================================
// Email
// =============================================================================

/// Validates a customer email address.
///
/// ## Rules
/// Deliberately a heuristic, not RFC 5322: the address must be non-empty
/// and contain both an `@` and a `.`. Deliverability is the concern of a
/// mail system, not a domain model.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    if email.trim().is_empty() {
        return Err(ValidationError::Required { field: "email" });
    }

    if !email.contains('@') || !email.contains('.') {
        return Err(ValidationError::InvalidEmail {
            value: email.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// String Lengths
// =============================================================================

/// Validates a book title against [`MAX_TITLE_LENGTH`].
///
/// An empty title is allowed: catalog entries are sometimes registered by
/// ISBN before their metadata arrives.
pub fn validate_title(title: &str) -> ValidationResult<()> {
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(ValidationError::TooLong {
            field: "title",
            max: MAX_TITLE_LENGTH,
        });
    }

    Ok(())
}

/// Validates a book description against [`MAX_DESCRIPTION_LENGTH`].
pub fn validate_description(description: &str) -> ValidationResult<()> {
    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(ValidationError::TooLong {
            field: "description",
            max: MAX_DESCRIPTION_LENGTH,
        });
    }

    Ok(())
}

/// Validates a customer name part (first or last name).
pub fn validate_name(field: &'static str, name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required { field });
    }

    Ok(())
}

// =============================================================================
// Numeric Ranges
// =============================================================================

/// Validates a copy count for inventory and cart operations.
///
/// ## Rules
/// - Must be at least 1; "add zero copies" is always a caller bug
pub fn validate_copies(copies: u32) -> ValidationResult<()> {
    if copies < 1 {
        return Err(ValidationError::MustBePositive { field: "copies" });
    }

    Ok(())
}

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free books)
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price",
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a wallet deposit or withdrawal amount: strictly positive.
pub fn validate_amount_cents(cents: i64) -> ValidationResult<()> {
    if cents <= 0 {
        return Err(ValidationError::MustBePositive { field: "amount" });
    }

    Ok(())
}

/// Validates a physical book's weight in grams: strictly positive.
pub fn validate_weight(weight_grams: f64) -> ValidationResult<()> {
    if weight_grams <= 0.0 {
        return Err(ValidationError::MustBePositive { field: "weight" });
    }

    Ok(())
}

/// Validates a physical book's page count: strictly positive.
pub fn validate_pages(pages: u32) -> ValidationResult<()> {
    if pages == 0 {
        return Err(ValidationError::MustBePositive { field: "pages" });
    }

    Ok(())
}

/// Validates an audiobook duration: strictly between zero and
/// [`MAX_AUDIOBOOK_SECONDS`].
pub fn validate_duration(duration: Duration) -> ValidationResult<()> {
    if duration.is_zero() || duration.as_secs() > MAX_AUDIOBOOK_SECONDS {
        return Err(ValidationError::OutOfRange {
            field: "duration",
            min: 1,
            max: MAX_AUDIOBOOK_SECONDS as i64,
        });
    }

    Ok(())
}

/// Validates an e-book file size in megabytes: strictly positive.
pub fn validate_file_size(file_size_mb: f64) -> ValidationResult<()> {
    if file_size_mb <= 0.0 {
        return Err(ValidationError::MustBePositive { field: "file size" });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_isbn13() {
        assert!(is_valid_isbn("978-3-8747-4427-0"));
        assert!(is_valid_isbn("978-0-7330-7673-2"));
        assert!(is_valid_isbn("978-6-7411-4578-1"));
        assert!(is_valid_isbn("9781861972712"));
    }

    #[test]
    fn test_valid_isbn10() {
        assert!(is_valid_isbn("0-3599-3099-9"));
        assert!(is_valid_isbn("0-2711-2752-X"));
        assert!(is_valid_isbn("0-2711-2752-x"));
        assert!(is_valid_isbn("0271127527"));
    }

    #[test]
    fn test_valid_isbn_with_prefix() {
        assert!(is_valid_isbn("ISBN 978-3-8747-4427-0"));
        assert!(is_valid_isbn("ISBN-13: 978-3-8747-4427-0"));
        assert!(is_valid_isbn("ISBN-10: 0-3599-3099-9"));
        assert!(is_valid_isbn("isbn 978-3-8747-4427-0"));
    }

    #[test]
    fn test_invalid_isbn() {
        assert!(!is_valid_isbn(""));
        assert!(!is_valid_isbn("123"));
        assert!(!is_valid_isbn("888-8-8362-285-32"));
        assert!(!is_valid_isbn("978-3-8747-4427"));
        assert!(!is_valid_isbn("not-an-isbn"));
        // X is only legal as an ISBN-10 check digit, never in a 17-char shape
        assert!(!is_valid_isbn("978-3-8747-442X-0"));
    }

    #[test]
    fn test_validate_isbn_reports_value() {
        let err = validate_isbn("123").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidIsbn { value } if value == "123"));
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("alibaba@hotgirls.no").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("   ").is_err());
        assert!(validate_email("no-at-sign.com").is_err());
        assert!(validate_email("no-dot@com").is_err());
    }

    #[test]
    fn test_validate_title() {
        assert!(validate_title("Lord of the Rings: Two Towers").is_ok());
        assert!(validate_title("").is_ok());
        assert!(validate_title(&"A".repeat(200)).is_ok());
        assert!(validate_title(&"A".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_description() {
        assert!(validate_description(&"B".repeat(5000)).is_ok());
        assert!(validate_description(&"B".repeat(5001)).is_err());
    }

    #[test]
    fn test_validate_copies() {
        assert!(validate_copies(1).is_ok());
        assert!(validate_copies(999).is_ok());
        assert!(validate_copies(0).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok()); // free book
        assert!(validate_price_cents(1099).is_ok());
        assert!(validate_price_cents(-100).is_err());
    }

    #[test]
    fn test_validate_ranges() {
        assert!(validate_weight(322.0).is_ok());
        assert!(validate_weight(0.0).is_err());
        assert!(validate_weight(-1.0).is_err());

        assert!(validate_pages(448).is_ok());
        assert!(validate_pages(0).is_err());

        assert!(validate_duration(Duration::from_secs(3600)).is_ok());
        assert!(validate_duration(Duration::ZERO).is_err());
        assert!(validate_duration(Duration::from_secs(MAX_AUDIOBOOK_SECONDS + 1)).is_err());

        assert!(validate_file_size(2.4).is_ok());
        assert!(validate_file_size(0.0).is_err());
    }
}
