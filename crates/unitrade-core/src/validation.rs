//! # Validation Module
//!
//! Input validation for the sell form and the search box.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Shell command (market-shell)                                 │
//! │  ├── Text → typed values (Money::parse, Category::from_str)            │
//! │  └── Immediate feedback at the prompt                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Catalog::add_listing (this crate)                            │
//! │  └── THIS MODULE: required fields, lengths, non-negative prices        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Schema (documented only, never executed)                     │
//! │  └── NOT NULL title/price, VARCHAR(100) title/location                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use unitrade_core::validation::{validate_title, validate_price};
//! use unitrade_core::Money;
//!
//! assert_eq!(validate_title("  Bike ").unwrap(), "Bike");
//! assert!(validate_price(None).is_err());
//! assert!(validate_price(Some(Money::from_yuan(600))).is_ok());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_LOCATION_CHARS, MAX_SEARCH_QUERY_CHARS, MAX_TITLE_CHARS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a listing title.
///
/// ## Rules
/// - Must not be blank
/// - At most 100 characters (`VARCHAR(100)`)
///
/// ## Returns
/// The trimmed title.
pub fn validate_title(title: &str) -> ValidationResult<String> {
    let title = title.trim();

    if title.is_empty() {
        return Err(ValidationError::required("title"));
    }

    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(ValidationError::TooLong {
            field: "title".to_string(),
            max: MAX_TITLE_CHARS,
        });
    }

    Ok(title.to_string())
}

/// Validates a listing description.
///
/// ## Rules
/// - Must not be blank (`TEXT`, no length limit)
///
/// ## Returns
/// The trimmed description.
pub fn validate_description(description: &str) -> ValidationResult<String> {
    let description = description.trim();

    if description.is_empty() {
        return Err(ValidationError::required("description"));
    }

    Ok(description.to_string())
}

/// Validates a hand-over location, falling back to `default` when blank.
pub fn validate_location(location: Option<&str>, default: &str) -> ValidationResult<String> {
    let location = location.map(str::trim).filter(|l| !l.is_empty());

    let Some(location) = location else {
        return Ok(default.to_string());
    };

    if location.chars().count() > MAX_LOCATION_CHARS {
        return Err(ValidationError::TooLong {
            field: "location".to_string(),
            max: MAX_LOCATION_CHARS,
        });
    }

    Ok(location.to_string())
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (matches every listing)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_SEARCH_QUERY_CHARS {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_SEARCH_QUERY_CHARS,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Price Validators
// =============================================================================

/// Validates the asking price.
///
/// ## Rules
/// - Must be present
/// - Must be non-negative (zero is allowed: giveaways)
pub fn validate_price(price: Option<Money>) -> ValidationResult<Money> {
    let price = price.ok_or_else(|| ValidationError::required("price"))?;
    ensure_non_negative("price", price)?;
    Ok(price)
}

/// Validates the original price. Absent means zero.
pub fn validate_original_price(original_price: Option<Money>) -> ValidationResult<Money> {
    let original_price = original_price.unwrap_or_default();
    ensure_non_negative("original_price", original_price)?;
    Ok(original_price)
}

fn ensure_non_negative(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }
    Ok(())
}

/// Parses an optional price field from form text.
///
/// Blank input means "absent" (`Ok(None)`), anything else must parse.
pub fn parse_optional_price(field: &str, input: &str) -> ValidationResult<Option<Money>> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    Money::parse(field, input).map(Some)
}

// =============================================================================
// Unit Tests
// =============================================================================
