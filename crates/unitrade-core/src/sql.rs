//! # Simulated SQL
//!
//! Structured descriptions of the statements a real backend would run, and
//! their SQL text. Nothing here is ever executed.
//!
//! ## Event → Text
//! ```text
//! QueryEvent::Init            [INIT]        SELECT * FROM products WHERE status = "ON_SALE" ...
//! QueryEvent::BrowseListings  [NAVIGATE]    SELECT * FROM products LIMIT 20;
//! QueryEvent::ViewProfile     [NAVIGATE]    SELECT * FROM users WHERE id = 101;
//!                                           SELECT * FROM products WHERE seller_id = 101;
//! QueryEvent::InsertListing   [INSERT_ITEM] INSERT INTO products (...) VALUES (...);
//! ```
//!
//! The recorder stores events; text is produced only when somebody reads
//! the log.
//!
//! INSERT values follow the schema: category and status are written as
//! their ENUM codes (`'TRANSPORT'`, `'ON_SALE'`), not the storefront labels,
//! and prices as `DECIMAL(10,2)` literals (`600.00`).

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Category, ItemStatus, Listing};

/// Characters of the description kept in the INSERT preview.
pub const DESCRIPTION_PREVIEW_CHARS: usize = 20;

/// Appended to the truncated description.
pub const ELLIPSIS: &str = "...";

// =============================================================================
// Action Tags
// =============================================================================

pub const ACTION_INIT: &str = "INIT";
pub const ACTION_NAVIGATE: &str = "NAVIGATE";
pub const ACTION_INSERT_ITEM: &str = "INSERT_ITEM";

// =============================================================================
// Query Event
// =============================================================================

/// One simulated database operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QueryEvent {
    /// First load of the storefront.
    Init,

    /// Navigation to the listings grid.
    BrowseListings,

    /// Navigation to a user's profile.
    ViewProfile { user_id: i64 },

    /// A new listing was stored.
    InsertListing(InsertedListing),
}

/// The columns an INSERT for a new listing would carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InsertedListing {
    pub seller_id: i64,
    pub title: String,
    pub description: String,
    pub price: Money,
    pub original_price: Money,
    pub category: Category,
    pub status: ItemStatus,
    pub location: String,
}

impl From<&Listing> for InsertedListing {
    fn from(listing: &Listing) -> Self {
        InsertedListing {
            seller_id: listing.seller_id,
            title: listing.title.clone(),
            description: listing.description.clone(),
            price: listing.price,
            original_price: listing.original_price,
            category: listing.category,
            status: listing.status,
            location: listing.location.clone(),
        }
    }
}

impl QueryEvent {
    /// The action tag shown next to the statement.
    pub fn action(&self) -> &'static str {
        match self {
            QueryEvent::Init => ACTION_INIT,
            QueryEvent::BrowseListings | QueryEvent::ViewProfile { .. } => ACTION_NAVIGATE,
            QueryEvent::InsertListing(_) => ACTION_INSERT_ITEM,
        }
    }

    /// Renders the statement text.
    pub fn to_sql(&self) -> String {
        match self {
            QueryEvent::Init => {
                "SELECT * FROM products WHERE status = \"ON_SALE\" ORDER BY publish_date DESC;"
                    .to_string()
            }
            QueryEvent::BrowseListings => "SELECT * FROM products LIMIT 20;".to_string(),
            QueryEvent::ViewProfile { user_id } => format!(
                "SELECT * FROM users WHERE id = {user_id};\nSELECT * FROM products WHERE seller_id = {user_id};"
            ),
            QueryEvent::InsertListing(row) => format!(
                "INSERT INTO products (seller_id, title, description, price, original_price, category, status, location, publish_date) \nVALUES ({}, '{}', '{}', {}, {}, '{}', '{}', '{}', NOW());",
                row.seller_id,
                escape_literal(&row.title),
                escape_literal(&preview_description(&row.description)),
                row.price.to_decimal_string(),
                row.original_price.to_decimal_string(),
                row.category.code(),
                row.status.code(),
                escape_literal(&row.location),
            ),
        }
    }
}

impl fmt::Display for QueryEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// First 20 characters of `description` followed by `...`.
///
/// Counts characters, not bytes, so multi-byte text is never split.
pub fn preview_description(description: &str) -> String {
    let mut preview: String = description.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
    preview.push_str(ELLIPSIS);
    preview
}

/// Doubles single quotes so the value stays inside its SQL literal.
pub fn escape_literal(value: &str) -> String {
    value.replace('\'', "''")
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn bike_row() -> InsertedListing {
        InsertedListing {
            seller_id: 101,
            title: "Bike".to_string(),
            description: "Used bike in good condition".to_string(),
            price: Money::from_yuan(600),
            original_price: Money::from_yuan(1200),
            category: Category::Transport,
            status: ItemStatus::Available,
            location: "北区宿舍楼下".to_string(),
        }
    }

    #[test]
    fn test_actions() {
        assert_eq!(QueryEvent::Init.action(), "INIT");
        assert_eq!(QueryEvent::BrowseListings.action(), "NAVIGATE");
        assert_eq!(QueryEvent::ViewProfile { user_id: 1 }.action(), "NAVIGATE");
        assert_eq!(QueryEvent::InsertListing(bike_row()).action(), "INSERT_ITEM");
    }

    #[test]
    fn test_profile_query_mentions_user_twice() {
        let sql = QueryEvent::ViewProfile { user_id: 101 }.to_sql();
        assert_eq!(
            sql,
            "SELECT * FROM users WHERE id = 101;\nSELECT * FROM products WHERE seller_id = 101;"
        );
        assert_eq!(sql.matches("101").count(), 2);
    }

    #[test]
    fn test_insert_statement() {
        let sql = QueryEvent::InsertListing(bike_row()).to_sql();
        assert_eq!(
            sql,
            "INSERT INTO products (seller_id, title, description, price, original_price, category, status, location, publish_date) \n\
             VALUES (101, 'Bike', 'Used bike in good co...', 600.00, 1200.00, 'TRANSPORT', 'ON_SALE', '北区宿舍楼下', NOW());"
        );
    }

    #[test]
    fn test_preview_counts_characters() {
        let text = "考研结束出。屏幕无划痕，带类纸膜。送保护壳。适合记笔记和画画。";
        assert_eq!(preview_description(text), "考研结束出。屏幕无划痕，带类纸膜。送保护...");
        assert_eq!(preview_description("short"), "short...");
    }

    #[test]
    fn test_quotes_are_escaped() {
        let mut row = bike_row();
        row.title = "Tom's bike".to_string();
        let sql = QueryEvent::InsertListing(row).to_sql();
        assert!(sql.contains("'Tom''s bike'"));
    }
}
