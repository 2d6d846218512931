//! # Domain Types
//!
//! Core domain types used throughout the campus market.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      User       │   │     Listing     │   │  ListingDraft   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──│  seller_id      │   │  title          │       │
//! │  │  username       │   │  id (max + 1)   │   │  description    │       │
//! │  │  student_id     │   │  price (Money)  │   │  price?         │       │
//! │  │  major          │   │  status         │   │  category       │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Category     │   │   ItemStatus    │   │      Page       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  BOOKS ...      │   │  ON_SALE        │   │  Home           │       │
//! │  │  OTHER          │   │  SOLD_OUT       │   │  Sell           │       │
//! │  └─────────────────┘   │  RESERVED       │   │  Profile        │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Users are read-only reference data. Listings are created through
//! [`Catalog::add_listing`](crate::catalog::Catalog::add_listing) and never
//! edited afterwards.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Category
// =============================================================================

/// Closed set of listing classifications.
///
/// The serialized form is the schema's ENUM code (`ELECTRONICS`); the
/// label is what the storefront shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Books,
    Electronics,
    Lifestyle,
    Transport,
    Clothing,
    #[default]
    Other,
}

impl Category {
    /// Every category, in storefront order.
    pub const ALL: [Category; 6] = [
        Category::Books,
        Category::Electronics,
        Category::Lifestyle,
        Category::Transport,
        Category::Clothing,
        Category::Other,
    ];

    /// Schema ENUM code.
    pub const fn code(&self) -> &'static str {
        match self {
            Category::Books => "BOOKS",
            Category::Electronics => "ELECTRONICS",
            Category::Lifestyle => "LIFESTYLE",
            Category::Transport => "TRANSPORT",
            Category::Clothing => "CLOTHING",
            Category::Other => "OTHER",
        }
    }

    /// Display label.
    pub const fn label(&self) -> &'static str {
        match self {
            Category::Books => "书籍教材",
            Category::Electronics => "数码电子",
            Category::Lifestyle => "生活用品",
            Category::Transport => "代步工具",
            Category::Clothing => "衣物鞋帽",
            Category::Other => "其他",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Accepts the code (any case) or the label.
impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(s) || c.label() == s)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "category".to_string(),
                allowed: Category::ALL.iter().map(|c| c.code().to_string()).collect(),
            })
    }
}

// =============================================================================
// Item Status
// =============================================================================

/// Availability of a listing.
///
/// New listings always start as [`ItemStatus::Available`]; transitions are
/// not modeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ItemStatus {
    #[default]
    #[serde(rename = "ON_SALE")]
    Available,
    #[serde(rename = "SOLD_OUT")]
    Sold,
    #[serde(rename = "RESERVED")]
    Reserved,
}

impl ItemStatus {
    /// Schema ENUM code.
    pub const fn code(&self) -> &'static str {
        match self {
            ItemStatus::Available => "ON_SALE",
            ItemStatus::Sold => "SOLD_OUT",
            ItemStatus::Reserved => "RESERVED",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            ItemStatus::Available => "在售",
            ItemStatus::Sold => "已售出",
            ItemStatus::Reserved => "已预订",
        }
    }
}

// =============================================================================
// User
// =============================================================================

/// A registered student. Reference data only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub avatar: String,
    pub student_id: String,
    pub major: String,
    #[ts(as = "String")]
    pub join_date: NaiveDate,
}

// =============================================================================
// Listing
// =============================================================================

/// A single item offered for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    /// Unique, immutable, assigned as `max(existing) + 1`.
    pub id: i64,

    /// The selling user (not owned by the listing).
    pub seller_id: i64,

    pub title: String,

    pub description: String,

    /// Asking price.
    pub price: Money,

    /// Price when bought new; zero when the seller left it blank.
    pub original_price: Money,

    pub category: Category,

    /// Image references (URLs). Uploads are simulated.
    pub images: Vec<String>,

    pub status: ItemStatus,

    #[ts(as = "String")]
    pub publish_date: NaiveDate,

    pub view_count: u32,

    /// Hand-over spot, e.g. "图书馆门口".
    pub location: String,
}

impl Listing {
    /// First image, used as the card cover.
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    #[inline]
    pub fn is_available(&self) -> bool {
        self.status == ItemStatus::Available
    }

    /// Savings against the original price, when one was given.
    pub fn savings(&self) -> Option<Money> {
        self.price.savings_from(self.original_price)
    }
}

// =============================================================================
// Listing Draft
// =============================================================================

/// Caller-supplied fields of a new listing (the "sell" form).
///
/// Identifier, view count, publish date and status are assigned by the
/// catalog. `price` is optional here so that a missing price can be
/// reported as a validation error instead of being impossible to express.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ListingDraft {
    pub title: String,
    pub description: String,
    pub price: Option<Money>,
    pub original_price: Option<Money>,
    pub category: Category,
    pub location: Option<String>,
    pub images: Vec<String>,
}

impl ListingDraft {
    /// Creates a draft with the three required fields filled in.
    pub fn new(title: impl Into<String>, description: impl Into<String>, price: Money) -> Self {
        ListingDraft {
            title: title.into(),
            description: description.into(),
            price: Some(price),
            ..Default::default()
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_original_price(mut self, original_price: Money) -> Self {
        self.original_price = Some(original_price);
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

// =============================================================================
// Page
// =============================================================================

/// Storefront pages. Navigation between them is what the query log records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    /// The listings grid.
    #[default]
    Home,
    Sell,
    Profile,
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Page::Home => write!(f, "home"),
            Page::Sell => write!(f, "sell"),
            Page::Profile => write!(f, "profile"),
        }
    }
}

impl FromStr for Page {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "home" | "listings" | "browse" => Ok(Page::Home),
            "sell" => Ok(Page::Sell),
            "profile" | "me" => Ok(Page::Profile),
            _ => Err(ValidationError::NotAllowed {
                field: "page".to_string(),
                allowed: vec!["home".into(), "sell".into(), "profile".into()],
            }),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parsing() {
        assert_eq!("electronics".parse::<Category>().unwrap(), Category::Electronics);
        assert_eq!("BOOKS".parse::<Category>().unwrap(), Category::Books);
        assert_eq!("代步工具".parse::<Category>().unwrap(), Category::Transport);
        assert!(matches!(
            "furniture".parse::<Category>(),
            Err(ValidationError::NotAllowed { .. })
        ));
    }

    #[test]
    fn test_category_default_is_other() {
        assert_eq!(Category::default(), Category::Other);
    }

    #[test]
    fn test_status_serializes_as_schema_code() {
        let json = serde_json::to_string(&ItemStatus::Available).unwrap();
        assert_eq!(json, "\"ON_SALE\"");
        let json = serde_json::to_string(&ItemStatus::Sold).unwrap();
        assert_eq!(json, "\"SOLD_OUT\"");
        assert_eq!(ItemStatus::default(), ItemStatus::Available);
    }

    #[test]
    fn test_category_serializes_as_schema_code() {
        let json = serde_json::to_string(&Category::Electronics).unwrap();
        assert_eq!(json, "\"ELECTRONICS\"");
    }

    #[test]
    fn test_page_parsing() {
        assert_eq!("Listings".parse::<Page>().unwrap(), Page::Home);
        assert_eq!("sell".parse::<Page>().unwrap(), Page::Sell);
        assert_eq!("profile".parse::<Page>().unwrap(), Page::Profile);
        assert!("cart".parse::<Page>().is_err());
    }

    #[test]
    fn test_draft_builder() {
        let draft = ListingDraft::new("Bike", "Used bike", Money::from_yuan(600))
            .with_category(Category::Transport)
            .with_location("北区宿舍楼下");
        assert_eq!(draft.price, Some(Money::from_yuan(600)));
        assert_eq!(draft.category, Category::Transport);
        assert_eq!(draft.location.as_deref(), Some("北区宿舍楼下"));
        assert!(draft.original_price.is_none());
    }
}
