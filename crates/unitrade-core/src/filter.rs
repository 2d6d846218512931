//! # Filter View
//!
//! Derives the visible subset of the catalog from a search box and a
//! category selector.
//!
//! ```text
//! passes(listing) =
//!     (term is empty  OR  lower(title) ∋ lower(term)  OR  lower(description) ∋ lower(term))
//!  && (category is All  OR  listing.category == selected)
//! ```
//!
//! Pure: no side effects, no log entries. Output keeps source order and
//! borrows from the source, so a filter can be applied to its own output.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::types::{Category, Listing};

// =============================================================================
// Category Filter
// =============================================================================

/// Category selector: the sentinel "all" or one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(selected) => *selected == category,
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        CategoryFilter::Only(category)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("all"),
            CategoryFilter::Only(category) => f.write_str(category.code()),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") || s == "全部" {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

// =============================================================================
// Listing Filter
// =============================================================================

/// Search term plus category selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFilter {
    search_term: String,
    needle: String,
    category: CategoryFilter,
}

impl ListingFilter {
    pub fn new(search_term: impl Into<String>, category: CategoryFilter) -> Self {
        let search_term = search_term.into();
        let needle = search_term.to_lowercase();
        ListingFilter {
            search_term,
            needle,
            category,
        }
    }

    /// Matches every listing.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn category(&self) -> CategoryFilter {
        self.category
    }

    /// True when neither the search term nor the category narrows anything.
    pub fn is_unrestricted(&self) -> bool {
        self.needle.is_empty() && self.category == CategoryFilter::All
    }

    pub fn matches(&self, listing: &Listing) -> bool {
        let matches_search = self.needle.is_empty()
            || listing.title.to_lowercase().contains(&self.needle)
            || listing.description.to_lowercase().contains(&self.needle);

        matches_search && self.category.matches(listing.category)
    }

    /// Keeps the listings that pass, in source order.
    pub fn apply<'a, I>(&self, listings: I) -> Vec<&'a Listing>
    where
        I: IntoIterator<Item = &'a Listing>,
    {
        listings.into_iter().filter(|l| self.matches(l)).collect()
    }
}

/// Free-function form of [`ListingFilter::apply`].
///
/// ```rust
/// use unitrade_core::filter::{filter_listings, CategoryFilter};
/// use unitrade_core::seed;
///
/// let listings = seed::demo_listings();
/// let hits = filter_listings(&listings, "ipad", CategoryFilter::All);
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].id, 1);
/// ```
pub fn filter_listings<'a>(
    listings: &'a [Listing],
    search_term: &str,
    category: CategoryFilter,
) -> Vec<&'a Listing> {
    ListingFilter::new(search_term, category).apply(listings)
}

// =============================================================================
// Unit Tests
// =============================================================================
