//! # Catalog Store
//!
//! Holds the current set of listings, most recently added first.
//!
//! ## Add Listing Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Catalog::add_listing                                 │
//! │                                                                         │
//! │  ListingDraft ──► validate title ──► validate price ──► validate desc   │
//! │                        │                  │                  │          │
//! │                        └──── any error ───┴──► ValidationError          │
//! │                                               (catalog untouched)       │
//! │                                                                         │
//! │  id = max(existing ids) + 1      (1 when the catalog is empty)          │
//! │  view_count = 0, status = ON_SALE, publish_date = today                 │
//! │                                                                         │
//! │  listings.insert(0, listing)     (most-recently-added first)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The store never deletes or edits a listing, so `max + 1` is always
//! strictly greater than every identifier handed out before.

use chrono::NaiveDate;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::filter::ListingFilter;
use crate::types::{ItemStatus, Listing, ListingDraft};
use crate::validation::{
    validate_description, validate_location, validate_original_price, validate_price,
    validate_title,
};
use crate::DEFAULT_LOCATION;

/// In-memory listing collection.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Most-recently-added first.
    listings: Vec<Listing>,

    /// Used when a draft leaves the location blank.
    default_location: String,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::with_listings(Vec::new())
    }

    /// Creates a catalog from existing listings, kept in the given order.
    pub fn with_listings(listings: Vec<Listing>) -> Self {
        Catalog {
            listings,
            default_location: DEFAULT_LOCATION.to_string(),
        }
    }

    /// Overrides the fallback hand-over location.
    pub fn with_default_location(mut self, location: impl Into<String>) -> Self {
        self.default_location = location.into();
        self
    }

    /// All listings, most recently added first.
    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&Listing> {
        self.listings.iter().find(|l| l.id == id)
    }

    /// Like [`Catalog::get`], but a missing listing is an error.
    pub fn require(&self, id: i64) -> CoreResult<&Listing> {
        self.get(id).ok_or(CoreError::ListingNotFound(id))
    }

    /// Listings posted by one seller, in catalog order.
    pub fn listings_by_seller(&self, seller_id: i64) -> Vec<&Listing> {
        self.listings
            .iter()
            .filter(|l| l.seller_id == seller_id)
            .collect()
    }

    /// Listings passing `filter`, in catalog order.
    pub fn filtered(&self, filter: &ListingFilter) -> Vec<&Listing> {
        filter.apply(&self.listings)
    }

    /// The identifier the next listing will receive.
    ///
    /// An empty catalog starts at 1.
    pub fn next_id(&self) -> i64 {
        self.listings.iter().map(|l| l.id).max().unwrap_or(0) + 1
    }

    /// Validates `draft` and prepends the resulting listing.
    ///
    /// ## Errors
    /// `CoreError::Validation` when title, price or description is absent,
    /// or a field breaks a schema limit. Nothing is stored in that case.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::NaiveDate;
    /// use unitrade_core::{Catalog, ListingDraft, Money};
    ///
    /// let mut catalog = Catalog::new();
    /// let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    /// let draft = ListingDraft::new("Bike", "Used bike in good condition", Money::from_yuan(600));
    ///
    /// let listing = catalog.add_listing(101, draft, today).unwrap();
    /// assert_eq!(listing.id, 1);
    /// assert_eq!(listing.view_count, 0);
    /// assert_eq!(catalog.listings()[0].id, 1);
    /// ```
    pub fn add_listing(
        &mut self,
        seller_id: i64,
        draft: ListingDraft,
        today: NaiveDate,
    ) -> CoreResult<Listing> {
        let title = validate_title(&draft.title)?;
        let price = validate_price(draft.price)?;
        let description = validate_description(&draft.description)?;
        let original_price = validate_original_price(draft.original_price)?;
        let location = validate_location(draft.location.as_deref(), &self.default_location)?;

        let images = if draft.images.is_empty() {
            vec![mock_image_url()]
        } else {
            draft.images
        };

        let listing = Listing {
            id: self.next_id(),
            seller_id,
            title,
            description,
            price,
            original_price,
            category: draft.category,
            images,
            status: ItemStatus::Available,
            publish_date: today,
            view_count: 0,
            location,
        };

        debug!(id = listing.id, seller_id, "Prepending listing to catalog");
        self.listings.insert(0, listing.clone());

        info!(
            id = listing.id,
            category = listing.category.code(),
            price = %listing.price,
            "Listing created"
        );

        Ok(listing)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

/// Placeholder image for listings posted without photos.
fn mock_image_url() -> String {
    format!(
        "https://picsum.photos/seed/{}/400/300",
        Uuid::new_v4().simple()
    )
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::money::Money;
    use crate::seed;
    use crate::types::Category;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn bike() -> ListingDraft {
        ListingDraft::new("Bike", "Used bike in good condition", Money::from_yuan(600))
    }

    #[test]
    fn test_empty_catalog_starts_at_one() {
        let mut catalog = Catalog::new();
        assert_eq!(catalog.next_id(), 1);

        let listing = catalog.add_listing(101, bike(), today()).unwrap();
        assert_eq!(listing.id, 1);
    }

    #[test]
    fn test_add_listing_after_seed_gets_max_plus_one() {
        let mut catalog = Catalog::with_listings(seed::demo_listings());
        let listing = catalog.add_listing(101, bike(), today()).unwrap();

        assert_eq!(listing.id, 4);
        assert_eq!(listing.view_count, 0);
        assert_eq!(listing.publish_date, today());
        assert_eq!(listing.status, ItemStatus::Available);
        assert_eq!(listing.seller_id, 101);
        assert_eq!(catalog.listings()[0], listing);
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn test_next_id_uses_max_not_position() {
        let mut listings = seed::demo_listings();
        listings[0].id = 42;
        let catalog = Catalog::with_listings(listings);
        assert_eq!(catalog.next_id(), 43);
    }

    #[test]
    fn test_ids_strictly_increase() {
        let mut catalog = Catalog::with_listings(seed::demo_listings());
        let mut previous = catalog.listings().iter().map(|l| l.id).max().unwrap();

        for i in 0..5 {
            let draft = ListingDraft::new(format!("Item {i}"), "desc", Money::from_yuan(i));
            let listing = catalog.add_listing(101, draft, today()).unwrap();
            assert!(listing.id > previous);
            assert_eq!(listing.view_count, 0);
            previous = listing.id;
        }
    }

    #[test]
    fn test_missing_required_fields_are_rejected() {
        let mut catalog = Catalog::with_listings(seed::demo_listings());

        let mut no_title = bike();
        no_title.title = "  ".into();
        let mut no_price = bike();
        no_price.price = None;
        let mut no_description = bike();
        no_description.description.clear();

        for (draft, field) in [
            (no_title, "title"),
            (no_price, "price"),
            (no_description, "description"),
        ] {
            let err = catalog.add_listing(101, draft, today()).unwrap_err();
            match err {
                CoreError::Validation(ValidationError::Required { field: f }) => {
                    assert_eq!(f, field)
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.next_id(), 4);
    }

    #[test]
    fn test_defaults_are_filled_in() {
        let mut catalog = Catalog::new().with_default_location("东门");
        let listing = catalog.add_listing(101, bike(), today()).unwrap();

        assert_eq!(listing.location, "东门");
        assert_eq!(listing.original_price, Money::zero());
        assert_eq!(listing.category, Category::Other);
        assert_eq!(listing.images.len(), 1);
        assert!(listing.images[0].starts_with("https://picsum.photos/seed/"));
    }

    #[test]
    fn test_supplied_images_are_kept() {
        let mut catalog = Catalog::new();
        let mut draft = bike();
        draft.images = vec!["https://example.com/bike.jpg".into()];

        let listing = catalog.add_listing(101, draft, today()).unwrap();
        assert_eq!(listing.cover_image(), Some("https://example.com/bike.jpg"));
    }

    #[test]
    fn test_listings_by_seller() {
        let catalog = Catalog::with_listings(seed::demo_listings());
        let ids: Vec<i64> = catalog.listings_by_seller(102).iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(catalog.listings_by_seller(101).is_empty());
    }

    #[test]
    fn test_require_missing_listing() {
        let catalog = Catalog::new();
        assert!(matches!(catalog.require(7), Err(CoreError::ListingNotFound(7))));
    }
}
