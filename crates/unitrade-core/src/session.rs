//! # Market Session
//!
//! Owns the catalog, the query log and the user directory for one run of
//! the storefront, and turns user actions into log entries.
//!
//! ## Event Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  start()              ──► [INIT]         (only while the log is empty)  │
//! │  navigate(Home)       ──► [NAVIGATE]     products LIMIT 20              │
//! │  navigate(Profile)    ──► [NAVIGATE]     users + products by seller     │
//! │  navigate(Sell)       ──► (nothing)                                     │
//! │  add_listing(draft)   ──► [INSERT_ITEM]  then page = Home (no NAVIGATE) │
//! │  browse(filter)       ──► (nothing, pure)                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::filter::ListingFilter;
use crate::query_log::QueryLog;
use crate::seed::UserDirectory;
use crate::sql::{InsertedListing, QueryEvent};
use crate::types::{Listing, ListingDraft, Page, User};
use crate::viewer::LogViewer;

/// What the profile page shows.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView<'a> {
    pub user: &'a User,
    pub listings: Vec<&'a Listing>,
}

impl ProfileView<'_> {
    /// Listings still on sale.
    pub fn active_count(&self) -> usize {
        self.listings.iter().filter(|l| l.is_available()).count()
    }
}

pub struct MarketSession {
    catalog: Catalog,
    log: QueryLog,
    users: UserDirectory,
    current_user_id: i64,
    page: Page,
}

impl MarketSession {
    /// Creates a session for `current_user_id`.
    ///
    /// ## Errors
    /// `CoreError::UserNotFound` when the user is not in `users`.
    pub fn new(
        catalog: Catalog,
        log: QueryLog,
        users: UserDirectory,
        current_user_id: i64,
    ) -> CoreResult<Self> {
        if !users.contains(current_user_id) {
            return Err(CoreError::UserNotFound(current_user_id));
        }

        Ok(MarketSession {
            catalog,
            log,
            users,
            current_user_id,
            page: Page::Home,
        })
    }

    /// Records `INIT` on first load. Calling it again is a no-op.
    pub fn start(&mut self) {
        if self.log.is_empty() {
            self.log.record_event(QueryEvent::Init);
            info!(listings = self.catalog.len(), "Market session started");
        }
    }

    /// Switches page and records the read queries that page would run.
    pub fn navigate(&mut self, page: Page) {
        debug!(from = %self.page, to = %page, "Navigating");
        self.page = page;

        match page {
            Page::Home => {
                self.log.record_event(QueryEvent::BrowseListings);
            }
            Page::Profile => {
                self.log.record_event(QueryEvent::ViewProfile {
                    user_id: self.current_user_id,
                });
            }
            Page::Sell => {}
        }
    }

    /// Publishes a listing for the current user, dated today.
    pub fn add_listing(&mut self, draft: ListingDraft) -> CoreResult<Listing> {
        self.add_listing_on(draft, Local::now().date_naive())
    }

    /// Like [`MarketSession::add_listing`] with an explicit publish date.
    ///
    /// On failure nothing is stored, nothing is logged and the page stays.
    pub fn add_listing_on(&mut self, draft: ListingDraft, today: NaiveDate) -> CoreResult<Listing> {
        let listing = self
            .catalog
            .add_listing(self.current_user_id, draft, today)?;

        self.log
            .record_event(QueryEvent::InsertListing(InsertedListing::from(&listing)));
        self.page = Page::Home;

        Ok(listing)
    }

    pub fn browse(&self, filter: &ListingFilter) -> Vec<&Listing> {
        self.catalog.filtered(filter)
    }

    pub fn profile(&self) -> CoreResult<ProfileView<'_>> {
        let user = self
            .users
            .get(self.current_user_id)
            .ok_or(CoreError::UserNotFound(self.current_user_id))?;

        Ok(ProfileView {
            user,
            listings: self.catalog.listings_by_seller(self.current_user_id),
        })
    }

    /// `None` when the seller is not in the directory.
    pub fn seller_of(&self, listing: &Listing) -> Option<&User> {
        self.users.get(listing.seller_id)
    }

    pub fn current_user(&self) -> Option<&User> {
        self.users.get(self.current_user_id)
    }

    pub fn current_user_id(&self) -> i64 {
        self.current_user_id
    }

    pub fn log_viewer(&self) -> LogViewer<'_> {
        LogViewer::new(&self.log)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn log(&self) -> &QueryLog {
        &self.log
    }

    pub fn users(&self) -> &UserDirectory {
        &self.users
    }

    pub fn page(&self) -> Page {
        self.page
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::CategoryFilter;
    use crate::money::Money;
    use crate::seed::{self, CURRENT_USER_ID};
    use crate::types::Category;

    fn session() -> MarketSession {
        let catalog = Catalog::with_listings(seed::demo_listings());
        MarketSession::new(catalog, QueryLog::new(), seed::demo_users(), CURRENT_USER_ID).unwrap()
    }

    fn actions(session: &MarketSession) -> Vec<String> {
        session.log().entries().map(|e| e.action.clone()).collect()
    }

    #[test]
    fn test_unknown_user_is_rejected() {
        let result = MarketSession::new(Catalog::new(), QueryLog::new(), seed::demo_users(), 999);
        assert!(matches!(result, Err(CoreError::UserNotFound(999))));
    }

    #[test]
    fn test_start_records_init_once() {
        let mut session = session();
        session.start();
        session.start();
        assert_eq!(actions(&session), vec!["INIT"]);
    }

    #[test]
    fn test_navigation_logging() {
        let mut session = session();
        session.start();
        session.navigate(Page::Home);
        session.navigate(Page::Sell);
        session.navigate(Page::Profile);

        assert_eq!(actions(&session), vec!["NAVIGATE", "NAVIGATE", "INIT"]);
        assert_eq!(session.page(), Page::Profile);

        let profile_sql = session.log().latest().unwrap().query();
        assert_eq!(profile_sql.matches("101").count(), 2);
    }

    #[test]
    fn test_repeated_navigation_is_not_deduplicated() {
        let mut session = session();
        session.navigate(Page::Home);
        session.navigate(Page::Home);
        assert_eq!(session.log().len(), 2);
    }

    #[test]
    fn test_add_listing_logs_insert_and_returns_home() {
        let mut session = session();
        session.start();
        session.navigate(Page::Sell);

        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let draft = ListingDraft::new("Bike", "Used bike in good condition", Money::from_yuan(600))
            .with_category(Category::Transport);
        let listing = session.add_listing_on(draft, today).unwrap();

        assert_eq!(listing.id, 4);
        assert_eq!(listing.seller_id, CURRENT_USER_ID);
        assert_eq!(session.catalog().listings()[0].id, 4);
        assert_eq!(session.page(), Page::Home);
        assert_eq!(actions(&session), vec!["INSERT_ITEM", "INIT"]);

        let sql = session.log().latest().unwrap().query();
        assert!(sql.contains("'Used bike in good co...'"));
        assert!(sql.contains("'TRANSPORT'"));
    }

    #[test]
    fn test_failed_listing_changes_nothing() {
        let mut session = session();
        session.start();
        session.navigate(Page::Sell);

        let mut draft = ListingDraft::new("", "desc", Money::from_yuan(1));
        draft.title.clear();
        assert!(session.add_listing(draft).is_err());

        assert_eq!(session.catalog().len(), 3);
        assert_eq!(actions(&session), vec!["INIT"]);
        assert_eq!(session.page(), Page::Sell);
    }

    #[test]
    fn test_browse_is_pure() {
        let mut session = session();
        session.start();
        let hits = session.browse(&ListingFilter::new("ipad", CategoryFilter::All));
        assert_eq!(hits.len(), 1);
        assert_eq!(session.log().len(), 1);
    }

    #[test]
    fn test_profile_lists_own_listings() {
        let mut session = session();
        assert!(session.profile().unwrap().listings.is_empty());

        session
            .add_listing(ListingDraft::new("Lamp", "Desk lamp", Money::from_yuan(30)))
            .unwrap();

        let profile = session.profile().unwrap();
        assert_eq!(profile.user.username, "隔壁老王_CS");
        assert_eq!(profile.listings.len(), 1);
        assert_eq!(profile.active_count(), 1);
    }

    #[test]
    fn test_seller_lookup() {
        let session = session();
        let ipad = session.catalog().get(1).unwrap();
        assert_eq!(session.seller_of(ipad).unwrap().id, 102);

        let mut orphan = ipad.clone();
        orphan.seller_id = 7;
        assert!(session.seller_of(&orphan).is_none());
    }

    #[test]
    fn test_empty_catalog_first_listing_is_one() {
        let mut session =
            MarketSession::new(Catalog::new(), QueryLog::new(), seed::demo_users(), CURRENT_USER_ID)
                .unwrap();
        let listing = session
            .add_listing(ListingDraft::new("Pen", "Blue pen", Money::from_yuan(2)))
            .unwrap();
        assert_eq!(listing.id, 1);
    }
}
