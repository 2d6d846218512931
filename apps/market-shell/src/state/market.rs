//! # Market State
//!
//! Everything the prompt loop mutates: the session, the browse filter and
//! the sell form in progress.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  MarketState (owned by the prompt loop, passed as &mut)                 │
//! │                                                                         │
//! │  ┌────────────────┐ ┌────────────────┐ ┌────────────────┐ ┌──────────┐  │
//! │  │ MarketSession  │ │ ListingFilter  │ │ SellForm       │ │ Listing  │  │
//! │  │ catalog + log  │ │ search + cat.  │ │ draft fields   │ │ Assistant│  │
//! │  └────────────────┘ └────────────────┘ └────────────────┘ └──────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use unitrade_assist::ListingAssistant;
use unitrade_core::seed;
use unitrade_core::{
    Catalog, Category, CategoryFilter, CoreResult, ListingDraft, ListingFilter, MarketSession,
    Money, QueryLog,
};

use super::config::ShellConfig;

// =============================================================================
// Sell Form
// =============================================================================

/// Fields typed into the sell page so far.
///
/// Prices are parsed when set, so a bad amount is rejected immediately;
/// missing required fields are only reported on submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SellForm {
    pub title: String,
    pub description: String,
    pub price: Option<Money>,
    pub original_price: Option<Money>,
    pub category: Category,
    pub location: String,
    /// Last price range suggested by the assistant.
    pub price_estimate: Option<String>,
}

impl SellForm {
    pub fn to_draft(&self) -> ListingDraft {
        ListingDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            price: self.price,
            original_price: self.original_price,
            category: self.category,
            location: Some(self.location.clone()).filter(|l| !l.trim().is_empty()),
            images: Vec::new(),
        }
    }
}

// =============================================================================
// Market State
// =============================================================================

pub struct MarketState {
    pub session: MarketSession,
    pub filter: ListingFilter,
    pub form: Option<SellForm>,
    pub assistant: ListingAssistant,
}

impl MarketState {
    pub fn new(session: MarketSession, assistant: ListingAssistant) -> Self {
        MarketState {
            session,
            filter: ListingFilter::all(),
            form: None,
            assistant,
        }
    }

    /// Builds the session described by `config`.
    ///
    /// ## Errors
    /// `CoreError::UserNotFound` when the configured user does not exist.
    pub fn from_config(config: &ShellConfig) -> CoreResult<Self> {
        let listings = if config.market.seed_demo_data {
            seed::demo_listings()
        } else {
            Vec::new()
        };

        let catalog =
            Catalog::with_listings(listings).with_default_location(&config.market.default_location);

        let log = match config.log.max_entries {
            Some(max) => QueryLog::with_capacity_limit(max),
            None => QueryLog::new(),
        };

        // User reference data is loaded even when demo listings are not.
        let session = MarketSession::new(
            catalog,
            log,
            seed::demo_users(),
            config.market.current_user_id,
        )?;

        Ok(Self::new(session, ListingAssistant::from_config(&config.assist)))
    }

    pub fn set_search(&mut self, term: &str) {
        self.filter = ListingFilter::new(term, self.filter.category());
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.filter = ListingFilter::new(self.filter.search_term(), category);
    }
}
