//! # unitrade-core: Domain Logic for the UniTrade Campus Market
//!
//! Catalog, query log, filters and SQL rendering for a second-hand market
//! where students list and browse used items. Everything lives in memory;
//! the "database" is a log of the SQL a real backend would have run.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       UniTrade Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  market-shell (interactive CLI)                 │   │
//! │  │   browse ──► sell ──► profile ──► sql logs / schema / er        │   │
//! │  └──────────────┬───────────────────────────────┬──────────────────┘   │
//! │                 │                               │                       │
//! │  ┌──────────────▼──────────────────┐  ┌─────────▼──────────────────┐   │
//! │  │   ★ unitrade-core (THIS) ★      │  │     unitrade-assist        │   │
//! │  │                                 │  │  description / price hints │   │
//! │  │  session ─► catalog ─► filter   │  │  (text-generation service) │   │
//! │  │     │                           │  └────────────────────────────┘   │
//! │  │     └────► query_log ─► viewer  │                                   │
//! │  │                                 │                                   │
//! │  │  NO NETWORK • NO DATABASE       │                                   │
//! │  └─────────────────────────────────┘                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (User, Listing, Category, Page)
//! - [`money`] - Prices in integer fen
//! - [`catalog`] - Listing store with `max + 1` identifiers
//! - [`filter`] - Search and category filtering
//! - [`sql`] - Simulated statements and their SQL text
//! - [`query_log`] - Newest-first log of simulated statements
//! - [`schema`] - Table DDL and the ER model
//! - [`viewer`] - Read-only developer panel
//! - [`session`] - Wires the above to user actions
//! - [`seed`] - Demo users and listings
//!
//! ## Example Usage
//!
//! ```rust
//! use unitrade_core::{seed, Catalog, ListingDraft, MarketSession, Money, Page, QueryLog};
//!
//! let catalog = Catalog::with_listings(seed::demo_listings());
//! let mut session =
//!     MarketSession::new(catalog, QueryLog::new(), seed::demo_users(), seed::CURRENT_USER_ID)
//!         .unwrap();
//!
//! session.start();
//! session.navigate(Page::Sell);
//! let listing = session
//!     .add_listing(ListingDraft::new("Bike", "Used bike in good condition", Money::from_yuan(600)))
//!     .unwrap();
//!
//! assert_eq!(listing.id, 4);
//! assert_eq!(session.log().latest().unwrap().action, "INSERT_ITEM");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod filter;
pub mod money;
pub mod query_log;
pub mod schema;
pub mod seed;
pub mod session;
pub mod sql;
pub mod types;
pub mod validation;
pub mod viewer;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::Catalog;
pub use error::{CoreError, CoreResult, ValidationError};
pub use filter::{CategoryFilter, ListingFilter};
pub use money::Money;
pub use query_log::{LogEntry, QueryLog};
pub use session::{MarketSession, ProfileView};
pub use sql::QueryEvent;
pub use types::*;
pub use viewer::{DevToolsTab, LogViewer};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Hand-over spot used when a listing leaves the location blank.
pub const DEFAULT_LOCATION: &str = "校内自提";

/// Maximum title length in characters (`VARCHAR(100)`).
pub const MAX_TITLE_CHARS: usize = 100;

/// Maximum location length in characters (`VARCHAR(100)`).
pub const MAX_LOCATION_CHARS: usize = 100;

/// Maximum search query length in characters.
pub const MAX_SEARCH_QUERY_CHARS: usize = 100;
