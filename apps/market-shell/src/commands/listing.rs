//! # Listing Commands
//!
//! Browsing the grid and filling in the sell form.
//!
//! ## Sell Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  sell ──► set title ... ──► set price ... ──► (assist) ──► submit       │
//! │                                                              │          │
//! │              ValidationError ◄── missing title/price/desc ───┤          │
//! │              (form kept, nothing logged)                     │          │
//! │                                                              ▼          │
//! │                              [INSERT_ITEM] logged, back to the grid     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt::Write as _;
use tracing::{debug, info};
use unitrade_core::validation::{parse_optional_price, validate_search_query};
use unitrade_core::{CategoryFilter, Listing, ListingFilter, MarketSession, Page, User};

use crate::error::ApiError;
use crate::state::{MarketState, SellForm};

/// Shown when the filter matches nothing.
pub const NO_RESULTS: &str = "没有找到相关商品，换个关键词试试？";

// =============================================================================
// Rendering
// =============================================================================

/// Shown when a listing's seller is not in the user directory.
pub const UNKNOWN_SELLER: &str = "未知卖家";

/// Card used by the grid and the profile page: price line, details line
/// with the seller, then the description.
pub fn render_card(listing: &Listing, seller: Option<&User>) -> String {
    let mut out = format!("#{:<3} {}  {}", listing.id, listing.title, listing.price);
    if !listing.original_price.is_zero() {
        let _ = write!(out, "  (原价 {})", listing.original_price);
    }
    let _ = write!(
        out,
        "\n     {} · {} · {} · {} · {} · 浏览 {}",
        seller.map_or(UNKNOWN_SELLER, |u| u.username.as_str()),
        listing.category.label(),
        listing.status.label(),
        listing.location,
        listing.publish_date,
        listing.view_count
    );
    let _ = write!(out, "\n     {}", listing.description);
    out
}

fn render_grid(session: &MarketSession, listings: &[&Listing], filter: &ListingFilter) -> String {
    let mut out = String::new();

    if !filter.is_unrestricted() {
        let _ = writeln!(
            out,
            "筛选: \"{}\" / {}",
            filter.search_term(),
            filter.category()
        );
    }

    if listings.is_empty() {
        out.push_str(NO_RESULTS);
        return out;
    }

    let cards: Vec<String> = listings
        .iter()
        .map(|l| render_card(l, session.seller_of(l)))
        .collect();
    out.push_str(&cards.join("\n"));
    out
}

fn render_form(form: &SellForm) -> String {
    let price = |p: Option<unitrade_core::Money>| p.map(|m| m.to_string()).unwrap_or_default();

    let mut out = String::from("发布闲置宝贝\n");
    let _ = writeln!(out, "  商品标题  {}", form.title);
    let _ = writeln!(out, "  分类      {} ({})", form.category.label(), form.category.code());
    let _ = writeln!(out, "  出手价    {}", price(form.price));
    if let Some(estimate) = &form.price_estimate {
        let _ = writeln!(out, "            AI建议参考价: {}", estimate);
    }
    let _ = writeln!(out, "  原价      {}", price(form.original_price));
    let _ = writeln!(out, "  交易地点  {}", form.location);
    let _ = write!(out, "  详细描述  {}", form.description);
    out
}

// =============================================================================
// Browsing
// =============================================================================

/// The grid under the current filter. Pure: nothing is logged.
pub fn browse(state: &MarketState) -> String {
    let listings = state.session.browse(&state.filter);
    render_grid(&state.session, &listings, &state.filter)
}

fn require_home(state: &MarketState) -> Result<(), ApiError> {
    if state.session.page() != Page::Home {
        return Err(ApiError::validation(
            "Search is only available on the listings page; run `home` first",
        ));
    }
    Ok(())
}

/// Sets the search term (blank clears it) and shows the result.
pub fn search(state: &mut MarketState, term: &str) -> Result<String, ApiError> {
    require_home(state)?;
    let term = validate_search_query(term)?;
    debug!(term = %term, "search command");

    state.set_search(&term);
    Ok(browse(state))
}

/// Sets the category selector (`all` clears it) and shows the result.
pub fn category(state: &mut MarketState, arg: &str) -> Result<String, ApiError> {
    require_home(state)?;
    let selected: CategoryFilter = arg.parse()?;
    debug!(category = %selected, "category command");

    state.set_category(selected);
    Ok(browse(state))
}

/// Full details of one listing.
pub fn show(state: &MarketState, arg: &str) -> Result<String, ApiError> {
    let id: i64 = arg
        .trim()
        .trim_start_matches('#')
        .parse()
        .map_err(|_| ApiError::validation(format!("Invalid listing id: '{}'", arg.trim())))?;

    let listing = state.session.catalog().require(id)?;
    let seller = state.session.seller_of(listing);

    let mut out = render_card(listing, seller);
    let _ = write!(
        out,
        "\n\n卖家: {}",
        seller.map_or_else(
            || UNKNOWN_SELLER.to_string(),
            |u| format!("{} ({})", u.username, u.major)
        )
    );
    if let Some(savings) = listing.savings() {
        let _ = write!(out, "\n比原价省 {}", savings);
    }
    for image in &listing.images {
        let _ = write!(out, "\n图片: {}", image);
    }
    Ok(out)
}

// =============================================================================
// Sell Form
// =============================================================================

fn require_form(state: &mut MarketState) -> Result<&mut SellForm, ApiError> {
    state
        .form
        .as_mut()
        .ok_or_else(|| ApiError::validation("No listing in progress; run `sell` first"))
}

/// Updates one form field.
pub fn set_field(state: &mut MarketState, field: &str, value: &str) -> Result<String, ApiError> {
    let form = require_form(state)?;
    let value = value.trim();

    match field.to_lowercase().as_str() {
        "title" => form.title = value.to_string(),
        "desc" | "description" => form.description = value.to_string(),
        "price" => form.price = parse_optional_price("price", value)?,
        "original" | "original_price" => {
            form.original_price = parse_optional_price("original_price", value)?
        }
        "category" => form.category = value.parse()?,
        "location" => form.location = value.to_string(),
        other => {
            return Err(ApiError::validation(format!(
                "Unknown field '{}'; expected title, desc, price, original, category or location",
                other
            )))
        }
    }

    Ok(render_form(form))
}

pub fn show_form(state: &mut MarketState) -> Result<String, ApiError> {
    let form = require_form(state)?;
    Ok(render_form(form))
}

/// Publishes the form as a new listing and returns to the grid.
///
/// On a validation error the form is kept so the user can fix it.
pub fn submit(state: &mut MarketState) -> Result<String, ApiError> {
    let draft = require_form(state)?.to_draft();

    let listing = state.session.add_listing(draft)?;
    info!(id = listing.id, "Listing published from shell");

    state.form = None;
    state.filter = ListingFilter::all();

    Ok(format!("发布成功: #{} {}\n\n{}", listing.id, listing.title, browse(state)))
}
