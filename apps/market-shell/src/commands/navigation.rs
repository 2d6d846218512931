//! Page switches: `home`, `sell`, `profile`.
//!
//! Each one goes through [`MarketSession::navigate`](unitrade_core::MarketSession::navigate),
//! which decides what gets logged. Leaving the sell page discards the form.

use std::fmt::Write as _;
use unitrade_core::{ListingFilter, Page};

use super::listing::{browse, render_card};
use crate::error::ApiError;
use crate::state::{MarketState, SellForm};

fn switch_to(state: &mut MarketState, page: Page) {
    let previous = state.session.page();
    state.session.navigate(page);

    if page != Page::Sell {
        state.form = None;
    }
    // The grid keeps its filter only while it stays on screen.
    if page == Page::Home && previous != Page::Home {
        state.filter = ListingFilter::all();
    }
}

pub fn home(state: &mut MarketState) -> String {
    switch_to(state, Page::Home);
    browse(state)
}

pub fn sell(state: &mut MarketState) -> String {
    switch_to(state, Page::Sell);
    state.form = Some(SellForm::default());

    "发布闲置宝贝\n\
     Fill the form with `set <field> <value>` \
     (title, desc, price, original, category, location), \
     then `submit`. `assist` drafts a description."
        .to_string()
}

pub fn profile(state: &mut MarketState) -> Result<String, ApiError> {
    switch_to(state, Page::Profile);
    let view = state.session.profile()?;
    let user = view.user;

    let mut out = String::new();
    let _ = writeln!(out, "{}", user.username);
    let _ = writeln!(
        out,
        "学号 {} · {} · 加入于 {}",
        user.student_id, user.major, user.join_date
    );
    let _ = writeln!(
        out,
        "\n我的发布 ({}, 在售 {})",
        view.listings.len(),
        view.active_count()
    );

    if view.listings.is_empty() {
        out.push_str("暂无发布商品");
    } else {
        let cards: Vec<String> = view
            .listings
            .iter()
            .map(|l| render_card(l, Some(user)))
            .collect();
        out.push_str(&cards.join("\n"));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ShellConfig;

    fn state() -> MarketState {
        let mut state = MarketState::from_config(&ShellConfig::default()).unwrap();
        state.session.start();
        state
    }

    #[test]
    fn test_home_logs_browse_query() {
        let mut state = state();
        let text = home(&mut state);
        assert!(text.contains("iPad"));

        let latest = state.session.log().latest().unwrap();
        assert_eq!(latest.action, "NAVIGATE");
        assert_eq!(latest.query(), "SELECT * FROM products LIMIT 20;");
    }

    #[test]
    fn test_sell_opens_empty_form_without_logging() {
        let mut state = state();
        let text = sell(&mut state);
        assert!(text.starts_with("发布闲置宝贝"));
        assert_eq!(state.form, Some(SellForm::default()));
        assert_eq!(state.session.log().len(), 1);
        assert_eq!(state.session.page(), Page::Sell);
    }

    #[test]
    fn test_leaving_sell_discards_form() {
        let mut state = state();
        sell(&mut state);
        state.form.as_mut().unwrap().title = "Bike".into();
        profile(&mut state).unwrap();
        assert!(state.form.is_none());
    }

    #[test]
    fn test_profile_of_user_without_listings() {
        let mut state = state();
        let text = profile(&mut state).unwrap();
        assert!(text.starts_with("隔壁老王_CS"));
        assert!(text.contains("我的发布 (0, 在售 0)"));
        assert!(text.ends_with("暂无发布商品"));

        let latest = state.session.log().latest().unwrap();
        assert_eq!(latest.action, "NAVIGATE");
        assert!(latest.query().contains("WHERE seller_id = 101"));
    }

    #[test]
    fn test_returning_home_resets_filter() {
        let mut state = state();
        state.set_search("ipad");
        sell(&mut state);
        home(&mut state);
        assert!(state.filter.is_unrestricted());
    }
}
