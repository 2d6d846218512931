//! AI helpers for the sell form: `assist` and `estimate`.
//!
//! Both always return text. Assistant failures turn into fallback messages
//! inside [`ListingAssistant`](unitrade_assist::ListingAssistant), never into errors.

use tracing::debug;

use crate::error::ApiError;
use crate::state::MarketState;

/// Shown when `assist` runs before the title and price are filled in.
pub const NEED_TITLE_AND_PRICE: &str = "请先填写标题和价格，以便AI生成更准确的描述。";

fn no_form() -> ApiError {
    ApiError::validation("No listing in progress; run `sell` first")
}

/// Drafts a description into the form, then asks for a price range.
pub async fn assist(state: &mut MarketState) -> Result<String, ApiError> {
    let form = state.form.as_mut().ok_or_else(no_form)?;

    let price = match form.price {
        Some(price) if !form.title.trim().is_empty() => price,
        _ => return Err(ApiError::validation(NEED_TITLE_AND_PRICE)),
    };

    debug!(title = %form.title, "Drafting description");
    let description = state
        .assistant
        .draft_description(&form.title, form.category, price)
        .await;
    form.description = description;

    form.price_estimate = state
        .assistant
        .estimate_price(&form.title, form.category)
        .await;

    let mut out = format!("详细描述  {}", form.description);
    if let Some(estimate) = &form.price_estimate {
        out.push_str(&format!("\nAI建议参考价: {}", estimate));
    }
    Ok(out)
}

/// Asks only for a price range. Needs a title.
pub async fn estimate(state: &mut MarketState) -> Result<String, ApiError> {
    let form = state.form.as_mut().ok_or_else(no_form)?;
    if form.title.trim().is_empty() {
        return Err(ApiError::validation("title is required"));
    }

    form.price_estimate = state
        .assistant
        .estimate_price(&form.title, form.category)
        .await;

    Ok(match &form.price_estimate {
        Some(estimate) => format!("AI建议参考价: {}", estimate),
        None => "暂无参考价".to_string(),
    })
}
