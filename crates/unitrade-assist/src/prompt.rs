//! Prompt templates.

use unitrade_core::{Category, Money};

/// Asks for a short, sincere listing description in Chinese.
pub fn description_prompt(title: &str, category: Category, price: Money) -> String {
    format!(
        "你是一个校园二手交易助手。请根据以下信息，生成一段吸引人的商品描述（中文，100字以内）。\n\
         语气要诚恳、适合大学生，突出性价比。\n\
         \n\
         商品标题: {title}\n\
         分类: {category}\n\
         售价: {price}\n"
    )
}

/// Asks for a bare second-hand price range such as `50-100`.
pub fn price_estimate_prompt(title: &str, category: Category) -> String {
    format!(
        "请根据商品 \"{title}\" (分类: {category}) 估算一个合理的二手价格范围（人民币）。\n\
         仅返回价格范围数字，例如 \"50-100\"。不要其他文字。\n"
    )
}
