//! # Listing Assistant
//!
//! Wraps a [`TextGenerator`] and never fails: every error becomes fallback
//! text (descriptions) or no answer (price estimates).
//!
//! ```text
//! draft_description ─┬─ no generator ──► "请配置 API KEY ..."
//!                    ├─ Err(EmptyResponse) ─► "无法生成描述，请重试。"
//!                    ├─ Err(other) ─────────► "AI 服务暂时不可用。"
//!                    └─ Ok(text) ───────────► text
//! ```

use tracing::{error, warn};
use unitrade_core::{Category, Money};

use crate::client::{BoxedGenerator, GeminiClient, TextGenerator};
use crate::config::AssistConfig;
use crate::error::ExternalServiceError;
use crate::prompt::{description_prompt, price_estimate_prompt};

pub const MISSING_KEY_MESSAGE: &str = "请配置 API KEY 以使用 AI 描述生成功能。";
pub const SERVICE_UNAVAILABLE_MESSAGE: &str = "AI 服务暂时不可用。";
pub const EMPTY_REPLY_MESSAGE: &str = "无法生成描述，请重试。";

/// Description and price-range helper for the sell form.
pub struct ListingAssistant<G = BoxedGenerator> {
    generator: Option<G>,
}

impl ListingAssistant {
    /// Builds a Gemini-backed assistant from configuration.
    ///
    /// A missing key or a client that cannot be built yields an assistant
    /// that only answers with fallback text.
    pub fn from_config(config: &AssistConfig) -> Self {
        match GeminiClient::from_config(config) {
            Ok(client) => Self::new(Box::new(client)),
            Err(ExternalServiceError::MissingCredentials) => {
                warn!("API key not found; listing assistant disabled");
                Self::disabled()
            }
            Err(e) => {
                error!(error = %e, "Failed to build text-generation client");
                Self::disabled()
            }
        }
    }
}

impl<G: TextGenerator> ListingAssistant<G> {
    pub fn new(generator: G) -> Self {
        ListingAssistant {
            generator: Some(generator),
        }
    }

    pub fn disabled() -> Self {
        ListingAssistant { generator: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.generator.is_some()
    }

    /// A short selling description, or fallback text.
    pub async fn draft_description(&self, title: &str, category: Category, price: Money) -> String {
        let Some(generator) = &self.generator else {
            return MISSING_KEY_MESSAGE.to_string();
        };

        let prompt = description_prompt(title, category, price);
        match generator.generate_text(&prompt).await {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) | Err(ExternalServiceError::EmptyResponse) => EMPTY_REPLY_MESSAGE.to_string(),
            Err(e) => {
                error!(error = %e, "AI generation error");
                SERVICE_UNAVAILABLE_MESSAGE.to_string()
            }
        }
    }

    /// A price range like `50-100`, or `None` on any failure.
    pub async fn estimate_price(&self, title: &str, category: Category) -> Option<String> {
        let generator = self.generator.as_ref()?;

        let prompt = price_estimate_prompt(title, category);
        match generator.generate_text(&prompt).await {
            Ok(text) => Some(text.trim().to_string()).filter(|t| !t.is_empty()),
            Err(e) => {
                warn!(error = %e, "Price estimate unavailable");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crate::error::AssistResult;
    use std::sync::Mutex;

    /// Replays canned replies and remembers the prompts it saw.
    struct StubGenerator {
        reply: fn() -> AssistResult<String>,
        prompts: Mutex<Vec<String>>,
    }

    impl StubGenerator {
        fn new(reply: fn() -> AssistResult<String>) -> Self {
            StubGenerator {
                reply,
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for StubGenerator {
        async fn generate_text(&self, prompt: &str) -> AssistResult<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            (self.reply)()
        }
    }

    fn price() -> Money {
        Money::from_yuan(600)
    }

    #[tokio::test]
    async fn test_disabled_assistant_asks_for_key() {
        let assistant: ListingAssistant<StubGenerator> = ListingAssistant::disabled();
        let text = assistant
            .draft_description("Bike", Category::Transport, price())
            .await;
        assert_eq!(text, MISSING_KEY_MESSAGE);
        assert_eq!(assistant.estimate_price("Bike", Category::Transport).await, None);
    }

    #[tokio::test]
    async fn test_successful_description_is_trimmed() {
        let assistant = ListingAssistant::new(StubGenerator::new(|| Ok("  九成新，骑行顺畅。\n".into())));
        let text = assistant
            .draft_description("捷安特山地车", Category::Transport, price())
            .await;
        assert_eq!(text, "九成新，骑行顺畅。");

        let prompts = assistant.generator.as_ref().unwrap().prompts.lock().unwrap().clone();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("捷安特山地车"));
    }

    #[tokio::test]
    async fn test_service_error_falls_back() {
        let assistant = ListingAssistant::new(StubGenerator::new(|| {
            Err(ExternalServiceError::Api {
                status: 503,
                message: "overloaded".into(),
            })
        }));
        let text = assistant.draft_description("Bike", Category::Other, price()).await;
        assert_eq!(text, SERVICE_UNAVAILABLE_MESSAGE);
        assert_eq!(assistant.estimate_price("Bike", Category::Other).await, None);
    }

    #[tokio::test]
    async fn test_empty_reply_falls_back() {
        let assistant = ListingAssistant::new(StubGenerator::new(|| Err(ExternalServiceError::EmptyResponse)));
        let text = assistant.draft_description("Bike", Category::Other, price()).await;
        assert_eq!(text, EMPTY_REPLY_MESSAGE);
    }

    #[tokio::test]
    async fn test_price_estimate() {
        let assistant = ListingAssistant::new(StubGenerator::new(|| Ok(" 50-100 \n".into())));
        assert_eq!(
            assistant.estimate_price("台灯", Category::Lifestyle).await.as_deref(),
            Some("50-100")
        );

        let blank = ListingAssistant::new(StubGenerator::new(|| Ok("   ".into())));
        assert_eq!(blank.estimate_price("台灯", Category::Lifestyle).await, None);
    }

    #[test]
    fn test_from_config_without_key_is_disabled() {
        let assistant = ListingAssistant::from_config(&AssistConfig::default());
        assert!(!assistant.is_enabled());
    }
}
