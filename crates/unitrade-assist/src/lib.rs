//! # unitrade-assist: Listing Assistant
//!
//! Optional help for the sell form: a drafted description and a rough
//! second-hand price range, both produced by a hosted text-generation
//! service.
//!
//! The service is a convenience, never a dependency. Missing credentials,
//! network failures and empty replies all degrade to fixed fallback text,
//! so callers never see an error from [`ListingAssistant`].
//!
//! ## Example
//! ```rust,no_run
//! use unitrade_assist::{AssistConfig, ListingAssistant};
//! use unitrade_core::{Category, Money};
//!
//! # async fn demo() {
//! let mut config = AssistConfig::default();
//! config.apply_env_overrides();
//!
//! let assistant = ListingAssistant::from_config(&config);
//! let text = assistant
//!     .draft_description("捷安特山地车", Category::Transport, Money::from_yuan(600))
//!     .await;
//! println!("{text}");
//! # }
//! ```

pub mod assistant;
pub mod client;
pub mod config;
pub mod error;
pub mod prompt;

pub use assistant::ListingAssistant;
pub use client::{BoxedGenerator, GeminiClient, TextGenerator};
pub use config::AssistConfig;
pub use error::{AssistConfigError, ExternalServiceError};
