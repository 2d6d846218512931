//! # State Module
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────┐        ┌──────────────────────────────┐   │
//! │  │      ShellConfig         │ build  │        MarketState           │   │
//! │  │  market.toml + env       │ ─────► │  session, filter, form,      │   │
//! │  │  read-only after start   │        │  assistant                   │   │
//! │  └──────────────────────────┘        └──────────────────────────────┘   │
//! │                                                                         │
//! │  Single-threaded: the prompt loop owns MarketState and lends it to      │
//! │  one command at a time, so no Mutex is needed.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod market;

pub use config::{LogSettings, MarketSettings, ShellConfig, CONFIG_FILE_NAME};
pub use market::{MarketState, SellForm};
