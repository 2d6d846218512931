//! # Shell Commands
//!
//! One handler per prompt command. Handlers take only the state they need
//! and return `Result<String, ApiError>`; the prompt loop prints either side.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs          ◄── You are here (parse + dispatch)
//! ├── navigation.rs   ◄── home, sell, profile
//! ├── listing.rs      ◄── search, category, show, set, form, submit
//! ├── assist.rs       ◄── assist, estimate
//! └── devtools.rs     ◄── sql, export-sql
//! ```
//!
//! ## Dispatch Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  "set price 600" ──► Command::parse ──► Command::Set { .. }             │
//! │                                              │                          │
//! │                                              ▼                          │
//! │                           dispatch(&mut MarketState, &ShellConfig, rt)  │
//! │                                              │                          │
//! │                        async handlers ──► rt.block_on(..)               │
//! │                                              │                          │
//! │                                              ▼                          │
//! │                          Outcome::Output(text) / Outcome::Quit          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod assist;
pub mod devtools;
pub mod listing;
pub mod navigation;

use tokio::runtime::Runtime;
use tracing::debug;

use crate::error::ApiError;
use crate::state::{MarketState, ShellConfig};

pub const HELP: &str = "\
Pages
  home                      listings grid (alias: browse)
  sell                      open the sell form
  profile                   your listings (alias: me)

Listings
  search [term]             filter by title/description; blank clears
  category <code|all>       books, electronics, lifestyle, transport, clothing, other
  show <id>                 listing details

Sell form
  set <field> <value>       title, desc, price, original, category, location
  form                      show the form
  assist                    AI description + price range (needs title and price)
  estimate                  AI price range only
  submit                    publish the listing

Database panel
  sql [schema|er|logs|json] show a tab (default: schema)
  export-sql <path>         write the initialization SQL to a file

  config                    show the active configuration
  help                      this text
  exit | quit               leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Home,
    Sell,
    Profile,
    Search(String),
    Category(String),
    Show(String),
    Set { field: String, value: String },
    Form,
    Assist,
    Estimate,
    Submit,
    Sql(Option<String>),
    ExportSql(String),
    Config,
    Help,
    Quit,
}

impl Command {
    /// Parses one prompt line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Command>, ApiError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        let required = |usage: &str| -> Result<String, ApiError> {
            if rest.is_empty() {
                Err(ApiError::validation(format!("Usage: {}", usage)))
            } else {
                Ok(rest.to_string())
            }
        };

        let command = match name.to_lowercase().as_str() {
            "home" | "browse" | "listings" => Command::Home,
            "sell" => Command::Sell,
            "profile" | "me" => Command::Profile,
            "search" => Command::Search(rest.to_string()),
            "category" => Command::Category(required("category <code|all>")?),
            "show" => Command::Show(required("show <id>")?),
            "set" => {
                let usage = || ApiError::validation("Usage: set <field> <value>");
                let (field, value) = rest.split_once(char::is_whitespace).ok_or_else(usage)?;
                Command::Set {
                    field: field.to_string(),
                    value: value.trim().to_string(),
                }
            }
            "form" => Command::Form,
            "assist" => Command::Assist,
            "estimate" => Command::Estimate,
            "submit" => Command::Submit,
            "sql" => Command::Sql(Some(rest.to_string()).filter(|r| !r.is_empty())),
            "export-sql" => Command::ExportSql(required("export-sql <path>")?),
            "config" => Command::Config,
            "help" | "?" => Command::Help,
            "exit" | "quit" => Command::Quit,
            other => return Err(ApiError::not_found("Command", other)),
        };

        Ok(Some(command))
    }
}

/// What the prompt loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Output(String),
    Quit,
}

/// Runs one command against the session.
pub fn dispatch(
    state: &mut MarketState,
    config: &ShellConfig,
    runtime: &Runtime,
    command: Command,
) -> Result<Outcome, ApiError> {
    debug!(?command, "dispatch");

    let text = match command {
        Command::Home => navigation::home(state),
        Command::Sell => navigation::sell(state),
        Command::Profile => navigation::profile(state)?,
        Command::Search(term) => listing::search(state, &term)?,
        Command::Category(arg) => listing::category(state, &arg)?,
        Command::Show(arg) => listing::show(state, &arg)?,
        Command::Set { field, value } => listing::set_field(state, &field, &value)?,
        Command::Form => listing::show_form(state)?,
        Command::Assist => runtime.block_on(assist::assist(state))?,
        Command::Estimate => runtime.block_on(assist::estimate(state))?,
        Command::Submit => listing::submit(state)?,
        Command::Sql(arg) => devtools::sql(state, arg.as_deref())?,
        Command::ExportSql(path) => devtools::export_sql(&path)?,
        Command::Config => config
            .to_redacted_toml()
            .map_err(|e| ApiError::internal(e.to_string()))?,
        Command::Help => HELP.to_string(),
        Command::Quit => return Ok(Outcome::Quit),
    };

    Ok(Outcome::Output(text))
}
