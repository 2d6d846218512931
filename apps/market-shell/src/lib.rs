//! # Market Shell Library
//!
//! Interactive terminal front end for the UniTrade campus market.
//!
//! ## Module Organization
//! ```text
//! market_shell/
//! ├── lib.rs          ◄─── You are here (start-up & prompt loop)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── market.rs   ◄─── Session, filter, sell form, assistant
//! │   └── config.rs   ◄─── market.toml + environment
//! ├── commands/
//! │   ├── mod.rs      ◄─── Parse + dispatch
//! │   ├── navigation.rs
//! │   ├── listing.rs
//! │   ├── assist.rs
//! │   └── devtools.rs
//! └── error.rs        ◄─── ApiError for commands, ShellError for start-up
//! ```

pub mod commands;
pub mod error;
pub mod state;

use clap::Parser;
use rustyline::{error::ReadlineError, CompletionType, Config, EditMode, Editor};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use commands::{dispatch, Command, Outcome};
use error::ShellResult;
use state::{MarketState, ShellConfig};

const HISTORY_FILE_NAME: &str = "history.txt";

/// Start-up arguments. Flags override both the config file and environment.
#[derive(Debug, Parser)]
#[command(name = "market-shell", version, about = "UniTrade campus second-hand market")]
pub struct Args {
    /// Path to market.toml
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Start with an empty catalog
    #[arg(long)]
    pub no_seed: bool,

    /// Sign in as this user id
    #[arg(long, value_name = "ID")]
    pub user: Option<i64>,

    /// Write the effective configuration to the config path and exit
    #[arg(long)]
    pub write_config: bool,
}

impl Args {
    /// Resolves the config path and loads the effective configuration.
    ///
    /// A file named with `--config`, or one about to be rewritten by
    /// `--write-config`, must parse and validate. Otherwise a broken file
    /// falls back to defaults with a warning.
    pub fn load_config(&self) -> ShellResult<(Option<PathBuf>, ShellConfig)> {
        let path = ShellConfig::resolve_path(self.config.clone());

        let mut config = if self.write_config || self.config.is_some() {
            ShellConfig::load(path.clone())?
        } else {
            ShellConfig::load_or_default(path.clone())
        };
        self.apply_to(&mut config);
        config.validate()?;

        Ok((path, config))
    }

    /// Applies flags on top of a loaded configuration.
    pub fn apply_to(&self, config: &mut ShellConfig) {
        if self.no_seed {
            config.market.seed_demo_data = false;
        }
        if let Some(user) = self.user {
            config.market.current_user_id = user;
        }
    }
}

/// Runs the shell until `exit`, Ctrl-D, or a fatal error.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Initialize Logging (stderr, RUST_LOG)                               │
/// │  2. Load Config: --config / UNITRADE_CONFIG / platform dir, then env    │
/// │  3. Apply flags (--user, --no-seed)                                     │
/// │  4. Build MarketState and start the session ([INIT] logged once)        │
/// │  5. Current-thread runtime for the assistant's HTTP calls               │
/// │  6. Prompt loop with history                                            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run(args: Args) -> ShellResult<()> {
    init_tracing();

    let (config_path, config) = args.load_config()?;

    if args.write_config {
        let path = config_path.ok_or_else(|| {
            error::ShellError::InvalidConfig("no config path could be determined".into())
        })?;
        config.save(&path)?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    let mut state = MarketState::from_config(&config)?;
    state.session.start();
    info!(
        user_id = config.market.current_user_id,
        listings = state.session.catalog().len(),
        assistant = state.assistant.is_enabled(),
        "Market session started"
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    prompt_loop(&mut state, &config, &runtime)
}

fn prompt_loop(
    state: &mut MarketState,
    config: &ShellConfig,
    runtime: &tokio::runtime::Runtime,
) -> ShellResult<()> {
    let editor_config = Config::builder()
        .edit_mode(EditMode::Emacs)
        .history_ignore_space(true)
        .completion_type(CompletionType::List)
        .auto_add_history(false)
        .build();

    let mut rl = Editor::<(), _>::with_config(editor_config)?;

    let history_path = history_path().filter(|path| history_dir_ready(path));
    if let Some(path) = &history_path {
        let _ = rl.load_history(path);
    }

    println!("UniTrade 校园二手市场");
    println!("Type 'help' for commands, 'exit' or 'quit' to leave\n");
    println!("{}", commands::listing::browse(state));

    loop {
        let prompt = format!("unitrade::{}> ", state.session.page());

        let line = match rl.readline(&prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                if let Some(path) = &history_path {
                    let _ = rl.save_history(path);
                }
                return Err(err.into());
            }
        };

        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };
        rl.add_history_entry(line.trim())?;

        match dispatch(state, config, runtime, command) {
            Ok(Outcome::Output(text)) => println!("{}\n", text),
            Ok(Outcome::Quit) => break,
            Err(e) => eprintln!("{}\n", e),
        }
    }

    if let Some(path) = &history_path {
        if let Err(e) = rl.save_history(path) {
            warn!(error = %e, "Failed to save prompt history");
        }
    }
    println!("再见!");
    Ok(())
}

/// Initializes the tracing subscriber.
///
/// Logs go to stderr so they never interleave with command output.
/// Override with `RUST_LOG`, e.g. `RUST_LOG=unitrade=debug`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,unitrade=info,market_shell=info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Prompt history lives next to the platform data directory.
fn history_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "unitrade", "market")
        .map(|dirs| dirs.data_dir().join(HISTORY_FILE_NAME))
}

/// Creates the history file's directory. History is skipped, not fatal,
/// when that fails.
fn history_dir_ready(path: &Path) -> bool {
    let Some(parent) = path.parent() else {
        return true;
    };
    match std::fs::create_dir_all(parent) {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, ?parent, "Prompt history disabled");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let args = Args::parse_from(["market-shell", "--no-seed", "--user", "103"]);
        let mut config = ShellConfig::default();
        args.apply_to(&mut config);

        assert!(!config.market.seed_demo_data);
        assert_eq!(config.market.current_user_id, 103);
    }

    #[test]
    fn test_write_config_aborts_on_broken_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("market.toml");
        let original = "[market]\ncurrent_user_id = 102\ndefault_location = \"东门\"\nbroken line\n";
        std::fs::write(&path, original).unwrap();

        let path_arg = path.to_str().unwrap();
        let args = Args::parse_from(["market-shell", "--config", path_arg, "--write-config"]);
        assert!(args.load_config().is_err());
        assert!(run(args).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn test_explicit_config_is_loaded() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("market.toml");
        std::fs::write(&path, "[market]\ncurrent_user_id = 102\n").unwrap();

        let args = Args::parse_from(["market-shell", "--config", path.to_str().unwrap()]);
        let (resolved, config) = args.load_config().unwrap();
        assert_eq!(resolved, Some(path));
        assert_eq!(config.market.current_user_id, 102);
    }

    #[test]
    fn test_history_dir_failure_is_not_fatal() {
        let dir = tempfile::TempDir::new().unwrap();
        let blocker = dir.path().join("data");
        std::fs::write(&blocker, "not a directory").unwrap();

        assert!(!history_dir_ready(&blocker.join("market").join(HISTORY_FILE_NAME)));
        assert!(history_dir_ready(&dir.path().join("market").join(HISTORY_FILE_NAME)));
        assert!(dir.path().join("market").is_dir());
    }

    #[test]
    fn test_no_flags_leave_config_alone() {
        let args = Args::parse_from(["market-shell"]);
        let mut config = ShellConfig::default();
        args.apply_to(&mut config);
        assert_eq!(config, ShellConfig::default());
    }
}
