//! Market shell entry point.

use clap::Parser;

fn main() {
    let args = market_shell::Args::parse();

    if let Err(e) = market_shell::run(args) {
        eprintln!("market-shell: {}", e);
        std::process::exit(1);
    }
}
