//! `kanapa` command-line tool.
//!
//! ```text
//! kanapa code src/main.rs --lang rust --light-theme InspiredGitHub --dark-theme base16-ocean.dark
//! kanapa markdown README.md --standalone --config kanapa.yaml
//! kanapa themes --theme-dir ./themes
//! ```
//!
//! Logging goes to stderr; `RUST_LOG` overrides the `-v` flags.

mod cli;
mod commands;

use std::process::ExitCode;

use clap::Parser;

use cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    match commands::run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
