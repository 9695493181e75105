//! Command-line arguments.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use kanapa::{ConfigUpdate, Selectors};

/// Render dual light/dark highlighted code blocks as HTML
#[derive(Debug, Parser)]
#[command(name = "kanapa")]
#[command(version)]
#[command(about = "Render dual light/dark highlighted code blocks as HTML")]
pub struct Cli {
    /// YAML configuration file (themes, selectors)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Theme for the light-mode block
    #[arg(long, global = true, value_name = "THEME")]
    pub light_theme: Option<String>,

    /// Theme for the dark-mode block
    #[arg(long, global = true, value_name = "THEME")]
    pub dark_theme: Option<String>,

    /// Selector matching an ancestor while light mode is active
    #[arg(long, global = true, value_name = "SELECTOR", requires = "selector_dark")]
    pub selector_light: Option<String>,

    /// Selector matching an ancestor while dark mode is active
    #[arg(long, global = true, value_name = "SELECTOR", requires = "selector_light")]
    pub selector_dark: Option<String>,

    /// Folder of extra .tmTheme files
    #[arg(long, global = true, value_name = "DIR")]
    pub theme_dir: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Highlight one snippet
    Code(CodeArgs),
    /// Render a Markdown document, highlighting its code blocks
    Markdown(MarkdownArgs),
    /// List available highlighter themes
    Themes,
    /// Print the effective configuration as YAML
    Config,
}

#[derive(Debug, Args)]
pub struct CodeArgs {
    /// Source file; reads stdin when absent or `-`
    pub file: Option<PathBuf>,

    /// Language identifier
    #[arg(short, long)]
    pub lang: String,

    /// Use this theme for both modes
    #[arg(short, long)]
    pub theme: Option<String>,

    /// Extra classes for each container
    #[arg(short, long = "class", value_name = "CLASS")]
    pub class_name: Option<String>,

    /// Emit a complete HTML document
    #[arg(long)]
    pub standalone: bool,
}

#[derive(Debug, Args)]
pub struct MarkdownArgs {
    /// Markdown file; reads stdin when `-`
    pub file: PathBuf,

    /// Emit a complete HTML document
    #[arg(long)]
    pub standalone: bool,

    /// Document title (defaults to the file name)
    #[arg(long)]
    pub title: Option<String>,
}

impl Cli {
    /// Configuration overrides given on the command line.
    pub fn config_update(&self) -> ConfigUpdate {
        let mut update = ConfigUpdate::new();
        if let Some(light) = &self.light_theme {
            update = update.light_theme(light);
        }
        if let Some(dark) = &self.dark_theme {
            update = update.dark_theme(dark);
        }
        if let (Some(light), Some(dark)) = (&self.selector_light, &self.selector_dark) {
            update = update.selectors(Selectors::explicit(light, dark));
        }
        update
    }

    /// Log level implied by `-v` flags.
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}
