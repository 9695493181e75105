//! Subcommand execution.

use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use futures::executor::block_on;
use kanapa::{render_markdown, CodeProps, Config, ConfigStore, Page, Renderer, SyntectHighlighter};
use log::debug;

use crate::cli::{Cli, CodeArgs, Command, MarkdownArgs};

pub fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    match &cli.command {
        Command::Config => {
            let yaml = config.to_yaml().context("failed to serialize configuration")?;
            write_stdout(&yaml)
        }
        Command::Themes => {
            let highlighter = highlighter(cli)?;
            let mut listing = String::new();
            for name in highlighter.theme_names() {
                listing.push_str(name);
                listing.push('\n');
            }
            write_stdout(&listing)
        }
        Command::Code(args) => {
            let renderer = Renderer::with_store(highlighter(cli)?, ConfigStore::with_config(config));
            render_code(&renderer, args)
        }
        Command::Markdown(args) => {
            let renderer = Renderer::with_store(highlighter(cli)?, ConfigStore::with_config(config));
            render_document(&renderer, args)
        }
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    let base = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    let config = base.merged(cli.config_update());
    debug!(
        "effective themes: light={} dark={}",
        config.themes.light, config.themes.dark
    );
    Ok(config)
}

fn highlighter(cli: &Cli) -> Result<SyntectHighlighter> {
    let highlighter = SyntectHighlighter::new();
    match &cli.theme_dir {
        Some(dir) => Ok(highlighter.with_theme_dir(dir)?),
        None => Ok(highlighter),
    }
}

fn render_code(renderer: &Renderer, args: &CodeArgs) -> Result<()> {
    let source = read_input(args.file.as_deref())?;
    let mut props = CodeProps::new(&args.lang).code(source);
    props.theme = args.theme.clone();
    props.class_name = args.class_name.clone();

    let rendered = block_on(renderer.render(&props))?;
    let html = if args.standalone {
        let mut page = Page::new();
        page.push(&rendered)?;
        let title = args
            .file
            .as_deref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "kanapa".to_string());
        page.to_document(&title)?
    } else {
        rendered.to_html()?
    };
    write_stdout(&html)
}

fn render_document(renderer: &Renderer, args: &MarkdownArgs) -> Result<()> {
    let markdown = read_input(Some(args.file.as_path()))?;
    let page = block_on(render_markdown(renderer, &markdown))
        .with_context(|| format!("failed to render {}", args.file.display()))?;

    let html = if args.standalone {
        let title = args.title.clone().unwrap_or_else(|| {
            args.file
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "kanapa".to_string())
        });
        page.to_document(&title)?
    } else {
        let mut html = page.head_html()?;
        html.push_str(page.body_html());
        html
    };
    write_stdout(&html)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn write_stdout(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        stdout.write_all(b"\n")?;
    }
    stdout.flush()?;
    Ok(())
}
