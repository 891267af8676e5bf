mod config;


use std::path::{Path, PathBuf};

use catalog::CatalogError;
use catalog::content::ContentTree;
use catalog::presentation::Presentation;
use catalog::slideshow::Slideshow;
use clap::{Parser, Subcommand};
use sortable::SortableError;
use sortable::config::ScrollOptions;
use sortable::consts::SCROLL_DURATION_MS;
use sortable::easing::Easing;
use sortable::scroll::{self, ScrollHost, VirtualScroll};

use crate::config::DeckConfig;

const DEMO_CONTENT: &str = include_str!("../demos/content.json");

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Sortable(#[from] SortableError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "deck", about = "Presentation catalog and scroll tooling")]
struct Cli {
    /// Content JSON; overrides `DECK_CONTENT`.
    #[arg(long)]
    content: Option<PathBuf>,

    /// Share-link host; overrides `DECK_HOST`.
    #[arg(long)]
    host: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve a share-link query and print the slideshow as JSON.
    Slideshow { query: String },
    /// Build a presentation from subsection names and print its share link.
    Link {
        #[arg(required = true)]
        subsections: Vec<String>,
        #[arg(long)]
        title: Option<String>,
        /// Print the saved-collection record instead of the link.
        #[arg(long)]
        save: bool,
    },
    /// Print the scroll positions of one eased scroll, one per tick.
    Scroll {
        #[arg(long, default_value_t = 0.0)]
        from: f64,
        #[arg(long, allow_negative_numbers = true)]
        to: f64,
        #[arg(long, default_value_t = SCROLL_DURATION_MS)]
        duration: f64,
        #[arg(long, default_value = "easeInOutQuart")]
        easing: String,
        /// Pixels subtracted from `--to`; the target never goes below 0.
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        offset: f64,
        /// Viewport height of the simulated scroll container.
        #[arg(long, default_value_t = 800.0)]
        viewport: f64,
    },
    /// List the easing curve names.
    Easings,
}

fn main() -> Result<(), CliError> {
    // Load `.env` first so it can set `RUST_LOG`.
    let dotenv = dotenvy::dotenv();
    tracing_subscriber::fmt::init();
    if let Err(e) = dotenv {
        tracing::debug!(error = %e, "no .env loaded");
    }

    let cli = Cli::parse();
    let mut config = DeckConfig::from_env();
    if let Some(content) = cli.content {
        config.content = Some(content);
    }
    if let Some(host) = cli.host {
        config.host = host;
    }

    match cli.command {
        Command::Slideshow { query } => run_slideshow(&config, &query),
        Command::Link { subsections, title, save } => run_link(&config, &subsections, title.as_deref(), save),
        Command::Scroll { from, to, duration, easing, offset, viewport } => {
            let options = ScrollOptions { duration, easing: easing.parse()?, offset, ..ScrollOptions::default() };
            let positions = scroll_plan(from, to, viewport, &options);
            tracing::debug!(ticks = positions.len(), "scroll planned");
            println!("{}", serde_json::to_string(&positions)?);
            Ok(())
        }
        Command::Easings => {
            for easing in Easing::ALL {
                println!("{easing}");
            }
            Ok(())
        }
    }
}

fn load_tree(path: Option<&Path>) -> Result<ContentTree, CliError> {
    let Some(path) = path else {
        tracing::debug!("using bundled demo content");
        return Ok(ContentTree::from_json(DEMO_CONTENT)?);
    };
    let raw = std::fs::read_to_string(path).map_err(|source| CliError::Read { path: path.to_path_buf(), source })?;
    let tree = ContentTree::from_json(&raw)?;
    tracing::info!(path = %path.display(), sections = tree.sections.len(), subsections = tree.len(), "content loaded");
    Ok(tree)
}

fn run_slideshow(config: &DeckConfig, query: &str) -> Result<(), CliError> {
    let tree = load_tree(config.content.as_deref())?;
    let show = Slideshow::from_query(query, &tree)?;
    println!("{}", serde_json::to_string_pretty(&show)?);
    Ok(())
}

fn run_link(config: &DeckConfig, subsections: &[String], title: Option<&str>, save: bool) -> Result<(), CliError> {
    let mut tree = load_tree(config.content.as_deref())?;
    let mut presentation = Presentation::new(title.unwrap_or(&config.title));
    for name in subsections {
        presentation.add(&mut tree, name)?;
    }
    if save {
        println!("{}", serde_json::to_string_pretty(&presentation.save())?);
    } else {
        println!("{}", presentation.share_link(&config.host));
    }
    Ok(())
}

/// Per-tick positions of a scroll from `from` towards `to` in a viewport
/// tall enough for both.
fn scroll_plan(from: f64, to: f64, viewport: f64, options: &ScrollOptions) -> Vec<f64> {
    let end = scroll::end_location([to], options.offset);
    let mut host = VirtualScroll::new(viewport, from.max(end) + viewport);
    host.set_scroll_top(from);
    scroll::plan(&mut host, end, options)
}
