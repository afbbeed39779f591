use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};

use bookshelf_import::config::ImportConfig;
use bookshelf_import::import::preview_import;
use bookshelf_import::text_parser::{parse_text_with_context, validate_parse_results};
use bookshelf_import::url_resolver::UrlResolver;
use bookshelf_import::utils::{logger::init_logger, read_input};

/// Extract and resolve shelf links from pasted text
#[derive(Debug, Parser)]
#[command(name = "bookshelf-import", version, about)]
struct Cli {
    /// Configuration file (TOML, JSON or YAML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write logs to a timestamped file in this directory
    #[arg(long, global = true)]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the links found in a text file (or stdin)
    Parse {
        file: Option<PathBuf>,
        #[arg(long)]
        max_items: Option<usize>,
    },
    /// Follow redirects for the given URLs
    Resolve {
        #[arg(required = true)]
        urls: Vec<String>,
        #[command(flatten)]
        limits: ResolveArgs,
    },
    /// Parse a text file (or stdin) and resolve its shortened links
    Import {
        file: Option<PathBuf>,
        #[arg(long)]
        max_items: Option<usize>,
        /// Resolve every link, not only known shorteners
        #[arg(long)]
        resolve_all: bool,
        #[command(flatten)]
        limits: ResolveArgs,
    },
}

#[derive(Debug, Args)]
struct ResolveArgs {
    /// Maximum resolutions in flight at once
    #[arg(long)]
    concurrency: Option<usize>,
    /// Per-URL deadline in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,
}

impl ResolveArgs {
    fn apply(&self, config: &mut ImportConfig) {
        if let Some(concurrency) = self.concurrency {
            config.concurrency_limit = concurrency;
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.timeout_ms = timeout_ms;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ImportConfig::load(cli.config.as_deref())?;
    if cli.log_dir.is_some() {
        config.log_dir = cli.log_dir.clone();
    }
    init_logger(config.log_dir.as_deref())?;

    match cli.command {
        Command::Parse { file, max_items } => {
            if let Some(max_items) = max_items {
                config.max_items = max_items;
            }
            config.validate()?;

            let text = read_input(file.as_deref())?;
            let length = text.chars().count();
            if length > config.max_text_length {
                bail!("Text is {} characters long; the maximum is {}", length, config.max_text_length);
            }

            let validated = validate_parse_results(parse_text_with_context(&text), config.max_items);
            info!("Found {} links", validated.items.len());
            print_json(&validated)?;
        }
        Command::Resolve { urls, limits } => {
            limits.apply(&mut config);
            config.validate()?;

            let resolver = UrlResolver::new(config.resolver_config())?;
            let (result, stats) = resolver
                .resolve_batch_with_stats(&urls, config.concurrency_limit, config.timeout())
                .await;
            debug!("Batch statistics: {:?}", stats);
            print_json(&result)?;
        }
        Command::Import {
            file,
            max_items,
            resolve_all,
            limits,
        } => {
            if let Some(max_items) = max_items {
                config.max_items = max_items;
            }
            config.resolve_all_links |= resolve_all;
            limits.apply(&mut config);
            config.validate()?;

            let text = read_input(file.as_deref())?;
            let preview = preview_import(&text, &config).await?;
            print_json(&preview)?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
