//! Inspect a saved cart page
//!
//! Usage:
//!   cart_inspect cart <page.html> [--config <file>]
//!   cart_inspect regions <page.html> [--config <file>]
//!
//! `cart` prints the parsed cart as JSON, `regions` prints the region report.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use scraper::Html;
use std::path::PathBuf;
use tracing::info;

use cart_page_parser_lib::infrastructure::parsing::{
    CartPageParser, ContextualParser, ParseContext, RegionListParser, render_region_report,
};
use cart_page_parser_lib::infrastructure::{AppConfig, init_logging_with_config};

#[derive(Parser)]
#[command(name = "cart_inspect")]
#[command(version, about = "Inspect a saved storefront cart page")]
struct Cli {
    /// Settings file (TOML); `CART_PARSER_*` variables override it
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the parsed cart as JSON
    Cart {
        /// Saved cart page
        page: PathBuf,
    },
    /// Print the checkout region report
    Regions {
        /// Saved cart page
        page: PathBuf,
    },
}

impl Command {
    const fn name(&self) -> &'static str {
        match self {
            Self::Cart { .. } => "cart",
            Self::Regions { .. } => "regions",
        }
    }

    const fn page(&self) -> &PathBuf {
        match self {
            Self::Cart { page } | Self::Regions { page } => page,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;
    init_logging_with_config(&config.logging)?;

    let page = cli.command.page();
    let html = std::fs::read_to_string(page)
        .with_context(|| format!("Failed to read {}", page.display()))?;
    let document = Html::parse_document(&html);
    let context = ParseContext::new(page.display().to_string())
        .with_metadata("command", cli.command.name());

    match &cli.command {
        Command::Cart { .. } => {
            let parser = CartPageParser::with_config(&config.parsing.cart_selectors)?;
            let cart = parser.parse_with_context(&document, &context);
            info!("Total check: {:?}", cart.check_total());
            println!("{}", serde_json::to_string_pretty(&cart)?);
        }
        Command::Regions { .. } => {
            let parser = RegionListParser::with_config(&config.parsing.region_selectors)?;
            let regions = parser.parse_with_context(&document, &context);
            print!("{}", render_region_report(&regions, &config.parsing.region_messages));
        }
    }

    Ok(())
}
