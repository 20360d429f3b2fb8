//! Menu children CLI
//!
//! Resolves page references against a link fixture and prints the query a
//! host would run to list the children of the resolved link.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use menu_children::{filter_command, resolve_command};
use menu_children_core::config::Config;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser)]
#[command(name = "menu-children")]
#[command(about = "Filter content by the children of a menu link")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the menu link a page reference resolves to
    Resolve {
        /// JSON file holding the menu links
        #[arg(long, value_name = "FILE")]
        links: PathBuf,

        /// Menu to search, in order; repeatable
        #[arg(long = "menu", value_name = "MENU")]
        menus: Vec<String>,

        /// Node id or path
        input: String,
    },
    /// Print the filtered query and its bind values
    Filter {
        /// JSON file holding the menu links
        #[arg(long, value_name = "FILE")]
        links: PathBuf,

        /// Menu to search, in order; repeatable
        #[arg(long = "menu", value_name = "MENU")]
        menus: Vec<String>,

        /// Node id or path; omit to skip the parent restriction
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    debug!("Loaded configuration: {config:?}");

    let output = match cli.command {
        Commands::Resolve {
            links,
            menus,
            input,
        } => resolve_command(&config, &links, &menus, &input)?,
        Commands::Filter {
            links,
            menus,
            input,
        } => filter_command(&config, &links, &menus, input.as_deref())?,
    };

    println!("{output}");
    Ok(())
}

/// Initialize logging system
fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(format!(
            "menu_children_core={level},menu_children_filter={level},{}={level}",
            env!("CARGO_CRATE_NAME")
        ))
        .init();

    Ok(())
}
