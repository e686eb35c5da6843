//! CLI administration tool for tinylink.
//!
//! Manages links directly against the database, without going through the
//! HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List links, optionally filtered
//! cargo run --bin admin -- links list --search example
//!
//! # Create a link with a custom code
//! cargo run --bin admin -- links create https://example.com --code ABC123
//!
//! # Show one link with its click statistics
//! cargo run --bin admin -- links show ABC123
//!
//! # Delete a link (asks for confirmation unless --yes)
//! cargo run --bin admin -- links delete ABC123
//!
//! # Totals
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see [`tinylink::config`].

use tinylink::application::services::LinkService;
use tinylink::config::{self, Config, mask_connection_string};
use tinylink::domain::entities::Link;
use tinylink::infrastructure::persistence::PgLinkRepository;
use tinylink::server::connect_pool;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing tinylink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage short links
    Links {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show totals
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// List links, newest first
    List {
        /// Only show links whose code or target URL contains this term
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show a single link
    Show {
        /// Short code
        code: String,
    },

    /// Create a short link
    Create {
        /// Target URL
        url: String,

        /// Custom short code (6-8 alphanumeric characters)
        #[arg(short, long)]
        code: Option<String>,
    },

    /// Delete a link
    Delete {
        /// Short code
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

type PgLinkService = LinkService<PgLinkRepository>;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;
    let pool = connect_pool(&config).await?;

    match cli.command {
        Commands::Links { action } => handle_link_action(action, &pool, &config).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool, &config).await?,
    }

    Ok(())
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, pool: &PgPool, config: &Config) -> Result<()> {
    let repo = Arc::new(PgLinkRepository::new(Arc::new(pool.clone())));
    let service = LinkService::new(repo);

    match action {
        LinkAction::List { search } => list_links(&service, search, config).await?,
        LinkAction::Show { code } => show_link(&service, &code, config).await?,
        LinkAction::Create { url, code } => create_link(&service, url, code, config).await?,
        LinkAction::Delete { code, yes } => delete_link(&service, &code, yes).await?,
    }

    Ok(())
}

/// Lists links as a table.
///
/// # Output Format
///
/// ```text
/// 🔗 Links
///
///   Code      Clicks  Created           Target
///   ────────────────────────────────────────────────────────────
///   ABC123    12      2024-01-15 10:30  https://example.com/docs
/// ```
async fn list_links(service: &PgLinkService, search: Option<String>, config: &Config) -> Result<()> {
    println!("{}", "🔗 Links".bright_blue().bold());
    println!();

    let links = service
        .list_links(search)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    println!(
        "  {:<9} {:<7} {:<17} {}",
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Created".bright_white().bold(),
        "Target".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in &links {
        println!(
            "  {:<9} {:<7} {:<17} {}",
            link.code.cyan(),
            link.clicks.to_string().bright_white(),
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            link.target_url
        );
    }

    println!();
    println!(
        "  Total: {}  (short links under {})",
        links.len().to_string().bright_white().bold(),
        config.base_url.bright_cyan()
    );
    println!();

    Ok(())
}

/// Prints the details of one link.
async fn show_link(service: &PgLinkService, code: &str, config: &Config) -> Result<()> {
    let link = service
        .get_link(code)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    print_link(&link, config);

    Ok(())
}

/// Creates a link and prints its short URL.
async fn create_link(
    service: &PgLinkService,
    url: String,
    code: Option<String>,
    config: &Config,
) -> Result<()> {
    println!("{}", "✨ Create Link".bright_blue().bold());
    println!();

    let link = service
        .create_link(url, code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

    println!("{}", "✅ Link created successfully!".green().bold());
    println!();
    print_link(&link, config);

    Ok(())
}

/// Deletes a link after confirmation.
async fn delete_link(service: &PgLinkService, code: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑  Delete Link".bright_blue().bold());
    println!();

    let link = service
        .get_link(code)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("  Code:   {}", link.code.cyan());
    println!("  Target: {}", link.target_url);
    println!("  Clicks: {}", link.clicks.to_string().bright_white());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Are you sure you want to delete this link?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service
        .delete_link(code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete link: {}", e))?;

    println!("{}", "✅ Link deleted".green().bold());
    println!();

    Ok(())
}

fn print_link(link: &Link, config: &Config) {
    let last_clicked = link
        .last_clicked
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "—".to_string());

    println!("  Code:         {}", link.code.cyan().bold());
    println!("  Short URL:    {}", link.short_url(&config.base_url).bright_yellow());
    println!("  Target:       {}", link.target_url);
    println!("  Clicks:       {}", link.clicks.to_string().bright_white());
    println!(
        "  Created:      {}",
        link.created_at.format("%Y-%m-%d %H:%M:%S")
    );
    println!("  Last clicked: {}", last_clicked);
    println!();
}

/// Displays link and click totals.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let (links_count, clicks_count): (i64, i64) =
        sqlx::query_as("SELECT COUNT(*), COALESCE(SUM(clicks), 0)::BIGINT FROM links")
            .fetch_one(pool)
            .await?;

    println!(
        "  Links:  {}",
        links_count.to_string().bright_white().bold()
    );
    println!(
        "  Clicks: {}",
        clicks_count.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Dispatches database commands.
async fn handle_db_action(action: DbAction, pool: &PgPool, config: &Config) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  URL:     {}", mask_connection_string(&config.database_url));
            println!("  Server:  {}", version.bright_black());
            println!();
        }
    }

    Ok(())
}
