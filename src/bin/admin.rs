//! CLI administration tool for link-shortener.
//!
//! Creates links and inspects visit data straight from the database, without
//! going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Totals
//! cargo run --bin admin -- stats
//!
//! # Shorten a URL (prompts when the URL is omitted)
//! cargo run --bin admin -- shorten https://example.com
//!
//! # Visit summary for a link
//! cargo run --bin admin -- visits 42
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Reads the same variables as the server; see [`link_shortener::config`].
//! Short links are printed against `PUBLIC_BASE_URL`, or the bare code when
//! it is unset.

use link_shortener::config;
use link_shortener::domain::repositories::{LinkRepository, VisitRepository};
use link_shortener::infrastructure::persistence::{PgLinkRepository, PgVisitRepository};
use link_shortener::state::AppState;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Input;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing link-shortener.
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
    /// Show link and visit totals
    Stats,

    /// Create a short link
    Shorten {
        /// URL to shorten (prompted for when omitted)
        url: Option<String>,
    },

    /// Show the visit summary of a link
    Visits {
        /// Link id
        link_id: i64,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;

    let pool = PgPool::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    let state = build_state(&pool, &config);

    match cli.command {
        Commands::Stats => handle_stats(&state).await?,
        Commands::Shorten { url } => handle_shorten(&state, url).await?,
        Commands::Visits { link_id } => handle_visits(&state, link_id).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

fn build_state(pool: &PgPool, config: &config::Config) -> AppState {
    let pool = Arc::new(pool.clone());
    let link_repository: Arc<dyn LinkRepository> = Arc::new(PgLinkRepository::new(pool.clone()));
    let visit_repository: Arc<dyn VisitRepository> = Arc::new(PgVisitRepository::new(pool));

    AppState::new(link_repository, visit_repository, config.short_code_length)
        .with_public_base_url(config.public_base_url.clone())
}

/// Displays link and visit totals.
async fn handle_stats(state: &AppState) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let links_count = state
        .link_service
        .count_links()
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    let visits_count = state
        .visit_service
        .count_all()
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    println!(
        "  Links:  {}",
        links_count.to_string().bright_green().bold()
    );
    println!(
        "  Visits: {}",
        visits_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Creates a short link, prompting for the URL when it is not given.
async fn handle_shorten(state: &AppState, url: Option<String>) -> Result<()> {
    println!("{}", "🔗 Shorten URL".bright_blue().bold());
    println!();

    let url = match url {
        Some(u) => u,
        None => Input::new()
            .with_prompt("URL")
            .with_initial_text("https://")
            .interact_text()?,
    };

    let link = state
        .link_service
        .shorten(&url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to shorten URL: {}", e))?;

    let short = match state.public_base_url {
        Some(ref base) => state.link_service.short_link(base, &link.short_url),
        None => link.short_url.clone(),
    };

    println!("{}", "✅ Link created".green().bold());
    println!();
    println!("  ID:    {}", link.id.to_string().bright_black());
    println!("  URL:   {}", link.url.cyan());
    println!("  Short: {}", short.bright_yellow().bold());
    println!();

    Ok(())
}

/// Prints the visit count and distinct visitors of a link.
async fn handle_visits(state: &AppState, link_id: i64) -> Result<()> {
    println!("{}", "👣 Visits".bright_blue().bold());
    println!();

    let summary = state
        .visit_service
        .get_visits(link_id)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!(
        "  Total: {}",
        summary.count.to_string().bright_white().bold()
    );
    println!();

    if summary.ip_addresses.is_empty() {
        println!("{}", "  No visits yet".yellow());
    } else {
        println!("{}", "Distinct visitors:".bright_white().bold());
        for (ip, ua) in summary.ip_addresses.iter().zip(&summary.user_agents) {
            let ua = if ua.is_empty() { "-" } else { ua.as_str() };
            println!("  {}  {}", ip.cyan(), ua.bright_black());
        }
    }
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());
            sqlx::query("SELECT 1").fetch_one(pool).await?;
            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;
            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
