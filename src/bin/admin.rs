//! CLI administration tool for snaplink.
//!
//! Creates and inspects short links and checks the database without going
//! through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create a link with a random slug
//! cargo run --bin admin -- link create --url https://example.com
//!
//! # Create a link with a custom slug and title, skipping the prompt
//! cargo run --bin admin -- link create --url https://example.com --slug promo --title "Promo" -y
//!
//! # Show click analytics
//! cargo run --bin admin -- link show promo
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `DATABASE_URL` (or `DB_*` parts), optional `REDIS_URL`,
//! `BASE_URL`, `CACHE_BACKEND`.

use snaplink::application::services::{AnalyticsService, Provisioner, short_url};
use snaplink::config::{self, CacheBackend, Config};
use snaplink::domain::deadline::Deadline;
use snaplink::infrastructure::cache::{CacheService, NullCache};
use snaplink::infrastructure::persistence::{PgLinkRepository, PgVisitRepository};
use snaplink::server;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing snaplink.
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
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// Create a new short link
    Create {
        /// Destination URL (prompted for if omitted)
        #[arg(short, long)]
        url: Option<String>,

        /// Custom slug (random if omitted)
        #[arg(short, long)]
        slug: Option<String>,

        /// Optional title
        #[arg(short, long)]
        title: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show click analytics for a slug
    Show {
        /// Slug to inspect
        slug: String,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    let pool = server::connect_pool(&config).await?;

    match cli.command {
        Commands::Link { action } => handle_link_action(action, &config, &pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    pool.close().await;

    Ok(())
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, config: &Config, pool: &PgPool) -> Result<()> {
    let pool = Arc::new(pool.clone());
    let links = Arc::new(PgLinkRepository::new(pool.clone()));

    match action {
        LinkAction::Create {
            url,
            slug,
            title,
            yes,
        } => {
            // The in-memory cache dies with this process, so only Redis is worth warming.
            let cache: Arc<dyn CacheService> = match config.cache_backend {
                CacheBackend::Redis => server::build_cache(config).await,
                CacheBackend::Memory | CacheBackend::None => Arc::new(NullCache::new()),
            };
            let provisioner = Provisioner::new(links, cache);
            create_link(&provisioner, &config.base_url, url, slug, title, yes).await?;
        }
        LinkAction::Show { slug } => {
            let visits = Arc::new(PgVisitRepository::new(pool));
            let analytics = AnalyticsService::new(links, visits);
            show_link(&analytics, &config.base_url, &slug).await?;
        }
    }

    Ok(())
}

/// Creates a short link with interactive prompts.
///
/// # Flow
///
/// 1. Prompt for the destination URL (or use provided)
/// 2. Display link details
/// 3. Confirm creation (unless `--yes` flag)
/// 4. Provision through the same path as `POST /api/shorten`
async fn create_link(
    provisioner: &Provisioner<PgLinkRepository>,
    base_url: &str,
    url: Option<String>,
    slug: Option<String>,
    title: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔗 Create Short Link".bright_blue().bold());
    println!();

    let url = match url {
        Some(u) => u,
        None => Input::new()
            .with_prompt("Destination URL")
            .with_initial_text("https://")
            .interact_text()?,
    };

    println!("{}", "Link details:".bright_white().bold());
    println!("  URL:   {}", url.cyan());
    println!(
        "  Slug:  {}",
        slug.as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or("(random)")
            .cyan()
    );
    if let Some(ref t) = title {
        println!("  Title: {}", t.cyan());
    }
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this link?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let link = provisioner
        .create(url, slug, title, &Deadline::none())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

    println!();
    println!("{}", "✅ Link created successfully!".green().bold());
    println!();
    println!(
        "  Short URL: {}",
        short_url(base_url, &link.slug).bright_yellow().bold()
    );
    println!();

    Ok(())
}

/// Prints click analytics for a slug.
///
/// # Output Format
///
/// ```text
/// 📊 promo
///
///   URL:      https://example.com
///   Clicks:   3 (3 visit rows)
///
///   Date                 IP               Referer
///   ──────────────────────────────────────────────────────────
///   2025-01-15 10:30     203.0.113.7      https://news.example
/// ```
async fn show_link(
    analytics: &AnalyticsService<PgLinkRepository, PgVisitRepository>,
    base_url: &str,
    slug: &str,
) -> Result<()> {
    let deadline = Deadline::none();
    let report = analytics
        .link_analytics(slug, &deadline)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load link: {}", e))?;
    let rows = analytics
        .visit_rows(report.link.id, &deadline)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count visits: {}", e))?;

    println!("{}", format!("📊 {}", slug).bright_blue().bold());
    println!();
    println!("  Short URL: {}", short_url(base_url, slug).bright_yellow());
    println!("  URL:       {}", report.link.url.cyan());
    if let Some(ref title) = report.link.title {
        println!("  Title:     {}", title.cyan());
    }
    println!(
        "  Created:   {}",
        report
            .link
            .created_at
            .format("%Y-%m-%d %H:%M")
            .to_string()
            .bright_black()
    );

    let clicks = report.total_clicks().to_string().bright_green().bold();
    if rows == report.total_clicks() {
        println!("  Clicks:    {} ({} visit rows)", clicks, rows);
    } else {
        println!(
            "  Clicks:    {} ({})",
            clicks,
            format!("{} visit rows, counter drift", rows).red()
        );
    }
    println!();

    if report.recent_visits.is_empty() {
        println!("{}", "  No visits yet".yellow());
        println!();
        return Ok(());
    }

    println!(
        "  {:<20} {:<16} {}",
        "Date".bright_white().bold(),
        "IP".bright_white().bold(),
        "Referer".bright_white().bold()
    );
    println!("  {}", "─".repeat(60).bright_black());

    for visit in &report.recent_visits {
        println!(
            "  {:<20} {:<16} {}",
            visit
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            visit.ip.as_deref().unwrap_or("-"),
            visit.referer.as_deref().unwrap_or("-")
        );
    }
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1")
                .fetch_one(pool)
                .await
                .context("Database connection failed")?;

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  PostgreSQL: {}", version.bright_white());
        }
    }

    Ok(())
}
