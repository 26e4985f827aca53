//! CLI administration tool for sgtl-api.
//!
//! Provides commands for applying migrations, inspecting the database,
//! listing links and issuing bearer tokens without going through HTTP.
//!
//! # Usage
//!
//! ```bash
//! # Apply pending migrations (baselines a legacy schema first)
//! cargo run --bin admin -- db migrate
//!
//! # Show the migration chain with applied markers
//! cargo run --bin admin -- db history
//!
//! # List links in display order
//! cargo run --bin admin -- links
//!
//! # Issue a bearer token for the configured admin
//! cargo run --bin admin -- token issue
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_*` (required): PostgreSQL connection
//! - `ADMIN_USERNAME`, `ADMIN_PASSWORD`, `SECRET_KEY`: needed by `token issue`

use sgtl_api::application::services::{AuthService, LinkService};
use sgtl_api::config;
use sgtl_api::infrastructure::persistence::{PgLinkRepository, migrations};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Password;
use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::mpsc;

/// CLI tool for managing sgtl-api.
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
    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// List links in display order
    Links,

    /// Bearer token operations
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,

    /// Apply pending migrations
    Migrate,

    /// Show migration history
    History,
}

/// Token subcommands.
#[derive(Subcommand)]
enum TokenAction {
    /// Issue a bearer token for the admin identity
    Issue {
        /// Username to log in as (defaults to ADMIN_USERNAME)
        #[arg(short, long)]
        username: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Db { action } => {
            let pool = connect().await?;
            handle_db_action(action, &pool).await?;
        }
        Commands::Links => {
            let pool = connect().await?;
            list_links(pool).await?;
        }
        Commands::Token { action } => handle_token_action(action)?,
    }

    Ok(())
}

async fn connect() -> Result<PgPool> {
    let database_url = config::database_url_from_env()?;

    PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")
}

/// Handles database commands.
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
            let applied = migrations::applied_revisions(pool).await?;

            println!("  PostgreSQL: {}", version.bright_white());
            match applied.last() {
                Some(head) => println!("  Schema:     {}", head.to_string().bright_white()),
                None => println!("  Schema:     {}", "untracked".yellow()),
            }
            println!();
        }
        DbAction::Migrate => {
            println!("{}", "🛠  Applying migrations...".bright_blue());

            if migrations::run(pool).await? {
                println!("{}", "  Existing links table baselined".yellow());
            }

            println!("{}", "✅ Schema is up to date".green().bold());
        }
        DbAction::History => show_history(pool).await?,
    }

    Ok(())
}

/// Prints the migration chain, oldest first.
///
/// # Output Format
///
/// ```text
/// 📜 Migration History
///
///   [x] 2024111801  (base)        create links table
///   [x] 2024111802  <- 2024111801 add descricao to links
///   [ ] 2024120101  <- 2024111803 add publicado to links
/// ```
async fn show_history(pool: &PgPool) -> Result<()> {
    println!("{}", "📜 Migration History".bright_blue().bold());
    println!();

    let chain = migrations::MigrationChain::current()?;
    let applied = migrations::applied_revisions(pool).await?;

    for revision in chain.revisions() {
        let marker = if applied.contains(&revision.revision) {
            "[x]".green()
        } else {
            "[ ]".bright_black()
        };
        let parent = match revision.predecessor {
            Some(p) => format!("<- {}", p),
            None => "(base)".to_string(),
        };

        println!(
            "  {} {:<11} {:<13} {}",
            marker,
            revision.revision.to_string().bright_white(),
            parent.bright_black(),
            revision.description
        );
    }

    println!();
    println!(
        "  Head: {}",
        chain.head().revision.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Prints every link in display order.
async fn list_links(pool: PgPool) -> Result<()> {
    println!("{}", "🔗 Links".bright_blue().bold());
    println!();

    // Nothing is published from a read, the receiver can go.
    let (tx, _rx) = mpsc::channel(1);
    let repo = Arc::new(PgLinkRepository::new(Arc::new(pool)));
    let service = LinkService::new(repo, tx);

    let links = service
        .list_links()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    println!(
        "  {:<5} {:<5} {:<30} {}",
        "Ordem".bright_white().bold(),
        "ID".bright_white().bold(),
        "Titulo".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in &links {
        println!(
            "  {:<5} {:<5} {:<30} {}",
            link.ordem.to_string().bright_black(),
            link.id.to_string().bright_black(),
            link.titulo.cyan(),
            link.url
        );
    }

    println!();
    println!(
        "  Total: {}",
        links.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Dispatches token commands.
fn handle_token_action(action: TokenAction) -> Result<()> {
    match action {
        TokenAction::Issue { username } => issue_token(username),
    }
}

/// Logs in through [`AuthService`] and prints the resulting token.
///
/// The password is always prompted, never taken from arguments.
fn issue_token(username: Option<String>) -> Result<()> {
    println!("{}", "🔑 Issue Bearer Token".bright_blue().bold());
    println!();

    let config = config::load_from_env()?;
    let username = username.unwrap_or_else(|| config.admin_username.clone());

    let password = Password::new()
        .with_prompt(format!("Password for {}", username))
        .interact()?;

    let auth = AuthService::new(config.auth_settings()?);
    let token = auth
        .login(&username, &password)
        .map_err(|e| anyhow::anyhow!("Login failed: {}", e))?;

    println!();
    println!("{}", "✅ Token issued".green().bold());
    println!(
        "  Expires in: {} min",
        config.access_token_expire_minutes.to_string().bright_white()
    );
    println!();
    println!("{}", "Add this to your requests:".bright_white());
    println!(
        "  {}: Bearer {}",
        "Authorization".bright_cyan(),
        token.access_token.bright_yellow()
    );
    println!();

    Ok(())
}
