//! CLI administration tool for users-api.
//!
//! Provides commands for inspecting and maintaining the user collection
//! without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Create the unique email index
//! cargo run --bin admin -- db indexes
//!
//! # List users
//! cargo run --bin admin -- users list --page 2 --limit 20
//!
//! # Show a single user
//! cargo run --bin admin -- users show 65a1f0c2e4b0a1b2c3d4e5f6
//!
//! # Delete a user (asks for confirmation unless --yes)
//! cargo run --bin admin -- users delete 65a1f0c2e4b0a1b2c3d4e5f6
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `MONGODB_URL` (or `MONGO_*`), `MONGODB_DATABASE`,
//! `MONGODB_COLLECTION`.

use users_api::application::services::UserService;
use users_api::config::{self, Config, mask_connection_string};
use users_api::domain::repositories::UserRepository;
use users_api::infrastructure::database::connect_with_retry;
use users_api::infrastructure::persistence::MongoUserRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::sync::Arc;

/// CLI tool for managing users-api.
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
    /// Manage users
    Users {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// User management subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// List users page by page
    List {
        /// Page number (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: i64,

        /// Users per page
        #[arg(short, long, default_value_t = 10)]
        limit: i64,
    },

    /// Show a single user
    Show {
        /// User id (24-character hex)
        id: String,
    },

    /// Delete a user
    Delete {
        /// User id (24-character hex)
        id: String,

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

    /// Create the unique email index
    Indexes,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env().context("Invalid configuration")?;

    let client = connect_with_retry(&config)
        .await
        .context("Failed to connect to database")?;
    let database = client.database(&config.database_name);
    let repo = Arc::new(MongoUserRepository::new(&database, &config.collection_name));

    match cli.command {
        Commands::Users { action } => handle_user_action(action, repo).await?,
        Commands::Db { action } => handle_db_action(action, repo, &config).await?,
    }

    Ok(())
}

/// Dispatches user management commands.
async fn handle_user_action(action: UserAction, repo: Arc<MongoUserRepository>) -> Result<()> {
    let service = UserService::new(repo.clone());

    match action {
        UserAction::List { page, limit } => list_users(&service, repo, page, limit).await?,
        UserAction::Show { id } => show_user(&service, &id).await?,
        UserAction::Delete { id, yes } => delete_user(&service, &id, yes).await?,
    }

    Ok(())
}

/// Lists one page of users.
///
/// # Output Format
///
/// ```text
/// 👥 Users (page 1, 2 of 2 total)
///
///   ID                        Name                 Email                          Age
///   ───────────────────────────────────────────────────────────────────────────────────
///   65a1f0c2e4b0a1b2c3d4e5f6  John Doe             john@x.com                     30
/// ```
async fn list_users(
    service: &UserService,
    repo: Arc<MongoUserRepository>,
    page: i64,
    limit: i64,
) -> Result<()> {
    let total = repo
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count users: {}", e))?;

    let users = service
        .find_users(page, limit)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list users: {}", e))?;

    println!(
        "{}",
        format!(
            "👥 Users (page {}, {} of {} total)",
            page.max(1),
            users.len(),
            total
        )
        .bright_blue()
        .bold()
    );
    println!();

    if users.is_empty() {
        println!("{}", "  No users found".yellow());
        return Ok(());
    }

    println!(
        "  {:<25} {:<20} {:<30} {:<5}",
        "ID".bright_white().bold(),
        "Name".bright_white().bold(),
        "Email".bright_white().bold(),
        "Age".bright_white().bold()
    );
    println!("  {}", "─".repeat(83).bright_black());

    for user in &users {
        println!(
            "  {:<25} {:<20} {:<30} {}",
            user.id.bright_black(),
            user.name.cyan(),
            user.email,
            user.age
        );
    }

    println!();

    Ok(())
}

/// Prints a single user's details.
async fn show_user(service: &UserService, id: &str) -> Result<()> {
    let user = service
        .find_user_by_id(id)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("{}", "👤 User".bright_blue().bold());
    println!();
    println!("  ID:      {}", user.id.bright_black());
    println!("  Name:    {}", user.name.cyan());
    println!("  Age:     {}", user.age);
    println!("  Email:   {}", user.email);
    println!("  Address: {}", user.address);
    println!();

    Ok(())
}

/// Deletes a user after confirmation.
///
/// # Safety
///
/// - Shows the record first so the operator sees what is removed
/// - Requires confirmation (default: No) unless `--yes`
async fn delete_user(service: &UserService, id: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑️  Delete User".bright_blue().bold());
    println!();

    let user = service
        .find_user_by_id(id)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("  User:  {}", user.name.cyan());
    println!("  Email: {}", user.email);
    println!("  ID:    {}", user.id.bright_black());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this user?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service
        .delete_user(id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete user: {}", e))?;

    println!("{}", "✅ User deleted".green().bold());
    println!();

    Ok(())
}

/// Dispatches database operation commands.
async fn handle_db_action(
    action: DbAction,
    repo: Arc<MongoUserRepository>,
    config: &Config,
) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            repo.ping()
                .await
                .map_err(|e| anyhow::anyhow!("Database ping failed: {}", e))?;

            let total = repo
                .count()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to count users: {}", e))?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!();
            println!(
                "  Server:     {}",
                mask_connection_string(&config.mongodb_url).bright_black()
            );
            println!("  Database:   {}", config.database_name.cyan());
            println!("  Collection: {}", repo.collection_name().cyan());
            println!("  Users:      {}", total.to_string().bright_white().bold());
            println!();
        }
        DbAction::Indexes => {
            println!("{}", "🔧 Ensuring indexes...".bright_blue());

            repo.ensure_indexes()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to create indexes: {}", e))?;

            println!("{}", "✅ Unique email index is in place".green().bold());
            println!();
        }
    }

    Ok(())
}
