//! Mixtape server binary
//!
//! `mixtape-server serve` runs the HTTP server; `add-user` and `list-users`
//! are small admin commands against the same database.

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mixtape_core::types::CreateUser;
use mixtape_server::services::auth::AuthService;
use mixtape_server::services::image_storage::ImageStorage;
use mixtape_server::{create_router, AppState, ServerConfig};

#[derive(Parser)]
#[command(name = "mixtape-server", about = "Mixtape media library server")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, env = "MIXTAPE_CONFIG")]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Create a user account
    AddUser {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Display name; defaults to the username
        #[arg(long)]
        name: Option<String>,
    },
    /// List all user accounts
    ListUsers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("mixtape_server=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::load(cli.config.as_deref()).context("Failed to load config")?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::AddUser {
            username,
            email,
            password,
            name,
        } => add_user(config, username, email, password, name).await,
        Command::ListUsers => list_users(config).await,
    }
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let pool = mixtape_storage::create_pool(&config.database.url)
        .await
        .context("Failed to open database")?;
    mixtape_storage::run_migrations(&pool)
        .await
        .context("Failed to run migrations")?;

    let auth = Arc::new(AuthService::new(
        &config.auth.jwt_secret,
        config.auth.access_token_hours,
        config.auth.refresh_token_days,
    ));

    let images = Arc::new(ImageStorage::new(&config.storage.media_dir));
    images
        .initialize()
        .await
        .context("Failed to prepare media directory")?;

    let state = AppState::new(pool, auth, images);
    let router = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;

    tracing::info!("Mixtape server listening on {address}");

    axum::serve(listener, router).await?;

    Ok(())
}

async fn add_user(
    config: ServerConfig,
    username: String,
    email: String,
    password: String,
    name: Option<String>,
) -> anyhow::Result<()> {
    let pool = mixtape_storage::create_pool(&config.database.url).await?;
    mixtape_storage::run_migrations(&pool).await?;

    let auth = AuthService::new(
        &config.auth.jwt_secret,
        config.auth.access_token_hours,
        config.auth.refresh_token_days,
    );
    let password_hash = auth.hash_password(&password)?;

    let user = mixtape_storage::users::create(
        &pool,
        CreateUser {
            name: name.unwrap_or_else(|| username.clone()),
            image_url: None,
            username: Some(username),
            email: Some(email),
            password_hash: Some(password_hash),
        },
    )
    .await?;

    println!("Created user {} ({})", user.name, user.id);

    Ok(())
}

async fn list_users(config: ServerConfig) -> anyhow::Result<()> {
    let pool = mixtape_storage::create_pool(&config.database.url).await?;
    mixtape_storage::run_migrations(&pool).await?;

    let users = mixtape_storage::users::get_all(&pool).await?;

    if users.is_empty() {
        println!("No users");
        return Ok(());
    }

    for user in users {
        println!(
            "{}  {}  {}",
            user.id,
            user.name,
            user.email.as_deref().unwrap_or("-")
        );
    }

    Ok(())
}
