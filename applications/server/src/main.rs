/// Shelf Server - self-hosted audio library
use clap::{Parser, Subcommand};
use shelf_server::{
    api,
    config::ServerConfig,
    services::{FileStorage, LibraryService},
    state::AppState,
};
use shelf_storage::SqliteMetadataStore;
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "shelf-server")]
#[command(about = "Self-hosted audio library server", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./config.toml when present)
    #[arg(short, long, global = true, env = "SHELF_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// List all songs
    List,
    /// Delete every song and every file in the uploads directory
    Purge,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shelf_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = ServerConfig::load(cli.config.as_deref())?;
    config.validate()?;

    match cli.command {
        Commands::Serve => serve(config).await?,
        Commands::List => list_songs(config).await?,
        Commands::Purge => purge(config).await?,
    }

    Ok(())
}

/// Open both stores and wrap them in the library service
async fn open_library(config: &ServerConfig) -> anyhow::Result<Arc<LibraryService>> {
    let file_storage = FileStorage::new(config.storage.uploads_dir.clone());
    file_storage.initialize().await?;
    tracing::info!("Uploads directory: {}", file_storage.base_path().display());

    ensure_sqlite_parent_dir(&config.storage.database_url).await?;
    let metadata = SqliteMetadataStore::connect(&config.storage.database_url).await?;
    tracing::info!("Database connected");

    Ok(Arc::new(LibraryService::new(
        Arc::new(file_storage),
        Arc::new(metadata),
    )))
}

/// `create_if_missing` makes the file but not its directory
async fn ensure_sqlite_parent_dir(database_url: &str) -> std::io::Result<()> {
    let Some(path) = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
    else {
        return Ok(());
    };

    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() || path == ":memory:" {
        return Ok(());
    }

    match std::path::Path::new(path).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => tokio::fs::create_dir_all(parent).await,
        _ => Ok(()),
    }
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    tracing::info!("Starting Shelf Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let library = open_library(&config).await?;
    let app_state = AppState::new(Arc::clone(&library));
    let app = api::create_router(app_state, &config);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    library.close().await;
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

async fn list_songs(config: ServerConfig) -> anyhow::Result<()> {
    let library = open_library(&config).await?;
    let tracks = library.list().await?;

    println!("Songs:");
    for track in &tracks {
        println!("  {} - {} ({})", track.id, track.title, track.file_path);
    }
    println!("{} song(s)", tracks.len());

    library.close().await;
    Ok(())
}

async fn purge(config: ServerConfig) -> anyhow::Result<()> {
    let library = open_library(&config).await?;
    let outcome = library.delete_all().await?;

    println!(
        "Deleted {} song(s); removed {} file(s), {} could not be removed",
        outcome.rows_affected, outcome.files_removed, outcome.files_failed
    );

    library.close().await;
    Ok(())
}
