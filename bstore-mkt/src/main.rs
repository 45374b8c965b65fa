//! bstore-mkt - Beat Marketplace Service
//!
//! Catalog and submission service for the beat marketplace: producers
//! register and upload beats; visitors browse the home, detail, and
//! profile views. Identity/session management, payment, and transcoding
//! live in external collaborators.

use anyhow::Result;
use clap::Parser;
use tracing::info;

use bstore_mkt::services::{Marketplace, MediaStore};
use bstore_mkt::AppState;

#[derive(Parser, Debug)]
#[command(name = "bstore-mkt", about = "Beat marketplace catalog & submission service")]
struct Args {
    /// Root folder holding the database and uploaded media
    /// (falls back to BSTORE_ROOT, then the config file, then the OS default)
    #[arg(long)]
    root_folder: Option<String>,

    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:5780")]
    listen: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!(
        "Starting bstore-mkt (Beat Marketplace) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    // Resolve root folder and make sure the layout exists
    let root_folder = bstore_common::config::resolve_root_folder(args.root_folder.as_deref());
    bstore_common::config::ensure_root_layout(&root_folder)?;
    info!("Root folder: {}", root_folder.display());

    // Open or create the database
    let db_path = bstore_common::config::database_path(&root_folder);
    info!("Database: {}", db_path.display());
    let pool = bstore_common::db::init_database(&db_path).await?;

    let media = MediaStore::new(bstore_common::config::media_dir(&root_folder));
    let marketplace = Marketplace::new(pool, media);
    let state = AppState::new(marketplace);

    let app = bstore_mkt::build_router(state);

    let listener = tokio::net::TcpListener::bind(&args.listen).await?;
    info!("Listening on http://{}", args.listen);
    info!("Health check: http://{}/health", args.listen);

    axum::serve(listener, app).await?;

    Ok(())
}
