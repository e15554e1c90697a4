//! Text Translator Web - web server exposing the translation form and JSON API.

mod helpers;
mod routes;
mod state;
mod templates;

use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue},
    routing::{get, post},
    Json, Router,
};
use clap::Parser;
use serde_json::json;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use text_translator_core::{AppConfig, Lang, ProviderConfig};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, services::ServeDir,
    set_header::SetResponseHeaderLayer, trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use state::AppState;

/// Request body ceiling enforced before the core ever sees the text
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Resolve the static files directory.
///
/// Priority:
/// 1. Explicit path if provided
/// 2. ./static if it exists
/// 3. Crate's built-in static directory
fn resolve_static_dir(explicit_path: Option<&str>) -> PathBuf {
    if let Some(path) = explicit_path {
        return PathBuf::from(path);
    }

    // Try ./static first (works in development and when running from crate dir)
    let local_static = PathBuf::from("static");
    if local_static.exists() && local_static.is_dir() {
        return local_static;
    }

    // Fall back to compiled-in path (useful for cargo run)
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/static"))
}

#[derive(Parser, Debug)]
#[command(name = "text-translator-web")]
#[command(author, version, about = "Text Translator Web Server", long_about = None)]
struct Args {
    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to bind to
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Source language code
    #[arg(long, default_value = "en")]
    source: String,

    /// Target language code
    #[arg(long, default_value = "kn")]
    target: String,

    /// OpenAI API base URL
    #[arg(long, env = "OPENAI_API_BASE", default_value = "http://localhost:8080/v1")]
    api_base: String,

    /// OpenAI API key
    #[arg(long, env = "OPENAI_API_KEY")]
    api_key: Option<String>,

    /// Model name for OpenAI-compatible API
    #[arg(long, env = "OPENAI_MODEL", default_value = "default_model")]
    model: String,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Static files directory (defaults to ./static or crate's static dir)
    #[arg(long, env = "STATIC_DIR")]
    static_dir: Option<String>,

    /// Clear the on-disk translation cache on startup
    #[arg(long)]
    clear_cache: bool,
}

/// JSON 404 for unknown endpoints.
async fn not_found() -> (axum::http::StatusCode, Json<serde_json::Value>) {
    (
        axum::http::StatusCode::NOT_FOUND,
        Json(json!({ "error": "endpoint not found" })),
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (before parsing args so env vars are available)
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Setup logging
    let default_level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();

    // Clear cache if requested
    if args.clear_cache {
        match text_translator_core::clear_translation_cache() {
            Ok(count) => info!("Cleared {} cached translations", count),
            Err(e) => tracing::warn!("Failed to clear cache: {}", e),
        }
    }

    let config = AppConfig {
        source_lang: Lang::new(&args.source),
        target_lang: Lang::new(&args.target),
        provider: ProviderConfig::new(args.api_base, args.api_key, args.model),
        ..Default::default()
    };

    // Create application state (builds the manager - fails fast on bad config)
    let state = Arc::new(
        AppState::new(config).context("Failed to initialize application state")?,
    );

    // Build router
    let app = Router::new()
        // Pages
        .route("/", get(routes::index).post(routes::translate_form))
        // JSON API
        .route("/api/translate", post(routes::api_translate))
        .route("/api/batch", post(routes::api_batch))
        .route("/api/history", get(routes::get_history))
        // Static files with Cache-Control: no-cache (cache but always revalidate)
        .nest_service(
            "/static",
            ServiceBuilder::new()
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::CACHE_CONTROL,
                    HeaderValue::from_static("no-cache"),
                ))
                .service(ServeDir::new(resolve_static_dir(args.static_dir.as_deref()))),
        )
        .fallback(not_found)
        // Middleware
        .layer(CompressionLayer::new()) // Gzip compression for responses
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES)) // 10MB limit, matches file mode
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
