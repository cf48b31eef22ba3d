mod config;
mod download;
mod error;
mod extractor;
mod handlers;
mod platform;
mod quality;
mod state;

use axum::{
    Router,
    http::header,
    routing::{get, post}
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::Config;
use handlers::api;
use state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([header::CONTENT_DISPOSITION]);

    Router::new()
        .route("/api/video-info", post(api::video_info))
        .route("/api/download", post(api::download_video))
        .route("/api/health", get(api::health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vidgrab=info,yt_dlp=info,tower_http=debug".into())
        )
        .init();

    let config = Config::from_env()?;

    tokio::fs::create_dir_all(&config.download_dir).await?;
    tracing::info!("Saving downloads to {}", config.download_dir.display());

    let yt_dlp = config.build_client();

    match yt_dlp.check_binary().await {
        Ok(version) => tracing::info!("yt-dlp version: {}", version),
        Err(e) => tracing::warn!("yt-dlp not found or not executable: {}", e)
    }

    let app = router(AppState::new(yt_dlp, config.download_dir.clone()));

    let addr = config.bind_addr();
    tracing::info!("listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
