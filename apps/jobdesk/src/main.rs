mod chat;
mod config;
mod cv;
mod errors;
mod models;
mod profile;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::chat::responder::{spawn_auto_responder, RandomSentenceSource};
use crate::chat::summary::JsonFileSummaryRepository;
use crate::chat::ChatSession;
use crate::config::Config;
use crate::cv::AvatarService;
use crate::profile::ProfileEditor;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting jobdesk v{}", env!("CARGO_PKG_VERSION"));

    let avatars = AvatarService::new(&config.avatar_base_url)?;

    // Chat summaries persist across restarts; the transcript does not.
    let summaries = Arc::new(JsonFileSummaryRepository::new(&config.chat_store_path));
    info!("Chat summaries stored at {}", summaries.path().display());
    let chat = Arc::new(ChatSession::new(
        config.conversation_id,
        config.partner_name.clone(),
        summaries,
    ));

    let responder = spawn_auto_responder(
        chat.transcript(),
        Arc::new(RandomSentenceSource::default()),
        config.auto_reply_interval,
    );

    let state = AppState {
        profile: Arc::new(RwLock::new(ProfileEditor::default())),
        chat,
        avatars,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    responder.stop();
    info!("Shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
