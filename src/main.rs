mod error;
mod llm;
mod render;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use time::UtcOffset;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Must run while the process is still single-threaded.
    let offset = UtcOffset::current_local_offset().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "local UTC offset unavailable; timestamps will be UTC");
        UtcOffset::UTC
    });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("failed to build runtime");
    runtime.block_on(serve(offset));
}

async fn serve(offset: UtcOffset) {
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    // The credential and endpoint are required; without them nothing works.
    let llm = match llm::LlmClient::from_env() {
        Ok(client) => {
            tracing::info!(model = client.model(), "LLM client initialized");
            client
        }
        Err(e) => {
            tracing::error!(error = %e, "LLM client not configured");
            std::process::exit(1);
        }
    };

    let state = state::AppState::new(Arc::new(llm), offset);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "tutorgen listening");
    axum::serve(listener, app).await.expect("server failed");
}
