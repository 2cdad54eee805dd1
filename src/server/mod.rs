//! JSON HTTP API over the lexicon operations

use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use crate::lexicon::Lexicon;

pub mod routes;

/// Server state
pub struct AppState {
    pub lexicon: Lexicon,
}

pub fn router(lexicon: Lexicon) -> Router {
    let state = Arc::new(AppState { lexicon });

    Router::new()
        .route("/languages", get(routes::get_languages))
        .route("/sources", get(routes::get_sources))
        .route("/records", get(routes::get_records))
        .route("/index", get(routes::get_index))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server(addr: SocketAddr, lexicon: Lexicon) -> anyhow::Result<()> {
    let app = router(lexicon);

    tracing::info!("Starting server on {}", addr);
    println!("🌍 Server running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
