mod config;
mod fixtures;
mod handlers;
mod intake;
mod records;
mod session;
mod state;
mod transport;

use axum::{
    Router,
    routing::{delete, get, post},
};
use local_ip_address::local_ip;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::broadcast;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{Level, info};

use crate::config::Settings;
use crate::handlers::{api, web};
use crate::session::UploadSession;
use crate::state::AppState;
use crate::transport::SimulatedTransport;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let settings = Settings::new().expect("Failed to load configuration");

    tracing_subscriber::fmt()
        .with_env_filter(&settings.log_level)
        .init();

    info!("Starting Lexiserve...");

    let local_ip = local_ip().unwrap_or("127.0.0.1".parse().unwrap());
    let host_url = format!("http://{}:{}", local_ip, settings.server_port);
    let (tx, _) = broadcast::channel(100);

    let transport = Arc::new(SimulatedTransport::from_settings(&settings));
    let session = UploadSession::new(transport, settings.max_file_size(), tx.clone());

    let state = AppState {
        session,
        settings: settings.clone(),
        host_url: host_url.clone(),
        tx,
    };

    // --- Router Setup ---
    let app = create_app(state);

    let port = settings.server_port;
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Listening on http://{}", addr);
    info!("Network address: {}", host_url);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/api/info", get(api::server_info))
        .route("/api/uploads", get(api::list_uploads).post(api::intake_files))
        .route("/api/uploads/{id}", delete(api::remove_upload))
        .route("/api/uploads/{id}/analyze", post(api::request_analysis))
        .route("/api/analysis/{id}", get(api::analysis_report))
        .route("/events", get(api::sse_handler))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(tower_http::trace::DefaultMakeSpan::new().level(Level::INFO))
                .on_response(tower_http::trace::DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
        .fallback(web::static_handler)
}
