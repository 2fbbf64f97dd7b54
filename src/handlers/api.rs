use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    response::sse::{Event, Sse},
};
use futures::stream::{Stream, StreamExt};
use tracing::info;

use crate::fixtures;
use crate::intake::{ACCEPTED_EXTENSIONS, FileMeta};
use crate::records::UploadRecord;
use crate::session::IntakeReport;
use crate::state::AppState;

pub async fn server_info(State(state): State<AppState>) -> Json<serde_json::Value> {
    let ips = local_ip_address::list_afinet_netifas()
        .map(|list| {
            list.into_iter()
                .filter(|(_, ip)| ip.is_ipv4() && !ip.is_loopback())
                .map(|(_, ip)| ip.to_string())
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    Json(serde_json::json!({
        "ips": ips,
        "port": state.settings.server_port,
        "host_url": state.host_url,
        "accepted_extensions": ACCEPTED_EXTENSIONS,
        "max_file_size_mb": state.settings.max_file_size_mb,
    }))
}

pub async fn list_uploads(State(state): State<AppState>) -> Json<Vec<UploadRecord>> {
    Json(state.session.snapshot())
}

pub async fn intake_files(
    State(state): State<AppState>,
    Json(files): Json<Vec<FileMeta>>,
) -> (StatusCode, Json<IntakeReport>) {
    info!("Intake requested for {} file(s)", files.len());
    let report = state.session.intake(files);
    (StatusCode::ACCEPTED, Json(report))
}

pub async fn remove_upload(Path(id): Path<String>, State(state): State<AppState>) -> StatusCode {
    state.session.remove(&id);
    StatusCode::NO_CONTENT
}

pub async fn request_analysis(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    match state.session.request_analysis(&id) {
        Some(handle) => Json(handle).into_response(),
        None => (StatusCode::NOT_FOUND, "Unknown document").into_response(),
    }
}

pub async fn analysis_report(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    match state.session.get(&id) {
        Some(record) => Json(fixtures::analysis_report(&record)).into_response(),
        None => (StatusCode::NOT_FOUND, "Unknown document").into_response(),
    }
}

pub async fn sse_handler(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let rx = state.tx.subscribe();
    let stream = tokio_stream::wrappers::BroadcastStream::new(rx).map(|msg| match msg {
        Ok(msg) => Ok(Event::default().data(msg)),
        Err(_) => Ok(Event::default().comment("keepalive")),
    });

    Sse::new(stream).keep_alive(axum::response::sse::KeepAlive::default())
}
