use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use crate::report::ReportRequest;

use super::archive::{ArchiveError, ReportArchive, ReportId};
use super::service::{ReportService, ReportServiceError};

const RECENT_LIMIT: usize = 20;

/// Router builder exposing HTTP endpoints for intake and archive lookup.
pub fn report_router<A>(service: Arc<ReportService<A>>) -> Router
where
    A: ReportArchive + 'static,
{
    Router::new()
        .route(
            "/api/v1/reports",
            post(submit_handler::<A>).get(recent_handler::<A>),
        )
        .route("/api/v1/reports/:report_id", get(fetch_handler::<A>))
        .route(
            "/api/v1/reports/:report_id/document",
            get(document_handler::<A>),
        )
        .with_state(service)
}

pub(crate) async fn submit_handler<A>(
    State(service): State<Arc<ReportService<A>>>,
    axum::Json(request): axum::Json<ReportRequest>,
) -> Response
where
    A: ReportArchive + 'static,
{
    match service.submit(request) {
        Ok(stored) => (StatusCode::CREATED, axum::Json(stored.archived_view())).into_response(),
        Err(ReportServiceError::Intake(violation)) => {
            let payload = json!({
                "error": violation.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(ReportServiceError::Archive(ArchiveError::Conflict)) => {
            let payload = json!({
                "error": "report already archived",
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn fetch_handler<A>(
    State(service): State<Arc<ReportService<A>>>,
    Path(report_id): Path<String>,
) -> Response
where
    A: ReportArchive + 'static,
{
    let id = ReportId(report_id);
    match service.fetch(&id) {
        Ok(stored) => (StatusCode::OK, axum::Json(stored.detail_view())).into_response(),
        Err(ReportServiceError::Archive(ArchiveError::NotFound)) => {
            not_found_response(&id)
        }
        Err(other) => internal_error_response(other),
    }
}

pub(crate) async fn document_handler<A>(
    State(service): State<Arc<ReportService<A>>>,
    Path(report_id): Path<String>,
) -> Response
where
    A: ReportArchive + 'static,
{
    let id = ReportId(report_id);
    match service.fetch(&id) {
        Ok(stored) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            stored.document,
        )
            .into_response(),
        Err(ReportServiceError::Archive(ArchiveError::NotFound)) => {
            not_found_response(&id)
        }
        Err(other) => internal_error_response(other),
    }
}

pub(crate) async fn recent_handler<A>(
    State(service): State<Arc<ReportService<A>>>,
) -> Response
where
    A: ReportArchive + 'static,
{
    match service.recent(RECENT_LIMIT) {
        Ok(reports) => {
            let views: Vec<_> = reports
                .iter()
                .map(|stored| stored.archived_view())
                .collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(other) => internal_error_response(other),
    }
}

fn not_found_response(id: &ReportId) -> Response {
    let payload = json!({
        "report_id": id.0,
        "error": "report not found",
    });
    (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
}

fn internal_error_response(error: ReportServiceError) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
