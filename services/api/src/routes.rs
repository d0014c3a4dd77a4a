use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use camreport::error::AppError;
use camreport::grading::GradeEngine;
use camreport::intake::{
    compose_report, report_router, IntakeGuard, ReportArchive, ReportService, RosterImporter,
};
use camreport::report::views::ReportCardSummary;
use camreport::report::{render_document, ReportRequest, StudentIdentity, SubjectScoreInput};
use camreport::subjects::SubjectInfo;
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct ReportPreviewRequest {
    pub(crate) student: StudentIdentity,
    #[serde(default)]
    pub(crate) subjects: Vec<SubjectScoreInput>,
    /// Inline roster CSV, used when no subject rows are given.
    #[serde(default)]
    pub(crate) roster_csv: Option<String>,
    #[serde(default)]
    pub(crate) include_document: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct ReportPreviewResponse {
    pub(crate) summary: ReportCardSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) document: Option<String>,
}

pub(crate) fn with_report_routes<A>(service: Arc<ReportService<A>>) -> axum::Router
where
    A: ReportArchive + 'static,
{
    report_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/subjects", axum::routing::get(subjects_endpoint))
        .route(
            "/api/v1/reports/preview",
            axum::routing::post(preview_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn subjects_endpoint(
    Extension(state): Extension<AppState>,
) -> Json<Vec<SubjectInfo>> {
    Json(state.catalog.iter().cloned().collect())
}

/// Stateless compute: grades the submitted marks and returns the
/// summary (and optionally the rendered document) without archiving.
pub(crate) async fn preview_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<ReportPreviewRequest>,
) -> Result<Json<ReportPreviewResponse>, AppError> {
    let ReportPreviewRequest {
        student,
        subjects,
        roster_csv,
        include_document,
    } = payload;

    let subjects = if subjects.is_empty() {
        match roster_csv {
            Some(csv) => RosterImporter::from_reader(Cursor::new(csv.into_bytes()))?,
            None => Vec::new(),
        }
    } else {
        subjects
    };

    let request = ReportRequest { student, subjects };
    let guard = IntakeGuard::new(state.catalog.as_ref().clone());
    let engine = GradeEngine::default();
    let card = compose_report(&guard, &engine, &request).map_err(AppError::from)?;

    let summary = card.summary();
    let document =
        include_document.then(|| render_document(&summary, Local::now().date_naive()));

    Ok(Json(ReportPreviewResponse { summary, document }))
}
