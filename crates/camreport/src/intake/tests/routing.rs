use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::intake::report_router;

async fn read_json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

fn submit_request(payload: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/reports")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request builds")
}

fn passing_payload() -> Value {
    json!({
        "student": { "name": "Jane Student" },
        "subjects": [
            { "code": "0580", "name": "Mathematics", "score": 85.0 },
            { "code": "0625", "name": "Physics", "score": 78.0 },
            { "code": "0500", "name": "First Language English", "score": 92.0 }
        ]
    })
}

#[tokio::test]
async fn submit_endpoint_archives_and_returns_the_listing_view() {
    let (service, _archive) = build_service();
    let router = report_router(service);

    let response = router
        .oneshot(submit_request(&passing_payload()))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json_body(response).await;
    assert_eq!(body["student_name"], "Jane Student");
    assert_eq!(body["overall_grade"], "A");
    assert_eq!(body["subject_count"], 3);
    assert!(body["report_id"].as_str().expect("id").starts_with("rpt-"));
}

#[tokio::test]
async fn submit_endpoint_rejects_invalid_scores_with_422() {
    let (service, _archive) = build_service();
    let router = report_router(service);

    let payload = json!({
        "student": { "name": "Jane Student" },
        "subjects": [
            { "name": "Chemistry", "score": 105.0, "coefficient": 1.0 }
        ]
    });

    let response = router
        .oneshot(submit_request(&payload))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    let message = body["error"].as_str().expect("error message");
    assert!(message.contains("Chemistry"));
}

#[tokio::test]
async fn fetch_endpoint_returns_404_for_unknown_reports() {
    let (service, _archive) = build_service();
    let router = report_router(service);

    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/v1/reports/rpt-424242")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn document_endpoint_serves_the_rendered_card_as_text() {
    let (service, _archive) = build_service();
    let router = report_router(service.clone());

    let stored = service.submit(passing_request()).expect("report archives");

    let response = router
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/reports/{}/document", stored.report_id.0))
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .expect("content type set");
    assert!(content_type.starts_with("text/plain"));

    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    let document = String::from_utf8(body.to_vec()).expect("utf-8 document");
    assert!(document.contains("STATEMENT OF RESULTS"));
}

#[tokio::test]
async fn recent_endpoint_lists_archived_reports() {
    let (service, _archive) = build_service();
    let router = report_router(service.clone());

    service.submit(passing_request()).expect("report archives");

    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/v1/reports")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    let listing = body.as_array().expect("array payload");
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0]["classification"], "Merit");
}
