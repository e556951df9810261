use std::collections::HashMap;
use std::time::Duration;

use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use backend::{
    ApiError, BulkCertificateRequest, CertificateMark, HttpConfig, HttpProgramApi,
    ProgramAdminApi, ProgramQuery,
};
use csr_core::model::program::{ProgramStatus, ReportFormat};
use csr_core::model::{CertificateId, ProgramId, ReportId};
use serde_json::{Value, json};
use tokio::net::TcpListener;

const TOKEN: &str = "secret-token";

fn program_json(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "partner": { "id": "ptn-1", "name": "Sunrise Foundation" },
        "description": "Games for classrooms",
        "scope": { "states": ["Karnataka"], "targetStudents": 500 },
        "duration": { "startDate": "2025-06-01", "endDate": "2026-03-31" },
        "status": "approved",
        "createdAt": "2025-05-01T10:00:00Z",
        "updatedAt": "2025-05-01T10:00:00Z"
    })
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {TOKEN}"))
}

async fn list_programs(
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Missing token" })));
    }
    let name = format!(
        "{} / {}",
        params.get("search").cloned().unwrap_or_default(),
        params.get("status").cloned().unwrap_or_default()
    );
    (
        StatusCode::OK,
        Json(json!({
            "data": [program_json("p1", &name)],
            "pagination": { "page": 2, "limit": 1, "total": 3, "totalPages": 3 }
        })),
    )
}

async fn get_program(Path(id): Path<String>) -> impl IntoResponse {
    if id == "p1" {
        (StatusCode::OK, Json(json!({ "data": program_json("p1", "Digital Literacy") })))
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": format!("Program {id} not found") })),
        )
    }
}

async fn trigger(Path((_id, number)): Path<(String, u8)>) -> impl IntoResponse {
    (
        StatusCode::CONFLICT,
        Json(json!({ "message": format!("Checkpoint {number} is locked") })),
    )
}

async fn bulk_delivered(Json(body): Json<BulkCertificateRequest>) -> impl IntoResponse {
    Json(json!({ "data": { "updated": body.certificate_ids.len() } }))
}

async fn download(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
    format!("report as {}", params.get("format").cloned().unwrap_or_default())
}

async fn broken() -> impl IntoResponse {
    (StatusCode::OK, "not json")
}

async fn slow() -> impl IntoResponse {
    tokio::time::sleep(Duration::from_secs(5)).await;
    Json(json!({ "data": [] }))
}

async fn spawn_stub() -> String {
    let app = Router::new()
        .route("/api/admin/programs", get(list_programs))
        .route("/api/admin/programs/{id}", get(get_program))
        .route(
            "/api/admin/programs/{id}/checkpoints/{number}/trigger",
            post(trigger),
        )
        .route(
            "/api/admin/programs/{id}/certificates/bulk/delivered",
            post(bulk_delivered),
        )
        .route(
            "/api/admin/programs/{id}/reports/{rid}/download",
            get(download),
        )
        .route("/api/admin/programs/{id}/metrics", get(broken))
        .route("/api/admin/partners", get(slow));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api")
}

fn client(base_url: String, token: Option<&str>) -> HttpProgramApi {
    HttpProgramApi::new(HttpConfig {
        base_url,
        token: token.map(str::to_string),
        timeout: Duration::from_secs(2),
    })
    .unwrap()
}

#[tokio::test]
async fn list_sends_query_and_token_and_reads_pagination() {
    let api = client(spawn_stub().await, Some(TOKEN));
    let page = api
        .list_programs(&ProgramQuery {
            search: Some("literacy".into()),
            status: Some(ProgramStatus::Approved),
            page: 2,
            limit: 1,
        })
        .await
        .unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].name, "literacy / approved");
    assert_eq!(page.pagination.total_pages, 3);
    assert!(page.pagination.has_next());
}

#[tokio::test]
async fn missing_token_surfaces_backend_message() {
    let api = client(spawn_stub().await, None);
    let err = api.list_programs(&ProgramQuery::default()).await.unwrap_err();
    match err {
        ApiError::Status { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Missing token");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn not_found_and_conflict_map_to_typed_errors() {
    let api = client(spawn_stub().await, Some(TOKEN));
    let program = api.get_program(&ProgramId::new("p1")).await.unwrap();
    assert_eq!(program.scope.target_students, 500);

    let missing = api.get_program(&ProgramId::new("p9")).await.unwrap_err();
    assert!(matches!(missing, ApiError::NotFound(ref m) if m == "Program p9 not found"));

    let gated = api
        .trigger_checkpoint(&ProgramId::new("p1"), 3)
        .await
        .unwrap_err();
    assert_eq!(gated.message(), "Checkpoint 3 is locked");
}

#[tokio::test]
async fn bulk_marking_posts_all_ids_in_one_request() {
    let api = client(spawn_stub().await, Some(TOKEN));
    let ids = vec![CertificateId::new("c1"), CertificateId::new("c2")];
    let result = api
        .mark_certificates(&ProgramId::new("p1"), &ids, CertificateMark::Delivered)
        .await
        .unwrap();
    assert_eq!(result.updated, 2);
}

#[tokio::test]
async fn download_returns_raw_bytes() {
    let api = client(spawn_stub().await, Some(TOKEN));
    let bytes = api
        .download_report(&ProgramId::new("p1"), &ReportId::new("r1"), ReportFormat::Excel)
        .await
        .unwrap();
    assert_eq!(bytes, b"report as excel");
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let api = client(spawn_stub().await, Some(TOKEN));
    let err = api.get_metrics(&ProgramId::new("p1")).await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn slow_backend_times_out() {
    let api = client(spawn_stub().await, Some(TOKEN));
    let err = api.list_partners().await.unwrap_err();
    assert!(matches!(err, ApiError::Http(ref e) if e.is_timeout()));
    assert_eq!(err.message(), "The server took too long to respond");
}
