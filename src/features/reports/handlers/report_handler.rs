use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::reports::dtos::{ChargeCatalogDto, ReportSnapshotDto};
use crate::features::reports::models::{
    MailDraft, ReportAction, SubmissionReadiness, SubmittedReport,
};
use crate::features::reports::services::DraftService;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// Get the charge and duration tables
#[utoipa::path(
    get,
    path = "/api/charges",
    responses(
        (status = 200, description = "Charge catalog", body = ApiResponse<ChargeCatalogDto>),
    ),
    tag = "charges"
)]
pub async fn get_charge_catalog(
    State(service): State<Arc<DraftService>>,
) -> Json<ApiResponse<ChargeCatalogDto>> {
    Json(ApiResponse::success(Some(service.catalog()), None, None))
}

/// List submitted reports, newest first
#[utoipa::path(
    get,
    path = "/api/reports",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Submitted reports", body = ApiResponse<Vec<SubmittedReport>>),
    ),
    tag = "reports"
)]
pub async fn list_submitted_reports(
    State(service): State<Arc<DraftService>>,
    Query(pagination): Query<PaginationQuery>,
) -> Json<ApiResponse<Vec<SubmittedReport>>> {
    let (reports, total) = service.list_submitted(&pagination).await;
    Json(ApiResponse::success(
        Some(reports),
        None,
        Some(Meta { total }),
    ))
}

/// Start a new report draft
#[utoipa::path(
    post,
    path = "/api/reports/drafts",
    responses(
        (status = 200, description = "Draft created", body = ApiResponse<ReportSnapshotDto>),
    ),
    tag = "reports"
)]
pub async fn create_draft(
    State(service): State<Arc<DraftService>>,
) -> Result<Json<ApiResponse<ReportSnapshotDto>>> {
    let snapshot = service.create().await?;
    Ok(Json(ApiResponse::success(Some(snapshot), None, None)))
}

/// Get the current snapshot of a draft
#[utoipa::path(
    get,
    path = "/api/reports/drafts/{id}",
    params(
        ("id" = Uuid, Path, description = "Draft ID")
    ),
    responses(
        (status = 200, description = "Draft found", body = ApiResponse<ReportSnapshotDto>),
        (status = 404, description = "Draft not found"),
        (status = 422, description = "Draft refers to an unknown charge or duration")
    ),
    tag = "reports"
)]
pub async fn get_draft(
    State(service): State<Arc<DraftService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ReportSnapshotDto>>> {
    let snapshot = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(snapshot), None, None)))
}

/// Cancel a draft
#[utoipa::path(
    delete,
    path = "/api/reports/drafts/{id}",
    params(
        ("id" = Uuid, Path, description = "Draft ID")
    ),
    responses(
        (status = 200, description = "Draft discarded"),
        (status = 404, description = "Draft not found")
    ),
    tag = "reports"
)]
pub async fn cancel_draft(
    State(service): State<Arc<DraftService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.cancel(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Report draft discarded".to_string()),
        None,
    )))
}

/// Dispatch an intent against a draft
///
/// Each intent writes exactly one field. Setting an address also refreshes
/// the suggested authority office.
#[utoipa::path(
    post,
    path = "/api/reports/drafts/{id}/actions",
    params(
        ("id" = Uuid, Path, description = "Draft ID")
    ),
    request_body = ReportAction,
    responses(
        (status = 200, description = "Intent applied", body = ApiResponse<ReportSnapshotDto>),
        (status = 400, description = "Malformed intent"),
        (status = 404, description = "Draft not found"),
        (status = 422, description = "Charge or duration index out of range")
    ),
    tag = "reports"
)]
pub async fn dispatch_action(
    State(service): State<Arc<DraftService>>,
    Path(id): Path<Uuid>,
    AppJson(action): AppJson<ReportAction>,
) -> Result<Json<ApiResponse<ReportSnapshotDto>>> {
    let snapshot = service.dispatch(id, action).await?;
    Ok(Json(ApiResponse::success(Some(snapshot), None, None)))
}

/// Completeness of a draft, with reasons for every missing part
#[utoipa::path(
    get,
    path = "/api/reports/drafts/{id}/validation",
    params(
        ("id" = Uuid, Path, description = "Draft ID")
    ),
    responses(
        (status = 200, description = "Draft readiness", body = ApiResponse<SubmissionReadiness>),
        (status = 404, description = "Draft not found")
    ),
    tag = "reports"
)]
pub async fn get_draft_validation(
    State(service): State<Arc<DraftService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<SubmissionReadiness>>> {
    let readiness = service.readiness(id).await?;
    Ok(Json(ApiResponse::success(Some(readiness), None, None)))
}

/// Preview the mail that submission would produce
#[utoipa::path(
    get,
    path = "/api/reports/drafts/{id}/mail",
    params(
        ("id" = Uuid, Path, description = "Draft ID")
    ),
    responses(
        (status = 200, description = "Mail preview", body = ApiResponse<MailDraft>),
        (status = 400, description = "No address or office set"),
        (status = 404, description = "Draft not found")
    ),
    tag = "reports"
)]
pub async fn preview_draft_mail(
    State(service): State<Arc<DraftService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MailDraft>>> {
    let mail = service.preview_mail(id).await?;
    Ok(Json(ApiResponse::success(Some(mail), None, None)))
}

/// Submit a complete draft
#[utoipa::path(
    post,
    path = "/api/reports/drafts/{id}/submit",
    params(
        ("id" = Uuid, Path, description = "Draft ID")
    ),
    responses(
        (status = 200, description = "Report submitted", body = ApiResponse<SubmittedReport>),
        (status = 400, description = "Draft is incomplete"),
        (status = 404, description = "Draft not found")
    ),
    tag = "reports"
)]
pub async fn submit_draft(
    State(service): State<Arc<DraftService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<SubmittedReport>>> {
    let submitted = service.submit(id).await?;
    Ok(Json(ApiResponse::success(
        Some(submitted),
        Some("Anzeige erstellt".to_string()),
        None,
    )))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    use crate::features::offices::OfficeDirectory;
    use crate::features::reports::models::ChargeCatalog;
    use crate::features::reports::routes;
    use crate::features::reports::services::{DraftService, MailRenderer};
    use crate::shared::templates::TemplateEngine;

    use super::*;

    fn server() -> TestServer {
        let service = DraftService::new(
            Arc::new(ChargeCatalog::bundled().unwrap()),
            Arc::new(OfficeDirectory::bundled().unwrap()),
            MailRenderer::new(TemplateEngine::bundled().unwrap()),
        );
        TestServer::new(routes::routes(Arc::new(service))).unwrap()
    }

    async fn create(server: &TestServer) -> String {
        let response = server.post("/api/reports/drafts").await;
        response.assert_status_ok();
        let body: Value = response.json();
        body["data"]["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_get_charge_catalog() {
        let server = server();
        let response = server.get("/api/charges").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert!(!body["data"]["charges"].as_array().unwrap().is_empty());
        assert_eq!(body["data"]["durations"][0], "bis zu 3 Minuten");
    }

    #[tokio::test]
    async fn test_create_draft_defaults() {
        let server = server();
        let response = server.post("/api/reports/drafts").await;
        response.assert_status_ok();
        let body: Value = response.json();

        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["charge"]["selectedTypeIndex"], 0);
        assert_eq!(body["data"]["charge"]["selectedDurationIndex"], 0);
        assert_eq!(body["data"]["charge"]["blockedOthers"], false);
        assert_eq!(body["data"]["isDescriptionValid"], false);
    }

    #[tokio::test]
    async fn test_dispatch_vehicle_intents() {
        let server = server();
        let id = create(&server).await;
        let path = format!("/api/reports/drafts/{}/actions", id);

        server
            .post(&path)
            .json(&json!({"type": "setVehicleColor", "color": "red"}))
            .await
            .assert_status_ok();
        server
            .post(&path)
            .json(&json!({"type": "setVehicleType", "vehicleType": "VW"}))
            .await
            .assert_status_ok();
        let response = server
            .post(&path)
            .json(&json!({"type": "setLicensePlateNumber", "number": "B-1234"}))
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["data"]["vehicle"]["type"], "VW");
        assert_eq!(body["data"]["isDescriptionValid"], true);
    }

    #[tokio::test]
    async fn test_dispatch_out_of_range_charge() {
        let server = server();
        let id = create(&server).await;

        let response = server
            .post(&format!("/api/reports/drafts/{}/actions", id))
            .json(&json!({"type": "setChargeType", "index": 10_000}))
            .expect_failure()
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_dispatch_malformed_intent() {
        let server = server();
        let id = create(&server).await;

        let response = server
            .post(&format!("/api/reports/drafts/{}/actions", id))
            .json(&json!({"type": "launchRocket"}))
            .expect_failure()
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_draft() {
        let server = server();
        let response = server
            .get(&format!("/api/reports/drafts/{}", Uuid::new_v4()))
            .expect_failure()
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_validation_lists_missing_parts() {
        let server = server();
        let id = create(&server).await;

        let response = server
            .get(&format!("/api/reports/drafts/{}/validation", id))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["isReady"], false);
        assert_eq!(body["data"]["photos"], false);
        assert_eq!(
            body["data"]["description"]["problems"],
            json!(["missing_type", "missing_color", "missing_license_plate"])
        );
    }

    #[tokio::test]
    async fn test_submit_incomplete_draft() {
        let server = server();
        let id = create(&server).await;

        let response = server
            .post(&format!("/api/reports/drafts/{}/submit", id))
            .expect_failure()
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert!(!body["errors"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_full_report_flow() {
        let server = server();
        let id = create(&server).await;
        let path = format!("/api/reports/drafts/{}/actions", id);

        let actions = [
            json!({"type": "addImage", "image": {
                "id": Uuid::new_v4(),
                "fileName": "IMG_0001.jpg",
                "capturedAt": null
            }}),
            json!({"type": "setVehicleColor", "color": "schwarz"}),
            json!({"type": "setVehicleType", "vehicleType": "BMW"}),
            json!({"type": "setLicensePlateNumber", "number": "B-XY 1234"}),
            json!({"type": "setChargeDuration", "index": 2}),
            json!({"type": "toggleBlockedOthers"}),
            json!({"type": "setAddress", "address": {
                "street": "Unter den Linden 1",
                "postalCode": "10117",
                "city": "Berlin"
            }}),
            json!({"type": "setContact", "contact": {
                "firstName": "Erika",
                "name": "Mustermann",
                "street": "Heidestraße 17",
                "postalCode": "10557",
                "town": "Berlin",
                "email": "erika@example.org"
            }}),
        ];
        for action in actions {
            server.post(&path).json(&action).await.assert_status_ok();
        }

        let mail: Value = server
            .get(&format!("/api/reports/drafts/{}/mail", id))
            .await
            .json();
        assert_eq!(mail["data"]["recipient"], "bussgeldstelle@polizei.berlin.de");
        assert_eq!(mail["data"]["subject"], "Anzeige B-XY 1234");

        let response = server
            .post(&format!("/api/reports/drafts/{}/submit", id))
            .await;
        response.assert_status_ok();

        let list: Value = server.get("/api/reports").await.json();
        assert_eq!(list["meta"]["total"], 1);
        assert_eq!(list["data"][0]["id"], id.as_str());

        server
            .get(&format!("/api/reports/drafts/{}", id))
            .expect_failure()
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_submitted_huge_page_is_empty() {
        let server = server();
        let response = server
            .get("/api/reports")
            .add_query_param("page", i64::MAX)
            .add_query_param("page_size", 100)
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert!(body["data"].as_array().unwrap().is_empty());
        assert_eq!(body["meta"]["total"], 0);
    }

    #[tokio::test]
    async fn test_cancel_draft() {
        let server = server();
        let id = create(&server).await;

        server
            .delete(&format!("/api/reports/drafts/{}", id))
            .await
            .assert_status_ok();
        server
            .delete(&format!("/api/reports/drafts/{}", id))
            .expect_failure()
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
