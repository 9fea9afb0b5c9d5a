use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::reports::handlers;
use crate::features::reports::services::DraftService;

/// Create routes for the reports feature
pub fn routes(service: Arc<DraftService>) -> Router {
    Router::new()
        .route("/api/charges", get(handlers::get_charge_catalog))
        .route("/api/reports", get(handlers::list_submitted_reports))
        .route("/api/reports/drafts", post(handlers::create_draft))
        .route(
            "/api/reports/drafts/{id}",
            get(handlers::get_draft).delete(handlers::cancel_draft),
        )
        .route(
            "/api/reports/drafts/{id}/actions",
            post(handlers::dispatch_action),
        )
        .route(
            "/api/reports/drafts/{id}/validation",
            get(handlers::get_draft_validation),
        )
        .route(
            "/api/reports/drafts/{id}/mail",
            get(handlers::preview_draft_mail),
        )
        .route(
            "/api/reports/drafts/{id}/submit",
            post(handlers::submit_draft),
        )
        .with_state(service)
}
