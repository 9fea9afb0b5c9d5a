use utoipa::{Modify, OpenApi};

use crate::features::offices::PublicAffairsOffice;
use crate::features::reports::{dtos as reports_dtos, handlers as reports_handlers, models};
use crate::shared::types::Meta;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Charges
        reports_handlers::get_charge_catalog,
        // Reports
        reports_handlers::list_submitted_reports,
        reports_handlers::create_draft,
        reports_handlers::get_draft,
        reports_handlers::cancel_draft,
        reports_handlers::dispatch_action,
        reports_handlers::get_draft_validation,
        reports_handlers::preview_draft_mail,
        reports_handlers::submit_draft,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Offices
            PublicAffairsOffice,
            // Reports
            models::Report,
            models::ImageAsset,
            models::Address,
            models::Vehicle,
            models::Charge,
            models::Contact,
            models::ReportAction,
            models::DescriptionProblem,
            models::DescriptionValidation,
            models::SubmissionReadiness,
            models::MailDraft,
            models::SubmittedReport,
            models::ParkingDuration,
            reports_dtos::ReportSnapshotDto,
            reports_dtos::ChargeCatalogDto,
        )
    ),
    tags(
        (name = "charges", description = "Charge and duration lookup tables"),
        (name = "reports", description = "Report drafts, intents and submission"),
    ),
    info(
        title = "weg-li API",
        version = "0.1.0",
        description = "Parking violation reports for local authorities",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
