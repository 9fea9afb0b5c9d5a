use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::reports::models::report::Report;

/// Mail handed to the user's mail client for delivery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MailDraft {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

/// Report that left the draft stage, kept for the home list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedReport {
    pub id: Uuid,
    pub report: Report,
    pub mail: MailDraft,
    pub submitted_at: DateTime<Utc>,
}
