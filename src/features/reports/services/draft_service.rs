use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::offices::OfficeLookup;
use crate::features::reports::dtos::{ChargeCatalogDto, ReportSnapshotDto};
use crate::features::reports::models::{
    ChargeCatalog, MailDraft, Report, ReportAction, SubmissionReadiness, SubmittedReport,
};
use crate::features::reports::services::MailRenderer;
use crate::shared::constants::DEFAULT_MAX_DRAFTS;
use crate::shared::types::PaginationQuery;

/// Service that owns report drafts and dispatches intents against them.
///
/// At most `max_drafts` drafts are held; creating one more evicts the
/// oldest. Submitted reports are kept until restart.
pub struct DraftService {
    catalog: Arc<ChargeCatalog>,
    offices: Arc<dyn OfficeLookup>,
    mail: MailRenderer,
    max_drafts: usize,
    drafts: RwLock<HashMap<Uuid, Report>>,
    submitted: RwLock<Vec<SubmittedReport>>,
}

impl DraftService {
    pub fn new(
        catalog: Arc<ChargeCatalog>,
        offices: Arc<dyn OfficeLookup>,
        mail: MailRenderer,
    ) -> Self {
        Self {
            catalog,
            offices,
            mail,
            max_drafts: DEFAULT_MAX_DRAFTS,
            drafts: RwLock::new(HashMap::new()),
            submitted: RwLock::new(Vec::new()),
        }
    }

    pub fn with_max_drafts(mut self, max_drafts: usize) -> Self {
        self.max_drafts = max_drafts.max(1);
        self
    }

    pub fn catalog(&self) -> ChargeCatalogDto {
        ChargeCatalogDto::from(self.catalog.as_ref())
    }

    /// Start a new, empty draft
    pub async fn create(&self) -> Result<ReportSnapshotDto> {
        let report = Report::new();
        let snapshot = ReportSnapshotDto::from_report(report.clone(), &self.catalog)?;

        let mut drafts = self.drafts.write().await;
        while drafts.len() >= self.max_drafts {
            // v7 ids sort by creation time
            let Some(oldest) = drafts.keys().min().copied() else {
                break;
            };
            drafts.remove(&oldest);
            tracing::warn!("Draft limit {} reached, evicted draft {}", self.max_drafts, oldest);
        }
        drafts.insert(report.id, report);
        drop(drafts);

        tracing::info!("Report draft created: id={}", snapshot.report.id);

        Ok(snapshot)
    }

    pub async fn get(&self, id: Uuid) -> Result<ReportSnapshotDto> {
        let report = self.find(id).await?;
        Ok(ReportSnapshotDto::from_report(report, &self.catalog)?)
    }

    /// Apply one intent to a draft and return the new snapshot.
    ///
    /// A rejected intent leaves the stored draft untouched.
    pub async fn dispatch(&self, id: Uuid, action: ReportAction) -> Result<ReportSnapshotDto> {
        let mut drafts = self.drafts.write().await;
        let current = drafts.get(&id).ok_or_else(|| draft_not_found(id))?;

        let action_name = action.name();
        let sets_address = matches!(action, ReportAction::SetAddress { .. });

        let mut next = current
            .clone()
            .reduce(action, &self.catalog)
            .inspect_err(|e| {
                tracing::warn!("Rejected {} for draft {}: {}", action_name, id, e);
            })?;

        if sets_address {
            next.suggested_authority_office = next
                .address
                .as_ref()
                .and_then(|address| self.offices.suggest(address));
        }

        drafts.insert(id, next.clone());
        tracing::debug!("Applied {} to draft {}", action_name, id);

        Ok(ReportSnapshotDto::from_report(next, &self.catalog)?)
    }

    /// Discard a draft without submitting it
    pub async fn cancel(&self, id: Uuid) -> Result<()> {
        self.drafts
            .write()
            .await
            .remove(&id)
            .ok_or_else(|| draft_not_found(id))?;

        tracing::info!("Report draft cancelled: id={}", id);
        Ok(())
    }

    pub async fn readiness(&self, id: Uuid) -> Result<SubmissionReadiness> {
        Ok(self.find(id).await?.readiness())
    }

    pub async fn preview_mail(&self, id: Uuid) -> Result<MailDraft> {
        let report = self.find(id).await?;
        Ok(self.mail.render(&report, &self.catalog)?)
    }

    /// Submit a complete draft: render its mail and move it to the submitted list
    pub async fn submit(&self, id: Uuid) -> Result<SubmittedReport> {
        let mut drafts = self.drafts.write().await;
        let report = drafts.get(&id).ok_or_else(|| draft_not_found(id))?;

        let readiness = report.readiness();
        if !readiness.is_ready {
            tracing::info!(
                "Draft {} is not ready for submission, missing: {:?}",
                id,
                readiness.missing()
            );
            return Err(AppError::Incomplete(readiness.reasons()));
        }

        let mail = self.mail.render(report, &self.catalog)?;
        let report = drafts.remove(&id).ok_or_else(|| draft_not_found(id))?;
        drop(drafts);

        let submitted = SubmittedReport {
            id,
            report,
            mail,
            submitted_at: Utc::now(),
        };
        self.submitted.write().await.push(submitted.clone());

        tracing::info!(
            "Report submitted: id={}, recipient={}",
            id,
            submitted.mail.recipient
        );

        Ok(submitted)
    }

    /// Submitted reports, newest first, and the total count
    pub async fn list_submitted(
        &self,
        pagination: &PaginationQuery,
    ) -> (Vec<SubmittedReport>, i64) {
        let submitted = self.submitted.read().await;
        let total = submitted.len() as i64;
        let page = submitted
            .iter()
            .rev()
            .skip(usize::try_from(pagination.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(pagination.limit()).unwrap_or(usize::MAX))
            .cloned()
            .collect();
        (page, total)
    }

    async fn find(&self, id: Uuid) -> Result<Report> {
        self.drafts
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| draft_not_found(id))
    }
}

fn draft_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Report draft {} not found", id))
}
