use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::offices::models::PublicAffairsOffice;
use crate::features::reports::models::catalog::ChargeCatalog;
use crate::features::reports::models::contact::Contact;
use crate::features::reports::models::error::ReportError;
use crate::features::reports::models::validation::{
    DescriptionProblem, DescriptionValidation, SubmissionReadiness,
};

/// Photo attached to a report, kept in capture order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageAsset {
    pub id: Uuid,
    pub file_name: String,
    pub captured_at: Option<DateTime<Utc>>,
}

/// Resolved location of the violation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub postal_code: String,
    pub city: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub color: Option<String>,
    #[serde(rename = "type")]
    pub vehicle_type: Option<String>,
    pub license_plate_number: Option<String>,
}

/// Selected violation type and duration, as indices into a [`ChargeCatalog`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Charge {
    pub selected_duration_index: usize,
    pub selected_type_index: usize,
    pub blocked_others: bool,
}

impl Charge {
    pub fn human_readable_charge<'a>(
        &self,
        catalog: &'a ChargeCatalog,
    ) -> Result<&'a str, ReportError> {
        catalog.charge(self.selected_type_index)
    }

    pub fn time_label<'a>(&self, catalog: &'a ChargeCatalog) -> Result<&'a str, ReportError> {
        catalog.duration(self.selected_duration_index)
    }
}

/// In-progress violation report.
///
/// Snapshots are plain values: intents are applied through
/// [`Report::reduce`], which consumes the snapshot and returns the next one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: Uuid,
    pub images: Vec<ImageAsset>,
    pub address: Option<Address>,
    pub suggested_authority_office: Option<PublicAffairsOffice>,
    pub date: DateTime<Utc>,
    pub vehicle: Vehicle,
    pub charge: Charge,
    pub contact: Contact,
    pub show_edit_description: bool,
}

impl Default for Report {
    fn default() -> Self {
        Self::new()
    }
}

impl Report {
    pub fn new() -> Self {
        Self {
            id: Uuid::now_v7(),
            images: Vec::new(),
            address: None,
            suggested_authority_office: None,
            date: Utc::now(),
            vehicle: Vehicle::default(),
            charge: Charge::default(),
            contact: Contact::default(),
            show_edit_description: false,
        }
    }

    /// Vehicle type, color and license plate are all present and non-empty
    pub fn is_description_valid(&self) -> bool {
        self.validate_description().is_valid
    }

    pub fn is_photos_valid(&self) -> bool {
        !self.images.is_empty()
    }

    pub fn is_contact_valid(&self) -> bool {
        self.contact.is_valid()
    }

    pub fn is_location_valid(&self) -> bool {
        self.address.is_some() && self.suggested_authority_office.is_some()
    }

    pub fn validate_description(&self) -> DescriptionValidation {
        let checks = [
            (&self.vehicle.vehicle_type, DescriptionProblem::MissingType),
            (&self.vehicle.color, DescriptionProblem::MissingColor),
            (
                &self.vehicle.license_plate_number,
                DescriptionProblem::MissingLicensePlate,
            ),
        ];

        let problems: Vec<DescriptionProblem> = checks
            .into_iter()
            .filter(|(value, _)| value.as_deref().is_none_or(str::is_empty))
            .map(|(_, problem)| problem)
            .collect();

        DescriptionValidation::from_problems(problems)
    }

    pub fn readiness(&self) -> SubmissionReadiness {
        SubmissionReadiness::new(
            self.is_photos_valid(),
            self.validate_description(),
            self.contact.invalid_fields(),
            self.is_location_valid(),
        )
    }

    pub fn human_readable_charge<'a>(
        &self,
        catalog: &'a ChargeCatalog,
    ) -> Result<&'a str, ReportError> {
        self.charge.human_readable_charge(catalog)
    }

    pub fn time_label<'a>(&self, catalog: &'a ChargeCatalog) -> Result<&'a str, ReportError> {
        self.charge.time_label(catalog)
    }
}
