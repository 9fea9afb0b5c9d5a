use serde::Serialize;
use utoipa::ToSchema;

use crate::features::reports::models::{ChargeCatalog, Report, ReportError};

/// Report snapshot together with its derived fields
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportSnapshotDto {
    #[serde(flatten)]
    pub report: Report,
    pub human_readable_charge: String,
    pub time_label: String,
    pub is_description_valid: bool,
    pub is_photos_valid: bool,
    pub is_contact_valid: bool,
    pub is_location_valid: bool,
}

impl ReportSnapshotDto {
    pub fn from_report(report: Report, catalog: &ChargeCatalog) -> Result<Self, ReportError> {
        Ok(Self {
            human_readable_charge: report.human_readable_charge(catalog)?.to_string(),
            time_label: report.time_label(catalog)?.to_string(),
            is_description_valid: report.is_description_valid(),
            is_photos_valid: report.is_photos_valid(),
            is_contact_valid: report.is_contact_valid(),
            is_location_valid: report.is_location_valid(),
            report,
        })
    }
}

/// Lookup tables that charge indices refer to
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChargeCatalogDto {
    pub charges: Vec<String>,
    pub durations: Vec<String>,
}

impl From<&ChargeCatalog> for ChargeCatalogDto {
    fn from(catalog: &ChargeCatalog) -> Self {
        Self {
            charges: catalog.charges().to_vec(),
            durations: catalog.durations().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_json_carries_derived_fields() {
        let catalog = ChargeCatalog::new(vec!["Gehweg".to_string()], vec!["kurz".to_string()])
            .unwrap();
        let snapshot = ReportSnapshotDto::from_report(Report::new(), &catalog).unwrap();
        let json = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(json["humanReadableCharge"], "Gehweg");
        assert_eq!(json["timeLabel"], "kurz");
        assert_eq!(json["isDescriptionValid"], false);
        assert_eq!(json["charge"]["selectedTypeIndex"], 0);
        assert_eq!(json["charge"]["blockedOthers"], false);
        assert!(json["images"].as_array().unwrap().is_empty());
        assert!(json["vehicle"]["type"].is_null());
    }
}
