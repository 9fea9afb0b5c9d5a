use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::features::reports::models::error::{LookupTable, ReportError};

/// Charge table shipped with the binary
const BUNDLED_CHARGES: &str = include_str!("../../../../data/charges.json");

/// How long a vehicle was observed at the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ParkingDuration {
    UpToThreeMinutes,
    MoreThanThreeMinutes,
    MoreThanFiveMinutes,
    MoreThanTenMinutes,
    MoreThanFifteenMinutes,
    MoreThanThirtyMinutes,
    MoreThanOneHour,
    MoreThanThreeHours,
}

impl ParkingDuration {
    pub const ALL: [ParkingDuration; 8] = [
        ParkingDuration::UpToThreeMinutes,
        ParkingDuration::MoreThanThreeMinutes,
        ParkingDuration::MoreThanFiveMinutes,
        ParkingDuration::MoreThanTenMinutes,
        ParkingDuration::MoreThanFifteenMinutes,
        ParkingDuration::MoreThanThirtyMinutes,
        ParkingDuration::MoreThanOneHour,
        ParkingDuration::MoreThanThreeHours,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ParkingDuration::UpToThreeMinutes => "bis zu 3 Minuten",
            ParkingDuration::MoreThanThreeMinutes => "länger als 3 Minuten",
            ParkingDuration::MoreThanFiveMinutes => "länger als 5 Minuten",
            ParkingDuration::MoreThanTenMinutes => "länger als 10 Minuten",
            ParkingDuration::MoreThanFifteenMinutes => "länger als 15 Minuten",
            ParkingDuration::MoreThanThirtyMinutes => "länger als 30 Minuten",
            ParkingDuration::MoreThanOneHour => "länger als 1 Stunde",
            ParkingDuration::MoreThanThreeHours => "länger als 3 Stunden",
        }
    }
}

impl std::fmt::Display for ParkingDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Errors that can occur while loading a charge catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Catalog {0} table must not be empty")]
    Empty(LookupTable),
}

/// Accepted catalog file layouts: a bare list of charges, or charges plus durations
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    Charges(Vec<String>),
    Full {
        charges: Vec<String>,
        durations: Option<Vec<String>>,
    },
}

/// Ordered lookup tables that charge indices resolve against.
///
/// Passed explicitly into every operation that formats a charge, so tests and
/// deployments can swap the tables without touching the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ChargeCatalog {
    charges: Vec<String>,
    durations: Vec<String>,
}

impl ChargeCatalog {
    pub fn new(charges: Vec<String>, durations: Vec<String>) -> Result<Self, CatalogError> {
        if charges.is_empty() {
            return Err(CatalogError::Empty(LookupTable::Charges));
        }
        if durations.is_empty() {
            return Err(CatalogError::Empty(LookupTable::Durations));
        }
        Ok(Self { charges, durations })
    }

    /// Catalog built from the bundled charge table and the standard durations
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_CHARGES)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, CatalogError> {
        let (charges, durations) = match serde_json::from_str::<CatalogFile>(content)? {
            CatalogFile::Charges(charges) => (charges, None),
            CatalogFile::Full { charges, durations } => (charges, durations),
        };
        let durations = durations.unwrap_or_else(default_durations);
        Self::new(charges, durations)
    }

    pub fn charges(&self) -> &[String] {
        &self.charges
    }

    pub fn durations(&self) -> &[String] {
        &self.durations
    }

    /// Charge description at `index`, verbatim
    pub fn charge(&self, index: usize) -> Result<&str, ReportError> {
        lookup(&self.charges, LookupTable::Charges, index)
    }

    /// Duration label at `index`, verbatim
    pub fn duration(&self, index: usize) -> Result<&str, ReportError> {
        lookup(&self.durations, LookupTable::Durations, index)
    }

    pub(crate) fn check_index(&self, table: LookupTable, index: usize) -> Result<(), ReportError> {
        match table {
            LookupTable::Charges => self.charge(index).map(|_| ()),
            LookupTable::Durations => self.duration(index).map(|_| ()),
        }
    }
}

fn default_durations() -> Vec<String> {
    ParkingDuration::ALL
        .iter()
        .map(ParkingDuration::to_string)
        .collect()
}

fn lookup(table: &[String], kind: LookupTable, index: usize) -> Result<&str, ReportError> {
    table
        .get(index)
        .map(String::as_str)
        .ok_or(ReportError::DataInvalid {
            table: kind,
            index,
            len: table.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_catalog() -> ChargeCatalog {
        ChargeCatalog::new(
            vec!["Parken auf dem Gehweg".to_string(), "Parken im Halteverbot".to_string()],
            vec!["kurz".to_string(), "lang".to_string()],
        )
        .unwrap()
    }

    #[test]
    fn test_bundled_catalog_loads() {
        let catalog = ChargeCatalog::bundled().unwrap();
        assert!(!catalog.charges().is_empty());
        assert_eq!(catalog.durations().len(), ParkingDuration::ALL.len());
        assert_eq!(catalog.duration(0).unwrap(), "bis zu 3 Minuten");
    }

    #[test]
    fn test_default_durations_follow_display() {
        let catalog = ChargeCatalog::bundled().unwrap();
        assert_eq!(
            catalog.duration(6).unwrap(),
            ParkingDuration::MoreThanOneHour.to_string()
        );
        assert_eq!(ParkingDuration::MoreThanThreeHours.to_string(), "länger als 3 Stunden");
    }

    #[test]
    fn test_charge_lookup_returns_entry_verbatim() {
        let catalog = small_catalog();
        for (i, expected) in catalog.charges().to_vec().iter().enumerate() {
            assert_eq!(catalog.charge(i).unwrap(), expected);
        }
    }

    #[test]
    fn test_out_of_range_lookup_is_data_invalid() {
        let catalog = small_catalog();
        assert_eq!(
            catalog.charge(2),
            Err(ReportError::DataInvalid {
                table: LookupTable::Charges,
                index: 2,
                len: 2
            })
        );
        assert!(matches!(
            catalog.duration(usize::MAX),
            Err(ReportError::DataInvalid {
                table: LookupTable::Durations,
                ..
            })
        ));
    }

    #[test]
    fn test_from_json_accepts_object_with_durations() {
        let catalog =
            ChargeCatalog::from_json(r#"{"charges": ["a", "b"], "durations": ["x"]}"#).unwrap();
        assert_eq!(catalog.charges(), ["a", "b"]);
        assert_eq!(catalog.durations(), ["x"]);
    }

    #[test]
    fn test_from_json_object_without_durations_uses_defaults() {
        let catalog = ChargeCatalog::from_json(r#"{"charges": ["a"]}"#).unwrap();
        assert_eq!(catalog.durations().len(), ParkingDuration::ALL.len());
    }

    #[test]
    fn test_empty_tables_are_rejected() {
        assert!(matches!(
            ChargeCatalog::from_json("[]"),
            Err(CatalogError::Empty(LookupTable::Charges))
        ));
        assert!(matches!(
            ChargeCatalog::from_json(r#"{"charges": ["a"], "durations": []}"#),
            Err(CatalogError::Empty(LookupTable::Durations))
        ));
    }

    #[test]
    fn test_invalid_json_is_rejected() {
        assert!(matches!(
            ChargeCatalog::from_json("not json"),
            Err(CatalogError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            ChargeCatalog::from_path("does/not/exist.json"),
            Err(CatalogError::Io(_))
        ));
    }
}
