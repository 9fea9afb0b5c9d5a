use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Lookup table a report index points into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LookupTable {
    Charges,
    Durations,
}

impl std::fmt::Display for LookupTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupTable::Charges => write!(f, "charges"),
            LookupTable::Durations => write!(f, "durations"),
        }
    }
}

/// Errors raised by the report model
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    #[error("Index {index} is out of range for {table} table with {len} entries")]
    DataInvalid {
        table: LookupTable,
        index: usize,
        len: usize,
    },
}
