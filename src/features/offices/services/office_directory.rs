use std::path::Path;

use thiserror::Error;

use crate::features::offices::models::PublicAffairsOffice;
use crate::features::reports::models::Address;

/// Office directory shipped with the binary
const BUNDLED_OFFICES: &str = include_str!("../../../../data/offices.json");

#[derive(Debug, Error)]
pub enum OfficeDirectoryError {
    #[error("Failed to read office directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse office directory: {0}")]
    Json(#[from] serde_json::Error),
}

/// Resolves the office responsible for an address
pub trait OfficeLookup: Send + Sync {
    fn suggest(&self, address: &Address) -> Option<PublicAffairsOffice>;
}

/// Static list of offices loaded once at startup
#[derive(Debug, Clone, Default)]
pub struct OfficeDirectory {
    offices: Vec<PublicAffairsOffice>,
}

impl OfficeDirectory {
    pub fn new(offices: Vec<PublicAffairsOffice>) -> Self {
        Self { offices }
    }

    pub fn bundled() -> Result<Self, OfficeDirectoryError> {
        Self::from_json(BUNDLED_OFFICES)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, OfficeDirectoryError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, OfficeDirectoryError> {
        let offices: Vec<PublicAffairsOffice> = serde_json::from_str(content)?;
        Ok(Self::new(offices))
    }

    pub fn len(&self) -> usize {
        self.offices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offices.is_empty()
    }
}

impl OfficeLookup for OfficeDirectory {
    fn suggest(&self, address: &Address) -> Option<PublicAffairsOffice> {
        let by_postal_code = self
            .offices
            .iter()
            .find(|office| office.covers_postal_code(&address.postal_code));

        let office = by_postal_code.or_else(|| {
            self.offices
                .iter()
                .find(|office| office.matches_city(&address.city))
        });

        match office {
            Some(office) => {
                tracing::debug!(
                    "Suggested office '{}' for {} {}",
                    office.name,
                    address.postal_code,
                    address.city
                );
                Some(office.clone())
            }
            None => {
                tracing::debug!(
                    "No office found for {} {}",
                    address.postal_code,
                    address.city
                );
                None
            }
        }
    }
}
