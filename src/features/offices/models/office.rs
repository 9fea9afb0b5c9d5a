use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Public affairs office that receives violation reports for its area
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicAffairsOffice {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub postal_codes: Vec<String>,
}

impl PublicAffairsOffice {
    pub fn covers_postal_code(&self, postal_code: &str) -> bool {
        let postal_code = postal_code.trim();
        self.postal_codes.iter().any(|code| code == postal_code)
    }

    pub fn matches_city(&self, city: &str) -> bool {
        self.name.trim().to_lowercase() == city.trim().to_lowercase()
    }
}
