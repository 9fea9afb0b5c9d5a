use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::shared::validation::POSTAL_CODE_REGEX;

/// Witness data printed into the report mail
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Contact {
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,

    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "Street is required"))]
    pub street: String,

    #[validate(regex(path = *POSTAL_CODE_REGEX, message = "Postal code must be five digits"))]
    pub postal_code: String,

    #[validate(length(min = 1, message = "Town is required"))]
    pub town: String,

    /// Optional, printed only when present
    pub phone: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

impl Contact {
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Field names that fail validation, sorted for stable output
    pub fn invalid_fields(&self) -> Vec<String> {
        let mut fields: Vec<String> = match self.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => errors
                .field_errors()
                .keys()
                .map(|field| field.to_string())
                .collect(),
        };
        fields.sort();
        fields
    }
}

#[cfg(test)]
pub(crate) fn sample_contact() -> Contact {
    Contact {
        first_name: "Erika".to_string(),
        name: "Mustermann".to_string(),
        street: "Heidestraße 17".to_string(),
        postal_code: "20095".to_string(),
        town: "Hamburg".to_string(),
        phone: String::new(),
        email: "erika@example.org".to_string(),
    }
}
