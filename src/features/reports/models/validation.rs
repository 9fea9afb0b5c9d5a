use serde::Serialize;
use utoipa::ToSchema;

/// Reason a vehicle description is incomplete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DescriptionProblem {
    MissingType,
    MissingColor,
    MissingLicensePlate,
}

impl std::fmt::Display for DescriptionProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DescriptionProblem::MissingType => write!(f, "vehicle type is missing"),
            DescriptionProblem::MissingColor => write!(f, "vehicle color is missing"),
            DescriptionProblem::MissingLicensePlate => write!(f, "license plate number is missing"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DescriptionValidation {
    pub is_valid: bool,
    pub problems: Vec<DescriptionProblem>,
}

impl DescriptionValidation {
    pub fn from_problems(problems: Vec<DescriptionProblem>) -> Self {
        Self {
            is_valid: problems.is_empty(),
            problems,
        }
    }
}

/// Completeness of every report section that gates submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReadiness {
    pub photos: bool,
    pub description: DescriptionValidation,
    pub invalid_contact_fields: Vec<String>,
    pub location: bool,
    pub is_ready: bool,
}

impl SubmissionReadiness {
    pub fn new(
        photos: bool,
        description: DescriptionValidation,
        invalid_contact_fields: Vec<String>,
        location: bool,
    ) -> Self {
        let is_ready =
            photos && description.is_valid && invalid_contact_fields.is_empty() && location;
        Self {
            photos,
            description,
            invalid_contact_fields,
            location,
            is_ready,
        }
    }

    /// Names of the sections that are still incomplete
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !self.photos {
            missing.push("photos");
        }
        if !self.description.is_valid {
            missing.push("description");
        }
        if !self.invalid_contact_fields.is_empty() {
            missing.push("contact");
        }
        if !self.location {
            missing.push("location");
        }
        missing
    }

    /// Human readable reasons, one per problem
    pub fn reasons(&self) -> Vec<String> {
        let mut reasons = Vec::new();
        if !self.photos {
            reasons.push("at least one photo is required".to_string());
        }
        reasons.extend(self.description.problems.iter().map(|p| p.to_string()));
        reasons.extend(
            self.invalid_contact_fields
                .iter()
                .map(|field| format!("contact field '{}' is invalid", field)),
        );
        if !self.location {
            reasons.push("address with a responsible office is required".to_string());
        }
        reasons
    }
}
