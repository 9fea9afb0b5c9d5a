mod action;
mod catalog;
mod contact;
mod error;
mod report;
mod submission;
mod validation;

pub use action::ReportAction;
pub use catalog::{CatalogError, ChargeCatalog, ParkingDuration};
pub use contact::Contact;
pub use error::{LookupTable, ReportError};
pub use report::{Address, Charge, ImageAsset, Report, Vehicle};
pub use submission::{MailDraft, SubmittedReport};
pub use validation::{DescriptionProblem, DescriptionValidation, SubmissionReadiness};

#[cfg(test)]
pub(crate) use contact::sample_contact;
