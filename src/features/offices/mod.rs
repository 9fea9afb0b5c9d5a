//! Authority office lookup.
//!
//! Resolves the public affairs office responsible for a report address,
//! matching by postal code first and by city name second.

pub mod models;
pub mod services;

pub use models::PublicAffairsOffice;
pub use services::{OfficeDirectory, OfficeDirectoryError, OfficeLookup};
