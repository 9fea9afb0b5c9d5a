pub mod offices;
pub mod reports;
