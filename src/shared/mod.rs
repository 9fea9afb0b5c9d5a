pub mod constants;
pub mod templates;
pub mod types;
pub mod validation;
