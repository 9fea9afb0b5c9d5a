mod engine;

pub use engine::{TemplateEngine, TemplateError, REPORT_MAIL_TEMPLATE};
