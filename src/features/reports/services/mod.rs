mod draft_service;
mod mail_service;

pub use draft_service::DraftService;
pub use mail_service::{MailError, MailRenderer};
