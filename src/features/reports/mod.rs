//! Parking violation reports.
//!
//! Drafts are plain [`models::Report`] snapshots. Clients change them only by
//! dispatching [`models::ReportAction`] intents; a complete draft is submitted
//! as a mail to the responsible authority office.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/charges` | Charge and duration tables |
//! | GET | `/api/reports` | Submitted reports |
//! | POST | `/api/reports/drafts` | Start a draft |
//! | GET | `/api/reports/drafts/{id}` | Draft snapshot |
//! | DELETE | `/api/reports/drafts/{id}` | Cancel a draft |
//! | POST | `/api/reports/drafts/{id}/actions` | Dispatch an intent |
//! | GET | `/api/reports/drafts/{id}/validation` | Submission readiness |
//! | GET | `/api/reports/drafts/{id}/mail` | Mail preview |
//! | POST | `/api/reports/drafts/{id}/submit` | Submit a draft |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::{DraftService, MailRenderer};
