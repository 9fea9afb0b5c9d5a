use chrono_tz::Tz;
use serde::Serialize;
use thiserror::Error;

use crate::features::reports::models::{
    Address, ChargeCatalog, Contact, MailDraft, Report, ReportError,
};
use crate::shared::constants::{MAIL_DATE_FORMAT, MAIL_SUBJECT_PREFIX};
use crate::shared::templates::{TemplateEngine, TemplateError, REPORT_MAIL_TEMPLATE};

#[derive(Debug, Error)]
pub enum MailError {
    #[error("No responsible office is known for this report")]
    MissingRecipient,

    #[error("The report has no address")]
    MissingAddress,

    #[error(transparent)]
    Data(#[from] ReportError),

    #[error(transparent)]
    Template(#[from] TemplateError),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VehicleContext<'a> {
    license_plate_number: &'a str,
    #[serde(rename = "type")]
    vehicle_type: &'a str,
    color: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MailContext<'a> {
    vehicle: VehicleContext<'a>,
    address: &'a Address,
    charge: &'a str,
    duration: &'a str,
    date: String,
    blocked_others: bool,
    contact: &'a Contact,
    photo_count: usize,
}

/// Renders the report mail sent to the authority office.
///
/// The violation time is printed as wall-clock time in `timezone`,
/// Europe/Berlin unless configured otherwise.
pub struct MailRenderer {
    engine: TemplateEngine,
    timezone: Tz,
}

impl MailRenderer {
    pub fn new(engine: TemplateEngine) -> Self {
        Self {
            engine,
            timezone: chrono_tz::Europe::Berlin,
        }
    }

    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    pub fn render(&self, report: &Report, catalog: &ChargeCatalog) -> Result<MailDraft, MailError> {
        let office = report
            .suggested_authority_office
            .as_ref()
            .ok_or(MailError::MissingRecipient)?;
        let address = report.address.as_ref().ok_or(MailError::MissingAddress)?;

        let plate = report
            .vehicle
            .license_plate_number
            .as_deref()
            .unwrap_or_default();

        let ctx = MailContext {
            vehicle: VehicleContext {
                license_plate_number: plate,
                vehicle_type: report.vehicle.vehicle_type.as_deref().unwrap_or_default(),
                color: report.vehicle.color.as_deref().unwrap_or_default(),
            },
            address,
            charge: report.human_readable_charge(catalog)?,
            duration: report.time_label(catalog)?,
            date: report
                .date
                .with_timezone(&self.timezone)
                .format(MAIL_DATE_FORMAT)
                .to_string(),
            blocked_others: report.charge.blocked_others,
            contact: &report.contact,
            photo_count: report.images.len(),
        };

        let body = self.engine.render(REPORT_MAIL_TEMPLATE, &ctx)?;

        Ok(MailDraft {
            recipient: office.email.clone(),
            subject: format!("{} {}", MAIL_SUBJECT_PREFIX, plate).trim_end().to_string(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    use crate::features::offices::PublicAffairsOffice;
    use crate::features::reports::models::{sample_contact, Charge, ImageAsset, Vehicle};

    fn renderer() -> MailRenderer {
        MailRenderer::new(TemplateEngine::bundled().unwrap())
    }

    fn catalog() -> ChargeCatalog {
        ChargeCatalog::new(
            vec!["Parken auf dem Gehweg".to_string(), "Parken auf einem Radweg".to_string()],
            vec!["bis zu 3 Minuten".to_string(), "länger als 1 Stunde".to_string()],
        )
        .unwrap()
    }

    fn complete_report() -> Report {
        Report {
            images: vec![ImageAsset {
                id: Uuid::new_v4(),
                file_name: "IMG_0001.jpg".to_string(),
                captured_at: None,
            }],
            address: Some(Address {
                street: "Jungfernstieg 1".to_string(),
                postal_code: "20095".to_string(),
                city: "Hamburg".to_string(),
            }),
            suggested_authority_office: Some(PublicAffairsOffice {
                name: "Hamburg".to_string(),
                email: "anzeigen@hamburg.example".to_string(),
                postal_codes: vec!["20095".to_string()],
            }),
            // 14:30 CET
            date: Utc.with_ymd_and_hms(2021, 3, 24, 13, 30, 0).unwrap(),
            vehicle: Vehicle {
                color: Some("blau".to_string()),
                vehicle_type: Some("Audi".to_string()),
                license_plate_number: Some("HH-AB 123".to_string()),
            },
            charge: Charge {
                selected_type_index: 1,
                selected_duration_index: 1,
                blocked_others: true,
            },
            contact: sample_contact(),
            ..Report::new()
        }
    }

    #[test]
    fn test_render_complete_report() {
        let mail = renderer().render(&complete_report(), &catalog()).unwrap();

        assert_eq!(mail.recipient, "anzeigen@hamburg.example");
        assert_eq!(mail.subject, "Anzeige HH-AB 123");
        assert!(mail.body.contains("Kennzeichen: HH-AB 123"));
        assert!(mail.body.contains("Marke: Audi"));
        assert!(mail.body.contains("Farbe: blau"));
        assert!(mail.body.contains("Adresse: Jungfernstieg 1, 20095 Hamburg"));
        assert!(mail.body.contains("Verstoß: Parken auf einem Radweg"));
        assert!(mail.body.contains("Tatzeit: 24.03.2021, 14:30 Uhr"));
        assert!(mail.body.contains("Zeitraum: länger als 1 Stunde"));
        assert!(mail.body.contains("Andere Verkehrsteilnehmer wurden behindert."));
        assert!(mail.body.contains("Name: Erika Mustermann"));
        assert!(mail.body.contains("Beweisfotos (1)"));
        assert!(!mail.body.contains("Telefon:"));
    }

    #[test]
    fn test_render_uses_berlin_summer_time() {
        let report = Report {
            date: Utc.with_ymd_and_hms(2021, 7, 10, 12, 30, 0).unwrap(),
            ..complete_report()
        };
        let mail = renderer().render(&report, &catalog()).unwrap();
        assert!(mail.body.contains("Tatzeit: 10.07.2021, 14:30 Uhr"));
    }

    #[test]
    fn test_render_in_configured_timezone() {
        let report = Report {
            date: Utc.with_ymd_and_hms(2021, 12, 31, 23, 30, 0).unwrap(),
            ..complete_report()
        };

        let berlin = renderer().render(&report, &catalog()).unwrap();
        assert!(berlin.body.contains("Tatzeit: 01.01.2022, 00:30 Uhr"));

        let utc = renderer()
            .with_timezone(chrono_tz::UTC)
            .render(&report, &catalog())
            .unwrap();
        assert!(utc.body.contains("Tatzeit: 31.12.2021, 23:30 Uhr"));
    }

    #[test]
    fn test_render_without_blocking_and_with_phone() {
        let mut report = complete_report();
        report.charge.blocked_others = false;
        report.contact.phone = "040 123456".to_string();

        let mail = renderer().render(&report, &catalog()).unwrap();
        assert!(!mail.body.contains("behindert"));
        assert!(mail.body.contains("Telefon: 040 123456"));
    }

    #[test]
    fn test_render_requires_office() {
        let report = Report {
            suggested_authority_office: None,
            ..complete_report()
        };
        assert!(matches!(
            renderer().render(&report, &catalog()),
            Err(MailError::MissingRecipient)
        ));
    }

    #[test]
    fn test_render_requires_address() {
        let report = Report {
            address: None,
            ..complete_report()
        };
        assert!(matches!(
            renderer().render(&report, &catalog()),
            Err(MailError::MissingAddress)
        ));
    }

    #[test]
    fn test_render_propagates_invalid_charge() {
        let mut report = complete_report();
        report.charge.selected_type_index = 7;
        assert!(matches!(
            renderer().render(&report, &catalog()),
            Err(MailError::Data(ReportError::DataInvalid { index: 7, .. }))
        ));
    }
}
