use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::reports::models::catalog::ChargeCatalog;
use crate::features::reports::models::contact::Contact;
use crate::features::reports::models::error::{LookupTable, ReportError};
use crate::features::reports::models::report::{Address, ImageAsset, Report};

/// Intent dispatched against a report draft. Each intent writes exactly one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ReportAction {
    SetVehicleColor {
        color: String,
    },
    SetVehicleType {
        #[serde(rename = "vehicleType")]
        vehicle_type: String,
    },
    SetLicensePlateNumber {
        number: String,
    },
    SetChargeType {
        index: usize,
    },
    SetChargeDuration {
        index: usize,
    },
    ToggleBlockedOthers,
    SetShowEditDescription {
        visible: bool,
    },
    /// Replaces the image in place when its id is already present
    AddImage {
        image: ImageAsset,
    },
    /// No-op when no image has the given id
    RemoveImage {
        id: Uuid,
    },
    SetAddress {
        address: Address,
    },
    SetDate {
        date: DateTime<Utc>,
    },
    SetContact {
        contact: Contact,
    },
}

impl ReportAction {
    pub fn name(&self) -> &'static str {
        match self {
            ReportAction::SetVehicleColor { .. } => "setVehicleColor",
            ReportAction::SetVehicleType { .. } => "setVehicleType",
            ReportAction::SetLicensePlateNumber { .. } => "setLicensePlateNumber",
            ReportAction::SetChargeType { .. } => "setChargeType",
            ReportAction::SetChargeDuration { .. } => "setChargeDuration",
            ReportAction::ToggleBlockedOthers => "toggleBlockedOthers",
            ReportAction::SetShowEditDescription { .. } => "setShowEditDescription",
            ReportAction::AddImage { .. } => "addImage",
            ReportAction::RemoveImage { .. } => "removeImage",
            ReportAction::SetAddress { .. } => "setAddress",
            ReportAction::SetDate { .. } => "setDate",
            ReportAction::SetContact { .. } => "setContact",
        }
    }
}

impl Report {
    /// Apply `action` and return the next snapshot.
    ///
    /// Charge indices are checked against `catalog`; an out-of-range index
    /// fails with [`ReportError::DataInvalid`] and the snapshot is dropped
    /// unchanged, so callers keep their previous copy.
    pub fn reduce(
        mut self,
        action: ReportAction,
        catalog: &ChargeCatalog,
    ) -> Result<Self, ReportError> {
        match action {
            ReportAction::SetVehicleColor { color } => self.vehicle.color = Some(color),
            ReportAction::SetVehicleType { vehicle_type } => {
                self.vehicle.vehicle_type = Some(vehicle_type)
            }
            ReportAction::SetLicensePlateNumber { number } => {
                self.vehicle.license_plate_number = Some(number)
            }
            ReportAction::SetChargeType { index } => {
                catalog.check_index(LookupTable::Charges, index)?;
                self.charge.selected_type_index = index;
            }
            ReportAction::SetChargeDuration { index } => {
                catalog.check_index(LookupTable::Durations, index)?;
                self.charge.selected_duration_index = index;
            }
            ReportAction::ToggleBlockedOthers => {
                self.charge.blocked_others = !self.charge.blocked_others
            }
            ReportAction::SetShowEditDescription { visible } => {
                self.show_edit_description = visible
            }
            ReportAction::AddImage { image } => {
                match self.images.iter_mut().find(|existing| existing.id == image.id) {
                    Some(existing) => *existing = image,
                    None => self.images.push(image),
                }
            }
            ReportAction::RemoveImage { id } => {
                if let Some(position) = self.images.iter().position(|image| image.id == id) {
                    self.images.remove(position);
                }
            }
            ReportAction::SetAddress { address } => self.address = Some(address),
            ReportAction::SetDate { date } => self.date = date,
            ReportAction::SetContact { contact } => self.contact = contact,
        }
        Ok(self)
    }
}
