//! Consumption reporting over prefetched property-space records.
//!
//! The computation here is a pure fold: the data-access layer hands over a
//! property space with its units and (already year-filtered) meter
//! readings, and this module reduces them to the report totals.

use crate::database::dao::{PropertySpaceRelations, UnitWithMeters};
use crate::database::entities::AddressRecord;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Every report is expressed in kWh. Readings recorded in therms are
/// summed as-is; no conversion is applied.
pub const CONSUMPTION_UNIT: &str = "kWh";

/// Address fields of a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AddressSummary {
    pub street: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
}

impl From<AddressRecord> for AddressSummary {
    fn from(address: AddressRecord) -> Self {
        Self {
            street: address.street,
            city: address.city,
            state: address.state,
            country: address.country,
            postal_code: address.postal_code,
        }
    }
}

/// Derived totals for one property space
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PropertySpaceSummary {
    pub name: String,
    pub address: AddressSummary,
    pub number_of_units: usize,
    pub total_area: f64,
    pub total_consumption: f64,
    pub consumption_unit: String,
}

/// Compute the report for one property space.
///
/// Unit count and total area cover every unit regardless of any year
/// filter; consumption covers the readings the prefetch kept.
pub fn property_space_summary(relations: PropertySpaceRelations) -> PropertySpaceSummary {
    let number_of_units = relations.units.len();
    let total_area = relations.units.iter().map(|unit| unit.unit.area).sum();
    let total_consumption = total_consumption(&relations.units);

    PropertySpaceSummary {
        name: relations.space.name,
        address: relations.address.into(),
        number_of_units,
        total_area,
        total_consumption,
        consumption_unit: CONSUMPTION_UNIT.to_string(),
    }
}

/// A reading shared by N unit spaces is prorated: each associated unit
/// contributes value/N, so a meter fully contained in one property space
/// sums back to its full value while a meter spanning property spaces
/// splits between them.
fn total_consumption(units: &[UnitWithMeters]) -> f64 {
    units
        .iter()
        .flat_map(|unit| unit.meters.iter())
        .map(|reading| reading.meter.measurement_reading / reading.share_count as f64)
        .sum()
}
