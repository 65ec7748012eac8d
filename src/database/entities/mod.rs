pub mod addresses;
pub mod meter_data;
pub mod meter_data_unit_spaces;
pub mod property_spaces;
pub mod unit_spaces;

pub use addresses::Entity as Addresses;
pub use meter_data::Entity as MeterData;
pub use meter_data_unit_spaces::Entity as MeterDataUnitSpaces;
pub use property_spaces::Entity as PropertySpaces;
pub use unit_spaces::Entity as UnitSpaces;

// Type aliases
pub type AddressRecord = addresses::Model;
pub type MeterDataRecord = meter_data::Model;
pub type PropertySpaceRecord = property_spaces::Model;
pub type UnitSpaceRecord = unit_spaces::Model;

pub use meter_data::MeasurementUnit;
pub use unit_spaces::UnitType;
