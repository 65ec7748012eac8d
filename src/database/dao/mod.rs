pub mod meter_data;
pub mod property_spaces;
pub mod unit_spaces;

pub use meter_data::{MeterDataDao, NewMeterReading};
pub use property_spaces::{
    AddressPatch, NewAddress, PropertySpacePatch, PropertySpaceRelations, PropertySpacesDao,
    SharedMeterReading, UnitWithMeters,
};
pub use unit_spaces::UnitSpacesDao;
