use sea_orm_migration::prelude::*;

pub use sea_orm_migration::MigratorTrait;

mod m20250815_100000_create_addresses_table;
mod m20250815_100100_create_property_spaces_table;
mod m20250815_100200_create_unit_spaces_table;
mod m20250815_100300_create_meter_data_table;
mod m20250815_100400_create_meter_data_unit_spaces_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250815_100000_create_addresses_table::Migration),
            Box::new(m20250815_100100_create_property_spaces_table::Migration),
            Box::new(m20250815_100200_create_unit_spaces_table::Migration),
            Box::new(m20250815_100300_create_meter_data_table::Migration),
            Box::new(m20250815_100400_create_meter_data_unit_spaces_table::Migration),
        ]
    }
}

/// Common table and column identifiers
#[derive(Iden)]
pub enum Addresses {
    Table,
    Id,
    Street,
    City,
    State,
    Country,
    PostalCode,
}

#[derive(Iden)]
pub enum PropertySpaces {
    Table,
    Id,
    Name,
    AddressId,
}

#[derive(Iden)]
pub enum UnitSpaces {
    Table,
    Id,
    Name,
    UnitType,
    Area,
    PropertySpaceId,
}

#[derive(Iden)]
pub enum MeterData {
    Table,
    Id,
    MeterNumber,
    MeterProviderName,
    MeterSource,
    MeasurementReading,
    MeasurementUnit,
    MeasurementStartDate,
    MeasurementEndDate,
}

#[derive(Iden)]
pub enum MeterDataUnitSpaces {
    Table,
    MeterDataId,
    UnitSpaceId,
}
