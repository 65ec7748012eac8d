use crate::Config;
use crate::database::entities::{MeasurementUnit, UnitType};
use crate::database::{DatabaseManager, DatabaseManagerImpl, NewAddress, NewMeterReading};
use chrono::{DateTime, TimeZone, Utc};
use tracing::info;

fn date(year: i32, month: u32, day: u32) -> Result<DateTime<Utc>, Box<dyn std::error::Error>> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .ok_or_else(|| format!("invalid date {}-{}-{}", year, month, day).into())
}

/// Insert a small demo dataset: three property spaces with units and a
/// mix of dedicated, shared and year-spread meter readings.
pub async fn handle_seed_command(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let db = DatabaseManagerImpl::new_from_config(config).await?;
    db.migrate().await?;

    let property_spaces = db.property_spaces();
    let unit_spaces = db.unit_spaces();
    let meter_data = db.meter_data();

    // Property space 1: two units sharing one 2021 meter, plus a
    // dedicated 2022 meter.
    let space_1 = property_spaces
        .create(
            "property space 1",
            NewAddress {
                street: "123 Main St".to_string(),
                city: "San Francisco".to_string(),
                state: "CA".to_string(),
                country: "USA".to_string(),
                postal_code: "94105".to_string(),
            },
        )
        .await?;
    let unit_1a = unit_spaces
        .create(space_1, "Unit 1A", UnitType::Leased, 500.0)
        .await?;
    let unit_1b = unit_spaces
        .create(space_1, "Unit 1B", UnitType::Vacant, 300.0)
        .await?;

    let meter = meter_data
        .create(NewMeterReading {
            meter_number: "MTR-1001".to_string(),
            meter_provider_name: "Acme Utilities".to_string(),
            meter_source: "electric".to_string(),
            measurement_reading: 1000.0,
            measurement_unit: MeasurementUnit::KilowattHours,
            measurement_start_date: date(2021, 2, 1)?,
            measurement_end_date: date(2021, 12, 20)?,
        })
        .await?;
    meter_data
        .attach_unit_spaces(meter, &[unit_1a, unit_1b])
        .await?;

    let meter = meter_data
        .create(NewMeterReading {
            meter_number: "MTR-1002".to_string(),
            meter_provider_name: "Acme Utilities".to_string(),
            meter_source: "electric".to_string(),
            measurement_reading: 5000.0,
            measurement_unit: MeasurementUnit::KilowattHours,
            measurement_start_date: date(2022, 1, 10)?,
            measurement_end_date: date(2022, 12, 31)?,
        })
        .await?;
    meter_data.attach_unit_spaces(meter, &[unit_1a]).await?;

    info!(property_space_id = %space_1, "Seeded property space 1");

    // Property space 2: a dedicated 2022 meter and a shared 2023 meter.
    let space_2 = property_spaces
        .create(
            "property space 2",
            NewAddress {
                street: "456 Main St".to_string(),
                city: "San Francisco".to_string(),
                state: "CA".to_string(),
                country: "USA".to_string(),
                postal_code: "94105".to_string(),
            },
        )
        .await?;
    let unit_2a = unit_spaces
        .create(space_2, "Unit 2A", UnitType::Leased, 450.0)
        .await?;
    let unit_2b = unit_spaces
        .create(space_2, "Unit 2B", UnitType::CommonArea, 150.0)
        .await?;

    let meter = meter_data
        .create(NewMeterReading {
            meter_number: "MTR-2001".to_string(),
            meter_provider_name: "Bayside Power".to_string(),
            meter_source: "electric".to_string(),
            measurement_reading: 3000.0,
            measurement_unit: MeasurementUnit::KilowattHours,
            measurement_start_date: date(2022, 3, 1)?,
            measurement_end_date: date(2022, 11, 30)?,
        })
        .await?;
    meter_data.attach_unit_spaces(meter, &[unit_2a]).await?;

    let meter = meter_data
        .create(NewMeterReading {
            meter_number: "MTR-2002".to_string(),
            meter_provider_name: "Bayside Power".to_string(),
            meter_source: "gas".to_string(),
            measurement_reading: 4000.0,
            measurement_unit: MeasurementUnit::KilowattHours,
            measurement_start_date: date(2023, 1, 5)?,
            measurement_end_date: date(2023, 12, 28)?,
        })
        .await?;
    meter_data
        .attach_unit_spaces(meter, &[unit_2a, unit_2b])
        .await?;

    info!(property_space_id = %space_2, "Seeded property space 2");

    // Property space 3: one unit with meters in 2022 and 2024.
    let space_3 = property_spaces
        .create(
            "property space 3",
            NewAddress {
                street: "789 Main St".to_string(),
                city: "San Francisco".to_string(),
                state: "CA".to_string(),
                country: "USA".to_string(),
                postal_code: "94105".to_string(),
            },
        )
        .await?;
    let unit_3a = unit_spaces
        .create(space_3, "Unit 3A", UnitType::Leased, 900.0)
        .await?;

    let meter = meter_data
        .create(NewMeterReading {
            meter_number: "MTR-3001".to_string(),
            meter_provider_name: "Acme Utilities".to_string(),
            meter_source: "electric".to_string(),
            measurement_reading: 3000.0,
            measurement_unit: MeasurementUnit::KilowattHours,
            measurement_start_date: date(2022, 5, 1)?,
            measurement_end_date: date(2022, 9, 30)?,
        })
        .await?;
    meter_data.attach_unit_spaces(meter, &[unit_3a]).await?;

    let meter = meter_data
        .create(NewMeterReading {
            meter_number: "MTR-3002".to_string(),
            meter_provider_name: "Acme Utilities".to_string(),
            meter_source: "electric".to_string(),
            measurement_reading: 5000.0,
            measurement_unit: MeasurementUnit::KilowattHours,
            measurement_start_date: date(2024, 1, 15)?,
            measurement_end_date: date(2024, 6, 30)?,
        })
        .await?;
    meter_data.attach_unit_spaces(meter, &[unit_3a]).await?;

    info!(property_space_id = %space_3, "Seeded property space 3");

    println!("Seed data loaded: 3 property spaces");

    Ok(())
}
