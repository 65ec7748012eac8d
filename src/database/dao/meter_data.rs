use crate::database::entities::{
    MeasurementUnit, MeterDataRecord, meter_data, meter_data_unit_spaces,
};
use crate::database::{DatabaseError, DatabaseResult};
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, EntityTrait, Set};

/// Fields for recording a meter reading
#[derive(Debug, Clone)]
pub struct NewMeterReading {
    pub meter_number: String,
    pub meter_provider_name: String,
    pub meter_source: String,
    pub measurement_reading: f64,
    pub measurement_unit: MeasurementUnit,
    pub measurement_start_date: DateTime<Utc>,
    pub measurement_end_date: DateTime<Utc>,
}

/// Meter data DAO for database operations
#[derive(Clone)]
pub struct MeterDataDao {
    db: DatabaseConnection,
}

impl MeterDataDao {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Record a meter reading
    pub async fn create(&self, reading: NewMeterReading) -> DatabaseResult<i32> {
        let meter = meter_data::ActiveModel {
            id: ActiveValue::NotSet,
            meter_number: Set(reading.meter_number),
            meter_provider_name: Set(reading.meter_provider_name),
            meter_source: Set(reading.meter_source),
            measurement_reading: Set(reading.measurement_reading),
            measurement_unit: Set(reading.measurement_unit),
            measurement_start_date: Set(reading.measurement_start_date),
            measurement_end_date: Set(reading.measurement_end_date),
        }
        .insert(&self.db)
        .await
        .map_err(|e| DatabaseError::Database(e.to_string()))?;

        Ok(meter.id)
    }

    /// Associate a meter reading with unit spaces. Every association adds
    /// one to the meter's share count.
    pub async fn attach_unit_spaces(
        &self,
        meter_data_id: i32,
        unit_space_ids: &[i32],
    ) -> DatabaseResult<()> {
        if unit_space_ids.is_empty() {
            return Ok(());
        }

        let links = unit_space_ids
            .iter()
            .map(|unit_space_id| meter_data_unit_spaces::ActiveModel {
                meter_data_id: Set(meter_data_id),
                unit_space_id: Set(*unit_space_id),
            })
            .collect::<Vec<_>>();

        meter_data_unit_spaces::Entity::insert_many(links)
            .exec(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;

        Ok(())
    }

    /// Find a meter reading by ID
    pub async fn find_by_id(&self, id: i32) -> DatabaseResult<Option<MeterDataRecord>> {
        let meter = meter_data::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;

        Ok(meter)
    }
}
