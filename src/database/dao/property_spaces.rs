use crate::database::entities::{
    AddressRecord, MeterDataRecord, PropertySpaceRecord, UnitSpaceRecord, addresses, meter_data,
    meter_data_unit_spaces, property_spaces, unit_spaces,
};
use crate::database::{DatabaseError, DatabaseResult};
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    FromQueryResult, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use std::collections::{BTreeSet, HashMap};

/// Address fields for creating a property space
#[derive(Debug, Clone)]
pub struct NewAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
}

/// Partial update of address fields; `None` leaves a field untouched
#[derive(Debug, Clone, Default)]
pub struct AddressPatch {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
}

impl AddressPatch {
    pub fn is_empty(&self) -> bool {
        self.street.is_none()
            && self.city.is_none()
            && self.state.is_none()
            && self.country.is_none()
            && self.postal_code.is_none()
    }
}

/// Partial update of a property space
#[derive(Debug, Clone, Default)]
pub struct PropertySpacePatch {
    pub name: Option<String>,
    pub address: Option<AddressPatch>,
}

/// A meter reading annotated with how many unit spaces share it.
/// `share_count` counts every association of the meter, across all
/// property spaces and regardless of any year filter, and is at least 1.
#[derive(Debug, Clone)]
pub struct SharedMeterReading {
    pub meter: MeterDataRecord,
    pub share_count: u64,
}

/// A unit space with its (possibly year-filtered) meter readings
#[derive(Debug, Clone)]
pub struct UnitWithMeters {
    pub unit: UnitSpaceRecord,
    pub meters: Vec<SharedMeterReading>,
}

/// A property space with everything the consumption report needs
#[derive(Debug, Clone)]
pub struct PropertySpaceRelations {
    pub space: PropertySpaceRecord,
    pub address: AddressRecord,
    pub units: Vec<UnitWithMeters>,
}

/// Property spaces DAO for database operations
#[derive(Clone)]
pub struct PropertySpacesDao {
    db: DatabaseConnection,
}

impl PropertySpacesDao {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a property space together with its address
    pub async fn create(&self, name: &str, address: NewAddress) -> DatabaseResult<i32> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;

        let address_row = addresses::ActiveModel {
            id: ActiveValue::NotSet,
            street: Set(address.street),
            city: Set(address.city),
            state: Set(address.state),
            country: Set(address.country),
            postal_code: Set(address.postal_code),
        }
        .insert(&txn)
        .await
        .map_err(|e| DatabaseError::Database(e.to_string()))?;

        let space_row = property_spaces::ActiveModel {
            id: ActiveValue::NotSet,
            name: Set(name.to_string()),
            address_id: Set(address_row.id),
        }
        .insert(&txn)
        .await
        .map_err(|e| DatabaseError::Database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;

        Ok(space_row.id)
    }

    /// Find a property space by ID
    pub async fn find_by_id(&self, id: i32) -> DatabaseResult<Option<PropertySpaceRecord>> {
        let space = property_spaces::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;

        Ok(space)
    }

    /// Apply a partial update to a property space and/or its address
    pub async fn update(&self, id: i32, patch: PropertySpacePatch) -> DatabaseResult<()> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;

        let space = property_spaces::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?
            .ok_or(DatabaseError::NotFound)?;

        if let Some(name) = patch.name {
            property_spaces::ActiveModel {
                id: Set(space.id),
                name: Set(name),
                ..Default::default()
            }
            .update(&txn)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;
        }

        if let Some(address) = patch.address {
            if !address.is_empty() {
                let mut model = addresses::ActiveModel {
                    id: Set(space.address_id),
                    ..Default::default()
                };
                if let Some(street) = address.street {
                    model.street = Set(street);
                }
                if let Some(city) = address.city {
                    model.city = Set(city);
                }
                if let Some(state) = address.state {
                    model.state = Set(state);
                }
                if let Some(country) = address.country {
                    model.country = Set(country);
                }
                if let Some(postal_code) = address.postal_code {
                    model.postal_code = Set(postal_code);
                }
                model
                    .update(&txn)
                    .await
                    .map_err(|e| DatabaseError::Database(e.to_string()))?;
            }
        }

        txn.commit()
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;

        Ok(())
    }

    /// Delete a property space, cascading to its address, its units and
    /// the meter associations of those units. Meter readings themselves
    /// survive; only the links go away.
    pub async fn delete(&self, id: i32) -> DatabaseResult<()> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;

        let space = property_spaces::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?
            .ok_or(DatabaseError::NotFound)?;

        let unit_ids: Vec<i32> = unit_spaces::Entity::find()
            .filter(unit_spaces::Column::PropertySpaceId.eq(id))
            .all(&txn)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?
            .into_iter()
            .map(|unit| unit.id)
            .collect();

        if !unit_ids.is_empty() {
            meter_data_unit_spaces::Entity::delete_many()
                .filter(meter_data_unit_spaces::Column::UnitSpaceId.is_in(unit_ids))
                .exec(&txn)
                .await
                .map_err(|e| DatabaseError::Database(e.to_string()))?;

            unit_spaces::Entity::delete_many()
                .filter(unit_spaces::Column::PropertySpaceId.eq(id))
                .exec(&txn)
                .await
                .map_err(|e| DatabaseError::Database(e.to_string()))?;
        }

        property_spaces::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;

        addresses::Entity::delete_by_id(space.address_id)
            .exec(&txn)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;

        Ok(())
    }

    /// Load a property space with its address, units and meter readings,
    /// optionally keeping only readings touching the given calendar year.
    pub async fn load_related(
        &self,
        id: i32,
        year: Option<i32>,
    ) -> DatabaseResult<Option<PropertySpaceRelations>> {
        let Some(space) = property_spaces::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?
        else {
            return Ok(None);
        };

        Ok(Some(self.load_relations_for(space, year).await?))
    }

    /// Load every property space with its related records, id-ascending
    pub async fn list_related(
        &self,
        year: Option<i32>,
    ) -> DatabaseResult<Vec<PropertySpaceRelations>> {
        let spaces = property_spaces::Entity::find()
            .order_by_asc(property_spaces::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;

        let mut related = Vec::with_capacity(spaces.len());
        for space in spaces {
            related.push(self.load_relations_for(space, year).await?);
        }

        Ok(related)
    }

    async fn load_relations_for(
        &self,
        space: PropertySpaceRecord,
        year: Option<i32>,
    ) -> DatabaseResult<PropertySpaceRelations> {
        let address = addresses::Entity::find_by_id(space.address_id)
            .one(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?
            .ok_or(DatabaseError::NotFound)?;

        let units = unit_spaces::Entity::find()
            .filter(unit_spaces::Column::PropertySpaceId.eq(space.id))
            .order_by_asc(unit_spaces::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;

        let units = self.attach_meter_readings(units, year).await?;

        Ok(PropertySpaceRelations {
            space,
            address,
            units,
        })
    }

    /// The prefetch: one query for the join rows of the given units, one
    /// GROUP BY over the join table for total share counts, and one for
    /// the meter rows themselves with the year condition applied.
    async fn attach_meter_readings(
        &self,
        units: Vec<UnitSpaceRecord>,
        year: Option<i32>,
    ) -> DatabaseResult<Vec<UnitWithMeters>> {
        if units.is_empty() {
            return Ok(Vec::new());
        }

        let unit_ids: Vec<i32> = units.iter().map(|unit| unit.id).collect();
        let links = meter_data_unit_spaces::Entity::find()
            .filter(meter_data_unit_spaces::Column::UnitSpaceId.is_in(unit_ids))
            .all(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;

        let meter_ids: BTreeSet<i32> = links.iter().map(|link| link.meter_data_id).collect();
        if meter_ids.is_empty() {
            return Ok(units
                .into_iter()
                .map(|unit| UnitWithMeters {
                    unit,
                    meters: Vec::new(),
                })
                .collect());
        }

        // Share counts cover every association of a meter, not just the
        // associations inside this property space.
        #[derive(FromQueryResult)]
        struct MeterShareCount {
            meter_data_id: i32,
            share_count: i64,
        }

        let share_counts: HashMap<i32, u64> = meter_data_unit_spaces::Entity::find()
            .select_only()
            .column(meter_data_unit_spaces::Column::MeterDataId)
            .column_as(
                meter_data_unit_spaces::Column::UnitSpaceId.count(),
                "share_count",
            )
            .filter(meter_data_unit_spaces::Column::MeterDataId.is_in(meter_ids.iter().copied()))
            .group_by(meter_data_unit_spaces::Column::MeterDataId)
            .into_model::<MeterShareCount>()
            .all(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?
            .into_iter()
            .map(|row| (row.meter_data_id, row.share_count as u64))
            .collect();

        let mut meter_query = meter_data::Entity::find()
            .filter(meter_data::Column::Id.is_in(meter_ids.iter().copied()));
        if let Some(year) = year {
            meter_query = meter_query.filter(measurement_year_condition(year)?);
        }

        let meters: HashMap<i32, MeterDataRecord> = meter_query
            .all(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?
            .into_iter()
            .map(|meter| (meter.id, meter))
            .collect();

        let mut meters_by_unit: HashMap<i32, Vec<i32>> = HashMap::new();
        for link in &links {
            meters_by_unit
                .entry(link.unit_space_id)
                .or_default()
                .push(link.meter_data_id);
        }

        Ok(units
            .into_iter()
            .map(|unit| {
                let readings = meters_by_unit
                    .get(&unit.id)
                    .map(|ids| {
                        ids.iter()
                            .filter_map(|meter_id| {
                                meters.get(meter_id).map(|meter| SharedMeterReading {
                                    meter: meter.clone(),
                                    share_count: share_counts
                                        .get(meter_id)
                                        .copied()
                                        .unwrap_or(1),
                                })
                            })
                            .collect()
                    })
                    .unwrap_or_default();

                UnitWithMeters {
                    unit,
                    meters: readings,
                }
            })
            .collect())
    }

}

fn year_bounds(year: i32) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1)?
        .and_hms_opt(0, 0, 0)?
        .and_utc();
    let end = NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?
        .and_hms_opt(0, 0, 0)?
        .and_utc();
    Some((start, end))
}

/// A reading belongs to a calendar year when its start date OR its end
/// date falls inside that year. Readings spanning a year boundary show up
/// in both years.
fn measurement_year_condition(year: i32) -> DatabaseResult<Condition> {
    let (start, end) = year_bounds(year)
        .ok_or_else(|| DatabaseError::Constraint(format!("year {} is out of range", year)))?;

    Ok(Condition::any()
        .add(
            Condition::all()
                .add(meter_data::Column::MeasurementStartDate.gte(start))
                .add(meter_data::Column::MeasurementStartDate.lt(end)),
        )
        .add(
            Condition::all()
                .add(meter_data::Column::MeasurementEndDate.gte(start))
                .add(meter_data::Column::MeasurementEndDate.lt(end)),
        ))
}
