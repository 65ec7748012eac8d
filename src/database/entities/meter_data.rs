use chrono::{DateTime, Utc};
use sea_orm::{entity::prelude::*, sea_query::StringLen};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Unit of measure a reading was recorded in
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[derive(Default)]
pub enum MeasurementUnit {
    #[sea_orm(string_value = "kWh")]
    #[serde(rename = "kWh")]
    #[default]
    KilowattHours,
    #[sea_orm(string_value = "therms")]
    #[serde(rename = "therms")]
    Therms,
}

/// A utility consumption reading over a time interval. A reading can be
/// associated with any number of unit spaces (a shared meter), possibly
/// spanning property spaces.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "meter_data")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub meter_number: String,
    pub meter_provider_name: String,
    pub meter_source: String,
    pub measurement_reading: f64,
    #[sea_orm(column_type = "String(StringLen::N(32))", default_value = "kWh")]
    pub measurement_unit: MeasurementUnit,
    pub measurement_start_date: DateTime<Utc>,
    pub measurement_end_date: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Related<super::unit_spaces::Entity> for Entity {
    fn to() -> RelationDef {
        super::meter_data_unit_spaces::Relation::UnitSpace.def()
    }

    fn via() -> Option<RelationDef> {
        Some(
            super::meter_data_unit_spaces::Relation::MeterData
                .def()
                .rev(),
        )
    }
}

impl ActiveModelBehavior for ActiveModel {}
