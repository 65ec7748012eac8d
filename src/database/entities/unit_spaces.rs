use sea_orm::{entity::prelude::*, sea_query::StringLen};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Occupancy classification of a unit space
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
pub enum UnitType {
    #[sea_orm(string_value = "COMMON_AREA")]
    #[serde(rename = "COMMON_AREA")]
    #[default]
    CommonArea,
    #[sea_orm(string_value = "VACANT")]
    #[serde(rename = "VACANT")]
    Vacant,
    #[sea_orm(string_value = "LEASED")]
    #[serde(rename = "LEASED")]
    Leased,
}

impl UnitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitType::CommonArea => "COMMON_AREA",
            UnitType::Vacant => "VACANT",
            UnitType::Leased => "LEASED",
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "unit_spaces")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(column_type = "String(StringLen::N(32))", default_value = "COMMON_AREA")]
    pub unit_type: UnitType,
    /// Floor area, always non-negative
    pub area: f64,
    pub property_space_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::property_spaces::Entity",
        from = "Column::PropertySpaceId",
        to = "super::property_spaces::Column::Id"
    )]
    PropertySpace,
}

impl Related<super::property_spaces::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PropertySpace.def()
    }
}

impl Related<super::meter_data::Entity> for Entity {
    fn to() -> RelationDef {
        super::meter_data_unit_spaces::Relation::MeterData.def()
    }

    fn via() -> Option<RelationDef> {
        Some(
            super::meter_data_unit_spaces::Relation::UnitSpace
                .def()
                .rev(),
        )
    }
}

impl ActiveModelBehavior for ActiveModel {}
