use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Join table linking meter readings to the unit spaces they serve.
/// The number of rows per meter is its share count.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "meter_data_unit_spaces")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub meter_data_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub unit_space_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::meter_data::Entity",
        from = "Column::MeterDataId",
        to = "super::meter_data::Column::Id"
    )]
    MeterData,
    #[sea_orm(
        belongs_to = "super::unit_spaces::Entity",
        from = "Column::UnitSpaceId",
        to = "super::unit_spaces::Column::Id"
    )]
    UnitSpace,
}

impl ActiveModelBehavior for ActiveModel {}
