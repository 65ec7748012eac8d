use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Root aggregate for the consumption report. The address is owned 1:1;
/// units and meter associations hang off it and are removed with it.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "property_spaces")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub address_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::addresses::Entity",
        from = "Column::AddressId",
        to = "super::addresses::Column::Id"
    )]
    Address,
    #[sea_orm(has_many = "super::unit_spaces::Entity")]
    UnitSpaces,
}

impl Related<super::addresses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Address.def()
    }
}

impl Related<super::unit_spaces::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UnitSpaces.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
