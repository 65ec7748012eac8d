use super::{PropertySpaces, UnitSpaces};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UnitSpaces::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UnitSpaces::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UnitSpaces::Name).string().not_null())
                    .col(
                        ColumnDef::new(UnitSpaces::UnitType)
                            .string_len(32)
                            .not_null()
                            .default("COMMON_AREA"),
                    )
                    .col(ColumnDef::new(UnitSpaces::Area).double().not_null())
                    .col(
                        ColumnDef::new(UnitSpaces::PropertySpaceId)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_unit_spaces_property_space_id")
                            .from(UnitSpaces::Table, UnitSpaces::PropertySpaceId)
                            .to(PropertySpaces::Table, PropertySpaces::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_unit_spaces_property_space_id")
                    .table(UnitSpaces::Table)
                    .col(UnitSpaces::PropertySpaceId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UnitSpaces::Table).to_owned())
            .await
    }
}
