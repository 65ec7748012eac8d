use super::{MeterData, MeterDataUnitSpaces, UnitSpaces};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MeterDataUnitSpaces::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MeterDataUnitSpaces::MeterDataId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MeterDataUnitSpaces::UnitSpaceId)
                            .integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .name("pk_meter_data_unit_spaces")
                            .col(MeterDataUnitSpaces::MeterDataId)
                            .col(MeterDataUnitSpaces::UnitSpaceId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_meter_data_unit_spaces_meter_data_id")
                            .from(
                                MeterDataUnitSpaces::Table,
                                MeterDataUnitSpaces::MeterDataId,
                            )
                            .to(MeterData::Table, MeterData::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_meter_data_unit_spaces_unit_space_id")
                            .from(
                                MeterDataUnitSpaces::Table,
                                MeterDataUnitSpaces::UnitSpaceId,
                            )
                            .to(UnitSpaces::Table, UnitSpaces::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Share counts group by meter; unit-side lookups need their own index
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_meter_data_unit_spaces_unit_space_id")
                    .table(MeterDataUnitSpaces::Table)
                    .col(MeterDataUnitSpaces::UnitSpaceId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MeterDataUnitSpaces::Table).to_owned())
            .await
    }
}
