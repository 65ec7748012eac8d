use super::MeterData;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MeterData::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MeterData::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MeterData::MeterNumber).string().not_null())
                    .col(
                        ColumnDef::new(MeterData::MeterProviderName)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(MeterData::MeterSource).string().not_null())
                    .col(
                        ColumnDef::new(MeterData::MeasurementReading)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MeterData::MeasurementUnit)
                            .string_len(32)
                            .not_null()
                            .default("kWh"),
                    )
                    .col(
                        ColumnDef::new(MeterData::MeasurementStartDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MeterData::MeasurementEndDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Year filtering scans both interval bounds
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_meter_data_measurement_start_date")
                    .table(MeterData::Table)
                    .col(MeterData::MeasurementStartDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_meter_data_measurement_end_date")
                    .table(MeterData::Table)
                    .col(MeterData::MeasurementEndDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MeterData::Table).to_owned())
            .await
    }
}
