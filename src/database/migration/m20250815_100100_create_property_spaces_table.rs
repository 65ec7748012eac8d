use super::{Addresses, PropertySpaces};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PropertySpaces::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PropertySpaces::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PropertySpaces::Name).string().not_null())
                    .col(
                        ColumnDef::new(PropertySpaces::AddressId)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_property_spaces_address_id")
                            .from(PropertySpaces::Table, PropertySpaces::AddressId)
                            .to(Addresses::Table, Addresses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One address per property space
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_property_spaces_address_id")
                    .table(PropertySpaces::Table)
                    .col(PropertySpaces::AddressId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PropertySpaces::Table).to_owned())
            .await
    }
}
