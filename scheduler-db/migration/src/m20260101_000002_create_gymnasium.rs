use sea_orm_migration::prelude::*;

use crate::m20260101_000001_create_club::Club;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Gymnasium::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Gymnasium::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Gymnasium::Name).string().not_null())
                    .col(ColumnDef::new(Gymnasium::Address).string().not_null())
                    .col(ColumnDef::new(Gymnasium::CourtCount).small_integer().not_null())
                    .col(ColumnDef::new(Gymnasium::ClubId).integer().not_null())
                    .col(ColumnDef::new(Gymnasium::Latitude).double())
                    .col(ColumnDef::new(Gymnasium::Longitude).double())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_gymnasium_club")
                            .from(Gymnasium::Table, Gymnasium::ClubId)
                            .to(Club::Table, Club::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Gymnasium::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Gymnasium {
    Table,
    Id,
    Name,
    Address,
    CourtCount,
    ClubId,
    Latitude,
    Longitude,
}
