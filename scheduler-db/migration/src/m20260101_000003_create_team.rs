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
                    .table(Team::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Team::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Team::Name).string().not_null())
                    .col(ColumnDef::new(Team::ClubId).integer().not_null())
                    .col(ColumnDef::new(Team::CompetitionCode).string().not_null())
                    .col(ColumnDef::new(Team::DivisionTag).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_team_club")
                            .from(Team::Table, Team::ClubId)
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
            .drop_table(Table::drop().table(Team::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Team {
    Table,
    Id,
    Name,
    ClubId,
    CompetitionCode,
    DivisionTag,
}
