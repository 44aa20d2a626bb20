use sea_orm_migration::prelude::*;

use crate::m20260101_000002_create_gymnasium::Gymnasium;
use crate::m20260101_000003_create_team::Team;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MatchRecord::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MatchRecord::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(MatchRecord::MatchCode)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(MatchRecord::CompetitionCode).string().not_null())
                    .col(ColumnDef::new(MatchRecord::DivisionTag).string().not_null())
                    .col(ColumnDef::new(MatchRecord::HomeTeamId).integer().not_null())
                    .col(ColumnDef::new(MatchRecord::AwayTeamId).integer().not_null())
                    .col(ColumnDef::new(MatchRecord::ReceptionDate).date())
                    .col(ColumnDef::new(MatchRecord::GymnasiumId).integer())
                    .col(ColumnDef::new(MatchRecord::Status).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_match_record_home_team")
                            .from(MatchRecord::Table, MatchRecord::HomeTeamId)
                            .to(Team::Table, Team::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_match_record_gymnasium")
                            .from(MatchRecord::Table, MatchRecord::GymnasiumId)
                            .to(Gymnasium::Table, Gymnasium::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MatchRecord::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum MatchRecord {
    Table,
    Id,
    MatchCode,
    CompetitionCode,
    DivisionTag,
    HomeTeamId,
    AwayTeamId,
    ReceptionDate,
    GymnasiumId,
    Status,
}
