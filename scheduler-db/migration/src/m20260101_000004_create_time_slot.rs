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
                    .table(TimeSlot::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TimeSlot::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TimeSlot::TeamId).integer().not_null())
                    .col(ColumnDef::new(TimeSlot::GymnasiumId).integer().not_null())
                    .col(ColumnDef::new(TimeSlot::Weekday).small_integer().not_null())
                    .col(ColumnDef::new(TimeSlot::StartTime).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_time_slot_team")
                            .from(TimeSlot::Table, TimeSlot::TeamId)
                            .to(Team::Table, Team::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_time_slot_gymnasium")
                            .from(TimeSlot::Table, TimeSlot::GymnasiumId)
                            .to(Gymnasium::Table, Gymnasium::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TimeSlot::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum TimeSlot {
    Table,
    Id,
    TeamId,
    GymnasiumId,
    Weekday,
    StartTime,
}
