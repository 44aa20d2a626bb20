use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CompetitionWindow::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CompetitionWindow::CompetitionCode)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CompetitionWindow::StartDate).date().not_null())
                    .col(ColumnDef::new(CompetitionWindow::EndDate).date().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CompetitionWindow::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum CompetitionWindow {
    Table,
    CompetitionCode,
    StartDate,
    EndDate,
}
