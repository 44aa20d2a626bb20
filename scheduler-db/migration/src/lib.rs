pub use sea_orm_migration::prelude::*;

mod m20260101_000001_create_club;
mod m20260101_000002_create_gymnasium;
mod m20260101_000003_create_team;
mod m20260101_000004_create_time_slot;
mod m20260101_000005_create_competition_window;
mod m20260101_000006_create_match_record;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260101_000001_create_club::Migration),
            Box::new(m20260101_000002_create_gymnasium::Migration),
            Box::new(m20260101_000003_create_team::Migration),
            Box::new(m20260101_000004_create_time_slot::Migration),
            Box::new(m20260101_000005_create_competition_window::Migration),
            Box::new(m20260101_000006_create_match_record::Migration),
        ]
    }
}
