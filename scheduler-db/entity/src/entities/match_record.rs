//! `SeaORM` Entity. The sole write surface of a scheduler run (§6): rows of
//! status `draft` are the scheduler's own output and are freely replaced;
//! `confirmed`/`archived` rows are anchors and are never touched by
//! `scheduler_db::Client::replace_draft_matches`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "match_record")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// `COMP_DIV_YYYYMMDD_NNN` when scheduled, `COMP_DIV_NNN_UNSCHEDULED` otherwise.
    #[sea_orm(unique)]
    pub match_code: String,
    pub competition_code: String,
    pub division_tag: String,
    pub home_team_id: i32,
    pub away_team_id: i32,
    pub reception_date: Option<Date>,
    pub gymnasium_id: Option<i32>,
    /// One of `draft`, `confirmed`, `archived`.
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::team::Entity",
        from = "Column::HomeTeamId",
        to = "super::team::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    HomeTeam,
    #[sea_orm(
        belongs_to = "super::gymnasium::Entity",
        from = "Column::GymnasiumId",
        to = "super::gymnasium::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Gymnasium,
}

impl ActiveModelBehavior for ActiveModel {}
