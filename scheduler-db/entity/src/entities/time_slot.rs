//! `SeaORM` Entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "time_slot")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub team_id: i32,
    pub gymnasium_id: i32,
    /// ISO weekday, 1 (Monday) through 7 (Sunday).
    pub weekday: i16,
    pub start_time: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::team::Entity",
        from = "Column::TeamId",
        to = "super::team::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Team,
    #[sea_orm(
        belongs_to = "super::gymnasium::Entity",
        from = "Column::GymnasiumId",
        to = "super::gymnasium::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Gymnasium,
}

impl Related<super::team::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Team.def()
    }
}

impl Related<super::gymnasium::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Gymnasium.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
