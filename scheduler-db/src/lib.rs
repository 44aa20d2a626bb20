//! The scheduler's output write surface (§6 Addition: write surface).
//! `Client` wraps a `sea_orm::DatabaseConnection`, following the teacher's
//! `Config::new(connection_url)` / `Client { connection }` shape in
//! `db/src/lib.rs`, trimmed to the one write path a scheduler run needs:
//! replacing its own `draft` rows without ever touching `confirmed` or
//! `archived` ones.

pub mod errors;

use std::fmt::Write as _;

use chrono::NaiveDate;
use entity::prelude::MatchRecord;
use errors::{ConnectError, ReplaceDraftMatchesError};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, Database, DatabaseConnection, EntityTrait,
    QueryFilter, Set, TransactionTrait,
};
use scheduler_core::{Match, MatchStatus};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    connection_url: String,
}

impl Config {
    pub fn new(connection_url: impl Into<String>) -> Self {
        Self {
            connection_url: connection_url.into(),
        }
    }
}

#[derive(Debug)]
pub struct Client {
    connection: DatabaseConnection,
}

impl Client {
    pub async fn new(config: &Config) -> Result<Self, ConnectError> {
        let connection = Database::connect(&config.connection_url).await?;
        if connection.ping().await.is_err() {
            return Err(ConnectError::Unreachable);
        }
        Ok(Self { connection })
    }

    pub async fn up(&self) -> Result<(), sea_orm::DbErr> {
        migration::Migrator::up(&self.connection, None).await
    }

    /// Deletes prior `status = 'draft'` rows for `competition_codes`, then
    /// inserts `matches`, inside one transaction. `confirmed`/`archived`
    /// rows are never selected by the delete, so anchors survive untouched.
    pub async fn replace_draft_matches(
        &self,
        competition_codes: &[String],
        matches: &[Match],
    ) -> Result<(), ReplaceDraftMatchesError> {
        let models: Vec<entity::match_record::ActiveModel> = matches
            .iter()
            .map(|m| to_active_model(m))
            .collect();

        self.connection
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                let competition_codes = competition_codes.to_vec();
                Box::pin(async move {
                    MatchRecord::delete_many()
                        .filter(entity::match_record::Column::Status.eq("draft"))
                        .filter(entity::match_record::Column::CompetitionCode.is_in(competition_codes))
                        .exec(txn)
                        .await?;

                    for model in models {
                        model.insert(txn).await?;
                    }
                    Ok(())
                })
            })
            .await?;
        Ok(())
    }
}

fn to_active_model(m: &Match) -> entity::match_record::ActiveModel {
    entity::match_record::ActiveModel {
        id: Default::default(),
        match_code: Set(match_code(m)),
        competition_code: Set(m.competition_code.clone()),
        division_tag: Set(m.division_tag.clone()),
        home_team_id: Set(m.home),
        away_team_id: Set(m.away),
        reception_date: Set(m.date),
        gymnasium_id: Set(m.gym_id),
        status: Set("draft".to_string()),
    }
}

/// `COMP_DIV_YYYYMMDD_NNN` when scheduled, `COMP_DIV_NNN_UNSCHEDULED` otherwise.
fn match_code(m: &Match) -> String {
    match (m.status, m.date) {
        (MatchStatus::Scheduled, Some(date)) => format!(
            "{}_{}_{}_{:03}",
            m.competition_code,
            m.division_tag,
            date.format("%Y%m%d"),
            m.id
        ),
        _ => format!("{}_{}_{:03}_UNSCHEDULED", m.competition_code, m.division_tag, m.id),
    }
}

/// Deterministic `DELETE ... WHERE ...` + multi-row `INSERT` text dump of
/// §6, independent of any live connection so it is unit-testable without a
/// database. Row order follows the canonical ordering of §5 — `matches` is
/// expected to already be in that order (as `scheduler_core::solve` returns it).
pub fn export_sql(competition_codes: &[String], matches: &[Match]) -> String {
    let mut out = String::new();

    let codes = competition_codes
        .iter()
        .map(|c| format!("'{}'", c.replace('\'', "''")))
        .collect::<Vec<_>>()
        .join(", ");
    writeln!(
        out,
        "DELETE FROM match_record WHERE status = 'draft' AND competition_code IN ({codes});"
    )
    .unwrap();

    if matches.is_empty() {
        return out;
    }

    out.push_str(
        "INSERT INTO match_record (match_code, competition_code, division_tag, home_team_id, away_team_id, reception_date, gymnasium_id, status) VALUES\n",
    );
    let rows: Vec<String> = matches
        .iter()
        .map(|m| {
            format!(
                "  ('{}', '{}', '{}', {}, {}, {}, {}, 'draft')",
                match_code(m).replace('\'', "''"),
                m.competition_code.replace('\'', "''"),
                m.division_tag.replace('\'', "''"),
                m.home,
                m.away,
                sql_date(m.date),
                sql_opt_i32(m.gym_id),
            )
        })
        .collect();
    out.push_str(&rows.join(",\n"));
    out.push_str(";\n");
    out
}

fn sql_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => format!("'{}'", date.format("%Y-%m-%d")),
        None => "NULL".to_string(),
    }
}

fn sql_opt_i32(value: Option<i32>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => "NULL".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scheduler_core::MatchStatus;

    fn scheduled(id: i32) -> Match {
        Match {
            id,
            competition_code: "m".into(),
            division_tag: "1".into(),
            home: 1,
            away: 2,
            date: Some(NaiveDate::from_ymd_opt(2026, 3, 3).unwrap()),
            slot_id: Some(10),
            gym_id: Some(100),
            status: MatchStatus::Scheduled,
        }
    }

    fn unscheduled(id: i32) -> Match {
        Match {
            id,
            competition_code: "m".into(),
            division_tag: "1".into(),
            home: 1,
            away: 3,
            date: None,
            slot_id: None,
            gym_id: None,
            status: MatchStatus::Unscheduled,
        }
    }

    #[test]
    fn match_code_differs_by_status() {
        assert_eq!(match_code(&scheduled(7)), "m_1_20260303_007");
        assert_eq!(match_code(&unscheduled(7)), "m_1_007_UNSCHEDULED");
    }

    #[test]
    fn export_sql_is_deterministic_and_contains_delete_and_insert() {
        let matches = vec![scheduled(1), unscheduled(2)];
        let codes = vec!["m".to_string()];
        let first = export_sql(&codes, &matches);
        let second = export_sql(&codes, &matches);
        assert_eq!(first, second);
        assert!(first.contains("DELETE FROM match_record"));
        assert!(first.contains("INSERT INTO match_record"));
        assert!(first.contains("NULL"));
    }

    #[test]
    fn export_sql_with_no_matches_still_emits_delete() {
        let out = export_sql(&["m".to_string()], &[]);
        assert!(out.contains("DELETE FROM match_record"));
        assert!(!out.contains("INSERT"));
    }
}
