//! Error taxonomy of §7, in decreasing severity. Configuration-fatal and
//! solver failures abort the run with no partial output; partial schedules
//! and loader anomalies are not errors — see [`crate::summary::RunSummary`].
//!
//! Follows the teacher's fine-grained per-operation error enums
//! (`db/src/errors.rs`: `CreateRegionError`, `TimeSlotError`, ...) collapsed
//! here into one enum since the scheduler has one entry point rather than
//! many CRUD operations.

use thiserror::Error;

use crate::model::{GymId, TeamId};

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("division {competition_code}/{division_tag} has {size} teams, more than the ceiling of 8")]
    DivisionTooLarge {
        competition_code: String,
        division_tag: String,
        size: usize,
    },

    #[error("no competition window configured for competition `{competition_code}`")]
    MissingCompetitionWindow { competition_code: String },

    #[error("could not parse time `{raw}` for team {team_id}")]
    UnparseableTime { team_id: TeamId, raw: String },

    #[error(
        "gymnasium {gym_id} already has {existing_use} confirmed matches on {date}, \
         exceeding its {capacity}-court capacity"
    )]
    CapacityExceededByAnchors {
        gym_id: GymId,
        date: chrono::NaiveDate,
        existing_use: u32,
        capacity: u8,
    },

    #[error("an anchored match references a team that is missing from the snapshot: {0}")]
    DanglingAnchor(TeamId),

    #[error("the constraint model has no solution at all")]
    SolverInfeasible,

    #[error("the solver exceeded its time cap without finding a feasible solution")]
    SolverTimeout,

    #[error("the solver backend failed: {0}")]
    SolverBackend(String),

    #[error("post-projection validation failed: {0:?}")]
    PostProjectionValidationFailed(Vec<String>),

    #[error("team {0} does not belong to any loaded division")]
    UnknownTeam(TeamId),
}

/// Loader anomalies (§7 kind 5): non-fatal, documented in the run summary
/// rather than aborting the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoaderWarning {
    TeamWithoutSlots(TeamId),
    PairWithoutHistory(TeamId, TeamId),
    RosterBelowCompleteness(TeamId),
    /// Emitted by the fallback branch of the weekday parser (§4.1).
    UnparseableWeekday { team_id: TeamId, raw: String },
}
