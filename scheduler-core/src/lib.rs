//! The constraint scheduler's hard core.
//!
//! Five cooperating components, leaves-first: [`projection`] (C1) builds
//! entities, [`calendar`] (C2) derives legal dates, [`enumerate`] (C3)
//! produces candidate placements, [`constraints`] (C4) posts the boolean
//! model, and [`solver`] (C5) solves it and projects the result back to
//! scheduled/unscheduled matches.

pub mod calendar;
pub mod config;
pub mod constraints;
pub mod enumerate;
pub mod error;
pub mod model;
pub mod projection;
pub mod solver;
pub mod summary;

pub use config::SchedulerConfig;
pub use error::SchedulerError;
pub use model::*;
pub use solver::{Mode, Schedule};
pub use summary::RunSummary;

use std::collections::{HashMap, HashSet};

/// The driver: wires C1 through C5 together for one invocation. Builds
/// entities, derives legal dates per competition, indexes anchors, solves,
/// and returns the schedule alongside the run summary of §7 Addition.
pub fn run(
    snapshot: &LoaderSnapshot,
    competitions: &HashSet<String>,
    config: &SchedulerConfig,
    mode: Mode,
) -> Result<(Schedule, RunSummary), SchedulerError> {
    let entities = projection::project(snapshot, competitions)?;

    if let Mode::Incremental { new_team } = mode {
        if !entities.teams.contains_key(&new_team) {
            return Err(SchedulerError::UnknownTeam(new_team));
        }
    }

    let legal_dates_by_competition: HashMap<String, Vec<chrono::NaiveDate>> = entities
        .competition_windows
        .iter()
        .map(|(code, window)| (code.clone(), calendar::legal_dates(window, config)))
        .collect();

    let anchor_index =
        enumerate::AnchorIndex::build(&snapshot.anchors, &snapshot.gyms, &entities.teams)?;

    let time_cap = config.time_cap(mode.is_incremental());

    let schedule = solver::solve(
        &entities,
        &snapshot.gyms,
        &anchor_index,
        &legal_dates_by_competition,
        snapshot,
        mode,
        time_cap,
    )?;

    let summary = RunSummary::from_run(entities.warnings.clone(), &schedule.matches);

    Ok((schedule, summary))
}
