//! C5 — solver driver and result projection. Invokes the CP-SAT-style
//! backend under a wall-clock cap and projects the winning assignment back
//! to scheduled/unscheduled matches, then runs post-projection validation
//! (§4.5). Plays the role the teacher's `algorithm::schedule` entry points
//! play (`backend/src/algorithm.rs`, `algorithm/v2.rs`) — one function that
//! takes prepared input and returns a result — but the search itself is
//! delegated to `good_lp`'s `highs` backend rather than hand-rolled
//! heuristics.

use std::collections::HashMap;
use std::time::Duration;

use good_lp::{highs, Solution, SolverModel};
use log::{info, warn};

use crate::constraints::{build_model, ConstraintModel};
use crate::enumerate::{enumerate_candidates, AnchorIndex, Candidate};
use crate::error::SchedulerError;
use crate::model::{GymId, Match, MatchStatus, TeamId};
use crate::projection::ProjectedEntities;

/// Scopes the objective and, for incremental runs, identifies the team whose
/// matches are being filled in without disturbing any anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    FullSeason,
    Incremental { new_team: TeamId },
}

impl Mode {
    pub fn is_incremental(&self) -> bool {
        matches!(self, Mode::Incremental { .. })
    }
}

/// The winning assignment: every match, scheduled or not, canonically
/// ordered per §5 (`date, start_time, division, home_id, away_id`).
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    pub matches: Vec<Match>,
}

pub fn solve(
    entities: &ProjectedEntities,
    gyms: &HashMap<GymId, crate::model::Gymnasium>,
    anchor_index: &AnchorIndex,
    legal_dates_by_competition: &HashMap<String, Vec<chrono::NaiveDate>>,
    snapshot: &crate::model::LoaderSnapshot,
    mode: Mode,
    time_cap: Duration,
) -> Result<Schedule, SchedulerError> {
    let enumeration = enumerate_candidates(entities, snapshot, legal_dates_by_competition, anchor_index);

    let model = build_model(entities, &enumeration, gyms, anchor_index, mode);

    let assignment = run_solver(model, time_cap)?;

    let matches = project_result(entities, &enumeration, &assignment);

    validate(entities, &matches, gyms, anchor_index)?;

    Ok(Schedule { matches })
}

/// Thin wrapper around the `good_lp`/`highs` call so the rest of this module
/// stays solver-agnostic in spirit, per the §9 `new_bool_var`/`add_linear_*`/
/// `maximize`/`solve(time_cap)` contract.
fn run_solver(model: ConstraintModel, time_cap: Duration) -> Result<Vec<bool>, SchedulerError> {
    let ConstraintModel {
        variables,
        candidate_vars,
        le_constraints,
        eq_constraints,
        objective,
    } = model;

    let mut problem = variables.maximise(objective).using(highs);
    problem.set_time_limit(time_cap.as_secs_f64());

    for (expr, bound) in le_constraints {
        problem = problem.with(good_lp::constraint!(expr <= bound));
    }
    for (expr, bound) in eq_constraints {
        problem = problem.with(good_lp::constraint!(expr == bound));
    }

    let solution = match problem.solve() {
        Ok(solution) => solution,
        Err(good_lp::ResolutionError::Infeasible) => return Err(SchedulerError::SolverInfeasible),
        Err(good_lp::ResolutionError::Unbounded) => {
            return Err(SchedulerError::SolverBackend("unbounded model".into()))
        }
        Err(other) => {
            let message = other.to_string();
            if message.to_lowercase().contains("time") {
                return Err(SchedulerError::SolverTimeout);
            }
            return Err(SchedulerError::SolverBackend(message));
        }
    };

    Ok(candidate_vars
        .iter()
        .map(|&var| solution.value(var) > 0.5)
        .collect())
}

fn project_result(
    entities: &ProjectedEntities,
    enumeration: &crate::enumerate::EnumerationResult,
    assignment: &[bool],
) -> Vec<Match> {
    let winning: HashMap<crate::model::MatchId, &Candidate> = enumeration
        .candidates
        .iter()
        .enumerate()
        .filter(|(idx, _)| assignment[*idx])
        .map(|(_, candidate)| (candidate.match_id, candidate))
        .collect();

    let mut matches = Vec::with_capacity(enumeration.identities.len());
    for identity in &enumeration.identities {
        if let Some(candidate) = winning.get(&identity.id) {
            matches.push(Match {
                id: identity.id,
                competition_code: identity.competition_code.clone(),
                division_tag: identity.division_tag.clone(),
                home: candidate.home,
                away: candidate.away,
                date: Some(candidate.date),
                slot_id: Some(candidate.slot_id),
                gym_id: Some(candidate.gym_id),
                status: MatchStatus::Scheduled,
            });
        } else {
            // Prefer the team with more time slots as the nominal home side;
            // deterministic fallback to the first team of the pair.
            let team_a_slots = entities
                .teams
                .get(&identity.team_a)
                .map(|t| t.slot_ids.len())
                .unwrap_or(0);
            let team_b_slots = entities
                .teams
                .get(&identity.team_b)
                .map(|t| t.slot_ids.len())
                .unwrap_or(0);
            let (home, away) = if team_b_slots > team_a_slots {
                (identity.team_b, identity.team_a)
            } else {
                (identity.team_a, identity.team_b)
            };
            matches.push(Match {
                id: identity.id,
                competition_code: identity.competition_code.clone(),
                division_tag: identity.division_tag.clone(),
                home,
                away,
                date: None,
                slot_id: None,
                gym_id: None,
                status: MatchStatus::Unscheduled,
            });
        }
    }

    let start_time_of = |m: &Match| m.slot_id.and_then(|id| entities.slots.get(&id)).map(|s| s.start_time);

    matches.sort_by(|a, b| {
        (
            a.date,
            start_time_of(a),
            &a.competition_code,
            &a.division_tag,
            a.home,
            a.away,
        )
            .cmp(&(
                b.date,
                start_time_of(b),
                &b.competition_code,
                &b.division_tag,
                b.home,
                b.away,
            ))
    });

    let unscheduled = matches
        .iter()
        .filter(|m| m.status == MatchStatus::Unscheduled)
        .count();
    if unscheduled > 0 {
        info!("{unscheduled} match identities left unscheduled after solving");
    }

    matches
}

/// Post-projection validation of §4.5: (a) M4 counting output alone, (b) M6
/// slack at most one, (c) slot-weekday equals date-weekday.
fn validate(
    entities: &ProjectedEntities,
    matches: &[Match],
    gyms: &HashMap<GymId, crate::model::Gymnasium>,
    anchor_index: &AnchorIndex,
) -> Result<(), SchedulerError> {
    use chrono::Datelike;

    let mut failures = Vec::new();

    let mut gym_use: HashMap<(GymId, chrono::NaiveDate), u32> = HashMap::new();
    for m in matches.iter().filter(|m| m.status == MatchStatus::Scheduled) {
        if let (Some(gym_id), Some(date)) = (m.gym_id, m.date) {
            *gym_use.entry((gym_id, date)).or_insert(0) += 1;
        }
    }
    for (&(gym_id, date), &count) in &gym_use {
        let capacity = gyms.get(&gym_id).map(|g| g.court_count as u32).unwrap_or(0);
        let existing = anchor_index
            .gym_capacity_used
            .get(&(gym_id, date))
            .copied()
            .unwrap_or(0);
        if count + existing > capacity {
            failures.push(format!(
                "gym {gym_id} on {date} has {count} new + {existing} anchored matches, over capacity {capacity}"
            ));
        }
    }

    let mut home_count: HashMap<TeamId, i64> = HashMap::new();
    let mut away_count: HashMap<TeamId, i64> = HashMap::new();
    for m in matches.iter().filter(|m| m.status == MatchStatus::Scheduled) {
        *home_count.entry(m.home).or_insert(0) += 1;
        *away_count.entry(m.away).or_insert(0) += 1;
    }
    for team in entities.teams.values().filter(|t| !t.slot_ids.is_empty()) {
        let home = *home_count.get(&team.id).unwrap_or(&0);
        let away = *away_count.get(&team.id).unwrap_or(&0);
        if home - away < -1 {
            failures.push(format!(
                "team {} has home/away slack {} below -1",
                team.id,
                home - away
            ));
        }
    }

    for m in matches.iter().filter(|m| m.status == MatchStatus::Scheduled) {
        if let (Some(date), Some(slot_id)) = (m.date, m.slot_id) {
            if let Some(slot) = entities.slots.get(&slot_id) {
                if slot.weekday != date.weekday() {
                    failures.push(format!(
                        "match {} scheduled on {date} but its slot is a {:?}",
                        m.id, slot.weekday
                    ));
                }
            }
        }
    }

    if !failures.is_empty() {
        warn!("post-projection validation failed: {failures:?}");
        return Err(SchedulerError::PostProjectionValidationFailed(failures));
    }
    Ok(())
}
