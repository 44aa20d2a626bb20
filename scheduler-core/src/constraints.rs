//! C4 — the constraint model. Posts M1–M9 over one boolean variable per
//! candidate and builds the objective. Talks to the solver only through the
//! narrow interface design note §9 calls out (`new_bool_var`, `add_linear_le`,
//! `add_linear_eq`, `maximize`) — here backed by `good_lp`, the same role
//! `coin_cbc`/`highs` play in the timetabling solvers of the wider pack, in
//! place of the teacher's heuristic `argmin`/`mcts` search.

use std::collections::{HashMap, HashSet};

use chrono::Datelike;
use good_lp::{variable, Expression, ProblemVariables, Variable};

use crate::enumerate::{AnchorIndex, Candidate, EnumerationResult, MatchIdentity};
use crate::model::{GymId, Gymnasium, MatchId, TeamId};
use crate::projection::ProjectedEntities;
use crate::solver::Mode;

/// Everything the solver driver needs: the variable pool, every posted
/// constraint as a linear expression bound, and the objective to maximise.
pub struct ConstraintModel {
    pub variables: ProblemVariables,
    /// One entry per candidate, in the same order as `EnumerationResult::candidates`.
    pub candidate_vars: Vec<Variable>,
    pub le_constraints: Vec<(Expression, f64)>,
    pub eq_constraints: Vec<(Expression, f64)>,
    pub objective: Expression,
}

/// Builds the boolean model for the given candidate set. `mode` scopes the
/// objective (M2): the full sum in full-season mode, or only the new team's
/// matches in incremental mode.
pub fn build_model(
    entities: &ProjectedEntities,
    enumeration: &EnumerationResult,
    gyms: &HashMap<GymId, Gymnasium>,
    anchor_index: &AnchorIndex,
    mode: Mode,
) -> ConstraintModel {
    let mut variables = ProblemVariables::new();
    let candidate_vars: Vec<Variable> = enumeration
        .candidates
        .iter()
        .map(|_| variables.add(variable().binary()))
        .collect();

    let identities_by_id: HashMap<MatchId, &MatchIdentity> = enumeration
        .identities
        .iter()
        .map(|identity| (identity.id, identity))
        .collect();

    let mut by_match: HashMap<MatchId, Vec<usize>> = HashMap::new();
    let mut by_team_date: HashMap<(TeamId, chrono::NaiveDate), Vec<usize>> = HashMap::new();
    let mut by_gym_date: HashMap<(GymId, chrono::NaiveDate), Vec<usize>> = HashMap::new();
    let mut by_team_week: HashMap<(TeamId, i32, u32), Vec<usize>> = HashMap::new();
    let mut home_vars: HashMap<TeamId, Vec<usize>> = HashMap::new();
    let mut away_vars: HashMap<TeamId, Vec<usize>> = HashMap::new();

    for (idx, candidate) in enumeration.candidates.iter().enumerate() {
        by_match.entry(candidate.match_id).or_default().push(idx);

        by_team_date
            .entry((candidate.home, candidate.date))
            .or_default()
            .push(idx);
        by_team_date
            .entry((candidate.away, candidate.date))
            .or_default()
            .push(idx);

        by_gym_date
            .entry((candidate.gym_id, candidate.date))
            .or_default()
            .push(idx);

        let iso = candidate.date.iso_week();
        let week_key = (iso.year(), iso.week());
        by_team_week
            .entry((candidate.home, week_key.0, week_key.1))
            .or_default()
            .push(idx);
        by_team_week
            .entry((candidate.away, week_key.0, week_key.1))
            .or_default()
            .push(idx);

        home_vars.entry(candidate.home).or_default().push(idx);
        away_vars.entry(candidate.away).or_default().push(idx);
    }

    let mut le_constraints = Vec::new();
    let mut eq_constraints = Vec::new();

    // M1 — uniqueness.
    for indices in by_match.values() {
        le_constraints.push((sum_vars(indices, &candidate_vars), 1.0));
    }

    // M3 — one per team per date.
    for indices in by_team_date.values() {
        le_constraints.push((sum_vars(indices, &candidate_vars), 1.0));
    }

    // M4 — venue capacity, net of pre-existing confirmed use.
    for (&(gym_id, date), indices) in &by_gym_date {
        let capacity = gyms.get(&gym_id).map(|g| g.court_count as f64).unwrap_or(0.0);
        let existing_use = anchor_index
            .gym_capacity_used
            .get(&(gym_id, date))
            .copied()
            .unwrap_or(0) as f64;
        let bound = (capacity - existing_use).max(0.0);
        le_constraints.push((sum_vars(indices, &candidate_vars), bound));
    }

    // M5 — one per team per ISO week.
    for indices in by_team_week.values() {
        le_constraints.push((sum_vars(indices, &candidate_vars), 1.0));
    }

    // M6 — home-balance floor: only for teams that own at least one slot.
    let slot_owning_teams: HashSet<TeamId> = entities
        .teams
        .values()
        .filter(|team| !team.slot_ids.is_empty())
        .map(|team| team.id)
        .collect();
    for &team_id in &slot_owning_teams {
        let home = home_vars.get(&team_id).cloned().unwrap_or_default();
        let away = away_vars.get(&team_id).cloned().unwrap_or_default();
        let mut expr = sum_vars(&away, &candidate_vars);
        expr -= sum_vars(&home, &candidate_vars);
        // Σ home − Σ away ≥ −1  ⇔  Σ away − Σ home ≤ 1
        le_constraints.push((expr, 1.0));
    }

    // M7 — history-driven alternation.
    for identity in &enumeration.identities {
        let pair = (identity.team_a, identity.team_b);
        let Some(&(receptions_a, receptions_b)) = entities.history.get(&pair) else {
            continue;
        };
        if receptions_a == receptions_b {
            continue;
        }
        let owed_receiver = if receptions_a < receptions_b {
            identity.team_a
        } else {
            identity.team_b
        };
        let other_side = if owed_receiver == identity.team_a {
            identity.team_b
        } else {
            identity.team_a
        };
        if !slot_owning_teams.contains(&owed_receiver) {
            continue;
        }
        let indices: Vec<usize> = by_match
            .get(&identity.id)
            .into_iter()
            .flatten()
            .copied()
            .filter(|&idx| enumeration.candidates[idx].home == other_side)
            .collect();
        if indices.is_empty() {
            continue;
        }
        eq_constraints.push((sum_vars(&indices, &candidate_vars), 0.0));
    }

    // M8 — shared-roster exclusion, reusing the per-team/date index built for M3.
    for (&(e1, e2), &ratio) in &entities.shared_roster {
        if ratio <= 0.0 {
            continue;
        }
        let dates: HashSet<chrono::NaiveDate> = by_team_date
            .keys()
            .filter(|(team, _)| *team == e1 || *team == e2)
            .map(|(_, date)| *date)
            .collect();
        for date in dates {
            let mut indices = by_team_date.get(&(e1, date)).cloned().unwrap_or_default();
            indices.extend(by_team_date.get(&(e2, date)).cloned().unwrap_or_default());
            if indices.is_empty() {
                continue;
            }
            le_constraints.push((sum_vars(&indices, &candidate_vars), 1.0));
        }
    }

    // M2 — objective.
    let indices = objective_indices(enumeration, &identities_by_id, mode);
    let objective = sum_vars(&indices, &candidate_vars);

    ConstraintModel {
        variables,
        candidate_vars,
        le_constraints,
        eq_constraints,
        objective,
    }
}

/// Which candidate indices contribute to M2: every candidate in full-season
/// mode, or only candidates of match identities touching the new team in
/// incremental mode. Split out from `build_model` so the scoping logic is
/// testable without touching `good_lp` internals.
fn objective_indices(
    enumeration: &EnumerationResult,
    identities_by_id: &HashMap<MatchId, &MatchIdentity>,
    mode: Mode,
) -> Vec<usize> {
    let new_team = match mode {
        Mode::FullSeason => return (0..enumeration.candidates.len()).collect(),
        Mode::Incremental { new_team } => new_team,
    };
    enumeration
        .candidates
        .iter()
        .enumerate()
        .filter(|(_, candidate)| {
            identities_by_id
                .get(&candidate.match_id)
                .map(|identity| identity.team_a == new_team || identity.team_b == new_team)
                .unwrap_or(false)
        })
        .map(|(idx, _)| idx)
        .collect()
}

fn sum_vars(indices: &[usize], vars: &[Variable]) -> Expression {
    let mut expr = Expression::from(0.0);
    for &idx in indices {
        expr += vars[idx];
    }
    expr
}
