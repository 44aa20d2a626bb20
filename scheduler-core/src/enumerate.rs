//! C3 — the placement enumerator. For every unordered team pair in each
//! division, emits a distinct match identity, then every feasible
//! `(home, away, date, slot)` candidate for it — a lazy sequence in spirit,
//! built eagerly here since the CP model needs the whole candidate set at
//! once. Generalizes the teacher's `RegionalGameQueue`
//! (`backend/src/lib.rs`) — a stateful iterator over candidate
//! reservations — onto the spec's richer candidate shape, without the
//! `unsafe`/`NonNull` self-reference tricks the teacher's legacy
//! implementation leans on.

use std::collections::{HashMap, HashSet};

use chrono::{Datelike, NaiveDate};
use itertools::Itertools;

use crate::error::SchedulerError;
use crate::model::{
    Anchor, AnchorStatus, GymId, LoaderSnapshot, MatchId, Team, TeamId, TimeSlotId,
};
use crate::projection::ProjectedEntities;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatchIdentity {
    pub id: MatchId,
    pub competition_code: String,
    pub division_tag: String,
    /// Unordered pair, stored with `team_a < team_b`.
    pub team_a: TeamId,
    pub team_b: TeamId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub match_id: MatchId,
    pub home: TeamId,
    pub away: TeamId,
    pub date: NaiveDate,
    pub slot_id: TimeSlotId,
    pub gym_id: GymId,
}

/// M9: pre-existing confirmed matches materialised as candidate filters
/// rather than variables — blocked dates/weeks per team, venue capacity
/// already consumed, and the set of pairs that are already resolved and so
/// need no decision variable at all.
#[derive(Debug, Clone, Default)]
pub struct AnchorIndex {
    pub blocked_dates: HashMap<TeamId, HashSet<NaiveDate>>,
    pub blocked_weeks: HashMap<TeamId, HashSet<(i32, u32)>>,
    pub gym_capacity_used: HashMap<(GymId, NaiveDate), u32>,
    pub matched_pairs: HashSet<(TeamId, TeamId)>,
}

impl AnchorIndex {
    pub fn build(
        anchors: &[Anchor],
        gyms: &HashMap<GymId, crate::model::Gymnasium>,
        teams: &HashMap<TeamId, Team>,
    ) -> Result<Self, SchedulerError> {
        let mut index = AnchorIndex::default();
        for anchor in anchors {
            if !teams.contains_key(&anchor.home) {
                return Err(SchedulerError::DanglingAnchor(anchor.home));
            }
            if !teams.contains_key(&anchor.away) {
                return Err(SchedulerError::DanglingAnchor(anchor.away));
            }

            index
                .blocked_dates
                .entry(anchor.home)
                .or_default()
                .insert(anchor.date);
            index
                .blocked_dates
                .entry(anchor.away)
                .or_default()
                .insert(anchor.date);

            let iso = anchor.date.iso_week();
            let week_key = (iso.year(), iso.week());
            index.blocked_weeks.entry(anchor.home).or_default().insert(week_key);
            index.blocked_weeks.entry(anchor.away).or_default().insert(week_key);

            let used = index
                .gym_capacity_used
                .entry((anchor.gym_id, anchor.date))
                .or_insert(0);
            *used += 1;

            index
                .matched_pairs
                .insert(crate::model::sorted_pair(anchor.home, anchor.away));

            if matches!(anchor.status, AnchorStatus::Confirmed | AnchorStatus::Archived) {
                if let Some(gym) = gyms.get(&anchor.gym_id) {
                    if *used > gym.court_count as u32 {
                        return Err(SchedulerError::CapacityExceededByAnchors {
                            gym_id: anchor.gym_id,
                            date: anchor.date,
                            existing_use: *used,
                            capacity: gym.court_count,
                        });
                    }
                }
            }
        }
        Ok(index)
    }
}

pub struct EnumerationResult {
    pub identities: Vec<MatchIdentity>,
    pub candidates: Vec<Candidate>,
}

/// Builds every match identity for the projected divisions and every
/// feasible candidate for identities not already resolved by an anchor.
pub fn enumerate_candidates(
    entities: &ProjectedEntities,
    snapshot: &LoaderSnapshot,
    legal_dates_by_competition: &HashMap<String, Vec<NaiveDate>>,
    anchor_index: &AnchorIndex,
) -> EnumerationResult {
    let mut identities = Vec::new();
    let mut candidates = Vec::new();
    let mut next_id: MatchId = 0;

    for division in &entities.divisions {
        let Some(legal_dates) = legal_dates_by_competition.get(&division.competition_code) else {
            continue;
        };

        for (a, b) in division.team_ids.iter().copied().tuple_combinations() {
            let (team_a, team_b) = crate::model::sorted_pair(a, b);
            let identity = MatchIdentity {
                id: next_id,
                competition_code: division.competition_code.clone(),
                division_tag: division.division_tag.clone(),
                team_a,
                team_b,
            };
            next_id += 1;

            if anchor_index.matched_pairs.contains(&(team_a, team_b)) {
                identities.push(identity);
                continue;
            }

            for &(home, away) in &[(team_a, team_b), (team_b, team_a)] {
                let Some(home_team) = entities.teams.get(&home) else {
                    continue;
                };
                for slot_id in &home_team.slot_ids {
                    let Some(slot) = entities.slots.get(slot_id) else {
                        continue;
                    };
                    for &date in legal_dates {
                        if date.weekday() != slot.weekday {
                            continue;
                        }
                        if !snapshot.gym_available(slot.gym_id, date) {
                            continue;
                        }
                        if anchor_index
                            .blocked_dates
                            .get(&home)
                            .is_some_and(|d| d.contains(&date))
                            || anchor_index
                                .blocked_dates
                                .get(&away)
                                .is_some_and(|d| d.contains(&date))
                        {
                            continue;
                        }
                        let iso = date.iso_week();
                        let week_key = (iso.year(), iso.week());
                        if anchor_index
                            .blocked_weeks
                            .get(&home)
                            .is_some_and(|w| w.contains(&week_key))
                            || anchor_index
                                .blocked_weeks
                                .get(&away)
                                .is_some_and(|w| w.contains(&week_key))
                        {
                            continue;
                        }
                        let used = anchor_index
                            .gym_capacity_used
                            .get(&(slot.gym_id, date))
                            .copied()
                            .unwrap_or(0);
                        let capacity = snapshot
                            .gyms
                            .get(&slot.gym_id)
                            .map(|g| g.court_count as u32)
                            .unwrap_or(0);
                        if used >= capacity {
                            continue;
                        }

                        candidates.push(Candidate {
                            match_id: identity.id,
                            home,
                            away,
                            date,
                            slot_id: *slot_id,
                            gym_id: slot.gym_id,
                        });
                    }
                }
            }

            identities.push(identity);
        }
    }

    EnumerationResult {
        identities,
        candidates,
    }
}
