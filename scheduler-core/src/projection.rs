//! C1 — entity projection. Consumes a [`LoaderSnapshot`] and produces the
//! immutable entities the rest of the pipeline reads: standing selection,
//! competition filtering, division formation, and mode-dependent time-slot
//! loading (`CompetitionKind::{Regular,Cup,Knockout}`, one strategy per
//! variant sharing the `load_slots` contract — the same shape as the
//! teacher's per-algorithm-version strategy split in `algorithm/v2.rs` vs
//! `algorithm/v3.rs` vs `algorithm/practices.rs`).

use std::collections::{HashMap, HashSet};

use chrono::{NaiveTime, Weekday};

use crate::error::{LoaderWarning, SchedulerError};
use crate::model::{
    Classement, CompetitionWindow, Division, LoaderSnapshot, Team, TeamId, TimeSlot,
    MAX_DIVISION_SIZE, MIN_DIVISION_SIZE,
};

#[derive(Debug, Clone, Default)]
pub struct ProjectedEntities {
    pub teams: HashMap<TeamId, Team>,
    pub divisions: Vec<Division>,
    pub competition_windows: HashMap<String, CompetitionWindow>,
    pub history: HashMap<(TeamId, TeamId), (u32, u32)>,
    pub shared_roster: HashMap<(TeamId, TeamId), f64>,
    /// Every slot referenced by a projected team's `slot_ids`, regular or
    /// synthesized from a knockout registration.
    pub slots: HashMap<crate::model::TimeSlotId, TimeSlot>,
    pub warnings: Vec<LoaderWarning>,
}

/// Parses a weekday string via a fixed, locale-independent mapping. Returns
/// `None` if unparseable so the caller can emit a warning before defaulting
/// to Monday (§4.1).
pub fn parse_weekday(raw: &str) -> Option<Weekday> {
    let lower = raw.trim().to_lowercase();
    let key = lower.get(..3).unwrap_or(lower.as_str());
    match key {
        "mon" => Some(Weekday::Mon),
        "tue" => Some(Weekday::Tue),
        "wed" => Some(Weekday::Wed),
        "thu" => Some(Weekday::Thu),
        "fri" => Some(Weekday::Fri),
        "sat" => Some(Weekday::Sat),
        "sun" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Parses a time string (`"HH:MM"` or `"HH:MM:SS"`); `None` means the raw
/// value didn't match either format.
fn parse_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw.trim(), "%H:%M:%S"))
        .ok()
}

const DEFAULT_KNOCKOUT_TIME: (u32, u32) = (20, 0);

/// Strategy for loading a team's recurring time slots; the contract every
/// `CompetitionKind` variant implements identically.
trait SlotLoader {
    fn load_slots(
        &self,
        team: &Team,
        snapshot: &LoaderSnapshot,
        warnings: &mut Vec<LoaderWarning>,
    ) -> Result<Vec<TimeSlot>, SchedulerError>;
}

struct RegularSlotLoader;

impl SlotLoader for RegularSlotLoader {
    fn load_slots(
        &self,
        team: &Team,
        snapshot: &LoaderSnapshot,
        _warnings: &mut Vec<LoaderWarning>,
    ) -> Result<Vec<TimeSlot>, SchedulerError> {
        Ok(team
            .slot_ids
            .iter()
            .filter_map(|id| snapshot.time_slots.get(id))
            .copied()
            .collect())
    }
}

struct CupSlotLoader;

impl SlotLoader for CupSlotLoader {
    fn load_slots(
        &self,
        team: &Team,
        snapshot: &LoaderSnapshot,
        warnings: &mut Vec<LoaderWarning>,
    ) -> Result<Vec<TimeSlot>, SchedulerError> {
        if !snapshot.cup_registered_teams.contains(&team.id) {
            return Ok(Vec::new());
        }
        RegularSlotLoader.load_slots(team, snapshot, warnings)
    }
}

struct KnockoutSlotLoader;

impl SlotLoader for KnockoutSlotLoader {
    fn load_slots(
        &self,
        team: &Team,
        snapshot: &LoaderSnapshot,
        warnings: &mut Vec<LoaderWarning>,
    ) -> Result<Vec<TimeSlot>, SchedulerError> {
        let Some(entries) = snapshot.knockout_registrations.get(&team.id) else {
            return Ok(Vec::new());
        };
        let mut slots = Vec::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            let start_time = match &entry.time_raw {
                None => {
                    NaiveTime::from_hms_opt(DEFAULT_KNOCKOUT_TIME.0, DEFAULT_KNOCKOUT_TIME.1, 0)
                        .unwrap()
                }
                Some(raw) => parse_time(raw).ok_or_else(|| SchedulerError::UnparseableTime {
                    team_id: team.id,
                    raw: raw.clone(),
                })?,
            };
            let weekday = match parse_weekday(&entry.weekday_raw) {
                Some(weekday) => weekday,
                None => {
                    warnings.push(LoaderWarning::UnparseableWeekday {
                        team_id: team.id,
                        raw: entry.weekday_raw.clone(),
                    });
                    Weekday::Mon
                }
            };
            slots.push(TimeSlot {
                // Synthetic id: negative, distinct per team/registration
                // index so it never collides with a real slot id.
                id: -(team.id * 4 + i as i32 + 1),
                team_id: team.id,
                gym_id: entry.gym_id,
                weekday,
                start_time,
            });
        }
        Ok(slots)
    }
}

fn slot_loader_for(kind: crate::model::CompetitionKind) -> Box<dyn SlotLoader> {
    use crate::model::CompetitionKind::*;
    match kind {
        Regular => Box::new(RegularSlotLoader),
        Cup => Box::new(CupSlotLoader),
        Knockout => Box::new(KnockoutSlotLoader),
    }
}

/// Selects, per team, the classement to use: a non-exclusion tag is
/// preferred over an exclusion tag; ties break by insertion order. Teams
/// whose sole classement is an exclusion tag are dropped entirely.
fn select_standings(classements: &[Classement]) -> HashMap<TeamId, Classement> {
    let mut chosen: HashMap<TeamId, Classement> = HashMap::new();
    for classement in classements {
        match chosen.get(&classement.team_id) {
            None => {
                chosen.insert(classement.team_id, classement.clone());
            }
            Some(existing) if existing.is_exclusion() && !classement.is_exclusion() => {
                chosen.insert(classement.team_id, classement.clone());
            }
            _ => {}
        }
    }
    chosen.retain(|_, classement| !classement.is_exclusion());
    chosen
}

pub fn project(
    snapshot: &LoaderSnapshot,
    competitions: &HashSet<String>,
) -> Result<ProjectedEntities, SchedulerError> {
    let standings = select_standings(&snapshot.classements);

    let mut warnings = Vec::new();

    // Competition filtering + division formation.
    let mut grouped: HashMap<(String, String), Vec<TeamId>> = HashMap::new();
    for (team_id, classement) in &standings {
        if !competitions.contains(&classement.competition_code) {
            continue;
        }
        grouped
            .entry((classement.competition_code.clone(), classement.division_tag.clone()))
            .or_default()
            .push(*team_id);
    }

    let mut divisions = Vec::new();
    for ((competition_code, division_tag), mut team_ids) in grouped {
        if team_ids.len() < MIN_DIVISION_SIZE {
            continue;
        }
        if team_ids.len() > MAX_DIVISION_SIZE {
            return Err(SchedulerError::DivisionTooLarge {
                competition_code,
                division_tag,
                size: team_ids.len(),
            });
        }
        team_ids.sort_unstable();
        divisions.push(Division {
            competition_code,
            division_tag,
            team_ids,
        });
    }
    divisions.sort_by(|a, b| a.key().cmp(&b.key()));

    // Validate every division's competition has a window.
    for division in &divisions {
        if !snapshot
            .competition_windows
            .contains_key(&division.competition_code)
        {
            return Err(SchedulerError::MissingCompetitionWindow {
                competition_code: division.competition_code.clone(),
            });
        }
    }

    // Time-slot loading, mode-dependent per competition.
    let mut teams: HashMap<TeamId, Team> = HashMap::new();
    let mut slots: HashMap<crate::model::TimeSlotId, TimeSlot> = HashMap::new();
    for division in &divisions {
        let kind = snapshot
            .competition_kinds
            .get(&division.competition_code)
            .copied()
            .unwrap_or(crate::model::CompetitionKind::Regular);
        let loader = slot_loader_for(kind);

        for team_id in &division.team_ids {
            let Some(source_team) = snapshot.teams.get(team_id) else {
                continue;
            };
            let loaded = loader.load_slots(source_team, snapshot, &mut warnings)?;
            if loaded.is_empty() {
                warnings.push(LoaderWarning::TeamWithoutSlots(*team_id));
            }
            let mut team = source_team.clone();
            team.slot_ids = loaded.iter().map(|s| s.id).collect();
            teams.insert(*team_id, team);

            for slot in loaded {
                slots.insert(slot.id, slot);
            }
        }
    }

    let relevant_teams: HashSet<TeamId> = divisions
        .iter()
        .flat_map(|d| d.team_ids.iter().copied())
        .collect();

    for division in &divisions {
        for i in 0..division.team_ids.len() {
            for j in (i + 1)..division.team_ids.len() {
                let pair = crate::model::sorted_pair(division.team_ids[i], division.team_ids[j]);
                if !snapshot.history.contains_key(&pair) {
                    warnings.push(LoaderWarning::PairWithoutHistory(pair.0, pair.1));
                }
            }
        }
    }

    for team_id in &relevant_teams {
        if matches!(snapshot.roster_meets_completeness.get(team_id), Some(false)) {
            warnings.push(LoaderWarning::RosterBelowCompleteness(*team_id));
        }
    }

    let shared_roster = snapshot
        .shared_roster
        .iter()
        .filter(|((a, b), _)| relevant_teams.contains(a) && relevant_teams.contains(b))
        .map(|(k, v)| (*k, *v))
        .collect();

    let history = snapshot
        .history
        .iter()
        .filter(|((a, b), _)| relevant_teams.contains(a) && relevant_teams.contains(b))
        .map(|(k, v)| (*k, *v))
        .collect();

    let competition_windows = snapshot
        .competition_windows
        .iter()
        .filter(|(code, _)| divisions.iter().any(|d| &d.competition_code == *code))
        .map(|(k, v)| (k.clone(), *v))
        .collect();

    Ok(ProjectedEntities {
        teams,
        divisions,
        competition_windows,
        history,
        shared_roster,
        slots,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CompetitionKind, Team};

    fn team(id: TeamId, competition_code: &str, division_tag: &str) -> (Team, Classement) {
        (
            Team {
                id,
                name: format!("Team {id}"),
                club_id: 1,
                competition_code: competition_code.into(),
                division_tag: division_tag.into(),
                slot_ids: vec![],
            },
            Classement {
                team_id: id,
                competition_code: competition_code.into(),
                division_tag: division_tag.into(),
            },
        )
    }

    fn base_snapshot() -> LoaderSnapshot {
        let mut snapshot = LoaderSnapshot::default();
        snapshot.competition_windows.insert(
            "m".into(),
            CompetitionWindow {
                start_date: chrono::NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
                end_date: chrono::NaiveDate::from_ymd_opt(2026, 5, 22).unwrap(),
            },
        );
        snapshot
            .competition_kinds
            .insert("m".into(), CompetitionKind::Regular);
        snapshot
    }

    #[test]
    fn drops_division_below_three_teams() {
        let mut snapshot = base_snapshot();
        for i in 1..=2 {
            let (t, c) = team(i, "m", "1");
            snapshot.teams.insert(i, t);
            snapshot.classements.push(c);
        }
        let projected = project(&snapshot, &["m".to_string()].into_iter().collect()).unwrap();
        assert!(projected.divisions.is_empty());
    }

    #[test]
    fn fails_fatally_above_eight_teams() {
        let mut snapshot = base_snapshot();
        for i in 1..=9 {
            let (t, c) = team(i, "m", "1");
            snapshot.teams.insert(i, t);
            snapshot.classements.push(c);
        }
        let err = project(&snapshot, &["m".to_string()].into_iter().collect()).unwrap_err();
        assert!(matches!(err, SchedulerError::DivisionTooLarge { .. }));
    }

    #[test]
    fn exclusion_tag_drops_team_with_no_other_standing() {
        let mut snapshot = base_snapshot();
        for i in 1..=3 {
            let (t, c) = team(i, "m", "1");
            snapshot.teams.insert(i, t);
            snapshot.classements.push(c);
        }
        let (t4, _) = team(4, "m", "1");
        snapshot.teams.insert(4, t4);
        snapshot.classements.push(Classement {
            team_id: 4,
            competition_code: "m".into(),
            division_tag: "7d".into(),
        });

        let projected = project(&snapshot, &["m".to_string()].into_iter().collect()).unwrap();
        assert_eq!(projected.divisions.len(), 1);
        assert_eq!(projected.divisions[0].team_ids, vec![1, 2, 3]);
    }

    #[test]
    fn non_exclusion_standing_preferred_over_exclusion() {
        let mut snapshot = base_snapshot();
        for i in 1..=3 {
            let (t, c) = team(i, "m", "1");
            snapshot.teams.insert(i, t);
            snapshot.classements.push(c);
        }
        // Team 1 has both an exclusion tag (inserted first) and its real
        // division tag later; the real one should win.
        let team_one_classement = snapshot.classements[0].clone();
        snapshot.classements[0] = Classement {
            team_id: 1,
            competition_code: "m".into(),
            division_tag: "7o".into(),
        };
        snapshot.classements.push(team_one_classement);

        let projected = project(&snapshot, &["m".to_string()].into_iter().collect()).unwrap();
        assert_eq!(projected.divisions.len(), 1);
        assert!(projected.divisions[0].team_ids.contains(&1));
    }

    #[test]
    fn weekday_parsing_is_none_for_garbage() {
        assert_eq!(parse_weekday("Tuesday"), Some(Weekday::Tue));
        assert_eq!(parse_weekday("garbage"), None);
        assert_eq!(parse_weekday(""), None);
    }

    #[test]
    fn time_parsing_accepts_hh_mm_and_hh_mm_ss() {
        assert_eq!(
            parse_time("18:30"),
            Some(chrono::NaiveTime::from_hms_opt(18, 30, 0).unwrap())
        );
        assert_eq!(
            parse_time("18:30:00"),
            Some(chrono::NaiveTime::from_hms_opt(18, 30, 0).unwrap())
        );
        assert_eq!(parse_time("not a time"), None);
    }

    #[test]
    fn knockout_loader_emits_warning_for_bad_weekday_and_defaults_monday() {
        let mut snapshot = base_snapshot();
        let (t, c) = team(1, "m", "1");
        snapshot.teams.insert(1, t.clone());
        snapshot.classements.push(c);
        snapshot.knockout_registrations.insert(
            1,
            vec![crate::model::KnockoutRegistrationEntry {
                gym_id: 1,
                weekday_raw: "whenever".into(),
                time_raw: None,
            }],
        );

        let mut warnings = Vec::new();
        let slots = KnockoutSlotLoader
            .load_slots(&t, &snapshot, &mut warnings)
            .unwrap();
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].weekday, Weekday::Mon);
        assert_eq!(
            warnings,
            vec![LoaderWarning::UnparseableWeekday {
                team_id: 1,
                raw: "whenever".into()
            }]
        );
    }

    #[test]
    fn knockout_loader_fails_on_unparseable_time() {
        let snapshot = base_snapshot();
        let (t, _) = team(1, "m", "1");
        let mut warnings = Vec::new();
        let entries = vec![crate::model::KnockoutRegistrationEntry {
            gym_id: 1,
            weekday_raw: "mon".into(),
            time_raw: Some("not a time".into()),
        }];
        let mut snapshot = snapshot;
        snapshot.knockout_registrations.insert(1, entries);

        let err = KnockoutSlotLoader
            .load_slots(&t, &snapshot, &mut warnings)
            .unwrap_err();
        assert!(matches!(err, SchedulerError::UnparseableTime { team_id: 1, .. }));
    }
}
