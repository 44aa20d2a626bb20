//! Entities of §3. Built once by [`crate::projection`] and read-only for the
//! rest of a run — the arena + identifier-lookup approach of the design
//! notes, rather than back-references.

use std::collections::{HashMap, HashSet};

use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

pub type ClubId = i32;
pub type GymId = i32;
pub type TeamId = i32;
pub type TimeSlotId = i32;
pub type MatchId = i32;

/// Division tags that never form a generated division: prior-half-season
/// playoffs.
pub const EXCLUSION_TAGS: [&str; 2] = ["7d", "7o"];

pub const MAX_DIVISION_SIZE: usize = 8;
pub const MIN_DIVISION_SIZE: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Club {
    pub id: ClubId,
    pub name: String,
    pub affiliation_number: String,
    pub contact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gymnasium {
    pub id: GymId,
    pub name: String,
    pub address: String,
    /// Hard upper bound on concurrent matches at this venue on a given date.
    pub court_count: u8,
    pub location: Option<(f64, f64)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: TimeSlotId,
    pub team_id: TeamId,
    pub gym_id: GymId,
    pub weekday: Weekday,
    pub start_time: NaiveTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub club_id: ClubId,
    pub competition_code: String,
    pub division_tag: String,
    pub slot_ids: Vec<TimeSlotId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classement {
    pub team_id: TeamId,
    pub competition_code: String,
    pub division_tag: String,
}

impl Classement {
    pub fn is_exclusion(&self) -> bool {
        EXCLUSION_TAGS.contains(&self.division_tag.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Division {
    pub competition_code: String,
    pub division_tag: String,
    pub team_ids: Vec<TeamId>,
}

impl Division {
    pub fn key(&self) -> (String, String) {
        (self.competition_code.clone(), self.division_tag.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitionWindow {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// `CompetitionKind` selects which table the team's recurring slots are read
/// from; the same strategy shape throughout `load_slots`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompetitionKind {
    Regular,
    Cup,
    Knockout,
}

/// A team's entry in the knockout-hybrid registration form: up to two
/// `(gym, weekday, time)` pairs, with a missing time defaulting to 20:00. The
/// weekday and time are both raw, unparsed form fields: the weekday falls
/// back to Monday with a warning if unparseable, the time aborts the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnockoutRegistrationEntry {
    pub gym_id: GymId,
    pub weekday_raw: String,
    pub time_raw: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MatchStatus {
    Scheduled,
    Unscheduled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub competition_code: String,
    pub division_tag: String,
    pub home: TeamId,
    pub away: TeamId,
    pub date: Option<NaiveDate>,
    pub slot_id: Option<TimeSlotId>,
    pub gym_id: Option<GymId>,
    pub status: MatchStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnchorStatus {
    Confirmed,
    Archived,
}

/// A pre-existing match: a hard constraint on any new generation, per §3 and
/// M9. Never re-planned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchor {
    pub home: TeamId,
    pub away: TeamId,
    pub date: NaiveDate,
    pub gym_id: GymId,
    pub status: AnchorStatus,
}

/// Sorts a team pair into `(min, max)` so pair-keyed maps have one entry per
/// unordered pair regardless of call-site order.
pub fn sorted_pair(a: TeamId, b: TeamId) -> (TeamId, TeamId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// The narrow contract a loader (SQL-backed, or hand-built in tests)
/// populates before calling the scheduler — the role the teacher's
/// `TeamLike`/`FieldLike`/`PlayableTeamCollection`/`CoachConflictLike` traits
/// play, generalized to one snapshot since C1 does eager one-shot
/// projection rather than lazy querying.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoaderSnapshot {
    pub clubs: HashMap<ClubId, Club>,
    pub gyms: HashMap<GymId, Gymnasium>,
    pub teams: HashMap<TeamId, Team>,
    pub time_slots: HashMap<TimeSlotId, TimeSlot>,
    pub classements: Vec<Classement>,
    pub competition_windows: HashMap<String, CompetitionWindow>,
    pub competition_kinds: HashMap<String, CompetitionKind>,
    /// `receptions[min_id], receptions[max_id]` for every pair that has met.
    pub history: HashMap<(TeamId, TeamId), (u32, u32)>,
    /// Overlap ratio for every pair sharing enough of their roster, already
    /// filtered to teams meeting the completeness rule.
    pub shared_roster: HashMap<(TeamId, TeamId), f64>,
    pub cup_registered_teams: HashSet<TeamId>,
    pub knockout_registrations: HashMap<TeamId, Vec<KnockoutRegistrationEntry>>,
    pub gym_blacklist: HashSet<(GymId, NaiveDate)>,
    pub anchors: Vec<Anchor>,
    pub roster_meets_completeness: HashMap<TeamId, bool>,
}

impl LoaderSnapshot {
    /// `gym_available(gym_id, date) -> bool`, the external interface of §6,
    /// backed here by a blacklist set rather than a live callback.
    pub fn gym_available(&self, gym_id: GymId, date: NaiveDate) -> bool {
        !self.gym_blacklist.contains(&(gym_id, date))
    }
}
