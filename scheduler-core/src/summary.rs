//! The run summary: non-fatal loader anomalies (§7 kind 5) and the
//! partial-schedule count (§7 kind 4), neither of which aborts a run.
//! Plays the role of the teacher's ad hoc `Vec<String>` warning collection
//! threaded through `backend/src/algorithm.rs`, given a proper type here
//! since the spec calls the two kinds out by name.

use crate::error::LoaderWarning;
use crate::model::{Match, MatchStatus, TeamId};

#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub warnings: Vec<LoaderWarning>,
    pub scheduled_count: usize,
    pub unscheduled: Vec<(TeamId, TeamId)>,
}

impl RunSummary {
    pub fn from_run(warnings: Vec<LoaderWarning>, matches: &[Match]) -> Self {
        let scheduled_count = matches
            .iter()
            .filter(|m| m.status == MatchStatus::Scheduled)
            .count();
        let unscheduled = matches
            .iter()
            .filter(|m| m.status == MatchStatus::Unscheduled)
            .map(|m| (m.home, m.away))
            .collect();
        Self {
            warnings,
            scheduled_count,
            unscheduled,
        }
    }

    pub fn is_partial(&self) -> bool {
        !self.unscheduled.is_empty()
    }
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} matches scheduled", self.scheduled_count)?;
        if self.unscheduled.is_empty() {
            writeln!(f, "no unscheduled matches")?;
        } else {
            writeln!(f, "{} matches unscheduled:", self.unscheduled.len())?;
            for (a, b) in &self.unscheduled {
                writeln!(f, "  {a} vs {b}")?;
            }
        }
        for warning in &self.warnings {
            writeln!(f, "warning: {warning:?}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_is_true_only_with_unscheduled_matches() {
        let matches = vec![Match {
            id: 0,
            competition_code: "m".into(),
            division_tag: "1".into(),
            home: 1,
            away: 2,
            date: None,
            slot_id: None,
            gym_id: None,
            status: MatchStatus::Unscheduled,
        }];
        let summary = RunSummary::from_run(vec![], &matches);
        assert!(summary.is_partial());
        assert_eq!(summary.scheduled_count, 0);
    }
}
