//! End-to-end scenarios exercising the whole C1-through-C5 pipeline via
//! [`scheduler_core::run`], grounded in concrete seeded inputs rather than
//! synthetic fuzzing.

use std::collections::HashSet;
use std::time::Duration;

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use scheduler_core::{
    Classement, CompetitionKind, CompetitionWindow, Gymnasium, LoaderSnapshot, Match, MatchStatus,
    Mode, SchedulerConfig, Team, TimeSlot,
};

fn gym(id: i32, court_count: u8) -> Gymnasium {
    Gymnasium {
        id,
        name: format!("Gym {id}"),
        address: "1 Main St".into(),
        court_count,
        location: None,
    }
}

fn team_with_slot(
    snapshot: &mut LoaderSnapshot,
    id: i32,
    competition_code: &str,
    gym_id: i32,
    weekday: Weekday,
) {
    snapshot.time_slots.insert(
        id,
        TimeSlot {
            id,
            team_id: id,
            gym_id,
            weekday,
            start_time: NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
        },
    );
    snapshot.teams.insert(
        id,
        Team {
            id,
            name: format!("Team {id}"),
            club_id: 1,
            competition_code: competition_code.into(),
            division_tag: "1".into(),
            slot_ids: vec![id],
        },
    );
    snapshot.classements.push(Classement {
        team_id: id,
        competition_code: competition_code.into(),
        division_tag: "1".into(),
    });
}

fn window(start: NaiveDate, end: NaiveDate) -> CompetitionWindow {
    CompetitionWindow {
        start_date: start,
        end_date: end,
    }
}

fn assert_universal_properties(matches: &[Match], config: &SchedulerConfig) {
    let mut by_team_date: HashSet<(i32, NaiveDate)> = HashSet::new();
    let mut by_team_week: HashSet<(i32, i32, u32)> = HashSet::new();

    for m in matches {
        if m.status != MatchStatus::Scheduled {
            continue;
        }
        let date = m.date.expect("scheduled match carries a date");

        // P2
        assert_ne!(m.home, m.away);

        // P3
        assert!(by_team_date.insert((m.home, date)));
        assert!(by_team_date.insert((m.away, date)));

        // P4
        let iso = date.iso_week();
        assert!(by_team_week.insert((m.home, iso.year(), iso.week())));
        assert!(by_team_week.insert((m.away, iso.year(), iso.week())));

        // P9
        assert!(!config.holidays.contains(&date));
        assert!(config.allowed_weekdays.contains(&date.weekday()));
    }
}

#[test]
fn s2_holiday_skip_places_three_matches_on_distinct_tuesdays() {
    let mut snapshot = LoaderSnapshot::default();
    snapshot
        .competition_windows
        .insert("m".into(), window(
            NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 27).unwrap(),
        ));
    snapshot.competition_kinds.insert("m".into(), CompetitionKind::Regular);
    snapshot.gyms.insert(1, gym(1, 3));

    for id in 1..=3 {
        team_with_slot(&mut snapshot, id, "m", 1, Weekday::Tue);
    }

    // Tuesdays in window: 03-03, 03-10, 03-17, 03-24. Remove one by holiday,
    // leaving exactly the 3 needed for the 3 match identities of this trio.
    let config = SchedulerConfig::default()
        .with_holidays([NaiveDate::from_ymd_opt(2026, 3, 17).unwrap()]);

    let (schedule, _summary) = scheduler_core::run(
        &snapshot,
        &["m".to_string()].into_iter().collect(),
        &config,
        Mode::FullSeason,
    )
    .unwrap();

    assert_eq!(schedule.matches.len(), 3);
    let dates: HashSet<NaiveDate> = schedule
        .matches
        .iter()
        .map(|m| m.date.expect("all 3 must be scheduled in this layout"))
        .collect();
    assert_eq!(dates.len(), 3);
    assert!(!dates.contains(&NaiveDate::from_ymd_opt(2026, 3, 17).unwrap()));

    assert_universal_properties(&schedule.matches, &config);
}

#[test]
fn s3_venue_contention_spreads_six_matches_across_distinct_wednesdays() {
    let mut snapshot = LoaderSnapshot::default();
    snapshot
        .competition_windows
        .insert("m".into(), window(
            NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            NaiveDate::from_ymd_opt(2026, 4, 17).unwrap(),
        ));
    snapshot.competition_kinds.insert("m".into(), CompetitionKind::Regular);
    snapshot.gyms.insert(1, gym(1, 1));

    for id in 1..=4 {
        team_with_slot(&mut snapshot, id, "m", 1, Weekday::Wed);
    }

    let mut config = SchedulerConfig::default();
    config.full_season_time_cap = Duration::from_secs(30);

    let (schedule, _summary) = scheduler_core::run(
        &snapshot,
        &["m".to_string()].into_iter().collect(),
        &config,
        Mode::FullSeason,
    )
    .unwrap();

    assert_eq!(schedule.matches.len(), 6);

    // P5: one court, so at most one scheduled match per (gym, date) — which
    // for a single gym collapses to one match per date.
    let mut dates = Vec::new();
    for m in &schedule.matches {
        if m.status == MatchStatus::Scheduled {
            dates.push(m.date.unwrap());
        }
    }
    let distinct: HashSet<NaiveDate> = dates.iter().copied().collect();
    assert_eq!(distinct.len(), dates.len());

    assert_universal_properties(&schedule.matches, &config);
}

#[test]
fn s4_history_driven_host_gives_the_match_to_the_owed_receiver() {
    let mut snapshot = LoaderSnapshot::default();
    snapshot
        .competition_windows
        .insert("m".into(), window(
            NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            NaiveDate::from_ymd_opt(2026, 5, 22).unwrap(),
        ));
    snapshot.competition_kinds.insert("m".into(), CompetitionKind::Regular);
    snapshot.gyms.insert(1, gym(1, 2));

    // A 3rd team is required so the division actually forms; it carries no
    // bearing on the A-B history constraint under test.
    team_with_slot(&mut snapshot, 1, "m", 1, Weekday::Tue);
    team_with_slot(&mut snapshot, 2, "m", 1, Weekday::Tue);
    team_with_slot(&mut snapshot, 3, "m", 1, Weekday::Tue);

    // A hosted B 3 times, B hosted A 0 times: B is the owed receiver.
    snapshot.history.insert((1, 2), (3, 0));

    let (schedule, _summary) = scheduler_core::run(
        &snapshot,
        &["m".to_string()].into_iter().collect(),
        &SchedulerConfig::default(),
        Mode::FullSeason,
    )
    .unwrap();

    let ab_match = schedule
        .matches
        .iter()
        .find(|m| (m.home == 1 && m.away == 2) || (m.home == 2 && m.away == 1))
        .expect("A-B match identity must be present");
    assert_eq!(ab_match.status, MatchStatus::Scheduled);
    assert_eq!(ab_match.home, 2, "B is the owed receiver and must host");
}

#[test]
fn s5_shared_roster_pair_never_plays_two_matches_on_the_same_friday() {
    let mut snapshot = LoaderSnapshot::default();
    snapshot
        .competition_windows
        .insert("m".into(), window(
            NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            NaiveDate::from_ymd_opt(2026, 5, 22).unwrap(),
        ));
    snapshot.competition_kinds.insert("m".into(), CompetitionKind::Regular);
    snapshot.gyms.insert(1, gym(1, 4));

    // X=1, Y=2 share enough roster; Z=3, W=4 fill out the division.
    for id in 1..=4 {
        team_with_slot(&mut snapshot, id, "m", 1, Weekday::Fri);
    }
    snapshot.shared_roster.insert((1, 2), 0.625);

    let mut config = SchedulerConfig::default();
    config.full_season_time_cap = Duration::from_secs(30);

    let (schedule, _summary) = scheduler_core::run(
        &snapshot,
        &["m".to_string()].into_iter().collect(),
        &config,
        Mode::FullSeason,
    )
    .unwrap();

    // P7: no scheduled date on which X and Y both appear (together or apart).
    let mut dates_touching_pair: Vec<NaiveDate> = Vec::new();
    for m in &schedule.matches {
        if m.status != MatchStatus::Scheduled {
            continue;
        }
        if m.home == 1 || m.away == 1 || m.home == 2 || m.away == 2 {
            dates_touching_pair.push(m.date.unwrap());
        }
    }
    let distinct: HashSet<NaiveDate> = dates_touching_pair.iter().copied().collect();
    assert_eq!(distinct.len(), dates_touching_pair.len());

    assert_universal_properties(&schedule.matches, &config);
}

#[test]
fn s6_incremental_new_team_never_moves_prior_matches() {
    let mut snapshot = LoaderSnapshot::default();
    snapshot
        .competition_windows
        .insert("f_5".into(), window(
            NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            NaiveDate::from_ymd_opt(2026, 5, 22).unwrap(),
        ));
    snapshot.competition_kinds.insert("f_5".into(), CompetitionKind::Regular);
    snapshot.gyms.insert(1, gym(1, 8));

    for id in 1..=7 {
        team_with_slot(&mut snapshot, id, "f_5", 1, Weekday::Tue);
    }
    // Every prior pair already has a confirmed anchor on a distinct Tuesday
    // so the solver's job for this run is purely to place the newcomer.
    let mut date = NaiveDate::from_ymd_opt(2026, 3, 3).unwrap();
    for i in 1..=7 {
        for j in (i + 1)..=7 {
            snapshot.anchors.push(scheduler_core::Anchor {
                home: i,
                away: j,
                date,
                gym_id: 1,
                status: scheduler_core::AnchorStatus::Confirmed,
            });
            date += chrono::Duration::days(1);
        }
    }

    team_with_slot(&mut snapshot, 8, "f_5", 1, Weekday::Tue);

    let mut config = SchedulerConfig::default();
    config.incremental_time_cap = Duration::from_secs(30);

    let (schedule, _summary) = scheduler_core::run(
        &snapshot,
        &["f_5".to_string()].into_iter().collect(),
        &config,
        Mode::Incremental { new_team: 8 },
    )
    .unwrap();

    // P1: every pair of the 8-team division gets an identity, anchored or not.
    assert_eq!(schedule.matches.len(), 28);

    // P10: an already-anchored pair has no candidates at all (C3 filters them
    // out via `matched_pairs`), so the solver cannot possibly schedule one —
    // no output match may involve two of the 7 previously-planned teams.
    let legacy_pairs_scheduled = schedule
        .matches
        .iter()
        .filter(|m| m.status == MatchStatus::Scheduled && m.home <= 7 && m.away <= 7)
        .count();
    assert_eq!(legacy_pairs_scheduled, 0);

    let newcomer_matches = schedule
        .matches
        .iter()
        .filter(|m| m.home == 8 || m.away == 8)
        .count();
    assert_eq!(newcomer_matches, 7);
}
