use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use scheduler_core::{
    Classement, CompetitionKind, CompetitionWindow, Gymnasium, LoaderSnapshot, Mode,
    SchedulerConfig, Team, TimeSlot,
};

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Generate (or regenerate, incrementally) a season calendar.
    Generate {
        /// Competition codes to schedule. Defaults to every competition in the snapshot.
        #[arg(long = "competition")]
        competitions: Vec<String>,
        /// Regenerate incrementally for a newly-joined team instead of a full season.
        #[arg(long)]
        incremental: Option<i32>,
        /// Database connection string. Falls back to `DATABASE_URL`.
        #[arg(long = "db")]
        db_url: Option<String>,
        /// Write the deterministic SQL export to this path instead of the database.
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Run the scheduler against a small built-in snapshot, no database required.
    Demo,
}

fn demo_snapshot() -> (LoaderSnapshot, HashSet<String>) {
    let mut snapshot = LoaderSnapshot::default();

    snapshot.gyms.insert(
        1,
        Gymnasium {
            id: 1,
            name: "Salle Omnisports".into(),
            address: "1 Rue du Stade".into(),
            court_count: 2,
            location: None,
        },
    );

    for (team_id, name) in [(1, "Volley Club A"), (2, "Volley Club B"), (3, "Volley Club C")] {
        snapshot.teams.insert(
            team_id,
            Team {
                id: team_id,
                name: name.into(),
                club_id: 1,
                competition_code: "senior-m".into(),
                division_tag: "1".into(),
                slot_ids: vec![team_id],
            },
        );
        snapshot.time_slots.insert(
            team_id,
            TimeSlot {
                id: team_id,
                team_id,
                gym_id: 1,
                weekday: chrono::Weekday::Tue,
                start_time: chrono::NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
            },
        );
        snapshot.classements.push(Classement {
            team_id,
            competition_code: "senior-m".into(),
            division_tag: "1".into(),
        });
    }

    snapshot.competition_kinds.insert("senior-m".into(), CompetitionKind::Regular);
    snapshot.competition_windows.insert(
        "senior-m".into(),
        CompetitionWindow {
            start_date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 5, 22).unwrap(),
        },
    );

    (snapshot, ["senior-m".to_string()].into_iter().collect())
}

async fn run_generate(
    competitions: Vec<String>,
    incremental: Option<i32>,
    db_url: Option<String>,
    export: Option<PathBuf>,
) -> Result<()> {
    let db_url = match db_url {
        Some(explicit) => explicit,
        None => std::env::var("DATABASE_URL").context(
            "`DATABASE_URL` was not set, and no database path was supplied via `--db`",
        )?,
    };

    let config = scheduler_db::Config::new(db_url);
    let client = scheduler_db::Client::new(&config).await?;
    client.up().await?;

    // The relational loader is out of scope here (§1 non-goals); a real
    // deployment wires a `LoaderSnapshot`-producing loader in its place.
    let (snapshot, available_competitions) = demo_snapshot();
    let competitions: HashSet<String> = if competitions.is_empty() {
        available_competitions
    } else {
        competitions.into_iter().collect()
    };

    let mode = match incremental {
        Some(new_team) => Mode::Incremental { new_team },
        None => Mode::FullSeason,
    };

    let (schedule, summary) = scheduler_core::run(&snapshot, &competitions, &SchedulerConfig::default(), mode)?;

    log::info!("{summary}");

    if let Some(path) = export {
        let codes: Vec<String> = competitions.into_iter().collect();
        let sql = scheduler_db::export_sql(&codes, &schedule.matches);
        std::fs::write(&path, sql).with_context(|| format!("writing SQL export to {path:?}"))?;
        log::info!("wrote SQL export to {path:?}");
    } else {
        let codes: Vec<String> = competitions.into_iter().collect();
        client.replace_draft_matches(&codes, &schedule.matches).await?;
        log::info!("wrote {} matches to the database", schedule.matches.len());
    }

    Ok(())
}

fn run_demo() -> Result<()> {
    let (snapshot, competitions) = demo_snapshot();
    let (schedule, summary) =
        scheduler_core::run(&snapshot, &competitions, &SchedulerConfig::default(), Mode::FullSeason)?;

    println!("{summary}");
    for m in &schedule.matches {
        println!("{m:?}");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let _ = dotenv::dotenv();

    let args = Args::parse();

    match args.cmd {
        Commands::Generate {
            competitions,
            incremental,
            db_url,
            export,
        } => run_generate(competitions, incremental, db_url, export).await?,
        Commands::Demo => run_demo()?,
    }

    Ok(())
}
