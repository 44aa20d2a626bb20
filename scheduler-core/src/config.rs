//! Calendar constants and solver tuning. Follows the teacher's `db::Config`
//! (`Config::new(connection_url)` in `db/src/lib.rs`) as the shape for a
//! small, explicit, constructible configuration type rather than a global.

use std::collections::HashSet;
use std::time::Duration;

use chrono::{NaiveDate, Weekday};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

lazy_static! {
    /// Default allowed weekdays: Monday through Friday.
    static ref DEFAULT_ALLOWED_WEEKDAYS: HashSet<Weekday> = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
    ]
    .into_iter()
    .collect();
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    pub allowed_weekdays: HashSet<Weekday>,
    pub holidays: HashSet<NaiveDate>,
    pub vacations: Vec<(NaiveDate, NaiveDate)>,
    /// Default fraction of the smaller team's effective roster that counts
    /// as "shared" for M8 (§3's shared-roster pair rule).
    pub shared_roster_ratio: f64,
    #[serde(with = "duration_secs")]
    pub full_season_time_cap: Duration,
    #[serde(with = "duration_secs")]
    pub incremental_time_cap: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            allowed_weekdays: DEFAULT_ALLOWED_WEEKDAYS.clone(),
            holidays: HashSet::new(),
            vacations: Vec::new(),
            shared_roster_ratio: 0.5,
            full_season_time_cap: Duration::from_secs(300),
            incremental_time_cap: Duration::from_secs(60),
        }
    }
}

impl SchedulerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_holidays(mut self, holidays: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.holidays = holidays.into_iter().collect();
        self
    }

    pub fn with_vacations(mut self, vacations: impl IntoIterator<Item = (NaiveDate, NaiveDate)>) -> Self {
        self.vacations = vacations.into_iter().collect();
        self
    }

    pub fn with_allowed_weekdays(mut self, weekdays: impl IntoIterator<Item = Weekday>) -> Self {
        self.allowed_weekdays = weekdays.into_iter().collect();
        self
    }

    pub fn time_cap(&self, incremental: bool) -> Duration {
        if incremental {
            self.incremental_time_cap
        } else {
            self.full_season_time_cap
        }
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        d.as_secs().serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_secs(u64::deserialize(d)?))
    }
}
