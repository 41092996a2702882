use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

/// How far in the future an upgrade runs when no date or time is given.
pub const DEFAULT_SCHEDULE_DELAY_MINUTES: i64 = 10;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Date format '{0}' invalid, expected yyyy-mm-dd")]
    InvalidDate(String),
    #[error("Time format '{0}' invalid, expected HH:mm")]
    InvalidTime(String),
    #[error("Time format invalid: '{0}' is not a valid 'yyyy-mm-dd HH:mm' date and time")]
    InvalidDateTime(String),
}

/// The date and time components of an upgrade schedule, as the user would type them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub date: String,
    pub time: String,
}

impl Schedule {
    /// Splits the default next run into its date and time components.
    pub fn default_at(now: DateTime<Utc>) -> Self {
        let next_run = now + Duration::minutes(DEFAULT_SCHEDULE_DELAY_MINUTES);

        Self {
            date: next_run.format(DATE_FORMAT).to_string(),
            time: next_run.format(TIME_FORMAT).to_string(),
        }
    }

    /// Starts from the default schedule and overrides whichever components were given.
    pub fn with_overrides(date: Option<&str>, time: Option<&str>, now: DateTime<Utc>) -> Self {
        let default = Self::default_at(now);

        Self {
            date: date.map(str::to_owned).unwrap_or(default.date),
            time: time.map(str::to_owned).unwrap_or(default.time),
        }
    }

    /// Falls back to the default schedule when the components don't form a
    /// valid date and time, so a prompt never starts from a broken value.
    pub fn reconciled(self, now: DateTime<Utc>) -> Self {
        match self.next_run() {
            Ok(next_run) => Self {
                date: next_run.format(DATE_FORMAT).to_string(),
                time: next_run.format(TIME_FORMAT).to_string(),
            },
            Err(_) => Self::default_at(now),
        }
    }

    #[tracing::instrument(name = "Schedule::next_run", skip_all, fields(
        date = %self.date,
        time = %self.time
    ))]
    pub fn next_run(&self) -> Result<DateTime<Utc>, ScheduleError> {
        let combined = format!("{} {}", self.date, self.time);

        NaiveDateTime::parse_from_str(&combined, &format!("{DATE_FORMAT} {TIME_FORMAT}"))
            .map(|next_run| next_run.and_utc())
            .map_err(|_| ScheduleError::InvalidDateTime(combined))
    }
}

pub fn parse_date(date: &str) -> Result<NaiveDate, ScheduleError> {
    NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map_err(|_| ScheduleError::InvalidDate(date.to_owned()))
}

pub fn parse_time(time: &str) -> Result<NaiveTime, ScheduleError> {
    NaiveTime::parse_from_str(time, TIME_FORMAT)
        .map_err(|_| ScheduleError::InvalidTime(time.to_owned()))
}
