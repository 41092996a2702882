use anyhow::Result;
use chrono::{DateTime, Duration, TimeZone, Utc};

#[cfg(test)]
mod schedule_tests {
    use crate::schedule::{parse_date, parse_time, Schedule, ScheduleError};

    use super::*;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 11, 2, 14, 53, 27).unwrap()
    }

    #[test]
    fn default_runs_ten_minutes_from_now() -> Result<()> {
        let schedule = Schedule::default_at(fixed_now());

        assert_eq!("2020-11-02", schedule.date);
        assert_eq!("15:03", schedule.time);
        assert_eq!(
            Utc.with_ymd_and_hms(2020, 11, 2, 15, 3, 0).unwrap(),
            schedule.next_run()?
        );

        Ok(())
    }

    #[test]
    fn default_next_run_is_within_ten_minutes_of_now() -> Result<()> {
        let now = Utc::now();
        let next_run = Schedule::with_overrides(None, None, now).next_run()?;

        assert!(next_run >= now + Duration::minutes(9));
        assert!(next_run <= now + Duration::minutes(11));

        Ok(())
    }

    #[test]
    fn default_rolls_over_to_the_next_day() {
        let now = Utc.with_ymd_and_hms(2020, 12, 31, 23, 55, 0).unwrap();

        assert_eq!(
            Schedule {
                date: "2021-01-01".to_owned(),
                time: "00:05".to_owned(),
            },
            Schedule::default_at(now)
        );
    }

    #[test]
    fn overrides_replace_only_the_given_component() {
        let schedule = Schedule::with_overrides(Some("2021-03-04"), None, fixed_now());
        assert_eq!("2021-03-04", schedule.date);
        assert_eq!("15:03", schedule.time);

        let schedule = Schedule::with_overrides(None, Some("08:30"), fixed_now());
        assert_eq!("2020-11-02", schedule.date);
        assert_eq!("08:30", schedule.time);
    }

    #[test]
    fn malformed_components_fail_to_produce_a_next_run() {
        let schedule = Schedule::with_overrides(Some("04/03/2021"), None, fixed_now());

        assert_eq!(
            Err(ScheduleError::InvalidDateTime("04/03/2021 15:03".to_owned())),
            schedule.next_run()
        );
    }

    #[test]
    fn reconciling_keeps_valid_components() {
        let schedule =
            Schedule::with_overrides(Some("2021-03-04"), Some("8:30"), fixed_now()).reconciled(fixed_now());

        assert_eq!(
            Schedule {
                date: "2021-03-04".to_owned(),
                time: "08:30".to_owned(),
            },
            schedule
        );
    }

    #[test]
    fn reconciling_falls_back_to_the_default_when_invalid() {
        let schedule =
            Schedule::with_overrides(Some("tomorrow"), Some("08:30"), fixed_now()).reconciled(fixed_now());

        assert_eq!(Schedule::default_at(fixed_now()), schedule);
    }

    #[test]
    fn dates_and_times_are_strictly_formatted() {
        assert!(parse_date("2021-03-04").is_ok());
        assert_eq!(
            Err(ScheduleError::InvalidDate("2021-13-04".to_owned())),
            parse_date("2021-13-04")
        );
        assert!(parse_date("03-04-2021").is_err());
        assert!(parse_date("").is_err());

        assert!(parse_time("23:59").is_ok());
        assert_eq!(
            Err(ScheduleError::InvalidTime("24:00".to_owned())),
            parse_time("24:00")
        );
        assert!(parse_time("12:30:00").is_err());
        assert!(parse_time("noon").is_err());
    }
}
