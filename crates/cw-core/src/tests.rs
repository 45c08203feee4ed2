//! Unit tests for cw-core primitives.

#[cfg(test)]
mod ids {
    use crate::{CallId, RecordNo};

    #[test]
    fn index_roundtrip() {
        let id = CallId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(CallId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(CallId(0) < CallId(1));
        assert!(RecordNo(100) > RecordNo(99));
    }

    #[test]
    fn display() {
        assert_eq!(CallId(7).to_string(), "CallId(7)");
        assert_eq!(RecordNo(3).to_string(), "RecordNo(3)");
    }
}

#[cfg(test)]
mod time {
    use chrono::{NaiveDate, NaiveTime, TimeDelta};

    use crate::time::{minutes_f64, seconds_of_day, whole_minutes};
    use crate::{DailyHours, SimClock, parse_time_of_day};

    fn instant(h: u32, m: u32) -> chrono::DateTime<chrono::Utc> {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
            .and_utc()
    }

    #[test]
    fn advance_moves_forward() {
        let mut clock = SimClock::new(instant(21, 30));
        clock.advance(TimeDelta::minutes(3));
        assert_eq!(clock.now, instant(21, 33));
        assert_eq!(clock.elapsed(), TimeDelta::minutes(3));
    }

    #[test]
    fn advance_ignores_negative() {
        let mut clock = SimClock::new(instant(12, 0));
        clock.advance(TimeDelta::minutes(-5));
        assert_eq!(clock.now, instant(12, 0));
    }

    #[test]
    fn jump_forward_reports_wait() {
        let mut clock = SimClock::new(instant(8, 0));
        let waited = clock.jump_to(instant(9, 30));
        assert_eq!(waited, TimeDelta::minutes(90));
        assert_eq!(clock.now, instant(9, 30));
    }

    #[test]
    fn jump_backwards_is_noop() {
        let mut clock = SimClock::new(instant(9, 0));
        let waited = clock.jump_to(instant(8, 0));
        assert_eq!(waited, TimeDelta::zero());
        assert_eq!(clock.now, instant(9, 0));
    }

    #[test]
    fn clock_dhm() {
        let mut clock = SimClock::new(instant(0, 0));
        clock.advance(TimeDelta::hours(25) + TimeDelta::minutes(7));
        assert_eq!(clock.elapsed_dhm(), (1, 1, 7));
    }

    #[test]
    fn display_includes_elapsed() {
        let mut clock = SimClock::new(instant(21, 30));
        clock.advance(TimeDelta::minutes(90));
        assert_eq!(clock.to_string(), "2024-01-15 23:00:00 UTC (+0d 01:30)");
    }

    #[test]
    fn parse_hms() {
        assert_eq!(
            parse_time_of_day("21:30:00").unwrap(),
            NaiveTime::from_hms_opt(21, 30, 0).unwrap()
        );
        assert_eq!(
            parse_time_of_day(" 07:05:09 ").unwrap(),
            NaiveTime::from_hms_opt(7, 5, 9).unwrap()
        );
        assert!(parse_time_of_day("21:30").is_err());
        assert!(parse_time_of_day("25:00:00").is_err());
    }

    #[test]
    fn minute_helpers() {
        assert_eq!(minutes_f64(TimeDelta::seconds(90)), 1.5);
        assert_eq!(whole_minutes(TimeDelta::seconds(119)), 1);
        assert_eq!(whole_minutes(TimeDelta::seconds(-60)), 0);
        assert_eq!(seconds_of_day(instant(1, 1)), 3_660);
    }

    #[test]
    fn default_hours_are_nine_to_eight() {
        let hours = DailyHours::default();
        assert_eq!(hours.open, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(hours.close, NaiveTime::from_hms_opt(20, 0, 0).unwrap());
    }

    #[test]
    fn hours_reject_inverted() {
        let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        let eight = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
        assert!(DailyHours::new(nine, eight).is_err());
        assert!(DailyHours::new(nine, nine).is_err());
        assert!(DailyHours::new(eight, nine).is_ok());
    }
}

#[cfg(test)]
mod config {
    use chrono::{NaiveDate, TimeDelta};

    use crate::{OverlapPolicy, RolloverMode, SimConfig};

    #[test]
    fn defaults_match_reference_run() {
        let cfg = SimConfig::default();
        assert_eq!(cfg.call_duration(), TimeDelta::minutes(3));
        assert_eq!(cfg.rollover, RolloverMode::SingleShot);
        assert_eq!(cfg.overlap, OverlapPolicy::Permissive);
        assert_eq!(cfg.default_region, "US");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn start_instant_combines_date_and_time() {
        let cfg = SimConfig::default();
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(21, 30, 0)
            .unwrap()
            .and_utc();
        assert_eq!(cfg.start_instant(), expected);
    }

    #[test]
    fn zero_call_duration_rejected() {
        let cfg = SimConfig { call_duration_mins: 0, ..SimConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn zero_idle_passes_rejected() {
        let cfg = SimConfig { max_idle_passes: 0, ..SimConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn blank_region_rejected() {
        let cfg = SimConfig { default_region: "  ".into(), ..SimConfig::default() };
        assert!(cfg.validate().is_err());
    }
}
