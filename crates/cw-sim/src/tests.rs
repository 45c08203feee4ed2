//! Integration tests for cw-sim.

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};

use cw_core::{CallId, RolloverMode, SimClock, SimConfig};
use cw_schedule::{CallWindow, CatchUp, SingleShot};

use crate::{NoopObserver, SimBuilder, SimError, SimObserver, SimReport, simulate};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// UTC instant on January `day`, 2024.
fn utc(day: u32, h: u32, m: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(2024, 1, day)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
        .and_utc()
}

fn window(id: u32, start: DateTime<Utc>, end: DateTime<Utc>) -> CallWindow {
    CallWindow::new(CallId(id), format!("+1000000000{id}"), start, end)
}

/// New York on 2024-01-15: 09:00–20:00 EST.
fn new_york(id: u32) -> CallWindow {
    window(id, utc(15, 14, 0), utc(16, 1, 0))
}

/// London on 2024-01-15: 09:00–20:00 GMT.
fn london(id: u32) -> CallWindow {
    window(id, utc(15, 9, 0), utc(15, 20, 0))
}

/// Default config: reference date 2024-01-15, start 21:30 UTC, 3-minute calls.
fn config() -> SimConfig {
    SimConfig::default()
}

/// Records every hook invocation.
#[derive(Default)]
struct Recorder {
    started:  usize,
    calls:    Vec<(CallId, DateTime<Utc>)>,
    requeues: Vec<(CallId, DateTime<Utc>, TimeDelta)>,
    jumps:    Vec<(DateTime<Utc>, DateTime<Utc>)>,
    /// Every instant reported to the observer, in callback order.
    instants: Vec<DateTime<Utc>>,
    ended:    Option<SimReport>,
}

impl SimObserver for Recorder {
    fn on_sim_start(&mut self, clock: &SimClock, _queued: usize) {
        self.started += 1;
        self.instants.push(clock.now);
    }

    fn on_call(&mut self, window: &CallWindow, at: DateTime<Utc>) {
        self.calls.push((window.id, at));
        self.instants.push(at);
    }

    fn on_requeue(&mut self, window: &CallWindow, at: DateTime<Utc>, waited: TimeDelta) {
        self.requeues.push((window.id, at, waited));
        self.instants.push(at);
        self.instants.push(at + waited);
    }

    fn on_idle_jump(&mut self, from: DateTime<Utc>, to: DateTime<Utc>) {
        self.jumps.push((from, to));
        self.instants.push(from);
        self.instants.push(to);
    }

    fn on_sim_end(&mut self, report: &SimReport) {
        self.ended = Some(report.clone());
        self.instants.push(report.finished_at);
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_with_defaults() {
        let sim = SimBuilder::new(config(), SingleShot).build().unwrap();
        assert!(sim.is_done());
        assert_eq!(sim.clock.now, utc(15, 21, 30));
    }

    #[test]
    fn empty_queue_reports_zeros() {
        let report = simulate(vec![], &config()).unwrap();
        assert_eq!(report.calls_made, 0);
        assert_eq!(report.calling_minutes, 0);
        assert_eq!(report.waiting_secs, 0);
        assert_eq!(report.started_at, report.finished_at);
        assert_eq!(report.steps, 0);
    }

    #[test]
    fn zero_call_duration_errors() {
        let config = SimConfig { call_duration_mins: 0, ..config() };
        let result = SimBuilder::new(config, SingleShot).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn zero_idle_passes_errors() {
        let config = SimConfig { max_idle_passes: 0, ..config() };
        assert!(SimBuilder::new(config, CatchUp).build().is_err());
    }

    #[test]
    fn duplicate_call_id_errors() {
        let result = SimBuilder::new(config(), SingleShot)
            .windows(vec![london(0), new_york(0)])
            .build();
        assert!(matches!(result, Err(SimError::DuplicateCall(CallId(0)))));
    }

    #[test]
    fn dropped_count_is_reported() {
        let report = SimBuilder::new(config(), SingleShot)
            .windows(vec![london(0)])
            .dropped(4)
            .build()
            .unwrap()
            .run(&mut NoopObserver)
            .unwrap();
        assert_eq!(report.dropped, 4);
        assert_eq!(report.calls_made, 1);
    }
}

// ── Step loop ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod step_loop {
    use super::*;
    use crate::StepOutcome;

    #[test]
    fn new_york_and_london_from_evening() {
        let report = simulate(vec![new_york(0), london(1)], &config()).unwrap();
        assert_eq!(report.calls_made, 2);
        assert_eq!(report.calling_minutes, 6);
        assert_eq!(report.waiting_secs, 687 * 60);
        assert_eq!(report.waiting_minutes(), 687.0);
        assert_eq!(report.total_minutes(), 693);
        assert_eq!(report.started_at, utc(15, 21, 30));
        assert_eq!(report.finished_at, utc(16, 9, 3));
        assert_eq!(report.steps, 3);
    }

    #[test]
    fn step_by_step() {
        let mut sim = SimBuilder::new(config(), SingleShot)
            .windows(vec![new_york(0), london(1)])
            .build()
            .unwrap();
        let mut obs = NoopObserver;

        assert_eq!(sim.step(&mut obs).unwrap(), Some(StepOutcome::Called(CallId(0))));
        assert_eq!(sim.clock.now, utc(15, 21, 33));

        assert_eq!(sim.step(&mut obs).unwrap(), Some(StepOutcome::Requeued(CallId(1))));
        assert_eq!(sim.clock.now, utc(16, 9, 0));
        assert_eq!(sim.waiting(), TimeDelta::minutes(687));

        assert_eq!(sim.step(&mut obs).unwrap(), Some(StepOutcome::Called(CallId(1))));
        assert!(sim.is_done());
        assert_eq!(sim.step(&mut obs).unwrap(), None);
        assert_eq!(sim.calls_made(), 2);
        assert_eq!(sim.calling(), TimeDelta::minutes(6));
    }

    #[test]
    fn every_entry_called_once() {
        let windows: Vec<CallWindow> = (0..5).map(london).collect();
        let report = simulate(windows, &config()).unwrap();
        assert_eq!(report.calls_made, 5);
        assert_eq!(report.calling_minutes, 15);
        // One wait from 21:30 to 09:00, then back-to-back calls.
        assert_eq!(report.waiting_secs, 690 * 60);
        assert_eq!(report.finished_at, utc(16, 9, 15));
        assert_eq!(report.steps, 6);
    }

    #[test]
    fn no_waiting_when_windows_open() {
        let config = SimConfig {
            start_time: chrono::NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            ..config()
        };
        let windows: Vec<CallWindow> = (0..4).map(london).collect();
        let report = simulate(windows, &config).unwrap();
        assert_eq!(report.calls_made, 4);
        assert_eq!(report.waiting_secs, 0);
        assert_eq!(report.finished_at, utc(15, 10, 12));
    }

    #[test]
    fn call_duration_is_configurable() {
        let config = SimConfig { call_duration_mins: 10, ..config() };
        let report = simulate(vec![new_york(0), new_york(1)], &config).unwrap();
        assert_eq!(report.calling_minutes, 20);
        assert_eq!(report.finished_at, utc(15, 21, 50));
    }

    #[test]
    fn inverted_window_stalls() {
        // New York and Tokyo never share calling hours.
        let inverted = window(0, utc(15, 14, 0), utc(15, 11, 0));
        let result = simulate(vec![inverted], &config());
        match result {
            Err(SimError::Stalled { pending, idle_steps, .. }) => {
                assert_eq!(pending, 1);
                assert_eq!(idle_steps, 3);
            }
            other => panic!("expected stall, got {other:?}"),
        }
    }

    #[test]
    fn inverted_window_stalls_after_others_are_called() {
        let inverted = window(2, utc(15, 14, 0), utc(15, 11, 0));
        let mut rec = Recorder::default();
        let result = SimBuilder::new(config(), SingleShot)
            .windows(vec![london(0), inverted, new_york(1)])
            .build()
            .unwrap()
            .run(&mut rec);
        assert!(matches!(result, Err(SimError::Stalled { pending: 1, .. })));
        assert_eq!(rec.calls.len(), 2);
        assert!(rec.ended.is_none());
    }

    #[test]
    fn stale_window_catches_up_behind_future_one() {
        // Three days stale: single-shot rollover moves it one day per visit.
        let stale = window(0, utc(12, 9, 0), utc(12, 13, 0));
        let future = window(1, utc(16, 12, 0), utc(16, 13, 0));
        let mut rec = Recorder::default();
        let report = SimBuilder::new(config(), SingleShot)
            .windows(vec![stale, future])
            .build()
            .unwrap()
            .run(&mut rec)
            .unwrap();

        assert!(rec.jumps.is_empty());
        assert_eq!(report.calls_made, 2);
        assert_eq!(report.waiting_secs, 870 * 60);
        assert_eq!(report.finished_at, utc(16, 12, 6));
        assert_eq!(rec.calls, vec![(CallId(0), utc(16, 12, 0)), (CallId(1), utc(16, 12, 3))]);
    }

    #[test]
    fn guard_never_skips_an_open_window() {
        // Once the clock reaches 10:00 the earlier window is still open
        // (inclusive close) and must be called before anything later.
        let config = SimConfig {
            start_time: chrono::NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
            ..config()
        };
        let early = window(0, utc(15, 9, 0), utc(15, 10, 0));
        let later = window(1, utc(15, 10, 0), utc(15, 18, 0));
        let mut rec = Recorder::default();
        let report = SimBuilder::new(config, SingleShot)
            .windows(vec![early, later])
            .build()
            .unwrap()
            .run(&mut rec)
            .unwrap();

        assert_eq!(rec.calls, vec![(CallId(0), utc(15, 10, 0)), (CallId(1), utc(15, 10, 3))]);
        assert!(rec.jumps.is_empty());
        assert_eq!(report.waiting_secs, 600 * 60);
        assert_eq!(report.finished_at, utc(15, 10, 6));
        assert_eq!(report.steps, 4);
    }

    #[test]
    fn disjoint_windows_that_pass_each_other_stall() {
        // Each requeue jumps past the other window's close.
        let config = SimConfig {
            start_time: chrono::NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
            ..config()
        };
        let result = simulate(
            vec![
                window(0, utc(15, 9, 0), utc(15, 10, 0)),
                window(1, utc(15, 11, 0), utc(15, 12, 0)),
            ],
            &config,
        );
        match result {
            Err(SimError::Stalled { pending, idle_steps, .. }) => {
                assert_eq!(pending, 2);
                assert_eq!(idle_steps, 5);
            }
            other => panic!("expected stall, got {other:?}"),
        }
    }
}

// ── Rollover modes ────────────────────────────────────────────────────────────

#[cfg(test)]
mod rollover_modes {
    use super::*;

    fn stale_london() -> CallWindow {
        window(0, utc(12, 9, 0), utc(12, 20, 0))
    }

    #[test]
    fn catch_up_services_stale_window() {
        let config = SimConfig { rollover: RolloverMode::CatchUp, ..config() };
        let report = simulate(vec![stale_london()], &config).unwrap();
        assert_eq!(report.calls_made, 1);
        assert_eq!(report.waiting_secs, 690 * 60);
        assert_eq!(report.finished_at, utc(16, 9, 3));
    }

    #[test]
    fn single_shot_catches_up_stale_window() {
        let report = simulate(vec![stale_london()], &config()).unwrap();
        assert_eq!(report.calls_made, 1);
        assert_eq!(report.waiting_secs, 690 * 60);
        assert_eq!(report.finished_at, utc(16, 9, 3));
        // Three catch-up visits, one wait, one call.
        assert_eq!(report.steps, 5);
    }

    #[test]
    fn policy_value_and_mode_agree() {
        let windows = vec![new_york(0), london(1)];
        let by_mode = simulate(windows.clone(), &config()).unwrap();
        let by_value = SimBuilder::new(config(), SingleShot)
            .windows(windows)
            .build()
            .unwrap()
            .run(&mut NoopObserver)
            .unwrap();
        assert_eq!(by_mode, by_value);
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use super::*;

    #[test]
    fn hooks_fire_in_order() {
        let mut rec = Recorder::default();
        let report = SimBuilder::new(config(), SingleShot)
            .windows(vec![new_york(0), london(1)])
            .build()
            .unwrap()
            .run(&mut rec)
            .unwrap();

        assert_eq!(rec.started, 1);
        assert_eq!(rec.calls, vec![(CallId(0), utc(15, 21, 30)), (CallId(1), utc(16, 9, 0))]);
        assert_eq!(rec.requeues, vec![(CallId(1), utc(15, 21, 33), TimeDelta::minutes(687))]);
        assert!(rec.jumps.is_empty());
        assert_eq!(rec.ended, Some(report));
    }
}

// ── End to end with ingestion ─────────────────────────────────────────────────

#[cfg(test)]
mod with_ingest {
    use cw_schedule::{PrefixTable, ingest};

    use super::*;

    #[test]
    fn dropped_numbers_are_not_simulated() {
        let numbers = [
            "+1 212 555 1234",
            "bogus",
            "+44 20 7123 4567",
            "+999123456789",
            "(415) 555-0100",
        ];
        let config = config();
        let ingested = ingest(numbers, &PrefixTable::builtin(), &config);
        let dropped = ingested.dropped.len();
        assert_eq!(dropped, 2);

        let report = SimBuilder::new(config.clone(), config.rollover)
            .windows(ingested.windows)
            .dropped(dropped)
            .build()
            .unwrap()
            .run(&mut NoopObserver)
            .unwrap();
        assert_eq!(report.calls_made, 3);
        assert_eq!(report.calling_minutes, 9);
        assert_eq!(report.dropped, 2);
    }

    #[test]
    fn new_york_and_london_numbers() {
        let config = config();
        let ingested = ingest(["+12125551234", "+442071234567"], &PrefixTable::builtin(), &config);
        let report = simulate(ingested.windows, &config).unwrap();
        assert_eq!(report.calling_minutes, 6);
        assert_eq!(report.waiting_minutes(), 687.0);
        assert_eq!(report.total_minutes(), 693);
    }
}

// ── Invariants ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod proptests {
    use proptest::prelude::*;

    use super::*;

    fn windows_from(spec: &[(i64, i64)]) -> Vec<CallWindow> {
        spec.iter()
            .enumerate()
            .map(|(i, &(open, len))| {
                let start = utc(15, 0, 0) + TimeDelta::minutes(open);
                window(i as u32, start, start + TimeDelta::minutes(len))
            })
            .collect()
    }

    fn config_at(start_min: u32, catch_up: bool) -> SimConfig {
        SimConfig {
            start_time: chrono::NaiveTime::from_hms_opt(start_min / 60, start_min % 60, 0).unwrap(),
            rollover: if catch_up { RolloverMode::CatchUp } else { RolloverMode::SingleShot },
            ..config()
        }
    }

    proptest! {
        /// Entries sharing one window always finish, whatever the start time
        /// and however stale the window is.
        #[test]
        fn shared_window_always_finishes(
            open in 0i64..1440,
            len in 1i64..900,
            days_stale in 0i64..4,
            n in 1usize..6,
            start_min in 0u32..1440,
            catch_up in any::<bool>(),
        ) {
            let config = config_at(start_min, catch_up);
            let start = utc(15, 0, 0) + TimeDelta::minutes(open) - TimeDelta::days(days_stale);
            let windows = (0..n)
                .map(|i| window(i as u32, start, start + TimeDelta::minutes(len)))
                .collect();
            let report = simulate(windows, &config);
            prop_assert!(report.is_ok(), "expected a finished run, got {:?}", report);
            let report = report.unwrap();
            let n = n as u64;
            prop_assert_eq!(report.calls_made, n);
            prop_assert_eq!(report.calling_minutes, 3 * n);
            prop_assert_eq!(
                report.elapsed(),
                TimeDelta::minutes(report.calling_minutes as i64) + report.waiting()
            );
        }

        /// A run either services every entry exactly once or stalls (windows
        /// that never share an open instant can chase each other); time
        /// reported to the observer never goes backwards.
        #[test]
        fn run_invariants(
            spec in prop::collection::vec((0i64..1440, 1i64..900), 1..6),
            start_min in 0u32..1440,
            catch_up in any::<bool>(),
        ) {
            let config = config_at(start_min, catch_up);
            let n = spec.len() as u64;
            let mut rec = Recorder::default();
            let result = SimBuilder::new(config.clone(), config.rollover)
                .windows(windows_from(&spec))
                .build()
                .unwrap()
                .run(&mut rec);

            prop_assert!(rec.instants.windows(2).all(|w| w[0] <= w[1]));
            for (_, _, waited) in &rec.requeues {
                prop_assert!(*waited >= TimeDelta::zero());
            }

            match result {
                Ok(report) => {
                    prop_assert_eq!(report.calls_made, n);
                    prop_assert_eq!(report.calling_minutes, 3 * n);
                    prop_assert!(report.waiting_secs >= 0);
                    prop_assert!(report.finished_at >= report.started_at);
                    prop_assert_eq!(
                        report.elapsed(),
                        TimeDelta::minutes(report.calling_minutes as i64) + report.waiting()
                    );
                }
                Err(SimError::Stalled { pending, .. }) => {
                    prop_assert!(pending >= 1);
                    prop_assert_eq!(rec.calls.len() as u64 + pending as u64, n);
                }
                Err(other) => prop_assert!(false, "unexpected error: {}", other),
            }
        }
    }
}
