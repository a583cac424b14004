//! Match clock: a persisted base plus a live wall-clock delta.
//!
//! Elapsed time is always re-derived from `started_at`, so a suspended
//! process picks up the correct time on its next read instead of relying on a
//! periodic tick.

use std::fmt::Display;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    FirstHalf,
    HalfTime,
    SecondHalf,
}

impl Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Period::FirstHalf => write!(f, "first half"),
            Period::HalfTime => write!(f, "half time"),
            Period::SecondHalf => write!(f, "second half"),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clock {
    /// Seconds accumulated while stopped.
    pub base_seconds: u32,
    /// Wall-clock instant of the last start, `None` while stopped.
    pub started_at: Option<DateTime<Utc>>,
}

impl Clock {
    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn elapsed(&self, now: DateTime<Utc>) -> u32 {
        match self.started_at {
            None => self.base_seconds,
            Some(started_at) => {
                // a wall clock that moved backwards contributes nothing
                let delta_ms = (now - started_at).num_milliseconds().max(0);
                let delta_secs = u32::try_from(delta_ms / 1000).unwrap_or(u32::MAX);
                self.base_seconds.saturating_add(delta_secs)
            }
        }
    }

    pub fn start(&mut self, now: DateTime<Utc>) {
        if self.is_running() {
            log::debug!("Clock already running, ignoring start");
            return;
        }
        self.started_at = Some(now);
    }

    pub fn stop(&mut self, now: DateTime<Utc>) {
        if !self.is_running() {
            log::debug!("Clock already stopped, ignoring stop");
            return;
        }
        self.base_seconds = self.elapsed(now);
        self.started_at = None;
    }
}

/// Nominal length of one half in seconds.
pub fn half_length(planned_duration_minutes: u32) -> u32 {
    planned_duration_minutes.saturating_mul(60) / 2
}

pub fn format_mm_ss(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

fn format_added_time(mark_seconds: u32, over_seconds: u32) -> String {
    format!(
        "{}'+{}:{:02}",
        mark_seconds / 60,
        over_seconds / 60,
        over_seconds % 60
    )
}

/// Clock text shown to the manager.
///
/// The first half reads `mm:ss` up to the half mark and `45'+m:ss` beyond it.
/// The second half is offset by the first half's added time so it resumes at
/// the half mark, and switches to `90'+m:ss` past full time.
pub fn display_time(
    elapsed: u32,
    period: Period,
    half_length: u32,
    first_half_added_time: u32,
) -> String {
    match period {
        Period::FirstHalf | Period::HalfTime => {
            if elapsed <= half_length {
                format_mm_ss(elapsed)
            } else {
                format_added_time(half_length, elapsed - half_length)
            }
        }
        Period::SecondHalf => {
            let full_time = half_length.saturating_mul(2);
            let match_time = elapsed.saturating_sub(first_half_added_time);
            if match_time <= full_time {
                format_mm_ss(match_time)
            } else {
                format_added_time(full_time, match_time - full_time)
            }
        }
    }
}

/// Whole-minute label for a timeline entry, counting the minute in progress:
/// `1'` for the first 60 seconds, `45+2'` in first-half added time.
pub fn minute_label(
    timestamp: u32,
    in_first_half: bool,
    half_length: u32,
    first_half_added_time: u32,
) -> String {
    let (match_time, mark) = if in_first_half {
        (timestamp, half_length)
    } else {
        (
            timestamp.saturating_sub(first_half_added_time),
            half_length.saturating_mul(2),
        )
    };
    if match_time < mark {
        format!("{}'", match_time / 60 + 1)
    } else {
        format!("{}+{}'", mark / 60, (match_time - mark) / 60 + 1)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn kickoff() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 9, 7, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_half_length_saturates() {
        assert_eq!(half_length(90), 2700);
        assert_eq!(half_length(u32::MAX), u32::MAX / 2);
        assert_eq!(display_time(10, Period::SecondHalf, half_length(u32::MAX), 0), "00:10");
        assert_eq!(minute_label(10, false, half_length(u32::MAX), 0), "1'");
    }

    #[test]
    fn test_stopped_clock_reads_base() {
        let clock = Clock {
            base_seconds: 125,
            started_at: None,
        };
        assert_eq!(clock.elapsed(kickoff() + Duration::hours(3)), 125);
    }

    #[test]
    fn test_running_clock_floors_partial_seconds() {
        let mut clock = Clock::default();
        clock.start(kickoff());
        assert_eq!(clock.elapsed(kickoff() + Duration::milliseconds(59_999)), 59);
        assert_eq!(clock.elapsed(kickoff() + Duration::seconds(60)), 60);
    }

    #[test]
    fn test_stop_folds_elapsed_into_base() {
        let mut clock = Clock::default();
        clock.start(kickoff());
        clock.stop(kickoff() + Duration::seconds(90));
        assert!(!clock.is_running());
        assert_eq!(clock.base_seconds, 90);

        clock.start(kickoff() + Duration::seconds(300));
        assert_eq!(clock.elapsed(kickoff() + Duration::seconds(310)), 100);
    }

    #[test]
    fn test_double_start_keeps_first_instant() {
        let mut clock = Clock::default();
        clock.start(kickoff());
        clock.start(kickoff() + Duration::seconds(30));
        assert_eq!(clock.elapsed(kickoff() + Duration::seconds(40)), 40);
    }

    #[test]
    fn test_reads_are_idempotent() {
        let mut clock = Clock::default();
        clock.start(kickoff());
        let now = kickoff() + Duration::seconds(1234);
        assert_eq!(clock.elapsed(now), clock.elapsed(now));
    }

    #[test]
    fn test_wall_clock_moving_backwards() {
        let mut clock = Clock {
            base_seconds: 50,
            started_at: None,
        };
        clock.start(kickoff());
        assert_eq!(clock.elapsed(kickoff() - Duration::seconds(10)), 50);
    }

    #[test]
    fn test_first_half_added_time_display() {
        let half = half_length(90);
        assert_eq!(half, 2700);
        assert_eq!(display_time(2750, Period::FirstHalf, half, 0), "45'+0:50");
        assert_eq!(display_time(2700, Period::FirstHalf, half, 0), "45:00");
        assert_eq!(display_time(65, Period::FirstHalf, half, 0), "01:05");
    }

    #[test]
    fn test_second_half_display_offsets_added_time() {
        let half = half_length(90);
        // 50s of first-half added time, then 10 minutes of second half
        assert_eq!(
            display_time(2750 + 600, Period::SecondHalf, half, 50),
            "55:00"
        );
        assert_eq!(
            display_time(5400 + 50 + 184, Period::SecondHalf, half, 50),
            "90'+3:04"
        );
    }

    #[test]
    fn test_half_time_shows_frozen_first_half() {
        let half = half_length(60);
        assert_eq!(display_time(1830, Period::HalfTime, half, 30), "30'+0:30");
    }

    #[test]
    fn test_minute_labels() {
        let half = half_length(90);
        assert_eq!(minute_label(0, true, half, 0), "1'");
        assert_eq!(minute_label(1379, true, half, 0), "23'");
        assert_eq!(minute_label(2700 + 70, true, half, 120), "45+2'");
        assert_eq!(minute_label(2820 + 60, false, half, 120), "47'");
        assert_eq!(minute_label(5400 + 120 + 200, false, half, 120), "90+4'");
    }
}
