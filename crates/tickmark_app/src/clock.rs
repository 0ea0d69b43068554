//! Wall-clock sources

use chrono::{Local, NaiveDateTime, Timelike};
use std::time::Duration;
use tokio::time::Instant;

/// Source of the local date and time shown on the icon
pub trait WallClock: Send + Sync + 'static {
    fn now(&self) -> NaiveDateTime;
}

/// The machine's local time
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl WallClock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Starts at a fixed reading and advances with the tokio clock.
///
/// Under a paused tokio runtime the reading only moves when virtual time does.
#[derive(Clone, Debug)]
pub struct AnchoredClock {
    anchor: NaiveDateTime,
    started: Instant,
}

impl AnchoredClock {
    pub fn new(anchor: NaiveDateTime) -> Self {
        Self {
            anchor,
            started: Instant::now(),
        }
    }

    pub fn anchor(&self) -> NaiveDateTime {
        self.anchor
    }
}

impl WallClock for AnchoredClock {
    fn now(&self) -> NaiveDateTime {
        let elapsed = chrono::Duration::from_std(self.started.elapsed())
            .unwrap_or_else(|_| chrono::Duration::zero());
        self.anchor + elapsed
    }
}

/// Time from `now` until the next render boundary: `(60 - seconds) * 1000` ms.
///
/// Sub-second precision is dropped, so the timer lands in the first second
/// of the next minute.
pub fn delay_until_next_minute(now: &NaiveDateTime) -> Duration {
    let seconds = u64::from(now.second().min(59));
    Duration::from_millis((60 - seconds) * 1000)
}
