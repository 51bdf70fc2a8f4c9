//! Pure calendar arithmetic plus the clock abstraction used wherever the
//! engine needs "now".

use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::sync::Mutex;

/// Number of calendar days in `[start, end]`, both ends included.
/// Zero when `end` precedes `start`.
pub fn days_inclusive(start: NaiveDate, end: NaiveDate) -> u64 {
    if end < start {
        return 0;
    }
    (end - start).num_days() as u64 + 1
}

/// Every calendar date in `[start, end]`, ascending. Empty when the range is
/// inverted.
pub fn date_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut days = Vec::new();
    let mut day = start;
    while day <= end {
        days.push(day);
        day += Duration::days(1);
    }
    days
}

/// Intersects `[from, to]` with `[start, end]`; `None` if they do not touch.
pub fn clamp_overlap(
    from: NaiveDate,
    to: NaiveDate,
    start: NaiveDate,
    end: NaiveDate,
) -> Option<(NaiveDate, NaiveDate)> {
    let lo = from.max(start);
    let hi = to.min(end);
    if lo > hi { None } else { Some((lo, hi)) }
}

/// Inclusive length of the overlap between `[from, to]` and `[start, end]`.
pub fn overlap_days(from: NaiveDate, to: NaiveDate, start: NaiveDate, end: NaiveDate) -> u64 {
    match clamp_overlap(from, to, start, end) {
        Some((lo, hi)) => days_inclusive(lo, hi),
        None => 0,
    }
}

/// Whether `day` falls inside `[from, to]`.
pub fn covers(from: NaiveDate, to: NaiveDate, day: NaiveDate) -> bool {
    from <= day && day <= to
}

/// Elapsed hours rounded to two decimal places.
pub fn round_hours(elapsed: Duration) -> f64 {
    let hours = elapsed.num_seconds() as f64 / 3600.0;
    (hours * 100.0).round() / 100.0
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Settable clock for tests and deterministic fixtures.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self { now: Mutex::new(at) }
    }

    pub fn set(&self, at: DateTime<Utc>) {
        *self.now.lock().expect("clock lock poisoned") = at;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().expect("clock lock poisoned");
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock lock poisoned")
    }
}
