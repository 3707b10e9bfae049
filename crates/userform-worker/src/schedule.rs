//! When a workflow fires
//!
//! A run covers one interval `[start + (k-1)*i, start + k*i)` and fires at
//! the end of it, `start + k*i` for `k >= 1`.

use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub start_date: DateTime<Utc>,
    pub interval: Duration,
    /// Replay every interval since `start_date` instead of only the latest
    pub catchup: bool,
}

impl Schedule {
    pub fn new(start_date: DateTime<Utc>, interval: Duration, catchup: bool) -> Self {
        Self {
            start_date,
            interval,
            catchup,
        }
    }

    /// First fire time for a scheduler started at `now`.
    ///
    /// Without catchup this is the most recent fire time not after `now`,
    /// so earlier missed intervals are skipped. With catchup it is the very
    /// first fire time.
    pub fn first_fire(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let first = self.start_date + self.interval;
        if self.catchup || now < first {
            return first;
        }

        let interval_ms = self.interval.num_milliseconds().max(1);
        let elapsed_ms = (now - self.start_date).num_milliseconds();
        let completed = elapsed_ms / interval_ms;
        self.start_date + Duration::milliseconds(completed * interval_ms)
    }

    /// Fire time following `fire`
    pub fn next_fire(&self, fire: DateTime<Utc>) -> DateTime<Utc> {
        fire + self.interval
    }

    /// Fire time to wait for once the run that fired at `fire` has finished
    /// at `now`.
    ///
    /// Without catchup, fire times that passed while the run was busy are
    /// skipped: at most the latest one not after `now` is returned, so a
    /// long run is followed by a single immediate run, never a burst.
    pub fn fire_after_run(&self, fire: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
        let next = self.next_fire(fire);
        if self.catchup {
            return next;
        }
        next.max(self.first_fire(now))
    }

    /// Start of the interval that fires at `fire`
    pub fn logical_date(&self, fire: DateTime<Utc>) -> DateTime<Utc> {
        fire - self.interval
    }
}
