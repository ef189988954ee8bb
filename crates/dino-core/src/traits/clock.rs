//! Source of the local wall-clock time

use chrono::{Local, NaiveDateTime};

/// Provides "now" in the process's local calendar
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Reads the system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always reports the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
