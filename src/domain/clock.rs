use chrono::{Local, NaiveDateTime};

/// Local wall-clock time, used when a new event has no selected range.
pub trait Clock: Send {
    fn now(&self) -> NaiveDateTime;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime { Local::now().naive_local() }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime { self.0 }
}
