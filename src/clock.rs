//! Time source for attendance and leave rules.

use chrono::{Local, NaiveDate, NaiveDateTime};

/// Supplies the current local date and time.
pub trait Clock {
    /// The current local date and time.
    fn now(&self) -> NaiveDateTime;

    /// The current local date.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Reads the system clock in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}
