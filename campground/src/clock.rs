//! Sources of "today" and "now".
//!
//! Booking rules are relative to the current date, so every operation that
//! validates or lists availability asks a [`Clock`]. Production code uses
//! [`SystemClock`]; tests and the CLI's `--today` override use [`FixedClock`].

use chrono::{DateTime, Local, NaiveDate, Utc};

/// Provides the current date and time.
pub trait Clock: Send + Sync {
    /// The current calendar date in the campground's local time.
    fn today(&self) -> NaiveDate;

    /// The current instant, used to stamp new reservations.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time of the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to a given date.
///
/// Only the date is fixed. `now` still advances so that reservations created
/// one after another keep distinct, increasing creation timestamps.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use campground::{Clock, FixedClock};
///
/// let today = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
/// let clock = FixedClock::new(today);
/// assert_eq!(clock.today(), today);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    today: NaiveDate,
}

impl FixedClock {
    /// Creates a clock that always reports `today`.
    #[must_use]
    pub const fn new(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
