//! Occupancy and availability calculations.
//!
//! Everything here is pure: the functions work on slices of reservations
//! that the caller has already loaded, so they can be used inside or
//! outside a transaction and are cheap to property-test.
//!
//! Occupancy ("taken spots") for a campsite on a date is the number of
//! reservations whose inclusive `[check_in, check_out]` range contains the
//! date. A date is available while taken spots stay below capacity.

use std::collections::BTreeMap;

use chrono::{Months, NaiveDate};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::{Campsite, Reservation, StayDates};

/// Default booking window, in calendar months after today.
pub const DEFAULT_HORIZON_MONTHS: u32 = 2;

/// The bookable window: today through today plus a number of calendar months.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use campground::BookingHorizon;
///
/// let today = NaiveDate::from_ymd_opt(2026, 6, 15).unwrap();
/// let horizon = BookingHorizon::new(today, 2);
/// assert_eq!(horizon.first_day(), today);
/// assert_eq!(horizon.last_day(), NaiveDate::from_ymd_opt(2026, 8, 15).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingHorizon {
    first_day: NaiveDate,
    last_day: NaiveDate,
}

impl BookingHorizon {
    /// Creates the horizon starting at `today`.
    ///
    /// Month arithmetic clamps to the end of shorter months, so a horizon
    /// starting on December 31st ends on the last day of February. The number
    /// of days therefore depends on `today`: two months from July 1st span 63
    /// days, two months from October 19th span 62.
    #[must_use]
    pub fn new(today: NaiveDate, months: u32) -> Self {
        let last_day = today
            .checked_add_months(Months::new(months))
            .unwrap_or(NaiveDate::MAX);
        Self {
            first_day: today,
            last_day,
        }
    }

    /// The first bookable day (today).
    #[must_use]
    pub const fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    /// The last bookable day, inclusive.
    #[must_use]
    pub const fn last_day(&self) -> NaiveDate {
        self.last_day
    }

    /// Iterates every day in the horizon, both ends included.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        StayDates::new(self.first_day, self.last_day).days()
    }

    /// Checks a requested stay against the date-range rules.
    ///
    /// Rules, checked in order: check-in is not before today, check-out is
    /// not after the last bookable day, check-out is not before check-in.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidReservation`] naming the first violated rule.
    pub fn validate(&self, stay: &StayDates) -> Result<()> {
        if stay.check_in < self.first_day {
            return Err(Error::InvalidReservation {
                reason: format!(
                    "check-in {} is before today ({})",
                    stay.check_in, self.first_day
                ),
            });
        }

        if stay.check_out > self.last_day {
            return Err(Error::InvalidReservation {
                reason: format!(
                    "check-out {} is after the last bookable day ({})",
                    stay.check_out, self.last_day
                ),
            });
        }

        if stay.check_out < stay.check_in {
            return Err(Error::InvalidReservation {
                reason: format!(
                    "check-out {} is before check-in {}",
                    stay.check_out, stay.check_in
                ),
            });
        }

        Ok(())
    }
}

/// Counts the reservations covering `date`.
///
/// Reservations belonging to other campsites must be filtered out by the
/// caller; this function only looks at the date ranges.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, Utc};
/// use campground::availability::taken_spots;
/// use campground::{CampsiteId, Reservation, ReservationId, StayDates, UserId};
///
/// let d = |day| NaiveDate::from_ymd_opt(2026, 7, day).unwrap();
/// let booking = |id, from, to| Reservation::new(
///     ReservationId::new(id), UserId::new(id), CampsiteId::new(1),
///     StayDates::new(d(from), d(to)), Utc::now(),
/// );
/// let reservations = vec![booking(1, 1, 5), booking(2, 5, 9)];
/// assert_eq!(taken_spots(&reservations, d(5)), 2);
/// assert_eq!(taken_spots(&reservations, d(6)), 1);
/// assert_eq!(taken_spots(&reservations, d(10)), 0);
/// ```
#[must_use]
pub fn taken_spots(reservations: &[Reservation], date: NaiveDate) -> u32 {
    let count = reservations
        .iter()
        .filter(|reservation| reservation.stay().contains(date))
        .count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Whether the campsite still has a free spot on `date`.
#[must_use]
pub fn is_available(campsite: &Campsite, reservations: &[Reservation], date: NaiveDate) -> bool {
    taken_spots(reservations, date) < campsite.capacity().value()
}

/// Per-day availability of one campsite across the booking horizon.
///
/// Serializes as a JSON object keyed by `YYYY-MM-DD` in date order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AvailabilityCalendar {
    days: BTreeMap<NaiveDate, bool>,
}

impl AvailabilityCalendar {
    /// Computes availability for every day of `horizon`.
    ///
    /// `reservations` should be the campsite's reservations; entries for
    /// other campsites are ignored.
    #[must_use]
    pub fn compute(
        campsite: &Campsite,
        reservations: &[Reservation],
        horizon: &BookingHorizon,
    ) -> Self {
        let own: Vec<Reservation> = reservations
            .iter()
            .filter(|reservation| reservation.campsite_id() == campsite.id())
            .cloned()
            .collect();

        let days = horizon
            .days()
            .map(|day| (day, is_available(campsite, &own, day)))
            .collect();

        Self { days }
    }

    /// Availability on one day, `None` outside the horizon.
    #[must_use]
    pub fn get(&self, date: NaiveDate) -> Option<bool> {
        self.days.get(&date).copied()
    }

    /// Number of days covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Whether the calendar covers no days.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Iterates `(date, available)` pairs in date order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, bool)> + '_ {
        self.days.iter().map(|(day, available)| (*day, *available))
    }

    /// The calendar keyed by `YYYY-MM-DD` strings.
    #[must_use]
    pub fn to_key_map(&self) -> BTreeMap<String, bool> {
        self.days
            .iter()
            .map(|(day, available)| (day.format("%Y-%m-%d").to_string(), *available))
            .collect()
    }
}

#[cfg(test)]
mod proptests;
