//! Reservation types for tracking campsite bookings.
//!
//! A reservation books one spot on a campsite for an inclusive range of
//! calendar days. Its creation timestamp is significant: when a campsite's
//! capacity is reduced, the most recently created reservations are the ones
//! evicted.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::CampsiteId;

/// Identifier of a stored reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationId(i64);

impl ReservationId {
    /// Wraps a raw row id.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw row id.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of an already-authenticated user.
///
/// The core never verifies identities; the caller vouches for this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wraps a raw user id.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw user id.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An inclusive range of nights booked, from check-in to check-out.
///
/// Construction does not enforce `check_in <= check_out`; admission rules
/// live in [`crate::availability::BookingHorizon::validate`] so that a bad
/// range is reported as an invalid reservation rather than a type error.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use campground::StayDates;
///
/// let d = |day| NaiveDate::from_ymd_opt(2026, 7, day).unwrap();
/// let stay = StayDates::new(d(5), d(10));
/// assert!(stay.contains(d(5)));
/// assert!(stay.contains(d(10)));
/// assert!(!stay.contains(d(11)));
/// assert!(stay.overlaps(&StayDates::new(d(10), d(12))));
/// assert!(!stay.overlaps(&StayDates::new(d(11), d(15))));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StayDates {
    /// First day of the stay.
    pub check_in: NaiveDate,
    /// Last day of the stay.
    pub check_out: NaiveDate,
}

impl StayDates {
    /// Creates a stay from its two endpoints.
    #[must_use]
    pub const fn new(check_in: NaiveDate, check_out: NaiveDate) -> Self {
        Self {
            check_in,
            check_out,
        }
    }

    /// Whether `date` falls within the stay, both ends inclusive.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.check_in <= date && date <= self.check_out
    }

    /// Whether two stays share at least one day.
    ///
    /// Uses `a.check_in <= b.check_out AND b.check_in <= a.check_out`.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.check_in <= other.check_out && other.check_in <= self.check_out
    }

    /// Iterates every day of the stay in order. Empty when the range is inverted.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.check_out;
        self.check_in
            .iter_days()
            .take_while(move |day| *day <= end)
    }
}

impl fmt::Display for StayDates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.check_in, self.check_out)
    }
}

/// A reservation that has not been stored yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReservation {
    /// The user making the booking.
    pub user_id: UserId,
    /// The campsite being booked.
    pub campsite_id: CampsiteId,
    /// The booked days.
    pub stay: StayDates,
}

impl NewReservation {
    /// Creates a reservation request.
    #[must_use]
    pub const fn new(user_id: UserId, campsite_id: CampsiteId, stay: StayDates) -> Self {
        Self {
            user_id,
            campsite_id,
            stay,
        }
    }
}

/// A stored reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    id: ReservationId,
    user_id: UserId,
    campsite_id: CampsiteId,
    stay: StayDates,
    created_at: DateTime<Utc>,
}

impl Reservation {
    /// Assembles a reservation from stored fields.
    #[must_use]
    pub const fn new(
        id: ReservationId,
        user_id: UserId,
        campsite_id: CampsiteId,
        stay: StayDates,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            campsite_id,
            stay,
            created_at,
        }
    }

    /// Returns the reservation id.
    #[must_use]
    pub const fn id(&self) -> ReservationId {
        self.id
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the booked campsite.
    #[must_use]
    pub const fn campsite_id(&self) -> CampsiteId {
        self.campsite_id
    }

    /// Returns the booked days.
    #[must_use]
    pub const fn stay(&self) -> StayDates {
        self.stay
    }

    /// Returns the check-in date.
    #[must_use]
    pub const fn check_in(&self) -> NaiveDate {
        self.stay.check_in
    }

    /// Returns the check-out date.
    #[must_use]
    pub const fn check_out(&self) -> NaiveDate {
        self.stay.check_out
    }

    /// Returns when the reservation was stored.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Validation error for domain values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// A description of the validation failure.
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, month, day).unwrap()
    }

    #[test]
    fn test_stay_contains_is_inclusive() {
        let stay = StayDates::new(d(7, 5), d(7, 10));
        assert!(!stay.contains(d(7, 4)));
        assert!(stay.contains(d(7, 5)));
        assert!(stay.contains(d(7, 7)));
        assert!(stay.contains(d(7, 10)));
        assert!(!stay.contains(d(7, 11)));
    }

    #[test]
    fn test_single_day_stay() {
        let stay = StayDates::new(d(7, 5), d(7, 5));
        assert!(stay.contains(d(7, 5)));
        assert_eq!(stay.days().count(), 1);
    }

    #[test]
    fn test_overlap_touching_endpoints() {
        let existing = StayDates::new(d(7, 5), d(7, 10));
        assert!(existing.overlaps(&StayDates::new(d(7, 10), d(7, 12))));
        assert!(existing.overlaps(&StayDates::new(d(7, 1), d(7, 5))));
        assert!(!existing.overlaps(&StayDates::new(d(7, 11), d(7, 15))));
        assert!(!existing.overlaps(&StayDates::new(d(7, 1), d(7, 4))));
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let a = StayDates::new(d(7, 5), d(7, 10));
        let b = StayDates::new(d(7, 8), d(7, 12));
        assert_eq!(a.overlaps(&b), b.overlaps(&a));
    }

    #[test]
    fn test_days_cross_month_boundary() {
        let stay = StayDates::new(d(7, 30), d(8, 2));
        let days: Vec<_> = stay.days().collect();
        assert_eq!(days, vec![d(7, 30), d(7, 31), d(8, 1), d(8, 2)]);
    }

    #[test]
    fn test_days_inverted_range_is_empty() {
        let stay = StayDates::new(d(7, 10), d(7, 5));
        assert_eq!(stay.days().count(), 0);
    }

    #[test]
    fn test_stay_display() {
        let stay = StayDates::new(d(7, 5), d(7, 10));
        assert_eq!(stay.to_string(), "2026-07-05..=2026-07-10");
    }

    #[test]
    fn test_reservation_accessors() {
        let created = Utc::now();
        let reservation = Reservation::new(
            ReservationId::new(9),
            UserId::new(3),
            CampsiteId::new(4),
            StayDates::new(d(7, 5), d(7, 6)),
            created,
        );
        assert_eq!(reservation.id().value(), 9);
        assert_eq!(reservation.user_id().value(), 3);
        assert_eq!(reservation.campsite_id().value(), 4);
        assert_eq!(reservation.check_in(), d(7, 5));
        assert_eq!(reservation.check_out(), d(7, 6));
        assert_eq!(reservation.created_at(), created);
    }
}
