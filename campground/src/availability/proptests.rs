//! Property-based tests for occupancy and the booking horizon.

use super::{is_available, taken_spots, AvailabilityCalendar, BookingHorizon};
use crate::{Campsite, CampsiteId, Capacity, FacilityId, Reservation, ReservationId, StayDates, UserId};
use chrono::{Duration, NaiveDate, Utc};
use proptest::prelude::*;

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
}

// Reservations on campsite 1 as (start offset, length) pairs within ~90 days.
fn reservations_strategy() -> impl Strategy<Value = Vec<Reservation>> {
    prop::collection::vec((0i64..90, 0i64..10), 0..30).prop_map(|spans| {
        spans
            .into_iter()
            .enumerate()
            .map(|(index, (offset, length))| {
                let id = i64::try_from(index).unwrap() + 1;
                let check_in = base_date() + Duration::days(offset);
                Reservation::new(
                    ReservationId::new(id),
                    UserId::new(id),
                    CampsiteId::new(1),
                    StayDates::new(check_in, check_in + Duration::days(length)),
                    Utc::now(),
                )
            })
            .collect()
    })
}

fn campsite(capacity: u32) -> Campsite {
    Campsite::new(
        CampsiteId::new(1),
        FacilityId::new(1),
        "A".into(),
        "1".into(),
        Capacity::try_from(capacity).unwrap(),
        true,
    )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        .. ProptestConfig::default()
    })]

    // Taken spots equals a per-reservation day-by-day count.
    #[test]
    fn taken_spots_matches_expanded_days(reservations in reservations_strategy(), offset in 0i64..100) {
        let date = base_date() + Duration::days(offset);
        let expected = reservations
            .iter()
            .filter(|reservation| reservation.stay().days().any(|day| day == date))
            .count();
        prop_assert_eq!(taken_spots(&reservations, date) as usize, expected);
    }

    // Availability flips exactly at capacity.
    #[test]
    fn availability_is_strictly_below_capacity(
        reservations in reservations_strategy(),
        capacity in 1u32..6,
        offset in 0i64..100,
    ) {
        let date = base_date() + Duration::days(offset);
        let site = campsite(capacity);
        prop_assert_eq!(
            is_available(&site, &reservations, date),
            taken_spots(&reservations, date) < capacity
        );
    }

    // Every stay inside the horizon with ordered endpoints is admitted.
    #[test]
    fn horizon_admits_ordered_stays_inside_window(
        months in 1u32..=6,
        start in 0i64..400,
        length in 0i64..200,
    ) {
        let today = base_date();
        let horizon = BookingHorizon::new(today, months);
        let check_in = today + Duration::days(start);
        let check_out = check_in + Duration::days(length);
        let stay = StayDates::new(check_in, check_out);
        let inside = check_out <= horizon.last_day();
        prop_assert_eq!(horizon.validate(&stay).is_ok(), inside);
    }

    // Anything starting before today is rejected regardless of length.
    #[test]
    fn horizon_rejects_past_check_in(days_ago in 1i64..365, length in 0i64..30) {
        let today = base_date();
        let horizon = BookingHorizon::new(today, 2);
        let check_in = today - Duration::days(days_ago);
        let stay = StayDates::new(check_in, check_in + Duration::days(length));
        prop_assert!(horizon.validate(&stay).is_err());
    }

    // The calendar agrees with is_available on each of its days.
    #[test]
    fn calendar_agrees_with_is_available(reservations in reservations_strategy(), capacity in 1u32..4) {
        let site = campsite(capacity);
        let horizon = BookingHorizon::new(base_date(), 2);
        let calendar = AvailabilityCalendar::compute(&site, &reservations, &horizon);
        prop_assert_eq!(calendar.len(), horizon.days().count());
        for (day, available) in calendar.iter() {
            prop_assert_eq!(available, is_available(&site, &reservations, day));
        }
    }
}
