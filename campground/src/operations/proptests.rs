//! Property-based tests for capacity reconciliation.

use super::reconcile::CapacityReconciler;
use crate::availability::taken_spots;
use crate::database::test_util::{
    create_test_database, insert_reservation_at, seed_campsite, seed_facility,
};
use crate::database::Database;
use crate::{Capacity, Reservation};
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 1).unwrap()
}

// (user, start offset, length, creation second) tuples on a 30-day window.
fn bookings_strategy() -> impl Strategy<Value = Vec<(i64, i64, i64, i64)>> {
    prop::collection::vec((1i64..20, 0i64..30, 0i64..7, 0i64..50), 0..25)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    // After a capacity update no date is overbooked, and storage evicted
    // exactly what the pure plan predicts.
    #[test]
    fn reconcile_respects_capacity_and_plan(
        bookings in bookings_strategy(),
        initial in 1u32..8,
        target in 1u32..8,
    ) {
        let mut db = create_test_database();
        let facility = seed_facility(&mut db);
        let campsite = seed_campsite(&mut db, facility, initial);

        for (user, offset, length, second) in bookings {
            let check_in = base_date() + Duration::days(offset);
            let created_at = Utc.timestamp_opt(1_780_000_000 + second, 0).unwrap();
            insert_reservation_at(
                &mut db,
                user,
                campsite,
                check_in,
                check_in + Duration::days(length),
                created_at,
            );
        }

        let before = Database::list_reservations_by_campsite(db.connection(), campsite).unwrap();
        let target = Capacity::try_from(target).unwrap();
        let plan = CapacityReconciler::plan_evictions(&before, target);

        let update = CapacityReconciler::update_capacity(&mut db, campsite, target).unwrap();
        prop_assert!(update.applied);
        let evicted: Vec<_> = update.evicted.iter().map(Reservation::id).collect();
        prop_assert_eq!(&evicted, &plan);

        let after = Database::list_reservations_by_campsite(db.connection(), campsite).unwrap();
        prop_assert_eq!(after.len() + evicted.len(), before.len());
        for offset in 0..40 {
            let date = base_date() + Duration::days(offset);
            prop_assert!(taken_spots(&after, date) <= target.value());
            prop_assert_eq!(
                Database::count_taken_spots(db.connection(), campsite, date).unwrap(),
                taken_spots(&after, date)
            );
        }
    }

    // The plan never evicts when capacity already covers every date.
    #[test]
    fn plan_is_empty_when_capacity_suffices(bookings in bookings_strategy()) {
        let reservations: Vec<Reservation> = bookings
            .iter()
            .enumerate()
            .map(|(index, (user, offset, length, second))| {
                let check_in = base_date() + Duration::days(*offset);
                Reservation::new(
                    crate::ReservationId::new(i64::try_from(index).unwrap() + 1),
                    crate::UserId::new(*user),
                    crate::CampsiteId::new(1),
                    crate::StayDates::new(check_in, check_in + Duration::days(*length)),
                    Utc.timestamp_opt(1_780_000_000 + second, 0).unwrap(),
                )
            })
            .collect();
        let capacity = u32::try_from(reservations.len().max(1)).unwrap();
        let plan = CapacityReconciler::plan_evictions(&reservations, Capacity::try_from(capacity).unwrap());
        prop_assert!(plan.is_empty());
    }
}
