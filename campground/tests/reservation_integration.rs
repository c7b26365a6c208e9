//! Integration tests for reservation admission and cancellation.

mod common;

use chrono::Duration;

use campground::{Error, ReservationId, UserId};

use common::{add_campsite, add_facility, book, day, service, today};

#[test]
fn test_check_in_yesterday_is_rejected() {
    let (_dir, mut service) = service();
    let facility = add_facility(&mut service);
    let campsite = add_campsite(&mut service, facility, "1", 4);

    let err = book(&mut service, 1, campsite, -1, 2).unwrap_err();
    assert!(matches!(err, Error::InvalidReservation { .. }));
}

#[test]
fn test_check_out_past_horizon_is_rejected() {
    let (_dir, mut service) = service();
    let facility = add_facility(&mut service);
    let campsite = add_campsite(&mut service, facility, "1", 4);
    let last = service.horizon().last_day();
    let beyond = (last - today()).num_days() + 1;

    let err = book(&mut service, 1, campsite, 3, beyond).unwrap_err();
    assert!(matches!(err, Error::InvalidReservation { .. }));

    book(&mut service, 1, campsite, 3, beyond - 1).unwrap();
}

#[test]
fn test_same_day_stay_today_succeeds() {
    let (_dir, mut service) = service();
    let facility = add_facility(&mut service);
    let campsite = add_campsite(&mut service, facility, "1", 1);

    let reservation = book(&mut service, 1, campsite, 0, 0).unwrap();
    assert_eq!(reservation.check_in(), today());
    assert_eq!(reservation.check_out(), today());
}

#[test]
fn test_check_out_before_check_in_is_rejected() {
    let (_dir, mut service) = service();
    let facility = add_facility(&mut service);
    let campsite = add_campsite(&mut service, facility, "1", 1);

    let err = book(&mut service, 1, campsite, 5, 4).unwrap_err();
    assert!(matches!(err, Error::InvalidReservation { .. }));
}

#[test]
fn test_user_overlap_on_same_campsite() {
    let (_dir, mut service) = service();
    let facility = add_facility(&mut service);
    let campsite = add_campsite(&mut service, facility, "1", 5);
    let other = add_campsite(&mut service, facility, "2", 5);

    book(&mut service, 1, campsite, 5, 10).unwrap();
    assert!(book(&mut service, 1, campsite, 8, 12).unwrap_err().is_conflict());
    assert!(book(&mut service, 1, campsite, 10, 10).unwrap_err().is_conflict());
    book(&mut service, 1, campsite, 11, 15).unwrap();

    // The overlap rule is per campsite.
    book(&mut service, 1, other, 8, 12).unwrap();
}

#[test]
fn test_unknown_campsite_is_not_found() {
    let (_dir, mut service) = service();
    let err = book(&mut service, 1, campground::CampsiteId::new(42), 1, 2).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_listing_and_cancel() {
    let (_dir, mut service) = service();
    let facility = add_facility(&mut service);
    let campsite = add_campsite(&mut service, facility, "1", 5);

    let first = book(&mut service, 1, campsite, 1, 2).unwrap();
    let second = book(&mut service, 2, campsite, 1, 3).unwrap();
    book(&mut service, 1, campsite, 4, 6).unwrap();

    assert_eq!(service.list_reservations_for_user(UserId::new(1)).unwrap().len(), 2);
    assert_eq!(service.list_reservations_for_campsite(campsite).unwrap().len(), 3);
    assert!(second.created_at() >= first.created_at());

    assert!(!service
        .cancel_reservation_for_user(first.id(), UserId::new(2))
        .unwrap());
    assert!(service
        .cancel_reservation_for_user(first.id(), UserId::new(1))
        .unwrap());
    assert!(service.get_reservation(first.id()).unwrap_err().is_not_found());

    assert!(service.cancel_reservation(second.id()).unwrap());
    assert!(!service.cancel_reservation(ReservationId::new(9_999)).unwrap());

    assert!(service.delete_reservations_for_campsite(campsite).unwrap());
    assert!(!service.delete_reservations_for_campsite(campsite).unwrap());
}

#[test]
fn test_dates_survive_storage() {
    let (_dir, mut service) = service();
    let facility = add_facility(&mut service);
    let campsite = add_campsite(&mut service, facility, "1", 5);

    let created = book(&mut service, 3, campsite, 29, 33).unwrap();
    let fetched = service.get_reservation(created.id()).unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.stay().days().count(), 5);
    assert_eq!(fetched.check_out() - fetched.check_in(), Duration::days(4));
    assert_eq!(fetched.check_in(), day(29));
}
