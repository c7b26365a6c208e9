//! Integration tests for capacity changes and eviction.

mod common;

use std::thread;
use std::time::Duration as StdDuration;

use campground::{Capacity, Reservation};

use common::{add_campsite, add_facility, book, day, service};

fn capacity(n: u32) -> Capacity {
    Capacity::try_from(n).unwrap()
}

#[test]
fn test_lowering_capacity_evicts_newest_three() {
    let (_dir, mut service) = service();
    let facility = add_facility(&mut service);
    let campsite = add_campsite(&mut service, facility, "1", 3);

    // Admission ignores capacity, so five bookings fit on a three-spot site.
    let mut booked = Vec::new();
    for user in 1..=5 {
        booked.push(book(&mut service, user, campsite, 10, 10).unwrap());
        thread::sleep(StdDuration::from_millis(2));
    }

    let update = service.update_capacity(campsite, capacity(2)).unwrap();
    assert!(update.applied);
    let evicted: Vec<_> = update.evicted.iter().map(Reservation::id).collect();
    assert_eq!(evicted, vec![booked[4].id(), booked[3].id(), booked[2].id()]);

    let kept: Vec<_> = service
        .list_reservations_for_campsite(campsite)
        .unwrap()
        .iter()
        .map(Reservation::id)
        .collect();
    assert_eq!(kept, vec![booked[0].id(), booked[1].id()]);
    assert_eq!(service.get_campsite(campsite).unwrap().capacity(), capacity(2));
    assert_eq!(service.taken_spots(campsite, day(10)).unwrap(), 2);
}

#[test]
fn test_no_date_exceeds_capacity_after_update() {
    let (_dir, mut service) = service();
    let facility = add_facility(&mut service);
    let campsite = add_campsite(&mut service, facility, "1", 10);

    for user in 1..=12 {
        let from = user % 5;
        book(&mut service, user, campsite, from, from + (user % 4)).unwrap();
    }

    service.update_capacity(campsite, capacity(3)).unwrap();
    for offset in 0..10 {
        assert!(service.taken_spots(campsite, day(offset)).unwrap() <= 3);
    }
}

#[test]
fn test_update_on_missing_campsite_is_not_applied() {
    let (_dir, mut service) = service();
    let update = service
        .update_capacity(campground::CampsiteId::new(12), capacity(1))
        .unwrap();
    assert!(!update.applied);
}

#[test]
fn test_availability_follows_capacity() {
    let (_dir, mut service) = service();
    let facility = add_facility(&mut service);
    let campsite = add_campsite(&mut service, facility, "1", 2);
    book(&mut service, 1, campsite, 3, 4).unwrap();

    assert!(service.is_available(campsite, day(3)).unwrap());
    service.update_capacity(campsite, capacity(1)).unwrap();
    assert!(!service.is_available(campsite, day(3)).unwrap());

    let calendar = service.availabilities(campsite).unwrap();
    assert_eq!(calendar.get(day(3)), Some(false));
    assert_eq!(calendar.get(day(5)), Some(true));
    let keys = calendar.to_key_map();
    assert_eq!(keys.get(&day(4).format("%Y-%m-%d").to_string()), Some(&false));
}
