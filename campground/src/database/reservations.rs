//! Reservation rows.
//!
//! Standalone mutations (`&mut self`) open their own `IMMEDIATE`
//! transaction. The `_in` variants run inside the caller's transaction so
//! that validation, cascades and evictions commit or roll back together.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{Error, Result};
use crate::{CampsiteId, NewReservation, Reservation, ReservationId, StayDates, UserId};

use super::connection::Database;

const SELECT_RESERVATION: &str = r"
    SELECT id, check_in, check_out, created_at, user_id, campsite_id
    FROM reservations
    WHERE id = ?
";

const LIST_BY_USER: &str = r"
    SELECT id, check_in, check_out, created_at, user_id, campsite_id
    FROM reservations
    WHERE user_id = ?
    ORDER BY check_in, id
";

const LIST_BY_CAMPSITE: &str = r"
    SELECT id, check_in, check_out, created_at, user_id, campsite_id
    FROM reservations
    WHERE campsite_id = ?
    ORDER BY check_in, id
";

const FIND_USER_OVERLAP: &str = r"
    SELECT id, check_in, check_out, created_at, user_id, campsite_id
    FROM reservations
    WHERE user_id = ?1 AND campsite_id = ?2
      AND check_in <= ?4 AND ?3 <= check_out
    ORDER BY check_in, id
    LIMIT 1
";

const COUNT_TAKEN_SPOTS: &str = r"
    SELECT COUNT(*) FROM reservations
    WHERE campsite_id = ?1 AND check_in <= ?2 AND check_out >= ?2
";

const INSERT_RESERVATION: &str = r"
    INSERT INTO reservations (check_in, check_out, created_at, user_id, campsite_id)
    VALUES (?, ?, ?, ?, ?)
";

const DELETE_RESERVATION: &str = "DELETE FROM reservations WHERE id = ?";

const DELETE_RESERVATION_FOR_USER: &str = "DELETE FROM reservations WHERE id = ? AND user_id = ?";

const DELETE_FOR_CAMPSITE: &str = "DELETE FROM reservations WHERE campsite_id = ?";

// Newest first; id breaks ties between identical timestamps.
const EVICT_NEWEST: &str = r"
    DELETE FROM reservations
    WHERE id IN (
        SELECT id FROM reservations
        WHERE campsite_id = ?1 AND check_in <= ?2 AND check_out >= ?2
        ORDER BY created_at DESC, id DESC
        LIMIT ?3
    )
    RETURNING id, check_in, check_out, created_at, user_id, campsite_id
";

/// Converts a creation timestamp to epoch microseconds for storage.
pub(super) fn to_micros(time: DateTime<Utc>) -> i64 {
    time.timestamp_micros()
}

/// Converts stored epoch microseconds back to a timestamp.
pub(super) fn from_micros(micros: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_micros(micros).single()
}

/// Expects columns: id, `check_in`, `check_out`, `created_at`, `user_id`, `campsite_id`.
fn row_to_reservation(row: &rusqlite::Row<'_>) -> rusqlite::Result<Reservation> {
    let check_in: NaiveDate = row.get(1)?;
    let check_out: NaiveDate = row.get(2)?;
    let micros: i64 = row.get(3)?;
    let created_at = from_micros(micros).ok_or(rusqlite::Error::IntegralValueOutOfRange(3, micros))?;

    Ok(Reservation::new(
        ReservationId::new(row.get(0)?),
        UserId::new(row.get(4)?),
        CampsiteId::new(row.get(5)?),
        StayDates::new(check_in, check_out),
        created_at,
    ))
}

impl Database {
    /// Fetches one reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_reservation(conn: &Connection, id: ReservationId) -> Result<Option<Reservation>> {
        Ok(conn
            .query_row(SELECT_RESERVATION, params![id.value()], row_to_reservation)
            .optional()?)
    }

    /// Lists a user's reservations across all campsites, by check-in.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_reservations_by_user(conn: &Connection, user_id: UserId) -> Result<Vec<Reservation>> {
        let mut stmt = conn.prepare(LIST_BY_USER)?;
        let reservations = stmt
            .query_map(params![user_id.value()], row_to_reservation)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(reservations)
    }

    /// Lists a campsite's reservations, by check-in.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_reservations_by_campsite(
        conn: &Connection,
        campsite_id: CampsiteId,
    ) -> Result<Vec<Reservation>> {
        let mut stmt = conn.prepare(LIST_BY_CAMPSITE)?;
        let reservations = stmt
            .query_map(params![campsite_id.value()], row_to_reservation)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(reservations)
    }

    /// Finds a reservation by the same user on the same campsite that shares
    /// at least one day with `stay`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_overlapping_reservation_in(
        conn: &Connection,
        user_id: UserId,
        campsite_id: CampsiteId,
        stay: &StayDates,
    ) -> Result<Option<Reservation>> {
        Ok(conn
            .query_row(
                FIND_USER_OVERLAP,
                params![user_id.value(), campsite_id.value(), stay.check_in, stay.check_out],
                row_to_reservation,
            )
            .optional()?)
    }

    /// Counts the reservations on a campsite covering `date`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_taken_spots(conn: &Connection, campsite_id: CampsiteId, date: NaiveDate) -> Result<u32> {
        let count: u32 = conn.query_row(
            COUNT_TAKEN_SPOTS,
            params![campsite_id.value(), date],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Inserts a reservation stamped with `created_at`. No rules are checked.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataConsistency`] if the insert did not write exactly
    /// one row, or a database error.
    pub fn insert_reservation_in(
        conn: &Connection,
        reservation: &NewReservation,
        created_at: DateTime<Utc>,
    ) -> Result<Reservation> {
        let rows = conn.execute(
            INSERT_RESERVATION,
            params![
                reservation.stay.check_in,
                reservation.stay.check_out,
                to_micros(created_at),
                reservation.user_id.value(),
                reservation.campsite_id.value(),
            ],
        )?;
        if rows != 1 {
            return Err(Error::DataConsistency {
                details: format!("reservation insert wrote {rows} rows, expected 1"),
            });
        }

        // Round-trip through storage precision so the returned value matches
        // what a later read produces.
        let created_at = from_micros(to_micros(created_at)).unwrap_or(created_at);
        Ok(Reservation::new(
            ReservationId::new(conn.last_insert_rowid()),
            reservation.user_id,
            reservation.campsite_id,
            reservation.stay,
            created_at,
        ))
    }

    /// Deletes one reservation in its own transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction or delete fails.
    pub fn delete_reservation(&mut self, id: ReservationId) -> Result<bool> {
        let tx = self.begin_immediate()?;
        let deleted = Self::delete_reservation_in(&tx, id)?;
        tx.commit()?;
        Ok(deleted)
    }

    /// Deletes one reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_reservation_in(conn: &Connection, id: ReservationId) -> Result<bool> {
        let rows = conn.execute(DELETE_RESERVATION, params![id.value()])?;
        Ok(rows > 0)
    }

    /// Deletes one reservation only if `user_id` owns it.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_reservation_for_user_in(
        conn: &Connection,
        id: ReservationId,
        user_id: UserId,
    ) -> Result<bool> {
        let rows = conn.execute(DELETE_RESERVATION_FOR_USER, params![id.value(), user_id.value()])?;
        Ok(rows > 0)
    }

    /// Deletes every reservation of a campsite in its own transaction.
    /// Returns true iff at least one row was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction or delete fails.
    pub fn delete_reservations_for_campsite(&mut self, campsite_id: CampsiteId) -> Result<bool> {
        let tx = self.begin_immediate()?;
        let removed = Self::delete_reservations_for_campsite_in(&tx, campsite_id)?;
        tx.commit()?;
        Ok(removed > 0)
    }

    /// Deletes every reservation of a campsite, returning how many went.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_reservations_for_campsite_in(conn: &Connection, campsite_id: CampsiteId) -> Result<usize> {
        Ok(conn.execute(DELETE_FOR_CAMPSITE, params![campsite_id.value()])?)
    }

    /// Deletes up to `limit` of the most recently created reservations on a
    /// campsite that cover `date`, in one bounded statement.
    ///
    /// Returns the deleted reservations, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn evict_newest_reservations_in(
        conn: &Connection,
        campsite_id: CampsiteId,
        date: NaiveDate,
        limit: u32,
    ) -> Result<Vec<Reservation>> {
        let mut stmt = conn.prepare(EVICT_NEWEST)?;
        let mut evicted = stmt
            .query_map(params![campsite_id.value(), date, limit], row_to_reservation)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        evicted.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().cmp(&a.id()))
        });
        Ok(evicted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{
        create_test_database, insert_reservation_at, seed_campsite, seed_facility,
    };
    use chrono::Duration;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 7, day).unwrap()
    }

    fn at(second: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_780_000_000 + second, 0).unwrap()
    }

    #[test]
    fn test_micros_round_trip() {
        let now = Utc.timestamp_opt(1_780_000_000, 123_456_000).unwrap();
        assert_eq!(from_micros(to_micros(now)), Some(now));
    }

    #[test]
    fn test_insert_and_get() {
        let mut db = create_test_database();
        let facility = seed_facility(&mut db);
        let campsite = seed_campsite(&mut db, facility, 2);

        let inserted = insert_reservation_at(&mut db, 7, campsite, d(5), d(9), at(0));
        let fetched = Database::get_reservation(db.connection(), inserted.id())
            .unwrap()
            .unwrap();
        assert_eq!(fetched, inserted);
        assert_eq!(fetched.check_in(), d(5));
        assert_eq!(fetched.created_at(), at(0));
    }

    #[test]
    fn test_insert_keeps_microsecond_precision() {
        let mut db = create_test_database();
        let facility = seed_facility(&mut db);
        let campsite = seed_campsite(&mut db, facility, 2);

        let stamp = at(0) + Duration::nanoseconds(1_234_567);
        let inserted = insert_reservation_at(&mut db, 7, campsite, d(5), d(9), stamp);
        let fetched = Database::get_reservation(db.connection(), inserted.id())
            .unwrap()
            .unwrap();
        assert_eq!(fetched.created_at(), inserted.created_at());
    }

    #[test]
    fn test_list_by_user_and_campsite() {
        let mut db = create_test_database();
        let facility = seed_facility(&mut db);
        let a = seed_campsite(&mut db, facility, 2);
        let b = seed_campsite(&mut db, facility, 2);

        insert_reservation_at(&mut db, 1, a, d(10), d(11), at(0));
        insert_reservation_at(&mut db, 1, b, d(3), d(4), at(1));
        insert_reservation_at(&mut db, 2, a, d(1), d(2), at(2));

        let mine = Database::list_reservations_by_user(db.connection(), UserId::new(1)).unwrap();
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].check_in(), d(3));

        let on_a = Database::list_reservations_by_campsite(db.connection(), a).unwrap();
        assert_eq!(on_a.len(), 2);
        assert_eq!(on_a[0].user_id(), UserId::new(2));
    }

    #[test]
    fn test_find_overlap_inclusive() {
        let mut db = create_test_database();
        let facility = seed_facility(&mut db);
        let campsite = seed_campsite(&mut db, facility, 5);
        insert_reservation_at(&mut db, 1, campsite, d(5), d(10), at(0));

        let overlap = |from, to| {
            Database::find_overlapping_reservation_in(
                db.connection(),
                UserId::new(1),
                campsite,
                &StayDates::new(d(from), d(to)),
            )
            .unwrap()
        };
        assert!(overlap(8, 12).is_some());
        assert!(overlap(10, 12).is_some());
        assert!(overlap(1, 5).is_some());
        assert!(overlap(11, 15).is_none());
        assert!(overlap(1, 4).is_none());

        let other_user = Database::find_overlapping_reservation_in(
            db.connection(),
            UserId::new(2),
            campsite,
            &StayDates::new(d(8), d(12)),
        )
        .unwrap();
        assert!(other_user.is_none());
    }

    #[test]
    fn test_count_taken_spots() {
        let mut db = create_test_database();
        let facility = seed_facility(&mut db);
        let campsite = seed_campsite(&mut db, facility, 5);
        insert_reservation_at(&mut db, 1, campsite, d(5), d(10), at(0));
        insert_reservation_at(&mut db, 2, campsite, d(10), d(12), at(1));

        let count = |day| Database::count_taken_spots(db.connection(), campsite, d(day)).unwrap();
        assert_eq!(count(4), 0);
        assert_eq!(count(5), 1);
        assert_eq!(count(10), 2);
        assert_eq!(count(12), 1);
        assert_eq!(count(13), 0);
    }

    #[test]
    fn test_delete_reservation() {
        let mut db = create_test_database();
        let facility = seed_facility(&mut db);
        let campsite = seed_campsite(&mut db, facility, 1);
        let reservation = insert_reservation_at(&mut db, 1, campsite, d(5), d(6), at(0));

        assert!(db.delete_reservation(reservation.id()).unwrap());
        assert!(!db.delete_reservation(reservation.id()).unwrap());
    }

    #[test]
    fn test_delete_for_user_requires_owner() {
        let mut db = create_test_database();
        let facility = seed_facility(&mut db);
        let campsite = seed_campsite(&mut db, facility, 1);
        let reservation = insert_reservation_at(&mut db, 1, campsite, d(5), d(6), at(0));

        assert!(!Database::delete_reservation_for_user_in(
            db.connection(),
            reservation.id(),
            UserId::new(2)
        )
        .unwrap());
        assert!(Database::delete_reservation_for_user_in(
            db.connection(),
            reservation.id(),
            UserId::new(1)
        )
        .unwrap());
    }

    #[test]
    fn test_delete_all_for_campsite() {
        let mut db = create_test_database();
        let facility = seed_facility(&mut db);
        let campsite = seed_campsite(&mut db, facility, 3);
        let other = seed_campsite(&mut db, facility, 3);
        insert_reservation_at(&mut db, 1, campsite, d(5), d(6), at(0));
        insert_reservation_at(&mut db, 2, campsite, d(7), d(8), at(1));
        insert_reservation_at(&mut db, 3, other, d(7), d(8), at(2));

        assert!(db.delete_reservations_for_campsite(campsite).unwrap());
        assert!(!db.delete_reservations_for_campsite(campsite).unwrap());
        assert_eq!(
            Database::list_reservations_by_campsite(db.connection(), other)
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn test_evict_newest_first() {
        let mut db = create_test_database();
        let facility = seed_facility(&mut db);
        let campsite = seed_campsite(&mut db, facility, 5);
        let oldest = insert_reservation_at(&mut db, 1, campsite, d(1), d(9), at(0));
        let middle = insert_reservation_at(&mut db, 2, campsite, d(4), d(6), at(1));
        let newest = insert_reservation_at(&mut db, 3, campsite, d(5), d(5), at(2));
        let not_covering = insert_reservation_at(&mut db, 4, campsite, d(7), d(8), at(3));

        let evicted =
            Database::evict_newest_reservations_in(db.connection(), campsite, d(5), 2).unwrap();
        let ids: Vec<_> = evicted.iter().map(Reservation::id).collect();
        assert_eq!(ids, vec![newest.id(), middle.id()]);

        let remaining: Vec<_> = Database::list_reservations_by_campsite(db.connection(), campsite)
            .unwrap()
            .iter()
            .map(Reservation::id)
            .collect();
        assert_eq!(remaining, vec![oldest.id(), not_covering.id()]);
    }

    #[test]
    fn test_evict_ties_broken_by_id() {
        let mut db = create_test_database();
        let facility = seed_facility(&mut db);
        let campsite = seed_campsite(&mut db, facility, 5);
        let first = insert_reservation_at(&mut db, 1, campsite, d(5), d(5), at(0));
        let second = insert_reservation_at(&mut db, 2, campsite, d(5), d(5), at(0));

        let evicted =
            Database::evict_newest_reservations_in(db.connection(), campsite, d(5), 1).unwrap();
        assert_eq!(evicted.len(), 1);
        assert_eq!(evicted[0].id(), second.id());
        assert!(Database::get_reservation(db.connection(), first.id())
            .unwrap()
            .is_some());
    }
}
