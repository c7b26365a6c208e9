//! Capacity changes and reservation eviction.
//!
//! Lowering a campsite's capacity can leave dates with more reservations
//! than spots. Reconciliation walks every date touched by the campsite's
//! reservations in ascending order and, wherever taken spots exceed the new
//! capacity, deletes the excess starting from the most recently created
//! reservation. Evictions and the capacity write commit together.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use rusqlite::Connection;
use serde::Serialize;

use crate::availability::taken_spots;
use crate::database::Database;
use crate::error::{Error, Result};
use crate::{CampsiteId, Capacity, Reservation, ReservationId};

/// Outcome of a capacity update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapacityUpdate {
    /// Whether the new capacity was written. False when the campsite does
    /// not exist; nothing is evicted in that case.
    pub applied: bool,
    /// Reservations removed to fit the new capacity, in eviction order.
    pub evicted: Vec<Reservation>,
}

/// Applies capacity changes and evicts excess reservations.
pub struct CapacityReconciler;

impl CapacityReconciler {
    /// Sets a campsite's capacity, evicting the newest reservations on every
    /// date that would otherwise be overbooked.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataConsistency`] if an eviction removes fewer rows
    /// than required, or a database error. Nothing is changed on error.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use campground::database::{Database, DatabaseConfig};
    /// use campground::operations::CapacityReconciler;
    /// use campground::{CampsiteId, Capacity};
    ///
    /// let mut db = Database::open(DatabaseConfig::new("/tmp/campground.db")).unwrap();
    /// let update = CapacityReconciler::update_capacity(
    ///     &mut db,
    ///     CampsiteId::new(1),
    ///     Capacity::try_from(2).unwrap(),
    /// ).unwrap();
    /// for reservation in &update.evicted {
    ///     println!("evicted reservation {} of user {}", reservation.id(), reservation.user_id());
    /// }
    /// ```
    pub fn update_capacity(
        db: &mut Database,
        campsite_id: CampsiteId,
        capacity: Capacity,
    ) -> Result<CapacityUpdate> {
        let tx = db.begin_immediate()?;
        let evicted = Self::reconcile_in(&tx, campsite_id, capacity)?;

        if !Database::update_campsite_capacity_in(&tx, campsite_id, capacity)? {
            log::debug!("capacity update skipped: campsite {campsite_id} not found");
            return Ok(CapacityUpdate {
                applied: false,
                evicted: Vec::new(),
            });
        }

        tx.commit()?;
        log::info!(
            "campsite {campsite_id} capacity set to {capacity}, {} reservation(s) evicted",
            evicted.len()
        );
        Ok(CapacityUpdate {
            applied: true,
            evicted,
        })
    }

    /// Evicts reservations so that no date exceeds `capacity`. Does not
    /// write the capacity itself.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataConsistency`] if an eviction removes fewer rows
    /// than required, or a database error.
    pub fn reconcile_in(
        conn: &Connection,
        campsite_id: CampsiteId,
        capacity: Capacity,
    ) -> Result<Vec<Reservation>> {
        let reservations = Database::list_reservations_by_campsite(conn, campsite_id)?;
        if reservations.is_empty() {
            return Ok(Vec::new());
        }

        let mut evicted = Vec::new();
        for date in Self::touched_dates(&reservations) {
            let taken = Database::count_taken_spots(conn, campsite_id, date)?;
            let excess = taken.saturating_sub(capacity.value());
            if excess == 0 {
                continue;
            }

            let removed = Database::evict_newest_reservations_in(conn, campsite_id, date, excess)?;
            if removed.len() < excess as usize {
                return Err(Error::DataConsistency {
                    details: format!(
                        "campsite {campsite_id} on {date}: expected to evict {excess} reservation(s), removed {}",
                        removed.len()
                    ),
                });
            }

            log::debug!(
                "campsite {campsite_id} on {date}: {taken} taken, capacity {capacity}, evicted {excess}"
            );
            evicted.extend(removed);
        }

        Ok(evicted)
    }

    /// Computes, without touching storage, which reservations a capacity
    /// change would evict and in what order.
    ///
    /// Uses the same date walk and newest-first rule as [`Self::reconcile_in`].
    #[must_use]
    pub fn plan_evictions(reservations: &[Reservation], capacity: Capacity) -> Vec<ReservationId> {
        let mut remaining = reservations.to_vec();
        let mut plan = Vec::new();

        for date in Self::touched_dates(reservations) {
            let taken = taken_spots(&remaining, date);
            let excess = taken.saturating_sub(capacity.value()) as usize;
            if excess == 0 {
                continue;
            }

            let mut covering: Vec<&Reservation> = remaining
                .iter()
                .filter(|reservation| reservation.stay().contains(date))
                .collect();
            covering.sort_by(|a, b| {
                b.created_at()
                    .cmp(&a.created_at())
                    .then_with(|| b.id().cmp(&a.id()))
            });
            let victims: Vec<ReservationId> =
                covering.iter().take(excess).map(|r| r.id()).collect();

            remaining.retain(|reservation| !victims.contains(&reservation.id()));
            plan.extend(victims);
        }

        plan
    }

    /// Every date covered by at least one reservation, ascending, once each.
    fn touched_dates(reservations: &[Reservation]) -> BTreeSet<NaiveDate> {
        reservations
            .iter()
            .flat_map(|reservation| reservation.stay().days())
            .collect()
    }
}
