//! Transactional operations over the store.
//!
//! Each operation is a set of associated functions on a unit struct, taking
//! the [`Database`](crate::database::Database) and, where a cross-entity
//! check is needed, a lookup port from [`ports`]. Every mutation runs in one
//! `IMMEDIATE` transaction; returning early or with an error rolls it back.

pub mod lifecycle;
pub mod ports;
pub mod reconcile;
pub mod reserve;

#[cfg(test)]
mod proptests;

pub use lifecycle::CampsiteLifecycle;
pub use ports::{CampsiteDirectory, FacilityDirectory, SqlDirectory};
pub use reconcile::{CapacityReconciler, CapacityUpdate};
pub use reserve::{ReservationOperations, ReservationValidator};
