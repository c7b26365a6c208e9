//! CLI command implementations.
//!
//! - `facility`: add and list facilities
//! - `catalog`: add and list attribute and equipment names
//! - `campsite`: campsite lifecycle, capacity and availability
//! - `reservation`: book, list and cancel reservations

pub mod campsite;
pub mod catalog;
pub mod facility;
pub mod reservation;

pub use campsite::CampsiteCommand;
pub use catalog::CatalogCommand;
pub use facility::FacilityCommand;
pub use reservation::ReservationCommand;
