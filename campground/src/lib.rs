#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # campground
//!
//! Reservation and capacity consistency core for a campground booking
//! backend.
//!
//! Facilities group campsites; each campsite offers a fixed number of spots
//! per day and accepts date-range reservations from users. The library keeps
//! reservations consistent with campsite capacity and lifecycle: admission
//! checks the booking horizon and same-user overlaps, lowering capacity
//! evicts the newest reservations on overbooked days, and disabling or
//! deleting a campsite clears what depends on it.
//!
//! ## Core Types
//!
//! - [`Campsite`], [`Capacity`] and [`NewCampsite`]: bookable units
//! - [`Reservation`] and [`StayDates`]: inclusive date-range bookings
//! - [`BookingHorizon`] and [`AvailabilityCalendar`]: occupancy queries
//! - [`CampgroundService`]: the facade over every operation
//! - [`Error`] and [`Result`]: error handling types
//! - [`Logger`] and [`LogLevel`]: logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use campground::{BookingHorizon, StayDates};
//! use chrono::NaiveDate;
//!
//! let today = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
//! let horizon = BookingHorizon::new(today, 2);
//! assert_eq!(horizon.last_day(), NaiveDate::from_ymd_opt(2026, 8, 1).unwrap());
//!
//! let stay = StayDates::new(today, NaiveDate::from_ymd_opt(2026, 6, 3).unwrap());
//! assert!(horizon.validate(&stay).is_ok());
//! assert_eq!(stay.days().count(), 3);
//! ```

pub mod availability;
pub mod campsite;
pub mod clock;
pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod operations;
pub mod reservation;
pub mod service;

// Re-export key types at crate root for convenience
pub use availability::{AvailabilityCalendar, BookingHorizon, DEFAULT_HORIZON_MONTHS};
pub use campsite::{
    Campsite, CampsiteAttribute, CampsiteDetails, CampsiteId, Capacity, Facility, FacilityId,
    NewCampsite, NewCampsiteBuilder,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{Config, ConfigBuilder, OutputFormat};
pub use database::{Catalog, CatalogEntry, Database, DatabaseConfig};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use operations::{
    CampsiteDirectory, CampsiteLifecycle, CapacityReconciler, CapacityUpdate, FacilityDirectory,
    ReservationOperations, ReservationValidator, SqlDirectory,
};
pub use reservation::{NewReservation, Reservation, ReservationId, StayDates, UserId, ValidationError};
pub use service::CampgroundService;
