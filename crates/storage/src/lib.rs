//! Storage Layer
//!
//! Read-only access to the climate observation store: a SQLite database
//! holding a `measurement` table (station, date, prcp, tobs) and a
//! `station` table (station, name, location). Nothing here writes to it.

mod models;
mod repository;

pub use models::{
    ActiveStation, DatabaseConfig, Measurement, PrecipitationByDate, Station, TemperatureStats,
};
pub use repository::{cutoff_from, Repository, CUTOFF_DAYS};

use thiserror::Error;

/// Date format used by the `measurement.date` column
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("No measurement data available")]
    NoData,
    #[error("Invalid date in store: {0}")]
    InvalidDate(String),
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        StorageError::DatabaseError(err.to_string())
    }
}
