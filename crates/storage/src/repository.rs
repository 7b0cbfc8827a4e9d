//! Repository Implementation

use crate::models::{
    ActiveStation, DatabaseConfig, Measurement, PrecipitationByDate, Station, TemperatureStats,
};
use crate::{StorageError, DATE_FORMAT};
use chrono::{Days, NaiveDate};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::{debug, info};

/// Length of the trailing window used by the last-year queries
pub const CUTOFF_DAYS: u64 = 365;

/// Start of the trailing window ending at `latest`
pub fn cutoff_from(latest: &str) -> Result<String, StorageError> {
    let date = NaiveDate::parse_from_str(latest, DATE_FORMAT)
        .map_err(|_| StorageError::InvalidDate(latest.to_string()))?;

    date.checked_sub_days(Days::new(CUTOFF_DAYS))
        .map(|d| d.format(DATE_FORMAT).to_string())
        .ok_or_else(|| StorageError::InvalidDate(latest.to_string()))
}

/// Read-only repository over the climate database.
///
/// Every query checks a connection out of the pool and returns it when the
/// query future completes, so handlers never share a live connection.
#[derive(Debug, Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Open the database described by `config`
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StorageError> {
        info!(
            "Opening climate database {} (read_only={})",
            config.url, config.read_only
        );

        let options = if config.url.starts_with("sqlite:") {
            SqliteConnectOptions::from_str(&config.url)?
        } else {
            SqliteConnectOptions::new().filename(&config.url)
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections.max(1))
            .connect_with(options.read_only(config.read_only).create_if_missing(false))
            .await?;

        Ok(Self::from_pool(pool))
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Check that the database answers
    pub async fn ping(&self) -> Result<(), StorageError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Most recent measurement date
    pub async fn latest_date(&self) -> Result<String, StorageError> {
        let latest: Option<String> = sqlx::query_scalar("SELECT MAX(date) FROM measurement")
            .fetch_one(&self.pool)
            .await?;

        latest.ok_or(StorageError::NoData)
    }

    /// First date of the trailing window ending at the latest measurement
    pub async fn cutoff_date(&self) -> Result<String, StorageError> {
        let latest = self.latest_date().await?;
        let cutoff = cutoff_from(&latest)?;
        debug!("Latest measurement {}, window starts {}", latest, cutoff);
        Ok(cutoff)
    }

    /// Precipitation readings for the last year of data, newest date first
    pub async fn precipitation_last_year(&self) -> Result<PrecipitationByDate, StorageError> {
        let cutoff = self.cutoff_date().await?;

        let rows = sqlx::query_as::<_, Measurement>(
            r#"
            SELECT station, date, prcp, tobs FROM measurement
            WHERE date >= ?
            ORDER BY date DESC, rowid ASC
            "#,
        )
        .bind(&cutoff)
        .fetch_all(&self.pool)
        .await?;

        debug!("Fetched {} precipitation rows since {}", rows.len(), cutoff);
        Ok(PrecipitationByDate::from_measurements(rows))
    }

    /// All stations
    pub async fn stations(&self) -> Result<Vec<Station>, StorageError> {
        let stations = sqlx::query_as::<_, Station>(
            "SELECT station, name FROM station ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(stations)
    }

    /// Station with the most measurement rows across the whole table.
    ///
    /// Equal counts resolve to the lexicographically smallest station id.
    pub async fn most_active_station(&self) -> Result<ActiveStation, StorageError> {
        let active = sqlx::query_as::<_, ActiveStation>(
            r#"
            SELECT station, COUNT(*) AS observations
            FROM measurement
            GROUP BY station
            ORDER BY observations DESC, station ASC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        active.ok_or(StorageError::NoData)
    }

    /// Temperature observations of the most active station for the last year
    pub async fn tobs_last_year(&self) -> Result<Vec<f64>, StorageError> {
        let cutoff = self.cutoff_date().await?;
        let active = self.most_active_station().await?;
        debug!(
            "Most active station {} ({} observations)",
            active.station, active.observations
        );

        let tobs: Vec<f64> = sqlx::query_scalar(
            r#"
            SELECT tobs FROM measurement
            WHERE station = ? AND date >= ?
            ORDER BY date ASC, rowid ASC
            "#,
        )
        .bind(&active.station)
        .bind(&cutoff)
        .fetch_all(&self.pool)
        .await?;

        Ok(tobs)
    }

    /// MIN, MAX and AVG of `tobs` for dates in `[start, end]`, or from `start`
    /// onwards when `end` is `None`
    pub async fn temperature_stats(
        &self,
        start: &str,
        end: Option<&str>,
    ) -> Result<TemperatureStats, StorageError> {
        let (min, max, avg): (Option<f64>, Option<f64>, Option<f64>) = match end {
            Some(end) => {
                sqlx::query_as(
                    r#"
                    SELECT MIN(tobs), MAX(tobs), AVG(tobs) FROM measurement
                    WHERE date >= ? AND date <= ?
                    "#,
                )
                .bind(start)
                .bind(end)
                .fetch_one(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as(
                    "SELECT MIN(tobs), MAX(tobs), AVG(tobs) FROM measurement WHERE date >= ?",
                )
                .bind(start)
                .fetch_one(&self.pool)
                .await?
            }
        };

        Ok(TemperatureStats { min, max, avg })
    }
}
