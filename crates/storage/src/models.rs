//! Record and result types

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;

/// Database connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite URL (`sqlite:path/to/db`) or a bare file path
    pub url: String,
    /// Pool size
    pub max_connections: u32,
    /// Open the database read-only
    pub read_only: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:Resources/hawaii.sqlite".to_string(),
            max_connections: 4,
            read_only: true,
        }
    }
}

/// One station's readings for one date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Measurement {
    pub station: String,
    pub date: String,
    pub prcp: Option<f64>,
    pub tobs: f64,
}

/// Weather station record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Station {
    pub station: String,
    pub name: String,
}

/// Station with the most measurement rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct ActiveStation {
    pub station: String,
    pub observations: i64,
}

/// Precipitation readings grouped by date.
///
/// Dates keep the order in which they were first seen, so a descending-date
/// query produces a descending-date JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrecipitationByDate {
    entries: Vec<(String, Vec<Option<f64>>)>,
    index: HashMap<String, usize>,
}

impl PrecipitationByDate {
    /// Fold `(date, prcp)` rows into per-date reading lists
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (String, Option<f64>)>,
    {
        let mut entries: Vec<(String, Vec<Option<f64>>)> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for (date, prcp) in rows {
            match index.get(&date) {
                Some(&i) => entries[i].1.push(prcp),
                None => {
                    index.insert(date.clone(), entries.len());
                    entries.push((date, vec![prcp]));
                }
            }
        }

        Self { entries, index }
    }

    /// Fold measurements into per-date reading lists
    pub fn from_measurements<I>(measurements: I) -> Self
    where
        I: IntoIterator<Item = Measurement>,
    {
        Self::from_rows(measurements.into_iter().map(|m| (m.date, m.prcp)))
    }

    /// Readings recorded on `date`
    pub fn get(&self, date: &str) -> Option<&[Option<f64>]> {
        self.index
            .get(date)
            .map(|&i| self.entries[i].1.as_slice())
    }

    pub fn dates(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(d, _)| d.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for PrecipitationByDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (date, values) in &self.entries {
            map.serialize_entry(date, values)?;
        }
        map.end()
    }
}

/// Temperature aggregates over a date range, serialized as `[min, max, avg]`.
///
/// All three are `None` when no measurement matched.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TemperatureStats {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub avg: Option<f64>,
}

impl Serialize for TemperatureStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.min, self.max, self.avg).serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(date: &str, prcp: Option<f64>) -> (String, Option<f64>) {
        (date.to_string(), prcp)
    }

    #[test]
    fn test_fold_groups_by_date() {
        let grouped = PrecipitationByDate::from_rows(vec![
            row("2017-08-23", Some(0.0)),
            row("2017-08-23", None),
            row("2017-08-22", Some(0.5)),
        ]);

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped.get("2017-08-23"), Some(&[Some(0.0), None][..]));
        assert_eq!(grouped.dates().collect::<Vec<_>>(), vec!["2017-08-23", "2017-08-22"]);
    }

    #[test]
    fn test_fold_merges_non_adjacent_dates() {
        let grouped = PrecipitationByDate::from_rows(vec![
            row("2017-08-23", Some(1.0)),
            row("2017-08-22", Some(2.0)),
            row("2017-08-23", Some(3.0)),
        ]);

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped.get("2017-08-23"), Some(&[Some(1.0), Some(3.0)][..]));
    }

    #[test]
    fn test_from_measurements_indexes_every_date() {
        let measurement = |station: &str, date: &str, prcp| Measurement {
            station: station.to_string(),
            date: date.to_string(),
            prcp,
            tobs: 70.0,
        };
        let grouped = PrecipitationByDate::from_measurements(vec![
            measurement("USC1", "2017-08-23", Some(0.2)),
            measurement("USC2", "2017-08-22", None),
            measurement("USC2", "2017-08-23", Some(0.4)),
        ]);

        assert_eq!(grouped.get("2017-08-23"), Some(&[Some(0.2), Some(0.4)][..]));
        assert_eq!(grouped.get("2017-08-22"), Some(&[None][..]));
        assert_eq!(grouped.get("2017-08-21"), None);
    }

    #[test]
    fn test_serialize_keeps_insertion_order() {
        let grouped = PrecipitationByDate::from_rows(vec![
            row("2017-08-23", Some(0.1)),
            row("2017-08-01", None),
        ]);

        let json = serde_json::to_string(&grouped).unwrap();
        assert_eq!(json, r#"{"2017-08-23":[0.1],"2017-08-01":[null]}"#);
    }

    #[test]
    fn test_stats_serialize_as_triple() {
        let stats = TemperatureStats {
            min: Some(56.0),
            max: Some(87.0),
            avg: Some(74.5),
        };
        assert_eq!(serde_json::to_string(&stats).unwrap(), "[56.0,87.0,74.5]");

        let empty = TemperatureStats::default();
        assert_eq!(serde_json::to_string(&empty).unwrap(), "[null,null,null]");
    }
}
