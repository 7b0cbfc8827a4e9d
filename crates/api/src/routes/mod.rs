//! Route handlers

pub mod home;
pub mod precipitation;
pub mod stations;
pub mod temperature;
pub mod tobs;

/// Count a successful query for the Prometheus exporter
pub(crate) fn record_query(route: &'static str) {
    metrics::counter!("climate_api_queries_total", "route" => route).increment(1);
}
