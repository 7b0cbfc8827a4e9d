//! Temperature Range Routes

use axum::{
    extract::{Path, State},
    Json,
};
use climate_storage::TemperatureStats;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

use crate::{error::ApiError, validation, AppState};

/// Either `[min, max, avg]` or a validation error object
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum TemperatureResponse {
    Stats(TemperatureStats),
    Error { error: String },
}

/// Temperature aggregates from `start` onwards
pub async fn from_start(
    State(state): State<Arc<AppState>>,
    Path(start): Path<String>,
) -> Result<Json<TemperatureResponse>, ApiError> {
    temperature_range(&state, &start, None).await
}

/// Temperature aggregates between `start` and `end`, inclusive
pub async fn from_start_to_end(
    State(state): State<Arc<AppState>>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<TemperatureResponse>, ApiError> {
    temperature_range(&state, &start, Some(&end)).await
}

async fn temperature_range(
    state: &AppState,
    start: &str,
    end: Option<&str>,
) -> Result<Json<TemperatureResponse>, ApiError> {
    if let Err(err) = validation::validate_range(start, end) {
        debug!("Rejected date range {} to {:?}: {}", start, end, err);
        return Ok(Json(TemperatureResponse::Error {
            error: err.to_string(),
        }));
    }

    let stats = state.repository.temperature_stats(start, end).await?;

    match end {
        Some(_) => {
            info!("Start-End Date query successful");
            super::record_query("start_end");
        }
        None => {
            info!("Start Date query successful");
            super::record_query("start");
        }
    }

    Ok(Json(TemperatureResponse::Stats(stats)))
}
