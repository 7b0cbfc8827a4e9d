//! Station Routes

use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::info;

use crate::{error::ApiError, AppState};

/// `[station_id, name]` pairs for every station
pub async fn get_stations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<(String, String)>>, ApiError> {
    let stations = state.repository.stations().await?;

    info!("Station query successful ({} stations)", stations.len());
    super::record_query("stations");
    Ok(Json(
        stations.into_iter().map(|s| (s.station, s.name)).collect(),
    ))
}
