//! Temperature Observation Routes

use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::info;

use crate::{error::ApiError, AppState};

/// Last year of temperature observations from the most active station
pub async fn get_tobs(State(state): State<Arc<AppState>>) -> Result<Json<Vec<f64>>, ApiError> {
    let tobs = state.repository.tobs_last_year().await?;

    info!("tobs query successful ({} observations)", tobs.len());
    super::record_query("tobs");
    Ok(Json(tobs))
}
