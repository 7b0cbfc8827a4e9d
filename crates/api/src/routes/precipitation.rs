//! Precipitation Routes

use axum::{extract::State, Json};
use climate_storage::PrecipitationByDate;
use std::sync::Arc;
use tracing::info;

use crate::{error::ApiError, AppState};

/// Precipitation readings by date for the last 365 days of data
pub async fn get_precipitation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PrecipitationByDate>, ApiError> {
    let data = state.repository.precipitation_last_year().await?;

    info!("Precipitation query successful ({} dates)", data.len());
    super::record_query("precipitation");
    Ok(Json(data))
}
