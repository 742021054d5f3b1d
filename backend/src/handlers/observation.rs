//! HTTP handlers for observation record endpoints
//!
//! Thin translation layer: parse the request, call the observation
//! service, wrap the result in the JSON envelope. Mutations are logged
//! here so the service stays free of observability concerns.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use shared::types::ApiResponse;

use crate::error::{AppError, AppResult};
use crate::extract::ApiJson;
use crate::services::observation::{
    AddObservationInput, Observation, ObservationService, TemperatureStats,
    UpdateObservationInput,
};
use crate::AppState;

/// List all observations, newest measurement first
pub async fn list_observations(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<Observation>>>> {
    let service = ObservationService::new(state.db.clone());
    let observations = service.list().await?;
    Ok(Json(ApiResponse::success(observations)))
}

/// Get a single observation by ID
pub async fn get_observation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Observation>>> {
    let id = parse_observation_id(&id)?;
    let service = ObservationService::new(state.db.clone());
    let observation = service.get(id).await?;
    Ok(Json(ApiResponse::success(observation)))
}

/// Create a new observation
pub async fn create_observation(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<AddObservationInput>,
) -> AppResult<(StatusCode, Json<ApiResponse<Observation>>)> {
    let service = ObservationService::new(state.db.clone());
    let observation = service.add(input).await?;

    tracing::info!(
        id = %observation.id,
        region = %observation.region,
        temperature = %observation.temperature,
        "observation recorded"
    );

    Ok((StatusCode::CREATED, Json(ApiResponse::success(observation))))
}

/// Apply a partial update to an observation
pub async fn update_observation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(input): ApiJson<UpdateObservationInput>,
) -> AppResult<Json<ApiResponse<Observation>>> {
    let id = parse_observation_id(&id)?;
    let service = ObservationService::new(state.db.clone());
    let observation = service.update(id, input).await?;

    tracing::info!(
        id = %observation.id,
        region = %observation.region,
        temperature = %observation.temperature,
        "observation updated"
    );

    Ok(Json(ApiResponse::success(observation)))
}

/// Delete an observation, returning the removed record
pub async fn delete_observation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Observation>>> {
    let id = parse_observation_id(&id)?;
    let service = ObservationService::new(state.db.clone());
    let observation = service.delete(id).await?;

    tracing::info!(
        id = %observation.id,
        region = %observation.region,
        "observation deleted"
    );

    Ok(Json(ApiResponse::success(observation)))
}

/// Get all observations on one calendar day, coldest first
pub async fn search_by_date(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<Observation>>>> {
    let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d").map_err(|_| {
        AppError::ValidationError(format!("invalid date: {} (expected YYYY-MM-DD)", date))
    })?;

    let service = ObservationService::new(state.db.clone());
    let observations = service.search_by_date(date).await?;
    Ok(Json(ApiResponse::success(observations)))
}

/// Get the record with the global minimum temperature
pub async fn coldest_observation(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Option<Observation>>>> {
    let service = ObservationService::new(state.db.clone());
    let coldest = service.coldest().await?;
    Ok(Json(ApiResponse::success(coldest)))
}

/// Get aggregate temperature statistics
pub async fn temperature_stats(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<TemperatureStats>>> {
    let service = ObservationService::new(state.db.clone());
    let stats = service.stats().await?;
    Ok(Json(ApiResponse::success(stats)))
}

/// Summary returned by the reseed endpoint
#[derive(Debug, Serialize)]
pub struct SeedSummary {
    pub inserted: u64,
}

/// Wipe the store and repopulate it with the fixed seed set
pub async fn init_test_data(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<SeedSummary>>> {
    let service = ObservationService::new(state.db.clone());
    let inserted = service.reset_with_seed_data().await?;

    tracing::info!(inserted, "store reset with seed data");

    Ok(Json(ApiResponse::success(SeedSummary { inserted })))
}

fn parse_observation_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw)
        .map_err(|_| AppError::ValidationError(format!("invalid observation id: {}", raw)))
}
