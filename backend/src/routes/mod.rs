//! Route definitions for the Weather News System

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Observation record routes, nested under `/api/temperature`
pub fn temperature_routes() -> Router<AppState> {
    Router::new()
        // Record CRUD
        .route(
            "/",
            get(handlers::list_observations).post(handlers::create_observation),
        )
        .route(
            "/:id",
            get(handlers::get_observation)
                .put(handlers::update_observation)
                .delete(handlers::delete_observation),
        )
        // Queries
        .route("/search/by-date/:date", get(handlers::search_by_date))
        // Analytics
        .route("/analytics/coldest", get(handlers::coldest_observation))
        .route("/analytics/stats", get(handlers::temperature_stats))
        // Seed data
        .route("/init-test-data", post(handlers::init_test_data))
}
