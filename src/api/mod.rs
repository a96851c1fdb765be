use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::content_api::ContentApi;
use crate::db::Database;

pub mod handlers;
pub mod models;

#[derive(Clone)]
pub struct AppState {
    pub api: Arc<ContentApi>,
    pub db: Arc<Database>,
}

pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/places", get(handlers::places))
        .route("/flight-search", post(handlers::flight_search))
        .route("/train-search", post(handlers::train_search))
        .route(
            "/train-station-suggestions",
            get(handlers::train_station_suggestions),
        )
        .route("/bookings", post(handlers::create_booking))
        .route("/cancellations/request", post(handlers::request_cancellation))
        .route(
            "/bookings/:booking_id/confirm-cancellation",
            post(handlers::confirm_cancellation),
        )
        .route("/db-data", get(handlers::db_data))
        .with_state(state)
        .layer(cors)
}
