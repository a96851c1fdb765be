use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};
use tracing::error;

use crate::error::{ProxyError, relay_upstream};
use crate::extract::{FLIGHT_SEARCH, TRAIN_SEARCH};
use crate::search::run_search;

use super::AppState;
use super::models::{ItemsResponse, PlacesQuery, StationQuery};

type HandlerResult = Result<Response, ProxyError>;

pub async fn places(
    State(state): State<AppState>,
    Query(params): Query<PlacesQuery>,
) -> HandlerResult {
    let iata = params.iata.unwrap_or_default().trim().to_uppercase();
    // Mirror the client-side length check; no upstream call for bad codes.
    if iata.chars().count() != 3 {
        return Ok(Json(ItemsResponse::empty()).into_response());
    }

    match state.api.places_by_iata(&iata).await {
        Ok(items) => Ok(Json(ItemsResponse::new(items)).into_response()),
        Err(ProxyError::Upstream { status, .. }) => {
            let code = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            Ok((code, Json(ItemsResponse::empty())).into_response())
        }
        Err(err) => Err(err),
    }
}

pub async fn flight_search(
    State(state): State<AppState>,
    body: Option<Json<Value>>,
) -> HandlerResult {
    let body = body.map(|Json(v)| v).unwrap_or(Value::Null);
    let offers = run_search(&state.api, &FLIGHT_SEARCH, body).await?;
    Ok(Json(offers).into_response())
}

pub async fn train_search(
    State(state): State<AppState>,
    body: Option<Json<Value>>,
) -> HandlerResult {
    let body = body.map(|Json(v)| v).unwrap_or(Value::Null);
    let offers = run_search(&state.api, &TRAIN_SEARCH, body).await?;
    Ok(Json(offers).into_response())
}

pub async fn train_station_suggestions(
    State(state): State<AppState>,
    Query(params): Query<StationQuery>,
) -> HandlerResult {
    let name = params.name.unwrap_or_default().trim().to_string();
    if name.chars().count() < 3 {
        return Ok(Json(ItemsResponse::empty()).into_response());
    }

    match state.api.station_suggestions(&name).await {
        Ok(items) => Ok(Json(ItemsResponse::new(items)).into_response()),
        Err(err) => {
            error!("error fetching train station suggestions: {err}");
            Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "items": [], "error": err.to_string() })),
            )
                .into_response())
        }
    }
}

pub async fn create_booking(
    State(state): State<AppState>,
    body: Option<Json<Value>>,
) -> HandlerResult {
    let payload = require_object(body)?;

    let resp = state.api.create_booking(&payload).await?;
    if !(200..300).contains(&resp.status) {
        error!("booking failed: {} - {}", resp.status, resp.body);
        return Ok(relay_upstream(
            resp.status,
            &resp.body,
            "Booking creation failed",
        ));
    }

    let code = StatusCode::from_u16(resp.status).unwrap_or(StatusCode::OK);
    match serde_json::from_str::<Value>(&resp.body) {
        Ok(value) => Ok((code, Json(value)).into_response()),
        Err(_) => Ok((
            code,
            Json(json!({
                "message": "Booking successful, but response format was unexpected.",
                "raw_response": resp.body,
            })),
        )
            .into_response()),
    }
}

pub async fn request_cancellation(
    State(state): State<AppState>,
    body: Option<Json<Value>>,
) -> HandlerResult {
    let payload = require_object(body)?;
    if payload.get("bookingId").is_none() {
        return Err(ProxyError::BadRequest(
            "Invalid JSON or missing bookingId".to_string(),
        ));
    }

    // Timeout and network failures map to 504/503 in the error layer.
    let resp = state.api.request_cancellation(&payload).await?;
    Ok(relay_upstream(
        resp.status,
        &resp.body,
        "Cancellation request failed",
    ))
}

pub async fn confirm_cancellation(
    State(state): State<AppState>,
    Path(booking_id): Path<String>,
    body: Option<Json<Value>>,
) -> HandlerResult {
    let payload = require_object(body)?;

    let resp = state
        .api
        .confirm_cancellation(&booking_id, &payload)
        .await?;
    Ok(relay_upstream(
        resp.status,
        &resp.body,
        "Confirm cancellation failed",
    ))
}

pub async fn db_data(State(state): State<AppState>) -> HandlerResult {
    let rows = state.db.recent_bookings(20).await?;
    Ok(Json(rows).into_response())
}

fn require_object(body: Option<Json<Value>>) -> Result<Value, ProxyError> {
    let payload = body.map(|Json(v)| v).unwrap_or(Value::Null);
    match payload.as_object() {
        Some(fields) if !fields.is_empty() => Ok(payload),
        _ => Err(ProxyError::BadRequest("Invalid JSON".to_string())),
    }
}
