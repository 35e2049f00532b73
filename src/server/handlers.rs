use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::cities::{self, CityInfo};
use crate::geo::Coordinate;
use crate::listing::{filter_listings, Listing, ListingFilter};

use super::state::AppState;

// ─── Error response ──────────────────────────────────────────────

#[derive(Serialize)]
struct ApiErrorBody {
    error: String,
    code: u16,
}

pub(super) struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.1,
            code: self.0.as_u16(),
        };
        (self.0, Json(body)).into_response()
    }
}

fn api_error(status: StatusCode, msg: impl Into<String>) -> ApiError {
    ApiError(status, msg.into())
}

// ─── GET /api/listings ───────────────────────────────────────────

#[derive(Deserialize)]
pub struct ListingsQuery {
    /// Comma-separated city keys. Absent or empty: no location filter.
    pub cities: Option<String>,
    /// Keep only listings open at the evaluation instant.
    pub open: Option<bool>,
    /// Local wall-clock instant (YYYY-MM-DDTHH:MM). Defaults to now.
    pub at: Option<String>,
}

pub async fn listings(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListingsQuery>,
) -> Result<Json<Vec<Listing>>, Response> {
    let now = match &params.at {
        Some(raw) => NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M").map_err(|e| {
            api_error(
                StatusCode::BAD_REQUEST,
                format!("Invalid 'at' instant '{}': {}", raw, e),
            )
            .into_response()
        })?,
        None => Local::now().naive_local(),
    };

    let filter = ListingFilter {
        cities: split_city_keys(params.cities.as_deref()),
        open_now: params.open.unwrap_or(false),
    };

    let matched: Vec<Listing> = filter_listings(&state.catalog.listings, &filter, now)
        .into_iter()
        .cloned()
        .collect();

    tracing::info!(
        total = state.catalog.len(),
        matched = matched.len(),
        open = filter.open_now,
        "GET /api/listings"
    );

    Ok(Json(matched))
}

fn split_city_keys(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

// ─── GET /api/classify ───────────────────────────────────────────

#[derive(Deserialize)]
pub struct ClassifyQuery {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[derive(Serialize)]
pub struct ClassifyResponse {
    pub lat: f64,
    pub lng: f64,
    pub city: Option<String>,
}

pub async fn classify(
    Query(params): Query<ClassifyQuery>,
) -> Result<Json<ClassifyResponse>, Response> {
    let (lat, lng) = match (params.lat, params.lng) {
        (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => (lat, lng),
        _ => {
            return Err(api_error(
                StatusCode::BAD_REQUEST,
                "Provide finite 'lat' and 'lng' parameters",
            )
            .into_response())
        }
    };
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "Invalid coordinates. Lat: -90..90, Lng: -180..180",
        )
        .into_response());
    }

    let city = cities::classify_city(Coordinate::new(lat, lng));
    tracing::info!(lat, lng, city = city.unwrap_or("-"), "GET /api/classify");

    Ok(Json(ClassifyResponse {
        lat,
        lng,
        city: city.map(str::to_string),
    }))
}

// ─── GET /api/cities ─────────────────────────────────────────────

pub async fn city_list() -> Json<Vec<CityInfo>> {
    Json(cities::city_list())
}
