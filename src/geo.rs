//! Great-circle distance and coordinate shape normalization.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Mean Earth radius in kilometers (spherical approximation).
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Haversine great-circle distance between two coordinates, in kilometers.
///
/// Total over all finite inputs, symmetric, and exactly zero when both
/// points coincide.
pub fn distance(a: Coordinate, b: Coordinate) -> f64 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lng = (b.lng - a.lng).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (delta_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Normalize a raw location value into a [`Coordinate`].
///
/// Listings carry their location in whatever shape the submitting form
/// produced. Three shapes are recognized:
///
/// - a two-element `[lat, lng]` array,
/// - an object with numeric `lat` and `lng` fields,
/// - an object carrying a two-element `coordinates` array.
///
/// Null, unrecognized shapes, wrong arity, and non-finite numbers all
/// yield `None` so the caller can treat the listing as unlocatable.
pub fn normalize(raw: &Value) -> Option<Coordinate> {
    match raw {
        Value::Array(items) => pair(items),
        Value::Object(map) => {
            let lat = map.get("lat").and_then(finite);
            let lng = map.get("lng").and_then(finite);
            match (lat, lng) {
                (Some(lat), Some(lng)) => Some(Coordinate::new(lat, lng)),
                _ => map
                    .get("coordinates")
                    .and_then(Value::as_array)
                    .and_then(|items| pair(items)),
            }
        }
        _ => None,
    }
}

fn pair(items: &[Value]) -> Option<Coordinate> {
    if items.len() != 2 {
        return None;
    }
    let lat = finite(&items[0])?;
    let lng = finite(&items[1])?;
    Some(Coordinate::new(lat, lng))
}

fn finite(value: &Value) -> Option<f64> {
    value.as_f64().filter(|n| n.is_finite())
}
