//! City bucketing over a fixed, ordered registry of metro centers.

use serde::Serialize;

use crate::geo::{self, Coordinate};

/// Classification radius shared by every registered city, in kilometers.
pub const CITY_RADIUS_KM: f64 = 30.0;

/// A named city region: stable key plus fixed center coordinate.
pub struct CityRegion {
    pub key: &'static str,
    pub center: Coordinate,
}

/// The city registry.
///
/// Declaration order is part of the contract: [`classify_city`] returns
/// the first region whose circle contains the coordinate, so overlapping
/// circles resolve by position in this table, not by proximity. Malmö is
/// listed before Lund and their centers sit ~16 km apart; coordinates in
/// that overlap — Lund's own center included — bucket as `malmo`.
pub const CITY_REGIONS: &[CityRegion] = &[
    CityRegion { key: "stockholm", center: Coordinate { lat: 59.3293, lng: 18.0686 } },
    CityRegion { key: "gothenburg", center: Coordinate { lat: 57.7089, lng: 11.9746 } },
    CityRegion { key: "malmo", center: Coordinate { lat: 55.6050, lng: 13.0038 } },
    CityRegion { key: "uppsala", center: Coordinate { lat: 59.8586, lng: 17.6389 } },
    CityRegion { key: "vasteras", center: Coordinate { lat: 59.6099, lng: 16.5448 } },
    CityRegion { key: "orebro", center: Coordinate { lat: 59.2753, lng: 15.2134 } },
    CityRegion { key: "linkoping", center: Coordinate { lat: 58.4109, lng: 15.6216 } },
    CityRegion { key: "helsingborg", center: Coordinate { lat: 56.0465, lng: 12.6945 } },
    CityRegion { key: "lund", center: Coordinate { lat: 55.7047, lng: 13.1910 } },
    CityRegion { key: "jonkoping", center: Coordinate { lat: 57.7826, lng: 14.1618 } },
];

/// Bucket a coordinate into a city key.
///
/// First registry entry (declared order) within [`CITY_RADIUS_KM`] wins;
/// `None` if no circle contains the coordinate.
pub fn classify_city(coord: Coordinate) -> Option<&'static str> {
    CITY_REGIONS
        .iter()
        .find(|region| geo::distance(coord, region.center) <= CITY_RADIUS_KM)
        .map(|region| region.key)
}

/// Whether a coordinate falls inside the allowed city set.
///
/// An empty `allowed` slice means no location filter is active and every
/// coordinate passes. Otherwise the coordinate must classify into one of
/// the allowed keys.
pub fn is_in_cities(coord: Coordinate, allowed: &[String]) -> bool {
    if allowed.is_empty() {
        return true;
    }
    match classify_city(coord) {
        Some(key) => allowed.iter().any(|a| a == key),
        None => false,
    }
}

/// A registry entry for the public city list API.
#[derive(Debug, Clone, Serialize)]
pub struct CityInfo {
    pub key: String,
    pub lat: f64,
    pub lng: f64,
}

/// The full registry, in declaration order (for autocomplete / API).
pub fn city_list() -> Vec<CityInfo> {
    CITY_REGIONS
        .iter()
        .map(|region| CityInfo {
            key: region.key.to_string(),
            lat: region.center.lat,
            lng: region.center.lng,
        })
        .collect()
}
