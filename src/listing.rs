//! The directory entry type and the combined time/location filter.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::availability::{is_business_open, is_event_open, Business, Event};
use crate::cities;
use crate::geo::{self, Coordinate};

/// A directory entry.
///
/// The kind tag is explicit in the data (`"kind": "business" | "event"`),
/// so evaluation pattern-matches instead of probing for field presence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Listing {
    Business(Business),
    Event(Event),
}

impl Listing {
    pub fn name(&self) -> &str {
        match self {
            Listing::Business(business) => &business.name,
            Listing::Event(event) => &event.name,
        }
    }

    /// The listing's normalized coordinate, if its raw location value has
    /// a recognizable shape.
    pub fn coordinate(&self) -> Option<Coordinate> {
        let raw = match self {
            Listing::Business(business) => business.location.as_ref(),
            Listing::Event(event) => event.location.as_ref(),
        };
        raw.and_then(geo::normalize)
    }

    /// Whether this listing is open at `now`.
    pub fn is_open(&self, now: NaiveDateTime) -> bool {
        match self {
            Listing::Business(business) => is_business_open(business, now),
            Listing::Event(event) => is_event_open(event, now),
        }
    }
}

/// Filter criteria applied to a catalog.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingFilter {
    /// Allowed city keys. Empty means no location filter.
    #[serde(default)]
    pub cities: Vec<String>,
    /// Keep only listings open at the evaluation instant.
    #[serde(default)]
    pub open_now: bool,
}

/// Apply a filter to a slice of listings, preserving catalog order.
///
/// With a non-empty city set, listings whose location is missing or
/// unrecognizable are excluded — no city, no match.
pub fn filter_listings<'a>(
    listings: &'a [Listing],
    filter: &ListingFilter,
    now: NaiveDateTime,
) -> Vec<&'a Listing> {
    listings
        .iter()
        .filter(|listing| matches(listing, filter, now))
        .collect()
}

fn matches(listing: &Listing, filter: &ListingFilter, now: NaiveDateTime) -> bool {
    if !filter.cities.is_empty() {
        let in_cities = listing
            .coordinate()
            .map(|coord| cities::is_in_cities(coord, &filter.cities))
            .unwrap_or(false);
        if !in_cities {
            return false;
        }
    }
    if filter.open_now && !listing.is_open(now) {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::availability::{DayWindow, WeeklySchedule};
    use chrono::NaiveDate;
    use serde_json::json;

    fn at(y: i32, m: u32, d: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn all_day_every_day() -> WeeklySchedule {
        let window = DayWindow {
            start: "00:00".to_string(),
            end: "23:59".to_string(),
        };
        WeeklySchedule([
            Some(window.clone()),
            Some(window.clone()),
            Some(window.clone()),
            Some(window.clone()),
            Some(window.clone()),
            Some(window.clone()),
            Some(window),
        ])
    }

    fn sample_catalog() -> Vec<Listing> {
        vec![
            // Open around the clock, in central Stockholm.
            Listing::Business(Business {
                name: "Kafé Norr".to_string(),
                schedule: Some(all_day_every_day()),
                location: Some(json!({"lat": 59.33, "lng": 18.07})),
            }),
            // No schedule (always open), no usable location.
            Listing::Business(Business {
                name: "Nattöppet".to_string(),
                schedule: None,
                location: Some(json!("somewhere")),
            }),
            // Evening event in Lund's overlap zone — buckets as malmo.
            Listing::Event(Event {
                name: "Kvällskonsert".to_string(),
                start_date: "2026-08-05".to_string(),
                start_time: "19:00".to_string(),
                end_date: None,
                end_time: None,
                repeats: false,
                location: Some(json!([55.7047, 13.1910])),
            }),
        ]
    }

    #[test]
    fn test_listing_roundtrips_with_kind_tag() {
        let raw = r#"{
            "kind": "event",
            "name": "Loppis",
            "start_date": "2026-08-08",
            "start_time": "9:00",
            "location": [59.3293, 18.0686]
        }"#;
        let listing: Listing = serde_json::from_str(raw).unwrap();
        assert!(matches!(listing, Listing::Event(_)));
        assert_eq!(listing.name(), "Loppis");

        let encoded = serde_json::to_value(&listing).unwrap();
        assert_eq!(encoded["kind"], "event");
    }

    #[test]
    fn test_no_filter_keeps_everything() {
        let catalog = sample_catalog();
        let filter = ListingFilter::default();
        let matched = filter_listings(&catalog, &filter, at(2026, 8, 5, 12, 0));
        assert_eq!(matched.len(), 3);
    }

    #[test]
    fn test_city_filter_excludes_unlocatable_listings() {
        let catalog = sample_catalog();
        let filter = ListingFilter {
            cities: vec!["stockholm".to_string(), "malmo".to_string()],
            open_now: false,
        };
        let matched = filter_listings(&catalog, &filter, at(2026, 8, 5, 12, 0));
        let names: Vec<&str> = matched.iter().map(|l| l.name()).collect();
        assert_eq!(names, vec!["Kafé Norr", "Kvällskonsert"]);
    }

    #[test]
    fn test_city_filter_respects_registry_buckets() {
        let catalog = sample_catalog();
        // The concert's coordinate is Lund's center, but it buckets as
        // malmo by registry order — asking for "lund" misses it.
        let filter = ListingFilter {
            cities: vec!["lund".to_string()],
            open_now: false,
        };
        let matched = filter_listings(&catalog, &filter, at(2026, 8, 5, 12, 0));
        assert!(matched.is_empty());
    }

    #[test]
    fn test_open_now_filter() {
        let catalog = sample_catalog();
        let filter = ListingFilter {
            cities: vec![],
            open_now: true,
        };
        // Noon: café and schedule-less business are open, concert is not.
        let matched = filter_listings(&catalog, &filter, at(2026, 8, 5, 12, 0));
        let names: Vec<&str> = matched.iter().map(|l| l.name()).collect();
        assert_eq!(names, vec!["Kafé Norr", "Nattöppet"]);

        // Evening: all three.
        let matched = filter_listings(&catalog, &filter, at(2026, 8, 5, 20, 0));
        assert_eq!(matched.len(), 3);
    }

    #[test]
    fn test_combined_filters() {
        let catalog = sample_catalog();
        let filter = ListingFilter {
            cities: vec!["malmo".to_string()],
            open_now: true,
        };
        assert!(filter_listings(&catalog, &filter, at(2026, 8, 5, 12, 0)).is_empty());
        let matched = filter_listings(&catalog, &filter, at(2026, 8, 5, 20, 0));
        let names: Vec<&str> = matched.iter().map(|l| l.name()).collect();
        assert_eq!(names, vec!["Kvällskonsert"]);
    }
}
