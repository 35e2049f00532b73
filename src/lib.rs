//! Locus — availability and proximity engine for a local listings directory.
//!
//! Decides whether a listed business or event is open at a given instant
//! and buckets coordinates into named city regions for proximity
//! filtering. The core is pure and synchronous: every evaluation takes
//! an injected "now" and collapses malformed input to a closed/unmatched
//! result instead of failing.
//!
//! - [`geo`] — haversine distance and coordinate shape normalization
//! - [`cities`] — ordered city registry and first-match classification
//! - [`availability`] — open/closed evaluation against an injected clock
//! - [`listing`] — the tagged directory entry and the combined filter
//! - [`catalog`] — listings file loading
//! - [`server`] — HTTP API surface

pub mod availability;
pub mod catalog;
pub mod cities;
pub mod geo;
pub mod listing;
pub mod server;

pub use availability::{is_business_open, is_event_open, Business, Event, WeeklySchedule};
pub use cities::{classify_city, is_in_cities, CITY_RADIUS_KM};
pub use geo::{distance, normalize, Coordinate};
pub use listing::{filter_listings, Listing, ListingFilter};
