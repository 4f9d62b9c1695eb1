//! Core library modules for butterfly-visit
//!
//! This module contains the internal implementation details of the butterfly-visit library.

pub mod assembler;
pub mod error;
pub mod geocoder;
pub mod link;
pub mod planner;
pub mod point;
pub mod router;
pub mod sheet;

// Re-export main types for internal use
pub use assembler::{assemble, Route, DEFAULT_ROUTE_FILE};
pub use geocoder::{GeocodeOutcome, Geocoder, GeocoderConfig, NominatimGeocoder, Throttle};
pub use link::{directions_link, link_from_route_file, LinkConfig};
pub use planner::{geocode_rows, plan_for_owner, plan_route, GeocodedRow, PlanOptions, ProgressCallback, RoutePlan};
pub use point::{partition, Coordinate, LocatedPoint, Partition, Point};
pub use router::{nearest_neighbor, tour_length, tour_order};
pub use sheet::{Sheet, SheetConfig, SheetRow};
