//! # Butterfly-visit Library
//!
//! Turns a list of addresses into an ordered visiting route and a shareable
//! Google Maps directions link.
//!
//! ## Features
//!
//! - **Deterministic routing**: greedy nearest-neighbor tour anchored on the first address
//! - **Nothing dropped**: addresses that cannot be located follow the tour in their original order
//! - **Nominatim geocoding**: paced, retrying OpenStreetMap lookups behind a [`Geocoder`] trait
//! - **Spreadsheet input**: CSV exports filtered by owner, with "did you mean" hints
//! - **Plain artifacts**: a one-label-per-line route file and a directions URL
//!
//! ## Basic Usage
//!
//! ```rust
//! use butterfly_visit::{plan_route, directions_link, LinkConfig, Point};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let route = plan_route(vec![
//!     Point::new(10.0, 10.0, "Rua A"),
//!     Point::unlocated("Rua Desconhecida"),
//!     Point::new(12.0, 10.0, "Rua C"),
//!     Point::new(10.0, 11.0, "Rua B"),
//! ]);
//! assert_eq!(route.labels(), ["Rua A", "Rua B", "Rua C", "Rua Desconhecida"]);
//!
//! let link = directions_link(route.labels(), &LinkConfig::default())?;
//! assert!(link.unwrap().ends_with("/dir/Rua%20A/Rua%20B/Rua%20C/Rua%20Desconhecida"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Planning From A Spreadsheet
//!
//! ```rust,no_run
//! use butterfly_visit::{GeocoderConfig, NominatimGeocoder, PlanOptions, Sheet, SheetConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let sheet = Sheet::from_path("visits.csv".as_ref(), &SheetConfig::default())?;
//! let geocoder = NominatimGeocoder::new(GeocoderConfig::default())?;
//!
//! let plan = butterfly_visit::plan_for_owner(&sheet, "Ana", &geocoder, &PlanOptions::default()).await?;
//! if let Some(link) = plan.link {
//!     println!("{link}");
//! }
//! # Ok(())
//! # }
//! ```

pub use crate::core::error::{Error, Result};
pub use crate::core::{
    assemble, directions_link, geocode_rows, link_from_route_file, nearest_neighbor, partition,
    plan_for_owner, plan_route, tour_length, tour_order, Coordinate, GeocodeOutcome, GeocodedRow,
    Geocoder, GeocoderConfig, LinkConfig, LocatedPoint, NominatimGeocoder, Partition, PlanOptions,
    Point, ProgressCallback, Route, RoutePlan, Sheet, SheetConfig, SheetRow, Throttle,
    DEFAULT_ROUTE_FILE,
};

// Internal modules
mod core;
