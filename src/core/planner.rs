//! Route planning pipeline
//!
//! Ties the pieces together: sheet rows are geocoded in order, turned into
//! points, split, routed, assembled, persisted and linked.

use std::path::PathBuf;
use std::sync::Arc;

use log::{debug, info};

use crate::core::assembler::{assemble, Route, DEFAULT_ROUTE_FILE};
use crate::core::error::Result;
use crate::core::geocoder::{GeocodeOutcome, Geocoder};
use crate::core::link::{link_from_route_file, LinkConfig};
use crate::core::point::{partition, Partition, Point};
use crate::core::router::{nearest_neighbor, tour_length};
use crate::core::sheet::{Sheet, SheetRow};

/// Progress callback function type, receives (done, total)
pub type ProgressCallback = Arc<dyn Fn(u64, u64) + Send + Sync>;

/// Options for planning a route
pub struct PlanOptions {
    /// Where the route artifact is written
    pub route_path: PathBuf,

    /// Directions link settings
    pub link: LinkConfig,

    /// Optional geocoding progress callback
    pub progress: Option<ProgressCallback>,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            route_path: PathBuf::from(DEFAULT_ROUTE_FILE),
            link: LinkConfig::default(),
            progress: None,
        }
    }
}

/// A sheet row together with its geocoding result
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedRow {
    pub row: SheetRow,
    pub outcome: GeocodeOutcome,
}

impl GeocodedRow {
    /// The routing point; its label is the address as typed in the sheet
    pub fn point(&self) -> Point {
        let (lat, lon) = self.outcome.coordinates();
        Point::from_raw(lat, lon, self.row.address.clone())
    }
}

/// Everything produced for one owner
#[derive(Debug, Clone)]
pub struct RoutePlan {
    pub owner: String,
    pub rows: Vec<GeocodedRow>,
    pub route: Route,
    /// `None` when fewer than two addresses are available
    pub link: Option<String>,
}

impl RoutePlan {
    pub fn located_count(&self) -> usize {
        self.rows.iter().filter(|r| r.point().is_located()).count()
    }
}

/// Order points into a route: nearest-neighbor tour, then unlocated points
pub fn plan_route(points: Vec<Point>) -> Route {
    let Partition { located, unlocated } = partition(points);
    let tour = nearest_neighbor(&located);
    debug!(
        "Tour over {} located points, length {:.5}°, {} unlocated",
        tour.len(),
        tour_length(&tour),
        unlocated.len()
    );
    assemble(&tour, &unlocated)
}

/// Resolve rows one at a time, in order
pub async fn geocode_rows<G: Geocoder>(
    geocoder: &G,
    rows: &[&SheetRow],
    progress: Option<&ProgressCallback>,
) -> Vec<GeocodedRow> {
    let total = rows.len() as u64;
    let mut geocoded = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let outcome = geocoder.resolve(&row.address).await;
        geocoded.push(GeocodedRow {
            row: (*row).clone(),
            outcome,
        });

        if let Some(progress) = progress {
            progress(i as u64 + 1, total);
        }
    }

    geocoded
}

/// Build, persist and link the route for one owner
pub async fn plan_for_owner<G: Geocoder>(
    sheet: &Sheet,
    owner: &str,
    geocoder: &G,
    options: &PlanOptions,
) -> Result<RoutePlan> {
    let rows = sheet.rows_for(owner)?;
    info!("Planning route for '{}' over {} addresses", owner.trim(), rows.len());

    let geocoded = geocode_rows(geocoder, &rows, options.progress.as_ref()).await;

    let route = plan_route(geocoded.iter().map(GeocodedRow::point).collect());
    route.write_to(&options.route_path)?;
    info!(
        "Route with {} stops written to {}",
        route.len(),
        options.route_path.display()
    );

    let link = link_from_route_file(&options.route_path, &options.link)?;

    Ok(RoutePlan {
        owner: owner.trim().to_string(),
        rows: geocoded,
        route,
        link,
    })
}
