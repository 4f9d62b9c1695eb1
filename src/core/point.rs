//! Points and the located/unlocated partition
//!
//! A [`Point`] always carries its display label. Its coordinate is an explicit
//! `Option`; raw geocoder values are mapped onto it by [`Point::from_raw`].
//! A zero or non-finite value never becomes a [`LocatedPoint`].

/// A planar (latitude, longitude) position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Both values finite and non-zero
    pub fn is_usable(&self) -> bool {
        usable_value(self.lat) && usable_value(self.lon)
    }

    /// Straight-line distance in degree space, no geodesic correction
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        ((other.lat - self.lat).powi(2) + (other.lon - self.lon).powi(2)).sqrt()
    }
}

/// An address label with an optional coordinate
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub coordinate: Option<Coordinate>,
    pub label: String,
}

impl Point {
    /// Build a point from raw geocoder values
    ///
    /// The coordinate is kept only if both values are present, finite and
    /// non-zero. Zero is the legacy "unresolved" marker, so a genuine 0.0
    /// latitude or longitude is treated as absent too.
    pub fn from_raw(lat: Option<f64>, lon: Option<f64>, label: impl Into<String>) -> Self {
        let coordinate = match (lat, lon) {
            (Some(lat), Some(lon)) if usable_value(lat) && usable_value(lon) => {
                Some(Coordinate::new(lat, lon))
            }
            _ => None,
        };
        Self {
            coordinate,
            label: label.into(),
        }
    }

    /// Build a point from a latitude and longitude
    ///
    /// Same sentinel rules as [`Point::from_raw`]: a zero or non-finite value
    /// yields an unlocated point.
    pub fn new(lat: f64, lon: f64, label: impl Into<String>) -> Self {
        Self::from_raw(Some(lat), Some(lon), label)
    }

    pub fn unlocated(label: impl Into<String>) -> Self {
        Self {
            coordinate: None,
            label: label.into(),
        }
    }

    pub fn is_located(&self) -> bool {
        self.coordinate.is_some()
    }

    /// The located view of this point, if it has a usable coordinate
    pub fn into_located(self) -> Option<LocatedPoint> {
        let coordinate = self.coordinate.filter(Coordinate::is_usable)?;
        Some(LocatedPoint {
            coordinate,
            label: self.label,
        })
    }
}

fn usable_value(value: f64) -> bool {
    value.is_finite() && value != 0.0
}

/// A point known to have a usable coordinate
///
/// Only built through [`LocatedPoint::new`] or [`partition`], so the
/// coordinate is always finite and non-zero.
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedPoint {
    coordinate: Coordinate,
    label: String,
}

impl LocatedPoint {
    /// `None` when either value is zero or non-finite
    pub fn new(lat: f64, lon: f64, label: impl Into<String>) -> Option<Self> {
        Point::new(lat, lon, label).into_located()
    }

    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn distance_to(&self, other: &LocatedPoint) -> f64 {
        self.coordinate.distance_to(&other.coordinate)
    }
}

/// Points split by coordinate validity, each side in input order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partition {
    pub located: Vec<LocatedPoint>,
    pub unlocated: Vec<Point>,
}

/// Split points into located and unlocated, preserving relative order
///
/// Total: every input lands in exactly one side.
pub fn partition<I>(points: I) -> Partition
where
    I: IntoIterator<Item = Point>,
{
    let mut result = Partition::default();
    for point in points {
        let Point { coordinate, label } = point;
        match coordinate.filter(Coordinate::is_usable) {
            Some(coordinate) => result.located.push(LocatedPoint { coordinate, label }),
            None => result.unlocated.push(Point::unlocated(label)),
        }
    }
    result
}
