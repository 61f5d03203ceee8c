//! Geographic bounding regions
//!
//! Used for datum areas of use and for checking whether a point falls
//! inside a definition's validity extent. Coordinates are decimal
//! degrees, longitude east-positive.

/// A rectangular lon/lat region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingRegion {
    /// Western edge (degrees)
    pub min_lon: f64,
    /// Southern edge (degrees)
    pub min_lat: f64,
    /// Eastern edge (degrees)
    pub max_lon: f64,
    /// Northern edge (degrees)
    pub max_lat: f64,
}

impl BoundingRegion {
    /// Creates a bounding region
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        BoundingRegion {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    /// The whole earth
    pub fn world() -> Self {
        BoundingRegion::new(-180.0, -90.0, 180.0, 90.0)
    }

    /// Width in degrees of longitude
    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// Height in degrees of latitude
    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Checks if the region contains a lon/lat point (edges inclusive)
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        lon >= self.min_lon && lon <= self.max_lon && lat >= self.min_lat && lat <= self.max_lat
    }
}
