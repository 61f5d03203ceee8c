//! Angle conversion helpers
//!
//! Grid shift files store coordinates in arc-seconds with longitude
//! counted positive towards the west, so the hot path converts between
//! decimal degrees and that convention constantly.

/// Arc-seconds per degree
pub const SECONDS_PER_DEGREE: f64 = 3600.0;

/// Converts decimal degrees to arc-seconds
pub fn degrees_to_seconds(degrees: f64) -> f64 {
    degrees * SECONDS_PER_DEGREE
}

/// Converts arc-seconds to decimal degrees
pub fn seconds_to_degrees(seconds: f64) -> f64 {
    seconds / SECONDS_PER_DEGREE
}

/// Converts an east-positive longitude in degrees to the grid
/// convention (arc-seconds, positive west)
pub fn longitude_to_grid_seconds(lon_degrees: f64) -> f64 {
    -lon_degrees * SECONDS_PER_DEGREE
}

/// Converts a grid-convention longitude back to east-positive degrees
pub fn grid_seconds_to_longitude(lon_seconds: f64) -> f64 {
    -lon_seconds / SECONDS_PER_DEGREE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degree_second_round_trip() {
        let lat = 51.1789;
        assert!((seconds_to_degrees(degrees_to_seconds(lat)) - lat).abs() < 1e-12);
    }

    #[test]
    fn test_grid_longitude_is_positive_west() {
        // 120°W is stored as +432000 arc-seconds
        assert_eq!(longitude_to_grid_seconds(-120.0), 432000.0);
        assert_eq!(grid_seconds_to_longitude(432000.0), -120.0);
    }
}
