//! Reference ellipsoids and geodetic/geocentric conversion
//!
//! An ellipsoid is defined by its semi-major and semi-minor axes and
//! exposes the closed-form conversions between geodetic coordinates
//! (longitude, latitude in radians, ellipsoidal height in metres) and
//! geocentric cartesian X/Y/Z, operating on a point in place.

use lazy_static::lazy_static;
use sha2::{Digest, Sha256};

use crate::crs::authority::Authority;
use crate::crs::errors::{CrsError, CrsResult};
use crate::operation::point::OperationPoint;

/// A reference ellipsoid
#[derive(Debug, Clone)]
pub struct Ellipsoid {
    /// Display name
    pub name: String,
    /// Catalog provenance
    pub authority: Authority,
    /// Semi-major axis in metres
    pub semi_major: f64,
    /// Semi-minor axis in metres
    pub semi_minor: f64,
    /// Whether the catalog has deprecated this ellipsoid
    pub deprecated: bool,
}

impl Ellipsoid {
    /// Creates an ellipsoid from both axes
    ///
    /// Fails unless `semi_major >= semi_minor > 0`.
    pub fn new(name: &str, authority: Authority, semi_major: f64, semi_minor: f64) -> CrsResult<Self> {
        if !semi_major.is_finite() || !semi_minor.is_finite() || semi_minor <= 0.0 || semi_major < semi_minor {
            return Err(CrsError::InvalidEllipsoid(format!(
                "'{}' axes must satisfy a >= b > 0, got a={} b={}",
                name, semi_major, semi_minor
            )));
        }

        Ok(Ellipsoid {
            name: name.to_string(),
            authority,
            semi_major,
            semi_minor,
            deprecated: false,
        })
    }

    /// Creates an ellipsoid from the semi-major axis and inverse flattening
    pub fn from_inverse_flattening(
        name: &str,
        authority: Authority,
        semi_major: f64,
        inverse_flattening: f64,
    ) -> CrsResult<Self> {
        if !inverse_flattening.is_finite() || inverse_flattening <= 0.0 {
            return Err(CrsError::InvalidEllipsoid(format!(
                "'{}' inverse flattening must be positive, got {}",
                name, inverse_flattening
            )));
        }
        let semi_minor = semi_major * (1.0 - 1.0 / inverse_flattening);
        Ellipsoid::new(name, authority, semi_major, semi_minor)
    }

    /// Flattening: (a - b) / a
    pub fn flattening(&self) -> f64 {
        (self.semi_major - self.semi_minor) / self.semi_major
    }

    /// First eccentricity squared: (a^2 - b^2) / a^2
    pub fn eccentricity_squared(&self) -> f64 {
        let a2 = self.semi_major * self.semi_major;
        let b2 = self.semi_minor * self.semi_minor;
        (a2 - b2) / a2
    }

    /// Second eccentricity squared: (a^2 - b^2) / b^2
    pub fn second_eccentricity_squared(&self) -> f64 {
        let a2 = self.semi_major * self.semi_major;
        let b2 = self.semi_minor * self.semi_minor;
        (a2 - b2) / b2
    }

    /// Radius of curvature in the prime vertical at a latitude
    fn prime_vertical_radius(&self, sin_lat: f64) -> f64 {
        self.semi_major / (1.0 - self.eccentricity_squared() * sin_lat * sin_lat).sqrt()
    }

    /// Converts a geodetic point to geocentric cartesian, in place
    ///
    /// Input: x = longitude (radians), y = latitude (radians),
    /// z = ellipsoidal height (metres). Output: geocentric X/Y/Z in
    /// metres. Inputs outside the normalized lon/lat ranges are
    /// undefined; non-finite values propagate rather than panic.
    pub fn geodetic_to_cartesian(&self, point: &mut OperationPoint) {
        let lon = point.x;
        let lat = point.y;
        let height = point.z;

        let (sin_lat, cos_lat) = lat.sin_cos();
        let n = self.prime_vertical_radius(sin_lat);

        point.x = (n + height) * cos_lat * lon.cos();
        point.y = (n + height) * cos_lat * lon.sin();
        point.z = (n * (1.0 - self.eccentricity_squared()) + height) * sin_lat;
    }

    /// Converts a geocentric cartesian point to geodetic, in place
    ///
    /// Uses Bowring's closed-form approximation, which is exact to well
    /// below a millimetre for terrestrial points. Output: x = longitude
    /// (radians), y = latitude (radians), z = height (metres). Points on
    /// the polar axis drive the height through a division by zero; the
    /// non-finite result propagates.
    pub fn cartesian_to_geodetic(&self, point: &mut OperationPoint) {
        let x = point.x;
        let y = point.y;
        let z = point.z;

        let e2 = self.eccentricity_squared();
        let ep2 = self.second_eccentricity_squared();
        let p = (x * x + y * y).sqrt();

        let theta = (z * self.semi_major).atan2(p * self.semi_minor);
        let (sin_theta, cos_theta) = theta.sin_cos();

        let lat = (z + ep2 * self.semi_minor * sin_theta.powi(3))
            .atan2(p - e2 * self.semi_major * cos_theta.powi(3));
        let lon = y.atan2(x);

        let n = self.prime_vertical_radius(lat.sin());
        let height = p / lat.cos() - n;

        point.x = lon;
        point.y = lat;
        point.z = height;
    }

    /// Structural equivalence ignoring authority bookkeeping
    pub fn is_same(&self, other: &Ellipsoid) -> bool {
        (self.semi_major - other.semi_major).abs() <= 1e-6
            && (self.semi_minor - other.semi_minor).abs() <= 1e-6
    }

    /// Feeds the ellipsoid's structural fields into a running digest
    pub fn update_digest(&self, hasher: &mut Sha256) {
        hasher.update(self.semi_major.to_bits().to_be_bytes());
        hasher.update(self.semi_minor.to_bits().to_be_bytes());
    }
}

lazy_static! {
    /// WGS 84 ellipsoid (EPSG:7030)
    pub static ref WGS84: Ellipsoid = Ellipsoid::from_inverse_flattening(
        "WGS 84",
        Authority::epsg(7030),
        6378137.0,
        298.257223563
    )
    .expect("builtin ellipsoid");

    /// GRS 1980 ellipsoid (EPSG:7019)
    pub static ref GRS80: Ellipsoid = Ellipsoid::from_inverse_flattening(
        "GRS 1980",
        Authority::epsg(7019),
        6378137.0,
        298.257222101
    )
    .expect("builtin ellipsoid");
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_axis_validation() {
        assert!(Ellipsoid::new("bad", Authority::none(), 1.0, 2.0).is_err());
        assert!(Ellipsoid::new("bad", Authority::none(), 1.0, 0.0).is_err());
        assert!(Ellipsoid::new("bad", Authority::none(), 1.0, -1.0).is_err());
        assert!(Ellipsoid::new("sphere", Authority::none(), 1.0, 1.0).is_ok());
    }

    #[test]
    fn test_wgs84_derived_values() {
        assert_relative_eq!(WGS84.semi_minor, 6356752.314245179, epsilon = 1e-6);
        assert_relative_eq!(
            WGS84.eccentricity_squared(),
            0.0066943799901413165,
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_geodetic_cartesian_round_trip() {
        let cases = [
            (0.0_f64, 0.0_f64, 0.0_f64),
            (13.4050, 52.5200, 34.0),   // Berlin
            (-123.1207, 49.2827, 70.0), // Vancouver
            (151.2093, -33.8688, 58.0), // Sydney
        ];

        for (lon_deg, lat_deg, height) in cases {
            let mut point =
                OperationPoint::new_3d(lon_deg.to_radians(), lat_deg.to_radians(), height);
            WGS84.geodetic_to_cartesian(&mut point);
            WGS84.cartesian_to_geodetic(&mut point);

            assert_relative_eq!(point.x, lon_deg.to_radians(), epsilon = 1e-11);
            assert_relative_eq!(point.y, lat_deg.to_radians(), epsilon = 1e-11);
            assert_relative_eq!(point.z, height, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_equator_cartesian() {
        // (0, 0, 0) sits on the x axis at one semi-major radius
        let mut point = OperationPoint::new(0.0, 0.0);
        WGS84.geodetic_to_cartesian(&mut point);
        assert_relative_eq!(point.x, WGS84.semi_major, epsilon = 1e-6);
        assert_relative_eq!(point.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(point.z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_nan_propagates() {
        let mut point = OperationPoint::new(f64::NAN, 0.5);
        WGS84.geodetic_to_cartesian(&mut point);
        assert!(point.x.is_nan());
    }

    #[test]
    fn test_is_same_ignores_authority() {
        let anon =
            Ellipsoid::from_inverse_flattening("copy", Authority::none(), 6378137.0, 298.257223563)
                .unwrap();
        assert!(WGS84.is_same(&anon));
        assert!(!WGS84.is_same(&GRS80));
    }
}
