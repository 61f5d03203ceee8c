//! Web Mercator projection (spherical formulae)
//!
//! Forward: x = x0 + a*(lam - lam0), y = y0 + a*ln(tan(pi/4 + phi/2))
//! Inverse: lam = lam0 + (x - x0)/a, phi = pi/2 - 2*atan(exp((y0 - y)/a))
//!
//! The spherical form is deliberate: Web Mercator treats the ellipsoid
//! as a sphere of radius a. Latitudes approaching the poles drive y to
//! infinity; callers clamp beforehand if they need finite output.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use crate::crs::errors::CrsResult;
use crate::crs::parameter::{CENTRAL_MERIDIAN, FALSE_EASTING, FALSE_NORTHING};
use crate::crs::system::ProjectedCrs;
use crate::operation::point::OperationPoint;
use crate::projection::CoordinatesProjection;

/// Spherical Web Mercator
#[derive(Debug, Clone)]
pub struct WebMercatorProjection {
    /// Sphere radius: the base ellipsoid's semi-major axis, in metres
    semi_major: f64,
    /// Central meridian in radians
    central_meridian: f64,
    /// False easting in metres
    false_easting: f64,
    /// False northing in metres
    false_northing: f64,
}

impl WebMercatorProjection {
    /// Builds the projection from a projected CRS's parameters
    ///
    /// Reads the central meridian and false origin from the parameter
    /// map (falling back to the catalog defaults) and the sphere radius
    /// from the base geographic CRS's ellipsoid.
    pub fn from_parameters(crs: &ProjectedCrs) -> CrsResult<Self> {
        Ok(WebMercatorProjection {
            semi_major: crs.base.datum.ellipsoid.semi_major,
            // Parameter values are already in base units (radians, metres)
            central_meridian: crs.parameter_or_default(&CENTRAL_MERIDIAN)?,
            false_easting: crs.parameter_or_default(&FALSE_EASTING)?,
            false_northing: crs.parameter_or_default(&FALSE_NORTHING)?,
        })
    }

    /// Builds the projection directly from its four parameters
    pub fn new(semi_major: f64, central_meridian: f64, false_easting: f64, false_northing: f64) -> Self {
        WebMercatorProjection {
            semi_major,
            central_meridian,
            false_easting,
            false_northing,
        }
    }
}

impl CoordinatesProjection for WebMercatorProjection {
    fn project(&self, point: &mut OperationPoint) {
        let lon = point.x;
        let lat = point.y;

        point.x = self.false_easting + self.semi_major * (lon - self.central_meridian);
        point.y = self.false_northing + self.semi_major * (FRAC_PI_4 + lat / 2.0).tan().ln();
    }

    fn inverse(&self, point: &mut OperationPoint) {
        let x = point.x;
        let y = point.y;

        point.x = self.central_meridian + (x - self.false_easting) / self.semi_major;
        point.y = FRAC_PI_2 - 2.0 * ((self.false_northing - y) / self.semi_major).exp().atan();
    }
}
