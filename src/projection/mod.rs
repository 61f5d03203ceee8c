//! Map projections
//!
//! A projection maps geographic coordinates (longitude/latitude in
//! radians) to projected easting/northing in metres and back, mutating
//! the operation point in place. Implementations are parameterized at
//! construction from the owning projected CRS's named parameters.

pub mod web_mercator;

use crate::crs::errors::{CrsError, CrsResult};
use crate::crs::system::ProjectedCrs;
use crate::operation::point::OperationPoint;
use crate::utils::string_utils;
use std::sync::Arc;

pub use web_mercator::WebMercatorProjection;

/// Forward and inverse projection contract
///
/// `inverse` is the exact mathematical inverse of `project`. Inputs
/// that drive the formulae to infinity (latitudes at the poles under
/// Mercator) propagate as non-finite values; implementations never
/// panic on the per-point path.
pub trait CoordinatesProjection: Send + Sync {
    /// Geographic (radians) to projected (metres), in place
    fn project(&self, point: &mut OperationPoint);

    /// Projected (metres) to geographic (radians), in place
    fn inverse(&self, point: &mut OperationPoint);
}

/// Instantiates the projection a projected CRS names
pub fn projection_for(crs: &ProjectedCrs) -> CrsResult<Arc<dyn CoordinatesProjection>> {
    match string_utils::normalize_name(&crs.method).as_str() {
        "web mercator" | "pseudo-mercator" | "popular visualisation pseudo mercator" => {
            Ok(Arc::new(WebMercatorProjection::from_parameters(crs)?))
        }
        other => Err(CrsError::UnknownProjection(other.to_string())),
    }
}
