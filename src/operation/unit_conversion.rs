//! Unit conversion operations

use crate::crs::unit::UnitOfMeasure;
use crate::operation::point::OperationPoint;
use crate::operation::CoordinatesOperation;

/// Scales coordinates by fixed unit conversion factors
///
/// The horizontal factor applies to x and y, the vertical factor to z.
/// Built once per chain; the factors fold both units into one multiply
/// on the per-point path.
#[derive(Debug, Clone, Copy)]
pub struct UnitConversionOperation {
    factor_xy: f64,
    factor_z: f64,
}

impl UnitConversionOperation {
    /// Conversion applying one factor horizontally, none vertically
    pub fn horizontal(factor_xy: f64) -> Self {
        UnitConversionOperation {
            factor_xy,
            factor_z: 1.0,
        }
    }

    /// Conversion between two units of the same type, horizontal axes only
    pub fn between(source: &UnitOfMeasure, target: &UnitOfMeasure) -> Self {
        Self::horizontal(source.factor_to(target))
    }

    /// Conversion with separate horizontal and vertical factors
    pub fn new(factor_xy: f64, factor_z: f64) -> Self {
        UnitConversionOperation { factor_xy, factor_z }
    }
}

impl CoordinatesOperation for UnitConversionOperation {
    fn perform(&self, point: &mut OperationPoint) {
        point.x *= self.factor_xy;
        point.y *= self.factor_xy;
        point.z *= self.factor_z;
    }
}
