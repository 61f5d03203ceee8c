//! Vertical datum shift operation

use crate::operation::point::OperationPoint;
use crate::operation::CoordinatesOperation;

/// Applies a constant vertical offset in metres
///
/// Models the separation between two vertical datums over an area where
/// a constant is adequate; finer models would come from a 3D shift
/// grid's z component instead.
#[derive(Debug, Clone, Copy)]
pub struct VerticalShiftOperation {
    offset: f64,
}

impl VerticalShiftOperation {
    pub fn new(offset: f64) -> Self {
        VerticalShiftOperation { offset }
    }
}

impl CoordinatesOperation for VerticalShiftOperation {
    fn perform(&self, point: &mut OperationPoint) {
        point.z += self.offset;
    }
}
