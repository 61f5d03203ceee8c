//! Identity operation

use crate::operation::point::OperationPoint;
use crate::operation::CoordinatesOperation;

/// Leaves the point untouched
///
/// Returned when source and target CRS digests are equal, so callers
/// can run a uniform pipeline without special-casing the no-op.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityOperation;

impl CoordinatesOperation for IdentityOperation {
    fn perform(&self, _point: &mut OperationPoint) {}
}
