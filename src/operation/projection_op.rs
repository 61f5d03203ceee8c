//! Projection step in an operation chain

use std::sync::Arc;

use crate::operation::point::OperationPoint;
use crate::operation::CoordinatesOperation;
use crate::projection::CoordinatesProjection;

/// Which direction the projection step runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionDirection {
    /// Geographic radians to projected metres
    Forward,
    /// Projected metres to geographic radians
    Inverse,
}

/// Applies a shared projection forward or inverse
///
/// The projection object is shared immutably; many chains may reference
/// the same instance, paired forward/inverse.
pub struct ProjectionOperation {
    projection: Arc<dyn CoordinatesProjection>,
    direction: ProjectionDirection,
}

impl ProjectionOperation {
    pub fn forward(projection: Arc<dyn CoordinatesProjection>) -> Self {
        ProjectionOperation {
            projection,
            direction: ProjectionDirection::Forward,
        }
    }

    pub fn inverse(projection: Arc<dyn CoordinatesProjection>) -> Self {
        ProjectionOperation {
            projection,
            direction: ProjectionDirection::Inverse,
        }
    }
}

impl CoordinatesOperation for ProjectionOperation {
    fn perform(&self, point: &mut OperationPoint) {
        match self.direction {
            ProjectionDirection::Forward => self.projection.project(point),
            ProjectionDirection::Inverse => self.projection.inverse(point),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::WebMercatorProjection;
    use approx::assert_relative_eq;

    #[test]
    fn test_forward_inverse_pair_shares_projection() {
        let projection: Arc<dyn CoordinatesProjection> =
            Arc::new(WebMercatorProjection::new(6378137.0, 0.0, 0.0, 0.0));
        let forward = ProjectionOperation::forward(Arc::clone(&projection));
        let inverse = ProjectionOperation::inverse(projection);

        let mut point = OperationPoint::new(0.5, 0.8);
        forward.perform(&mut point);
        inverse.perform(&mut point);
        assert_relative_eq!(point.x, 0.5, epsilon = 1e-10);
        assert_relative_eq!(point.y, 0.8, epsilon = 1e-10);
    }
}
