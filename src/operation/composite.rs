//! Composite operations
//!
//! Two composition schemes exist. `CompositeOperation` runs every child
//! in list order (unit conversion before projection before shift; the
//! order is part of the chain's meaning). `HorizontalShiftComposite`
//! tries its children in order and stops at the first that reports
//! success, because shift grids are regionally exclusive: a grid covers
//! part of the earth and fallback grids are only consulted when earlier
//! ones don't cover the point.

use std::sync::Arc;

use crate::operation::point::OperationPoint;
use crate::operation::{CoordinatesOperation, HorizontalShiftOperation};

/// Ordered chain of shared child operations
///
/// Children are shared immutable handles; the composite owns the order,
/// never the operations themselves.
#[derive(Default)]
pub struct CompositeOperation {
    operations: Vec<Arc<dyn CoordinatesOperation>>,
}

impl CompositeOperation {
    pub fn new() -> Self {
        CompositeOperation {
            operations: Vec::new(),
        }
    }

    /// Appends a child; adding the same handle twice is a no-op
    pub fn add_operation(&mut self, operation: Arc<dyn CoordinatesOperation>) {
        if !self.operations.iter().any(|o| Arc::ptr_eq(o, &operation)) {
            self.operations.push(operation);
        }
    }

    /// Removes a child by handle; absent handles are a no-op
    pub fn remove_operation(&mut self, operation: &Arc<dyn CoordinatesOperation>) {
        self.operations.retain(|o| !Arc::ptr_eq(o, operation));
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl CoordinatesOperation for CompositeOperation {
    fn perform(&self, point: &mut OperationPoint) {
        for operation in &self.operations {
            operation.perform(point);
        }
    }
}

/// First-success chain of regionally exclusive horizontal shifts
#[derive(Default)]
pub struct HorizontalShiftComposite {
    shifts: Vec<Arc<dyn HorizontalShiftOperation>>,
}

impl HorizontalShiftComposite {
    pub fn new() -> Self {
        HorizontalShiftComposite { shifts: Vec::new() }
    }

    /// Appends a shift; adding the same handle twice is a no-op
    pub fn add_operation(&mut self, shift: Arc<dyn HorizontalShiftOperation>) {
        if !self.shifts.iter().any(|s| Arc::ptr_eq(s, &shift)) {
            self.shifts.push(shift);
        }
    }

    /// Removes a shift by handle; absent handles are a no-op
    pub fn remove_operation(&mut self, shift: &Arc<dyn HorizontalShiftOperation>) {
        self.shifts.retain(|s| !Arc::ptr_eq(s, shift));
    }

    pub fn len(&self) -> usize {
        self.shifts.len()
    }
}

impl HorizontalShiftOperation for HorizontalShiftComposite {
    fn horizontal_shift(&self, point: &mut OperationPoint) -> bool {
        for shift in &self.shifts {
            if shift.horizontal_shift(point) {
                return true;
            }
        }
        false
    }
}

impl CoordinatesOperation for HorizontalShiftComposite {
    fn perform(&self, point: &mut OperationPoint) {
        // No covering shift is a pass-through, not an error
        self.horizontal_shift(point);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crs::region::BoundingRegion;

    /// Test shift that covers a fixed region and adds a fixed delta
    struct RegionShift {
        region: BoundingRegion,
        delta: f64,
    }

    impl HorizontalShiftOperation for RegionShift {
        fn horizontal_shift(&self, point: &mut OperationPoint) -> bool {
            if !self.region.contains(point.x, point.y) {
                return false;
            }
            point.x += self.delta;
            point.y += self.delta;
            true
        }
    }

    fn two_region_composite() -> HorizontalShiftComposite {
        let mut composite = HorizontalShiftComposite::new();
        composite.add_operation(Arc::new(RegionShift {
            region: BoundingRegion::new(-130.0, 48.0, -120.0, 52.0),
            delta: 0.001,
        }));
        composite.add_operation(Arc::new(RegionShift {
            region: BoundingRegion::new(-120.0, 48.0, -110.0, 52.0),
            delta: 0.002,
        }));
        composite
    }

    #[test]
    fn test_first_covering_shift_wins() {
        let composite = two_region_composite();
        let mut point = OperationPoint::new(-125.0, 50.0);
        assert!(composite.horizontal_shift(&mut point));
        // Only grid A's delta applied
        assert_eq!(point.x, -125.0 + 0.001);
        assert_eq!(point.y, 50.0 + 0.001);
    }

    #[test]
    fn test_fallback_consulted_only_outside_earlier_grids() {
        let composite = two_region_composite();
        let mut point = OperationPoint::new(-115.0, 50.0);
        assert!(composite.horizontal_shift(&mut point));
        assert_eq!(point.x, -115.0 + 0.002);
    }

    #[test]
    fn test_no_coverage_leaves_point_bit_identical() {
        let composite = two_region_composite();
        let mut point = OperationPoint::new(-100.0, 50.0);
        let before = point;
        assert!(!composite.horizontal_shift(&mut point));
        assert_eq!(point.x.to_bits(), before.x.to_bits());
        assert_eq!(point.y.to_bits(), before.y.to_bits());

        // perform() silently passes through as well
        composite.perform(&mut point);
        assert_eq!(point, before);
    }

    #[test]
    fn test_add_is_idempotent_and_remove_works() {
        let shift: Arc<dyn HorizontalShiftOperation> = Arc::new(RegionShift {
            region: BoundingRegion::world(),
            delta: 0.0,
        });
        let mut composite = HorizontalShiftComposite::new();
        composite.add_operation(Arc::clone(&shift));
        composite.add_operation(Arc::clone(&shift));
        assert_eq!(composite.len(), 1);

        composite.remove_operation(&shift);
        assert_eq!(composite.len(), 0);
        // Removing again is a no-op
        composite.remove_operation(&shift);
    }

    #[test]
    fn test_composite_runs_children_in_order() {
        struct AddOne;
        struct Double;
        impl CoordinatesOperation for AddOne {
            fn perform(&self, point: &mut OperationPoint) {
                point.x += 1.0;
            }
        }
        impl CoordinatesOperation for Double {
            fn perform(&self, point: &mut OperationPoint) {
                point.x *= 2.0;
            }
        }

        let mut chain = CompositeOperation::new();
        chain.add_operation(Arc::new(AddOne));
        chain.add_operation(Arc::new(Double));

        let mut point = OperationPoint::new(3.0, 0.0);
        chain.perform(&mut point);
        // (3 + 1) * 2, not 3 * 2 + 1: order is part of the meaning
        assert_eq!(point.x, 8.0);
    }
}
