//! Coordinate operation pipeline
//!
//! Every transform implements one contract: mutate an `OperationPoint`
//! in place, in one pass, with no side channel. Chains compose
//! operations in list order; order matters and is never commutative.

pub mod builder;
pub mod composite;
pub mod identity;
pub mod point;
pub mod projection_op;
pub mod unit_conversion;
pub mod vertical_shift;

pub use builder::OperationBuilder;
pub use composite::{CompositeOperation, HorizontalShiftComposite};
pub use identity::IdentityOperation;
pub use point::OperationPoint;
pub use projection_op::{ProjectionDirection, ProjectionOperation};
pub use unit_conversion::UnitConversionOperation;
pub use vertical_shift::VerticalShiftOperation;

/// The single operational contract all transforms implement
pub trait CoordinatesOperation: Send + Sync {
    /// Transforms the point in place
    fn perform(&self, point: &mut OperationPoint);

    /// One-off 2D convenience: loads `(x, y)` into the scratch point,
    /// performs, and hands the resulting coordinates to `sink`
    ///
    /// Lets call sites that want immutable results avoid managing the
    /// mutable scratch type themselves.
    fn perform_2d(&self, point: &mut OperationPoint, x: f64, y: f64, sink: &mut dyn FnMut(f64, f64)) {
        point.set_2d(x, y);
        self.perform(point);
        sink(point.x, point.y);
    }
}

/// Contract for regionally-bounded horizontal datum shifts
///
/// Returns `true` after mutating the point, or `false` leaving the
/// point bit-identical when it falls outside every grid the operation
/// owns. Non-coverage is a documented pass-through, never an error.
pub trait HorizontalShiftOperation: Send + Sync {
    fn horizontal_shift(&self, point: &mut OperationPoint) -> bool;
}
