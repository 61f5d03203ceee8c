//! Mutable scratch point threaded through operation chains

/// A mutable coordinate register passed through an operation chain
///
/// Every operation mutates the point in place; the caller owns the
/// instance exclusively for the duration of the call and typically
/// reuses it across many sequential invocations. Operations must never
/// retain a reference to it beyond the call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperationPoint {
    /// X coordinate (longitude or easting)
    pub x: f64,
    /// Y coordinate (latitude or northing)
    pub y: f64,
    /// Z coordinate (ellipsoidal or gravity-related height)
    pub z: f64,
}

impl OperationPoint {
    /// Creates a 2D point with zero height
    pub fn new(x: f64, y: f64) -> Self {
        OperationPoint { x, y, z: 0.0 }
    }

    /// Creates a 3D point
    pub fn new_3d(x: f64, y: f64, z: f64) -> Self {
        OperationPoint { x, y, z }
    }

    /// Loads new horizontal coordinates, leaving the height untouched
    pub fn set_2d(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }
}

impl Default for OperationPoint {
    fn default() -> Self {
        OperationPoint::new(0.0, 0.0)
    }
}
