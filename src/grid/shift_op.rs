//! Grid-based horizontal datum shift
//!
//! Wraps a loaded grid shift file as an operation: convert the point to
//! the grid convention, find the finest covering sub-grid, interpolate
//! and apply the shifts, convert back. Outside all sub-grids the point
//! is left untouched and the shift reports failure so a fallback grid
//! can be consulted.

use std::path::Path;
use std::sync::Arc;

use crate::crs::errors::CrsResult;
use crate::grid::cache;
use crate::grid::file::GridShiftFile;
use crate::operation::point::OperationPoint;
use crate::operation::{CoordinatesOperation, HorizontalShiftOperation};
use crate::utils::angle_utils;

/// Horizontal shift driven by a grid shift file
pub struct GsbGridShiftOperation {
    file: Arc<GridShiftFile>,
}

impl GsbGridShiftOperation {
    pub fn new(file: Arc<GridShiftFile>) -> Self {
        GsbGridShiftOperation { file }
    }

    /// Creates the operation from a file path, loading through the
    /// process-wide cache
    pub fn from_path<P: AsRef<Path>>(path: P) -> CrsResult<Self> {
        Ok(GsbGridShiftOperation {
            file: cache::load_cached(path)?,
        })
    }

    pub fn file(&self) -> &Arc<GridShiftFile> {
        &self.file
    }
}

impl HorizontalShiftOperation for GsbGridShiftOperation {
    fn horizontal_shift(&self, point: &mut OperationPoint) -> bool {
        let lon_seconds = angle_utils::longitude_to_grid_seconds(point.x);
        let lat_seconds = angle_utils::degrees_to_seconds(point.y);

        let grid = match self.file.grid_for(lon_seconds, lat_seconds) {
            Some(grid) => grid,
            None => return false,
        };

        let lon_shift = grid.interpolate(lon_seconds, lat_seconds, 0);
        let lat_shift = grid.interpolate(lon_seconds, lat_seconds, 1);

        point.x = angle_utils::grid_seconds_to_longitude(lon_seconds + lon_shift);
        point.y = angle_utils::seconds_to_degrees(lat_seconds + lat_shift);
        if grid.dimension() == 3 {
            // Height component is stored in metres, applied directly
            point.z += grid.interpolate(lon_seconds, lat_seconds, 2);
        }
        true
    }
}

impl CoordinatesOperation for GsbGridShiftOperation {
    fn perform(&self, point: &mut OperationPoint) {
        // Non-coverage is a pass-through on this path
        self.horizontal_shift(point);
    }
}
