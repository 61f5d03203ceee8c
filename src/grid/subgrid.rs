//! A single sub-grid of a grid shift file
//!
//! Each sub-grid is a regular lattice of shift values in arc-seconds,
//! anchored at its lower-left node and stored row-major from there.
//! Longitude follows the file convention: arc-seconds, positive towards
//! the west.

use std::io::Read;

use crate::crs::errors::{CrsError, CrsResult};
use crate::io::grid_data;

/// Width of the fixed ASCII name fields in a sub-grid record
const NAME_FIELD_LEN: usize = 8;

/// Parent name marking a root sub-grid
const ROOT_PARENT: &str = "NONE";

/// One lattice of shift values with its placement metadata
#[derive(Debug, Clone)]
pub struct GridShiftGrid {
    name: String,
    parent_name: Option<String>,
    /// Lower-left corner in grid arc-seconds
    min_lon: f64,
    min_lat: f64,
    spacing_lon: f64,
    spacing_lat: f64,
    col_count: usize,
    row_count: usize,
    /// Components per node: 2 for horizontal, 3 when a height shift
    /// is present
    dimension: usize,
    /// Row-major from the lower-left node, `dimension` values per node
    values: Vec<f32>,
}

impl GridShiftGrid {
    /// Parses one sub-grid record from the reader
    ///
    /// # Arguments
    /// * `reader` - Positioned at the start of the record
    ///
    /// # Returns
    /// The parsed sub-grid, or an error for structurally invalid records
    pub fn read(reader: &mut dyn Read) -> CrsResult<Self> {
        let name = grid_data::read_fixed_ascii(reader, NAME_FIELD_LEN)?;
        let parent = grid_data::read_fixed_ascii(reader, NAME_FIELD_LEN)?;
        let parent_name = if parent == ROOT_PARENT || parent.is_empty() {
            None
        } else {
            Some(parent)
        };

        let min_lon = grid_data::read_f64(reader)?;
        let min_lat = grid_data::read_f64(reader)?;
        let spacing_lon = grid_data::read_f64(reader)?;
        let spacing_lat = grid_data::read_f64(reader)?;
        let col_count = grid_data::read_i32(reader)?;
        let row_count = grid_data::read_i32(reader)?;
        let dimension = grid_data::read_i32(reader)?;

        if col_count < 1 || row_count < 1 {
            return Err(CrsError::InvalidGridFile(format!(
                "sub-grid '{}' has non-positive node counts ({} x {})",
                name, col_count, row_count
            )));
        }
        if !(spacing_lon > 0.0) || !(spacing_lat > 0.0) {
            return Err(CrsError::InvalidGridFile(format!(
                "sub-grid '{}' has non-positive node spacing",
                name
            )));
        }
        if dimension != 2 && dimension != 3 {
            return Err(CrsError::InvalidGridFile(format!(
                "sub-grid '{}' has unsupported dimension {}",
                name, dimension
            )));
        }

        let col_count = col_count as usize;
        let row_count = row_count as usize;
        let dimension = dimension as usize;

        let value_count = col_count * row_count * dimension;
        let mut values = Vec::with_capacity(value_count);
        for _ in 0..value_count {
            values.push(grid_data::read_f32(reader)?);
        }

        Ok(GridShiftGrid {
            name,
            parent_name,
            min_lon,
            min_lat,
            spacing_lon,
            spacing_lat,
            col_count,
            row_count,
            dimension,
            values,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the enclosing sub-grid, `None` for a root
    pub fn parent_name(&self) -> Option<&str> {
        self.parent_name.as_deref()
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn col_count(&self) -> usize {
        self.col_count
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Lower-left corner longitude in grid arc-seconds
    pub fn min_lon(&self) -> f64 {
        self.min_lon
    }

    pub fn min_lat(&self) -> f64 {
        self.min_lat
    }

    /// Largest covered longitude in grid convention, which is the
    /// westernmost edge geographically
    pub fn max_lon(&self) -> f64 {
        self.min_lon + self.spacing_lon * (self.col_count - 1) as f64
    }

    pub fn max_lat(&self) -> f64 {
        self.min_lat + self.spacing_lat * (self.row_count - 1) as f64
    }

    /// Whether the lattice covers a point, edges inclusive
    ///
    /// # Arguments
    /// * `lon_seconds` - Longitude in grid arc-seconds (positive west)
    /// * `lat_seconds` - Latitude in arc-seconds
    pub fn contains(&self, lon_seconds: f64, lat_seconds: f64) -> bool {
        lon_seconds >= self.min_lon
            && lon_seconds <= self.max_lon()
            && lat_seconds >= self.min_lat
            && lat_seconds <= self.max_lat()
    }

    /// Value at a lattice node for one shift component
    fn node(&self, row: usize, col: usize, component: usize) -> f64 {
        let index = (row * self.col_count + col) * self.dimension + component;
        self.values[index] as f64
    }

    /// Bilinear interpolation of one shift component at a point
    ///
    /// The caller guarantees coverage (`contains` returned true). A
    /// query landing exactly on a node degenerates to that node's
    /// stored value.
    ///
    /// # Arguments
    /// * `lon_seconds` - Longitude in grid arc-seconds (positive west)
    /// * `lat_seconds` - Latitude in arc-seconds
    /// * `component` - 0 longitude shift, 1 latitude shift, 2 height
    ///
    /// # Returns
    /// The interpolated shift, arc-seconds for components 0 and 1
    pub fn interpolate(&self, lon_seconds: f64, lat_seconds: f64, component: usize) -> f64 {
        let col_position = (lon_seconds - self.min_lon) / self.spacing_lon;
        let row_position = (lat_seconds - self.min_lat) / self.spacing_lat;

        // Anchor the 2x2 cell, clamping so queries on the top or right
        // edge still index a valid cell
        let max_col = self.col_count.saturating_sub(2);
        let max_row = self.row_count.saturating_sub(2);
        let col = (col_position.floor() as usize).min(max_col);
        let row = (row_position.floor() as usize).min(max_row);
        let col_frac = col_position - col as f64;
        let row_frac = row_position - row as f64;

        if self.col_count == 1 && self.row_count == 1 {
            return self.node(0, 0, component);
        }

        let lower_left = self.node(row, col, component);
        let lower_right = if self.col_count > 1 {
            self.node(row, col + 1, component)
        } else {
            lower_left
        };
        let upper_left = if self.row_count > 1 {
            self.node(row + 1, col, component)
        } else {
            lower_left
        };
        let upper_right = if self.col_count > 1 && self.row_count > 1 {
            self.node(row + 1, col + 1, component)
        } else if self.col_count > 1 {
            lower_right
        } else {
            upper_left
        };

        let lower = lower_left + (lower_right - lower_left) * col_frac;
        let upper = upper_left + (upper_right - upper_left) * col_frac;
        lower + (upper - lower) * row_frac
    }
}
