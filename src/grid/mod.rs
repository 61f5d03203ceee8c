//! Grid shift file engine
//!
//! Reading of NTv2/GSB-style binary shift grids, sub-grid selection,
//! bilinear interpolation and the operation wrapper that applies grid
//! shifts to points.

pub mod cache;
pub mod file;
pub mod shift_op;
pub mod subgrid;
#[cfg(test)]
mod tests;

pub use file::{GridShiftFile, GridShiftHeader, GridVersion, GRID_MAGIC};
pub use shift_op::GsbGridShiftOperation;
pub use subgrid::GridShiftGrid;
