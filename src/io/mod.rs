//! I/O utilities for grid file handling
//!
//! This module provides traits and helpers for reading the binary
//! grid shift format.

pub mod grid_data;
pub mod seekable;
