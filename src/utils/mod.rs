//! Utility modules shared across the crate

pub mod angle_utils;
pub mod logger;
pub mod string_utils;
