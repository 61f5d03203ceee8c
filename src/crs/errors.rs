//! Custom error types for CRS processing

use std::fmt;
use std::io;

/// CRS-specific error types
#[derive(Debug)]
pub enum CrsError {
    /// I/O error
    IoError(io::Error),
    /// Unit conversion factor was zero, negative or non-finite
    InvalidUnit(String),
    /// Ellipsoid axes violated a >= b > 0
    InvalidEllipsoid(String),
    /// A compound CRS paired two components of the same axis kind
    InvalidCompound(String),
    /// Authority code not present in the catalog
    UnknownCode(String),
    /// Projection method not supported
    UnknownProjection(String),
    /// A required projection parameter was absent and had no default
    MissingParameter(String),
    /// No operation chain can be built between the two CRS definitions
    UnsupportedTransformation(String, String),
    /// Grid shift file did not start with the expected type tag
    InvalidGridMagic([u8; 6]),
    /// Grid shift file header or sub-grid record was malformed
    InvalidGridFile(String),
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for CrsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrsError::IoError(e) => write!(f, "I/O error: {}", e),
            CrsError::InvalidUnit(msg) => write!(f, "Invalid unit of measure: {}", msg),
            CrsError::InvalidEllipsoid(msg) => write!(f, "Invalid ellipsoid: {}", msg),
            CrsError::InvalidCompound(msg) => write!(f, "Invalid compound CRS: {}", msg),
            CrsError::UnknownCode(code) => write!(f, "Unknown authority code: {}", code),
            CrsError::UnknownProjection(name) => write!(f, "Unknown projection method: {}", name),
            CrsError::MissingParameter(name) => write!(f, "Missing projection parameter: {}", name),
            CrsError::UnsupportedTransformation(src, dst) => {
                write!(f, "Unsupported transformation from {} to {}", src, dst)
            }
            CrsError::InvalidGridMagic(tag) => {
                write!(f, "Invalid grid file type tag: {:?}", tag)
            }
            CrsError::InvalidGridFile(msg) => write!(f, "Invalid grid shift file: {}", msg),
            CrsError::GenericError(msg) => write!(f, "CRS error: {}", msg),
        }
    }
}

impl std::error::Error for CrsError {}

impl From<io::Error> for CrsError {
    fn from(error: io::Error) -> Self {
        CrsError::IoError(error)
    }
}

impl From<String> for CrsError {
    fn from(msg: String) -> Self {
        CrsError::GenericError(msg)
    }
}

/// Result type for CRS operations
pub type CrsResult<T> = Result<T, CrsError>;
