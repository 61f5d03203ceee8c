//! Authority identifiers for catalog provenance
//!
//! An authority records where a definition came from (e.g. an EPSG
//! registry code). It is bookkeeping only and never participates in
//! structural equality or digests.

/// Identifies a catalog entry by registry and code
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Authority {
    /// Code within the registry, usually numeric (e.g. "4326")
    pub code: String,
    /// Registry name (e.g. "EPSG")
    pub name: String,
}

impl Authority {
    /// Creates an authority reference
    pub fn new(code: &str, name: &str) -> Self {
        Authority {
            code: code.to_string(),
            name: name.to_string(),
        }
    }

    /// Creates an EPSG authority reference from a numeric code
    pub fn epsg(code: u32) -> Self {
        Authority {
            code: code.to_string(),
            name: "EPSG".to_string(),
        }
    }

    /// An empty authority for objects built outside any catalog
    pub fn none() -> Self {
        Authority {
            code: String::new(),
            name: String::new(),
        }
    }
}
