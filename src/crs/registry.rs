//! CRS catalog registry
//!
//! Resolves authority codes to fully-populated CRS objects from a TOML
//! catalog. A small EPSG-subset catalog ships compiled into the binary;
//! an external catalog file can replace it. Resolved definitions are
//! cached by code so that repeated lookups return the same shared
//! objects.

use lazy_static::lazy_static;
use log::debug;
use std::collections::HashMap;
use std::fs;
use std::sync::{Arc, Mutex};

use crate::crs::authority::Authority;
use crate::crs::datum::{GeodeticDatum, VerticalDatum};
use crate::crs::ellipsoid::Ellipsoid;
use crate::crs::errors::{CrsError, CrsResult};
use crate::crs::parameter::{builtin_parameter, ParameterName, ParameterValue};
use crate::crs::region::BoundingRegion;
use crate::crs::system::{
    CompoundCrs, CoordinateSystem, GeographicCrs, ProjectedCrs, VerticalCrs,
};
use crate::crs::unit::builtin_unit;

lazy_static! {
    // Parse the built-in catalog at first use
    static ref BUILTIN_CATALOG: toml::Value = {
        let content = include_str!("../../crs_catalog.toml");
        content.parse().unwrap_or_else(|e| {
            eprintln!("Warning: Failed to parse built-in CRS catalog: {}", e);
            toml::Value::Table(toml::map::Map::new())
        })
    };
}

/// Provider contract consumed by operation builders and callers
///
/// Implementations resolve an authority code to a populated CRS and a
/// `(horizontal, vertical)` pair to a canonical compound id. An unknown
/// pair is "no canonical id", never an error.
pub trait CrsProvider: Send + Sync {
    /// Resolves an authority code to a CRS definition
    fn resolve(&self, code: &str) -> CrsResult<CoordinateSystem>;

    /// Resolves the canonical compound id for a component pair
    fn compound_id(&self, horizontal_id: &str, vertical_id: &str) -> Option<String>;
}

/// Registry backed by a TOML catalog
pub struct CatalogRegistry {
    root: toml::Value,
    cache: Mutex<HashMap<String, CoordinateSystem>>,
}

impl CatalogRegistry {
    /// Creates a registry over the built-in catalog
    pub fn builtin() -> Self {
        CatalogRegistry {
            root: BUILTIN_CATALOG.clone(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Creates a registry from an external catalog file
    pub fn from_file(path: &str) -> CrsResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Creates a registry from catalog text
    pub fn from_str(content: &str) -> CrsResult<Self> {
        let root: toml::Value = content
            .parse()
            .map_err(|e| CrsError::GenericError(format!("Failed to parse CRS catalog: {}", e)))?;
        Ok(CatalogRegistry {
            root,
            cache: Mutex::new(HashMap::new()),
        })
    }

    fn table(&self, name: &str, code: &str) -> Option<&toml::Value> {
        self.root.get(name).and_then(|t| t.get(code))
    }

    fn entry_str(entry: &toml::Value, key: &str, code: &str) -> CrsResult<String> {
        entry
            .get(key)
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| {
                CrsError::GenericError(format!("catalog entry {} is missing '{}'", code, key))
            })
    }

    fn entry_f64(entry: &toml::Value, key: &str) -> Option<f64> {
        entry.get(key).and_then(|v| v.as_float().or_else(|| v.as_integer().map(|i| i as f64)))
    }

    fn entry_area(entry: &toml::Value) -> BoundingRegion {
        if let Some(values) = entry.get("area").and_then(|v| v.as_array()) {
            // Integer literals count as numeric, same as entry_f64
            let edge = |i: usize| {
                values
                    .get(i)
                    .and_then(|v| v.as_float().or_else(|| v.as_integer().map(|n| n as f64)))
            };
            if let (Some(min_lon), Some(min_lat), Some(max_lon), Some(max_lat)) =
                (edge(0), edge(1), edge(2), edge(3))
            {
                return BoundingRegion::new(min_lon, min_lat, max_lon, max_lat);
            }
        }
        BoundingRegion::world()
    }

    fn lookup_unit(name: &str, code: &str) -> CrsResult<crate::crs::unit::UnitOfMeasure> {
        builtin_unit(name).cloned().ok_or_else(|| {
            CrsError::GenericError(format!("catalog entry {} names unknown unit '{}'", code, name))
        })
    }

    fn build_ellipsoid(&self, code: &str) -> CrsResult<Ellipsoid> {
        let entry = self
            .table("ellipsoids", code)
            .ok_or_else(|| CrsError::UnknownCode(format!("ellipsoid {}", code)))?;

        let name = Self::entry_str(entry, "name", code)?;
        let semi_major = Self::entry_f64(entry, "semi_major").ok_or_else(|| {
            CrsError::GenericError(format!("ellipsoid {} is missing 'semi_major'", code))
        })?;
        let authority = Authority::new(code, "EPSG");

        if let Some(inverse_flattening) = Self::entry_f64(entry, "inverse_flattening") {
            Ellipsoid::from_inverse_flattening(&name, authority, semi_major, inverse_flattening)
        } else if let Some(semi_minor) = Self::entry_f64(entry, "semi_minor") {
            Ellipsoid::new(&name, authority, semi_major, semi_minor)
        } else {
            Err(CrsError::GenericError(format!(
                "ellipsoid {} needs 'inverse_flattening' or 'semi_minor'",
                code
            )))
        }
    }

    fn build_geodetic_datum(&self, code: &str) -> CrsResult<GeodeticDatum> {
        let entry = self
            .table("datums", code)
            .ok_or_else(|| CrsError::UnknownCode(format!("datum {}", code)))?;

        let name = Self::entry_str(entry, "name", code)?;
        let ellipsoid_code = Self::entry_str(entry, "ellipsoid", code)?;
        let ellipsoid = self.build_ellipsoid(&ellipsoid_code)?;

        Ok(GeodeticDatum::new(
            Authority::new(code, "EPSG"),
            &name,
            Self::entry_area(entry),
            ellipsoid,
        ))
    }

    fn build_vertical_datum(&self, code: &str) -> CrsResult<VerticalDatum> {
        let entry = self
            .table("vertical_datums", code)
            .ok_or_else(|| CrsError::UnknownCode(format!("vertical datum {}", code)))?;

        let name = Self::entry_str(entry, "name", code)?;
        Ok(VerticalDatum::new(
            Authority::new(code, "EPSG"),
            &name,
            Self::entry_area(entry),
        ))
    }

    fn build_geographic(&self, code: &str, entry: &toml::Value) -> CrsResult<CoordinateSystem> {
        let name = Self::entry_str(entry, "name", code)?;
        let datum_code = Self::entry_str(entry, "datum", code)?;
        let unit_name = Self::entry_str(entry, "unit", code)?;

        let datum = self.build_geodetic_datum(&datum_code)?;
        let unit = Self::lookup_unit(&unit_name, code)?;

        Ok(CoordinateSystem::Geographic(Arc::new(GeographicCrs::new(
            Authority::new(code, "EPSG"),
            &name,
            datum,
            unit,
        ))))
    }

    fn build_projected(&self, code: &str, entry: &toml::Value) -> CrsResult<CoordinateSystem> {
        let name = Self::entry_str(entry, "name", code)?;
        let base_code = Self::entry_str(entry, "base", code)?;
        let method = Self::entry_str(entry, "method", code)?;
        let unit_name = Self::entry_str(entry, "unit", code)?;

        let base = match self.resolve(&base_code)? {
            CoordinateSystem::Geographic(crs) => crs,
            _ => {
                return Err(CrsError::GenericError(format!(
                    "projected CRS {} references non-geographic base {}",
                    code, base_code
                )))
            }
        };

        let mut parameters: HashMap<ParameterName, ParameterValue> = HashMap::new();
        if let Some(table) = entry.get("parameters").and_then(|v| v.as_table()) {
            for (key, raw) in table {
                let parameter = builtin_parameter(key).ok_or_else(|| {
                    CrsError::GenericError(format!(
                        "projected CRS {} uses unknown parameter '{}'",
                        code, key
                    ))
                })?;
                let value = raw
                    .as_float()
                    .or_else(|| raw.as_integer().map(|i| i as f64))
                    .ok_or_else(|| {
                        CrsError::GenericError(format!(
                            "parameter '{}' of projected CRS {} is not numeric",
                            key, code
                        ))
                    })?;
                parameters.insert(
                    parameter.clone(),
                    ParameterValue::new(value, parameter.unit.clone()),
                );
            }
        }

        let unit = Self::lookup_unit(&unit_name, code)?;

        Ok(CoordinateSystem::Projected(Arc::new(ProjectedCrs::new(
            Authority::new(code, "EPSG"),
            &name,
            base,
            &method,
            parameters,
            unit,
        ))))
    }

    fn build_vertical(&self, code: &str, entry: &toml::Value) -> CrsResult<CoordinateSystem> {
        let name = Self::entry_str(entry, "name", code)?;
        let datum_code = Self::entry_str(entry, "datum", code)?;
        let unit_name = Self::entry_str(entry, "unit", code)?;

        let datum = self.build_vertical_datum(&datum_code)?;
        let unit = Self::lookup_unit(&unit_name, code)?;

        Ok(CoordinateSystem::Vertical(Arc::new(VerticalCrs::new(
            Authority::new(code, "EPSG"),
            &name,
            datum,
            unit,
        ))))
    }

    fn build_compound(&self, code: &str, entry: &toml::Value) -> CrsResult<CoordinateSystem> {
        let name = Self::entry_str(entry, "name", code)?;
        let horizontal_code = Self::entry_str(entry, "horizontal", code)?;
        let vertical_code = Self::entry_str(entry, "vertical", code)?;

        let horizontal = self.resolve(&horizontal_code)?;
        let vertical = self.resolve(&vertical_code)?;

        let compound = CompoundCrs::new(Authority::new(code, "EPSG"), &name, horizontal, vertical)?;
        Ok(CoordinateSystem::Compound(Arc::new(compound)))
    }

    fn build(&self, code: &str) -> CrsResult<CoordinateSystem> {
        if let Some(entry) = self.table("geographic", code) {
            return self.build_geographic(code, entry);
        }
        if let Some(entry) = self.table("projected", code) {
            return self.build_projected(code, entry);
        }
        if let Some(entry) = self.table("vertical", code) {
            return self.build_vertical(code, entry);
        }
        if let Some(entry) = self.table("compound", code) {
            return self.build_compound(code, entry);
        }
        Err(CrsError::UnknownCode(code.to_string()))
    }
}

impl CrsProvider for CatalogRegistry {
    fn resolve(&self, code: &str) -> CrsResult<CoordinateSystem> {
        // Strip an "EPSG:" prefix so callers can pass either form
        let code = code.strip_prefix("EPSG:").unwrap_or(code);

        if let Some(found) = self.cache.lock().unwrap().get(code) {
            return Ok(found.clone());
        }

        debug!("Resolving CRS code {}", code);
        let built = self.build(code)?;

        // A racing resolve may have inserted first; keep whichever
        // landed so every caller shares one definition
        let mut cache = self.cache.lock().unwrap();
        Ok(cache.entry(code.to_string()).or_insert(built).clone())
    }

    fn compound_id(&self, horizontal_id: &str, vertical_id: &str) -> Option<String> {
        let compounds = self.root.get("compound")?.as_table()?;
        for (code, entry) in compounds {
            let horizontal = entry.get("horizontal").and_then(|v| v.as_str());
            let vertical = entry.get("vertical").and_then(|v| v.as_str());
            if horizontal == Some(horizontal_id) && vertical == Some(vertical_id) {
                return Some(code.clone());
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_builtin_geographic() {
        let registry = CatalogRegistry::builtin();
        let crs = registry.resolve("4326").unwrap();
        match &crs {
            CoordinateSystem::Geographic(geographic) => {
                assert_eq!(geographic.name, "WGS 84");
                assert!((geographic.datum.ellipsoid.semi_major - 6378137.0).abs() < 1e-6);
            }
            other => panic!("expected geographic CRS, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_accepts_epsg_prefix() {
        let registry = CatalogRegistry::builtin();
        let plain = registry.resolve("4326").unwrap();
        let prefixed = registry.resolve("EPSG:4326").unwrap();
        assert_eq!(plain.digest(), prefixed.digest());
    }

    #[test]
    fn test_resolve_caches_by_code() {
        let registry = CatalogRegistry::builtin();
        let first = registry.resolve("3857").unwrap();
        let second = registry.resolve("3857").unwrap();
        match (&first, &second) {
            (CoordinateSystem::Projected(a), CoordinateSystem::Projected(b)) => {
                assert!(Arc::ptr_eq(a, b));
            }
            _ => panic!("expected projected CRS"),
        }
    }

    #[test]
    fn test_unknown_code_errors() {
        let registry = CatalogRegistry::builtin();
        assert!(matches!(
            registry.resolve("999999"),
            Err(CrsError::UnknownCode(_))
        ));
    }

    #[test]
    fn test_compound_id_lookup() {
        let registry = CatalogRegistry::builtin();
        assert_eq!(registry.compound_id("4269", "5703"), Some("5498".to_string()));
        // Unknown combination is "no canonical id", not an error
        assert_eq!(registry.compound_id("4326", "999999"), None);
    }

    #[test]
    fn test_datum_area_accepts_integer_literals() {
        let registry = CatalogRegistry::from_str(
            r#"
            [ellipsoids.7019]
            name = "GRS 1980"
            semi_major = 6378137.0
            inverse_flattening = 298.257222101

            [datums.6269]
            name = "North American Datum 1983"
            ellipsoid = "7019"
            area = [-172, 23, -47, 86]

            [geographic.4269]
            name = "NAD83"
            datum = "6269"
            unit = "degree"
            "#,
        )
        .unwrap();

        let crs = registry.resolve("4269").unwrap();
        match &crs {
            CoordinateSystem::Geographic(geographic) => {
                let area = &geographic.datum.area;
                assert!(area.contains(-100.0, 50.0));
                assert!(!area.contains(10.0, 50.0));
            }
            other => panic!("expected geographic CRS, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_compound() {
        let registry = CatalogRegistry::builtin();
        let crs = registry.resolve("5498").unwrap();
        assert!(matches!(crs, CoordinateSystem::Compound(_)));
    }
}
