//! Process-wide cache of loaded grid shift files
//!
//! Grid files are large and immutable, so each path is parsed at most
//! once per process and shared through an `Arc`. The mutex is dropped
//! during parsing; two threads racing on a cold path may both parse,
//! and the first insert wins.

use lazy_static::lazy_static;
use log::debug;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::crs::errors::CrsResult;
use crate::grid::file::GridShiftFile;

lazy_static! {
    static ref GRID_CACHE: Mutex<HashMap<PathBuf, Arc<GridShiftFile>>> =
        Mutex::new(HashMap::new());
}

/// Loads a grid shift file through the cache
///
/// # Arguments
/// * `path` - Path to the file
///
/// # Returns
/// A shared handle to the parsed file
pub fn load_cached<P: AsRef<Path>>(path: P) -> CrsResult<Arc<GridShiftFile>> {
    let path = path.as_ref();

    if let Some(found) = GRID_CACHE.lock().unwrap().get(path) {
        debug!("Grid cache hit: {}", path.display());
        return Ok(Arc::clone(found));
    }

    // Parse outside the lock
    let loaded = Arc::new(GridShiftFile::load(path)?);

    let mut cache = GRID_CACHE.lock().unwrap();
    Ok(Arc::clone(
        cache.entry(path.to_path_buf()).or_insert(loaded),
    ))
}

/// Drops every cached file
pub fn clear() {
    GRID_CACHE.lock().unwrap().clear();
}
