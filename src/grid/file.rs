//! Grid shift file parsing and sub-grid lookup
//!
//! The on-disk layout descends from the NTv2/GSB family: a fixed
//! header, then a flat list of sub-grid records that form a containment
//! tree through parent-name back references. Everything multi-byte is
//! big-endian. A loaded file is immutable; lookups walk the tree from
//! the coarsest covering root towards the finest covering child.

use log::debug;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::crs::errors::{CrsError, CrsResult};
use crate::grid::subgrid::GridShiftGrid;
use crate::io::grid_data;
use crate::io::seekable::SeekableReader;

/// Type tag opening every grid shift file
pub const GRID_MAGIC: &[u8; 6] = b"GSHIFT";

/// Width of the version window following the magic
const VERSION_FIELD_LEN: usize = 8;

/// Producer version stamp from the header
///
/// Two encodings circulate: a padded printable-ASCII form and a legacy
/// numeric form holding a big-endian u16 in the first two bytes. Both
/// are informational only; parsing never branches on the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridVersion {
    Ascii(String),
    Legacy(u16),
}

impl GridVersion {
    fn from_window(window: &[u8]) -> Self {
        let mut trimmed = window.to_vec();
        crate::utils::string_utils::trim_trailing_padding(&mut trimmed);

        if !trimmed.is_empty() && trimmed.iter().all(|b| b.is_ascii_graphic() || *b == b' ') {
            return GridVersion::Ascii(String::from_utf8_lossy(&trimmed).into_owned());
        }
        GridVersion::Legacy(u16::from_be_bytes([window[0], window[1]]))
    }
}

/// Fixed header of a grid shift file
#[derive(Debug, Clone)]
pub struct GridShiftHeader {
    pub version: GridVersion,
    /// Producer-assigned id of the coordinate system the shifts target
    pub coordinate_system_id: i32,
    /// Scale factor for fixed-precision horizontal variants
    pub scale_xy: f64,
    /// Scale factor for fixed-precision height variants
    pub scale_z: f64,
}

/// A fully loaded grid shift file
#[derive(Debug)]
pub struct GridShiftFile {
    header: GridShiftHeader,
    grids: Vec<GridShiftGrid>,
}

impl GridShiftFile {
    /// Opens and parses a grid shift file from disk
    ///
    /// # Arguments
    /// * `path` - Path to the file
    ///
    /// # Returns
    /// The parsed file, or an error for unreadable or malformed input
    pub fn load<P: AsRef<Path>>(path: P) -> CrsResult<Self> {
        let path = path.as_ref();
        debug!("Loading grid shift file: {}", path.display());
        let mut reader = BufReader::new(File::open(path)?);
        Self::read(&mut reader)
    }

    /// Parses a grid shift file from any seekable reader
    pub fn read(reader: &mut dyn SeekableReader) -> CrsResult<Self> {
        let magic = grid_data::read_bytes(reader, GRID_MAGIC.len())?;
        if magic != GRID_MAGIC {
            let mut found = [0u8; 6];
            found.copy_from_slice(&magic);
            return Err(CrsError::InvalidGridMagic(found));
        }

        let window = grid_data::read_bytes(reader, VERSION_FIELD_LEN)?;
        let version = GridVersion::from_window(&window);

        let coordinate_system_id = grid_data::read_i32(reader)?;
        let scale_xy = grid_data::read_f64(reader)?;
        let scale_z = grid_data::read_f64(reader)?;

        let grid_count = grid_data::read_i32(reader)?;
        if grid_count < 0 {
            return Err(CrsError::InvalidGridFile(format!(
                "negative sub-grid count {}",
                grid_count
            )));
        }

        let mut grids = Vec::with_capacity(grid_count as usize);
        for _ in 0..grid_count {
            grids.push(GridShiftGrid::read(reader)?);
        }

        debug!(
            "Parsed grid shift file: version {:?}, {} sub-grid(s)",
            version,
            grids.len()
        );

        Ok(GridShiftFile {
            header: GridShiftHeader {
                version,
                coordinate_system_id,
                scale_xy,
                scale_z,
            },
            grids,
        })
    }

    pub fn header(&self) -> &GridShiftHeader {
        &self.header
    }

    pub fn grids(&self) -> &[GridShiftGrid] {
        &self.grids
    }

    /// Finds the most specific sub-grid covering a point
    ///
    /// Starts from the covering root and repeatedly descends into a
    /// covering child, so a dense child lattice wins over the coarse
    /// parent that contains it.
    ///
    /// # Arguments
    /// * `lon_seconds` - Longitude in grid arc-seconds (positive west)
    /// * `lat_seconds` - Latitude in arc-seconds
    ///
    /// # Returns
    /// The covering sub-grid, or `None` outside every extent
    pub fn grid_for(&self, lon_seconds: f64, lat_seconds: f64) -> Option<&GridShiftGrid> {
        let mut current = self
            .grids
            .iter()
            .find(|g| g.parent_name().is_none() && g.contains(lon_seconds, lat_seconds))?;

        loop {
            let child = self.grids.iter().find(|g| {
                g.parent_name() == Some(current.name()) && g.contains(lon_seconds, lat_seconds)
            });
            match child {
                Some(finer) => current = finer,
                None => return Some(current),
            }
        }
    }
}
