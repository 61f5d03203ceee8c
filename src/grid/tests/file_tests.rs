//! Tests for grid shift file parsing and sub-grid selection

use std::io::Cursor;

use crate::crs::errors::CrsError;
use crate::grid::file::{GridShiftFile, GridVersion};
use crate::grid::tests::test_utils::{
    ascii_version, build_grid_file, legacy_version, TestSubGrid,
};
use crate::utils::angle_utils::SECONDS_PER_DEGREE;

#[test]
fn test_header_with_ascii_version() {
    let mut cursor = build_grid_file(ascii_version(), &[]);
    let file = GridShiftFile::read(&mut cursor).unwrap();

    let header = file.header();
    assert_eq!(header.version, GridVersion::Ascii("GSv2.1".to_string()));
    assert_eq!(header.coordinate_system_id, 4326);
    assert_eq!(header.scale_xy, 1.0);
    assert_eq!(header.scale_z, 1.0);
    assert!(file.grids().is_empty());
}

#[test]
fn test_header_with_legacy_numeric_version() {
    let mut cursor = build_grid_file(legacy_version(7), &[]);
    let file = GridShiftFile::read(&mut cursor).unwrap();
    assert_eq!(file.header().version, GridVersion::Legacy(7));
}

#[test]
fn test_bad_magic_is_rejected() {
    let mut bytes = build_grid_file(ascii_version(), &[]).into_inner();
    bytes[0] = b'X';
    let mut cursor = Cursor::new(bytes);

    assert!(matches!(
        GridShiftFile::read(&mut cursor),
        Err(CrsError::InvalidGridMagic(_))
    ));
}

#[test]
fn test_truncated_file_is_an_error() {
    let mut bytes = build_grid_file(
        ascii_version(),
        &[TestSubGrid::uniform_degrees(
            "ROOT", "NONE", -130.0, 48.0, -120.0, 52.0, 1.0, 1.0,
        )],
    )
    .into_inner();
    bytes.truncate(bytes.len() - 4);
    let mut cursor = Cursor::new(bytes);

    assert!(GridShiftFile::read(&mut cursor).is_err());
}

#[test]
fn test_invalid_dimension_is_rejected() {
    let mut grid =
        TestSubGrid::uniform_degrees("ROOT", "NONE", -130.0, 48.0, -120.0, 52.0, 1.0, 1.0);
    grid.dimension = 4;
    let mut cursor = build_grid_file(ascii_version(), &[grid]);

    assert!(matches!(
        GridShiftFile::read(&mut cursor),
        Err(CrsError::InvalidGridFile(_))
    ));
}

#[test]
fn test_grid_for_prefers_covering_child() {
    // Dense child lattice nested inside the root's western half
    let root = TestSubGrid::uniform_degrees("ROOT", "NONE", -130.0, 48.0, -120.0, 52.0, 1.0, 1.0);
    let child = TestSubGrid::uniform_degrees("CHILD", "ROOT", -130.0, 48.0, -125.0, 52.0, 2.0, 2.0);
    let mut cursor = build_grid_file(ascii_version(), &[root, child]);
    let file = GridShiftFile::read(&mut cursor).unwrap();

    let inside_child = file
        .grid_for(127.0 * SECONDS_PER_DEGREE, 50.0 * SECONDS_PER_DEGREE)
        .unwrap();
    assert_eq!(inside_child.name(), "CHILD");

    let root_only = file
        .grid_for(122.0 * SECONDS_PER_DEGREE, 50.0 * SECONDS_PER_DEGREE)
        .unwrap();
    assert_eq!(root_only.name(), "ROOT");
}

#[test]
fn test_grid_for_outside_every_extent_is_none() {
    let root = TestSubGrid::uniform_degrees("ROOT", "NONE", -130.0, 48.0, -120.0, 52.0, 1.0, 1.0);
    let mut cursor = build_grid_file(ascii_version(), &[root]);
    let file = GridShiftFile::read(&mut cursor).unwrap();

    assert!(file
        .grid_for(100.0 * SECONDS_PER_DEGREE, 50.0 * SECONDS_PER_DEGREE)
        .is_none());
}

#[test]
fn test_extent_edges_are_inclusive() {
    let root = TestSubGrid::uniform_degrees("ROOT", "NONE", -130.0, 48.0, -120.0, 52.0, 1.0, 1.0);
    let mut cursor = build_grid_file(ascii_version(), &[root]);
    let file = GridShiftFile::read(&mut cursor).unwrap();

    // All four corners of the degree box
    for (lon_deg, lat_deg) in [(-130.0, 48.0), (-130.0, 52.0), (-120.0, 48.0), (-120.0, 52.0)] {
        let lon_sec: f64 = -lon_deg * SECONDS_PER_DEGREE;
        let lat_sec: f64 = lat_deg * SECONDS_PER_DEGREE;
        assert!(file.grid_for(lon_sec, lat_sec).is_some());
    }
}
