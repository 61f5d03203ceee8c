//! Integration tests for the coordinate transformation pipeline

extern crate std;

use std::io::Cursor;
use std::sync::Arc;

use approx::assert_relative_eq;
use byteorder::{BigEndian, WriteBytesExt};

use crskit::grid::GridShiftFile;
use crskit::operation::point::OperationPoint;
use crskit::{
    CatalogRegistry, CoordinatesOperation, CrsKit, CrsProvider, GsbGridShiftOperation,
    HorizontalShiftOperation, OperationBuilder,
};

/// Serializes a one-sub-grid shift file covering a degree box with a
/// constant shift at every node
fn grid_file_bytes(
    name: &str,
    min_lon_deg: f64,
    min_lat_deg: f64,
    max_lon_deg: f64,
    max_lat_deg: f64,
    lon_shift_sec: f32,
    lat_shift_sec: f32,
) -> Vec<u8> {
    let mut buffer = Vec::new();
    buffer.extend_from_slice(b"GSHIFT");
    buffer.extend_from_slice(b"GSv2.1\0\0"); // version window
    buffer.write_i32::<BigEndian>(4269).unwrap(); // coordinate system id
    buffer.write_f64::<BigEndian>(1.0).unwrap(); // scale_xy
    buffer.write_f64::<BigEndian>(1.0).unwrap(); // scale_z
    buffer.write_i32::<BigEndian>(1).unwrap(); // sub-grid count

    // Fixed ASCII name fields, space padded
    let mut field = [b' '; 8];
    field[..name.len()].copy_from_slice(name.as_bytes());
    buffer.extend_from_slice(&field);
    buffer.extend_from_slice(b"NONE    ");

    // Extent in grid convention: arc-seconds, longitude positive west
    let min_lon = -max_lon_deg * 3600.0;
    let max_lon = -min_lon_deg * 3600.0;
    let min_lat = min_lat_deg * 3600.0;
    let max_lat = max_lat_deg * 3600.0;
    let cols = 3;
    let rows = 3;
    buffer.write_f64::<BigEndian>(min_lon).unwrap();
    buffer.write_f64::<BigEndian>(min_lat).unwrap();
    buffer
        .write_f64::<BigEndian>((max_lon - min_lon) / (cols - 1) as f64)
        .unwrap();
    buffer
        .write_f64::<BigEndian>((max_lat - min_lat) / (rows - 1) as f64)
        .unwrap();
    buffer.write_i32::<BigEndian>(cols).unwrap();
    buffer.write_i32::<BigEndian>(rows).unwrap();
    buffer.write_i32::<BigEndian>(2).unwrap(); // dimension

    for _ in 0..(cols * rows) {
        buffer.write_f32::<BigEndian>(lon_shift_sec).unwrap();
        buffer.write_f32::<BigEndian>(lat_shift_sec).unwrap();
    }
    buffer
}

fn shift_from_bytes(bytes: Vec<u8>) -> GsbGridShiftOperation {
    let mut cursor = Cursor::new(bytes);
    let file = GridShiftFile::read(&mut cursor).unwrap();
    GsbGridShiftOperation::new(Arc::new(file))
}

#[test]
fn test_geographic_to_web_mercator_workflow() {
    let registry = CatalogRegistry::builtin();
    let builder = OperationBuilder::new();

    let wgs84 = registry.resolve("EPSG:4326").unwrap();
    let mercator = registry.resolve("3857").unwrap();

    let operation = builder.build(&wgs84, &mercator).unwrap();
    let mut point = OperationPoint::new(13.4050, 52.5200);
    operation.perform(&mut point);

    // Berlin in EPSG:3857
    assert_relative_eq!(point.x, 1492237.77, epsilon = 0.5);
    assert_relative_eq!(point.y, 6894699.80, epsilon = 0.5);

    let back = builder.build(&mercator, &wgs84).unwrap();
    back.perform(&mut point);
    assert_relative_eq!(point.x, 13.4050, epsilon = 1e-7);
    assert_relative_eq!(point.y, 52.5200, epsilon = 1e-7);
}

#[test]
fn test_datum_shift_with_registered_grid() {
    let registry = CatalogRegistry::builtin();
    let mut builder = OperationBuilder::new();

    // +3.6 arc-seconds of westing, +7.2 arc-seconds of northing over
    // a regional box
    let shift = shift_from_bytes(grid_file_bytes(
        "PRAIRIE", -120.0, 48.0, -110.0, 52.0, 3.6, 7.2,
    ));
    builder.register_horizontal_shift(
        "North American Datum 1927",
        "North American Datum 1983",
        Arc::new(shift),
    );

    let nad27 = registry.resolve("4267").unwrap();
    let nad83 = registry.resolve("4269").unwrap();
    let operation = builder.build(&nad27, &nad83).unwrap();

    let mut inside = OperationPoint::new(-115.0, 50.0);
    operation.perform(&mut inside);
    assert_relative_eq!(inside.x, -115.001, epsilon = 1e-9);
    assert_relative_eq!(inside.y, 50.002, epsilon = 1e-9);

    // Outside the grid the point passes through bit-identical
    let mut outside = OperationPoint::new(-75.0, 45.0);
    operation.perform(&mut outside);
    assert_eq!(outside.x.to_bits(), (-75.0f64).to_bits());
    assert_eq!(outside.y.to_bits(), (45.0f64).to_bits());
}

#[test]
fn test_regional_grids_first_success_across_files() {
    let west = shift_from_bytes(grid_file_bytes(
        "WEST", -130.0, 48.0, -120.0, 52.0, 3.6, 3.6,
    ));
    let east = shift_from_bytes(grid_file_bytes(
        "EAST", -120.0, 48.0, -110.0, 52.0, 7.2, 7.2,
    ));

    let mut builder = OperationBuilder::new();
    builder.register_horizontal_shift(
        "North American Datum 1927",
        "North American Datum 1983",
        Arc::new(west),
    );
    builder.register_horizontal_shift(
        "North American Datum 1927",
        "North American Datum 1983",
        Arc::new(east),
    );

    let registry = CatalogRegistry::builtin();
    let nad27 = registry.resolve("4267").unwrap();
    let nad83 = registry.resolve("4269").unwrap();
    let operation = builder.build(&nad27, &nad83).unwrap();

    let mut in_west = OperationPoint::new(-125.0, 50.0);
    operation.perform(&mut in_west);
    assert_relative_eq!(in_west.x, -125.001, epsilon = 1e-9);

    let mut in_east = OperationPoint::new(-115.0, 50.0);
    operation.perform(&mut in_east);
    assert_relative_eq!(in_east.x, -115.002, epsilon = 1e-9);
}

#[test]
fn test_shift_applies_inside_projected_chain() {
    // NAD27 geographic to WGS84 Web Mercator: the grid shift runs at
    // the geographic stage before projection
    let shift = shift_from_bytes(grid_file_bytes(
        "PRAIRIE", -120.0, 48.0, -110.0, 52.0, 3.6, 0.0,
    ));

    let mut builder = OperationBuilder::new();
    builder.register_horizontal_shift(
        "North American Datum 1927",
        "World Geodetic System 1984",
        Arc::new(shift),
    );

    let registry = CatalogRegistry::builtin();
    let nad27 = registry.resolve("4267").unwrap();
    let mercator = registry.resolve("3857").unwrap();
    let wgs84 = registry.resolve("4326").unwrap();

    let shifted_chain = builder.build(&nad27, &mercator).unwrap();
    let unshifted_chain = builder.build(&wgs84, &mercator).unwrap();

    let mut shifted = OperationPoint::new(-115.0, 50.0);
    shifted_chain.perform(&mut shifted);

    // Same point already expressed in WGS84, shifted by hand
    let mut reference = OperationPoint::new(-115.001, 50.0);
    unshifted_chain.perform(&mut reference);

    assert_relative_eq!(shifted.x, reference.x, epsilon = 1e-4);
    assert_relative_eq!(shifted.y, reference.y, epsilon = 1e-4);
}

#[test]
fn test_compound_transformation_carries_height() {
    let registry = CatalogRegistry::builtin();
    let builder = OperationBuilder::new();

    let compound = registry.resolve("5498").unwrap();
    let operation = builder.build(&compound, &compound).unwrap();

    let mut point = OperationPoint::new_3d(-100.0, 40.0, 123.45);
    operation.perform(&mut point);
    assert_eq!(point.z, 123.45);
}

#[test]
fn test_facade_registers_grid_from_disk() {
    let dir = std::env::temp_dir();
    let grid_path = dir.join(format!("crskit-facade-{}.gsb", std::process::id()));
    let log_path = dir.join(format!("crskit-facade-{}.log", std::process::id()));
    std::fs::write(
        &grid_path,
        grid_file_bytes("PRAIRIE", -120.0, 48.0, -110.0, 52.0, 3.6, 7.2),
    )
    .unwrap();

    let mut kit = CrsKit::new(log_path.to_str()).unwrap();
    kit.register_grid(
        grid_path.to_str().unwrap(),
        "North American Datum 1927",
        "North American Datum 1983",
    )
    .unwrap();

    let (x, y) = kit.transform("4267", "4269", -115.0, 50.0).unwrap();
    assert_relative_eq!(x, -115.001, epsilon = 1e-9);
    assert_relative_eq!(y, 50.002, epsilon = 1e-9);

    std::fs::remove_file(&grid_path).unwrap();
    std::fs::remove_file(&log_path).ok();
}

#[test]
fn test_direct_shift_outside_coverage_reports_failure() {
    let shift = shift_from_bytes(grid_file_bytes(
        "PRAIRIE", -120.0, 48.0, -110.0, 52.0, 3.6, 7.2,
    ));

    let mut point = OperationPoint::new(10.0, 10.0);
    assert!(!shift.horizontal_shift(&mut point));
    assert_eq!(point, OperationPoint::new(10.0, 10.0));
}
