//! Primitive readers for the grid shift binary format
//!
//! The GSB-style grid format stores all multi-byte values big-endian and
//! its string fields as fixed-width ASCII padded with spaces or nuls.
//! These helpers wrap `byteorder` for the handful of shapes the format
//! actually uses.

use byteorder::{BigEndian, ReadBytesExt};
use std::io::Read;

use crate::crs::errors::{CrsError, CrsResult};
use crate::utils::string_utils;

/// Reads a big-endian i32
pub fn read_i32(reader: &mut dyn Read) -> CrsResult<i32> {
    Ok(reader.read_i32::<BigEndian>()?)
}

/// Reads a big-endian f32
pub fn read_f32(reader: &mut dyn Read) -> CrsResult<f32> {
    Ok(reader.read_f32::<BigEndian>()?)
}

/// Reads a big-endian f64
pub fn read_f64(reader: &mut dyn Read) -> CrsResult<f64> {
    Ok(reader.read_f64::<BigEndian>()?)
}

/// Reads `len` raw bytes
pub fn read_bytes(reader: &mut dyn Read, len: usize) -> CrsResult<Vec<u8>> {
    let mut buffer = vec![0u8; len];
    reader.read_exact(&mut buffer)?;
    Ok(buffer)
}

/// Reads a fixed-width ASCII field, trimming nul and space padding
pub fn read_fixed_ascii(reader: &mut dyn Read, len: usize) -> CrsResult<String> {
    let mut buffer = read_bytes(reader, len)?;
    string_utils::trim_trailing_padding(&mut buffer);

    match String::from_utf8(buffer) {
        Ok(s) => Ok(s),
        Err(e) => Err(CrsError::InvalidGridFile(format!(
            "non-ASCII field in grid record: {}",
            e
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::{BigEndian, WriteBytesExt};
    use std::io::Cursor;

    #[test]
    fn test_read_big_endian_primitives() {
        let mut buffer = Vec::new();
        buffer.write_i32::<BigEndian>(-42).unwrap();
        buffer.write_f64::<BigEndian>(6378137.0).unwrap();
        buffer.write_f32::<BigEndian>(1.5).unwrap();
        let mut cursor = Cursor::new(buffer);

        assert_eq!(read_i32(&mut cursor).unwrap(), -42);
        assert_eq!(read_f64(&mut cursor).unwrap(), 6378137.0);
        assert_eq!(read_f32(&mut cursor).unwrap(), 1.5);
    }

    #[test]
    fn test_read_fixed_ascii_trims_padding() {
        let mut cursor = Cursor::new(b"ALBERTA \0\0".to_vec());
        let name = read_fixed_ascii(&mut cursor, 10).unwrap();
        assert_eq!(name, "ALBERTA");
    }
}
