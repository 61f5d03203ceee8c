//! String utility functions
//!
//! Utilities for working with fixed-width record fields and
//! catalog-insensitive name comparison.

/// Trims trailing nul characters from a byte buffer
pub fn trim_trailing_nulls(buffer: &mut Vec<u8>) {
    while !buffer.is_empty() && buffer[buffer.len() - 1] == 0 {
        buffer.pop();
    }
}

/// Trims trailing nul and space padding from a fixed-width record field
pub fn trim_trailing_padding(buffer: &mut Vec<u8>) {
    while !buffer.is_empty() {
        let last = buffer[buffer.len() - 1];
        if last == 0 || last == b' ' {
            buffer.pop();
        } else {
            break;
        }
    }
}

/// Normalizes a name for comparison and digest purposes
///
/// Catalogs spell the same parameter with different casing and spacing
/// ("False easting", "FALSE easting", " false  easting "), so names are
/// lower-cased and internal whitespace runs collapse to a single space
/// before any comparison or hashing.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_trailing_padding() {
        let mut buffer = b"NONE  \0\0".to_vec();
        trim_trailing_padding(&mut buffer);
        assert_eq!(buffer, b"NONE");
    }

    #[test]
    fn test_normalize_name_case_and_whitespace() {
        assert_eq!(normalize_name("False Easting"), "false easting");
        assert_eq!(normalize_name("  FALSE   easting "), "false easting");
        assert_eq!(normalize_name("false easting"), "false easting");
    }
}
