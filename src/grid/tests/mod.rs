//! Tests for the grid shift engine

mod file_tests;
