//! Utility functions and helpers.
//!
//! This module contains utility functions used throughout the application,
//! such as size parsing, formatting, and directory measurement helpers.

pub mod size;

pub use size::{directory_size, format_size, parse_quota};
