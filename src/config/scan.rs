//! Scan configuration resolved at startup.
//!
//! This module defines the immutable configuration that drives a scan. It
//! is resolved once by the entry point (CLI arguments layered over the
//! config file) and passed by value into the scanner.

use std::path::PathBuf;

/// Configuration for one scan run.
///
/// Immutable once resolved. The only state shared across recursion frames
/// is this read-only configuration; everything else lives in the frame.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Directory to scan; `None` means every ready volume
    pub target: Option<PathBuf>,

    /// Threshold in bytes below which directories are not printed
    pub quota_bytes: u64,

    /// Maximum recursion depth below the scan root
    pub max_depth: usize,
}
