//! Configuration types and persistent settings.
//!
//! Resolved scan configuration lives in [`scan`]; the optional TOML config
//! file layer lives in [`file`].

pub mod file;
pub mod scan;

pub use file::FileConfig;
pub use scan::ScanConfig;
