//! Core library for the `heavy-dirs` CLI tool.
//!
//! Provides the recursive scan-and-filter engine ([`scanner`]), volume
//! enumeration and capacity snapshots ([`volumes`]), resolved and
//! file-based configuration ([`config`]), and size parsing/formatting
//! helpers ([`utils`]).

pub mod config;
pub mod scanner;
pub mod utils;
pub mod volumes;

pub use config::ScanConfig;
pub use scanner::Scanner;
pub use volumes::{Volume, Volumes};
