//! Command-line interface definition and argument parsing.
//!
//! This module defines all command-line arguments, options, and their
//! validation using the [clap](https://docs.rs/clap/) library. It provides
//! structured access to user input.
//!
//! Helper methods on [`Cli`] accept a [`FileConfig`] reference so that
//! config-file values act as defaults that CLI arguments can override
//! (layered config).

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use heavy_dirs::config::file::{FileConfig, expand_tilde};

/// Quota applied when neither the CLI nor the config file provides one:
/// 10 GiB.
pub const DEFAULT_QUOTA_BYTES: u64 = 10 * (1 << 30);

/// Recursion depth applied when neither the CLI nor the config file
/// provides one.
pub const DEFAULT_MAX_DEPTH: usize = 5;

/// Top-level subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Inspect or initialise the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Subcommands for `config`.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration (file values + defaults for unset keys)
    Show,
    /// Write a default config.toml if none exists yet
    Init,
    /// Print the path to the config file
    Path,
}

/// Main command-line interface structure.
///
/// Helper methods accept a [`FileConfig`] reference so that config-file
/// values act as defaults when the corresponding CLI argument is not
/// provided.
#[derive(Parser)]
#[command(name = "heavy-dirs")]
#[command(
    about = "Report directories whose cumulative size exceeds a quota, as an indented tree down to a bounded depth"
)]
#[command(version)]
pub struct Cli {
    /// Subcommand (e.g. `config`)
    #[command(subcommand)]
    pub subcommand: Option<Commands>,

    /// Directory to scan
    ///
    /// When omitted (and no default directory is configured), every ready
    /// volume is scanned in turn.
    path: Option<PathBuf>,

    /// Minimum size for a directory to be displayed
    ///
    /// Accepts unit suffixes (B, KB, MB, GB, binary multipliers) and sums
    /// multiple tokens: "1GB 512MB". A bare integer is read as megabytes.
    /// Defaults to 10 GB.
    #[arg(short = 'q', long)]
    quota: Option<String>,

    /// Maximum depth of the displayed tree of directories exceeding the quota
    ///
    /// A value of 0 reports on the scan root only. Defaults to 5.
    #[arg(short = 'd', long)]
    depth: Option<usize>,
}

impl Cli {
    /// Resolve the scan target from CLI args and config file.
    ///
    /// Priority: CLI positional > config file `dir` > `None` (scan every
    /// ready volume). Tilde expansion is applied to paths originating from
    /// the config file.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use clap::Parser;
    /// # use heavy_dirs::config::FileConfig;
    /// # use std::path::PathBuf;
    /// # mod cli { include!("cli.rs"); }
    /// # use cli::Cli;
    /// let args = Cli::parse_from(&["heavy-dirs", "/var/log"]);
    /// assert_eq!(args.target(&FileConfig::default()), Some(PathBuf::from("/var/log")));
    /// ```
    #[must_use]
    pub fn target(&self, config: &FileConfig) -> Option<PathBuf> {
        self.path
            .clone()
            .or_else(|| config.dir.as_ref().map(|dir| expand_tilde(dir)))
    }

    /// The quota string to parse, if any was given.
    ///
    /// Priority: CLI argument > config file > `None` (caller applies
    /// [`DEFAULT_QUOTA_BYTES`]).
    #[must_use]
    pub fn quota_string(&self, config: &FileConfig) -> Option<String> {
        self.quota
            .clone()
            .or_else(|| config.scanning.quota.clone())
    }

    /// Resolve the maximum recursion depth.
    ///
    /// Priority: CLI argument > config file > [`DEFAULT_MAX_DEPTH`].
    #[must_use]
    pub fn max_depth(&self, config: &FileConfig) -> usize {
        self.depth
            .or(config.scanning.depth)
            .unwrap_or(DEFAULT_MAX_DEPTH)
    }
}
