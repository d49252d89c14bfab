//! # heavy-dirs
//!
//! A CLI tool that reports which directories on a filesystem consume
//! disproportionate space, by recursively walking a tree, summing file
//! sizes, and printing only the subtrees whose cumulative size exceeds a
//! configurable quota, down to a bounded depth.
//!
//! ## Features
//!
//! - Scan an explicit directory or every ready volume
//! - Volume roots sized from capacity snapshots (used = total - free)
//! - Quota strings with unit suffixes, summed: "1GB 512MB"
//! - Partial failures (permission errors, vanished paths) absorbed without
//!   aborting the scan
//! - Persistent configuration via `~/.config/heavy-dirs/config.toml`
//!
//! ## Usage
//!
//! ```bash
//! # Scan every ready volume with the default 10 GB quota
//! heavy-dirs
//!
//! # Scan a directory with a custom quota and depth
//! heavy-dirs /var -q 512MB -d 3
//! ```

mod cli;

use std::io::{self, Write};
use std::process::exit;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands, ConfigCommand, DEFAULT_QUOTA_BYTES};
use heavy_dirs::config::{FileConfig, ScanConfig};
use heavy_dirs::scanner::Scanner;
use heavy_dirs::utils::{format_size, parse_quota};
use heavy_dirs::volumes::Volumes;

/// Entry point for the heavy-dirs application.
///
/// This function handles all errors gracefully by calling [`inner_main`]
/// and printing any errors to stderr before exiting with a non-zero status
/// code.
fn main() {
    if let Err(err) = inner_main() {
        eprintln!("Error: {err}");

        exit(1);
    }
}

/// Main application logic that can return errors.
///
/// Resolves the configuration (CLI arguments layered over the config
/// file), snapshots the ready volumes, and scans either the explicit
/// target or every volume in turn. Only configuration errors surface here;
/// traversal failures are absorbed inside the scanner.
///
/// # Errors
///
/// Returns errors from quota parsing, config subcommand handling, or
/// writing to standard output.
fn inner_main() -> Result<()> {
    let args = Cli::parse();

    if let Some(Commands::Config { command }) = &args.subcommand {
        return handle_config_command(command);
    }

    let file_config = load_config();

    let quota_bytes = match args.quota_string(&file_config) {
        Some(quota) => parse_quota(&quota)?,
        None => DEFAULT_QUOTA_BYTES,
    };
    let target = args.target(&file_config);

    let config = ScanConfig {
        target: target.clone(),
        quota_bytes,
        max_depth: args.max_depth(&file_config),
    };
    let scanner = Scanner::new(config, Volumes::snapshot());

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match target {
        Some(path) => scanner.scan(&path, &mut out)?,
        None => {
            for volume in scanner.volumes() {
                writeln!(
                    out,
                    "Scanning drive: {} - {}",
                    volume.root_path.display(),
                    format_size(volume.used_bytes())
                )?;
                scanner.scan(&volume.root_path, &mut out)?;
            }
        }
    }

    Ok(())
}

// ── Config subcommand ────────────────────────────────────────────────

/// Default config file template written by `config init`.
const CONFIG_TEMPLATE: &str = r#"# heavy-dirs configuration
# All values shown are their defaults. Uncomment and change as needed.

# Default directory to scan (absent: scan every ready volume)
# dir = "~/data"

[scanning]
# Minimum size for a directory to be displayed (e.g. "10GB", "1GB 512MB";
# a bare integer is read as megabytes)
# quota = "10GB"

# Maximum depth of the displayed tree below the scan root
# depth = 5
"#;

/// Dispatch a `config` subcommand.
fn handle_config_command(cmd: &ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Path => match FileConfig::config_path() {
            Some(path) => println!("{}", path.display()),
            None => anyhow::bail!("Could not determine the config directory on this platform"),
        },
        ConfigCommand::Show => show_config()?,
        ConfigCommand::Init => init_config()?,
    }
    Ok(())
}

/// Print the effective configuration (file values merged with defaults).
fn show_config() -> Result<()> {
    let path = FileConfig::config_path();

    let (file_exists, config) = match &path {
        Some(p) if p.exists() => (true, FileConfig::load()?),
        _ => (false, FileConfig::default()),
    };

    match &path {
        Some(p) if file_exists => println!("Config file: {} (found)", p.display()),
        Some(p) => println!(
            "Config file: {} (not found - showing defaults)",
            p.display()
        ),
        None => println!("Config file: (cannot determine path on this platform)"),
    }

    println!();
    println!("{}", format_config(&config));
    Ok(())
}

/// Format a [`FileConfig`] as a human-readable table, showing defaults for
/// `None` fields.
fn format_config(config: &FileConfig) -> String {
    let dir = config.dir.as_ref().map_or_else(
        || "(all ready volumes)  (default)".to_string(),
        |p| format!("\"{}\"", p.display()),
    );
    let quota = config.scanning.quota.as_ref().map_or_else(
        || format!("\"{}\"  (default)", format_size(DEFAULT_QUOTA_BYTES)),
        |q| format!("\"{q}\""),
    );
    let depth = config.scanning.depth.map_or_else(
        || format!("{}  (default)", cli::DEFAULT_MAX_DEPTH),
        |d| d.to_string(),
    );

    format!(
        "\
dir    = {dir}

[scanning]
quota  = {quota}
depth  = {depth}"
    )
}

/// Write a default config template to the config file path if it does not
/// exist yet.
fn init_config() -> Result<()> {
    let Some(path) = FileConfig::config_path() else {
        anyhow::bail!("Could not determine the config directory on this platform");
    };

    if path.exists() {
        println!("Config file already exists at: {}", path.display());
        println!("Remove it first if you want to regenerate it.");
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {e}",
                parent.display()
            )
        })?;
    }

    std::fs::write(&path, CONFIG_TEMPLATE)
        .map_err(|e| anyhow::anyhow!("Failed to write config file {}: {e}", path.display()))?;

    println!("Config file written to: {}", path.display());
    Ok(())
}

/// Load the configuration file, falling back to defaults on failure.
fn load_config() -> FileConfig {
    match FileConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {e}", "Warning: Failed to load config file:".yellow());
            FileConfig::default()
        }
    }
}
