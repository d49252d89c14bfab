//! Recursive directory scanning and quota filtering.
//!
//! This module provides the core scan-and-filter logic: a depth-first walk
//! that computes each directory's cumulative size and prints an indented
//! line for every directory exceeding the configured quota, down to a
//! bounded depth. Filesystem failures encountered mid-scan (permission
//! errors, vanished paths) are absorbed so a scan always runs to completion.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::config::ScanConfig;
use crate::utils::{directory_size, format_size};
use crate::volumes::Volumes;

/// How a printed directory is labelled.
///
/// A directory whose parent was itself printed has a visible anchor nearby,
/// so its bare name suffices. A directory whose parent was suppressed needs
/// the full path for context. The mode is inherited downward, one frame at
/// a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// Label with the final path component only
    ShortName,

    /// Label with the full path
    FullPath,
}

/// Directory scanner that reports quota-exceeding subtrees.
///
/// The scanner walks a tree depth-first, computing each directory's size
/// independently: ordinary directories are sized by summing every file
/// reachable beneath them, while volume roots are sized from the capacity
/// snapshot (`total - free`) taken at construction. Lines are written to
/// the caller's output stream in traversal order.
#[derive(Debug)]
pub struct Scanner {
    /// Configuration resolved at startup; immutable for the scan's lifetime
    config: ScanConfig,

    /// Capacity snapshot of the ready volumes, taken once at scan start
    volumes: Volumes,
}

impl Scanner {
    /// Create a scanner from a resolved configuration and volume snapshot.
    #[must_use]
    pub const fn new(config: ScanConfig, volumes: Volumes) -> Self {
        Self { config, volumes }
    }

    /// The volume snapshot this scanner consults for root sizing.
    #[must_use]
    pub const fn volumes(&self) -> &Volumes {
        &self.volumes
    }

    /// Scan the tree rooted at `path`, writing one line per directory whose
    /// size exceeds the quota.
    ///
    /// A missing or fully inaccessible root produces no output; silence is
    /// the designed signal for unreadable trees. Access failures below the
    /// root contribute zero bytes and never abort the traversal.
    ///
    /// # Errors
    ///
    /// Returns an error only when writing to `out` fails. Filesystem errors
    /// are absorbed internally.
    pub fn scan<W: Write>(&self, path: &Path, out: &mut W) -> io::Result<()> {
        self.scan_at(path, 0, DisplayMode::ShortName, out)
    }

    /// One recursion frame: size this directory, decide whether to print
    /// it, then visit its immediate child directories.
    fn scan_at<W: Write>(
        &self,
        path: &Path,
        depth: usize,
        display_mode: DisplayMode,
        out: &mut W,
    ) -> io::Result<()> {
        if depth > self.config.max_depth {
            return Ok(());
        }

        // The path may have been deleted between the parent's enumeration
        // and this call.
        if !path.exists() {
            return Ok(());
        }

        let is_volume_root = self.volumes.is_volume_root(path);

        // A volume root reports the whole volume's used capacity, which
        // accounts for filesystem overhead a file walk cannot see. Every
        // other directory is the sum of all file lengths beneath it.
        let size = if is_volume_root {
            self.volumes.used_bytes(path)
        } else {
            directory_size(path)
        };

        let printed = size > self.config.quota_bytes;

        if printed {
            writeln!(
                out,
                "{}{} - {}",
                indent(depth),
                label(path, is_volume_root, display_mode),
                format_size(size)
            )?;
        }

        // Children of a suppressed directory have no visible anchor above
        // them, so they carry the full path if they print.
        let child_mode = if printed {
            DisplayMode::ShortName
        } else {
            DisplayMode::FullPath
        };

        let Ok(entries) = fs::read_dir(path) else {
            return Ok(());
        };

        for entry in entries.flatten() {
            if entry.file_type().is_ok_and(|t| t.is_dir()) {
                self.scan_at(&entry.path(), depth + 1, child_mode, out)?;
            }
        }

        Ok(())
    }
}

/// Indentation prefix for a node at `depth`: no prefix at the root, then a
/// dash per level followed by a space.
fn indent(depth: usize) -> String {
    if depth == 0 {
        String::new()
    } else {
        format!("{} ", "-".repeat(depth))
    }
}

/// Printed label for a directory.
///
/// Volume roots always show their full path, as do directories whose
/// inherited display mode demands it; everything else shows its final
/// path component.
fn label(path: &Path, is_volume_root: bool, display_mode: DisplayMode) -> String {
    if is_volume_root || display_mode == DisplayMode::FullPath {
        return path.display().to_string();
    }

    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}
