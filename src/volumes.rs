//! Volume enumeration and capacity snapshots.
//!
//! This module lists the mounted, ready volumes on the host and records a
//! point-in-time capacity snapshot for each one. Volume roots are sized from
//! these snapshots (`total - free`) rather than by summing files, since the
//! capacity figures account for filesystem overhead and reserved space that
//! a file walk never sees.

use std::path::{Path, PathBuf};

use sysinfo::Disks;

/// A read-only capacity snapshot of one mounted volume.
///
/// Obtained once at scan start; no live updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Volume {
    /// The topmost path of the mounted filesystem (e.g. `/` or `C:\`)
    pub root_path: PathBuf,

    /// Total capacity of the volume, in bytes
    pub total_bytes: u64,

    /// Free capacity of the volume, in bytes
    pub free_bytes: u64,
}

impl Volume {
    /// Used capacity of the volume: `total - free`.
    ///
    /// This is authoritative capacity usage, not logical content size; it
    /// may diverge from a file-sum total of the same tree.
    #[must_use]
    pub const fn used_bytes(&self) -> u64 {
        self.total_bytes.saturating_sub(self.free_bytes)
    }
}

/// A snapshot of all ready volumes, taken once per run.
#[derive(Debug, Default)]
pub struct Volumes {
    volumes: Vec<Volume>,
}

impl Volumes {
    /// Take a point-in-time snapshot of every mounted, ready volume.
    ///
    /// Volumes whose mount point is not an absolute path are skipped, and
    /// duplicate mount points (bind mounts, overlay listings) are collapsed
    /// to their first occurrence. The result is sorted by root path so
    /// output order is stable across runs.
    #[must_use]
    pub fn snapshot() -> Self {
        let disks = Disks::new_with_refreshed_list();

        let mut volumes: Vec<Volume> = disks
            .iter()
            .filter_map(|disk| {
                let mount = disk.mount_point().to_path_buf();
                if !mount.is_absolute() {
                    return None;
                }
                Some(Volume {
                    root_path: mount,
                    total_bytes: disk.total_space(),
                    free_bytes: disk.available_space(),
                })
            })
            .collect();

        volumes.sort_by(|a, b| a.root_path.cmp(&b.root_path));
        volumes.dedup_by(|a, b| a.root_path == b.root_path);

        Self { volumes }
    }

    /// Build a snapshot from an explicit volume list.
    ///
    /// Used when the caller already knows the volume layout, and by tests
    /// that need a deterministic set of roots.
    #[must_use]
    pub const fn from_volumes(volumes: Vec<Volume>) -> Self {
        Self { volumes }
    }

    /// Iterate over the snapshot's volumes in root-path order.
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = &Volume> {
        self.volumes.iter()
    }

    /// Number of volumes in the snapshot.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.volumes.len()
    }

    /// Whether the snapshot contains no volumes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.volumes.is_empty()
    }

    /// Whether `path`, normalized, is the root of one of the snapshot's
    /// volumes.
    #[must_use]
    pub fn is_volume_root(&self, path: &Path) -> bool {
        let normalized = normalize(path);
        self.volumes.iter().any(|v| v.root_path == normalized)
    }

    /// Used capacity of the volume rooted at `path`, in bytes.
    ///
    /// Returns 0 when no volume in the snapshot matches — an unavailable
    /// volume contributes nothing rather than failing the scan.
    #[must_use]
    pub fn used_bytes(&self, path: &Path) -> u64 {
        let normalized = normalize(path);
        self.volumes
            .iter()
            .find(|v| v.root_path == normalized)
            .map_or(0, Volume::used_bytes)
    }
}

impl<'a> IntoIterator for &'a Volumes {
    type Item = &'a Volume;
    type IntoIter = std::slice::Iter<'a, Volume>;

    fn into_iter(self) -> Self::IntoIter {
        self.volumes.iter()
    }
}

/// Resolve a path to its canonical form, falling back to the path as given
/// when it cannot be resolved (vanished, permission denied).
fn normalize(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
