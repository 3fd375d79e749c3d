//! Output write cache for incremental builds.
//!
//! Rendering all answer pages is fast; rewriting them is what disturbs
//! downstream tooling (deploy diffs, file watchers, CDN uploads keyed on
//! mtime). Because generation is deterministic, a page whose content hash
//! matches the previous build's can be left untouched on disk.
//!
//! # Design
//!
//! The manifest maps each output path (relative to the output directory,
//! `/`-separated) to the SHA-256 of the bytes last written there. A write is
//! skipped when:
//! 1. the manifest has an entry for the path with the same hash, and
//! 2. the file still exists on disk.
//!
//! Paths that were written by a previous build but are no longer produced
//! (a slug removed from the registry) are pruned from the manifest and their
//! files deleted, so the output tree never serves stale answers.
//!
//! ## Storage
//!
//! The manifest is a JSON file at `<output_dir>/.answers-cache.json`.
//!
//! ## Bypassing the cache
//!
//! `build --no-cache` writes every file through [`write_file`] without
//! consulting the hashes. The previous manifest is still loaded, so pages
//! it tracked are pruned the same way as in a cached build.

use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Name of the cache manifest file within the output directory.
const MANIFEST_FILENAME: &str = ".answers-cache.json";

/// Version of the cache manifest format. Bump this to invalidate all
/// existing caches when the format or hashing changes.
const MANIFEST_VERSION: u32 = 1;

/// On-disk manifest mapping output paths to content hashes.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CacheManifest {
    pub version: u32,
    pub entries: BTreeMap<String, String>,
}

impl CacheManifest {
    /// Create an empty manifest (first build).
    pub fn empty() -> Self {
        Self {
            version: MANIFEST_VERSION,
            entries: BTreeMap::new(),
        }
    }

    /// Load from the output directory. Returns an empty manifest if the
    /// file doesn't exist or can't be parsed (version mismatch, corruption).
    pub fn load(output_dir: &Path) -> Self {
        let content = match std::fs::read_to_string(manifest_path(output_dir)) {
            Ok(c) => c,
            Err(_) => return Self::empty(),
        };
        match serde_json::from_str::<Self>(&content) {
            Ok(m) if m.version == MANIFEST_VERSION => m,
            _ => Self::empty(),
        }
    }

    /// Save to the output directory.
    pub fn save(&self, output_dir: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(manifest_path(output_dir), json)
    }

    /// Whether `rel_path` already holds content with this hash.
    pub fn is_current(&self, rel_path: &str, hash: &str, output_dir: &Path) -> bool {
        self.entries.get(rel_path).is_some_and(|h| h == hash) && output_dir.join(rel_path).exists()
    }

    pub fn insert(&mut self, rel_path: String, hash: String) {
        self.entries.insert(rel_path, hash);
    }

    /// Drop entries for paths not in `live`, returning the dropped paths.
    pub fn prune(&mut self, live: &BTreeSet<String>) -> Vec<String> {
        let stale: Vec<String> = self
            .entries
            .keys()
            .filter(|path| !live.contains(*path))
            .cloned()
            .collect();
        for path in &stale {
            self.entries.remove(path);
        }
        stale
    }
}

/// SHA-256 of a byte slice, as a hex string.
pub fn hash_bytes(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// Write `contents` to `output_dir/rel_path` unless the manifest shows the
/// same bytes are already there. Parent directories are created as needed.
pub fn write_if_changed(
    output_dir: &Path,
    rel_path: &str,
    contents: &[u8],
    manifest: &mut CacheManifest,
    stats: &mut CacheStats,
) -> io::Result<()> {
    if manifest.is_current(rel_path, &hash_bytes(contents), output_dir) {
        stats.unchanged();
        return Ok(());
    }
    write_file(output_dir, rel_path, contents, manifest, stats)
}

/// Write `contents` to `output_dir/rel_path` unconditionally and record its
/// hash in the manifest.
pub fn write_file(
    output_dir: &Path,
    rel_path: &str,
    contents: &[u8],
    manifest: &mut CacheManifest,
    stats: &mut CacheStats,
) -> io::Result<()> {
    let hash = hash_bytes(contents);
    let path = output_dir.join(rel_path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, contents)?;
    manifest.insert(rel_path.to_string(), hash);
    stats.written();
    Ok(())
}

/// Summary of cache behavior for a build run.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CacheStats {
    pub written: u32,
    pub unchanged: u32,
    pub removed: u32,
}

impl CacheStats {
    pub fn written(&mut self) {
        self.written += 1;
    }

    pub fn unchanged(&mut self) {
        self.unchanged += 1;
    }

    pub fn removed(&mut self) {
        self.removed += 1;
    }

    pub fn total(&self) -> u32 {
        self.written + self.unchanged
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unchanged > 0 {
            write!(
                f,
                "{} unchanged, {} written ({} total)",
                self.unchanged,
                self.written,
                self.total()
            )?;
        } else {
            write!(f, "{} written", self.written)?;
        }
        if self.removed > 0 {
            write!(f, ", {} removed", self.removed)?;
        }
        Ok(())
    }
}

/// Resolve the cache manifest path for an output directory.
pub fn manifest_path(output_dir: &Path) -> PathBuf {
    output_dir.join(MANIFEST_FILENAME)
}
