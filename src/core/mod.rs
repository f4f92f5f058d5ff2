//! core/mod.rs
//!
//! The brain of both tools:
//! - Discover candidate audio file paths (filesystem walk)
//! - Read/write tags (metadata IO)
//! - Reconcile metadata sources for one file (typed > bulk > existing)
//! - Drive the FLAC -> MP3 conversion batch
//!
//! - Keep the pipelines explicit and modular:
//!   (A) discover paths -> Vec<PathBuf>
//!   (B) read tags -> Vec<Option<TrackMetadata>>
//!
//! Nothing in here prints or reads the terminal directly: prompts go through
//! `ports::Interaction`, so the terminal front end stays thin.

pub mod config;
pub mod convert;
pub mod errlog;
pub mod error;
pub mod export;
pub mod library;
pub mod lookup;
pub mod ports;
pub mod reconcile;
pub mod selection;
pub mod tags;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use library::Scan;
use ports::TagStore;
use types::TrackMetadata;

/// Discover matching files under multiple roots.
///
/// - De-dupes across overlapping roots by full path
/// - Sorts paths once (core owns ordering, the front end shouldn't)
pub fn scan_paths(roots: &[PathBuf], scan: Scan<'_>) -> Result<Vec<PathBuf>, String> {
    let mut seen: HashSet<PathBuf> = HashSet::with_capacity(1024);
    let mut out: Vec<PathBuf> = Vec::new();

    for root in roots {
        for path in library::scan_files(root, scan)? {
            if seen.insert(path.clone()) {
                out.push(path);
            }
        }
    }

    out.sort();
    Ok(out)
}

/// Convenience for callers that have a single root.
pub fn scan_paths_one(root: &Path, scan: Scan<'_>) -> Result<Vec<PathBuf>, String> {
    scan_paths(&[root.to_path_buf()], scan)
}

/// Read tags for a set of already-discovered paths.
///
/// - Never fails hard per-file: unreadable files become `None`
/// - Output order matches `paths`
pub fn read_tracks(store: &dyn TagStore, paths: &[PathBuf]) -> Vec<Option<TrackMetadata>> {
    paths
        .iter()
        .map(|path| match store.read(path) {
            Ok(meta) => Some(meta),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "tag read failed");
                None
            }
        })
        .collect()
}

/// `song.mp3` -> `song`
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string()
}

/// Final component for display / logs.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
