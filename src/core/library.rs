//! Recursive file discovery.

use std::path::{Path, PathBuf};

/// What to look for while walking a folder tree.
#[derive(Debug, Clone, Copy)]
pub struct Scan<'a> {
    /// Extension without the dot, matched case-insensitively.
    pub ext: &'a str,
    /// Directory names that are never descended into.
    pub skip_dirs: &'a [&'a str],
}

impl<'a> Scan<'a> {
    pub fn new(ext: &'a str) -> Self {
        Self { ext, skip_dirs: &[] }
    }

    pub fn skipping(mut self, names: &'a [&'a str]) -> Self {
        self.skip_dirs = names;
        self
    }

    fn skips(&self, dir: &Path) -> bool {
        dir.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| self.skip_dirs.contains(&n))
    }
}

/// Unsorted; callers order the result.
pub fn scan_files(root: &Path, scan: Scan<'_>) -> Result<Vec<PathBuf>, String> {
    let mut out = Vec::new();
    walk_dir(root, &scan, &mut out)?;
    Ok(out)
}

fn walk_dir(dir: &Path, scan: &Scan<'_>, out: &mut Vec<PathBuf>) -> Result<(), String> {
    let entries = std::fs::read_dir(dir).map_err(|e| format!("{dir:?}: {e}"))?;

    for entry in entries {
        let entry = entry.map_err(|e| e.to_string())?;
        let path = entry.path();

        if path.is_dir() {
            if !scan.skips(&path) {
                walk_dir(&path, scan, out)?;
            }
        } else if path.is_file() && has_extension(&path, scan.ext) {
            out.push(path);
        }
    }

    Ok(())
}

pub fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}
