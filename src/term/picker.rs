//! Native macOS dialogs through `osascript`.
//!
//! A cancelled dialog exits nonzero; that and any spawn failure map to `None`.

use std::path::PathBuf;
use std::process::Command;

use tracing::{debug, warn};

use crate::core::ports::{CoverSource, FolderPicker};
use crate::core::tags::load_cover_file;
use crate::core::types::CoverArt;

fn run_osascript(script: &str) -> Option<String> {
    let out = match Command::new("osascript").arg("-e").arg(script).output() {
        Ok(out) => out,
        Err(e) => {
            warn!(error = %e, "could not run osascript");
            return None;
        }
    };

    if !out.status.success() {
        debug!(stderr = %String::from_utf8_lossy(&out.stderr).trim(), "dialog cancelled");
        return None;
    }

    let picked = String::from_utf8_lossy(&out.stdout).trim().to_string();
    (!picked.is_empty()).then_some(picked)
}

/// AppleScript string literal.
fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
}

#[derive(Debug, Default)]
pub struct OsaFolderPicker;

impl FolderPicker for OsaFolderPicker {
    fn pick_folder(&mut self, prompt: &str) -> Option<PathBuf> {
        let script = format!(
            "tell application \"System Events\"\n\
             activate\n\
             set folderPath to choose folder with prompt {}\n\
             return POSIX path of folderPath\n\
             end tell",
            quote(prompt)
        );
        run_osascript(&script).map(PathBuf::from)
    }
}

#[derive(Debug, Default)]
pub struct OsaCoverPicker;

impl CoverSource for OsaCoverPicker {
    fn pick_cover(&mut self) -> Option<CoverArt> {
        let script = "tell application \"System Events\"\n\
                      activate\n\
                      set imageFile to choose file with prompt \"Select cover art image:\" of type {\"public.image\"}\n\
                      return POSIX path of imageFile\n\
                      end tell";
        let path = PathBuf::from(run_osascript(script)?);

        match load_cover_file(&path) {
            Ok(cover) => Some(cover),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not load cover image");
                None
            }
        }
    }
}
