//! CSV snapshots of a batch (before / after editing).
//!
//! One row per readable file:
//! `filename,artist,album,title,track,year,genre,bitrate,duration`
//!
//! - text columns are quoted
//! - commas inside artist/album/title/genre become `;`
//! - unreadable files (`None`) are left out

use std::fmt::Write as _;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Local;

use super::types::TrackMetadata;

pub const LOG_DIR_NAME: &str = "mp3_tagger_logs";

const HEADER: &str = "filename,artist,album,title,track,year,genre,bitrate,duration\n";

/// `<root>/mp3_tagger_logs`, created if needed.
pub fn log_dir(root: &Path) -> io::Result<PathBuf> {
    let dir = root.join(LOG_DIR_NAME);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Session timestamp used in CSV / log file names.
pub fn session_stamp() -> String {
    Local::now().format("%Y%m%d_%H%M%S").to_string()
}

fn quoted(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn no_commas(value: Option<&String>) -> String {
    value.map(|s| s.replace(',', ";")).unwrap_or_default()
}

pub fn render(paths: &[PathBuf], tracks: &[Option<TrackMetadata>]) -> String {
    let mut out = String::from(HEADER);

    for (path, meta) in paths.iter().zip(tracks) {
        let Some(meta) = meta else { continue };

        let _ = writeln!(
            out,
            "{},{},{},{},{},{},{},{},{:.2}",
            quoted(&super::file_name(path)),
            quoted(&no_commas(meta.artist.as_ref())),
            quoted(&no_commas(meta.album.as_ref())),
            quoted(&no_commas(meta.title.as_ref())),
            quoted(meta.track.as_deref().unwrap_or_default()),
            quoted(meta.year.as_deref().unwrap_or_default()),
            quoted(&no_commas(meta.genre.as_ref())),
            meta.bitrate,
            meta.duration_seconds,
        );
    }

    out
}

/// Overwrites `output`.
pub fn write_csv(output: &Path, paths: &[PathBuf], tracks: &[Option<TrackMetadata>]) -> io::Result<()> {
    std::fs::write(output, render(paths, tracks))?;
    tracing::debug!(path = %output.display(), rows = tracks.iter().flatten().count(), "csv exported");
    Ok(())
}
