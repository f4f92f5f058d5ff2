//! Append-only per-file error logs.
//!
//! Two layouts:
//! - tagger: `[YYYY-MM-DD HH:MM:SS] <filename>: <message>` on one line
//! - converter: timestamped header line, message, then an 80-dash rule
//!
//! The file is opened and closed on every append. A failed append is logged
//! and otherwise ignored; an error log must never abort the batch.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Local;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Line,
    Block,
}

#[derive(Debug, Clone)]
pub struct ErrorLog {
    path: PathBuf,
    layout: Layout,
}

fn now() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

pub fn format_entry(layout: Layout, stamp: &str, file: &str, message: &str) -> String {
    match layout {
        Layout::Line => format!("[{stamp}] {file}: {message}\n"),
        Layout::Block => format!("\n[{stamp}] {file}\n{message}\n{}\n", "-".repeat(80)),
    }
}

impl ErrorLog {
    pub fn new(path: PathBuf, layout: Layout) -> Self {
        Self { path, layout }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `file` is shown by name only.
    pub fn record(&self, file: &Path, message: &str) {
        if let Err(e) = self.try_record(file, message) {
            tracing::error!(log = %self.path.display(), error = %e, "could not write to log file");
        }
    }

    fn try_record(&self, file: &Path, message: &str) -> io::Result<()> {
        let entry = format_entry(self.layout, &now(), &super::file_name(file), message);
        let mut f = OpenOptions::new().create(true).append(true).open(&self.path)?;
        f.write_all(entry.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_layout() {
        assert_eq!(
            format_entry(Layout::Line, "2024-01-02 03:04:05", "a.mp3", "Could not read MP3 file"),
            "[2024-01-02 03:04:05] a.mp3: Could not read MP3 file\n"
        );
    }

    #[test]
    fn block_layout() {
        let entry = format_entry(Layout::Block, "2024-01-02 03:04:05", "a.flac", "boom");
        assert_eq!(entry, format!("\n[2024-01-02 03:04:05] a.flac\nboom\n{}\n", "-".repeat(80)));
    }

    #[test]
    fn record_appends() {
        let dir = tempfile::tempdir().unwrap();
        let log = ErrorLog::new(dir.path().join("errors.log"), Layout::Line);

        log.record(Path::new("/x/one.mp3"), "first");
        log.record(Path::new("/x/two.mp3"), "second");

        let text = std::fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with('[') && lines[0].ends_with("] one.mp3: first"));
        assert!(lines[1].ends_with("two.mp3: second"));
    }

    #[test]
    fn unwritable_log_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let log = ErrorLog::new(dir.path().join("missing").join("errors.log"), Layout::Line);
        log.record(Path::new("a.mp3"), "ignored");
        assert!(!log.path().exists());
    }
}
