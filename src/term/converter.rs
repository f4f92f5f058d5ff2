//! Interactive FLAC -> MP3 session: scan, summarise, confirm, convert.

use std::path::Path;

use anyhow::{Context, Result};

use super::heading;
use crate::core::convert::{ConversionSummary, Converter, Encoder, QUARANTINE_DIR, group_by_directory};
use crate::core::library::Scan;
use crate::core::ports::Interaction;
use crate::core::scan_paths_one;

const W: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvertEnd {
    NoFiles,
    Cancelled,
    Finished(ConversionSummary),
}

pub struct ConvertSession<'a> {
    io: &'a mut dyn Interaction,
    encoder: &'a dyn Encoder,
}

impl<'a> ConvertSession<'a> {
    pub fn new(io: &'a mut dyn Interaction, encoder: &'a dyn Encoder) -> Self {
        Self { io, encoder }
    }

    /// `dry_run = Some(..)` answers the dry-run question up front.
    pub fn run(&mut self, root: &Path, dry_run: Option<bool>) -> Result<ConvertEnd> {
        self.io.say("\n🔍 Scanning for FLAC files...");
        let files = scan_paths_one(root, Scan::new("flac").skipping(&[QUARANTINE_DIR]))
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("scanning {}", root.display()))?;

        if files.is_empty() {
            self.io.say("\n📭 No FLAC files found in the selected folder.");
            return Ok(ConvertEnd::NoFiles);
        }

        self.io.say("\n📊 SUMMARY");
        self.io.say(&"=".repeat(W));
        self.io.say(&format!("Total FLAC files found: {}", files.len()));
        let dirs = group_by_directory(&files);
        self.io.say(&format!("Directories: {}", dirs.len()));
        self.io.say("\nFiles by directory:");
        for (dir, count) in &dirs {
            self.io.say(&format!("\n  📁 {}\n     {count} file(s)", dir.display()));
        }

        if !self.io.confirm("\nProceed with conversion? (y/n): ")? {
            self.io.say("\n🚫 Operation cancelled by user");
            return Ok(ConvertEnd::Cancelled);
        }

        let dry_run = match dry_run {
            Some(d) => d,
            None => self.io.confirm("\nDry-run mode (preview without converting)? (y/n): ")?,
        };
        if dry_run {
            self.io.say("\n🔍 DRY-RUN MODE - No files will be modified");
        }

        heading(self.io, "🚀 Starting conversion...", W);
        let summary = Converter::new(self.encoder, &mut *self.io)
            .relative_to(root)
            .run(&files, dry_run);

        heading(self.io, "📈 FINAL RESULTS", W);
        self.io.say(&format!("Total files: {}", summary.total));
        self.io.say(&format!("✅ Successful: {}", summary.successful));
        self.io.say(&format!("⏭️  Skipped (already converted): {}", summary.skipped));
        self.io.say(&format!("❌ Failed: {}", summary.failed));

        if summary.failed > 0 {
            self.io.say(&format!(
                "\n⚠️  Check conversion_errors.log files in {QUARANTINE_DIR} folders"
            ));
        }
        if dry_run {
            self.io.say("\n🔍 DRY-RUN completed - no files were modified");
        } else {
            self.io.say("\n🎉 Conversion complete!");
        }
        self.io.say(&format!("{}\n", "=".repeat(W)));

        Ok(ConvertEnd::Finished(summary))
    }
}
