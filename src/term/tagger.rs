//! term/tagger.rs
//!
//! The interactive tagging session, after a folder has been picked:
//! 1. list MP3s, select a subset
//! 2. optional bulk fields, written to disk immediately (one field at a time)
//! 3. optional bulk cover, written immediately to all or chosen files
//! 4. if anything bulk happened: stop here, or continue per file
//! 5. BEFORE csv, per-file edit / preview / write, AFTER csv, results
//!
//! Per-file failures are counted and logged; only a closed terminal or a
//! broken folder ends the session early.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result};
use tracing::{error, info};

use super::{WIDE, heading};
use crate::core::config::Config;
use crate::core::errlog::{ErrorLog, Layout};
use crate::core::error::PromptError;
use crate::core::export::{self, LOG_DIR_NAME};
use crate::core::library::Scan;
use crate::core::lookup::Lookup;
use crate::core::ports::{CoverSource, Interaction, TagStore};
use crate::core::reconcile::{EditOutcome, Editor, Preview};
use crate::core::selection::{parse_selection, pick};
use crate::core::types::{BulkCoverAssignment, BulkField, BulkValues};
use crate::core::{file_name, read_tracks, scan_paths_one};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TagSummary {
    pub total: usize,
    pub successful: usize,
    pub skipped: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEnd {
    NoFiles,
    /// Stopped after the bulk phase; path of the exported CSV, if written.
    BulkOnly(Option<PathBuf>),
    Completed(TagSummary),
}

/// Offer to store a Discogs token when none is configured.
///
/// `save` persists the updated config; a failed save is reported but the
/// token is still used for this session.
pub fn offer_discogs_setup(
    io: &mut dyn Interaction,
    config: Config,
    save: impl FnOnce(&Config) -> std::io::Result<()>,
) -> Result<Config, PromptError> {
    if config.discogs_token().is_some() {
        return Ok(config);
    }

    io.say("\n🔑 Discogs API Token Setup");
    io.say("To use Discogs lookup, you need a personal access token.");
    io.say("Get one at: https://www.discogs.com/settings/developers");

    if !io.ask_yes("\nDo you want to configure Discogs now? (y/n): ")? {
        return Ok(config);
    }

    let token = io.ask("Enter your Discogs token: ")?;
    if token.is_empty() {
        return Ok(config);
    }

    let config = Config { discogs_token: Some(token) };
    match save(&config) {
        Ok(()) => io.say("✅ Discogs token saved!"),
        Err(e) => {
            error!(error = %e, "could not save config");
            io.say(&format!("⚠️  Could not save config: {e}"));
        }
    }
    Ok(config)
}

pub struct TagSession<'a> {
    io: &'a mut dyn Interaction,
    tags: &'a mut dyn TagStore,
    covers: &'a mut dyn CoverSource,
    lookup: &'a Lookup,
}

impl<'a> TagSession<'a> {
    pub fn new(
        io: &'a mut dyn Interaction,
        tags: &'a mut dyn TagStore,
        covers: &'a mut dyn CoverSource,
        lookup: &'a Lookup,
    ) -> Self {
        Self { io, tags, covers, lookup }
    }

    pub fn run(&mut self, root: &Path) -> Result<SessionEnd> {
        self.io.say("\n🔍 Scanning for MP3 files...");
        let files = scan_paths_one(root, Scan::new("mp3").skipping(&[LOG_DIR_NAME]))
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("scanning {}", root.display()))?;

        if files.is_empty() {
            self.io.say("\n📭 No MP3 files found in the selected folder.");
            return Ok(SessionEnd::NoFiles);
        }

        heading(self.io, "MP3 FILES FOUND", WIDE);
        self.list(root, &files);
        self.io.say(&format!("\nTotal: {} file(s)", files.len()));

        heading(self.io, "FILE SELECTION", WIDE);
        self.io.say("Enter file numbers to tag (e.g., '1,3,5' or '1-10' or 'all')");
        let selected = self.select(&files)?;
        self.io.say(&format!("\n✅ Selected {} file(s)", selected.len()));

        heading(self.io, "BULK EDITING OPTION", WIDE);
        self.io.say("\nDo you want to set common values for all selected files?");
        self.io.say("(e.g., same Artist, Album, Year, Genre for the whole album)");
        self.io.say("Changes will be applied immediately to all files.");

        let bulk = if self.io.ask_yes("\nEnable bulk editing? (y/n): ")? {
            self.bulk_fields(&selected)?
        } else {
            self.io.say("\n⏭️  Skipping bulk edit (will edit each file individually)");
            BulkValues::new()
        };

        let bulk_covers = self.bulk_cover(root, &selected)?;

        if !bulk.is_empty() || !bulk_covers.is_empty() {
            heading(self.io, "BULK EDITING COMPLETE", WIDE);
            self.io.say("\nYour bulk changes have been applied to the selected files.");
            self.io.say("\nOptions:");
            self.io.say("  [1] Done - Exit now (bulk changes already saved)");
            self.io.say("  [2] Continue to individual file editing (for Track #, Title, etc.)");

            if self.io.ask("\nSelect option: ")? == "1" {
                self.io.say("\n✅ Bulk editing complete!");
                let csv = self.export_snapshot(root, "metadata_after_bulk", &selected, "AFTER BULK EDIT");
                self.io.say("\n🎉 All done!");
                self.io.say(&format!("{}\n", "=".repeat(WIDE)));
                return Ok(SessionEnd::BulkOnly(csv));
            }
        }

        let summary = self.tag_each(root, &selected, &bulk, &bulk_covers)?;
        Ok(SessionEnd::Completed(summary))
    }

    fn list(&mut self, root: &Path, files: &[PathBuf]) {
        for (idx, path) in files.iter().enumerate() {
            let rel = path.strip_prefix(root).unwrap_or(path);
            self.io.say(&format!("  [{:3}] {}", idx + 1, rel.display()));
        }
    }

    /// Re-prompts until the expression parses and selects something.
    fn select(&mut self, files: &[PathBuf]) -> Result<Vec<PathBuf>, PromptError> {
        loop {
            let input = self.io.ask("\nSelect files: ")?;
            match parse_selection(&input, files.len()) {
                Ok(indices) => return Ok(pick(files, &indices)),
                Err(e) => self.io.say(&format!("❌ {}", capitalise(&e.to_string()))),
            }
        }
    }

    fn bulk_fields(&mut self, selected: &[PathBuf]) -> Result<BulkValues, PromptError> {
        heading(self.io, "BULK FIELD EDITING", WIDE);
        self.io.say("\nSet common values for all selected files.");
        self.io.say("You'll be prompted to apply each field immediately.");
        self.io.say("Press Enter to skip a field (edit individually per file).");

        let mut applied = BulkValues::new();

        for field in BulkField::ALL {
            let label = field.field().label();
            let value = self.io.ask(&format!("\n{label} (for all files): "))?;
            if value.is_empty() {
                continue;
            }

            let apply = self.io.ask_yes(&format!(
                "  → Apply '{value}' to all {} files now? (y/n): ",
                selected.len()
            ))?;
            if !apply {
                self.io.say("  ⏭️  Skipped - will edit individually");
                continue;
            }

            self.io.say(&format!("  📝 Applying {label} to all files..."));
            let (ok, failed) = self.stamp_field(selected, field, &value);

            if ok > 0 {
                self.io.say(&format!("  ✅ Applied to {ok} file(s)"));
                applied.set(field, &value);
            }
            if failed > 0 {
                self.io.say(&format!("  ⚠️  Failed: {failed} file(s)"));
            }
        }

        if applied.is_empty() {
            self.io.say("\n⚠️  No bulk changes applied (will edit each file individually)");
        } else {
            self.io.say(&format!("\n✅ Bulk changes applied to {} file(s):", selected.len()));
            for (field, value) in applied.iter() {
                self.io.say(&format!("   {}: {value}", field.field().label()));
            }
        }

        Ok(applied)
    }

    /// Write one field to every file; returns (written, failed).
    fn stamp_field(&mut self, files: &[PathBuf], field: BulkField, value: &str) -> (usize, usize) {
        let mut ok = 0;
        let mut failed = 0;

        for path in files {
            let written = self.tags.read(path).and_then(|current| {
                let next = current.with(field.field(), Some(value.to_string()));
                self.tags.write(path, &next, None)
            });
            match written {
                Ok(()) => ok += 1,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "bulk field write failed");
                    failed += 1;
                }
            }
        }

        info!(field = field.field().label(), ok, failed, "bulk field applied");
        (ok, failed)
    }

    fn bulk_cover(&mut self, root: &Path, selected: &[PathBuf]) -> Result<BulkCoverAssignment, PromptError> {
        let mut assignment = BulkCoverAssignment::new();

        heading(self.io, "BULK ALBUM COVER ART", WIDE);
        if !self.io.ask_yes("\nDo you want to upload album cover art? (y/n): ")? {
            return Ok(assignment);
        }

        self.io.say("\n📁 Select cover art image...");
        let Some(cover) = self.covers.pick_cover() else {
            self.io.say("⚠️  No cover art selected");
            return Ok(assignment);
        };
        self.io.say("✅ Cover art loaded!");

        self.io.say("\nApply cover art to:");
        self.io.say("  [1] All selected files");
        self.io.say("  [2] Specific files (choose by number)");
        self.io.say("  [3] Cancel");

        let targets = match self.io.ask("\nSelect option: ")?.as_str() {
            "1" => selected.to_vec(),
            "2" => {
                heading(self.io, "SELECT FILES FOR COVER ART", WIDE);
                self.list(root, selected);
                self.io.say("\nEnter file numbers (e.g., '1,3,5' or '1-10' or 'all')");
                self.select(selected)?
            }
            _ => {
                self.io.say("\n⏭️  Cover art upload cancelled");
                return Ok(assignment);
            }
        };

        self.io.say(&format!("\n🎨 Applying cover art to {} file(s)...", targets.len()));
        self.io.say(&format!("   Cover art size: {} bytes", cover.data.len()));

        let cover = Rc::new(cover);
        let mut failed = 0;

        for path in &targets {
            let current = match self.tags.read(path) {
                Ok(m) => m,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "bulk cover read failed");
                    self.io.say(&format!("   ❌ Could not read: {}", file_name(path)));
                    failed += 1;
                    continue;
                }
            };
            match self.tags.write(path, &current, Some(cover.as_ref())) {
                Ok(()) => assignment.assign(path.clone(), Rc::clone(&cover)),
                Err(e) => {
                    self.io.say(&format!("   ❌ Failed to write: {} - {e}", file_name(path)));
                    failed += 1;
                }
            }
        }

        if !assignment.is_empty() {
            self.io.say(&format!("✅ Cover art applied to {} file(s)", assignment.len()));
        }
        if failed > 0 {
            self.io.say(&format!("⚠️  Failed: {failed} file(s)"));
        }

        Ok(assignment)
    }

    /// Re-read `files` and export them; failures are reported, not fatal.
    fn export_snapshot(&mut self, root: &Path, prefix: &str, files: &[PathBuf], label: &str) -> Option<PathBuf> {
        self.export_snapshot_at(root, &format!("{prefix}_{}.csv", export::session_stamp()), files, label)
    }

    fn export_snapshot_at(&mut self, root: &Path, name: &str, files: &[PathBuf], label: &str) -> Option<PathBuf> {
        self.io.say("\n📊 Exporting metadata...");
        let tracks = read_tracks(&*self.tags, files);

        let written = export::log_dir(root).and_then(|dir| {
            let out = dir.join(name);
            export::write_csv(&out, files, &tracks).map(|_| out)
        });

        match written {
            Ok(out) => {
                self.io.say(&format!("✅ CSV exported: {} ({label})", out.display()));
                Some(out)
            }
            Err(e) => {
                error!(error = %e, "csv export failed");
                self.io.say(&format!("❌ CSV export failed: {e}"));
                None
            }
        }
    }

    fn tag_each(
        &mut self,
        root: &Path,
        selected: &[PathBuf],
        bulk: &BulkValues,
        bulk_covers: &BulkCoverAssignment,
    ) -> Result<TagSummary> {
        let stamp = export::session_stamp();
        let before_name = format!("metadata_before_{stamp}.csv");
        let after_name = format!("metadata_after_{stamp}.csv");
        let log_dir = export::log_dir(root)
            .with_context(|| format!("creating {LOG_DIR_NAME} in {}", root.display()))?;
        let errors = ErrorLog::new(log_dir.join(format!("errors_{stamp}.log")), Layout::Line);

        self.export_snapshot_at(root, &before_name, selected, "BEFORE");

        heading(self.io, "STARTING TAGGING PROCESS", WIDE);

        let mut summary = TagSummary {
            total: selected.len(),
            ..TagSummary::default()
        };

        for (idx, path) in selected.iter().enumerate() {
            heading(self.io, &format!("\nFILE {}/{}", idx + 1, selected.len()), WIDE);
            let name = file_name(path);

            let existing = match self.tags.read(path) {
                Ok(m) => m,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "unreadable file");
                    self.io.say(&format!("❌ Could not read file: {name}"));
                    errors.record(path, &e.to_string());
                    summary.failed += 1;
                    continue;
                }
            };

            let mut editor = Editor::new(&mut *self.io, &mut *self.covers, self.lookup);

            let proposal = match editor.edit(path, &existing, bulk, bulk_covers.get(path))? {
                EditOutcome::Proposed(p) => p,
                EditOutcome::Skipped => {
                    self.io.say(&format!("⏭️  Skipped: {name}"));
                    summary.skipped += 1;
                    continue;
                }
            };

            if editor.preview_and_confirm(path, &existing, &proposal)? != Preview::Confirmed {
                self.io.say(&format!("⏭️  Skipped: {name}"));
                summary.skipped += 1;
                continue;
            }

            self.io.say("\n💾 Saving changes...");
            match self.tags.write(path, &proposal.metadata, proposal.cover.as_deref()) {
                Ok(()) => {
                    info!(path = %path.display(), "tagged");
                    self.io.say(&format!("✅ SUCCESS: {name}"));
                    summary.successful += 1;
                }
                Err(e) => {
                    self.io.say(&format!("❌ FAILED: {name}"));
                    self.io.say(&format!("   Error: {e}"));
                    errors.record(path, &e.to_string());
                    summary.failed += 1;
                }
            }
        }

        self.export_snapshot_at(root, &after_name, selected, "AFTER");

        heading(self.io, "📈 FINAL RESULTS", WIDE);
        self.io.say(&format!("Total files processed: {}", summary.total));
        self.io.say(&format!("✅ Successfully tagged: {}", summary.successful));
        self.io.say(&format!("⏭️  Skipped: {}", summary.skipped));
        self.io.say(&format!("❌ Failed: {}", summary.failed));

        self.io.say(&format!("\n📁 Logs saved to: {}", log_dir.display()));
        self.io.say(&format!("   - {before_name}"));
        self.io.say(&format!("   - {after_name}"));
        if summary.failed > 0 {
            self.io.say(&format!("   - {}", file_name(errors.path())));
        }
        self.io.say("\n🎉 Tagging complete!");
        self.io.say(&format!("{}\n", "=".repeat(WIDE)));

        Ok(summary)
    }
}

fn capitalise(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::{FixedCovers, MemoryTags, ScriptedIo, track};
    use crate::core::types::{CoverArt, CoverMime};

    /// Real (empty) files on disk for discovery, tags held in memory.
    fn batch(names: &[&str]) -> (tempfile::TempDir, Vec<PathBuf>, MemoryTags) {
        let dir = tempfile::tempdir().unwrap();
        let mut tags = MemoryTags::default();
        let mut paths = Vec::new();
        for (i, n) in names.iter().enumerate() {
            let p = dir.path().join(n);
            std::fs::write(&p, b"").unwrap();
            tags.insert(&p, track(&format!("Song {}", i + 1), "Orig", "Album"));
            paths.push(p);
        }
        (dir, paths, tags)
    }

    fn csvs(root: &Path, prefix: &str) -> Vec<PathBuf> {
        let mut found: Vec<PathBuf> = std::fs::read_dir(root.join(LOG_DIR_NAME))
            .unwrap()
            .map(|e| e.unwrap().path())
            .filter(|p| file_name(p).starts_with(prefix))
            .collect();
        found.sort();
        found
    }

    #[test]
    fn bulk_artist_then_individual_override() {
        let (dir, paths, mut tags) = batch(&["1.mp3", "2.mp3", "3.mp3"]);
        let lookup = Lookup::new();
        let mut covers = FixedCovers::default();
        let mut io = ScriptedIo::new(&[
            "all",
            "y", // enable bulk editing
            "X", "y", // artist, apply
            "", "", "", // album, year, genre
            "n", // no bulk cover
            "2", // continue per file
            "3", // file 1: skip
            "2", "", "Y", "", "", "", "", "n", "y", // file 2: manual, artist Y, no cover, confirm
            "3", // file 3: skip
        ]);

        let end = TagSession::new(&mut io, &mut tags, &mut covers, &lookup)
            .run(dir.path())
            .unwrap();

        assert_eq!(
            end,
            SessionEnd::Completed(TagSummary { total: 3, successful: 1, skipped: 2, failed: 0 })
        );
        assert_eq!(tags.get(&paths[0]).artist.as_deref(), Some("X"));
        assert_eq!(tags.get(&paths[1]).artist.as_deref(), Some("Y"));
        assert_eq!(tags.get(&paths[2]).artist.as_deref(), Some("X"));
        assert_eq!(io.remaining(), 0);

        // prompt for file 2 offered the bulk value
        assert!(io.prompts.iter().any(|p| p.contains("Artist [X] [BULK]")));

        let before = std::fs::read_to_string(&csvs(dir.path(), "metadata_before")[0]).unwrap();
        let after = std::fs::read_to_string(&csvs(dir.path(), "metadata_after_")[0]).unwrap();
        assert!(before.contains("\"2.mp3\",\"X\""));
        assert!(after.contains("\"2.mp3\",\"Y\""));
    }

    #[test]
    fn done_after_bulk_exports_and_stops() {
        let (dir, paths, mut tags) = batch(&["a.mp3", "b.mp3"]);
        let lookup = Lookup::new();
        let mut covers = FixedCovers::default();
        let mut io = ScriptedIo::new(&["1", "y", "", "", "2001", "y", "", "n", "1"]);

        let end = TagSession::new(&mut io, &mut tags, &mut covers, &lookup)
            .run(dir.path())
            .unwrap();

        let SessionEnd::BulkOnly(Some(csv)) = end else { panic!("expected bulk-only end") };
        assert!(file_name(&csv).starts_with("metadata_after_bulk_"));
        assert_eq!(tags.get(&paths[0]).year.as_deref(), Some("2001"));
        // only the selected file was stamped
        assert_eq!(tags.get(&paths[1]).year, None);
    }

    #[test]
    fn bulk_cover_on_chosen_files_skips_per_file_cover_prompt() {
        let (dir, paths, mut tags) = batch(&["1.mp3", "2.mp3", "3.mp3"]);
        let lookup = Lookup::new();
        let cover = CoverArt { data: b"\x89PNG....".to_vec(), mime: CoverMime::Png };
        let mut covers = FixedCovers { cover: Some(cover.clone()), picks: 0 };
        let mut io = ScriptedIo::new(&[
            "all",
            "n", // no bulk fields
            "y", "2", "9", "1,3", // cover, specific, bad index, then 1 and 3
            "2", // continue
            "2", "New Title", "", "", "", "", "", "y", // file 1 manual (no cover prompt), confirm
            "3",
            "3",
        ]);

        let end = TagSession::new(&mut io, &mut tags, &mut covers, &lookup)
            .run(dir.path())
            .unwrap();

        assert!(matches!(end, SessionEnd::Completed(s) if s.successful == 1 && s.skipped == 2));
        assert_eq!(covers.picks, 1);
        assert_eq!(tags.covers.get(&paths[0]), Some(&cover));
        assert_eq!(tags.covers.get(&paths[1]), None);
        assert_eq!(tags.covers.get(&paths[2]), Some(&cover));
        assert_eq!(tags.get(&paths[0]).title.as_deref(), Some("New Title"));
        assert!(io.saw("Invalid file numbers. Must be between 1 and 3"));
        assert!(io.saw("Bulk cover art will be applied"));
        assert!(!io.prompts.iter().any(|p| p.contains("Add/replace cover art")));
    }

    #[test]
    fn unreadable_and_failed_writes_are_logged() {
        let (dir, paths, mut tags) = batch(&["ok.mp3", "broken.mp3", "locked.mp3"]);
        tags.files.remove(&paths[1]);
        tags.unreadable.push(paths[1].clone());
        tags.fail_writes.push(paths[2].clone());
        let lookup = Lookup::new();
        let mut covers = FixedCovers::default();
        let mut io = ScriptedIo::new(&[
            "all",
            "n",
            "n",
            // ok.mp3: manual, change genre, confirm
            "2", "", "", "", "", "Jazz", "", "n", "y",
            // locked.mp3: manual, change genre, confirm -> write fails
            "2", "", "", "", "", "Jazz", "", "n", "y",
        ]);

        let end = TagSession::new(&mut io, &mut tags, &mut covers, &lookup)
            .run(dir.path())
            .unwrap();

        assert_eq!(
            end,
            SessionEnd::Completed(TagSummary { total: 3, successful: 1, skipped: 0, failed: 2 })
        );
        assert_eq!(tags.writes, vec![paths[0].clone()]);

        let log = std::fs::read_to_string(&csvs(dir.path(), "errors_")[0]).unwrap();
        let lines: Vec<&str> = log.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("] broken.mp3: could not read MP3 file: can't sync to MPEG frame"));
        assert!(lines[1].contains("locked.mp3: write failed: disk full"));

        // unreadable file is left out of the CSVs
        let after = std::fs::read_to_string(&csvs(dir.path(), "metadata_after_")[0]).unwrap();
        assert_eq!(after.lines().count(), 3);
        assert!(!after.contains("broken.mp3"));
    }

    #[test]
    fn unchanged_proposal_is_a_skip_without_write() {
        let (dir, _paths, mut tags) = batch(&["only.mp3"]);
        let lookup = Lookup::new();
        let mut covers = FixedCovers::default();
        let mut io = ScriptedIo::new(&["all", "n", "n", "2", "", "", "", "", "", "", "n"]);

        let end = TagSession::new(&mut io, &mut tags, &mut covers, &lookup)
            .run(dir.path())
            .unwrap();

        assert!(matches!(end, SessionEnd::Completed(s) if s.skipped == 1));
        assert!(tags.writes.is_empty());
        assert!(io.saw("No changes detected"));
    }

    #[test]
    fn selection_reprompts_until_valid() {
        let (dir, _paths, mut tags) = batch(&["a.mp3", "b.mp3"]);
        let lookup = Lookup::new();
        let mut covers = FixedCovers::default();
        let mut io = ScriptedIo::new(&["x", "5", "2"]);

        // the session ends when answers run out at the bulk question
        let err = TagSession::new(&mut io, &mut tags, &mut covers, &lookup)
            .run(dir.path())
            .unwrap_err();

        assert!(matches!(err.downcast_ref::<PromptError>(), Some(PromptError::Closed)));
        assert!(io.saw("Invalid input 'x'"));
        assert!(io.saw("Invalid file numbers. Must be between 1 and 2"));
        assert!(io.saw("Selected 1 file(s)"));
    }

    #[test]
    fn empty_folder_ends_early() {
        let dir = tempfile::tempdir().unwrap();
        let mut tags = MemoryTags::default();
        let lookup = Lookup::new();
        let mut covers = FixedCovers::default();
        let mut io = ScriptedIo::new(&[]);

        let end = TagSession::new(&mut io, &mut tags, &mut covers, &lookup)
            .run(dir.path())
            .unwrap();
        assert_eq!(end, SessionEnd::NoFiles);
    }

    #[test]
    fn discogs_setup_saves_token() {
        let mut io = ScriptedIo::new(&["y", "tok123"]);
        let mut saved = None;

        let cfg = offer_discogs_setup(&mut io, Config::default(), |c| {
            saved = Some(c.clone());
            Ok(())
        })
        .unwrap();

        assert_eq!(cfg.discogs_token(), Some("tok123"));
        assert_eq!(saved, Some(cfg));
        assert!(io.saw("Discogs token saved"));
    }

    #[test]
    fn discogs_setup_skipped_when_configured_or_declined() {
        let mut io = ScriptedIo::new(&[]);
        let cfg = Config { discogs_token: Some("have".into()) };
        let out = offer_discogs_setup(&mut io, cfg.clone(), |_| panic!("no save")).unwrap();
        assert_eq!(out, cfg);
        assert!(io.prompts.is_empty());

        let mut io = ScriptedIo::new(&["n"]);
        let out = offer_discogs_setup(&mut io, Config::default(), |_| panic!("no save")).unwrap();
        assert_eq!(out.discogs_token(), None);
    }

    #[test]
    fn capitalise_first_letter() {
        assert_eq!(capitalise("invalid input"), "Invalid input");
        assert_eq!(capitalise(""), "");
    }
}
