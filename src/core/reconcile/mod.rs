//! core/reconcile/mod.rs
//!
//! Per-file metadata reconciliation for the tagger.
//!
//! Sources, strongest first:
//! - what the user types while editing this file
//! - batch (bulk) values / batch cover
//! - a picked online lookup candidate (artist/album/year only)
//! - the tags already on disk
//!
//! [`Editor`] drives the prompts through injected ports; the precedence
//! rules themselves live in [`resolve`] and have no IO at all.

pub mod resolve;

use std::path::Path;
use std::rc::Rc;

use super::error::PromptError;
use super::lookup::{Lookup, SearchKind};
use super::ports::{CoverSource, Interaction};
use super::types::{BulkValues, CoverArt, Field, LookupResult, LookupSource, TrackMetadata};
use resolve::{CoverDecision, diff, display, field_default, resolve_all, resolve_cover, seed_from_lookup};

const RULE: &str = "================================================================================";

/// What to persist for one file.
#[derive(Debug, Clone, PartialEq)]
pub struct Proposal {
    pub metadata: TrackMetadata,
    pub cover: Option<Rc<CoverArt>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    Proposed(Proposal),
    Skipped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preview {
    /// Nothing differs and no cover queued: don't call the writer.
    NoChanges,
    Declined,
    Confirmed,
}

pub struct Editor<'a> {
    io: &'a mut dyn Interaction,
    covers: &'a mut dyn CoverSource,
    lookup: &'a Lookup,
}

impl<'a> Editor<'a> {
    pub fn new(
        io: &'a mut dyn Interaction,
        covers: &'a mut dyn CoverSource,
        lookup: &'a Lookup,
    ) -> Self {
        Self { io, covers, lookup }
    }

    /// Show the file's current tags and the per-file menu.
    pub fn edit(
        &mut self,
        path: &Path,
        existing: &TrackMetadata,
        bulk: &BulkValues,
        bulk_cover: Option<&Rc<CoverArt>>,
    ) -> Result<EditOutcome, PromptError> {
        self.io.say(&format!("\n{RULE}\nEDITING: {}\n{RULE}", super::file_name(path)));

        let cover_status = if existing.has_cover_art {
            "Yes"
        } else if bulk_cover.is_some() {
            "Yes [BULK]"
        } else {
            "No"
        };

        self.io.say("\nCurrent metadata:");
        for field in Field::ALL {
            self.io.say(&format!(
                "  {:<7} {}",
                format!("{}:", field.label()),
                display(existing.get(field))
            ));
        }
        self.io.say(&format!("  {:<7} {cover_status}", "Cover:"));

        loop {
            self.io.say("\nOptions:");
            self.io.say("  [1] Online lookup (MusicBrainz/Discogs)");
            self.io.say("  [2] Manual edit");
            self.io.say("  [3] Skip this file");

            match self.io.ask("\nSelect option: ")?.as_str() {
                "1" => return self.lookup_and_edit(path, existing, bulk, bulk_cover),
                "2" => return self.manual_edit(existing, bulk, bulk_cover).map(EditOutcome::Proposed),
                "3" => return Ok(EditOutcome::Skipped),
                _ => self.io.say("❌ Invalid choice"),
            }
        }
    }

    /// Search online, let the user pick a candidate, then hand over to manual edit.
    pub fn lookup_and_edit(
        &mut self,
        path: &Path,
        existing: &TrackMetadata,
        bulk: &BulkValues,
        bulk_cover: Option<&Rc<CoverArt>>,
    ) -> Result<EditOutcome, PromptError> {
        // untagged files fall back to the file stem, which names a song rather than a release
        let tagged = existing.get(Field::Artist).or(existing.get(Field::Album));
        let (default_query, default_kind) = match tagged {
            Some(q) => (q.to_string(), SearchKind::Release),
            None => (super::file_stem(path), SearchKind::Recording),
        };

        loop {
            self.io.say(&format!("\nDefault search query: {default_query}"));
            let typed = self.io.ask("Enter search query (or press Enter to use default): ")?;
            let (query, kind) = if typed.is_empty() {
                (default_query.clone(), default_kind)
            } else {
                (typed, SearchKind::Release)
            };

            self.io.say(&format!("\n🔍 Searching for: {query}"));
            let results = self.search(&query, kind);

            if results.is_empty() {
                self.io.say("\n❌ No results found");
                self.io.say("\nOptions:");
                self.io.say("  [1] Try different search");
                self.io.say("  [2] Manual edit");
                self.io.say("  [3] Skip this file");

                match self.io.ask("\nSelect option: ")?.as_str() {
                    "1" => continue,
                    "2" => return self.manual_edit(existing, bulk, bulk_cover).map(EditOutcome::Proposed),
                    _ => return Ok(EditOutcome::Skipped),
                }
            }

            self.show_results(&results);

            return match self.pick_result(results.len())? {
                None => self.manual_edit(existing, bulk, bulk_cover).map(EditOutcome::Proposed),
                Some(i) => {
                    let seeded = seed_from_lookup(existing, &results[i - 1], bulk);
                    self.io.say("\n✅ Selected result. You can now edit the fields:");
                    self.manual_edit(&seeded, bulk, bulk_cover).map(EditOutcome::Proposed)
                }
            };
        }
    }

    fn search(&mut self, query: &str, kind: SearchKind) -> Vec<LookupResult> {
        if self.lookup.is_empty() {
            self.io.say("  ⚠️  No lookup service available");
            return Vec::new();
        }

        let lookup = self.lookup;
        let io = &mut *self.io;
        let mut previous: Option<LookupSource> = None;
        lookup.search_first_available(query, kind, |source| {
            match previous {
                None => io.say(&format!("  → Searching {}...", source.name())),
                Some(prev) => io.say(&format!(
                    "  → No {} results, trying {}...",
                    prev.name(),
                    source.name()
                )),
            }
            previous = Some(source);
        })
    }

    fn show_results(&mut self, results: &[LookupResult]) {
        self.io.say(&format!("\n{RULE}\nSEARCH RESULTS ({} found)\n{RULE}", results.len()));
        for (idx, r) in results.iter().enumerate() {
            let or_na = |s: &str| if s.is_empty() { "N/A".to_string() } else { s.to_string() };
            self.io.say(&format!("\n[{}] {}", idx + 1, r.source.name()));
            self.io.say(&format!("    Artist: {}", or_na(&r.artist)));
            self.io.say(&format!("    Album:  {}", or_na(&r.album)));
            self.io.say(&format!("    Year:   {}", or_na(&r.year)));
        }
        self.io.say("\n[0] Manual edit instead");
    }

    /// `None` = manual edit, `Some(i)` = 1-based candidate index.
    fn pick_result(&mut self, count: usize) -> Result<Option<usize>, PromptError> {
        loop {
            let reply = self.io.ask("\nSelect result (or 0 for manual): ")?;
            match reply.parse::<usize>() {
                Ok(0) => return Ok(None),
                Ok(i) if i <= count => return Ok(Some(i)),
                Ok(_) => self.io.say(&format!("❌ Invalid selection. Enter 0-{count}")),
                Err(_) => self.io.say("❌ Invalid input. Enter a number."),
            }
        }
    }

    /// Prompt every field over `base`; Enter keeps bulk-or-base.
    pub fn manual_edit(
        &mut self,
        base: &TrackMetadata,
        bulk: &BulkValues,
        bulk_cover: Option<&Rc<CoverArt>>,
    ) -> Result<Proposal, PromptError> {
        self.io.say(&format!("\n{RULE}\nMANUAL METADATA EDIT\n{RULE}"));
        self.io.say("Press Enter to keep existing value, or type new value");

        if !bulk.is_empty() {
            self.io.say("\n💡 Bulk values set (will be used if you press Enter):");
            for (field, value) in bulk.iter() {
                self.io.say(&format!("   {}: {value}", field.field().label()));
            }
        }
        if bulk_cover.is_some() {
            self.io.say("\n🎨 Bulk cover art will be applied (uploaded earlier)");
        }

        let mut typed: Vec<(Field, String)> = Vec::with_capacity(Field::ALL.len());
        for field in Field::ALL {
            let (default, from_bulk) = field_default(field, bulk, base);
            let label = if field == Field::Track { "Track #" } else { field.label() };
            let marker = if from_bulk { " [BULK]" } else { "" };
            let lead = if field == Field::Title { "\n" } else { "" };

            let answer = self.io.ask(&format!(
                "{lead}{label} [{}]{marker}: ",
                default.unwrap_or_default()
            ))?;
            typed.push((field, answer));
        }

        let metadata = resolve_all(base, bulk, &typed);
        let cover = self.choose_cover(base, bulk_cover)?;

        Ok(Proposal { metadata, cover })
    }

    fn choose_cover(
        &mut self,
        base: &TrackMetadata,
        bulk_cover: Option<&Rc<CoverArt>>,
    ) -> Result<Option<Rc<CoverArt>>, PromptError> {
        match resolve_cover(bulk_cover) {
            CoverDecision::Bulk(cover) => {
                self.io.say("\n🎨 Using bulk cover art");
                Ok(Some(cover))
            }
            CoverDecision::AskUser => {
                let status = if base.has_cover_art { "Yes" } else { "No" };
                let wants = self.io.ask_yes(&format!(
                    "\nCurrent cover art: {status}. Add/replace cover art? (y/n): "
                ))?;
                if !wants {
                    return Ok(None);
                }

                self.io.say("\nSelect cover art source:");
                self.io.say("  [1] Choose file from disk");
                self.io.say("  [2] Skip cover art");
                if self.io.ask("Select option: ")? != "1" {
                    return Ok(None);
                }

                match self.covers.pick_cover() {
                    Some(cover) => {
                        self.io.say("✅ Cover art loaded");
                        Ok(Some(Rc::new(cover)))
                    }
                    None => {
                        self.io.say("⚠️  Cover art not loaded");
                        Ok(None)
                    }
                }
            }
        }
    }

    /// Diff against the on-disk snapshot and ask before writing.
    pub fn preview_and_confirm(
        &mut self,
        path: &Path,
        existing: &TrackMetadata,
        proposal: &Proposal,
    ) -> Result<Preview, PromptError> {
        self.io.say(&format!("\n{RULE}\nPREVIEW CHANGES: {}\n{RULE}", super::file_name(path)));

        let changes = diff(existing, &proposal.metadata, proposal.cover.is_some());
        if changes.is_empty() {
            self.io.say("\n⚠️  No changes detected");
            return Ok(Preview::NoChanges);
        }

        self.io.say("\nChanges:");
        for c in &changes {
            self.io.say(&format!("  {:<12}: {:<30} → {}", c.label, c.old, c.new));
        }

        if self.io.confirm("\nApply these changes? (y/n): ")? {
            Ok(Preview::Confirmed)
        } else {
            Ok(Preview::Declined)
        }
    }
}
