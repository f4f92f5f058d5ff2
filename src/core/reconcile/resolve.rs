//! core/reconcile/resolve.rs
//!
//! Pure precedence rules, one field at a time:
//! 1. a non-empty value typed during individual editing
//! 2. else the batch (bulk) value, if the field is bulk-eligible and set
//! 3. else whatever the file already had
//!
//! No prompts and no IO in here.

use std::rc::Rc;

use crate::core::types::{BulkValues, CoverArt, Field, LookupResult, TrackMetadata};

/// Final value of one field.
pub fn resolve_field(typed: &str, bulk: Option<&str>, existing: Option<&str>) -> Option<String> {
    let typed = typed.trim();
    if !typed.is_empty() {
        return Some(typed.to_string());
    }
    bulk.or(existing)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Value offered in `[brackets]` at the prompt, and whether it is a bulk value.
pub fn field_default<'a>(
    field: Field,
    bulk: &'a BulkValues,
    base: &'a TrackMetadata,
) -> (Option<&'a str>, bool) {
    match bulk.get(field) {
        Some(v) => (Some(v), true),
        None => (base.get(field), false),
    }
}

/// Apply `typed` answers (one per field, `Field::ALL` order) on top of `base`.
pub fn resolve_all(base: &TrackMetadata, bulk: &BulkValues, typed: &[(Field, String)]) -> TrackMetadata {
    typed.iter().fold(base.clone(), |acc, (field, input)| {
        let value = resolve_field(input, bulk.get(*field), base.get(*field));
        acc.with(*field, value)
    })
}

/// Seed a record from a picked lookup candidate.
///
/// - artist/album/year: bulk, else candidate, else existing
/// - genre: bulk, else existing
/// - title/track: existing
pub fn seed_from_lookup(
    existing: &TrackMetadata,
    candidate: &LookupResult,
    bulk: &BulkValues,
) -> TrackMetadata {
    let pick = |field: Field, from_candidate: &str| -> Option<String> {
        bulk.get(field)
            .or(Some(from_candidate).filter(|s| !s.trim().is_empty()))
            .or(existing.get(field))
            .map(|s| s.trim().to_string())
    };

    existing
        .with(Field::Artist, pick(Field::Artist, &candidate.artist))
        .with(Field::Album, pick(Field::Album, &candidate.album))
        .with(Field::Year, pick(Field::Year, &candidate.year))
        .with(Field::Genre, pick(Field::Genre, ""))
}

/// One row of the preview table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub label: &'static str,
    pub old: String,
    pub new: String,
}

pub fn display(v: Option<&str>) -> &str {
    v.filter(|s| !s.is_empty()).unwrap_or("(none)")
}

/// Field-by-field diff of `candidate` against the on-disk snapshot.
pub fn diff(existing: &TrackMetadata, candidate: &TrackMetadata, cover_queued: bool) -> Vec<Change> {
    let mut changes: Vec<Change> = Field::ALL
        .iter()
        .filter(|&&f| existing.get(f) != candidate.get(f))
        .map(|&f| Change {
            label: f.label(),
            old: display(existing.get(f)).to_string(),
            new: display(candidate.get(f)).to_string(),
        })
        .collect();

    if cover_queued {
        changes.push(Change {
            label: "Cover Art",
            old: "Update".to_string(),
            new: "Yes".to_string(),
        });
    }

    changes
}

#[derive(Debug, Clone, PartialEq)]
pub enum CoverDecision {
    /// The batch cover goes onto this file; no per-file prompt.
    Bulk(Rc<CoverArt>),
    /// Ask whether to add/replace cover art.
    AskUser,
}

pub fn resolve_cover(bulk_cover: Option<&Rc<CoverArt>>) -> CoverDecision {
    match bulk_cover {
        Some(c) => CoverDecision::Bulk(Rc::clone(c)),
        None => CoverDecision::AskUser,
    }
}
