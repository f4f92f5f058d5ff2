//! Core data types shared between core logic and the terminal front end.
//!
//! Rule of thumb:
//! - These structs should be "boring bags of data"
//! - No prompt code
//! - No filesystem code
//! - No tag parsing code
//!
//! `TrackMetadata` represents the tag state of ONE audio file at a point in time.
//! Merging sources never mutates a snapshot in place; it builds a new one.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// The six editable text fields, in prompt order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Title,
    Artist,
    Album,
    Year,
    Genre,
    Track,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Title,
        Field::Artist,
        Field::Album,
        Field::Year,
        Field::Genre,
        Field::Track,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::Title => "Title",
            Field::Artist => "Artist",
            Field::Album => "Album",
            Field::Year => "Year",
            Field::Genre => "Genre",
            Field::Track => "Track",
        }
    }

    /// `None` for title/track: those are never stamped across a batch.
    pub fn bulk(self) -> Option<BulkField> {
        match self {
            Field::Artist => Some(BulkField::Artist),
            Field::Album => Some(BulkField::Album),
            Field::Year => Some(BulkField::Year),
            Field::Genre => Some(BulkField::Genre),
            Field::Title | Field::Track => None,
        }
    }
}

/// Fields the user may apply to the whole batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BulkField {
    Artist,
    Album,
    Year,
    Genre,
}

impl BulkField {
    pub const ALL: [BulkField; 4] = [
        BulkField::Artist,
        BulkField::Album,
        BulkField::Year,
        BulkField::Genre,
    ];

    pub fn field(self) -> Field {
        match self {
            BulkField::Artist => Field::Artist,
            BulkField::Album => Field::Album,
            BulkField::Year => Field::Year,
            BulkField::Genre => Field::Genre,
        }
    }
}

/// Tag snapshot of one MP3.
///
/// Text fields use `Option` because:
/// - some files have missing tags
/// - an empty frame is treated the same as a missing one
///
/// `duration_seconds`, `bitrate` and `has_cover_art` are read-only: they come
/// from the audio stream / picture frames and are never written back.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackMetadata {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub year: Option<String>,
    pub genre: Option<String>,
    pub track: Option<String>,

    pub duration_seconds: f64,
    /// Bits per second (e.g. 320000).
    pub bitrate: u32,
    pub has_cover_art: bool,
}

impl TrackMetadata {
    /// Non-empty value of a text field.
    pub fn get(&self, field: Field) -> Option<&str> {
        let slot = match field {
            Field::Title => &self.title,
            Field::Artist => &self.artist,
            Field::Album => &self.album,
            Field::Year => &self.year,
            Field::Genre => &self.genre,
            Field::Track => &self.track,
        };
        slot.as_deref().filter(|s| !s.is_empty())
    }

    /// Copy of `self` with one text field replaced.
    pub fn with(&self, field: Field, value: Option<String>) -> TrackMetadata {
        let mut out = self.clone();
        let value = value.filter(|s| !s.is_empty());
        match field {
            Field::Title => out.title = value,
            Field::Artist => out.artist = value,
            Field::Album => out.album = value,
            Field::Year => out.year = value,
            Field::Genre => out.genre = value,
            Field::Track => out.track = value,
        }
        out
    }
}

/// Image container types we recognise by magic bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverMime {
    Jpeg,
    Png,
    Gif,
    Bmp,
}

impl CoverMime {
    pub fn as_str(self) -> &'static str {
        match self {
            CoverMime::Jpeg => "image/jpeg",
            CoverMime::Png => "image/png",
            CoverMime::Gif => "image/gif",
            CoverMime::Bmp => "image/bmp",
        }
    }
}

/// Opaque cover image payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverArt {
    pub data: Vec<u8>,
    pub mime: CoverMime,
}

/// Values stamped across a whole batch. Empty strings are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkValues {
    values: BTreeMap<BulkField, String>,
}

impl BulkValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ignores empty (after trim) values.
    pub fn set(&mut self, field: BulkField, value: &str) {
        let value = value.trim();
        if !value.is_empty() {
            self.values.insert(field, value.to_string());
        }
    }

    /// Bulk value for `field`; always `None` for title/track.
    pub fn get(&self, field: Field) -> Option<&str> {
        let bulk = field.bulk()?;
        self.values.get(&bulk).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BulkField, &str)> {
        self.values.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

/// file -> shared cover, produced once by the bulk cover phase.
#[derive(Debug, Clone, Default)]
pub struct BulkCoverAssignment {
    covers: HashMap<PathBuf, Rc<CoverArt>>,
}

impl BulkCoverAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assign(&mut self, path: PathBuf, cover: Rc<CoverArt>) {
        self.covers.insert(path, cover);
    }

    pub fn get(&self, path: &Path) -> Option<&Rc<CoverArt>> {
        self.covers.get(path)
    }

    pub fn is_empty(&self) -> bool {
        self.covers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.covers.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupSource {
    MusicBrainz,
    Discogs,
}

impl LookupSource {
    pub fn name(self) -> &'static str {
        match self {
            LookupSource::MusicBrainz => "MusicBrainz",
            LookupSource::Discogs => "Discogs",
        }
    }
}

/// One catalog candidate. Lives only for one lookup-and-select interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupResult {
    pub source: LookupSource,
    pub artist: String,
    pub album: String,
    pub year: String,
    pub title: Option<String>,
    pub score: Option<u32>,
}
