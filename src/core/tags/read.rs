//! core/tags/read.rs
//! Read ID3 tags from an MP3 and convert them into a `TrackMetadata`.
//!
//! - A file with no ID3 tag at all is fine: text fields come back empty.
//! - A file that isn't decodable audio, or has a corrupt tag, is a read failure.

use std::path::Path;

use id3::frame::Content;
use id3::{ErrorKind, Tag, TagLike};

use super::probe::probe_stream;
use super::util::non_empty;
use crate::core::error::TagError;
use crate::core::types::TrackMetadata;

pub fn read_metadata(path: &Path) -> Result<TrackMetadata, TagError> {
    let stream = probe_stream(path).map_err(TagError::Read)?;

    let mut meta = match Tag::read_from_path(path) {
        Ok(tag) => metadata_from_tag(&tag),
        Err(e) if matches!(e.kind, ErrorKind::NoTag) => TrackMetadata::default(),
        Err(e) => return Err(TagError::Read(e.to_string())),
    };

    meta.duration_seconds = stream.duration_seconds;
    meta.bitrate = stream.bitrate;
    Ok(meta)
}

/// Text fields + cover flag only; stream info is filled in by the caller.
pub(crate) fn metadata_from_tag(tag: &Tag) -> TrackMetadata {
    let has_cover_art = tag
        .frames()
        .any(|f| f.id() == "APIC" || f.id() == "PIC");

    TrackMetadata {
        title: non_empty(tag.title()).or_else(|| text_frame(tag, "TIT2")),
        artist: non_empty(tag.artist()).or_else(|| text_frame(tag, "TPE1")),
        album: non_empty(tag.album()).or_else(|| text_frame(tag, "TALB")),
        // Year is kept verbatim ("1999", "1999-03-01"): TDRC first, v2.3 TYER as fallback.
        year: text_frame(tag, "TDRC").or_else(|| text_frame(tag, "TYER")),
        genre: text_frame(tag, "TCON"),
        track: text_frame(tag, "TRCK"),
        has_cover_art,
        ..TrackMetadata::default()
    }
}

/// Get a best-effort string value from a text frame id.
fn text_frame(tag: &Tag, id: &str) -> Option<String> {
    let frame = tag.get(id)?;
    match frame.content() {
        Content::Text(s) => non_empty(Some(s)),
        _ => None,
    }
}
