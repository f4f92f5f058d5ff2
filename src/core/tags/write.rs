//! Write ID3 tags back to an MP3, based on a `TrackMetadata`.
//!
//! Semantics:
//! - Non-empty field => frame is (re)written.
//! - `None` / empty field => frame is left untouched. There is no way to blank
//!   a tag through this path.
//! - Cover art => every existing picture frame is removed, then one front
//!   cover is added.

use std::path::Path;

use id3::frame::{Picture, PictureType};
use id3::{ErrorKind, Tag, TagLike, Version};

use crate::core::error::TagError;
use crate::core::types::{CoverArt, Field, TrackMetadata};

fn frame_id(field: Field) -> &'static str {
    match field {
        Field::Title => "TIT2",
        Field::Artist => "TPE1",
        Field::Album => "TALB",
        Field::Year => "TDRC",
        Field::Genre => "TCON",
        Field::Track => "TRCK",
    }
}

pub(crate) fn apply_to_tag(tag: &mut Tag, metadata: &TrackMetadata, cover: Option<&CoverArt>) {
    for field in Field::ALL {
        if let Some(value) = metadata.get(field).map(str::trim).filter(|s| !s.is_empty()) {
            tag.set_text(frame_id(field), value.to_string());
        }
    }

    if let Some(cover) = cover {
        tag.remove_all_pictures();
        let _ = tag.add_frame(Picture {
            mime_type: cover.mime.as_str().to_string(),
            picture_type: PictureType::CoverFront,
            description: "Cover".to_string(),
            data: cover.data.clone(),
        });
    }
}

pub fn write_metadata(
    path: &Path,
    metadata: &TrackMetadata,
    cover: Option<&CoverArt>,
) -> Result<(), TagError> {
    // Load existing tag if there is one; a missing tag starts fresh.
    let mut tag = match Tag::read_from_path(path) {
        Ok(t) => t,
        Err(e) if matches!(e.kind, ErrorKind::NoTag) => Tag::new(),
        Err(e) => return Err(TagError::Write(format!("could not load existing tag: {e}"))),
    };

    apply_to_tag(&mut tag, metadata, cover);

    tag.write_to_path(path, Version::Id3v24)
        .map_err(|e| TagError::Write(format!("write_to_path failed: {e}")))?;

    Ok(())
}
