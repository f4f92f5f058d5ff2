//! core/tags/mod.rs
//!
//! ID3 tag read/write utilities.
//! Public API:
//! - [`read_metadata`] reads an MP3 into a [`TrackMetadata`] (missing tag = empty, not an error).
//! - [`write_metadata`] writes the non-empty fields (and optional cover) back to disk.
//! - [`Id3Store`] wraps both behind the `TagStore` port.

mod art;
mod probe;
mod read;
mod util;
mod write;

use std::path::Path;

pub use art::{cover_from_bytes, load_cover_file, sniff_mime};
pub use read::read_metadata;
pub use write::write_metadata;

use super::error::TagError;
use super::ports::TagStore;
use super::types::{CoverArt, TrackMetadata};

/// The real tag container: `id3` for frames, `symphonia` for stream info.
#[derive(Debug, Default, Clone, Copy)]
pub struct Id3Store;

impl TagStore for Id3Store {
    fn read(&self, path: &Path) -> Result<TrackMetadata, TagError> {
        read_metadata(path)
    }

    fn write(
        &mut self,
        path: &Path,
        metadata: &TrackMetadata,
        cover: Option<&CoverArt>,
    ) -> Result<(), TagError> {
        write_metadata(path, metadata, cover)
    }
}
