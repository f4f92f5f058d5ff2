use std::path::Path;

use crate::core::types::{CoverArt, CoverMime};

/// Guess the image type from its magic bytes. Unknown data is assumed JPEG.
pub fn sniff_mime(data: &[u8]) -> CoverMime {
    if data.starts_with(b"\x89PNG") {
        CoverMime::Png
    } else if data.starts_with(b"GIF") {
        CoverMime::Gif
    } else if data.starts_with(b"BM") {
        CoverMime::Bmp
    } else {
        CoverMime::Jpeg
    }
}

pub fn cover_from_bytes(data: Vec<u8>) -> CoverArt {
    let mime = sniff_mime(&data);
    CoverArt { data, mime }
}

/// Load an image file picked by the user.
pub fn load_cover_file(path: &Path) -> Result<CoverArt, std::io::Error> {
    let data = std::fs::read(path)?;
    Ok(cover_from_bytes(data))
}
