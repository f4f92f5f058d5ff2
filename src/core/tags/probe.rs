//! core/tags/probe.rs
//! Stream info (duration/bitrate) via Symphonia. Only the container is probed;
//! nothing is decoded.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use symphonia::core::formats::FormatOptions;
use symphonia::core::io::{MediaSourceStream, MediaSourceStreamOptions};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::core::units::TimeBase;

use super::util::id3v2_tag_len;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct StreamInfo {
    pub duration_seconds: f64,
    pub bitrate: u32,
}

pub(crate) fn probe_stream(path: &Path) -> Result<StreamInfo, String> {
    let file = File::open(path).map_err(|e| format!("Open failed: {e}"))?;
    let file_len = file.metadata().map(|m| m.len()).unwrap_or(0);
    let mss = MediaSourceStream::new(Box::new(file), MediaSourceStreamOptions::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| format!("Format probe failed: {e}"))?;

    let track = probed
        .format
        .default_track()
        .ok_or_else(|| "No supported audio track found.".to_string())?;

    let duration_seconds =
        duration_from_params(track.codec_params.time_base, track.codec_params.n_frames)
            .unwrap_or(0.0);

    let audio_bytes = file_len.saturating_sub(leading_tag_len(path));

    Ok(StreamInfo {
        duration_seconds,
        bitrate: average_bitrate(audio_bytes, duration_seconds),
    })
}

fn duration_from_params(time_base: Option<TimeBase>, n_frames: Option<u64>) -> Option<f64> {
    let tb = time_base?;
    let frames = n_frames?;

    let t = tb.calc_time(frames);
    // Time is { seconds: u64, frac: f64 } in symphonia 0.5.x.
    Some(t.seconds as f64 + t.frac)
}

fn leading_tag_len(path: &Path) -> u64 {
    let mut head = [0u8; 10];
    match File::open(path).and_then(|mut f| f.read_exact(&mut head)) {
        Ok(()) => id3v2_tag_len(&head),
        Err(_) => 0,
    }
}

/// Bits per second over the whole audio payload.
fn average_bitrate(audio_bytes: u64, duration_seconds: f64) -> u32 {
    if duration_seconds <= 0.0 {
        return 0;
    }
    (audio_bytes as f64 * 8.0 / duration_seconds).round() as u32
}
