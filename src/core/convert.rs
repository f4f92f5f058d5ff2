//! core/convert.rs
//!
//! FLAC -> MP3 batch conversion.
//!
//! Per source file, in order:
//! 1. `<stem>.mp3` already next to it -> skipped, encoder never called
//! 2. dry-run -> report what would happen, counted successful
//! 3. encode; failure -> failed, source left in place, stderr logged
//! 4. move the source into `converted_flac_to_be_deleted/`; a failed move
//!    is logged but the file still counts as successful
//!
//! Errors are logged to `<quarantine>/conversion_errors.log`.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, info, warn};

use super::errlog::{ErrorLog, Layout};
use super::error::ConvertError;
use super::ports::Interaction;

pub const QUARANTINE_DIR: &str = "converted_flac_to_be_deleted";
pub const ERROR_LOG_NAME: &str = "conversion_errors.log";

/// `album/01.flac` -> `album/01.mp3`
pub fn mp3_path_for(flac: &Path) -> PathBuf {
    flac.with_extension("mp3")
}

/// Where a converted source goes. Not created here.
pub fn quarantine_dir(flac: &Path) -> PathBuf {
    flac.parent()
        .unwrap_or_else(|| Path::new("."))
        .join(QUARANTINE_DIR)
}

/// Files per parent directory, directories sorted.
pub fn group_by_directory(files: &[PathBuf]) -> BTreeMap<PathBuf, usize> {
    let mut dirs = BTreeMap::new();
    for f in files {
        let parent = f.parent().map(Path::to_path_buf).unwrap_or_default();
        *dirs.entry(parent).or_insert(0) += 1;
    }
    dirs
}

pub trait Encoder {
    /// Produce `output` from `input`. `Err(Failed { stderr })` on a nonzero exit.
    fn encode(&self, input: &Path, output: &Path) -> Result<(), ConvertError>;
}

/// External `ffmpeg`: 320 kbps CBR, 48 kHz stereo, ID3v2.4, tags and
/// embedded art copied from the source.
#[derive(Debug, Clone)]
pub struct FfmpegEncoder {
    binary: PathBuf,
}

impl Default for FfmpegEncoder {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

impl FfmpegEncoder {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self { binary: binary.into() }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Runs `<binary> -version`.
    pub fn check(&self) -> Result<(), ConvertError> {
        let out = Command::new(&self.binary)
            .arg("-version")
            .stdin(Stdio::null())
            .output()
            .map_err(ConvertError::Spawn)?;

        if out.status.success() {
            Ok(())
        } else {
            Err(ConvertError::Failed {
                stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
            })
        }
    }

    pub fn args(input: &Path, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["-i".into(), input.into()];
        args.extend(
            [
                "-vn", "-ar", "48000", "-ac", "2", "-b:a", "320k",
                "-id3v2_version", "4", "-map_metadata", "0", "-map", "0", "-y",
            ]
            .map(OsString::from),
        );
        args.push(output.into());
        args
    }
}

impl Encoder for FfmpegEncoder {
    fn encode(&self, input: &Path, output: &Path) -> Result<(), ConvertError> {
        let args = Self::args(input, output);
        debug!(binary = %self.binary.display(), ?args, "running encoder");

        let out = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(ConvertError::Spawn)?;

        if out.status.success() {
            Ok(())
        } else {
            Err(ConvertError::Failed {
                stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
            })
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    pub total: usize,
    pub successful: usize,
    pub skipped: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Skipped,
    Successful,
    Failed,
}

pub struct Converter<'a> {
    encoder: &'a dyn Encoder,
    io: &'a mut dyn Interaction,
    root: Option<PathBuf>,
}

impl<'a> Converter<'a> {
    pub fn new(encoder: &'a dyn Encoder, io: &'a mut dyn Interaction) -> Self {
        Self { encoder, io, root: None }
    }

    /// Progress lines show paths relative to `root`.
    pub fn relative_to(mut self, root: &Path) -> Self {
        self.root = Some(root.to_path_buf());
        self
    }

    pub fn run(&mut self, files: &[PathBuf], dry_run: bool) -> ConversionSummary {
        let mut summary = ConversionSummary {
            total: files.len(),
            ..ConversionSummary::default()
        };

        for (idx, flac) in files.iter().enumerate() {
            let shown = self
                .root
                .as_deref()
                .and_then(|r| flac.strip_prefix(r).ok())
                .unwrap_or(flac);
            self.io.say(&format!(
                "\n[{}/{}] Processing: {}",
                idx + 1,
                summary.total,
                shown.display()
            ));

            match self.convert_one(flac, dry_run) {
                Outcome::Skipped => summary.skipped += 1,
                Outcome::Successful => summary.successful += 1,
                Outcome::Failed => summary.failed += 1,
            }
        }

        info!(?summary, dry_run, "conversion finished");
        summary
    }

    fn convert_one(&mut self, flac: &Path, dry_run: bool) -> Outcome {
        let name = super::file_name(flac);
        let mp3 = mp3_path_for(flac);
        let mp3_name = super::file_name(&mp3);

        if mp3.exists() {
            self.io.say("  ⏭️  SKIP: MP3 already exists");
            info!(file = %flac.display(), "skipped, mp3 exists");
            return Outcome::Skipped;
        }

        if dry_run {
            self.io.say(&format!("  [DRY-RUN] Would convert: {name} → {mp3_name}"));
            self.io.say(&format!(
                "  [DRY-RUN] Would move: {name} → {}/",
                quarantine_dir(flac).display()
            ));
            return Outcome::Successful;
        }

        self.io.say(&format!("  🔄 Converting: {name}"));
        if let Err(e) = self.encoder.encode(flac, &mp3) {
            self.io.say(&format!("  ❌ FAILED: {name}"));
            warn!(file = %flac.display(), error = %e, "encode failed");
            log_failure(flac, &e.to_string());
            return Outcome::Failed;
        }
        self.io.say(&format!("  ✅ SUCCESS: {mp3_name}"));

        match move_to_quarantine(flac) {
            Ok(_) => {
                self.io.say(&format!("  📦 Moved: {name} → {QUARANTINE_DIR}/"));
                info!(file = %flac.display(), "converted");
            }
            Err(e) => {
                self.io.say(&format!("  ⚠️  WARNING: Could not move {name}"));
                warn!(file = %flac.display(), error = %e, "move failed after encode");
                log_failure(flac, &format!("Move failed: {e}"));
            }
        }
        Outcome::Successful
    }
}

fn move_to_quarantine(flac: &Path) -> Result<PathBuf, ConvertError> {
    let dir = quarantine_dir(flac);
    let dest = dir.join(flac.file_name().unwrap_or_default());

    std::fs::create_dir_all(&dir)
        .and_then(|_| std::fs::rename(flac, &dest))
        .map_err(ConvertError::Move)?;

    Ok(dest)
}

fn log_failure(flac: &Path, message: &str) {
    let dir = quarantine_dir(flac);
    if let Err(e) = std::fs::create_dir_all(&dir) {
        tracing::error!(dir = %dir.display(), error = %e, "could not create quarantine folder");
        return;
    }
    ErrorLog::new(dir.join(ERROR_LOG_NAME), Layout::Block).record(flac, message);
}
