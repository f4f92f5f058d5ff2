//! core/ports.rs
//!
//! Capability seams between core logic and the environment.
//! - `Interaction`: terminal prompts (read a line, print a line)
//! - `TagStore`: read/write the tag container of one MP3
//! - `CoverSource`: let the user pick a cover image
//! - `FolderPicker`: let the user pick the working folder
//!
//! Core code only sees these traits, so tests drive it with fakes.

use std::path::{Path, PathBuf};

use super::error::{PromptError, TagError};
use super::types::{CoverArt, TrackMetadata};

pub trait Interaction {
    /// Print one line (or block) of output.
    fn say(&mut self, text: &str);

    /// Show `prompt` and return the trimmed reply.
    fn ask(&mut self, prompt: &str) -> Result<String, PromptError>;

    /// Yes/no question that loops until it gets a clear answer.
    fn confirm(&mut self, prompt: &str) -> Result<bool, PromptError> {
        loop {
            match self.ask(prompt)?.to_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.say("Please enter 'y' or 'n'"),
            }
        }
    }

    /// Single-shot yes/no: anything but y/yes counts as no.
    fn ask_yes(&mut self, prompt: &str) -> Result<bool, PromptError> {
        let reply = self.ask(prompt)?.to_lowercase();
        Ok(matches!(reply.as_str(), "y" | "yes"))
    }
}

pub trait TagStore {
    fn read(&self, path: &Path) -> Result<TrackMetadata, TagError>;

    /// Writes the non-empty text fields of `metadata`; empty/absent fields are
    /// left as they are on disk. `cover` replaces every existing picture.
    fn write(
        &mut self,
        path: &Path,
        metadata: &TrackMetadata,
        cover: Option<&CoverArt>,
    ) -> Result<(), TagError>;
}

pub trait CoverSource {
    /// `None` = cancelled or unreadable.
    fn pick_cover(&mut self) -> Option<CoverArt>;
}

pub trait FolderPicker {
    /// `None` = cancelled.
    fn pick_folder(&mut self, prompt: &str) -> Option<PathBuf>;
}
