//! core/testing.rs
//! Test doubles for the capability ports. Compiled for tests only.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::convert::Encoder;
use super::error::{ConvertError, LookupError, PromptError, TagError};
use super::lookup::{LookupClient, SearchKind};
use super::ports::{CoverSource, Interaction, TagStore};
use super::types::{CoverArt, LookupResult, LookupSource, TrackMetadata};

/// Answers prompts from a queue; records everything shown.
/// Running out of answers behaves like a closed terminal.
#[derive(Debug, Default)]
pub(crate) struct ScriptedIo {
    answers: VecDeque<String>,
    pub prompts: Vec<String>,
    pub output: Vec<String>,
}

impl ScriptedIo {
    pub(crate) fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    pub(crate) fn remaining(&self) -> usize {
        self.answers.len()
    }

    pub(crate) fn saw(&self, needle: &str) -> bool {
        self.output.iter().chain(&self.prompts).any(|l| l.contains(needle))
    }
}

impl Interaction for ScriptedIo {
    fn say(&mut self, text: &str) {
        self.output.push(text.to_string());
    }

    fn ask(&mut self, prompt: &str) -> Result<String, PromptError> {
        self.prompts.push(prompt.to_string());
        self.answers
            .pop_front()
            .map(|s| s.trim().to_string())
            .ok_or(PromptError::Closed)
    }
}

/// In-memory tag container with the same "skip empty fields" write rule.
#[derive(Debug, Default)]
pub(crate) struct MemoryTags {
    pub files: HashMap<PathBuf, TrackMetadata>,
    pub covers: HashMap<PathBuf, CoverArt>,
    pub unreadable: Vec<PathBuf>,
    pub fail_writes: Vec<PathBuf>,
    pub writes: Vec<PathBuf>,
}

impl MemoryTags {
    pub(crate) fn insert(&mut self, path: &Path, meta: TrackMetadata) {
        self.files.insert(path.to_path_buf(), meta);
    }

    pub(crate) fn get(&self, path: &Path) -> &TrackMetadata {
        &self.files[path]
    }
}

impl TagStore for MemoryTags {
    fn read(&self, path: &Path) -> Result<TrackMetadata, TagError> {
        if self.unreadable.iter().any(|p| p == path) {
            return Err(TagError::Read("can't sync to MPEG frame".to_string()));
        }
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| TagError::Read("no such file".to_string()))
    }

    fn write(
        &mut self,
        path: &Path,
        metadata: &TrackMetadata,
        cover: Option<&CoverArt>,
    ) -> Result<(), TagError> {
        if self.fail_writes.iter().any(|p| p == path) {
            return Err(TagError::Write("disk full".to_string()));
        }

        let current = self
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| TagError::Write("no such file".to_string()))?;

        let mut next = current;
        for field in super::types::Field::ALL {
            if let Some(v) = metadata.get(field) {
                next = next.with(field, Some(v.to_string()));
            }
        }
        if let Some(c) = cover {
            next.has_cover_art = true;
            self.covers.insert(path.to_path_buf(), c.clone());
        }

        self.files.insert(path.to_path_buf(), next);
        self.writes.push(path.to_path_buf());
        Ok(())
    }
}

/// Hands out the same cover every time it's asked (or nothing).
#[derive(Debug, Default)]
pub(crate) struct FixedCovers {
    pub cover: Option<CoverArt>,
    pub picks: usize,
}

impl CoverSource for FixedCovers {
    fn pick_cover(&mut self) -> Option<CoverArt> {
        self.picks += 1;
        self.cover.clone()
    }
}

/// Canned lookup backend that counts how often it was asked.
pub(crate) struct StaticLookup {
    pub source: LookupSource,
    pub results: Result<Vec<LookupResult>, u16>,
    pub calls: Rc<Cell<usize>>,
    pub kinds: Rc<RefCell<Vec<SearchKind>>>,
}

impl StaticLookup {
    pub(crate) fn new(source: LookupSource, results: Vec<LookupResult>) -> Self {
        Self {
            source,
            results: Ok(results),
            calls: Default::default(),
            kinds: Default::default(),
        }
    }

    pub(crate) fn failing(source: LookupSource, status: u16) -> Self {
        Self {
            source,
            results: Err(status),
            calls: Default::default(),
            kinds: Default::default(),
        }
    }
}

impl LookupClient for StaticLookup {
    fn source(&self) -> LookupSource {
        self.source
    }

    fn search(&self, _query: &str, kind: SearchKind) -> Result<Vec<LookupResult>, LookupError> {
        self.calls.set(self.calls.get() + 1);
        self.kinds.borrow_mut().push(kind);
        match &self.results {
            Ok(r) => Ok(r.clone()),
            Err(status) => Err(LookupError::Status(*status)),
        }
    }
}

pub(crate) fn candidate(source: LookupSource, artist: &str, album: &str, year: &str) -> LookupResult {
    LookupResult {
        source,
        artist: artist.to_string(),
        album: album.to_string(),
        year: year.to_string(),
        title: None,
        score: None,
    }
}

pub(crate) fn track(title: &str, artist: &str, album: &str) -> TrackMetadata {
    TrackMetadata {
        title: Some(title.to_string()),
        artist: Some(artist.to_string()),
        album: Some(album.to_string()),
        duration_seconds: 180.0,
        bitrate: 320_000,
        ..TrackMetadata::default()
    }
}

/// Writes a stub MP3 for every input, except names listed in `fail_on`.
#[derive(Debug, Default)]
pub(crate) struct FakeEncoder {
    pub fail_on: Vec<String>,
    pub calls: RefCell<Vec<PathBuf>>,
}

impl FakeEncoder {
    pub(crate) fn failing_on(names: &[&str]) -> Self {
        Self {
            fail_on: names.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }
}

impl Encoder for FakeEncoder {
    fn encode(&self, input: &Path, output: &Path) -> Result<(), ConvertError> {
        self.calls.borrow_mut().push(input.to_path_buf());

        let name = super::file_name(input);
        if self.fail_on.contains(&name) {
            return Err(ConvertError::Failed {
                stderr: format!("{}: Invalid data found when processing input", input.display()),
            });
        }
        std::fs::write(output, b"ID3").map_err(ConvertError::Spawn)
    }
}
