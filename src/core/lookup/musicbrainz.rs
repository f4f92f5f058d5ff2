//! MusicBrainz search client (WS/2, JSON).
//!
//! - Endpoint: https://musicbrainz.org/ws/2/{release|recording}?query=...&fmt=json
//! - Rate limit: 1 request/second (MusicBrainz Terms of Service)
//! - A User-Agent identifying the application is required

use std::cell::Cell;
use std::time::{Duration, Instant};

use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::debug;

use super::{DEFAULT_TIMEOUT, LookupClient, MAX_RESULTS, SearchKind, USER_AGENT};
use crate::core::error::LookupError;
use crate::core::types::{LookupResult, LookupSource};

const MUSICBRAINZ_API_URL: &str = "https://musicbrainz.org/ws/2";

const RATE_LIMIT_INTERVAL: Duration = Duration::from_millis(1000);

pub struct MusicBrainzClient {
    http: Client,
    base_url: String,
    last_request: Cell<Option<Instant>>,
}

impl MusicBrainzClient {
    pub fn new() -> Result<Self, LookupError> {
        Self::with_base_url(MUSICBRAINZ_API_URL)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self, LookupError> {
        let http = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            last_request: Cell::new(None),
        })
    }

    /// Sleeps if the previous request was less than a second ago.
    fn enforce_rate_limit(&self) {
        if let Some(last) = self.last_request.get() {
            let elapsed = last.elapsed();
            if elapsed < RATE_LIMIT_INTERVAL {
                let wait = RATE_LIMIT_INTERVAL - elapsed;
                debug!(sleep_ms = wait.as_millis() as u64, "rate limiting MusicBrainz request");
                std::thread::sleep(wait);
            }
        }
        self.last_request.set(Some(Instant::now()));
    }
}

impl LookupClient for MusicBrainzClient {
    fn source(&self) -> LookupSource {
        LookupSource::MusicBrainz
    }

    fn search(&self, query: &str, kind: SearchKind) -> Result<Vec<LookupResult>, LookupError> {
        self.enforce_rate_limit();

        let entity = match kind {
            SearchKind::Release => "release",
            SearchKind::Recording => "recording",
        };
        let url = format!("{}/{}", self.base_url, entity);
        let limit = MAX_RESULTS.to_string();

        debug!(%url, query, "querying MusicBrainz");

        let response = self
            .http
            .get(&url)
            .query(&[("query", query), ("limit", limit.as_str()), ("fmt", "json")])
            .send()?;

        if !response.status().is_success() {
            return Err(LookupError::Status(response.status().as_u16()));
        }

        let body: SearchResponse = response.json()?;
        Ok(body.into_results(kind))
    }
}

#[derive(Debug, Deserialize, Default)]
struct SearchResponse {
    #[serde(default)]
    releases: Vec<Release>,
    #[serde(default)]
    recordings: Vec<Recording>,
}

#[derive(Debug, Deserialize)]
struct Release {
    title: Option<String>,
    date: Option<String>,
    score: Option<u32>,
    #[serde(rename = "artist-credit", default)]
    artist_credit: Vec<ArtistCredit>,
}

#[derive(Debug, Deserialize)]
struct Recording {
    title: Option<String>,
    score: Option<u32>,
    #[serde(rename = "artist-credit", default)]
    artist_credit: Vec<ArtistCredit>,
    #[serde(default)]
    releases: Vec<Release>,
}

#[derive(Debug, Deserialize)]
struct ArtistCredit {
    name: String,
    #[serde(default)]
    joinphrase: String,
}

impl SearchResponse {
    fn into_results(self, kind: SearchKind) -> Vec<LookupResult> {
        match kind {
            SearchKind::Release => self
                .releases
                .into_iter()
                .map(|r| LookupResult {
                    source: LookupSource::MusicBrainz,
                    artist: credit_phrase(&r.artist_credit),
                    album: r.title.unwrap_or_else(|| "Unknown Album".to_string()),
                    year: year_of(r.date.as_deref()),
                    title: None,
                    score: r.score,
                })
                .collect(),
            SearchKind::Recording => self
                .recordings
                .into_iter()
                .map(|rec| {
                    // First listed release stands in for the album.
                    let release = rec.releases.first();
                    LookupResult {
                        source: LookupSource::MusicBrainz,
                        artist: credit_phrase(&rec.artist_credit),
                        album: release.and_then(|r| r.title.clone()).unwrap_or_default(),
                        year: year_of(release.and_then(|r| r.date.as_deref())),
                        title: Some(rec.title.unwrap_or_else(|| "Unknown Title".to_string())),
                        score: rec.score,
                    }
                })
                .collect(),
        }
    }
}

/// "Artist A feat. Artist B" from the artist-credit list.
fn credit_phrase(credits: &[ArtistCredit]) -> String {
    if credits.is_empty() {
        return "Unknown Artist".to_string();
    }
    credits
        .iter()
        .map(|c| format!("{}{}", c.name, c.joinphrase))
        .collect()
}

/// "1969-09-26" -> "1969"
fn year_of(date: Option<&str>) -> String {
    date.map(|d| d.chars().take(4).collect()).unwrap_or_default()
}
