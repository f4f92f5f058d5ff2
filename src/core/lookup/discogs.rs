use reqwest::blocking::Client;
use reqwest::header;
use serde::Deserialize;

use super::{DEFAULT_TIMEOUT, LookupClient, MAX_RESULTS, SearchKind, USER_AGENT};
use crate::core::error::LookupError;
use crate::core::types::{LookupResult, LookupSource};

const DISCOGS_API_URL: &str = "https://api.discogs.com";

/// Discogs database search, authenticated with a personal access token.
pub struct DiscogsClient {
    http: Client,
    base_url: String,
    token: String,
}

impl DiscogsClient {
    pub fn new(token: &str) -> Result<Self, LookupError> {
        Self::with_base_url(DISCOGS_API_URL, token)
    }

    pub fn with_base_url(base_url: &str, token: &str) -> Result<Self, LookupError> {
        if token.trim().is_empty() {
            return Err(LookupError::NotConfigured);
        }

        let http = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.trim().to_string(),
        })
    }
}

impl LookupClient for DiscogsClient {
    fn source(&self) -> LookupSource {
        LookupSource::Discogs
    }

    fn search(&self, query: &str, _kind: SearchKind) -> Result<Vec<LookupResult>, LookupError> {
        // Discogs has no recording entity; track queries still search releases.
        let url = format!("{}/database/search", self.base_url);
        let per_page = MAX_RESULTS.to_string();

        tracing::debug!(%url, query, "querying Discogs");

        let response = self
            .http
            .get(&url)
            .header(header::AUTHORIZATION, format!("Discogs token={}", self.token))
            .query(&[("q", query), ("type", "release"), ("per_page", per_page.as_str())])
            .send()?;

        if !response.status().is_success() {
            return Err(LookupError::Status(response.status().as_u16()));
        }

        let body: SearchResponse = response.json()?;
        Ok(body.into_results())
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    title: Option<String>,
    year: Option<Year>,
}

/// Discogs sends the year as a string in search results, a number elsewhere.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Year {
    Text(String),
    Number(i64),
}

impl SearchResponse {
    fn into_results(self) -> Vec<LookupResult> {
        self.results
            .into_iter()
            .take(MAX_RESULTS)
            .map(|r| {
                let (artist, album) = split_title(r.title.as_deref().unwrap_or_default());
                let year = match r.year {
                    Some(Year::Text(s)) if s != "0" => s,
                    Some(Year::Number(n)) if n > 0 => n.to_string(),
                    _ => String::new(),
                };
                LookupResult {
                    source: LookupSource::Discogs,
                    artist,
                    album,
                    year,
                    title: None,
                    score: None,
                }
            })
            .collect()
    }
}

/// Search titles look like "Artist - Album".
fn split_title(title: &str) -> (String, String) {
    match title.split_once(" - ") {
        Some((artist, album)) => (artist.trim().to_string(), album.trim().to_string()),
        None if title.trim().is_empty() => ("Unknown Artist".to_string(), "Unknown Album".to_string()),
        None => ("Unknown Artist".to_string(), title.trim().to_string()),
    }
}
