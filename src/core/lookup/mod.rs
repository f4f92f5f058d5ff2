//! core/lookup/mod.rs
//!
//! Online metadata lookup.
//! - [`LookupClient`]: one catalog backend (MusicBrainz, Discogs)
//! - [`Lookup`]: ordered backends; the second one is only asked when the
//!   first returns nothing
//!
//! Backend failures are logged and treated as zero results. Nothing in here
//! is fatal for the tagging session.

mod discogs;
mod musicbrainz;

use std::time::Duration;

pub use discogs::DiscogsClient;
pub use musicbrainz::MusicBrainzClient;

use super::error::LookupError;
use super::types::{LookupResult, LookupSource};

/// Results shown to the user are capped at this many entries.
pub const MAX_RESULTS: usize = 10;

pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

pub(crate) const USER_AGENT: &str = concat!(
    "tunekit/",
    env!("CARGO_PKG_VERSION"),
    " ( https://github.com/tunekit/tunekit )"
);

/// What kind of catalog entity the query is aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Release,
    Recording,
}

pub trait LookupClient {
    fn source(&self) -> LookupSource;

    /// Up to [`MAX_RESULTS`] ranked candidates.
    fn search(&self, query: &str, kind: SearchKind) -> Result<Vec<LookupResult>, LookupError>;
}

/// Backends in the order they are tried.
#[derive(Default)]
pub struct Lookup {
    backends: Vec<Box<dyn LookupClient>>,
}

impl Lookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_backend(mut self, client: Box<dyn LookupClient>) -> Self {
        self.backends.push(client);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }

    /// Ask each backend in turn until one returns something.
    ///
    /// `on_attempt` is called before each backend is queried (progress output).
    pub fn search_first_available(
        &self,
        query: &str,
        kind: SearchKind,
        mut on_attempt: impl FnMut(LookupSource),
    ) -> Vec<LookupResult> {
        for backend in &self.backends {
            let source = backend.source();
            on_attempt(source);

            let mut results = match backend.search(query, kind) {
                Ok(r) => r,
                Err(e) => {
                    tracing::warn!(source = source.name(), error = %e, "lookup failed");
                    Vec::new()
                }
            };

            tracing::debug!(source = source.name(), query, hits = results.len(), "lookup done");

            if !results.is_empty() {
                results.truncate(MAX_RESULTS);
                return results;
            }
        }

        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::{StaticLookup, candidate};

    #[test]
    fn discogs_is_skipped_when_musicbrainz_has_results() {
        let mb = StaticLookup::new(
            LookupSource::MusicBrainz,
            vec![candidate(LookupSource::MusicBrainz, "A", "B", "2000")],
        );
        let dc = StaticLookup::new(
            LookupSource::Discogs,
            vec![candidate(LookupSource::Discogs, "C", "D", "2001")],
        );
        let dc_calls = dc.calls.clone();

        let lookup = Lookup::new().with_backend(Box::new(mb)).with_backend(Box::new(dc));
        let mut tried = Vec::new();
        let results = lookup.search_first_available("q", SearchKind::Release, |s| tried.push(s));

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].source, LookupSource::MusicBrainz);
        assert_eq!(dc_calls.get(), 0);
        assert_eq!(tried, vec![LookupSource::MusicBrainz]);
    }

    #[test]
    fn failure_counts_as_zero_results_and_falls_back() {
        let mb = StaticLookup::failing(LookupSource::MusicBrainz, 503);
        let dc = StaticLookup::new(
            LookupSource::Discogs,
            vec![candidate(LookupSource::Discogs, "C", "D", "2001")],
        );

        let lookup = Lookup::new().with_backend(Box::new(mb)).with_backend(Box::new(dc));
        let results = lookup.search_first_available("q", SearchKind::Release, |_| {});

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].source, LookupSource::Discogs);
    }

    #[test]
    fn results_are_capped() {
        let many: Vec<_> = (0..25)
            .map(|i| candidate(LookupSource::MusicBrainz, "A", &format!("Album {i}"), ""))
            .collect();
        let lookup = Lookup::new().with_backend(Box::new(StaticLookup::new(LookupSource::MusicBrainz, many)));

        let results = lookup.search_first_available("q", SearchKind::Release, |_| {});
        assert_eq!(results.len(), MAX_RESULTS);
    }

    #[test]
    fn no_backends_means_no_results() {
        assert!(Lookup::new().search_first_available("q", SearchKind::Release, |_| {}).is_empty());
    }
}
