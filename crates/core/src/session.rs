//! Fetch session state machine.
//!
//! A [`FetchSession`] owns the full ordered list of candidate endpoints for
//! one fetch operation: cache servers first (advertising the direct sources
//! via the `X-Source-Urls` header), then the direct sources themselves in a
//! one-time random order. The caller pulls attempts, performs the HTTP
//! request with whatever transport it likes, and reports the outcome back.

use crate::algo::HashAlgo;
use crate::sfv;
use crate::verify::HashVerifier;
use rand::seq::SliceRandom;
use rand::Rng;
use std::io::Write;
use std::str::FromStr;

/// Request header advertising fallback source URLs to cache servers.
pub const SOURCE_URLS_HEADER: &str = "X-Source-Urls";

/// One candidate endpoint: the URL to GET and the headers to send.
///
/// Attempts are built once at session construction and never mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchAttempt {
    url: String,
    headers: Vec<(String, String)>,
}

impl FetchAttempt {
    /// The URL to request.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Headers to attach to the request.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }
}

/// The attempt-ordering state machine for one fetch operation.
///
/// Servers are tried before direct sources because a cache server is assumed
/// authoritative and deduplicating; direct sources are shuffled once at
/// construction so load spreads across mirrors instead of always hitting the
/// first-listed one.
#[derive(Debug)]
pub struct FetchSession {
    attempts: Vec<FetchAttempt>,
    cursor: usize,
    done: bool,
    success: bool,
    algo: HashAlgo,
    digest: String,
}

impl FetchSession {
    /// Build a session from cache servers, an algorithm name, the expected
    /// hex digest, and direct source URLs.
    ///
    /// Fails with [`Error::UnsupportedAlgorithm`] before producing any
    /// attempt if the algorithm does not normalize to a supported one.
    ///
    /// [`Error::UnsupportedAlgorithm`]: crate::Error::UnsupportedAlgorithm
    pub fn new(
        servers: &[impl AsRef<str>],
        algo: &str,
        digest: &str,
        source_urls: &[impl AsRef<str>],
    ) -> crate::Result<Self> {
        Self::with_rng(servers, algo, digest, source_urls, &mut rand::rng())
    }

    /// Like [`new`](Self::new) but with an explicit randomness source for the
    /// source-URL shuffle, so attempt ordering is deterministic under test.
    pub fn with_rng<R: Rng + ?Sized>(
        servers: &[impl AsRef<str>],
        algo: &str,
        digest: &str,
        source_urls: &[impl AsRef<str>],
        rng: &mut R,
    ) -> crate::Result<Self> {
        let algo = HashAlgo::from_str(algo)?;

        let source_header = if source_urls.is_empty() {
            None
        } else {
            Some(sfv::encode_string_list(source_urls))
        };

        let mut attempts = Vec::with_capacity(servers.len() + source_urls.len());

        for server in servers {
            let base = server.as_ref().strip_suffix('/').unwrap_or(server.as_ref());
            let url = format!("{base}/api/fetchurl/{algo}/{digest}");
            let mut headers = Vec::new();
            if let Some(ref value) = source_header {
                headers.push((SOURCE_URLS_HEADER.to_string(), value.clone()));
            }
            attempts.push(FetchAttempt { url, headers });
        }

        // One draw; the order is fixed for the life of the session.
        let mut direct: Vec<String> = source_urls
            .iter()
            .map(|s| s.as_ref().to_string())
            .collect();
        direct.shuffle(rng);
        for url in direct {
            attempts.push(FetchAttempt {
                url,
                headers: Vec::new(),
            });
        }

        Ok(Self {
            attempts,
            cursor: 0,
            done: false,
            success: false,
            algo,
            digest: digest.to_string(),
        })
    }

    /// The next attempt to try, or `None` once the sequence is exhausted or
    /// the session reached a terminal state.
    pub fn next_attempt(&mut self) -> Option<FetchAttempt> {
        if self.done || self.cursor >= self.attempts.len() {
            return None;
        }
        let attempt = self.attempts[self.cursor].clone();
        self.cursor += 1;
        Some(attempt)
    }

    /// Report that the current attempt delivered verified content.
    ///
    /// Terminal and irreversible; a no-op if the session already ended.
    pub fn report_success(&mut self) {
        if !self.done {
            self.done = true;
            self.success = true;
        }
    }

    /// Report that bytes reached the destination before a failure.
    ///
    /// The destination is tainted, so the session stops producing attempts.
    /// Terminal and irreversible; a no-op if the session already ended.
    pub fn report_partial(&mut self) {
        if !self.done {
            self.done = true;
        }
    }

    /// Whether the session ended via [`report_success`](Self::report_success).
    pub fn succeeded(&self) -> bool {
        self.success
    }

    /// The session's normalized algorithm.
    pub fn algo(&self) -> HashAlgo {
        self.algo
    }

    /// The expected hex digest.
    pub fn digest(&self) -> &str {
        &self.digest
    }

    /// Create a fresh [`HashVerifier`] over `sink` for one attempt's body.
    ///
    /// Does not touch session state; call it once per attempt so digest
    /// state is never reused.
    pub fn verifier<W: Write>(&self, sink: W) -> HashVerifier<W> {
        HashVerifier::new(self.algo, &self.digest, sink)
    }
}
