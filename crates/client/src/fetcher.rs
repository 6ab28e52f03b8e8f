//! Async orchestration loop.

use crate::error::{AttemptError, FetchError, FetchResult};
use crate::transport::Transport;
use fetchurl_core::{ClientConfig, FetchAttempt, FetchSession};
use futures::StreamExt;
use std::io::Write;

/// One fetch operation's inputs: algorithm, expected digest, and direct
/// source URLs.
#[derive(Clone, Debug)]
pub struct FetchRequest {
    /// Hash algorithm name, in any supported spelling (e.g. `"SHA-256"`).
    pub algo: String,
    /// Expected digest in hex.
    pub digest: String,
    /// Direct source URLs, tried after the cache servers.
    pub urls: Vec<String>,
}

/// Drives fetch sessions over an async [`Transport`].
///
/// Attempts are strictly sequential: each outcome is fully resolved before
/// the next attempt starts. A failure that wrote nothing to the destination
/// is recorded and the next candidate is tried; a failure after the first
/// accepted byte aborts the whole operation with
/// [`FetchError::PartialWrite`].
pub struct Fetcher<T> {
    transport: T,
    servers: Vec<String>,
}

impl<T: Transport> Fetcher<T> {
    /// Create a fetcher over the given transport and cache servers.
    pub fn new(transport: T, servers: Vec<String>) -> Self {
        Self { transport, servers }
    }

    /// Create a fetcher taking its server list from configuration.
    pub fn from_config(transport: T, config: &ClientConfig) -> Self {
        Self::new(transport, config.servers())
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch content into `out`, verifying it against the request's digest.
    pub async fn fetch<W: Write>(&self, request: &FetchRequest, out: &mut W) -> FetchResult<()> {
        let mut session = FetchSession::new(
            &self.servers,
            &request.algo,
            &request.digest,
            &request.urls,
        )?;
        self.run(&mut session, out).await
    }

    /// Drive a caller-built session to completion.
    ///
    /// Useful when the caller needs control over attempt ordering, e.g. a
    /// seeded RNG via [`FetchSession::with_rng`].
    pub async fn run<W: Write>(
        &self,
        session: &mut FetchSession,
        out: &mut W,
    ) -> FetchResult<()> {
        let mut last: Option<FetchError> = None;

        loop {
            let Some(attempt) = session.next_attempt() else {
                return Err(FetchError::AllSourcesFailed {
                    last: last.map(Box::new),
                });
            };

            match self.try_attempt(session, &attempt, out).await {
                Ok(()) => {
                    session.report_success();
                    return Ok(());
                }
                Err(AttemptError { error, tainted }) => {
                    tracing::warn!(url = attempt.url(), error = %error, "attempt failed");
                    if tainted {
                        session.report_partial();
                        return Err(FetchError::PartialWrite(Box::new(error)));
                    }
                    last = Some(error);
                }
            }
        }
    }

    async fn try_attempt<W: Write>(
        &self,
        session: &FetchSession,
        attempt: &FetchAttempt,
        out: &mut W,
    ) -> Result<(), AttemptError> {
        let response = self
            .transport
            .get(attempt.url(), attempt.headers())
            .await
            .map_err(|e| AttemptError::clean(FetchError::Transport(e)))?;

        if response.status != 200 {
            return Err(AttemptError::clean(FetchError::Status(response.status)));
        }

        let mut verifier = session.verifier(&mut *out);
        let mut body = response.body;

        while let Some(chunk) = body.next().await {
            let result = chunk
                .map_err(FetchError::Io)
                .and_then(|chunk| verifier.write_all(&chunk).map_err(FetchError::Io));
            if let Err(error) = result {
                return Err(AttemptError {
                    error,
                    tainted: verifier.bytes_written() > 0,
                });
            }
        }

        let tainted = verifier.bytes_written() > 0;
        verifier.finish().map_err(|e| AttemptError {
            error: e.into(),
            tainted,
        })?;
        Ok(())
    }
}
