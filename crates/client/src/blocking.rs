//! Blocking transport capability and orchestration loop.
//!
//! Same contract shape as the async side, with the body as a
//! [`std::io::Read`] instead of a chunk stream.

use crate::error::{AttemptError, BoxError, FetchError, FetchResult};
use crate::fetcher::FetchRequest;
use fetchurl_core::{ClientConfig, FetchAttempt, FetchSession, DEFAULT_CHUNK_SIZE};
use std::io::{Read, Write};

/// An HTTP response as the blocking orchestration loop sees it.
pub struct Response {
    /// HTTP status code.
    pub status: u16,
    /// Response body as a readable byte stream.
    pub body: Box<dyn Read + Send>,
}

/// The blocking transport capability: one GET-like operation.
pub trait Transport {
    /// Issue a GET for `url` with the given headers.
    fn get(&self, url: &str, headers: &[(String, String)]) -> Result<Response, BoxError>;
}

/// [`Transport`] implementation over [`reqwest::blocking::Client`].
#[derive(Clone, Default)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Create a transport with a default client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport over a caller-configured client.
    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str, headers: &[(String, String)]) -> Result<Response, BoxError> {
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }
        let response = request.send()?;
        let status = response.status().as_u16();
        Ok(Response {
            status,
            body: Box::new(response),
        })
    }
}

/// Drives fetch sessions over a blocking [`Transport`].
///
/// Same policy as the async [`Fetcher`](crate::Fetcher): sequential
/// attempts, zero-byte failures fall through to the next candidate, any
/// failure after the first accepted byte aborts with
/// [`FetchError::PartialWrite`].
pub struct Fetcher<T> {
    transport: T,
    servers: Vec<String>,
    chunk_size: usize,
}

impl<T: Transport> Fetcher<T> {
    /// Create a fetcher over the given transport and cache servers.
    pub fn new(transport: T, servers: Vec<String>) -> Self {
        Self {
            transport,
            servers,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Create a fetcher taking its server list and chunk size from
    /// configuration.
    pub fn from_config(transport: T, config: &ClientConfig) -> Self {
        Self {
            transport,
            servers: config.servers(),
            chunk_size: config.chunk_size.max(1),
        }
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch content into `out`, verifying it against the request's digest.
    pub fn fetch<W: Write>(&self, request: &FetchRequest, out: &mut W) -> FetchResult<()> {
        let mut session = FetchSession::new(
            &self.servers,
            &request.algo,
            &request.digest,
            &request.urls,
        )?;
        self.run(&mut session, out)
    }

    /// Drive a caller-built session to completion.
    pub fn run<W: Write>(&self, session: &mut FetchSession, out: &mut W) -> FetchResult<()> {
        let mut last: Option<FetchError> = None;

        loop {
            let Some(attempt) = session.next_attempt() else {
                return Err(FetchError::AllSourcesFailed {
                    last: last.map(Box::new),
                });
            };

            match self.try_attempt(session, &attempt, out) {
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

    fn try_attempt<W: Write>(
        &self,
        session: &FetchSession,
        attempt: &FetchAttempt,
        out: &mut W,
    ) -> Result<(), AttemptError> {
        let response = self
            .transport
            .get(attempt.url(), attempt.headers())
            .map_err(|e| AttemptError::clean(FetchError::Transport(e)))?;

        if response.status != 200 {
            return Err(AttemptError::clean(FetchError::Status(response.status)));
        }

        let mut verifier = session.verifier(&mut *out);
        let mut body = response.body;
        let mut buf = vec![0u8; self.chunk_size];

        loop {
            let result = body.read(&mut buf).and_then(|n| {
                if n == 0 {
                    return Ok(false);
                }
                verifier.write_all(&buf[..n]).map(|_| true)
            });
            match result {
                Ok(true) => {}
                Ok(false) => break,
                Err(error) => {
                    return Err(AttemptError {
                        error: FetchError::Io(error),
                        tainted: verifier.bytes_written() > 0,
                    });
                }
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
