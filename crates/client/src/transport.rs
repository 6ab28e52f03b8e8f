//! Transport capability for the async orchestration loop.
//!
//! The loop needs exactly one operation from its transport: issue a GET and
//! hand back the status plus the body as a stream of chunks. Keeping the
//! surface this narrow keeps the protocol core network-free and lets tests
//! script transports without sockets.

use crate::error::BoxError;
use async_trait::async_trait;
use bytes::Bytes;
use futures::{Stream, StreamExt};
use std::io;
use std::pin::Pin;

/// A boxed stream of body chunks.
pub type ByteStream = Pin<Box<dyn Stream<Item = io::Result<Bytes>> + Send>>;

/// An HTTP response as the orchestration loop sees it.
pub struct Response {
    /// HTTP status code.
    pub status: u16,
    /// Response body as a lazily-produced sequence of chunks.
    pub body: ByteStream,
}

/// The async transport capability: one GET-like operation.
///
/// Implementations own all connection, TLS, timeout, and redirect policy.
/// The orchestration loop treats any returned error as "this attempt failed
/// without writing bytes" and moves on to the next candidate.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a GET for `url` with the given headers.
    async fn get(&self, url: &str, headers: &[(String, String)]) -> Result<Response, BoxError>;
}

/// [`Transport`] implementation over [`reqwest::Client`].
#[derive(Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with a default client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport over a caller-configured client (timeouts,
    /// proxies, TLS settings).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str, headers: &[(String, String)]) -> Result<Response, BoxError> {
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes_stream().map(|chunk| chunk.map_err(io::Error::other));
        Ok(Response {
            status,
            body: Box::pin(body),
        })
    }
}
