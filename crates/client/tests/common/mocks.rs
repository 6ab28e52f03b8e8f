#![allow(dead_code)] // Each test binary uses a different subset.

use async_trait::async_trait;
use bytes::Bytes;
use fetchurl_client::error::BoxError;
use fetchurl_client::{blocking, transport};
use fetchurl_core::HashAlgo;
use std::collections::HashMap;
use std::io::{self, Read};
use std::sync::Mutex;

/// Hex sha256 of `data`, for building expected digests in tests.
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = HashAlgo::Sha256.hasher();
    hasher.update(data);
    hasher.finalize_hex()
}

/// A scripted response for one URL.
#[derive(Clone)]
pub enum Scripted {
    /// 200 with the given body.
    Ok(Vec<u8>),
    /// A non-200 status with an empty body.
    Status(u16),
    /// The request itself fails (connection refused etc.).
    ConnectError(&'static str),
    /// 200, but the body errors out after yielding `prefix`.
    BrokenBody(Vec<u8>),
}

/// Scripted transport implementing both the async and blocking capability,
/// recording every request it sees.
#[derive(Default)]
pub struct MockTransport {
    responses: HashMap<String, Scripted>,
    requests: Mutex<Vec<(String, Vec<(String, String)>)>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a response for an exact URL.
    pub fn respond(mut self, url: impl Into<String>, response: Scripted) -> Self {
        self.responses.insert(url.into(), response);
        self
    }

    /// URLs requested so far, in order.
    pub fn requested_urls(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(url, _)| url.clone())
            .collect()
    }

    /// Headers sent with the request to `url`, if it was requested.
    pub fn headers_for(&self, url: &str) -> Option<Vec<(String, String)>> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .find(|(u, _)| u == url)
            .map(|(_, headers)| headers.clone())
    }

    fn record(&self, url: &str, headers: &[(String, String)]) -> Result<Scripted, BoxError> {
        self.requests
            .lock()
            .unwrap()
            .push((url.to_string(), headers.to_vec()));
        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| format!("unscripted url: {url}").into())
    }
}

#[async_trait]
impl transport::Transport for MockTransport {
    async fn get(
        &self,
        url: &str,
        headers: &[(String, String)],
    ) -> Result<transport::Response, BoxError> {
        match self.record(url, headers)? {
            Scripted::Ok(body) => Ok(transport::Response {
                status: 200,
                body: Box::pin(futures::stream::iter(
                    // Split the body so streaming covers multiple chunks.
                    body.chunks(3)
                        .map(|c| Ok(Bytes::copy_from_slice(c)))
                        .collect::<Vec<io::Result<Bytes>>>(),
                )),
            }),
            Scripted::Status(status) => Ok(transport::Response {
                status,
                body: Box::pin(futures::stream::empty()),
            }),
            Scripted::ConnectError(msg) => Err(msg.into()),
            Scripted::BrokenBody(prefix) => {
                let mut items: Vec<io::Result<Bytes>> = Vec::new();
                if !prefix.is_empty() {
                    items.push(Ok(Bytes::from(prefix)));
                }
                items.push(Err(io::Error::other("connection reset mid-body")));
                Ok(transport::Response {
                    status: 200,
                    body: Box::pin(futures::stream::iter(items)),
                })
            }
        }
    }
}

impl blocking::Transport for MockTransport {
    fn get(
        &self,
        url: &str,
        headers: &[(String, String)],
    ) -> Result<blocking::Response, BoxError> {
        match self.record(url, headers)? {
            Scripted::Ok(body) => Ok(blocking::Response {
                status: 200,
                body: Box::new(io::Cursor::new(body)),
            }),
            Scripted::Status(status) => Ok(blocking::Response {
                status,
                body: Box::new(io::empty()),
            }),
            Scripted::ConnectError(msg) => Err(msg.into()),
            Scripted::BrokenBody(prefix) => Ok(blocking::Response {
                status: 200,
                body: Box::new(BrokenReader {
                    prefix: io::Cursor::new(prefix),
                }),
            }),
        }
    }
}

/// Reader that yields its prefix, then fails.
struct BrokenReader {
    prefix: io::Cursor<Vec<u8>>,
}

impl Read for BrokenReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.prefix.read(buf)?;
        if n == 0 {
            Err(io::Error::other("connection reset mid-body"))
        } else {
            Ok(n)
        }
    }
}
