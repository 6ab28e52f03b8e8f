//! Client configuration types.

use serde::{Deserialize, Serialize};

/// Client configuration, typically loaded from a config file plus
/// `FETCHURL_`-prefixed environment variables.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Cache server base URLs as an RFC 8941 string list, the format of the
    /// `FETCHURL_SERVER` environment variable
    /// (e.g. `"https://cache.example.com", "https://cache2.example.com"`).
    #[serde(default)]
    pub server: String,
    /// Chunk size in bytes for streaming response bodies.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

/// Default streaming chunk size: 64 KiB.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server: String::new(),
            chunk_size: default_chunk_size(),
        }
    }
}

impl ClientConfig {
    /// The configured cache servers, in order.
    pub fn servers(&self) -> Vec<String> {
        crate::sfv::decode_string_list(&self.server)
    }
}
