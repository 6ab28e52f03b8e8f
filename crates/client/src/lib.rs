//! Orchestration loops and transport capabilities for the fetchurl client
//! protocol.
//!
//! This crate layers the actual networking over `fetchurl-core`:
//! - [`transport::Transport`], the narrow async capability (one GET), with
//!   an implementation over [`reqwest::Client`]
//! - [`Fetcher`], the async orchestration loop
//! - [`blocking`], the same contract shape over `std::io` types
//!
//! # Example
//!
//! ```no_run
//! use fetchurl_client::{FetchRequest, Fetcher, HttpTransport};
//!
//! # async fn demo() -> Result<(), fetchurl_client::FetchError> {
//! let fetcher = Fetcher::new(
//!     HttpTransport::new(),
//!     vec!["https://cache.example.com".to_string()],
//! );
//! let request = FetchRequest {
//!     algo: "sha256".to_string(),
//!     digest: "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855".to_string(),
//!     urls: vec!["https://cdn.example.com/file.tar.gz".to_string()],
//! };
//! let mut out = Vec::new();
//! fetcher.fetch(&request, &mut out).await?;
//! # Ok(())
//! # }
//! ```

pub mod blocking;
pub mod error;
pub mod fetcher;
pub mod transport;

pub use error::{BoxError, FetchError, FetchResult};
pub use fetcher::{FetchRequest, Fetcher};
pub use transport::{ByteStream, HttpTransport, Response, Transport};
