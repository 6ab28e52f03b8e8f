//! Protocol core for the fetchurl content-addressable fetch client.
//!
//! This crate is network-free: it decides which endpoints to contact and in
//! what order, and verifies that received bytes match an expected digest.
//! The actual HTTP request belongs to the caller (or to `fetchurl-client`,
//! which drives a session with a transport capability).
//!
//! - Algorithm normalization and streaming hashers
//! - RFC 8941 string-list encoding for the `X-Source-Urls` header
//! - [`FetchSession`], the attempt-ordering state machine
//! - [`HashVerifier`], the streaming digest verifier
//!
//! # Example
//!
//! ```no_run
//! use fetchurl_core::FetchSession;
//!
//! let mut session = FetchSession::new(
//!     &["https://cache.example.com"],
//!     "sha256",
//!     "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
//!     &["https://cdn.example.com/file.tar.gz"],
//! )?;
//!
//! while let Some(attempt) = session.next_attempt() {
//!     // GET attempt.url() with attempt.headers() using any HTTP library.
//!     // On 200: stream the body through session.verifier(&mut sink),
//!     //   call finish(), then session.report_success().
//!     // On failure after bytes reached the sink: session.report_partial().
//!     // On failure before any bytes: just keep looping.
//! }
//! # Ok::<(), fetchurl_core::Error>(())
//! ```

pub mod algo;
pub mod config;
pub mod error;
pub mod session;
pub mod sfv;
pub mod verify;

pub use algo::{is_supported, normalize, HashAlgo, Hasher};
pub use config::{ClientConfig, DEFAULT_CHUNK_SIZE};
pub use error::{Error, Result};
pub use session::{FetchAttempt, FetchSession, SOURCE_URLS_HEADER};
pub use verify::HashVerifier;
