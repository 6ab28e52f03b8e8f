//! Streaming hash verification.

use crate::algo::{HashAlgo, Hasher};
use std::io::{self, Write};

/// A writer that forwards bytes to an inner sink while hashing them,
/// verifying the digest against an expected value on [`finish`].
///
/// The digest covers exactly the bytes the sink accepted, in order. If the
/// sink performs a short write, only the accepted prefix is hashed, so the
/// verifier stays consistent with what actually reached the destination.
///
/// [`finish`]: Self::finish
pub struct HashVerifier<W: Write> {
    inner: W,
    hasher: Hasher,
    expected: String,
    bytes_written: u64,
}

impl<W: Write> HashVerifier<W> {
    /// Create a verifier for `algo` that writes into `inner` and expects the
    /// hex digest `expected` at finish time.
    pub fn new(algo: HashAlgo, expected: &str, inner: W) -> Self {
        Self {
            inner,
            hasher: algo.hasher(),
            expected: expected.to_string(),
            bytes_written: 0,
        }
    }

    /// Cumulative bytes accepted by the inner sink since creation.
    ///
    /// A non-zero value means the destination is tainted: falling back to a
    /// different source would interleave content from two origins.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Finalize the digest and compare it against the expected value.
    ///
    /// Returns the inner sink on success. The comparison is literal string
    /// equality with the expected digest as supplied by the caller.
    pub fn finish(self) -> crate::Result<W> {
        let actual = self.hasher.finalize_hex();
        if actual == self.expected {
            Ok(self.inner)
        } else {
            Err(crate::Error::HashMismatch {
                expected: self.expected,
                actual,
            })
        }
    }
}

impl<W: Write> Write for HashVerifier<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.hasher.update(&buf[..n]);
        self.bytes_written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
