pub mod mocks;

#[allow(unused_imports)]
pub use mocks::{sha256_hex, MockTransport, Scripted};
