//! Secure random number generation.
//!
//! Key generation draws bytes through the [`EntropySource`] trait so
//! callers can substitute a seeded or failing source. The default
//! source is the operating system's cryptographic RNG via `rand`.

use rand::rngs::OsRng;
use rand_core::{CryptoRng, RngCore};

use crate::error::{EcdhError, Result};

/// A source of cryptographically secure random bytes.
pub trait EntropySource {
    /// Fill `buf` entirely with random bytes.
    fn fill(&mut self, buf: &mut [u8]) -> Result<()>;
}

/// The operating system's random source.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&mut self, buf: &mut [u8]) -> Result<()> {
        OsRng
            .try_fill_bytes(buf)
            .map_err(|e| EcdhError::KeyGenerationFailure(format!("OS random source: {e}")))
    }
}

/// Adapts any cryptographic RNG (e.g. a seeded `StdRng`) into an entropy source.
#[derive(Debug)]
pub struct RngEntropy<R>(pub R);

impl<R: RngCore + CryptoRng> EntropySource for RngEntropy<R> {
    fn fill(&mut self, buf: &mut [u8]) -> Result<()> {
        self.0
            .try_fill_bytes(buf)
            .map_err(|e| EcdhError::KeyGenerationFailure(format!("random source: {e}")))
    }
}

/// Fill a buffer from the OS random source.
pub fn fill_random(buf: &mut [u8]) -> Result<()> {
    OsEntropy.fill(buf)
}
