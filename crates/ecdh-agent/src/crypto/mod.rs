//! Cryptographic primitives for ecdh-agent.
//!
//! This module provides:
//! - NIST P-224/P-256/P-384/P-521 key pair generation
//! - PKIX/PEM public key export and peer key parsing
//! - ECDH scalar multiplication with SHA3-512 shared-secret digests
//! - Injectable cryptographically secure random sources

pub mod agreement;
pub mod keys;
pub mod peer;
pub mod random;
