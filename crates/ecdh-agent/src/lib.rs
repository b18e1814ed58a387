//! ecdh-agent: elliptic-curve Diffie-Hellman key agreement.
//!
//! An [`EcdhAgent`] holds a freshly generated key pair on one of the
//! NIST curves P-224, P-256, P-384 or P-521, exports its public key as
//! PKIX PEM, and derives a SHA3-512 shared secret from any peer's PEM
//! public key on the same curve.
//!
//! ```
//! use ecdh_agent::{BufferPool, EcdhAgent};
//!
//! # fn main() -> ecdh_agent::Result<()> {
//! let pool = BufferPool::new();
//! let alice = EcdhAgent::new("P256")?;
//! let bob = EcdhAgent::new("P256")?;
//!
//! let alice_secret = alice.derive_shared_secret(&bob.public_key_pem()?, &pool)?;
//! let bob_secret = bob.derive_shared_secret(&alice.public_key_pem()?, &pool)?;
//! assert_eq!(alice_secret, bob_secret);
//! assert_eq!(alice_secret.len(), 128);
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod buffer;
pub mod crypto;
pub mod curve;
pub mod error;

// Re-export primary types
pub use agent::EcdhAgent;
pub use buffer::{BufferPool, PoolConfig, ScratchBuffer, ScratchBufferProvider};
pub use crypto::peer::PeerPublicKey;
pub use crypto::random::{EntropySource, OsEntropy, RngEntropy};
pub use curve::Curve;
pub use error::{EcdhError, Result};
