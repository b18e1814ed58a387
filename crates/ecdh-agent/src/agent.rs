//! The ECDH agent: one key pair, any number of peers.
//!
//! An agent generates its key pair once at construction and never
//! changes it. The public key leaves as PEM; the private scalar never
//! leaves at all. Every derivation only reads the key, so one agent
//! can be shared across threads.

use std::fmt;

use crate::buffer::{Lease, ScratchBufferProvider};
use crate::crypto::keys::EcKeyPair;
use crate::crypto::peer::{pem_payload, PeerPublicKey};
use crate::crypto::random::{EntropySource, OsEntropy};
use crate::curve::Curve;
use crate::error::{EcdhError, Result};

/// A key-agreement agent bound to one curve and one key pair.
pub struct EcdhAgent {
    key_pair: EcKeyPair,
}

impl EcdhAgent {
    /// Create an agent from a curve identifier (`"P224"`, `"P256"`,
    /// `"P384"` or `"P521"`) using the OS random source.
    pub fn new(curve: &str) -> Result<Self> {
        Self::generate(curve.parse()?)
    }

    /// Create an agent on `curve` using the OS random source.
    pub fn generate(curve: Curve) -> Result<Self> {
        Self::generate_with(curve, &mut OsEntropy)
    }

    /// Create an agent on `curve`, drawing key material from `source`.
    pub fn generate_with(curve: Curve, source: &mut impl EntropySource) -> Result<Self> {
        let key_pair = EcKeyPair::generate(curve, source)?;
        log::debug!("generated {curve} ECDH key pair");
        Ok(Self { key_pair })
    }

    /// The curve this agent was constructed with.
    pub fn curve(&self) -> Curve {
        self.key_pair.curve()
    }

    /// Export the public key as `PUBLIC KEY` PEM text (PKIX DER body).
    ///
    /// The output is identical on every call.
    pub fn export_public_key(&self) -> Result<Vec<u8>> {
        self.public_key_pem().map(String::into_bytes)
    }

    /// Same as [`export_public_key`](Self::export_public_key), as a `String`.
    pub fn public_key_pem(&self) -> Result<String> {
        self.key_pair.public_key_pem()
    }

    /// The public point in uncompressed SEC1 form.
    pub fn public_key_sec1(&self) -> Vec<u8> {
        self.key_pair.public_key_sec1()
    }

    /// Derive the shared secret with a peer's PEM public key.
    ///
    /// The peer text is staged in a scratch buffer from `provider`,
    /// which is released as soon as the PEM block has been parsed. The
    /// result is the lowercase hex SHA3-512 digest of the shared
    /// point's X-coordinate (128 characters).
    ///
    /// # Errors
    ///
    /// - [`EcdhError::InvalidPeerKey`] if there is no PEM block or the
    ///   key is not an EC key
    /// - [`EcdhError::MalformedPeerKey`] if the payload is not a valid
    ///   public key on a supported curve
    /// - [`EcdhError::CurveMismatch`] if the peer is on another curve
    /// - [`EcdhError::ScratchBuffer`] if the text cannot be staged
    pub fn derive_shared_secret<P>(&self, peer_pem: &str, provider: &P) -> Result<String>
    where
        P: ScratchBufferProvider + ?Sized,
    {
        let mut lease = Lease::acquire(provider);
        lease
            .write_all(peer_pem.as_bytes())
            .map_err(|e| EcdhError::ScratchBuffer(format!("staging peer key: {e}")))?;
        let der = pem_payload(lease.contents());
        lease.release();

        let peer = PeerPublicKey::from_der(&der?)?;
        log::trace!("deriving {} shared secret", peer.curve());
        self.key_pair.agree(&peer)
    }

    /// Derive the shared secret with an already-parsed peer key.
    pub fn derive_with_key(&self, peer: &PeerPublicKey) -> Result<String> {
        self.key_pair.agree(peer)
    }
}

impl fmt::Debug for EcdhAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EcdhAgent")
            .field("curve", &self.curve())
            .field("public_key", &hex::encode(self.public_key_sec1()))
            .finish_non_exhaustive()
    }
}
