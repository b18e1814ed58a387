//! NIST-curve key pair generation and public key export.
//!
//! Each supported curve gets its own RustCrypto secret key type; the
//! [`EcKeyPair`] enum dispatches between them. Secret keys are zeroized
//! on drop by the underlying crates.

use elliptic_curve::pkcs8::{EncodePublicKey, LineEnding};
use elliptic_curve::sec1::ToEncodedPoint;
use zeroize::Zeroizing;

use crate::crypto::agreement;
use crate::crypto::peer::PeerPublicKey;
use crate::crypto::random::EntropySource;
use crate::curve::Curve;
use crate::error::{EcdhError, Result};

/// Upper bound on rejection-sampling draws before giving up.
///
/// A draw is rejected only when it is zero or not below the group
/// order, which for every supported curve happens with probability
/// below one half.
const MAX_SCALAR_DRAWS: usize = 64;

/// A private scalar and its public point on one supported curve.
pub enum EcKeyPair {
    P224(p224::SecretKey),
    P256(p256::SecretKey),
    P384(p384::SecretKey),
    P521(p521::SecretKey),
}

impl EcKeyPair {
    /// Generate a key pair uniformly at random over the curve's scalar field.
    ///
    /// Random bytes are masked down to the order's bit length and
    /// rejected until they form a valid non-zero scalar.
    pub fn generate(curve: Curve, source: &mut impl EntropySource) -> Result<Self> {
        let size = curve.field_size();
        let excess_bits = size * 8 - curve.order_bits();
        let mut candidate = Zeroizing::new(vec![0u8; size]);

        for _ in 0..MAX_SCALAR_DRAWS {
            source.fill(&mut candidate)?;
            candidate[0] &= 0xFF >> excess_bits;
            if let Ok(pair) = Self::from_scalar_bytes(curve, &candidate) {
                return Ok(pair);
            }
        }

        Err(EcdhError::KeyGenerationFailure(format!(
            "no valid {curve} scalar after {MAX_SCALAR_DRAWS} draws"
        )))
    }

    fn from_scalar_bytes(
        curve: Curve,
        bytes: &[u8],
    ) -> std::result::Result<Self, elliptic_curve::Error> {
        Ok(match curve {
            Curve::P224 => Self::P224(p224::SecretKey::from_slice(bytes)?),
            Curve::P256 => Self::P256(p256::SecretKey::from_slice(bytes)?),
            Curve::P384 => Self::P384(p384::SecretKey::from_slice(bytes)?),
            Curve::P521 => Self::P521(p521::SecretKey::from_slice(bytes)?),
        })
    }

    /// The curve this key pair lives on.
    pub fn curve(&self) -> Curve {
        match self {
            Self::P224(_) => Curve::P224,
            Self::P256(_) => Curve::P256,
            Self::P384(_) => Curve::P384,
            Self::P521(_) => Curve::P521,
        }
    }

    /// Encode the public key as a `PUBLIC KEY` PEM document (PKIX DER body).
    pub fn public_key_pem(&self) -> Result<String> {
        let encoded = match self {
            Self::P224(sk) => sk.public_key().to_public_key_pem(LineEnding::LF),
            Self::P256(sk) => sk.public_key().to_public_key_pem(LineEnding::LF),
            Self::P384(sk) => sk.public_key().to_public_key_pem(LineEnding::LF),
            Self::P521(sk) => sk.public_key().to_public_key_pem(LineEnding::LF),
        };
        encoded.map_err(|e| EcdhError::EncodingFailure(format!("PKIX public key: {e}")))
    }

    /// The public point in uncompressed SEC1 form (`0x04 || x || y`).
    pub fn public_key_sec1(&self) -> Vec<u8> {
        match self {
            Self::P224(sk) => sk.public_key().to_encoded_point(false).as_bytes().to_vec(),
            Self::P256(sk) => sk.public_key().to_encoded_point(false).as_bytes().to_vec(),
            Self::P384(sk) => sk.public_key().to_encoded_point(false).as_bytes().to_vec(),
            Self::P521(sk) => sk.public_key().to_encoded_point(false).as_bytes().to_vec(),
        }
    }

    /// Multiply the peer's point by our scalar and digest the X-coordinate.
    ///
    /// The peer must be on the same curve as this key pair.
    pub fn agree(&self, peer: &PeerPublicKey) -> Result<String> {
        match (self, peer) {
            (Self::P224(sk), PeerPublicKey::P224(pk)) => Ok(agreement::agree(sk, pk)),
            (Self::P256(sk), PeerPublicKey::P256(pk)) => Ok(agreement::agree(sk, pk)),
            (Self::P384(sk), PeerPublicKey::P384(pk)) => Ok(agreement::agree(sk, pk)),
            (Self::P521(sk), PeerPublicKey::P521(pk)) => Ok(agreement::agree(sk, pk)),
            _ => Err(EcdhError::CurveMismatch {
                expected: self.curve(),
                found: peer.curve(),
            }),
        }
    }
}
