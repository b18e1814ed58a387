//! Parsing and validation of a peer's PEM-armored public key.
//!
//! Accepted input is one PEM block whose payload is a PKIX
//! SubjectPublicKeyInfo for an `id-ecPublicKey` on a supported named
//! curve. Text before the first `-----BEGIN` line and anything after
//! the first block is ignored.

use elliptic_curve::sec1::ToEncodedPoint;
use elliptic_curve::ALGORITHM_OID;
use spki::SubjectPublicKeyInfoRef;

use crate::curve::Curve;
use crate::error::{EcdhError, Result};

/// SEC1 tag byte for an uncompressed `x || y` point.
const UNCOMPRESSED_TAG: u8 = 0x04;

/// A validated peer public key on one supported curve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeerPublicKey {
    P224(p224::PublicKey),
    P256(p256::PublicKey),
    P384(p384::PublicKey),
    P521(p521::PublicKey),
}

impl PeerPublicKey {
    /// Parse the first PEM block in `text` as an EC public key.
    pub fn from_pem(text: &[u8]) -> Result<Self> {
        let der = pem_payload(text)?;
        Self::from_der(&der)
    }

    /// Parse a DER-encoded SubjectPublicKeyInfo as an EC public key.
    pub fn from_der(der: &[u8]) -> Result<Self> {
        let spki = SubjectPublicKeyInfoRef::try_from(der)
            .map_err(|e| EcdhError::MalformedPeerKey(format!("PKIX structure: {e}")))?;

        if spki.algorithm.oid != ALGORITHM_OID {
            log::debug!("rejecting peer key with algorithm {}", spki.algorithm.oid);
            return Err(EcdhError::peer_key_not_valid());
        }

        let curve_oid = spki
            .algorithm
            .parameters_oid()
            .map_err(|e| EcdhError::MalformedPeerKey(format!("named curve: {e}")))?;
        let curve = Curve::from_oid(&curve_oid).ok_or_else(|| {
            EcdhError::MalformedPeerKey(format!("unsupported elliptic curve {curve_oid}"))
        })?;

        let point = spki.subject_public_key.as_bytes().ok_or_else(|| {
            EcdhError::MalformedPeerKey("public key bit string is not octet-aligned".into())
        })?;

        Self::from_sec1(curve, point)
    }

    /// Decode an uncompressed SEC1 point on `curve`, checking that it
    /// lies on the curve.
    pub fn from_sec1(curve: Curve, point: &[u8]) -> Result<Self> {
        if point.first() != Some(&UNCOMPRESSED_TAG) {
            return Err(EcdhError::MalformedPeerKey(format!(
                "{curve} point is not in uncompressed form"
            )));
        }
        let decoded = match curve {
            Curve::P224 => p224::PublicKey::from_sec1_bytes(point).map(Self::P224),
            Curve::P256 => p256::PublicKey::from_sec1_bytes(point).map(Self::P256),
            Curve::P384 => p384::PublicKey::from_sec1_bytes(point).map(Self::P384),
            Curve::P521 => p521::PublicKey::from_sec1_bytes(point).map(Self::P521),
        };
        decoded.map_err(|_| EcdhError::MalformedPeerKey(format!("invalid {curve} point")))
    }

    /// The curve this key lives on.
    pub fn curve(&self) -> Curve {
        match self {
            Self::P224(_) => Curve::P224,
            Self::P256(_) => Curve::P256,
            Self::P384(_) => Curve::P384,
            Self::P521(_) => Curve::P521,
        }
    }

    /// The point in uncompressed SEC1 form (`0x04 || x || y`).
    pub fn to_sec1_bytes(&self) -> Vec<u8> {
        match self {
            Self::P224(pk) => pk.to_encoded_point(false).as_bytes().to_vec(),
            Self::P256(pk) => pk.to_encoded_point(false).as_bytes().to_vec(),
            Self::P384(pk) => pk.to_encoded_point(false).as_bytes().to_vec(),
            Self::P521(pk) => pk.to_encoded_point(false).as_bytes().to_vec(),
        }
    }
}

/// Extract the binary payload of the first PEM block in `text`.
///
/// The block label is not checked; a non-SPKI payload fails later as
/// a malformed key.
pub fn pem_payload(text: &[u8]) -> Result<Vec<u8>> {
    match pem::parse(text) {
        Ok(block) => Ok(block.into_contents()),
        Err(e) => {
            log::debug!("peer key has no PEM block: {e}");
            Err(EcdhError::peer_key_not_valid())
        }
    }
}
