//! Error types for ecdh-agent.
//!
//! All errors are strongly typed and propagated without panicking.
//! Private key material is never included in error messages.

use crate::curve::Curve;

/// Error types covering construction, export, and key agreement.
#[derive(Debug, thiserror::Error)]
pub enum EcdhError {
    #[error("Curve Type not supported: {0}")]
    UnsupportedCurve(String),

    #[error("Key generation failed: {0}")]
    KeyGenerationFailure(String),

    #[error("Public key encoding failed: {0}")]
    EncodingFailure(String),

    #[error("{0}")]
    InvalidPeerKey(String),

    #[error("Malformed peer public key: {0}")]
    MalformedPeerKey(String),

    #[error("Peer key curve mismatch: expected {expected}, found {found}")]
    CurveMismatch { expected: Curve, found: Curve },

    #[error("Scratch buffer error: {0}")]
    ScratchBuffer(String),
}

impl EcdhError {
    /// The message used whenever the peer input is not a usable EC public key.
    pub(crate) fn peer_key_not_valid() -> Self {
        Self::InvalidPeerKey("Public Key not valid".to_string())
    }
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, EcdhError>;
