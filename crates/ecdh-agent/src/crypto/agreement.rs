//! ECDH scalar multiplication and SHA3-512 shared-secret digests.

use elliptic_curve::ecdh::diffie_hellman;
use elliptic_curve::{CurveArithmetic, PublicKey, SecretKey};
use sha3::{Digest, Sha3_512};

/// Length of a hex-encoded shared secret (64-byte digest).
pub const SHARED_SECRET_HEX_LEN: usize = 128;

/// Compute `peer * secret` and return the hex digest of its X-coordinate.
pub fn agree<C: CurveArithmetic>(secret: &SecretKey<C>, peer: &PublicKey<C>) -> String {
    let shared = diffie_hellman(secret.to_nonzero_scalar(), peer.as_affine());
    digest_x_coordinate(shared.raw_secret_bytes())
}

/// SHA3-512 over the big-endian X-coordinate with leading zero bytes
/// stripped, hex-encoded in lowercase.
pub fn digest_x_coordinate(x: &[u8]) -> String {
    let start = x.iter().position(|&b| b != 0).unwrap_or(x.len());
    hex::encode(Sha3_512::digest(&x[start..]))
}

/// Whether `s` has the shape of a derived shared secret.
pub fn is_shared_secret_hex(s: &str) -> bool {
    s.len() == SHARED_SECRET_HEX_LEN && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}
