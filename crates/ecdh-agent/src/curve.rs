//! The closed set of NIST curves an agent can run on.
//!
//! Identifiers are parsed once at construction time. Everything after
//! that dispatches on the enum.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use spki::ObjectIdentifier;

use crate::error::{EcdhError, Result};

const SECP224R1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.33");
const SECP256R1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.3.1.7");
const SECP384R1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.34");
const SECP521R1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.35");

/// A supported named curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Curve {
    P224,
    P256,
    P384,
    P521,
}

impl Curve {
    /// Every supported curve, smallest field first.
    pub const ALL: [Curve; 4] = [Curve::P224, Curve::P256, Curve::P384, Curve::P521];

    /// The identifier string accepted by [`Curve::from_str`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Curve::P224 => "P224",
            Curve::P256 => "P256",
            Curve::P384 => "P384",
            Curve::P521 => "P521",
        }
    }

    /// Size in bytes of a serialized field element (and of a secret scalar).
    pub fn field_size(&self) -> usize {
        match self {
            Curve::P224 => 28,
            Curve::P256 => 32,
            Curve::P384 => 48,
            Curve::P521 => 66,
        }
    }

    /// Bit length of the group order.
    pub fn order_bits(&self) -> usize {
        match self {
            Curve::P224 => 224,
            Curve::P256 => 256,
            Curve::P384 => 384,
            Curve::P521 => 521,
        }
    }

    /// Named-curve OID carried in the SubjectPublicKeyInfo parameters.
    pub fn oid(&self) -> ObjectIdentifier {
        match self {
            Curve::P224 => SECP224R1,
            Curve::P256 => SECP256R1,
            Curve::P384 => SECP384R1,
            Curve::P521 => SECP521R1,
        }
    }

    /// Look up a curve by its named-curve OID.
    pub fn from_oid(oid: &ObjectIdentifier) -> Option<Self> {
        Self::ALL.into_iter().find(|curve| curve.oid() == *oid)
    }
}

impl FromStr for Curve {
    type Err = EcdhError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|curve| curve.as_str() == s)
            .ok_or_else(|| EcdhError::UnsupportedCurve(s.to_string()))
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
