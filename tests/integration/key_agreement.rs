//! Integration test: end-to-end key agreement between agents.
//!
//! Covers the complete lifecycle:
//! 1. Construct agents on every supported curve
//! 2. Export public keys as PEM
//! 3. Exchange keys and derive shared secrets in both directions
//! 4. Check the secrets agree and have the documented shape

use ecdh_agent::crypto::agreement::is_shared_secret_hex;
use ecdh_agent::{
    BufferPool, Curve, EcdhAgent, EcdhError, EntropySource, PeerPublicKey, RngEntropy,
};
use p256::pkcs8::{EncodePublicKey, LineEnding};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Entropy that replays one fixed scalar.
struct FixedScalar(Vec<u8>);

impl EntropySource for FixedScalar {
    fn fill(&mut self, buf: &mut [u8]) -> ecdh_agent::Result<()> {
        buf.copy_from_slice(&self.0);
        Ok(())
    }
}

#[test]
fn key_agreement_nist_p256_known_answer() {
    // NIST CAVS ECC CDH primitive test vectors, P-256 COUNT = 0.
    let d = "7d7dc5f71eb29ddaf80d6214632eeae03d9058af1fb6d22ed80badb62bc1a534";
    let q = "04\
             700c48f77f56584c5cc632ca65640db91b6bacce3a4df6b42ce7cc838833d287\
             db71e509e3fd9b060ddb20ba5c51dcc5948d46fbf640dfe0441782cab85fa4ac";
    // SHA3-512 of Z = 46fc6210...8997bd7b
    let expected = "06801aeebb0259674e1a0b395a6cf1fedec966bcfcbdb0ac8a65a158547f4a7b\
                    6f6aa4bc5e1d236a144d09fabda424e32efc9846449720dd25b69cbd71bfbf85";

    let agent =
        EcdhAgent::generate_with(Curve::P256, &mut FixedScalar(hex::decode(d).unwrap())).unwrap();
    assert_eq!(
        hex::encode(agent.public_key_sec1()),
        "04\
         ead218590119e8876b29146ff89ca61770c4edbbf97d38ce385ed281d8a6b230\
         28af61281fd35e2fa7002523acc85a429cb06ee6648325389f59edfce1405141"
    );

    let peer_pem = p256::PublicKey::from_sec1_bytes(&hex::decode(q).unwrap())
        .unwrap()
        .to_public_key_pem(LineEnding::LF)
        .unwrap();
    let secret = agent
        .derive_shared_secret(&peer_pem, &BufferPool::new())
        .unwrap();
    assert_eq!(secret, expected);
}

#[test]
fn key_agreement_all_curves() {
    let pool = BufferPool::new();

    for curve in Curve::ALL {
        // ── Step 1: Construct ───────────────────────────────────────────
        let alice = EcdhAgent::new(curve.as_str()).expect("construction should succeed");
        let bob = EcdhAgent::new(curve.as_str()).expect("construction should succeed");
        assert_eq!(alice.curve(), curve);
        assert_ne!(
            alice.public_key_sec1(),
            bob.public_key_sec1(),
            "{curve}: construction must be randomized"
        );

        // ── Step 2: Export ──────────────────────────────────────────────
        let alice_pem = alice.public_key_pem().expect("export should succeed");
        let bob_pem = bob.public_key_pem().expect("export should succeed");

        // ── Step 3: Derive both ways ────────────────────────────────────
        let ab = alice
            .derive_shared_secret(&bob_pem, &pool)
            .expect("alice should derive");
        let ba = bob
            .derive_shared_secret(&alice_pem, &pool)
            .expect("bob should derive");

        // ── Step 4: Agree ───────────────────────────────────────────────
        assert_eq!(ab, ba, "{curve}: secrets must be symmetric");
        assert!(is_shared_secret_hex(&ab), "{curve}: bad secret shape {ab}");
    }

    assert_eq!(pool.outstanding(), 0);
    assert_eq!(pool.acquired(), 8);
}

#[test]
fn p256_scenario() {
    let pool = BufferPool::new();
    let alice = EcdhAgent::new("P256").unwrap();
    let bob = EcdhAgent::new("P256").unwrap();

    let exported = alice.export_public_key().unwrap();
    let text = String::from_utf8(exported.clone()).unwrap();
    assert!(text.starts_with("-----BEGIN PUBLIC KEY-----"));
    assert!(text.ends_with("-----END PUBLIC KEY-----\n"));
    assert_eq!(exported, alice.export_public_key().unwrap());

    assert_ne!(
        alice.export_public_key().unwrap(),
        bob.export_public_key().unwrap()
    );

    let ab = alice
        .derive_shared_secret(&bob.public_key_pem().unwrap(), &pool)
        .unwrap();
    let ba = bob.derive_shared_secret(&text, &pool).unwrap();
    assert_eq!(ab, ba);
}

#[test]
fn derivation_is_repeatable() {
    let pool = BufferPool::new();
    let alice = EcdhAgent::new("P384").unwrap();
    let bob_pem = EcdhAgent::new("P384").unwrap().public_key_pem().unwrap();

    let first = alice.derive_shared_secret(&bob_pem, &pool).unwrap();
    for _ in 0..10 {
        assert_eq!(alice.derive_shared_secret(&bob_pem, &pool).unwrap(), first);
    }
}

#[test]
fn different_peers_different_secrets() {
    let pool = BufferPool::new();
    let alice = EcdhAgent::new("P521").unwrap();
    let bob = EcdhAgent::new("P521").unwrap();
    let charlie = EcdhAgent::new("P521").unwrap();

    let ab = alice
        .derive_shared_secret(&bob.public_key_pem().unwrap(), &pool)
        .unwrap();
    let ac = alice
        .derive_shared_secret(&charlie.public_key_pem().unwrap(), &pool)
        .unwrap();
    assert_ne!(ab, ac);
}

#[test]
fn exported_key_reconstructs_same_point() {
    for curve in Curve::ALL {
        let agent = EcdhAgent::generate(curve).unwrap();
        let peer = PeerPublicKey::from_pem(&agent.export_public_key().unwrap()).unwrap();
        assert_eq!(peer.curve(), curve);
        assert_eq!(peer.to_sec1_bytes(), agent.public_key_sec1());
    }
}

#[test]
fn seeded_agents_are_reproducible() {
    let pool = BufferPool::new();
    let seeded = |seed| {
        EcdhAgent::generate_with(Curve::P256, &mut RngEntropy(StdRng::seed_from_u64(seed)))
            .expect("seeded generation should succeed")
    };
    let a1 = seeded(1);
    let a2 = seeded(1);
    let b = seeded(2);

    assert_eq!(a1.public_key_pem().unwrap(), a2.public_key_pem().unwrap());

    let b_pem = b.public_key_pem().unwrap();
    assert_eq!(
        a1.derive_shared_secret(&b_pem, &pool).unwrap(),
        a2.derive_shared_secret(&b_pem, &pool).unwrap()
    );
}

#[test]
fn unsupported_curve_identifiers() {
    for name in ["", "P-256", "p256", "P512", "secp256k1", "Ed25519"] {
        match EcdhAgent::new(name) {
            Err(EcdhError::UnsupportedCurve(got)) => assert_eq!(got, name),
            other => panic!("{name:?} should be unsupported, got {other:?}"),
        }
    }
}
