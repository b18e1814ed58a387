//! Stress test: many agents, pairwise agreement.

use std::collections::HashSet;

use ecdh_agent::crypto::agreement::is_shared_secret_hex;
use ecdh_agent::{BufferPool, Curve, EcdhAgent};

#[test]
fn stress_pairwise_mesh() {
    let pool = BufferPool::new();

    for curve in Curve::ALL {
        let agents: Vec<EcdhAgent> = (0..6).map(|_| EcdhAgent::generate(curve).unwrap()).collect();
        let pems: Vec<String> = agents.iter().map(|a| a.public_key_pem().unwrap()).collect();
        let mut seen = HashSet::new();

        for i in 0..agents.len() {
            for j in (i + 1)..agents.len() {
                let ij = agents[i].derive_shared_secret(&pems[j], &pool).unwrap();
                let ji = agents[j].derive_shared_secret(&pems[i], &pool).unwrap();
                assert_eq!(ij, ji, "{curve}: agents {i} and {j} disagree");
                assert!(is_shared_secret_hex(&ij));
                assert!(seen.insert(ij), "{curve}: duplicate secret for pair {i},{j}");
            }
        }

        assert_eq!(seen.len(), 15);
    }

    assert_eq!(pool.outstanding(), 0);
}

#[test]
fn stress_200_agents_unique_public_keys() {
    let mut seen = HashSet::new();
    for i in 0..200 {
        let agent = EcdhAgent::new("P224").unwrap();
        assert!(
            seen.insert(agent.public_key_sec1()),
            "duplicate public key at iteration {i}"
        );
    }
    assert_eq!(seen.len(), 200);
}

#[test]
fn stress_self_agreement() {
    // Deriving against one's own public key is well-defined and repeatable.
    let pool = BufferPool::new();
    for curve in Curve::ALL {
        let agent = EcdhAgent::generate(curve).unwrap();
        let pem = agent.public_key_pem().unwrap();
        let first = agent.derive_shared_secret(&pem, &pool).unwrap();
        let second = agent.derive_shared_secret(&pem, &pool).unwrap();
        assert_eq!(first, second);
    }
}
