//! Play-order shuffling
//!
//! The shuffle is computed once per fetched pool and memoized against the
//! pool's fingerprint, so re-evaluation (a host re-render, a restart) never
//! reshuffles. Seeds are domain-separated from the session seed so the same
//! seed and pool always reproduce the same order.

use std::hash::Hasher;

use hmac::{Hmac, Mac};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use twox_hash::XxHash64;

use crate::content::ContentItem;

/// Derive a sub-seed for a named stream from the user-facing session seed.
fn derive_stream_seed(user_seed: u64, domain_tag: &[u8]) -> u64 {
    let mut mac =
        Hmac::<Sha256>::new_from_slice(&user_seed.to_le_bytes()).expect("64-bit seed is valid key");
    mac.update(domain_tag);
    let digest = mac.finalize().into_bytes();
    let seed_bytes: [u8; 8] = digest[..8].try_into().expect("digest slice length");
    u64::from_le_bytes(seed_bytes)
}

/// Identity fingerprint of a content pool: order-sensitive hash of item ids.
#[must_use]
pub fn pool_fingerprint(pool: &[ContentItem]) -> u64 {
    let mut hasher = XxHash64::with_seed(0);
    hasher.write_u64(pool.len() as u64);
    for item in pool {
        hasher.write(item.id.as_bytes());
        hasher.write_u8(0);
    }
    hasher.finish()
}

/// Fisher-Yates permutation of `0..len`, uniform swap range `[0, i]`.
fn fisher_yates(len: usize, seed: u64) -> Vec<usize> {
    let mut order: Vec<usize> = (0..len).collect();
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    for i in (1..len).rev() {
        let j = rng.random_range(0..=i);
        order.swap(i, j);
    }
    order
}

/// Memoized play order for one session's pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShuffleCache {
    fingerprint: Option<u64>,
    order: Vec<usize>,
}

impl ShuffleCache {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fingerprint: None,
            order: Vec::new(),
        }
    }

    /// Play order for `pool`, recomputed only when the pool identity changes.
    pub fn order_for(&mut self, pool: &[ContentItem], session_seed: u64) -> &[usize] {
        let fingerprint = pool_fingerprint(pool);
        if self.fingerprint != Some(fingerprint) {
            let seed = derive_stream_seed(session_seed, b"shuffle") ^ fingerprint;
            self.order = fisher_yates(pool.len(), seed);
            self.fingerprint = Some(fingerprint);
        }
        &self.order
    }

    /// Cached order without recomputation.
    #[must_use]
    pub fn order(&self) -> &[usize] {
        &self.order
    }
}
