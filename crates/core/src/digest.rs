//! Hashing utility
//!
//! SHA-256 digests, their `0x`-prefixed hex view, and the deterministic
//! self-hashing chain the `w` search samples from.

use sha2::{Digest, Sha256};

use crate::params::HASH_SIZE;

/// A 256-bit digest, most significant byte first
pub type Hash256 = [u8; HASH_SIZE];

/// Compute the SHA-256 digest of arbitrary input bytes
///
/// # Example
///
/// ```rust
/// use qpower_core::{hash, to_hex};
///
/// let digest = hash(b"abc");
/// assert_eq!(
///     to_hex(&digest),
///     "0xba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
/// );
/// ```
#[inline]
pub fn hash(input: &[u8]) -> Hash256 {
    Sha256::digest(input).into()
}

/// Render a digest as `0x` followed by 64 lowercase hex digits
pub fn to_hex(digest: &Hash256) -> String {
    format!("0x{}", hex::encode(digest))
}

/// Digest of a unix timestamp, hashed as its 8 little-endian bytes
pub fn hash_timestamp(timestamp: i64) -> Hash256 {
    hash(&timestamp.to_le_bytes())
}

/// Deterministic sample chain: the seed, then the hash of each previous digest
///
/// Never ends on its own; bound it with `take`.
#[derive(Debug, Clone)]
pub struct HashChain {
    next: Hash256,
}

impl HashChain {
    pub fn new(seed: Hash256) -> Self {
        Self { next: seed }
    }
}

impl Iterator for HashChain {
    type Item = Hash256;

    fn next(&mut self) -> Option<Hash256> {
        let current = self.next;
        self.next = hash(&current);
        Some(current)
    }
}

/// Collect the first `count` digests of the chain rooted at `seed`
pub fn sample_chain(seed: &Hash256, count: usize) -> Vec<Hash256> {
    HashChain::new(*seed).take(count).collect()
}
