//! # Keyed BLAKE3 Digests
//!
//! Location and request hashes are 64-bit values. They are taken from the
//! first eight bytes (little-endian) of a keyed BLAKE3 digest over the
//! length-prefixed input parts.

use blake3::Hasher;

/// Streaming keyed digest over several length-prefixed parts.
pub struct KeyedDigest {
    inner: Hasher,
}

impl KeyedDigest {
    /// Create a digest keyed with `key`.
    pub fn new(key: &[u8; 32]) -> Self {
        Self {
            inner: Hasher::new_keyed(key),
        }
    }

    /// Append one part. The length prefix keeps `["ab", "c"]` and
    /// `["a", "bc"]` distinct.
    pub fn part(&mut self, data: &[u8]) -> &mut Self {
        self.inner.update(&(data.len() as u64).to_le_bytes());
        self.inner.update(data);
        self
    }

    /// Full 256-bit digest.
    pub fn finalize(&self) -> [u8; 32] {
        *self.inner.finalize().as_bytes()
    }

    /// Digest truncated to 64 bits.
    pub fn finalize_u64(&self) -> u64 {
        let digest = self.finalize();
        let mut head = [0u8; 8];
        head.copy_from_slice(&digest[..8]);
        u64::from_le_bytes(head)
    }
}

/// One-shot keyed 64-bit digest over `parts`.
pub fn digest64(key: &[u8; 32], parts: &[&[u8]]) -> u64 {
    let mut digest = KeyedDigest::new(key);
    for part in parts {
        digest.part(part);
    }
    digest.finalize_u64()
}

/// Derive a 32-byte key from a context string and key material.
pub fn derive_key(context: &str, key_material: &[u8]) -> [u8; 32] {
    blake3::derive_key(context, key_material)
}
