//! XChaCha20-Poly1305 signature cipher.

use rk_02_envelope_builder::{CollaboratorError, SignatureCipher};
use shared_crypto::{derive_key, seal, CryptoError, SecretKey};

const CIPHER_CONTEXT: &str = "rocket-envelope 2016-08 signature cipher";

/// `SignatureCipher` sealing with a key derived from the master key.
pub struct XChaChaSignatureCipher {
    key: SecretKey,
}

impl XChaChaSignatureCipher {
    pub fn new(master_key: &[u8; 32]) -> Self {
        Self {
            key: SecretKey::from_bytes(derive_key(CIPHER_CONTEXT, master_key)),
        }
    }

    /// Reverse of `encrypt`, for inspection and tests.
    pub fn decrypt(&self, sealed: &[u8]) -> Result<Vec<u8>, CryptoError> {
        shared_crypto::open(&self.key, sealed)
    }
}

impl SignatureCipher for XChaChaSignatureCipher {
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CollaboratorError> {
        seal(&self.key, plaintext).map_err(|e| CollaboratorError::Rejected(e.to_string()))
    }
}
