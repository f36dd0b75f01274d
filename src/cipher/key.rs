//! Key normalization.
//!
//! Turns an arbitrary user string into one of the three AES key lengths by
//! padding with [`KEY_PAD_BYTE`] or truncating. This is a length fix-up, not
//! a key derivation function: a short key is padded with a known character,
//! so its strength is exactly that of the typed string. Kept as-is so that
//! artifacts stay decryptable with the same key string.

use crate::config::{AES_128_KEY_SIZE, AES_192_KEY_SIZE, AES_256_KEY_SIZE, KEY_PAD_BYTE};
use crate::secret::SecretBytes;

/// A normalized AES key of 16, 24 or 32 bytes.
#[derive(Debug)]
pub struct Key {
    bytes: SecretBytes,
}

impl Key {
    /// Normalizes `input` to the nearest AES key length at or above its size.
    ///
    /// Lengths are measured in UTF-8 bytes. Inputs longer than 32 bytes keep
    /// only their first 32 bytes, which may split a multi-byte character.
    pub fn normalize(input: &str) -> Self {
        let mut bytes = input.as_bytes().to_vec();

        let target = match bytes.len() {
            len if len <= AES_128_KEY_SIZE => AES_128_KEY_SIZE,
            len if len <= AES_192_KEY_SIZE => AES_192_KEY_SIZE,
            _ => AES_256_KEY_SIZE,
        };

        bytes.resize(target, KEY_PAD_BYTE);

        Self { bytes: SecretBytes::from_vec(bytes) }
    }

    #[inline]
    pub fn expose_secret(&self) -> &[u8] {
        self.bytes.expose_secret()
    }

    /// Key length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }
}
