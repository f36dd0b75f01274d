use aes_gcm::aead::consts::U12;
use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::aes::Aes192;
use aes_gcm::{Aes128Gcm, Aes256Gcm, Nonce};

use crate::cipher::Key;
use crate::config::{AES_128_KEY_SIZE, AES_192_KEY_SIZE, AES_256_KEY_SIZE, MIN_ARTIFACT_SIZE, NONCE_SIZE};
use crate::error::CipherError;

type Aes192Gcm = aes_gcm::AesGcm<Aes192, U12>;

/// AES-GCM keyed with a normalized [`Key`]; the key length picks the variant.
///
/// All three variants share a 12-byte nonce and a 16-byte tag, so artifacts
/// have the same layout whatever the key size.
pub enum AesGcm {
    Aes128(Aes128Gcm),
    Aes192(Aes192Gcm),
    Aes256(Aes256Gcm),
}

impl AesGcm {
    pub fn new(key: &Key) -> Result<Self, CipherError> {
        let bytes = key.expose_secret();

        match bytes.len() {
            AES_128_KEY_SIZE => Aes128Gcm::new_from_slice(bytes).map(Self::Aes128).map_err(|_| CipherError::KeyLength(AES_128_KEY_SIZE)),
            AES_192_KEY_SIZE => Aes192Gcm::new_from_slice(bytes).map(Self::Aes192).map_err(|_| CipherError::KeyLength(AES_192_KEY_SIZE)),
            AES_256_KEY_SIZE => Aes256Gcm::new_from_slice(bytes).map(Self::Aes256).map_err(|_| CipherError::KeyLength(AES_256_KEY_SIZE)),
            len => Err(CipherError::KeyLength(len)),
        }
    }

    /// Fills a fresh nonce from the operating system's CSPRNG.
    pub fn generate_nonce() -> Result<[u8; NONCE_SIZE], CipherError> {
        let mut nonce = [0u8; NONCE_SIZE];
        OsRng.try_fill_bytes(&mut nonce).map_err(|e| CipherError::Nonce(e.to_string()))?;
        Ok(nonce)
    }

    /// Seals `plaintext` under a fresh nonce and returns `nonce || ciphertext || tag`.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CipherError> {
        let nonce = Self::generate_nonce()?;
        let sealed = self.seal(&nonce, plaintext)?;

        let mut artifact = Vec::with_capacity(NONCE_SIZE + sealed.len());
        artifact.extend_from_slice(&nonce);
        artifact.extend_from_slice(&sealed);
        Ok(artifact)
    }

    /// Splits `artifact` into nonce and sealed payload and verifies it.
    ///
    /// Nothing is returned unless the tag checks out.
    pub fn decrypt(&self, artifact: &[u8]) -> Result<Vec<u8>, CipherError> {
        if artifact.len() < MIN_ARTIFACT_SIZE {
            return Err(CipherError::Truncated(artifact.len()));
        }

        let (nonce, sealed) = artifact.split_at(NONCE_SIZE);
        let nonce = Nonce::<U12>::from_slice(nonce);

        let opened = match self {
            Self::Aes128(inner) => inner.decrypt(nonce, sealed),
            Self::Aes192(inner) => inner.decrypt(nonce, sealed),
            Self::Aes256(inner) => inner.decrypt(nonce, sealed),
        };

        opened.map_err(|_| CipherError::Authentication)
    }

    fn seal(&self, nonce: &[u8; NONCE_SIZE], plaintext: &[u8]) -> Result<Vec<u8>, CipherError> {
        let nonce = Nonce::<U12>::from_slice(nonce);

        let sealed = match self {
            Self::Aes128(inner) => inner.encrypt(nonce, plaintext),
            Self::Aes192(inner) => inner.encrypt(nonce, plaintext),
            Self::Aes256(inner) => inner.encrypt(nonce, plaintext),
        };

        sealed.map_err(|_| CipherError::Seal)
    }

    /// Human-readable algorithm name, e.g. `AES-256-GCM`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Aes128(_) => "AES-128-GCM",
            Self::Aes192(_) => "AES-192-GCM",
            Self::Aes256(_) => "AES-256-GCM",
        }
    }
}
