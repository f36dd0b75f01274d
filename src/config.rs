//! Global configuration constants.
//!
//! Everything here is fixed at compile time. Per-run settings (mode, delete
//! policy) travel through [`crate::types::Options`] instead of globals.

/// Application name used in user-facing output.
pub const APP_NAME: &str = "enctree";

/// Suffix appended to encrypted artifacts and stripped on decryption.
pub const FILE_EXTENSION: &str = ".enc";

// === Key normalization ===

/// Filler byte used to right-pad short keys.
///
/// This is a fixed, predictable character and NOT a key derivation function:
/// a short key stays exactly as guessable as the string the user typed.
pub const KEY_PAD_BYTE: u8 = b'0';

/// AES-128 key length in bytes.
pub const AES_128_KEY_SIZE: usize = 16;

/// AES-192 key length in bytes.
pub const AES_192_KEY_SIZE: usize = 24;

/// AES-256 key length in bytes. Longer keys are truncated to this.
pub const AES_256_KEY_SIZE: usize = 32;

// === Artifact layout ===

/// GCM nonce size in bytes. Every artifact starts with exactly this many bytes.
pub const NONCE_SIZE: usize = 12;

/// GCM authentication tag size in bytes, appended to the ciphertext.
pub const TAG_SIZE: usize = 16;

/// Smallest well-formed artifact: the nonce plus the tag of an empty plaintext.
pub const MIN_ARTIFACT_SIZE: usize = NONCE_SIZE + TAG_SIZE;
