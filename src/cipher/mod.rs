//! # Cryptographic Operations Module
//!
//! Authenticated encryption for single files using AES-GCM.
//!
//! ## Key Concepts
//!
//! - **Key normalization**: the user's key string is padded or truncated to
//!   16, 24 or 32 bytes ([`Key`]). This is not a password KDF.
//! - **Variant selection**: the normalized key length selects AES-128-GCM,
//!   AES-192-GCM or AES-256-GCM ([`AesGcm`]).
//! - **Nonce management**: every encryption draws a fresh 96-bit nonce from
//!   the OS CSPRNG and stores it in front of the ciphertext.
//!
//! ## Artifact Layout
//!
//! ```text
//! [nonce: 12 bytes][ciphertext: len(plaintext) bytes][tag: 16 bytes]
//! ```

mod aes_gcm;
mod key;

pub use self::aes_gcm::AesGcm;
pub use self::key::Key;
