//! Typed failures of the transform core.
//!
//! A [`CipherError`] knows nothing about files; the transformer attaches the
//! path when lifting it into a [`TransformError`]. A [`TransformError`] is
//! always local to one file: siblings keep running and the process exit
//! status is unaffected. A [`WalkError`] ends a directory walk after its
//! already-started tasks have been joined.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::{FILE_EXTENSION, MIN_ARTIFACT_SIZE};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CipherError {
    #[error("invalid AES key length: {0} bytes")]
    KeyLength(usize),

    #[error("cannot generate nonce: {0}")]
    Nonce(String),

    #[error("aes-gcm encryption failed")]
    Seal,

    #[error("artifact too short: need at least {} bytes, got {}", MIN_ARTIFACT_SIZE, .0)]
    Truncated(usize),

    #[error("aes-gcm authentication failed")]
    Authentication,
}

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("cannot read {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot construct AES-GCM from a {len}-byte key")]
    Cipher { len: usize },

    #[error("cannot generate nonce: {0}")]
    Nonce(String),

    #[error("encryption failed: {}", .path.display())]
    Seal { path: PathBuf },

    #[error("cannot write {}: {}", .path.display(), .source)]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("not an encrypted file (missing {} suffix): {}", FILE_EXTENSION, .path.display())]
    NotEncrypted { path: PathBuf },

    #[error("decryption failed for {}: {} bytes is shorter than the {}-byte minimum", .path.display(), .len, MIN_ARTIFACT_SIZE)]
    Truncated { path: PathBuf, len: usize },

    #[error("decryption failed for {}: wrong key or corrupted data", .path.display())]
    Authentication { path: PathBuf },

    #[error("file task did not complete: {0}")]
    Task(String),
}

impl TransformError {
    /// Attaches `path` to a cipher failure.
    pub fn from_cipher(error: CipherError, path: PathBuf) -> Self {
        match error {
            CipherError::KeyLength(len) => Self::Cipher { len },
            CipherError::Nonce(reason) => Self::Nonce(reason),
            CipherError::Seal => Self::Seal { path },
            CipherError::Truncated(len) => Self::Truncated { path, len },
            CipherError::Authentication => Self::Authentication { path },
        }
    }

    /// True when the artifact failed verification, as opposed to an I/O or
    /// setup problem.
    pub fn is_decryption_failure(&self) -> bool {
        matches!(self, Self::Truncated { .. } | Self::Authentication { .. })
    }
}

#[derive(Debug, Error)]
pub enum WalkError {
    #[error("cannot walk {}: {}", .root.display(), .source)]
    Traversal {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}
