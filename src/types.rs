//! Common type definitions for enctree.
//!
//! - [`ProcessorMode`]: encryption or decryption, chosen once per run
//! - [`Processing`]: the same choice phrased for progress output
//! - [`Options`]: the per-run settings shared by every file task
//! - [`FileTask`]: one file's pending transform

use std::fmt::{Display, Formatter, Result};
use std::path::PathBuf;

/// Represents the type of file operation to perform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProcessorMode {
    /// Encrypt the file, producing a `.enc` sibling.
    Encrypt,

    /// Decrypt the file, writing the sibling without the `.enc` suffix.
    Decrypt,
}

impl ProcessorMode {
    /// Returns a human-readable label for the mode.
    #[inline]
    pub fn label(self) -> &'static str {
        match self {
            Self::Encrypt => "Encrypt",
            Self::Decrypt => "Decrypt",
        }
    }

    /// Past-tense verb used in status lines.
    #[inline]
    pub fn past_tense(self) -> &'static str {
        match self {
            Self::Encrypt => "Encrypted",
            Self::Decrypt => "Decrypted",
        }
    }

    #[inline]
    pub fn processing(self) -> Processing {
        match self {
            Self::Encrypt => Processing::Encryption,
            Self::Decrypt => Processing::Decryption,
        }
    }
}

impl Display for ProcessorMode {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(self.label())
    }
}

/// Represents a processing operation in progress.
///
/// Provides display labels for the progress spinner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Processing {
    /// An encryption operation is in progress.
    Encryption,

    /// A decryption operation is in progress.
    Decryption,
}

impl Processing {
    /// Returns a progress label for the operation.
    #[inline]
    pub fn label(self) -> &'static str {
        match self {
            Self::Encryption => "Encrypting...",
            Self::Decryption => "Decrypting...",
        }
    }
}

impl Display for Processing {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(self.label())
    }
}

/// Per-run settings, fixed once the command line has been validated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Options {
    pub mode: ProcessorMode,

    /// Remove the plaintext after a successful encryption.
    ///
    /// Decryption ignores this and always removes the `.enc` source.
    pub delete_original: bool,
}

impl Options {
    #[inline]
    pub fn new(mode: ProcessorMode, delete_original: bool) -> Self {
        Self { mode, delete_original }
    }

    /// Builds the task for one file under these settings.
    #[inline]
    pub fn task(self, source: impl Into<PathBuf>) -> FileTask {
        FileTask { source: source.into(), mode: self.mode, delete_original: self.delete_original }
    }
}

/// One file's pending transform. Consumed exactly once by the transformer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileTask {
    pub source: PathBuf,
    pub mode: ProcessorMode,
    pub delete_original: bool,
}
