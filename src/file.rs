//! File handle used by the transform core.
//!
//! Wraps a path with the naming rules for artifacts and the whole-file
//! async I/O each task performs. Files are read fully into memory; there is
//! no streaming.

use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::warn;

use crate::config::FILE_EXTENSION;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    path: PathBuf,
}

impl File {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling path encryption writes to. Always appends `.enc`, so
    /// `a.enc` becomes `a.enc.enc`.
    pub fn encrypted_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(FILE_EXTENSION);
        PathBuf::from(name)
    }

    /// Sibling path decryption writes to, with one `.enc` stripped.
    ///
    /// Works on the raw file name, so any name `encrypted_path` produced maps
    /// back. `None` when the name has no such suffix or is exactly `.enc`.
    pub fn decrypted_path(&self) -> Option<PathBuf> {
        let extension = FILE_EXTENSION.trim_start_matches('.');
        if self.path.extension()? != OsStr::new(extension) {
            return None;
        }

        let stem = self.path.file_stem().filter(|stem| *stem != OsStr::new("."))?;
        Some(self.path.with_file_name(stem))
    }

    /// Reads the whole file.
    pub async fn read(&self) -> io::Result<Vec<u8>> {
        fs::read(&self.path).await
    }

    /// Creates or truncates the file and writes `data` to it.
    ///
    /// If writing fails after the file was created, the partial file is
    /// removed. A failed create leaves whatever was at the path alone.
    pub async fn write(&self, data: &[u8]) -> io::Result<()> {
        let mut file = fs::File::create(&self.path).await?;

        let written = match file.write_all(data).await {
            Ok(()) => file.flush().await,
            Err(e) => Err(e),
        };
        drop(file);

        if let Err(e) = written {
            if let Err(cleanup) = fs::remove_file(&self.path).await {
                warn!(path = %self.path.display(), error = %cleanup, "cannot remove partial output");
            }
            return Err(e);
        }

        Ok(())
    }

    pub async fn delete(&self) -> io::Result<()> {
        fs::remove_file(&self.path).await
    }
}
