//! Single-file encryption and decryption.
//!
//! A [`Transformer`] turns one [`FileTask`] into a sibling file and then
//! resolves the source. Every failure is local to that file; the source is
//! left untouched unless the new file was fully written, and a write that
//! fails midway removes its partial output.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::cipher::{AesGcm, Key};
use crate::error::TransformError;
use crate::file::File;
use crate::types::{FileTask, ProcessorMode};

/// What happened to the source after its sibling was written.
#[derive(Debug)]
pub enum SourceFate {
    Kept,
    Removed,
    /// The new file exists but the source could not be removed.
    RemoveFailed(io::Error),
}

/// Outcome of one successful task.
#[derive(Debug)]
pub struct FileReport {
    pub mode: ProcessorMode,
    pub source: PathBuf,
    pub output: PathBuf,
    /// Bytes written to `output`.
    pub bytes: u64,
    pub source_fate: SourceFate,
}

pub type Outcome = Result<FileReport, TransformError>;

/// Applies the run's key to individual files. Cheap to clone and share
/// across tasks; the key itself is never copied.
#[derive(Clone, Debug)]
pub struct Transformer {
    key: Arc<Key>,
}

impl Transformer {
    pub fn new(key: Key) -> Self {
        Self { key: Arc::new(key) }
    }

    pub async fn transform(&self, task: FileTask) -> Outcome {
        let source = File::new(task.source);

        match task.mode {
            ProcessorMode::Encrypt => self.encrypt(source, task.delete_original).await,
            ProcessorMode::Decrypt => self.decrypt(source).await,
        }
    }

    async fn encrypt(&self, source: File, delete_original: bool) -> Outcome {
        let output = File::new(source.encrypted_path());
        debug!(source = %source.path().display(), "encrypting");

        let plaintext = source.read().await.map_err(|e| TransformError::Read { path: source.path().to_path_buf(), source: e })?;
        let cipher = self.cipher(&source)?;
        let artifact = cipher.encrypt(&plaintext).map_err(|e| TransformError::from_cipher(e, source.path().to_path_buf()))?;

        output.write(&artifact).await.map_err(|e| TransformError::Write { path: output.path().to_path_buf(), source: e })?;
        info!(source = %source.path().display(), output = %output.path().display(), cipher = cipher.name(), "encrypted");

        let source_fate = if delete_original { remove_source(&source).await } else { SourceFate::Kept };

        Ok(FileReport {
            mode: ProcessorMode::Encrypt,
            source: source.path().to_path_buf(),
            output: output.path().to_path_buf(),
            bytes: artifact.len() as u64,
            source_fate,
        })
    }

    async fn decrypt(&self, source: File) -> Outcome {
        let output = source.decrypted_path().map(File::new).ok_or_else(|| TransformError::NotEncrypted { path: source.path().to_path_buf() })?;
        debug!(source = %source.path().display(), "decrypting");

        let artifact = source.read().await.map_err(|e| TransformError::Read { path: source.path().to_path_buf(), source: e })?;
        let cipher = self.cipher(&source)?;
        let plaintext = cipher.decrypt(&artifact).map_err(|e| TransformError::from_cipher(e, source.path().to_path_buf()))?;

        output.write(&plaintext).await.map_err(|e| TransformError::Write { path: output.path().to_path_buf(), source: e })?;
        info!(source = %source.path().display(), output = %output.path().display(), cipher = cipher.name(), "decrypted");

        // The artifact is removed whatever the delete flag says.
        let source_fate = remove_source(&source).await;

        Ok(FileReport {
            mode: ProcessorMode::Decrypt,
            source: source.path().to_path_buf(),
            output: output.path().to_path_buf(),
            bytes: plaintext.len() as u64,
            source_fate,
        })
    }

    fn cipher(&self, source: &File) -> Result<AesGcm, TransformError> {
        AesGcm::new(&self.key).map_err(|e| TransformError::from_cipher(e, source.path().to_path_buf()))
    }
}

async fn remove_source(source: &File) -> SourceFate {
    match source.delete().await {
        Ok(()) => SourceFate::Removed,
        Err(e) => {
            warn!(source = %source.path().display(), error = %e, "cannot remove source");
            SourceFate::RemoveFailed(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use tempfile::tempdir;

    use super::*;
    use crate::config::{MIN_ARTIFACT_SIZE, NONCE_SIZE, TAG_SIZE};
    use crate::types::Options;

    fn transformer(key: &str) -> Transformer {
        Transformer::new(Key::normalize(key))
    }

    async fn encrypt(t: &Transformer, path: &Path, delete_original: bool) -> Outcome {
        t.transform(Options::new(ProcessorMode::Encrypt, delete_original).task(path)).await
    }

    async fn decrypt(t: &Transformer, path: &Path) -> Outcome {
        t.transform(Options::new(ProcessorMode::Decrypt, false).task(path)).await
    }

    #[tokio::test]
    async fn test_encrypt_decrypt_roundtrip() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("source.txt");
        let enc = dir.path().join("source.txt.enc");
        let content = b"Hello, World! This is a test file for encryption.";
        fs::write(&src, content).unwrap();
        let t = transformer("test_password_123");

        let report = encrypt(&t, &src, true).await.unwrap();
        assert_eq!(report.output, enc);
        assert_eq!(report.bytes, (NONCE_SIZE + content.len() + TAG_SIZE) as u64);
        assert!(matches!(report.source_fate, SourceFate::Removed));
        assert!(!src.exists());
        assert_ne!(fs::read(&enc).unwrap()[NONCE_SIZE..NONCE_SIZE + content.len()], content[..]);

        let report = decrypt(&t, &enc).await.unwrap();
        assert_eq!(report.output, src);
        assert!(matches!(report.source_fate, SourceFate::Removed));
        assert!(!enc.exists());
        assert_eq!(fs::read(&src).unwrap(), content);
    }

    #[tokio::test]
    async fn test_encrypt_keeps_original_when_asked() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("keep.txt");
        fs::write(&src, b"keep me").unwrap();

        let report = encrypt(&transformer("k"), &src, false).await.unwrap();

        assert!(matches!(report.source_fate, SourceFate::Kept));
        assert_eq!(fs::read(&src).unwrap(), b"keep me");
        assert!(dir.path().join("keep.txt.enc").exists());
    }

    #[tokio::test]
    async fn test_decrypt_always_removes_artifact() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("a.txt");
        fs::write(&src, b"data").unwrap();
        let t = transformer("k");

        encrypt(&t, &src, false).await.unwrap();
        fs::remove_file(&src).unwrap();

        // The task was built with delete_original = false.
        let report = decrypt(&t, &dir.path().join("a.txt.enc")).await.unwrap();

        assert!(matches!(report.source_fate, SourceFate::Removed));
        assert!(!dir.path().join("a.txt.enc").exists());
        assert_eq!(fs::read(&src).unwrap(), b"data");
    }

    #[tokio::test]
    async fn test_empty_file_artifact_is_nonce_and_tag() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("empty");
        fs::write(&src, b"").unwrap();
        let t = transformer("shortkey");

        encrypt(&t, &src, true).await.unwrap();
        let enc = dir.path().join("empty.enc");
        assert_eq!(fs::read(&enc).unwrap().len(), MIN_ARTIFACT_SIZE);

        decrypt(&t, &enc).await.unwrap();
        assert!(fs::read(&src).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_tampered_artifact_is_rejected() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("msg.txt");
        fs::write(&src, b"attack at dawn").unwrap();
        let t = transformer("k");

        encrypt(&t, &src, true).await.unwrap();
        let enc = dir.path().join("msg.txt.enc");
        let artifact = fs::read(&enc).unwrap();

        for idx in 0..artifact.len() {
            let mut tampered = artifact.clone();
            tampered[idx] ^= 0x80;
            fs::write(&enc, &tampered).unwrap();

            let err = decrypt(&t, &enc).await.unwrap_err();
            assert!(err.is_decryption_failure(), "byte {idx}: {err}");
            assert!(!src.exists());
            assert_eq!(fs::read(&enc).unwrap(), tampered);
        }
    }

    #[tokio::test]
    async fn test_wrong_key_is_rejected() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("secret.txt");
        fs::write(&src, b"top secret").unwrap();

        encrypt(&transformer("correct_password"), &src, true).await.unwrap();
        let enc = dir.path().join("secret.txt.enc");

        let err = decrypt(&transformer("wrong_password"), &enc).await.unwrap_err();
        assert!(matches!(err, TransformError::Authentication { .. }));
        assert!(!src.exists());
        assert!(enc.exists());
    }

    #[tokio::test]
    async fn test_truncated_artifact_is_rejected() {
        let dir = tempdir().unwrap();
        let enc = dir.path().join("short.enc");
        fs::write(&enc, [0u8; NONCE_SIZE]).unwrap();

        let err = decrypt(&transformer("k"), &enc).await.unwrap_err();
        assert!(matches!(err, TransformError::Truncated { len: NONCE_SIZE, .. }));
        assert!(!dir.path().join("short").exists());
        assert!(enc.exists());
    }

    #[tokio::test]
    async fn test_decrypt_requires_suffix() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("plain.txt");
        fs::write(&src, b"not an artifact").unwrap();

        let err = decrypt(&transformer("k"), &src).await.unwrap_err();
        assert!(matches!(err, TransformError::NotEncrypted { .. }));
        assert_eq!(fs::read(&src).unwrap(), b"not an artifact");
    }

    #[tokio::test]
    async fn test_reencrypting_artifact_doubles_suffix() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("twice.txt");
        fs::write(&src, b"twice").unwrap();
        let t = transformer("k");

        encrypt(&t, &src, true).await.unwrap();
        let report = encrypt(&t, &dir.path().join("twice.txt.enc"), true).await.unwrap();
        assert_eq!(report.output, dir.path().join("twice.txt.enc.enc"));

        decrypt(&t, &dir.path().join("twice.txt.enc.enc")).await.unwrap();
        decrypt(&t, &dir.path().join("twice.txt.enc")).await.unwrap();
        assert_eq!(fs::read(&src).unwrap(), b"twice");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_utf8_name_roundtrip() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempdir().unwrap();
        let src = dir.path().join(OsStr::from_bytes(b"caf\xe9.txt"));
        fs::write(&src, b"latin-1 name").unwrap();
        let t = transformer("k");

        let encrypted = encrypt(&t, &src, true).await.unwrap();
        assert!(!src.exists());

        let decrypted = decrypt(&t, &encrypted.output).await.unwrap();
        assert_eq!(decrypted.output, src);
        assert!(!encrypted.output.exists());
        assert_eq!(fs::read(&src).unwrap(), b"latin-1 name");
    }

    #[tokio::test]
    async fn test_unwritable_output_keeps_source() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("blocked.txt");
        fs::write(&src, b"stay").unwrap();
        // A directory where the artifact should go makes the create fail.
        fs::create_dir(dir.path().join("blocked.txt.enc")).unwrap();

        let err = encrypt(&transformer("k"), &src, true).await.unwrap_err();

        assert!(matches!(err, TransformError::Write { .. }));
        assert_eq!(fs::read(&src).unwrap(), b"stay");
        assert!(dir.path().join("blocked.txt.enc").is_dir());
    }

    #[tokio::test]
    async fn test_missing_source_is_a_read_error() {
        let dir = tempdir().unwrap();
        let err = encrypt(&transformer("k"), &dir.path().join("absent.txt"), true).await.unwrap_err();

        assert!(matches!(err, TransformError::Read { .. }));
        assert!(!err.is_decryption_failure());
        assert!(!dir.path().join("absent.txt.enc").exists());
    }
}
