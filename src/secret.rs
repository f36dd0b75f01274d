use secrecy::{ExposeSecret, SecretBox};

/// Heap bytes that are zeroized on drop and never shown by `Debug`.
pub struct SecretBytes {
    inner: SecretBox<Vec<u8>>,
}

impl SecretBytes {
    pub fn from_vec(data: Vec<u8>) -> Self {
        Self { inner: SecretBox::new(Box::new(data)) }
    }

    pub fn expose_secret(&self) -> &[u8] {
        self.inner.expose_secret()
    }

    pub fn len(&self) -> usize {
        self.inner.expose_secret().len()
    }
}

impl std::fmt::Debug for SecretBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecretBytes([... {} bytes ...])", self.len())
    }
}
