//! Encryption vault errors.

/// Errors that can occur during encryption, decryption, or key handling.
#[derive(Debug, thiserror::Error)]
pub enum VaultError {
    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("Invalid master key material: {0}")]
    InvalidKey(String),

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("Not a railguard ciphertext token")]
    CorruptToken,

    #[error("Key file I/O error: {0}")]
    Io(#[from] std::io::Error),
}
