//! Encryption enforcement: AES-256-GCM wrapper plus a best-effort
//! "looks encrypted" heuristic and a force-encrypt sweep over the store.
//!
//! Wire format: `rgv1:` followed by base64 of `[12-byte nonce || ciphertext+tag]`.
//! The nonce is randomly generated per encryption.

pub mod sweep;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Nonce};
use argon2::Argon2;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rand::RngCore;
use regex::Regex;

use railguard_core::errors::VaultError;

/// AES-256-GCM nonce length (96 bits).
const NONCE_LEN: usize = 12;

/// Salt length for key derivation.
const SALT_LEN: usize = 16;

/// Token prefix identifying railguard ciphertext.
pub const TOKEN_PREFIX: &str = "rgv1:";

/// Environment variable holding a 64-hex-char master key.
pub const ENV_MASTER_KEY: &str = "RAILGUARD_MASTER_KEY";

/// Fixed passphrase for derived keys. Key secrecy comes from the random
/// salt persisted in the restricted key file, not from this string.
const DERIVATION_PASSPHRASE: &[u8] = b"railguard-master-key-v1";

/// Shannon entropy threshold (bits/char) above which a string is treated
/// as already encrypted. The heuristic is approximate.
const ENTROPY_THRESHOLD: f64 = 6.0;

/// Symmetric cipher shared by all encryption operations for the process
/// lifetime.
pub struct EncryptionVault {
    cipher: Aes256Gcm,
}

impl EncryptionVault {
    /// Create a vault from explicit key bytes (tests, embedding).
    pub fn from_key(key: &[u8; 32]) -> Self {
        Self {
            // Length is fixed by the array type.
            cipher: Aes256Gcm::new(key.into()),
        }
    }

    /// Load the master key: environment variable when present, otherwise
    /// the persisted key file, otherwise derive and persist a fresh key.
    pub fn open(key_file: &Path) -> Result<Self, VaultError> {
        if let Ok(hex) = std::env::var(ENV_MASTER_KEY) {
            let key = parse_hex_key(hex.trim())?;
            return Ok(Self::from_key(&key));
        }

        if key_file.exists() {
            let material = std::fs::read(key_file)?;
            if material.len() != SALT_LEN + 32 {
                return Err(VaultError::InvalidKey(format!(
                    "key file {} has unexpected length {}",
                    key_file.display(),
                    material.len()
                )));
            }
            let mut key = [0u8; 32];
            key.copy_from_slice(&material[SALT_LEN..]);
            return Ok(Self::from_key(&key));
        }

        let (salt, key) = derive_fresh_key()?;
        persist_key_file(key_file, &salt, &key)?;
        tracing::info!(path = %key_file.display(), "derived and persisted new master key");
        Ok(Self::from_key(&key))
    }

    /// Encrypt a string into a `rgv1:` token.
    pub fn encrypt(&self, data: &str) -> Result<String, VaultError> {
        let nonce = Aes256Gcm::generate_nonce(OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, data.as_bytes())
            .map_err(|e| VaultError::EncryptionFailed(e.to_string()))?;
        let mut blob = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        blob.extend_from_slice(nonce.as_slice());
        blob.extend_from_slice(&ciphertext);
        Ok(format!("{TOKEN_PREFIX}{}", BASE64.encode(blob)))
    }

    /// Decrypt a token previously produced by [`encrypt`](Self::encrypt).
    pub fn decrypt(&self, token: &str) -> Result<String, VaultError> {
        let encoded = token.strip_prefix(TOKEN_PREFIX).ok_or(VaultError::CorruptToken)?;
        let blob = BASE64.decode(encoded).map_err(|_| VaultError::CorruptToken)?;
        if blob.len() < NONCE_LEN {
            return Err(VaultError::CorruptToken);
        }
        let (nonce_bytes, ct) = blob.split_at(NONCE_LEN);
        let nonce = Nonce::from_slice(nonce_bytes);
        let plaintext = self
            .cipher
            .decrypt(nonce, ct)
            .map_err(|e| VaultError::DecryptionFailed(e.to_string()))?;
        String::from_utf8(plaintext).map_err(|e| VaultError::DecryptionFailed(e.to_string()))
    }
}

/// Heuristic: does this string already look encrypted?
///
/// True when the string is ≥ 20 chars and shaped like our token, base64,
/// or hex, or when its Shannon entropy exceeds 6.0 bits/char. Best
/// effort, not cryptographically authoritative: low-entropy plaintext that
/// happens to be base64-shaped will false-positive, and that tolerance is
/// relied on by the secret-scanner allowlist.
pub fn looks_encrypted(s: &str) -> bool {
    if s.len() >= 20 {
        if s.starts_with(TOKEN_PREFIX) {
            return true;
        }
        if let Some((b64, hex)) = shape_regexes() {
            if b64.is_match(s) || hex.is_match(s) {
                return true;
            }
        }
    }
    shannon_entropy(s) > ENTROPY_THRESHOLD
}

/// Base64 and hex shape patterns, compiled once per process.
fn shape_regexes() -> Option<&'static (Regex, Regex)> {
    static SHAPES: OnceLock<Option<(Regex, Regex)>> = OnceLock::new();
    SHAPES
        .get_or_init(|| {
            let b64 = Regex::new(r"^[A-Za-z0-9+/]+={0,2}$").ok()?;
            let hex = Regex::new(r"^[0-9a-fA-F]+$").ok()?;
            Some((b64, hex))
        })
        .as_ref()
}

/// Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }
    let mut counts = std::collections::HashMap::new();
    let mut total = 0usize;
    for c in s.chars() {
        *counts.entry(c).or_insert(0usize) += 1;
        total += 1;
    }
    counts
        .values()
        .map(|&n| {
            let p = n as f64 / total as f64;
            -p * p.log2()
        })
        .sum()
}

fn parse_hex_key(hex: &str) -> Result<[u8; 32], VaultError> {
    if hex.len() != 64 {
        return Err(VaultError::InvalidKey(format!(
            "{ENV_MASTER_KEY} must be 64 hex chars, got {}",
            hex.len()
        )));
    }
    let mut key = [0u8; 32];
    for (i, byte) in key.iter_mut().enumerate() {
        *byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16)
            .map_err(|_| VaultError::InvalidKey("non-hex character in master key".to_string()))?;
    }
    Ok(key)
}

/// Derive a fresh 32-byte key via Argon2id from the fixed passphrase and
/// a random salt.
fn derive_fresh_key() -> Result<([u8; SALT_LEN], [u8; 32]), VaultError> {
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);
    let mut key = [0u8; 32];
    Argon2::default()
        .hash_password_into(DERIVATION_PASSPHRASE, &salt, &mut key)
        .map_err(|e| VaultError::KeyDerivation(e.to_string()))?;
    Ok((salt, key))
}

/// Write `salt || key` to the key file with owner-only permissions.
/// Permission tightening is best-effort: a failure is logged, not fatal.
fn persist_key_file(path: &Path, salt: &[u8], key: &[u8]) -> Result<(), VaultError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut file = std::fs::File::create(path)?;
    file.write_all(salt)?;
    file.write_all(key)?;
    restrict_permissions(path);
    Ok(())
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    if let Err(e) = std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)) {
        tracing::warn!(path = %path.display(), error = %e, "could not restrict key file permissions");
    }
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) {
    // No POSIX permission model on this target.
}

/// Default key file path under a project root.
pub fn default_key_file(root: &Path, configured: &str) -> PathBuf {
    root.join(configured)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entropy_of_uniform_text_is_low() {
        assert!(shannon_entropy("aaaaaaaaaa") < 0.1);
        assert!(shannon_entropy("hello") < 3.0);
    }

    #[test]
    fn hex_key_parsing_rejects_bad_input() {
        assert!(parse_hex_key("deadbeef").is_err());
        assert!(parse_hex_key(&"zz".repeat(32)).is_err());
        assert!(parse_hex_key(&"ab".repeat(32)).is_ok());
    }

    #[test]
    fn token_prefix_is_recognized() {
        assert!(looks_encrypted("rgv1:AAAAAAAAAAAAAAAAAAAAAAAA"));
        assert!(!looks_encrypted("hello"));
    }

    #[test]
    fn shape_patterns_match_across_repeated_calls() {
        // Exercised twice so both calls hit the shared compiled patterns.
        for _ in 0..2 {
            assert!(looks_encrypted("dGhpcyBpcyBiYXNlNjQgdGV4dA=="));
            assert!(looks_encrypted("deadbeefdeadbeefdeadbeef"));
            assert!(!looks_encrypted("plain words with spaces"));
        }
    }
}
