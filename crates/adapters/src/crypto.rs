//! Field-level encryption for values stored at rest.
//!
//! AES-256-GCM with a key derived as SHA-256 of the configured secret. Every
//! message gets a fresh 96-bit nonce, stored in front of the ciphertext; the
//! pair is base64 (standard alphabet) encoded.

use aes_gcm::aead::{Aead, AeadCore, KeyInit, Nonce, OsRng};
use aes_gcm::Aes256Gcm;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use fleen_base_config::SecurityConfig;
use fleen_base_shared::{ErrorClass, ErrorCode, ErrorEnvelope, SecretString};
use sha2::{Digest, Sha256};
use std::fmt;

const NONCE_LEN: usize = 12;

/// Why a value could not be encrypted or decrypted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CipherError {
    /// No field-encryption secret is configured.
    MissingKey,
    /// The cipher rejected the plaintext.
    EncryptionFailed,
    /// Input was not valid base64.
    InvalidEncoding,
    /// Input was shorter than a nonce.
    Truncated,
    /// Authentication failed (wrong key or tampered input).
    DecryptionFailed,
    /// Plaintext was not UTF-8.
    InvalidUtf8,
}

impl CipherError {
    /// Stable error code.
    #[must_use]
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::MissingKey => ErrorCode::new("security", "missing_encryption_key"),
            Self::EncryptionFailed => ErrorCode::encryption_failed(),
            Self::InvalidEncoding | Self::Truncated | Self::DecryptionFailed | Self::InvalidUtf8 => {
                ErrorCode::decryption_failed()
            },
        }
    }
}

impl fmt::Display for CipherError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::MissingKey => "field encryption key is not configured",
            Self::EncryptionFailed => "failed to encrypt value",
            Self::InvalidEncoding => "encrypted value is not valid base64",
            Self::Truncated => "encrypted value is too short",
            Self::DecryptionFailed => "failed to decrypt value",
            Self::InvalidUtf8 => "decrypted value is not valid UTF-8",
        };
        formatter.write_str(message)
    }
}

impl std::error::Error for CipherError {}

impl From<CipherError> for ErrorEnvelope {
    fn from(error: CipherError) -> Self {
        match error {
            CipherError::MissingKey => Self::invariant(error.error_code(), error.to_string()),
            _ => Self::unexpected(error.error_code(), error.to_string(), ErrorClass::NonRetriable)
                .with_metadata("reason", format!("{error:?}")),
        }
    }
}

/// Symmetric cipher for individual string fields.
#[derive(Clone)]
pub struct FieldCipher {
    cipher: Aes256Gcm,
}

impl fmt::Debug for FieldCipher {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("FieldCipher").finish_non_exhaustive()
    }
}

impl FieldCipher {
    /// Derive the key from `secret`.
    pub fn new(secret: &SecretString) -> Result<Self, CipherError> {
        if secret.is_blank() {
            return Err(CipherError::MissingKey);
        }
        let key = Sha256::digest(secret.expose().as_bytes());
        let cipher =
            Aes256Gcm::new_from_slice(key.as_slice()).map_err(|_| CipherError::MissingKey)?;
        Ok(Self { cipher })
    }

    /// Cipher for the configured `fieldEncryptionKey`.
    pub fn from_config(config: &SecurityConfig) -> Result<Self, CipherError> {
        config
            .field_encryption_key
            .as_ref()
            .ok_or(CipherError::MissingKey)
            .and_then(Self::new)
    }

    /// Encrypt `plaintext` into `base64(nonce || ciphertext)`.
    pub fn encrypt(&self, plaintext: &str) -> Result<String, CipherError> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|_| {
                tracing::error!("field encryption failed");
                CipherError::EncryptionFailed
            })?;

        let mut sealed = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        sealed.extend_from_slice(nonce.as_slice());
        sealed.extend_from_slice(&ciphertext);
        Ok(STANDARD.encode(sealed))
    }

    /// Reverse of [`Self::encrypt`].
    pub fn decrypt(&self, encoded: &str) -> Result<String, CipherError> {
        let sealed = STANDARD.decode(encoded.trim()).map_err(|error| {
            tracing::error!(%error, "encrypted field is not base64");
            CipherError::InvalidEncoding
        })?;
        let Some((nonce, ciphertext)) = sealed.split_at_checked(NONCE_LEN) else {
            tracing::error!(len = sealed.len(), "encrypted field is truncated");
            return Err(CipherError::Truncated);
        };

        let plaintext = self
            .cipher
            .decrypt(Nonce::<Aes256Gcm>::from_slice(nonce), ciphertext)
            .map_err(|_| {
                tracing::error!("field decryption failed");
                CipherError::DecryptionFailed
            })?;
        String::from_utf8(plaintext).map_err(|_| CipherError::InvalidUtf8)
    }

    /// [`Self::encrypt`] passing `None` through.
    pub fn encrypt_optional(&self, plaintext: Option<&str>) -> Result<Option<String>, CipherError> {
        plaintext.map(|value| self.encrypt(value)).transpose()
    }

    /// [`Self::decrypt`] passing `None` through.
    pub fn decrypt_optional(&self, encoded: Option<&str>) -> Result<Option<String>, CipherError> {
        encoded.map(|value| self.decrypt(value)).transpose()
    }
}
