//! Key-derivation options for encrypted containers.
//!
//! OpenSSH containers know exactly two KDFs: `none` for plaintext
//! sections and `bcrypt` (the OpenBSD bcrypt_pbkdf construction, which
//! fixes its digest to SHA-512 internally).

use zeroize::Zeroizing;

use super::cipher::{CipherDescriptor, CipherMode};
use super::error::KeyFileError;

/// Maximum salt length accepted from the container.
pub const SALT_MAX: usize = 64;

/// Ceiling on derived key+IV material; a descriptor needing more is a
/// resource error.
pub const SYM_MATERIAL_MAX: usize = 128;

/// The KDF selected by the container header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KdfAlgorithm {
    /// Plaintext private section.
    None,
    /// bcrypt_pbkdf with the salt and round count from the header.
    Bcrypt { salt: Vec<u8>, rounds: u32 },
}

/// Everything the decryption stage needs: the KDF, the selected cipher
/// descriptor, and the caller's passphrase.
///
/// The passphrase is borrowed for the duration of the decode and never
/// stored beyond it.
pub struct KdfOptions<'a> {
    pub kdf: KdfAlgorithm,
    pub cipher: &'static CipherDescriptor,
    pub passphrase: Option<&'a str>,
}

impl KdfOptions<'_> {
    /// Reject configurations that can never decrypt.
    pub fn validate(&self) -> Result<(), KeyFileError> {
        match &self.kdf {
            KdfAlgorithm::None => {
                if self.cipher.mode != CipherMode::None {
                    return Err(KeyFileError::InvalidCipherKdf);
                }
            }
            KdfAlgorithm::Bcrypt { salt, rounds } => {
                // A none descriptor must never reach the decryptor.
                if self.cipher.mode == CipherMode::None {
                    return Err(KeyFileError::InvalidCipherKdf);
                }
                if salt.len() > SALT_MAX {
                    return Err(KeyFileError::SaltTooLong {
                        len: salt.len(),
                        max: SALT_MAX,
                    });
                }
                if *rounds == 0 {
                    return Err(KeyFileError::Kdf("bcrypt round count is zero".into()));
                }
            }
        }
        Ok(())
    }

    /// Derive cipher key plus IV material from the passphrase.
    ///
    /// Returns `key_len + block_len` bytes in a zeroizing buffer; the
    /// caller splits it into key and IV.
    pub(crate) fn derive_material(&self) -> Result<Zeroizing<Vec<u8>>, KeyFileError> {
        let needed = self.cipher.key_len + self.cipher.block_len;
        if needed > SYM_MATERIAL_MAX {
            return Err(KeyFileError::KeyMaterialTooLarge {
                needed,
                max: SYM_MATERIAL_MAX,
            });
        }
        match &self.kdf {
            KdfAlgorithm::None => Err(KeyFileError::InvalidCipherKdf),
            KdfAlgorithm::Bcrypt { salt, rounds } => {
                let passphrase = self.passphrase.ok_or(KeyFileError::PassphraseRequired)?;
                let mut material = Zeroizing::new(vec![0u8; needed]);
                bcrypt_pbkdf::bcrypt_pbkdf(passphrase, salt, *rounds, &mut material)
                    .map_err(|e| KeyFileError::Kdf(e.to_string()))?;
                Ok(material)
            }
        }
    }
}
