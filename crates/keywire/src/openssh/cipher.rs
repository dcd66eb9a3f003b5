//! Cipher descriptor table and private-section decryption.
//!
//! Descriptors follow the IANA SSH cipher registry naming. The table
//! is immutable configuration data assembled at compile time and is
//! safe for unsynchronized concurrent reads.

use aes::Aes256;
use cipher::block_padding::NoPadding;
use cipher::{BlockDecryptMut, KeyIvInit, StreamCipher};

use super::error::KeyFileError;

type Aes256CbcDec = cbc::Decryptor<Aes256>;
type Aes256Ctr = ctr::Ctr128BE<Aes256>;

/// Block-cipher operating mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherMode {
    None,
    Cbc,
    Ctr,
    Stream,
    Gcm,
}

/// Static description of one supported cipher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CipherDescriptor {
    /// SSH cipher name, matched exactly.
    pub name: &'static str,
    /// Key length in bytes; zero for the no-op entry.
    pub key_len: usize,
    /// Cipher block length; also the pad boundary of the private
    /// section (8 for unencrypted containers).
    pub block_len: usize,
    pub mode: CipherMode,
}

/// Supported ciphers. `none` is a valid no-op entry and is never
/// passed to the decryptor.
pub const CIPHERS: &[CipherDescriptor] = &[
    CipherDescriptor {
        name: "none",
        key_len: 0,
        block_len: 8,
        mode: CipherMode::None,
    },
    CipherDescriptor {
        name: "aes256-cbc",
        key_len: 32,
        block_len: 16,
        mode: CipherMode::Cbc,
    },
    CipherDescriptor {
        name: "aes256-ctr",
        key_len: 32,
        block_len: 16,
        mode: CipherMode::Ctr,
    },
];

/// Look a cipher up by its exact SSH name.
pub fn find_cipher(name: &[u8]) -> Option<&'static CipherDescriptor> {
    CIPHERS.iter().find(|c| c.name.as_bytes() == name)
}

/// Decrypt `data` in place with the given descriptor, key, and IV.
pub(crate) fn decrypt_in_place(
    desc: &CipherDescriptor,
    key: &[u8],
    iv: &[u8],
    data: &mut [u8],
) -> Result<(), KeyFileError> {
    match desc.mode {
        CipherMode::Cbc => {
            if data.len() % desc.block_len != 0 {
                return Err(KeyFileError::Cipher(format!(
                    "ciphertext length {} is not a multiple of the block size {}",
                    data.len(),
                    desc.block_len
                )));
            }
            let dec = Aes256CbcDec::new_from_slices(key, iv)
                .map_err(|e| KeyFileError::Cipher(e.to_string()))?;
            dec.decrypt_padded_mut::<NoPadding>(data)
                .map_err(|e| KeyFileError::Cipher(e.to_string()))?;
            Ok(())
        }
        CipherMode::Ctr => {
            let mut ctr = Aes256Ctr::new_from_slices(key, iv)
                .map_err(|e| KeyFileError::Cipher(e.to_string()))?;
            ctr.apply_keystream(data);
            Ok(())
        }
        CipherMode::None | CipherMode::Stream | CipherMode::Gcm => Err(KeyFileError::Cipher(
            format!("no decryptor for cipher {}", desc.name),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cipher::BlockEncryptMut;

    type Aes256CbcEnc = cbc::Encryptor<Aes256>;

    #[test]
    fn test_find_cipher() {
        let none = find_cipher(b"none").unwrap();
        assert_eq!(none.mode, CipherMode::None);
        assert_eq!(none.key_len, 0);

        let cbc = find_cipher(b"aes256-cbc").unwrap();
        assert_eq!(cbc.key_len, 32);
        assert_eq!(cbc.block_len, 16);

        assert!(find_cipher(b"chacha20-poly1305@openssh.com").is_none());
        assert!(find_cipher(b"AES256-CBC").is_none());
    }

    #[test]
    fn test_cbc_decrypt_roundtrip() {
        let key = [0x11u8; 32];
        let iv = [0x22u8; 16];
        let plaintext = [0x5Au8; 48];

        let mut buf = plaintext;
        Aes256CbcEnc::new_from_slices(&key, &iv)
            .unwrap()
            .encrypt_padded_mut::<NoPadding>(&mut buf, plaintext.len())
            .unwrap();
        assert_ne!(buf, plaintext);

        let desc = find_cipher(b"aes256-cbc").unwrap();
        decrypt_in_place(desc, &key, &iv, &mut buf).unwrap();
        assert_eq!(buf, plaintext);
    }

    #[test]
    fn test_cbc_rejects_partial_block() {
        let desc = find_cipher(b"aes256-cbc").unwrap();
        let mut buf = [0u8; 20];
        let result = decrypt_in_place(desc, &[0u8; 32], &[0u8; 16], &mut buf);
        assert!(matches!(result, Err(KeyFileError::Cipher(_))));
    }

    #[test]
    fn test_ctr_decrypt_roundtrip() {
        let key = [0x33u8; 32];
        let iv = [0x44u8; 16];
        let plaintext = b"ctr mode needs no block alignment".to_vec();

        let mut buf = plaintext.clone();
        // CTR decryption is its own inverse.
        let desc = find_cipher(b"aes256-ctr").unwrap();
        decrypt_in_place(desc, &key, &iv, &mut buf).unwrap();
        assert_ne!(buf, plaintext);
        decrypt_in_place(desc, &key, &iv, &mut buf).unwrap();
        assert_eq!(buf, plaintext);
    }

    #[test]
    fn test_none_never_decrypts() {
        let desc = find_cipher(b"none").unwrap();
        let mut buf = [0u8; 16];
        assert!(decrypt_in_place(desc, &[], &[], &mut buf).is_err());
    }
}
