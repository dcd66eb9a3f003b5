//! Container header parsing.
//!
//! The header of an `openssh-key-v1` container fixes the cipher, the
//! KDF and its parameters, and carries the public key; everything
//! after it is the (possibly encrypted) private-key section.

use crate::wire::WireReader;

use super::cipher::find_cipher;
use super::error::KeyFileError;
use super::kdf::{KdfAlgorithm, KdfOptions, SALT_MAX};

/// Literal magic at the start of every container, NUL included.
pub const MAGIC: &[u8] = b"openssh-key-v1\0";

/// Parsed container header.
pub struct ParsedHeader<'a> {
    /// Cipher, KDF, and passphrase, ready for the decryption stage.
    pub options: KdfOptions<'a>,
    /// The single public-key blob the header declares.
    pub public_key: &'a [u8],
    /// Bytes consumed; the private-key section starts here.
    pub consumed: usize,
}

/// Parse and validate the container header.
///
/// The caller has already stripped the PEM envelope and base64-decoded
/// the body. The passphrase is threaded through into the returned
/// options; it is only consulted if the KDF turns out to be `bcrypt`.
pub fn parse_header<'a>(
    input: &'a [u8],
    passphrase: Option<&'a str>,
) -> Result<ParsedHeader<'a>, KeyFileError> {
    if !input.starts_with(MAGIC) {
        // A magic that exists but is misplaced gets its own diagnostic.
        if input.windows(MAGIC.len()).any(|w| w == MAGIC) {
            return Err(KeyFileError::MisplacedMagic);
        }
        return Err(KeyFileError::MissingMagic);
    }

    let mut reader = WireReader::new(&input[MAGIC.len()..]);
    let cipher_name = reader.read_string()?;
    let kdf_name = reader.read_string()?;
    let kdf_options = reader.read_string()?;
    let num_keys = reader.read_u32()?;
    let public_key = reader.read_string()?;

    if num_keys != 1 {
        return Err(KeyFileError::WrongKeyCount(num_keys));
    }

    let cipher = find_cipher(cipher_name).ok_or_else(|| {
        KeyFileError::UnsupportedCipher(String::from_utf8_lossy(cipher_name).into_owned())
    })?;

    let kdf = match kdf_name {
        b"none" => KdfAlgorithm::None,
        b"bcrypt" => {
            let mut nested = WireReader::new(kdf_options);
            let salt = nested.read_string()?;
            let rounds = nested.read_u32()?;
            if !nested.is_empty() {
                return Err(KeyFileError::UnusedKdfData(nested.remaining()));
            }
            if salt.len() > SALT_MAX {
                return Err(KeyFileError::SaltTooLong {
                    len: salt.len(),
                    max: SALT_MAX,
                });
            }
            KdfAlgorithm::Bcrypt {
                salt: salt.to_vec(),
                rounds,
            }
        }
        other => {
            return Err(KeyFileError::UnsupportedKdf(
                String::from_utf8_lossy(other).into_owned(),
            ))
        }
    };

    let options = KdfOptions {
        kdf,
        cipher,
        passphrase,
    };
    options.validate()?;

    Ok(ParsedHeader {
        options,
        public_key,
        consumed: MAGIC.len() + reader.consumed(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openssh::cipher::CipherMode;

    fn put_str(out: &mut Vec<u8>, s: &[u8]) {
        out.extend_from_slice(&(s.len() as u32).to_be_bytes());
        out.extend_from_slice(s);
    }

    fn header_bytes(cipher: &[u8], kdf: &[u8], kdf_opts: &[u8], num_keys: u32) -> Vec<u8> {
        let mut out = MAGIC.to_vec();
        put_str(&mut out, cipher);
        put_str(&mut out, kdf);
        put_str(&mut out, kdf_opts);
        out.extend_from_slice(&num_keys.to_be_bytes());
        put_str(&mut out, b"fake-public-key");
        out
    }

    fn bcrypt_opts_blob(salt: &[u8], rounds: u32) -> Vec<u8> {
        let mut out = Vec::new();
        put_str(&mut out, salt);
        out.extend_from_slice(&rounds.to_be_bytes());
        out
    }

    #[test]
    fn test_parse_plaintext_header() {
        let bytes = header_bytes(b"none", b"none", b"", 1);
        let header = parse_header(&bytes, None).unwrap();
        assert_eq!(header.options.kdf, KdfAlgorithm::None);
        assert_eq!(header.options.cipher.mode, CipherMode::None);
        assert_eq!(header.public_key, b"fake-public-key");
        assert_eq!(header.consumed, bytes.len());
    }

    #[test]
    fn test_parse_bcrypt_header() {
        let opts = bcrypt_opts_blob(&[0x55; 16], 24);
        let bytes = header_bytes(b"aes256-cbc", b"bcrypt", &opts, 1);
        let header = parse_header(&bytes, Some("hunter2")).unwrap();
        match &header.options.kdf {
            KdfAlgorithm::Bcrypt { salt, rounds } => {
                assert_eq!(salt, &vec![0x55; 16]);
                assert_eq!(*rounds, 24);
            }
            other => panic!("wrong kdf: {:?}", other),
        }
    }

    #[test]
    fn test_magic_must_lead() {
        let mut shifted = vec![0u8];
        shifted.extend_from_slice(&header_bytes(b"none", b"none", b"", 1));
        assert!(matches!(
            parse_header(&shifted, None),
            Err(KeyFileError::MisplacedMagic)
        ));
        assert!(matches!(
            parse_header(b"not a key at all", None),
            Err(KeyFileError::MissingMagic)
        ));
    }

    #[test]
    fn test_wrong_key_count() {
        let bytes = header_bytes(b"none", b"none", b"", 2);
        assert!(matches!(
            parse_header(&bytes, None),
            Err(KeyFileError::WrongKeyCount(2))
        ));
    }

    #[test]
    fn test_unknown_cipher() {
        let bytes = header_bytes(b"3des-cbc", b"none", b"", 1);
        assert!(matches!(
            parse_header(&bytes, None),
            Err(KeyFileError::UnsupportedCipher(name)) if name == "3des-cbc"
        ));
    }

    #[test]
    fn test_unknown_kdf() {
        let opts = bcrypt_opts_blob(&[0; 16], 16);
        let bytes = header_bytes(b"aes256-cbc", b"argon2", &opts, 1);
        assert!(matches!(
            parse_header(&bytes, None),
            Err(KeyFileError::UnsupportedKdf(name)) if name == "argon2"
        ));
    }

    #[test]
    fn test_unused_kdf_options() {
        let mut opts = bcrypt_opts_blob(&[0x55; 16], 24);
        opts.push(0xFF);
        let bytes = header_bytes(b"aes256-cbc", b"bcrypt", &opts, 1);
        assert!(matches!(
            parse_header(&bytes, None),
            Err(KeyFileError::UnusedKdfData(1))
        ));
    }

    #[test]
    fn test_cipher_without_kdf_rejected() {
        let bytes = header_bytes(b"aes256-cbc", b"none", b"", 1);
        assert!(matches!(
            parse_header(&bytes, None),
            Err(KeyFileError::InvalidCipherKdf)
        ));
    }

    #[test]
    fn test_kdf_without_cipher_rejected() {
        let opts = bcrypt_opts_blob(&[0x55; 16], 24);
        let bytes = header_bytes(b"none", b"bcrypt", &opts, 1);
        assert!(matches!(
            parse_header(&bytes, None),
            Err(KeyFileError::InvalidCipherKdf)
        ));
    }
}
