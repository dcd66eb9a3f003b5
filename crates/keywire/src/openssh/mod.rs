//! The OpenSSH private-key container pipeline.
//!
//! Format reference: the `PROTOCOL.key` document in OpenSSH portable.
//! The flow is header parse -> cipher/KDF negotiation -> decryption ->
//! per-algorithm private-key decode -> padding validation.

pub mod cipher;
pub mod decode;
pub mod error;
pub mod header;
pub mod kdf;

pub use cipher::{find_cipher, CipherDescriptor, CipherMode, CIPHERS};
pub use decode::{decode_private_key, decrypt_private_section, DecodedKey};
pub use error::KeyFileError;
pub use header::{parse_header, ParsedHeader, MAGIC};
pub use kdf::{KdfAlgorithm, KdfOptions, SALT_MAX, SYM_MATERIAL_MAX};

use crate::pem::decode_pem;

/// Decode a PEM-armored OpenSSH private-key file.
///
/// Convenience wrapper: strips the envelope, base64-decodes the body,
/// and runs [`decode_private_key`] on the container.
pub fn decode_pem_private_key(
    text: &str,
    passphrase: Option<&str>,
) -> Result<DecodedKey, KeyFileError> {
    let container = decode_pem(text)?;
    decode_private_key(&container, passphrase)
}
