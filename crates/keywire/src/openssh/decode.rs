//! Private-key section decryption, algorithm dispatch, and padding
//! validation; the tail end of the container pipeline.

use rsa::BigUint;
use tracing::debug;
use zeroize::Zeroizing;

use crate::key::{
    EcCurve, EcPublicKey, EcdsaPrivateKey, Ed25519PrivateKey, KeyAlgorithm, KeyError, PrivateKey,
    RsaPrivateKey,
};
use crate::secure::{secret_bytes, ExposeSecret, SecretBytes};
use crate::wire::WireReader;

use super::cipher::decrypt_in_place;
use super::error::KeyFileError;
use super::header::parse_header;
use super::kdf::{KdfAlgorithm, KdfOptions};

/// Result of decoding a container: the typed key and the comment that
/// trailed it.
#[derive(Debug)]
pub struct DecodedKey {
    pub key: PrivateKey,
    pub comment: String,
}

/// Decode a binary `openssh-key-v1` container into a typed key.
///
/// Runs the full pipeline: header parse, cipher/KDF negotiation,
/// decryption (skipped entirely when the KDF is `none`), integrity
/// check, per-algorithm decode, comment, padding. The passphrase is
/// only needed for encrypted containers.
pub fn decode_private_key(
    container: &[u8],
    passphrase: Option<&str>,
) -> Result<DecodedKey, KeyFileError> {
    debug!(
        "container ({} bytes): {}",
        container.len(),
        hex::encode(container)
    );

    let header = parse_header(container, passphrase)?;
    debug!("public key blob: {}", hex::encode(header.public_key));

    let mut reader = WireReader::new(&container[header.consumed..]);
    let section = reader.read_string()?;

    let decrypted;
    let section: &[u8] = match header.options.kdf {
        KdfAlgorithm::None => section,
        KdfAlgorithm::Bcrypt { .. } => {
            decrypted = decrypt_private_section(section, &header.options)?;
            let section = decrypted.expose_secret();
            debug!(
                "decrypted private section ({} bytes): {}",
                section.len(),
                hex::encode(section)
            );
            section
        }
    };

    let (key, comment) = decode_private_section(section)?;
    Ok(DecodedKey { key, comment })
}

/// Decrypt an encrypted private-key section.
///
/// Derives `key_len + block_len` bytes of material from the options,
/// splits it into key and IV, and decrypts. The derived material and
/// the working buffer are erased on every exit path.
pub fn decrypt_private_section(
    section: &[u8],
    opts: &KdfOptions<'_>,
) -> Result<SecretBytes, KeyFileError> {
    let material = opts.derive_material()?;
    let (key, iv) = material.split_at(opts.cipher.key_len);

    let mut buf = Zeroizing::new(section.to_vec());
    decrypt_in_place(opts.cipher, key, iv, &mut buf)?;
    Ok(secret_bytes(std::mem::take(buf.as_mut())))
}

/// Decode a decrypted private-key section: integrity pair, algorithm
/// dispatch, comment, padding.
fn decode_private_section(section: &[u8]) -> Result<(PrivateKey, String), KeyFileError> {
    let mut reader = WireReader::new(section);

    let check1 = reader.read_u32()?;
    let check2 = reader.read_u32()?;
    if check1 != check2 {
        // Wrong passphrase or corrupted data; the two cannot be told
        // apart from here.
        return Err(KeyFileError::DecryptFailed);
    }

    let name = reader.read_string()?;
    let algorithm = KeyAlgorithm::resolve(name).ok_or_else(|| {
        KeyFileError::UnsupportedAlgorithm(String::from_utf8_lossy(name).into_owned())
    })?;

    let key = match algorithm {
        KeyAlgorithm::Ed25519 => decode_ed25519(&mut reader)?,
        KeyAlgorithm::Rsa => decode_rsa(&mut reader)?,
        KeyAlgorithm::Ecdsa(curve) => decode_ecdsa(&mut reader, curve)?,
    };

    let comment = String::from_utf8_lossy(reader.read_string()?).into_owned();
    check_padding(reader.take_rest())?;

    Ok((key, comment))
}

/// Ed25519: public-key blob, then a 64-byte private blob whose second
/// half is the seed.
fn decode_ed25519(reader: &mut WireReader<'_>) -> Result<PrivateKey, KeyFileError> {
    let _public = reader.read_string()?;
    let private = reader.read_string()?;
    if private.len() != 64 {
        return Err(KeyError::InvalidLength {
            expected: 64,
            actual: private.len(),
        }
        .into());
    }

    let mut seed = Zeroizing::new([0u8; 32]);
    seed.copy_from_slice(&private[32..]);
    Ok(PrivateKey::Ed25519(Ed25519PrivateKey::from_seed(*seed)))
}

/// RSA: n, e, d, iqmp, p, q as mpints; the CRT reduction exponents
/// are derived during key construction.
fn decode_rsa(reader: &mut WireReader<'_>) -> Result<PrivateKey, KeyFileError> {
    let n = BigUint::from_bytes_be(reader.read_mpint()?);
    let e = BigUint::from_bytes_be(reader.read_mpint()?);
    let d = BigUint::from_bytes_be(reader.read_mpint()?);
    let iqmp = BigUint::from_bytes_be(reader.read_mpint()?);
    let p = BigUint::from_bytes_be(reader.read_mpint()?);
    let q = BigUint::from_bytes_be(reader.read_mpint()?);

    let key = RsaPrivateKey::from_components(n, e, d, iqmp, p, q)?;
    Ok(PrivateKey::Rsa(key))
}

/// ECDSA: group name, public point, private scalar. The curve was
/// already resolved by the dispatch probe; the embedded point must
/// parse as a point on that curve, the group name is not re-checked.
fn decode_ecdsa(reader: &mut WireReader<'_>, curve: EcCurve) -> Result<PrivateKey, KeyFileError> {
    let _group_name = reader.read_string()?;
    let point = reader.read_string()?;
    EcPublicKey::from_sec1(curve, point)?;
    let scalar = reader.read_string()?;

    let key = EcdsaPrivateKey::from_scalar_bytes(curve, scalar)?;
    Ok(PrivateKey::Ecdsa(key))
}

/// The bytes after the comment must count 1, 2, 3, ... to the end of
/// the section; anything else means corruption or a wrong key.
fn check_padding(padding: &[u8]) -> Result<(), KeyFileError> {
    let mut expected = 1u8;
    for &byte in padding {
        if byte != expected {
            return Err(KeyFileError::BadPadding {
                expected,
                found: byte,
            });
        }
        expected = expected.wrapping_add(1);
    }
    Ok(())
}
