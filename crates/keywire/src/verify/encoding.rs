//! Decoding of the four ECDSA signature serializations into an (r, s)
//! pair of big-endian integers.

use der::asn1::UintRef;
use der::{Decode, Reader, SliceReader};

use crate::key::{EcCurve, EcPublicKey, SECP256K1_OID};
use crate::wire::WireReader;

use super::{SignatureFormat, VerifyError};

/// Dispatch on the declared format. Every branch finishes before any
/// curve arithmetic happens, so malformed encodings and curve
/// mismatches fail here.
pub(super) fn decode_rs(
    format: SignatureFormat,
    signature: &[u8],
    key: &EcPublicKey,
) -> Result<(Vec<u8>, Vec<u8>), VerifyError> {
    match format {
        SignatureFormat::Der => decode_der(signature),
        SignatureFormat::Raw => decode_raw(signature, key.curve()),
        SignatureFormat::Ethereum => decode_ethereum(signature, key.curve()),
        SignatureFormat::Ssh => decode_ssh(signature, key.curve()),
    }
}

/// ANSI X9.62: a strict DER `SEQUENCE { INTEGER r, INTEGER s }`.
fn decode_der(signature: &[u8]) -> Result<(Vec<u8>, Vec<u8>), VerifyError> {
    let mut reader = SliceReader::new(signature).map_err(VerifyError::Der)?;
    let pair = reader.sequence(|seq| {
        let r = UintRef::decode(seq)?;
        let s = UintRef::decode(seq)?;
        Ok((r.as_bytes().to_vec(), s.as_bytes().to_vec()))
    })?;
    reader.finish(pair).map_err(VerifyError::Der)
}

/// RFC 7518: fixed-width `r || s`, each half as wide as the curve
/// order.
fn decode_raw(signature: &[u8], curve: EcCurve) -> Result<(Vec<u8>, Vec<u8>), VerifyError> {
    let half = curve.field_len();
    if signature.len() != 2 * half {
        return Err(VerifyError::WrongLength {
            expected: 2 * half,
            actual: signature.len(),
        });
    }
    Ok((signature[..half].to_vec(), signature[half..].to_vec()))
}

/// Ethereum: 65 bytes of `r || s || v`; only defined for secp256k1
/// keys, and the recovery byte is accepted but never consulted.
fn decode_ethereum(signature: &[u8], curve: EcCurve) -> Result<(Vec<u8>, Vec<u8>), VerifyError> {
    if curve.oid() != SECP256K1_OID {
        return Err(VerifyError::WrongCurve(curve));
    }
    if signature.len() != 65 {
        return Err(VerifyError::WrongLength {
            expected: 65,
            actual: signature.len(),
        });
    }
    Ok((signature[..32].to_vec(), signature[32..64].to_vec()))
}

/// RFC 5656: SSH wire data holding a curve-identifier string and two
/// mpints. The identifier is re-derived from the verifying key's curve
/// and must match byte for byte.
fn decode_ssh(signature: &[u8], curve: EcCurve) -> Result<(Vec<u8>, Vec<u8>), VerifyError> {
    let mut reader = WireReader::new(signature);
    let name = reader.read_string()?;
    let r = reader.read_mpint()?;
    let s = reader.read_mpint()?;
    reader.finish()?;

    let expected = curve.ssh_signature_name();
    if name != expected.as_bytes() {
        return Err(VerifyError::CurveMismatch {
            expected,
            found: String::from_utf8_lossy(name).into_owned(),
        });
    }

    Ok((r.to_vec(), s.to_vec()))
}
