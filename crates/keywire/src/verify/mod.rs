//! ECDSA signature verification over precomputed digests.
//!
//! Signatures arrive in one of four serializations ([`SignatureFormat`]),
//! all of which reduce to an (r, s) pair before any curve arithmetic
//! runs. Verification itself is generic over the curve backends and
//! follows X9.62: the digest is truncated to the bit length of the
//! group order, u1 and u2 are combined in a single multi-scalar
//! multiplication, and the signature is valid iff the x coordinate of
//! the result reduces to r.

mod encoding;

use elliptic_curve::ff::{Field, PrimeField};
use elliptic_curve::generic_array::typenum::Unsigned;
use elliptic_curve::group::{Curve as _, Group};
use elliptic_curve::ops::{LinearCombination, Reduce};
use elliptic_curve::point::AffineCoordinates;
use elliptic_curve::{CurveArithmetic, FieldBytes, PrimeCurve, PublicKey, ProjectivePoint, Scalar};
use thiserror::Error;

use crate::key::{EcCurve, EcPublicKey};
use crate::wire::WireError;

/// How a signature's (r, s) pair is serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureFormat {
    /// ANSI X9.62 DER: `SEQUENCE { INTEGER r, INTEGER s }`.
    Der,
    /// RFC 7518 fixed-width `r || s`, each padded to the field size.
    Raw,
    /// 65-byte `r || s || v` as used by Ethereum; secp256k1 only.
    Ethereum,
    /// RFC 5656 SSH wire format: identifier string plus two mpints.
    Ssh,
}

#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("malformed signature: {0}")]
    Wire(#[from] WireError),

    #[error("malformed DER signature: {0}")]
    Der(#[from] der::Error),

    #[error("signature is {actual} bytes, expected {expected}")]
    WrongLength { expected: usize, actual: usize },

    #[error("signature format requires a secp256k1 key, got {0}")]
    WrongCurve(EcCurve),

    #[error("signature names {found}, key requires {expected}")]
    CurveMismatch { expected: String, found: String },

    #[error("signature component outside [1, order)")]
    SignatureOutOfRange,
}

/// Verify `signature` over the precomputed `digest` with `key`.
///
/// Returns `Ok(false)` for a well-formed signature that simply does
/// not match; errors are reserved for malformed or out-of-range input.
pub fn verify_signature(
    format: SignatureFormat,
    signature: &[u8],
    digest: &[u8],
    key: &EcPublicKey,
) -> Result<bool, VerifyError> {
    let (r, s) = encoding::decode_rs(format, signature, key)?;
    let order_bits = key.curve().order_bits();
    match key {
        EcPublicKey::NistP256(pk) => verify_parts::<p256::NistP256>(order_bits, &r, &s, digest, pk),
        EcPublicKey::NistP384(pk) => verify_parts::<p384::NistP384>(order_bits, &r, &s, digest, pk),
        EcPublicKey::NistP521(pk) => verify_parts::<p521::NistP521>(order_bits, &r, &s, digest, pk),
        EcPublicKey::Secp256k1(pk) => verify_parts::<k256::Secp256k1>(order_bits, &r, &s, digest, pk),
    }
}

fn verify_parts<C>(
    order_bits: usize,
    r: &[u8],
    s: &[u8],
    digest: &[u8],
    key: &PublicKey<C>,
) -> Result<bool, VerifyError>
where
    C: PrimeCurve + CurveArithmetic,
    Scalar<C>: Reduce<C::Uint, Bytes = FieldBytes<C>>,
{
    let r = scalar_from_bytes::<C>(r)?;
    let s = scalar_from_bytes::<C>(s)?;
    let e = digest_scalar::<C>(digest, order_bits);

    // r and s are nonzero, so s is invertible in the prime-order group.
    let w = Option::<Scalar<C>>::from(s.invert()).ok_or(VerifyError::SignatureOutOfRange)?;
    let u1 = e * w;
    let u2 = r * w;

    let q = ProjectivePoint::<C>::from(*key.as_affine());
    let x = ProjectivePoint::<C>::lincomb(&ProjectivePoint::<C>::generator(), &u1, &q, &u2)
        .to_affine()
        .x();

    Ok(<Scalar<C> as Reduce<C::Uint>>::reduce_bytes(&x) == r)
}

/// Import a big-endian signature component, requiring 0 < value < order.
fn scalar_from_bytes<C>(bytes: &[u8]) -> Result<Scalar<C>, VerifyError>
where
    C: CurveArithmetic,
{
    let stripped = {
        let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
        &bytes[start..]
    };
    let size = C::FieldBytesSize::USIZE;
    if stripped.len() > size {
        return Err(VerifyError::SignatureOutOfRange);
    }

    let mut repr = FieldBytes::<C>::default();
    repr[size - stripped.len()..].copy_from_slice(stripped);

    let scalar = Option::<Scalar<C>>::from(Scalar::<C>::from_repr(repr))
        .ok_or(VerifyError::SignatureOutOfRange)?;
    if scalar.is_zero().into() {
        return Err(VerifyError::SignatureOutOfRange);
    }
    Ok(scalar)
}

/// Truncate `digest` to the bit length of the group order and reduce
/// it into a scalar.
///
/// Three cases, mirroring FIPS 186-4 bits2int: a digest shorter than
/// the order is left-padded; an order on a byte boundary keeps the
/// leading bytes; otherwise the leading bytes are shifted right by the
/// sub-byte remainder (the P-521 case).
fn digest_scalar<C>(digest: &[u8], order_bits: usize) -> Scalar<C>
where
    C: CurveArithmetic,
    Scalar<C>: Reduce<C::Uint, Bytes = FieldBytes<C>>,
{
    let size = C::FieldBytesSize::USIZE;
    let mut repr = FieldBytes::<C>::default();

    if order_bits > digest.len() * 8 {
        repr[size - digest.len()..].copy_from_slice(digest);
    } else if order_bits % 8 == 0 {
        repr[size - order_bits / 8..].copy_from_slice(&digest[..order_bits / 8]);
    } else {
        let shift = 8 - order_bits % 8;
        let mut carry = 0u8;
        for (slot, &b) in repr.iter_mut().zip(digest.iter().take(size)) {
            *slot = carry | (b >> shift);
            carry = b << (8 - shift);
        }
    }

    <Scalar<C> as Reduce<C::Uint>>::reduce_bytes(&repr)
}
