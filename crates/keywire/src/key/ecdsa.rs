//! ECDSA private and public keys over the supported curves.

use std::fmt;

use elliptic_curve::generic_array::typenum::Unsigned;
use elliptic_curve::{Curve, FieldBytes};
use zeroize::Zeroize;

use super::{EcCurve, KeyError};

/// Left-pad a big-endian scalar into the curve's field width.
///
/// Leading zeros (an mpint sign byte, say) are stripped first; a value
/// wider than the field can never be a valid scalar.
fn scalar_field_bytes<C: Curve>(bytes: &[u8]) -> Result<FieldBytes<C>, KeyError> {
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    let bytes = &bytes[start..];
    let size = C::FieldBytesSize::USIZE;
    if bytes.len() > size {
        return Err(KeyError::InvalidLength {
            expected: size,
            actual: bytes.len(),
        });
    }
    let mut out = FieldBytes::<C>::default();
    out[size - bytes.len()..].copy_from_slice(bytes);
    Ok(out)
}

fn import_scalar<C>(bytes: &[u8]) -> Result<elliptic_curve::SecretKey<C>, KeyError>
where
    C: elliptic_curve::CurveArithmetic,
{
    let mut repr = scalar_field_bytes::<C>(bytes)?;
    let key = elliptic_curve::SecretKey::from_bytes(&repr).map_err(|_| KeyError::InvalidScalar);
    repr.as_mut_slice().zeroize();
    key
}

/// ECDSA private key, tagged by curve.
#[derive(Clone)]
pub enum EcdsaPrivateKey {
    NistP256(p256::SecretKey),
    NistP384(p384::SecretKey),
    NistP521(p521::SecretKey),
    Secp256k1(k256::SecretKey),
}

impl EcdsaPrivateKey {
    /// Import a private scalar against a resolved curve.
    ///
    /// The input is the raw big-endian magnitude as it appears in the
    /// container; it may carry a leading zero or be short of the field
    /// width.
    pub fn from_scalar_bytes(curve: EcCurve, bytes: &[u8]) -> Result<Self, KeyError> {
        match curve {
            EcCurve::NistP256 => import_scalar(bytes).map(EcdsaPrivateKey::NistP256),
            EcCurve::NistP384 => import_scalar(bytes).map(EcdsaPrivateKey::NistP384),
            EcCurve::NistP521 => import_scalar(bytes).map(EcdsaPrivateKey::NistP521),
            EcCurve::Secp256k1 => import_scalar(bytes).map(EcdsaPrivateKey::Secp256k1),
        }
    }

    pub fn curve(&self) -> EcCurve {
        match self {
            EcdsaPrivateKey::NistP256(_) => EcCurve::NistP256,
            EcdsaPrivateKey::NistP384(_) => EcCurve::NistP384,
            EcdsaPrivateKey::NistP521(_) => EcCurve::NistP521,
            EcdsaPrivateKey::Secp256k1(_) => EcCurve::Secp256k1,
        }
    }

    /// Serialize the scalar, big-endian, field width.
    ///
    /// WARNING: This exposes the private key. Handle with care.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            EcdsaPrivateKey::NistP256(k) => k.to_bytes().to_vec(),
            EcdsaPrivateKey::NistP384(k) => k.to_bytes().to_vec(),
            EcdsaPrivateKey::NistP521(k) => k.to_bytes().to_vec(),
            EcdsaPrivateKey::Secp256k1(k) => k.to_bytes().to_vec(),
        }
    }

    /// The corresponding public key.
    pub fn public_key(&self) -> EcPublicKey {
        match self {
            EcdsaPrivateKey::NistP256(k) => EcPublicKey::NistP256(k.public_key()),
            EcdsaPrivateKey::NistP384(k) => EcPublicKey::NistP384(k.public_key()),
            EcdsaPrivateKey::NistP521(k) => EcPublicKey::NistP521(k.public_key()),
            EcdsaPrivateKey::Secp256k1(k) => EcPublicKey::Secp256k1(k.public_key()),
        }
    }
}

impl fmt::Debug for EcdsaPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EcdsaPrivateKey")
            .field("curve", &self.curve())
            .field("scalar", &"[REDACTED]")
            .finish()
    }
}

/// ECDSA public key, tagged by curve; the input to signature
/// verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EcPublicKey {
    NistP256(p256::PublicKey),
    NistP384(p384::PublicKey),
    NistP521(p521::PublicKey),
    Secp256k1(k256::PublicKey),
}

impl EcPublicKey {
    /// Parse a SEC1-encoded point (compressed or uncompressed) on the
    /// given curve.
    pub fn from_sec1(curve: EcCurve, bytes: &[u8]) -> Result<Self, KeyError> {
        match curve {
            EcCurve::NistP256 => p256::PublicKey::from_sec1_bytes(bytes)
                .map(EcPublicKey::NistP256)
                .map_err(|_| KeyError::InvalidPoint),
            EcCurve::NistP384 => p384::PublicKey::from_sec1_bytes(bytes)
                .map(EcPublicKey::NistP384)
                .map_err(|_| KeyError::InvalidPoint),
            EcCurve::NistP521 => p521::PublicKey::from_sec1_bytes(bytes)
                .map(EcPublicKey::NistP521)
                .map_err(|_| KeyError::InvalidPoint),
            EcCurve::Secp256k1 => k256::PublicKey::from_sec1_bytes(bytes)
                .map(EcPublicKey::Secp256k1)
                .map_err(|_| KeyError::InvalidPoint),
        }
    }

    pub fn curve(&self) -> EcCurve {
        match self {
            EcPublicKey::NistP256(_) => EcCurve::NistP256,
            EcPublicKey::NistP384(_) => EcCurve::NistP384,
            EcPublicKey::NistP521(_) => EcCurve::NistP521,
            EcPublicKey::Secp256k1(_) => EcCurve::Secp256k1,
        }
    }

    /// SEC1 encoding of the point.
    pub fn to_sec1_bytes(&self) -> Vec<u8> {
        match self {
            EcPublicKey::NistP256(k) => k.to_sec1_bytes().into_vec(),
            EcPublicKey::NistP384(k) => k.to_sec1_bytes().into_vec(),
            EcPublicKey::NistP521(k) => k.to_sec1_bytes().into_vec(),
            EcPublicKey::Secp256k1(k) => k.to_sec1_bytes().into_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_strips_leading_zero() {
        let mut scalar = vec![0x00];
        scalar.extend_from_slice(&[0x11; 32]);
        let key = EcdsaPrivateKey::from_scalar_bytes(EcCurve::NistP256, &scalar).unwrap();
        assert_eq!(key.to_bytes(), vec![0x11; 32]);
    }

    #[test]
    fn test_import_short_scalar() {
        let key = EcdsaPrivateKey::from_scalar_bytes(EcCurve::NistP384, &[0x02]).unwrap();
        let mut expected = vec![0u8; 48];
        expected[47] = 0x02;
        assert_eq!(key.to_bytes(), expected);
    }

    #[test]
    fn test_import_zero_scalar_rejected() {
        let result = EcdsaPrivateKey::from_scalar_bytes(EcCurve::NistP256, &[0u8; 32]);
        assert!(matches!(result, Err(KeyError::InvalidScalar)));
    }

    #[test]
    fn test_import_oversize_scalar_rejected() {
        let result = EcdsaPrivateKey::from_scalar_bytes(EcCurve::NistP256, &[0x01; 33]);
        assert!(matches!(result, Err(KeyError::InvalidLength { .. })));
    }

    #[test]
    fn test_public_key_curve_matches() {
        let key = EcdsaPrivateKey::from_scalar_bytes(EcCurve::Secp256k1, &[0x42; 32]).unwrap();
        assert_eq!(key.public_key().curve(), EcCurve::Secp256k1);
    }

    #[test]
    fn test_from_sec1_rejects_garbage() {
        let result = EcPublicKey::from_sec1(EcCurve::NistP256, &[0xFF; 65]);
        assert!(matches!(result, Err(KeyError::InvalidPoint)));
    }
}
