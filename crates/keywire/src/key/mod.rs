//! Typed private and public keys produced by the container decoder.

use std::fmt;

use thiserror::Error;

mod curve;
mod ecdsa;
mod ed25519;
mod rsa;

pub use curve::{EcCurve, SECP256K1_OID};
pub use ecdsa::{EcPublicKey, EcdsaPrivateKey};
pub use ed25519::Ed25519PrivateKey;
pub use rsa::RsaPrivateKey;

/// Errors constructing a typed key from decoded material.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("invalid key data length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Scalar is zero, not below the curve order, or otherwise not a
    /// valid private key.
    #[error("invalid private scalar")]
    InvalidScalar,

    #[error("invalid curve point")]
    InvalidPoint,

    #[error("invalid RSA key components: {0}")]
    InvalidComponents(String),
}

/// Algorithm selector for the private-key decoder.
///
/// A closed set: a name either matches one of the fixed algorithm
/// names or resolves through the ECDSA curve probe; anything else is
/// unsupported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAlgorithm {
    Ed25519,
    Rsa,
    Ecdsa(EcCurve),
}

impl KeyAlgorithm {
    /// Resolve an algorithm name from the private-key section.
    ///
    /// `ssh-ed25519` and `ssh-rsa` match exactly; `ecdsa-sha2-<curve>`
    /// names go through the curve probe, which also resolves the curve
    /// parameters the decoder will import against.
    pub fn resolve(name: &[u8]) -> Option<Self> {
        match name {
            b"ssh-ed25519" => Some(KeyAlgorithm::Ed25519),
            b"ssh-rsa" => Some(KeyAlgorithm::Rsa),
            _ => {
                let name = std::str::from_utf8(name).ok()?;
                let suffix = name.strip_prefix("ecdsa-sha2-")?;
                EcCurve::from_ssh_suffix(suffix).map(KeyAlgorithm::Ecdsa)
            }
        }
    }
}

impl fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyAlgorithm::Ed25519 => f.write_str("ssh-ed25519"),
            KeyAlgorithm::Rsa => f.write_str("ssh-rsa"),
            KeyAlgorithm::Ecdsa(curve) => write!(f, "ecdsa-sha2-{}", curve.ssh_id()),
        }
    }
}

/// A decoded private key, tagged by algorithm.
///
/// The tag is set only on a successful decode of that branch; the
/// value is exclusively owned by the caller that invoked the decode.
pub enum PrivateKey {
    Ed25519(Ed25519PrivateKey),
    Ecdsa(EcdsaPrivateKey),
    Rsa(RsaPrivateKey),
}

impl PrivateKey {
    pub fn algorithm(&self) -> KeyAlgorithm {
        match self {
            PrivateKey::Ed25519(_) => KeyAlgorithm::Ed25519,
            PrivateKey::Rsa(_) => KeyAlgorithm::Rsa,
            PrivateKey::Ecdsa(key) => KeyAlgorithm::Ecdsa(key.curve()),
        }
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("algorithm", &self.algorithm().to_string())
            .field("material", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_fixed_names() {
        assert_eq!(
            KeyAlgorithm::resolve(b"ssh-ed25519"),
            Some(KeyAlgorithm::Ed25519)
        );
        assert_eq!(KeyAlgorithm::resolve(b"ssh-rsa"), Some(KeyAlgorithm::Rsa));
    }

    #[test]
    fn test_resolve_ecdsa_probe() {
        assert_eq!(
            KeyAlgorithm::resolve(b"ecdsa-sha2-nistp384"),
            Some(KeyAlgorithm::Ecdsa(EcCurve::NistP384))
        );
        assert_eq!(KeyAlgorithm::resolve(b"ecdsa-sha2-nistp224"), None);
        assert_eq!(KeyAlgorithm::resolve(b"ssh-dss"), None);
        assert_eq!(KeyAlgorithm::resolve(b"ecdsa-sha2-"), None);
    }

    #[test]
    fn test_display_roundtrip() {
        for name in ["ssh-ed25519", "ssh-rsa", "ecdsa-sha2-nistp521"] {
            let algo = KeyAlgorithm::resolve(name.as_bytes()).unwrap();
            assert_eq!(algo.to_string(), name);
        }
    }
}
