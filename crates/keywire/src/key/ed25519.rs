//! Ed25519 private keys.

use std::fmt;

use ed25519_consensus::{SigningKey, VerificationKey};

/// Ed25519 private key imported from a 32-byte seed.
#[derive(Clone)]
pub struct Ed25519PrivateKey {
    signing: SigningKey,
}

impl Ed25519PrivateKey {
    /// Import from the raw 32-byte seed.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            signing: SigningKey::from(seed),
        }
    }

    /// The seed bytes.
    ///
    /// WARNING: This exposes the private key. Handle with care.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.signing.to_bytes()
    }

    /// The corresponding verification key.
    pub fn public_key(&self) -> VerificationKey {
        VerificationKey::from(&self.signing)
    }
}

impl fmt::Debug for Ed25519PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ed25519PrivateKey")
            .field("seed", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_roundtrip() {
        let seed = [0x5Au8; 32];
        let key = Ed25519PrivateKey::from_seed(seed);
        assert_eq!(key.to_bytes(), seed);
    }

    #[test]
    fn test_public_key_matches_signing_key() {
        let seed = [7u8; 32];
        let key = Ed25519PrivateKey::from_seed(seed);
        let expected = VerificationKey::from(&SigningKey::from(seed));
        assert_eq!(key.public_key().to_bytes(), expected.to_bytes());
    }

    #[test]
    fn test_debug_is_redacted() {
        let key = Ed25519PrivateKey::from_seed([0xAB; 32]);
        let debug = format!("{:?}", key);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("171"));
    }
}
