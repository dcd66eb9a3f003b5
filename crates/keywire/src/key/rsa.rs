//! RSA private keys with CRT parameter derivation.

use std::fmt;

use rsa::BigUint;

use super::KeyError;

/// RSA private key decoded from its individual components.
///
/// Carries the CRT acceleration values alongside the key proper: the
/// coefficient comes off the wire, the two reduction exponents
/// `d mod (p-1)` and `d mod (q-1)` are derived at construction time.
#[derive(Clone)]
pub struct RsaPrivateKey {
    key: rsa::RsaPrivateKey,
    iqmp: BigUint,
    dp: BigUint,
    dq: BigUint,
}

impl RsaPrivateKey {
    /// Build a key from modulus, public exponent, private exponent,
    /// CRT coefficient, and the two primes.
    pub fn from_components(
        n: BigUint,
        e: BigUint,
        d: BigUint,
        iqmp: BigUint,
        p: BigUint,
        q: BigUint,
    ) -> Result<Self, KeyError> {
        let two = BigUint::from(2u8);
        if p < two || q < two {
            return Err(KeyError::InvalidComponents("prime too small".into()));
        }

        // Derived before the components move into the key; the scratch
        // values p-1 and q-1 are dropped on return.
        let dp = &d % (&p - 1u32);
        let dq = &d % (&q - 1u32);

        let key = rsa::RsaPrivateKey::from_components(n, e, d, vec![p, q])
            .map_err(|e| KeyError::InvalidComponents(e.to_string()))?;

        Ok(Self { key, iqmp, dp, dq })
    }

    /// The underlying RSA key.
    pub fn inner(&self) -> &rsa::RsaPrivateKey {
        &self.key
    }

    /// Bit length of the modulus.
    pub fn modulus_bits(&self) -> u64 {
        use rsa::traits::PublicKeyParts;
        self.key.n().bits() as u64
    }

    /// CRT coefficient `q^-1 mod p` as decoded from the container.
    pub fn crt_coefficient(&self) -> &BigUint {
        &self.iqmp
    }

    /// `d mod (p-1)`.
    pub fn dp(&self) -> &BigUint {
        &self.dp
    }

    /// `d mod (q-1)`.
    pub fn dq(&self) -> &BigUint {
        &self.dq
    }
}

impl fmt::Debug for RsaPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use rsa::traits::PublicKeyParts;
        f.debug_struct("RsaPrivateKey")
            .field("modulus_bits", &self.key.n().bits())
            .field("material", &"[REDACTED]")
            .finish()
    }
}
