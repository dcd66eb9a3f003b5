//! Supported elliptic curves and their identifiers.

use std::fmt;

/// The closed set of curves this crate can decode keys for and verify
/// signatures over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EcCurve {
    NistP256,
    NistP384,
    NistP521,
    Secp256k1,
}

/// Dotted OID identifying secp256k1; the Ethereum signature format is
/// only defined for keys on this curve.
pub const SECP256K1_OID: &str = "1.3.132.0.10";

impl EcCurve {
    pub const ALL: [EcCurve; 4] = [
        EcCurve::NistP256,
        EcCurve::NistP384,
        EcCurve::NistP521,
        EcCurve::Secp256k1,
    ];

    /// RFC 5656 curve identifier: the short name for the three NIST
    /// curves, the dotted OID for everything else.
    pub fn ssh_id(&self) -> &'static str {
        match self {
            EcCurve::NistP256 => "nistp256",
            EcCurve::NistP384 => "nistp384",
            EcCurve::NistP521 => "nistp521",
            EcCurve::Secp256k1 => SECP256K1_OID,
        }
    }

    /// Dotted-decimal object identifier of the curve.
    pub fn oid(&self) -> &'static str {
        match self {
            EcCurve::NistP256 => "1.2.840.10045.3.1.7",
            EcCurve::NistP384 => "1.3.132.0.34",
            EcCurve::NistP521 => "1.3.132.0.35",
            EcCurve::Secp256k1 => SECP256K1_OID,
        }
    }

    /// Bit length of the curve order.
    pub fn order_bits(&self) -> usize {
        match self {
            EcCurve::NistP256 | EcCurve::Secp256k1 => 256,
            EcCurve::NistP384 => 384,
            EcCurve::NistP521 => 521,
        }
    }

    /// Unsigned byte length of the curve order; scalars and the raw
    /// (RFC 7518) signature halves are this wide.
    pub fn field_len(&self) -> usize {
        match self {
            EcCurve::NistP256 | EcCurve::Secp256k1 => 32,
            EcCurve::NistP384 => 48,
            EcCurve::NistP521 => 66,
        }
    }

    /// The SSH signature/key-type name, `ecdsa-sha2-<identifier>`.
    pub fn ssh_signature_name(&self) -> String {
        format!("ecdsa-sha2-{}", self.ssh_id())
    }

    /// Resolve the `<curve>` suffix of an `ecdsa-sha2-<curve>` name.
    ///
    /// Accepts the RFC 5656 identifier as well as the common name of
    /// secp256k1.
    pub fn from_ssh_suffix(suffix: &str) -> Option<Self> {
        if suffix == "secp256k1" {
            return Some(EcCurve::Secp256k1);
        }
        Self::ALL.into_iter().find(|c| c.ssh_id() == suffix)
    }
}

impl fmt::Display for EcCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EcCurve::NistP256 => "nistp256",
            EcCurve::NistP384 => "nistp384",
            EcCurve::NistP521 => "nistp521",
            EcCurve::Secp256k1 => "secp256k1",
        };
        f.write_str(name)
    }
}
