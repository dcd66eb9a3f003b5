//! Decoding of OpenSSH private-key containers and multi-format ECDSA
//! signature verification.
//!
//! The [`openssh`] module parses the `openssh-key-v1` binary container
//! (optionally aes256 encrypted under the bcrypt KDF) into typed
//! private keys for Ed25519, RSA, and the four supported ECDSA curves.
//! The [`verify`] module checks ECDSA signatures delivered as DER,
//! fixed-width raw, Ethereum, or SSH wire encodings against a
//! precomputed digest.
//!
//! Key material stays inside zeroizing containers throughout; see
//! [`secure`].

pub mod key;
pub mod openssh;
pub mod pem;
pub mod secure;
pub mod verify;
pub mod wire;

pub use key::{
    EcCurve, EcPublicKey, EcdsaPrivateKey, Ed25519PrivateKey, KeyAlgorithm, KeyError, PrivateKey,
    RsaPrivateKey,
};
pub use openssh::{
    decode_pem_private_key, decode_private_key, decrypt_private_section, DecodedKey, KeyFileError,
};
pub use pem::{decode_pem, PemError};
pub use secure::{ExposeSecret, SecretBytes};
pub use verify::{verify_signature, SignatureFormat, VerifyError};
pub use wire::{WireError, WireReader};
