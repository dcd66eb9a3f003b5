//! Key-file error types.

use thiserror::Error;

use crate::key::KeyError;
use crate::pem::PemError;
use crate::wire::WireError;

/// Errors that can occur while decoding an OpenSSH private-key
/// container.
#[derive(Debug, Error)]
pub enum KeyFileError {
    /// PEM envelope problems.
    #[error(transparent)]
    Pem(#[from] PemError),

    /// Malformed wire data inside the container.
    #[error("malformed container: {0}")]
    Wire(#[from] WireError),

    /// The body does not start with the `openssh-key-v1` magic.
    #[error("magic not found")]
    MissingMagic,

    /// The magic is present but not at the beginning of the body.
    #[error("magic not at the beginning")]
    MisplacedMagic,

    /// Cipher name not in the descriptor table.
    #[error("unsupported cipher: {0}")]
    UnsupportedCipher(String),

    /// KDF name other than `none` or `bcrypt`.
    #[error("unsupported kdf: {0}")]
    UnsupportedKdf(String),

    /// The bcrypt options blob was not consumed exactly.
    #[error("unused data: {0} bytes left in kdf options")]
    UnusedKdfData(usize),

    /// Multi-key containers are out of scope.
    #[error("unsupported key count {0}, expected 1")]
    WrongKeyCount(u32),

    /// An encrypting cipher with KDF `none` (or the reverse) can never
    /// decrypt; rejected before any key derivation.
    #[error("cipher and kdf combination is invalid")]
    InvalidCipherKdf,

    #[error("kdf salt too long: {len} bytes, maximum {max}")]
    SaltTooLong { len: usize, max: usize },

    /// The derived-material ceiling is fixed; a descriptor asking for
    /// more is a resource error, not a truncation.
    #[error("derived key material too large: {needed} bytes, maximum {max}")]
    KeyMaterialTooLarge { needed: usize, max: usize },

    /// The container is encrypted but no passphrase was supplied.
    #[error("passphrase required")]
    PassphraseRequired,

    #[error("key derivation failed: {0}")]
    Kdf(String),

    #[error("cipher operation failed: {0}")]
    Cipher(String),

    /// The integrity words disagree: wrong passphrase or corrupted
    /// container, and the two cannot be told apart here.
    #[error("decrypt failed")]
    DecryptFailed,

    /// Algorithm name matched no registered decoder.
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The trailing pad must count 1, 2, 3, ...
    #[error("bad padding: expected {expected:#04x}, found {found:#04x}")]
    BadPadding { expected: u8, found: u8 },

    /// Decoded fields did not form a valid key.
    #[error(transparent)]
    Key(#[from] KeyError),
}
