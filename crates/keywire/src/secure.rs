//! Secret wrapper utilities for consistent secret handling
//!
//! Type aliases and helpers around the `secrecy` crate for decrypted
//! key sections and other sensitive byte buffers.

use secrecy::SecretBox;

pub use secrecy::ExposeSecret;

/// A secret byte buffer that is zeroized on drop.
///
/// Decrypted private-key sections and derived key material travel in
/// this type so that the backing storage is erased when the value goes
/// out of scope, on success and error paths alike.
pub type SecretBytes = SecretBox<Vec<u8>>;

/// Wrap an owned byte buffer as a [`SecretBytes`].
pub fn secret_bytes(bytes: Vec<u8>) -> SecretBytes {
    SecretBox::new(Box::new(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_bytes() {
        let secret = secret_bytes(vec![1, 2, 3]);
        assert_eq!(secret.expose_secret(), &vec![1, 2, 3]);
    }

    #[test]
    fn test_debug_is_redacted() {
        let secret = secret_bytes(vec![0xAB; 4]);
        let debug = format!("{:?}", secret);
        assert!(!debug.contains("171"));
        assert!(!debug.contains("AB"));
    }
}
