//! Cursor-based reader for the SSH length-prefixed wire format (RFC 4251).
//!
//! Every compound structure in the OpenSSH key container and in
//! RFC 5656 signature blobs is built from three primitives: big-endian
//! `uint32`, length-prefixed byte strings, and `mpint` big integers.

use thiserror::Error;

/// Errors produced while reading SSH wire data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WireError {
    /// Input ended before a field could be read in full.
    #[error("truncated input: needed {needed} more bytes, {remaining} remaining")]
    Truncated { needed: usize, remaining: usize },

    /// An `mpint` with the sign bit set; negative values never occur in
    /// key material or signatures.
    #[error("negative mpint")]
    NegativeMpint,

    /// A sub-block was parsed but bytes were left over.
    #[error("unused data: {0} trailing bytes")]
    TrailingData(usize),
}

/// Reader over a borrowed byte slice.
///
/// Reads advance an internal cursor; all returned slices borrow from
/// the input, so sensitive buffers stay in one place and are erased
/// wherever the caller erases the backing storage.
pub struct WireReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Number of bytes consumed so far.
    pub fn consumed(&self) -> usize {
        self.pos
    }

    fn read_exact(&mut self, len: usize) -> Result<&'a [u8], WireError> {
        if self.remaining() < len {
            return Err(WireError::Truncated {
                needed: len - self.remaining(),
                remaining: self.remaining(),
            });
        }
        let out = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(out)
    }

    /// Read a big-endian `uint32`.
    pub fn read_u32(&mut self) -> Result<u32, WireError> {
        let b = self.read_exact(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Read a `string`: a `uint32` length followed by that many bytes.
    pub fn read_string(&mut self) -> Result<&'a [u8], WireError> {
        let len = self.read_u32()? as usize;
        self.read_exact(len)
    }

    /// Read an `mpint` and return its magnitude, big-endian with
    /// leading zeros stripped. The empty string decodes to zero.
    pub fn read_mpint(&mut self) -> Result<&'a [u8], WireError> {
        let raw = self.read_string()?;
        if let Some(&first) = raw.first() {
            if first & 0x80 != 0 {
                return Err(WireError::NegativeMpint);
            }
        }
        let start = raw.iter().position(|&b| b != 0).unwrap_or(raw.len());
        Ok(&raw[start..])
    }

    /// Consume and return everything left.
    pub fn take_rest(&mut self) -> &'a [u8] {
        let out = &self.buf[self.pos..];
        self.pos = self.buf.len();
        out
    }

    /// Succeeds only if the whole input has been consumed.
    pub fn finish(&self) -> Result<(), WireError> {
        if self.remaining() != 0 {
            return Err(WireError::TrailingData(self.remaining()));
        }
        Ok(())
    }
}
