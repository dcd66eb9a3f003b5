//! Builders for `openssh-key-v1` containers used across the
//! integration tests.

#![allow(dead_code)]

use cipher::block_padding::NoPadding;
use cipher::{BlockEncryptMut, KeyIvInit};

pub const MAGIC: &[u8] = b"openssh-key-v1\0";

pub fn put_u32(out: &mut Vec<u8>, v: u32) {
    out.extend_from_slice(&v.to_be_bytes());
}

pub fn put_str(out: &mut Vec<u8>, s: &[u8]) {
    put_u32(out, s.len() as u32);
    out.extend_from_slice(s);
}

pub fn put_mpint(out: &mut Vec<u8>, magnitude: &[u8]) {
    let needs_sign_byte = magnitude.first().is_some_and(|&b| b & 0x80 != 0);
    put_u32(out, (magnitude.len() + usize::from(needs_sign_byte)) as u32);
    if needs_sign_byte {
        out.push(0);
    }
    out.extend_from_slice(magnitude);
}

/// Assemble a complete container around an already-built private
/// section.
pub fn container(
    cipher: &str,
    kdf_name: &str,
    kdf_opts: &[u8],
    public_key: &[u8],
    section: &[u8],
) -> Vec<u8> {
    let mut out = MAGIC.to_vec();
    put_str(&mut out, cipher.as_bytes());
    put_str(&mut out, kdf_name.as_bytes());
    put_str(&mut out, kdf_opts);
    put_u32(&mut out, 1);
    put_str(&mut out, public_key);
    put_str(&mut out, section);
    out
}

pub fn bcrypt_opts(salt: &[u8], rounds: u32) -> Vec<u8> {
    let mut out = Vec::new();
    put_str(&mut out, salt);
    put_u32(&mut out, rounds);
    out
}

/// Build a private section: integrity pair, algorithm body, comment,
/// and 1, 2, 3, ... padding up to `block_len`.
pub fn private_section<F>(check: u32, body: F, comment: &str, block_len: usize) -> Vec<u8>
where
    F: FnOnce(&mut Vec<u8>),
{
    let mut out = Vec::new();
    put_u32(&mut out, check);
    put_u32(&mut out, check);
    body(&mut out);
    put_str(&mut out, comment.as_bytes());

    let mut pad = 1u8;
    while out.len() % block_len != 0 {
        out.push(pad);
        pad = pad.wrapping_add(1);
    }
    out
}

pub fn ed25519_body<'a>(public: &'a [u8; 32], seed: &'a [u8; 32]) -> impl FnOnce(&mut Vec<u8>) + 'a {
    move |out| {
        put_str(out, b"ssh-ed25519");
        put_str(out, public);
        let mut private = Vec::with_capacity(64);
        private.extend_from_slice(public);
        private.extend_from_slice(seed);
        put_str(out, &private);
    }
}

pub fn ecdsa_body<'a>(
    ssh_id: &'a str,
    point: &'a [u8],
    scalar: &'a [u8],
) -> impl FnOnce(&mut Vec<u8>) + 'a {
    move |out| {
        put_str(out, format!("ecdsa-sha2-{}", ssh_id).as_bytes());
        put_str(out, ssh_id.as_bytes());
        put_str(out, point);
        put_mpint(out, scalar);
    }
}

/// Encrypt a block-aligned section the way `ssh-keygen` would:
/// bcrypt_pbkdf for 48 bytes of material, AES-256-CBC over the body.
pub fn encrypt_section(section: &[u8], passphrase: &str, salt: &[u8], rounds: u32) -> Vec<u8> {
    let mut material = [0u8; 48];
    bcrypt_pbkdf::bcrypt_pbkdf(passphrase, salt, rounds, &mut material).expect("bcrypt_pbkdf");
    let (key, iv) = material.split_at(32);

    let mut buf = section.to_vec();
    let len = buf.len();
    cbc::Encryptor::<aes::Aes256>::new_from_slices(key, iv)
        .expect("cipher init")
        .encrypt_padded_mut::<NoPadding>(&mut buf, len)
        .expect("block-aligned section");
    buf
}
