//! Hash, XOF and stream-cipher collaborators consumed by the constructions.
//!
//! They are plain function pointers so that each accumulator can be configured
//! with an alternative primitive without changing its type.

use crate::digest::{Digest, Digestible, DIGEST_LEN};
use chacha20::{
    cipher::{KeyIvInit, StreamCipher},
    ChaCha20, Key, Nonce,
};
use sha2::{Digest as _, Sha512};
use sha3::{
    digest::{ExtendableOutput, Update, XofReader},
    Shake128,
};

pub const WIDE_DIGEST_LEN: usize = 64;
pub const CHACHA_NONCE_LEN: usize = 12;

/// A 256-bit hash function.
pub type Hash256 = fn(&[u8]) -> Digest;

/// A 512-bit hash function.
pub type Hash512 = fn(&[u8]) -> [u8; WIDE_DIGEST_LEN];

/// An extendable-output function writing `out.len()` bytes.
pub type Xof = fn(&[u8], &mut [u8]);

/// Fills `out` with a keystream derived from a 32-byte key.
pub type StreamExpand = fn(&Digest, &mut [u8]);

pub fn sha256(data: &[u8]) -> Digest {
    data.to_digest()
}

pub fn sha512(data: &[u8]) -> [u8; WIDE_DIGEST_LEN] {
    let hash = Sha512::digest(data);
    let mut out = [0u8; WIDE_DIGEST_LEN];
    out.copy_from_slice(&hash[..]);
    out
}

pub fn blake2b_256(data: &[u8]) -> Digest {
    let hash = blake2b_simd::Params::new()
        .hash_length(DIGEST_LEN)
        .hash(data);
    let mut out = Digest::default();
    out.0.copy_from_slice(hash.as_bytes());
    out
}

pub fn shake128(data: &[u8], out: &mut [u8]) {
    let mut hasher = Shake128::default();
    hasher.update(data);
    hasher.finalize_xof().read(out);
}

/// ChaCha20 (RFC 8439) keystream with an all-zero nonce and the block counter
/// starting at zero, i.e. the encryption of an all-zero buffer.
pub fn chacha20_keystream(key: &Digest, out: &mut [u8]) {
    out.iter_mut().for_each(|b| *b = 0);
    let nonce = [0u8; CHACHA_NONCE_LEN];
    let mut cipher = ChaCha20::new(Key::from_slice(key.as_bytes()), Nonce::from_slice(&nonce));
    cipher.apply_keystream(out);
}
