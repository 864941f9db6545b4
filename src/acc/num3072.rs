//! Arithmetic in the multiplicative group modulo `2^3072 - 1103717`, the
//! largest 3072-bit safe prime.

use crate::error::{Error, Result};
use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Zero};
use once_cell::sync::Lazy;

pub const PRIME_DIFF: u32 = 1_103_717;
pub const NUM3072_BITS: usize = 3072;
pub const NUM3072_BYTES: usize = NUM3072_BITS / 8;

pub static PRIME: Lazy<BigUint> =
    Lazy::new(|| (BigUint::one() << NUM3072_BITS) - BigUint::from(PRIME_DIFF));

#[inline]
pub fn mul_mod(a: &BigUint, b: &BigUint) -> BigUint {
    (a * b) % &*PRIME
}

pub fn from_le_bytes(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_le(bytes)
}

/// Fixed-width little-endian encoding, zero padded to 384 bytes.
pub fn to_le_bytes(value: &BigUint) -> Result<[u8; NUM3072_BYTES]> {
    let bytes = value.to_bytes_le();
    if bytes.len() > NUM3072_BYTES {
        return Err(Error::InvalidEncoding(format!(
            "integer of {} bytes does not fit in {} bytes",
            bytes.len(),
            NUM3072_BYTES
        )));
    }
    let mut out = [0u8; NUM3072_BYTES];
    out[..bytes.len()].copy_from_slice(&bytes);
    Ok(out)
}

/// Decode a residue, rejecting values outside `[0, P)`.
pub fn residue_from_le_bytes(bytes: &[u8]) -> Result<BigUint> {
    if bytes.len() != NUM3072_BYTES {
        return Err(Error::MalformedState {
            expected: NUM3072_BYTES,
            actual: bytes.len(),
        });
    }
    let value = from_le_bytes(bytes);
    if value >= *PRIME {
        return Err(Error::InvalidEncoding(
            "residue not reduced modulo the prime".to_owned(),
        ));
    }
    Ok(value)
}

/// Inverse of `a` modulo `n` by the extended Euclidean algorithm.
///
/// Ref: https://en.wikipedia.org/wiki/Extended_Euclidean_algorithm#Modular_integers
pub fn mod_inverse(a: &BigUint, n: &BigUint) -> Result<BigUint> {
    let n_int = BigInt::from_biguint(Sign::Plus, n.clone());
    let (mut t, mut new_t) = (BigInt::zero(), BigInt::one());
    let (mut r, mut new_r) = (n_int.clone(), BigInt::from_biguint(Sign::Plus, a % n));

    while !new_r.is_zero() {
        let q = &r / &new_r;
        let next_t = &t - &q * &new_t;
        t = core::mem::replace(&mut new_t, next_t);
        let next_r = &r - &q * &new_r;
        r = core::mem::replace(&mut new_r, next_r);
    }

    if r > BigInt::one() {
        debug!("gcd with the modulus is not one, no inverse exists");
        return Err(Error::NonInvertible);
    }
    t.mod_floor(&n_int)
        .to_biguint()
        .ok_or(Error::NonInvertible)
}

#[inline]
pub fn inverse(a: &BigUint) -> Result<BigUint> {
    mod_inverse(a, &PRIME)
}
