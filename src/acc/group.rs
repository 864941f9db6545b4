use super::primitives::WIDE_DIGEST_LEN;
use crate::error::{Error, Result};
use core::{fmt::Debug, ops::Neg};
use curve25519_dalek::{
    ristretto::{CompressedRistretto, RistrettoPoint},
    traits::Identity,
};

/// A prime-order group usable as the domain of an elliptic-curve multiset hash.
pub trait PrimeOrderGroup: Copy + Debug + Eq + Send + Sync + Neg<Output = Self> {
    /// Byte length of the canonical encoding.
    const ENCODED_LEN: usize;

    fn identity() -> Self;

    fn add(&self, rhs: &Self) -> Self;

    fn sub(&self, rhs: &Self) -> Self {
        self.add(&-*rhs)
    }

    /// Deterministic map from 64 uniformly random bytes onto the group.
    fn from_uniform_bytes(bytes: &[u8; WIDE_DIGEST_LEN]) -> Self;

    fn to_bytes(&self) -> Vec<u8>;

    fn from_bytes(bytes: &[u8]) -> Result<Self>;
}

impl PrimeOrderGroup for RistrettoPoint {
    const ENCODED_LEN: usize = 32;

    fn identity() -> Self {
        <RistrettoPoint as Identity>::identity()
    }

    fn add(&self, rhs: &Self) -> Self {
        self + rhs
    }

    fn sub(&self, rhs: &Self) -> Self {
        self - rhs
    }

    fn from_uniform_bytes(bytes: &[u8; WIDE_DIGEST_LEN]) -> Self {
        RistrettoPoint::from_uniform_bytes(bytes)
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.compress().to_bytes().to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != Self::ENCODED_LEN {
            return Err(Error::MalformedState {
                expected: Self::ENCODED_LEN,
                actual: bytes.len(),
            });
        }
        CompressedRistretto::from_slice(bytes)
            .map_err(|e| Error::InvalidEncoding(e.to_string()))?
            .decompress()
            .ok_or_else(|| Error::InvalidEncoding("not a ristretto point".to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acc::primitives::sha512;

    #[test]
    fn test_identity_encoding() {
        let zero = <RistrettoPoint as PrimeOrderGroup>::identity();
        assert_eq!(zero.to_bytes(), vec![0u8; 32]);
        assert_eq!(
            <RistrettoPoint as PrimeOrderGroup>::from_bytes(&[0u8; 32]).unwrap(),
            zero
        );
    }

    #[test]
    fn test_add_sub_inverse() {
        let p = <RistrettoPoint as PrimeOrderGroup>::from_uniform_bytes(&sha512(b"apple"));
        let q = <RistrettoPoint as PrimeOrderGroup>::from_uniform_bytes(&sha512(b"kiwi"));
        let sum = PrimeOrderGroup::add(&p, &q);
        assert_eq!(PrimeOrderGroup::sub(&sum, &q), p);
        assert_eq!(PrimeOrderGroup::add(&q, &p), sum);
    }

    #[test]
    fn test_decode_rejects_invalid() {
        let res = <RistrettoPoint as PrimeOrderGroup>::from_bytes(&[0u8; 31]);
        assert_eq!(
            res,
            Err(Error::MalformedState {
                expected: 32,
                actual: 31
            })
        );
        // 0xff.. is not a canonical field element encoding
        assert!(matches!(
            <RistrettoPoint as PrimeOrderGroup>::from_bytes(&[0xffu8; 32]),
            Err(Error::InvalidEncoding(_))
        ));
    }

    #[test]
    fn test_roundtrip_bytes() {
        let p = <RistrettoPoint as PrimeOrderGroup>::from_uniform_bytes(&sha512(b"hello"));
        let bytes = PrimeOrderGroup::to_bytes(&p);
        assert_eq!(<RistrettoPoint as PrimeOrderGroup>::from_bytes(&bytes).unwrap(), p);
    }
}
