//! MuHash3072: a multiset hash in the multiplicative group modulo a 3072-bit
//! safe prime.
//!
//! The accumulator keeps a fraction so that removal is a multiplication of the
//! denominator. Modular inverses are only computed by `difference` and when
//! the digest is taken.
//!
//! Ref: https://cseweb.ucsd.edu/~mihir/papers/inc-hash.pdf

use super::{
    num3072::{self, mul_mod, NUM3072_BYTES},
    primitives::{self, Hash256, StreamExpand},
    SetHash,
};
use crate::{
    digest::Digest,
    error::{Error, Result},
};
use core::fmt;
use num_bigint::BigUint;
use num_traits::One;
use rayon::prelude::*;

/// Product of the domain images of `items`, reduced modulo the prime.
pub(crate) fn cal_acc_product<I, T>(items: I, hash256: Hash256, expand: StreamExpand) -> BigUint
where
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]> + Send,
{
    let items: Vec<T> = items.into_iter().collect();
    trace!("expanding {} items into 3072-bit integers", items.len());
    items
        .into_par_iter()
        .map(|item| {
            let mut buf = [0u8; NUM3072_BYTES];
            expand(&hash256(item.as_ref()), &mut buf);
            num3072::from_le_bytes(&buf)
        })
        .reduce(BigUint::one, |a, b| mul_mod(&a, &b))
}

#[derive(Clone)]
pub struct MuHash {
    numerator: BigUint,
    denominator: BigUint,
    hash256: Hash256,
    expand: StreamExpand,
}

impl MuHash {
    pub fn new() -> Self {
        Self::with_hashers(primitives::sha256, primitives::chacha20_keystream)
    }

    /// `hash256` compresses the item, `expand` stretches it to 3072 bits.
    pub fn with_hashers(hash256: Hash256, expand: StreamExpand) -> Self {
        Self {
            numerator: BigUint::one(),
            denominator: BigUint::one(),
            hash256,
            expand,
        }
    }

    pub fn numerator(&self) -> &BigUint {
        &self.numerator
    }

    pub fn denominator(&self) -> &BigUint {
        &self.denominator
    }

    pub fn is_normalized(&self) -> bool {
        self.denominator.is_one()
    }

    /// Equivalent accumulator with denominator one.
    pub fn normalized(&self) -> Result<Self> {
        if self.is_normalized() {
            return Ok(self.clone());
        }
        debug!("normalizing muhash accumulator");
        let inv = num3072::inverse(&self.denominator)?;
        Ok(Self {
            numerator: mul_mod(&self.numerator, &inv),
            denominator: BigUint::one(),
            hash256: self.hash256,
            expand: self.expand,
        })
    }

    pub fn normalize_mut(&mut self) -> Result<()> {
        *self = self.normalized()?;
        Ok(())
    }

    pub fn insert_mut<I, T>(&mut self, items: I)
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]> + Send,
    {
        let product = cal_acc_product(items, self.hash256, self.expand);
        self.numerator = mul_mod(&self.numerator, &product);
    }

    pub fn remove_mut<I, T>(&mut self, items: I)
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]> + Send,
    {
        let product = cal_acc_product(items, self.hash256, self.expand);
        self.denominator = mul_mod(&self.denominator, &product);
    }

    pub fn union_mut(&mut self, other: &Self) {
        self.numerator = mul_mod(&self.numerator, &other.numerator);
        self.denominator = mul_mod(&self.denominator, &other.denominator);
    }

    /// Divides by `other`: the numerator takes the inverse of `other`'s
    /// denominator, the denominator takes `other`'s numerator. The result
    /// represents `self / other` only when `other` is normalized.
    pub fn difference_mut(&mut self, other: &Self) -> Result<()> {
        let inv = num3072::inverse(&other.denominator)?;
        self.numerator = mul_mod(&self.numerator, &inv);
        self.denominator = mul_mod(&self.denominator, &other.numerator);
        Ok(())
    }

    /// numerator || denominator, each a 384-byte little-endian residue.
    pub fn to_state_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(2 * NUM3072_BYTES);
        out.extend_from_slice(&num3072::to_le_bytes(&self.numerator)?);
        out.extend_from_slice(&num3072::to_le_bytes(&self.denominator)?);
        Ok(out)
    }

    pub fn from_state_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != 2 * NUM3072_BYTES {
            return Err(Error::MalformedState {
                expected: 2 * NUM3072_BYTES,
                actual: bytes.len(),
            });
        }
        let (num, den) = bytes.split_at(NUM3072_BYTES);
        Ok(Self {
            numerator: num3072::residue_from_le_bytes(num)?,
            denominator: num3072::residue_from_le_bytes(den)?,
            ..Self::new()
        })
    }
}

impl Default for MuHash {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MuHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MuHash")
            .field("normalized", &self.is_normalized())
            .field("numerator_bits", &self.numerator.bits())
            .field("denominator_bits", &self.denominator.bits())
            .finish()
    }
}

/// Normalized accumulators compare by numerator, all others structurally.
/// Call [`MuHash::normalized`] first to compare the represented values.
impl PartialEq for MuHash {
    fn eq(&self, other: &Self) -> bool {
        if self.is_normalized() && other.is_normalized() {
            self.numerator == other.numerator
        } else {
            self.numerator == other.numerator && self.denominator == other.denominator
        }
    }
}

impl Eq for MuHash {}

impl SetHash for MuHash {
    type Output = Digest;

    fn insert<I, T>(&self, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]> + Send,
    {
        let mut out = self.clone();
        out.insert_mut(items);
        out
    }

    fn remove<I, T>(&self, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]> + Send,
    {
        let mut out = self.clone();
        out.remove_mut(items);
        out
    }

    fn union(&self, other: &Self) -> Result<Self> {
        let mut out = self.clone();
        out.union_mut(other);
        Ok(out)
    }

    fn difference(&self, other: &Self) -> Result<Self> {
        let mut out = self.clone();
        out.difference_mut(other)?;
        Ok(out)
    }

    fn digest(&self) -> Result<Digest> {
        let value = self.normalized()?.numerator;
        let bytes = num3072::to_le_bytes(&value)?;
        Ok((self.hash256)(&bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::Zero;

    fn acc() -> MuHash {
        MuHash::default()
    }

    #[test]
    fn test_basic() {
        let hash = acc()
            .insert(["apple"])
            .insert(["banana"])
            .insert(["kiwi"])
            .remove(["banana"]);
        let hash_bis = acc().insert(["apple"]).insert(["kiwi"]);

        assert_ne!(hash, hash_bis);
        assert_eq!(hash.normalized().unwrap(), hash_bis);
        assert_eq!(hash.digest().unwrap(), hash_bis.digest().unwrap());
        assert_eq!(hash.digest().unwrap().as_bytes().len(), 32);
    }

    #[test]
    fn test_union() {
        let left = acc().insert(["hello"]);
        let right = acc().insert(["world", "lucas"]);

        assert_eq!(
            left.union(&right).unwrap(),
            acc().insert(["hello", "world", "lucas"])
        );
        assert_ne!(left.union(&right).unwrap(), acc().insert(["world", "lucas"]));
        assert_eq!(left.union(&right).unwrap(), right.union(&left).unwrap());
    }

    #[test]
    fn test_difference() {
        let left = acc().insert(["hello", "world", "lucas"]);
        let right = acc().insert(["world", "lucas"]);

        assert_eq!(
            left.difference(&right).unwrap().normalized().unwrap(),
            acc().insert(["hello"])
        );
        assert_ne!(
            left.difference(&right).unwrap().normalized().unwrap(),
            acc().insert(["hello", "world", "lucas"])
        );
    }

    #[test]
    fn test_difference_unnormalized_operands() {
        let a = acc().insert(["a", "b", "c"]).remove(["d"]);
        let b = acc().insert(["e"]).remove(["f", "g"]);
        let res = a
            .union(&b)
            .unwrap()
            .difference(&b.normalized().unwrap())
            .unwrap();
        assert_eq!(res.normalized().unwrap(), a.normalized().unwrap());
        assert_eq!(res.digest().unwrap(), a.digest().unwrap());
    }

    // Mirrors the MuHash3072 unit test of Bitcoin Core.
    #[test]
    fn test_interoperability() {
        let mut one = [0u8; 32];
        one[0] = 1;
        let mut two = [0u8; 32];
        two[0] = 2;
        let hash = acc().insert([[0u8; 32]]).insert([one]).remove([two]);
        assert_eq!(
            hash.digest().unwrap().reversed().to_string(),
            "10d312b100cbd32ada024a6646e40d3482fcff103668d2625f10002a607d5863"
        );
    }

    #[test]
    fn test_immutable() {
        let left = acc().insert(["hello"]);
        let right = acc().insert(["world", "lucas"]);
        let all = acc().insert(["hello", "world", "lucas"]);

        assert_eq!(left.union(&right).unwrap(), all);
        assert_ne!(left, all);
        assert_eq!(left, acc().insert(["hello"]));
    }

    #[test]
    fn test_inverse_law() {
        let h = acc().insert(["x"]).remove(["x"]);
        assert!(!h.is_normalized());
        assert_eq!(h.normalized().unwrap(), acc());
        assert_eq!(h.digest().unwrap(), acc().digest().unwrap());
    }

    #[test]
    fn test_difference_unnormalized_right() {
        let left = acc().insert(["apple", "banana"]);
        let right = acc().insert(["banana"]).remove(["kiwi"]);
        let res = left.difference(&right).unwrap();
        assert_eq!(
            res.digest().unwrap().to_string(),
            "a137e95a4c96281e796f8e5bc9b4080feca84fa03f5fdae52e131bafe126acbf"
        );
        assert_eq!(
            res.digest().unwrap(),
            acc().insert(["apple"]).remove(["kiwi"]).digest().unwrap()
        );
    }

    #[test]
    fn test_difference_zero_denominator() {
        let mut right = acc().insert(["banana"]);
        right.denominator = BigUint::zero();
        let left = acc().insert(["apple"]);
        assert_eq!(left.difference(&right), Err(Error::NonInvertible));
        let mut res = left.clone();
        assert_eq!(res.difference_mut(&right), Err(Error::NonInvertible));
        assert_eq!(res, left);
    }

    #[test]
    fn test_zero_denominator() {
        let mut h = acc();
        h.denominator = BigUint::zero();
        assert_eq!(h.normalized(), Err(Error::NonInvertible));
        assert_eq!(h.digest(), Err(Error::NonInvertible));
    }

    #[test]
    fn test_state_bytes() {
        let h = acc().insert(["hello"]).remove(["world"]);
        let bytes = h.to_state_bytes().unwrap();
        assert_eq!(bytes.len(), 768);
        let restored = MuHash::from_state_bytes(&bytes).unwrap();
        assert_eq!(restored, h);
        assert!(MuHash::from_state_bytes(&bytes[..700]).is_err());
    }

    #[test]
    fn test_custom_hashers() {
        let h = MuHash::with_hashers(primitives::blake2b_256, primitives::chacha20_keystream)
            .insert(["hello"]);
        assert_ne!(h, acc().insert(["hello"]));
        assert_eq!(
            h.digest().unwrap(),
            primitives::blake2b_256(&num3072::to_le_bytes(h.numerator()).unwrap())
        );
    }
}
