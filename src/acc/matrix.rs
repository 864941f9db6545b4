//! Order-sensitive hash built from products of upper-triangular matrices.
//!
//! Every item becomes a singular unit-upper-triangular matrix and the
//! accumulator is the running product. Matrix multiplication is associative but
//! not commutative, so the digest commits to the insertion order: this is a
//! streaming commitment, not a multiset hash, and there is no removal.

use super::{
    primitives::{self, Hash256},
    triangular::UpperTriangular,
};
use crate::{
    digest::{Digest, DIGEST_LEN},
    error::Result,
};
use core::fmt;
use rayon::prelude::*;

/// Off-diagonal entries filled from an item hash and emitted by the digest.
pub const DEFAULT_SIZE: usize = DIGEST_LEN;

/// The singular matrix an item is mapped to.
#[inline]
fn item_matrix(hash256: Hash256, item: &[u8]) -> UpperTriangular {
    UpperTriangular::from_off_diagonal(hash256(item).as_bytes(), true)
}

#[derive(Clone)]
pub struct MatrixHash {
    accumulator: UpperTriangular,
    hash256: Hash256,
}

impl MatrixHash {
    pub fn new() -> Self {
        Self::with_hasher(primitives::sha256)
    }

    pub fn with_hasher(hash256: Hash256) -> Self {
        Self {
            accumulator: UpperTriangular::from_off_diagonal(&[0; DEFAULT_SIZE], false),
            hash256,
        }
    }

    pub fn order(&self) -> usize {
        self.accumulator.order()
    }

    /// Multiply the accumulator on the right by each item's matrix, in order.
    pub fn insert_mut<I, T>(&mut self, items: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]> + Send,
    {
        let items: Vec<T> = items.into_iter().collect();
        trace!("building {} item matrices", items.len());
        let hash256 = self.hash256;
        let matrices: Vec<UpperTriangular> = items
            .into_par_iter()
            .map(|item| item_matrix(hash256, item.as_ref()))
            .collect();
        for m in &matrices {
            self.accumulator = self.accumulator.mul(m)?;
        }
        Ok(())
    }

    pub fn concat_mut(&mut self, other: &Self) -> Result<()> {
        self.accumulator = self.accumulator.mul(&other.accumulator)?;
        Ok(())
    }

    pub fn insert<I, T>(&self, items: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]> + Send,
    {
        let mut out = self.clone();
        out.insert_mut(items)?;
        Ok(out)
    }

    /// `self * other`. Order matters: `a.concat(b) != b.concat(a)` in general.
    pub fn concat(&self, other: &Self) -> Result<Self> {
        let mut out = self.clone();
        out.concat_mut(other)?;
        Ok(out)
    }

    /// The first [`DEFAULT_SIZE`] off-diagonal entries of the accumulator.
    pub fn digest(&self) -> Digest {
        let mut out = Digest::zero();
        out.0
            .iter_mut()
            .zip(self.accumulator.off_diagonal())
            .for_each(|(o, v)| *o = v);
        out
    }

    /// The compressed column-major triangle, diagonal included.
    pub fn to_state_bytes(&self) -> Vec<u8> {
        self.accumulator.entries().to_vec()
    }

    pub fn from_state_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Self {
            accumulator: UpperTriangular::from_entries(bytes.to_vec())?,
            hash256: primitives::sha256,
        })
    }
}

impl Default for MatrixHash {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MatrixHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatrixHash")
            .field("order", &self.order())
            .field("entries", &hex::encode(self.accumulator.entries()))
            .finish()
    }
}

impl PartialEq for MatrixHash {
    fn eq(&self, other: &Self) -> bool {
        self.accumulator == other.accumulator
    }
}

impl Eq for MatrixHash {}

/// Evidence that `item` sits between the `left` prefix and the `right` suffix
/// of a committed sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Witness {
    pub left: MatrixHash,
    pub item: Vec<u8>,
    pub right: MatrixHash,
}

impl Witness {
    pub fn new(left: MatrixHash, item: impl Into<Vec<u8>>, right: MatrixHash) -> Self {
        Self {
            left,
            item: item.into(),
            right,
        }
    }

    /// Digest of `left * H(item) * right`.
    pub fn root(&self) -> Result<Digest> {
        Ok(self
            .left
            .insert([&self.item])?
            .concat(&self.right)?
            .digest())
    }

    pub fn verify(&self, root: &Digest) -> Result<bool> {
        let computed = self.root()?;
        if computed != *root {
            debug!("witness root mismatch: {} != {}", computed, root);
        }
        Ok(computed == *root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn acc() -> MatrixHash {
        MatrixHash::default()
    }

    #[test]
    fn test_default_is_identity() {
        let id = acc();
        assert_eq!(id.order(), 9);
        assert_eq!(id.digest(), Digest::zero());
        let h = acc().insert(["hello"]).unwrap();
        assert_eq!(id.concat(&h).unwrap(), h);
        assert_eq!(h.concat(&id).unwrap(), h);
    }

    #[test]
    fn test_basic() {
        let hash = acc().insert(["apple", "banana", "kiwi"]).unwrap();
        assert_eq!(
            hash.digest().to_string(),
            "0894a59c39f6b3ec3ad17d4f121644e20775d254912e00d496bb6be00cf02362"
        );
        let step = acc()
            .insert(["apple"])
            .unwrap()
            .insert(["banana"])
            .unwrap()
            .insert(["kiwi"])
            .unwrap();
        assert_eq!(step, hash);
    }

    #[test]
    fn test_concat() {
        let left = acc().insert(["hello"]).unwrap();
        let right = acc().insert(["world", "lucas"]).unwrap();

        assert_eq!(
            left.concat(&right).unwrap(),
            acc().insert(["hello", "world", "lucas"]).unwrap()
        );
        assert_ne!(
            left.concat(&right).unwrap(),
            acc().insert(["world", "lucas"]).unwrap()
        );
        assert_ne!(left.concat(&right).unwrap(), right.concat(&left).unwrap());
    }

    #[test]
    fn test_interoperability() {
        let hash = acc().insert(["hello"]).unwrap().insert(["world"]).unwrap();
        assert_eq!(
            hash.digest().to_string(),
            "7490f1de60815b8db68009c957fbe27eaee09818dd71c4d11ed63288b77820cb"
        );
    }

    #[test]
    fn test_order_sensitive() {
        let ab = acc().insert(["a", "b"]).unwrap();
        let ba = acc().insert(["b", "a"]).unwrap();
        assert_ne!(ab.digest(), ba.digest());
        // the same item always commutes with itself
        let aa = acc().insert(["a"]).unwrap();
        assert_eq!(aa.concat(&aa).unwrap(), acc().insert(["a", "a"]).unwrap());
    }

    #[test]
    fn test_witness() {
        let left = acc().insert(["hello", "world"]).unwrap();
        let value = "prove me wrong";
        let right = acc().insert(["lucas"]).unwrap();
        let root = acc()
            .insert(["hello", "world", value, "lucas"])
            .unwrap()
            .digest();

        let w = Witness::new(left.clone(), value, right.clone());
        assert_eq!(w.root().unwrap(), root);
        assert!(w.verify(&root).unwrap());

        let forged = Witness::new(left, "prove me right", right);
        assert!(!forged.verify(&root).unwrap());
        let swapped = Witness::new(w.right.clone(), value, w.left.clone());
        assert!(!swapped.verify(&root).unwrap());
    }

    #[test]
    fn test_order_mismatch() {
        let small = MatrixHash::from_state_bytes(&[1, 0, 1]).unwrap();
        assert_eq!(small.order(), 2);
        assert_eq!(
            acc().concat(&small),
            Err(Error::MatrixOrderMismatch { left: 9, right: 2 })
        );
        assert!(small.insert(["x"]).is_err());
        assert!(MatrixHash::from_state_bytes(&[0; 5]).is_err());
    }

    #[test]
    fn test_state_bytes() {
        let h = acc().insert(["hello"]).unwrap();
        let bytes = h.to_state_bytes();
        assert_eq!(bytes.len(), 45);
        assert_eq!(MatrixHash::from_state_bytes(&bytes).unwrap(), h);
    }

    #[test]
    fn test_custom_hasher() {
        let h = MatrixHash::with_hasher(primitives::blake2b_256)
            .insert(["hello"])
            .unwrap();
        assert_ne!(h, acc().insert(["hello"]).unwrap());
        assert_eq!(h.order(), 9);
    }
}
