//! Homomorphic accumulators.
//!
//! Three multiset constructions share the [`SetHash`] interface: an
//! elliptic-curve hash over Ristretto, the LtHash16 lattice hash and MuHash3072.
//! [`MatrixHash`] is order sensitive and exposes its own `insert`/`concat`.

pub mod ec;
pub mod group;
pub mod lattice;
pub mod matrix;
pub mod muhash;
pub mod num3072;
pub mod primitives;
pub mod serde_impl;
pub mod triangular;

pub use lattice::{LtHash, DEFAULT_LANES};
pub use matrix::{MatrixHash, Witness};
pub use muhash::MuHash;
pub use serde_impl::StateBytes;

use crate::error::Result;
use core::fmt;
use curve25519_dalek::ristretto::RistrettoPoint;

pub type RistrettoMultisetHash = ec::EcMultisetHash<RistrettoPoint>;

/// A hash of a multiset that can be updated incrementally.
///
/// All operations leave `self` untouched and return a new accumulator. Each
/// implementor also offers `*_mut` variants that update in place.
pub trait SetHash: Clone + PartialEq + fmt::Debug + Sized {
    type Output;

    /// Add every item of `items`, duplicates included.
    fn insert<I, T>(&self, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]> + Send;

    /// Remove every item of `items`. Removing an item that was never inserted
    /// is not detected.
    fn remove<I, T>(&self, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]> + Send;

    /// Hash of the multiset sum.
    fn union(&self, other: &Self) -> Result<Self>;

    /// Hash of the multiset difference.
    fn difference(&self, other: &Self) -> Result<Self>;

    fn digest(&self) -> Result<Self::Output>;
}
