use super::{
    group::PrimeOrderGroup,
    primitives::{self, Hash256, Hash512},
    SetHash,
};
use crate::{digest::Digest, error::Result};
use core::{
    fmt,
    ops::{Add, Sub},
};
use rayon::prelude::*;

#[inline]
pub(crate) fn cal_acc_point<G, I, T>(items: I, hash512: Hash512) -> G
where
    G: PrimeOrderGroup,
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]> + Send,
{
    let items: Vec<T> = items.into_iter().collect();
    trace!("mapping {} items onto the group", items.len());
    items
        .into_par_iter()
        .map(|item| G::from_uniform_bytes(&hash512(item.as_ref())))
        .fold(G::identity, |a, b| a.add(&b))
        .reduce(G::identity, |a, b| a.add(&b))
}

/// Multiset hash over a prime-order group: the running sum of the images of
/// every inserted item.
#[derive(Clone, Copy)]
pub struct EcMultisetHash<G: PrimeOrderGroup> {
    pub(crate) accumulator: G,
    hash512: Hash512,
    hash256: Hash256,
}

impl<G: PrimeOrderGroup> EcMultisetHash<G> {
    pub fn new() -> Self {
        Self::with_hashers(primitives::sha512, primitives::sha256)
    }

    /// `hash512` maps items to uniform bytes, `hash256` finalizes the digest.
    pub fn with_hashers(hash512: Hash512, hash256: Hash256) -> Self {
        Self {
            accumulator: G::identity(),
            hash512,
            hash256,
        }
    }

    pub fn from_point(accumulator: G) -> Self {
        Self {
            accumulator,
            ..Self::new()
        }
    }

    pub fn point(&self) -> &G {
        &self.accumulator
    }

    pub fn is_empty(&self) -> bool {
        self.accumulator == G::identity()
    }

    pub fn insert_mut<I, T>(&mut self, items: I)
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]> + Send,
    {
        let sum = cal_acc_point::<G, _, _>(items, self.hash512);
        self.accumulator = self.accumulator.add(&sum);
    }

    pub fn remove_mut<I, T>(&mut self, items: I)
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]> + Send,
    {
        let sum = cal_acc_point::<G, _, _>(items, self.hash512);
        self.accumulator = self.accumulator.sub(&sum);
    }

    pub fn union_mut(&mut self, other: &Self) {
        self.accumulator = self.accumulator.add(&other.accumulator);
    }

    pub fn difference_mut(&mut self, other: &Self) {
        self.accumulator = self.accumulator.sub(&other.accumulator);
    }

    /// Canonical encoding of the accumulated point.
    pub fn to_state_bytes(&self) -> Vec<u8> {
        self.accumulator.to_bytes()
    }

    pub fn from_state_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Self::from_point(G::from_bytes(bytes)?))
    }
}

impl<G: PrimeOrderGroup> Default for EcMultisetHash<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: PrimeOrderGroup> fmt::Debug for EcMultisetHash<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EcMultisetHash")
            .field("accumulator", &hex::encode(self.to_state_bytes()))
            .finish()
    }
}

/// Exact point equality.
impl<G: PrimeOrderGroup> PartialEq for EcMultisetHash<G> {
    fn eq(&self, other: &Self) -> bool {
        self.accumulator == other.accumulator
    }
}

impl<G: PrimeOrderGroup> Eq for EcMultisetHash<G> {}

impl<G: PrimeOrderGroup> Add for EcMultisetHash<G> {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self.union_mut(&rhs);
        self
    }
}

impl<G: PrimeOrderGroup> Sub for EcMultisetHash<G> {
    type Output = Self;

    fn sub(mut self, rhs: Self) -> Self {
        self.difference_mut(&rhs);
        self
    }
}

impl<G: PrimeOrderGroup> SetHash for EcMultisetHash<G> {
    type Output = Digest;

    fn insert<I, T>(&self, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]> + Send,
    {
        let mut out = *self;
        out.insert_mut(items);
        out
    }

    fn remove<I, T>(&self, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]> + Send,
    {
        let mut out = *self;
        out.remove_mut(items);
        out
    }

    fn union(&self, other: &Self) -> Result<Self> {
        Ok(*self + *other)
    }

    fn difference(&self, other: &Self) -> Result<Self> {
        Ok(*self - *other)
    }

    fn digest(&self) -> Result<Digest> {
        Ok((self.hash256)(&self.to_state_bytes()))
    }
}
