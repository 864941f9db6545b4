//! LtHash16: a vector of independent 16-bit lanes.
//!
//! Ref: https://eprint.iacr.org/2019/227.pdf

use super::{
    primitives::{self, Xof},
    SetHash,
};
use crate::{
    digest::LaneDigest,
    error::{Error, Result},
};
use core::fmt;
use itertools::Itertools;
use rayon::prelude::*;

/// Number of lanes; 1024 lanes of 16 bits give a 2048-byte digest.
pub const DEFAULT_LANES: usize = 1024;
pub const LANE_BYTES: usize = 2;

const DEBUG_PREFIX_LEN: usize = 16;

#[inline]
fn add_lanes(acc: &mut [u16], rhs: &[u16]) {
    acc.iter_mut()
        .zip_eq(rhs)
        .for_each(|(x, y)| *x = x.wrapping_add(*y));
}

#[inline]
fn sub_lanes(acc: &mut [u16], rhs: &[u16]) {
    acc.iter_mut()
        .zip_eq(rhs)
        .for_each(|(x, y)| *x = x.wrapping_sub(*y));
}

fn lanes_from_le_bytes(bytes: &[u8]) -> Vec<u16> {
    bytes
        .chunks_exact(LANE_BYTES)
        .map(|c| u16::from_le_bytes([c[0], c[1]]))
        .collect()
}

/// Expand every item with the XOF and sum the resulting lane vectors.
pub(crate) fn cal_acc_lanes<I, T>(items: I, lanes: usize, xof: Xof) -> Vec<u16>
where
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]> + Send,
{
    let items: Vec<T> = items.into_iter().collect();
    trace!("expanding {} items into {} lanes", items.len(), lanes);
    items
        .into_par_iter()
        .map(|item| {
            let mut buf = vec![0u8; lanes * LANE_BYTES];
            xof(item.as_ref(), &mut buf);
            lanes_from_le_bytes(&buf)
        })
        .reduce(
            || vec![0u16; lanes],
            |mut a, b| {
                add_lanes(&mut a, &b);
                a
            },
        )
}

#[derive(Clone)]
pub struct LtHash {
    lanes: Vec<u16>,
    xof: Xof,
}

impl LtHash {
    pub fn new() -> Self {
        Self::with_params(DEFAULT_LANES, primitives::shake128)
    }

    pub fn with_params(lanes: usize, xof: Xof) -> Self {
        Self {
            lanes: vec![0; lanes],
            xof,
        }
    }

    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    pub fn lanes(&self) -> &[u16] {
        &self.lanes
    }

    fn check_lanes(&self, other: &Self) -> Result<()> {
        if self.lane_count() == other.lane_count() {
            Ok(())
        } else {
            warn!(
                "refusing to combine lattice accumulators with {} and {} lanes",
                self.lane_count(),
                other.lane_count()
            );
            Err(Error::LaneCountMismatch {
                left: self.lane_count(),
                right: other.lane_count(),
            })
        }
    }

    pub fn insert_mut<I, T>(&mut self, items: I)
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]> + Send,
    {
        let sum = cal_acc_lanes(items, self.lane_count(), self.xof);
        add_lanes(&mut self.lanes, &sum);
    }

    pub fn remove_mut<I, T>(&mut self, items: I)
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]> + Send,
    {
        let sum = cal_acc_lanes(items, self.lane_count(), self.xof);
        sub_lanes(&mut self.lanes, &sum);
    }

    pub fn union_mut(&mut self, other: &Self) -> Result<()> {
        self.check_lanes(other)?;
        add_lanes(&mut self.lanes, &other.lanes);
        Ok(())
    }

    pub fn difference_mut(&mut self, other: &Self) -> Result<()> {
        self.check_lanes(other)?;
        sub_lanes(&mut self.lanes, &other.lanes);
        Ok(())
    }

    /// Little-endian serialization of all lanes.
    pub fn to_state_bytes(&self) -> Vec<u8> {
        self.lanes.iter().flat_map(|l| l.to_le_bytes()).collect()
    }

    /// Accepts any even-length buffer; the lane count follows from its length.
    pub fn from_state_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() % LANE_BYTES != 0 {
            return Err(Error::InvalidEncoding(format!(
                "lane array of odd length {}",
                bytes.len()
            )));
        }
        Ok(Self {
            lanes: lanes_from_le_bytes(bytes),
            xof: primitives::shake128,
        })
    }
}

impl Default for LtHash {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LtHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.to_state_bytes();
        f.debug_struct("LtHash")
            .field("lanes", &self.lane_count())
            .field("prefix", &hex::encode(&state[..state.len().min(DEBUG_PREFIX_LEN)]))
            .field("fingerprint", &primitives::sha256(&state))
            .finish()
    }
}

/// Byte-exact comparison of the lane arrays; timing is not a concern here.
impl PartialEq for LtHash {
    fn eq(&self, other: &Self) -> bool {
        self.lanes == other.lanes
    }
}

impl Eq for LtHash {}

impl SetHash for LtHash {
    type Output = LaneDigest;

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
        out.union_mut(other)?;
        Ok(out)
    }

    fn difference(&self, other: &Self) -> Result<Self> {
        let mut out = self.clone();
        out.difference_mut(other)?;
        Ok(out)
    }

    fn digest(&self) -> Result<LaneDigest> {
        Ok(self.to_state_bytes().into())
    }
}
