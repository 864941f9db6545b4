//! Upper-triangular matrices over Z/256, stored compressed in column-major
//! order: column `j` contributes the `j + 1` entries `(0, j), (1, j), .., (j, j)`.

use crate::error::{Error, Result};
use rayon::prelude::*;

/// Smallest order `n` whose triangle holds `u` entries.
///
/// With `diagonal` the triangle includes the diagonal (`n(n+1)/2 >= u`),
/// otherwise only the strictly upper part counts (`n(n-1)/2 >= u`, `n >= 1`).
pub fn size(u: usize, diagonal: bool) -> usize {
    if diagonal {
        (0..).find(|n| n * (n + 1) / 2 >= u).unwrap_or_default()
    } else {
        (1..).find(|n| n * (n - 1) / 2 >= u).unwrap_or_default()
    }
}

/// Number of compressed entries of an order `n` matrix.
#[inline]
pub fn entry_count(n: usize) -> usize {
    n * (n + 1) / 2
}

/// Compressed index of entry `(row, col)`, `row <= col`.
#[inline]
pub fn index(row: usize, col: usize) -> usize {
    col * (col + 1) / 2 + row
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UpperTriangular {
    order: usize,
    entries: Vec<u8>,
}

impl UpperTriangular {
    pub fn order(&self) -> usize {
        self.order
    }

    pub fn entries(&self) -> &[u8] {
        &self.entries
    }

    /// Fill the strictly upper entries from `input` (zero padded) and set the
    /// diagonal to one. A `singular` matrix has its middle diagonal entry
    /// (index `n / 2`) set to zero instead.
    pub fn from_off_diagonal(input: &[u8], singular: bool) -> Self {
        let order = size(input.len(), false);
        let mut input = input.iter().copied();
        let mut entries = Vec::with_capacity(entry_count(order));
        for j in 0..order {
            for i in 0..=j {
                if i == j {
                    entries.push(if singular && i == order / 2 { 0 } else { 1 });
                } else {
                    entries.push(input.next().unwrap_or(0));
                }
            }
        }
        Self { order, entries }
    }

    /// Accepts any compressed array whose length is a triangular number.
    pub fn from_entries(entries: Vec<u8>) -> Result<Self> {
        let order = size(entries.len(), true);
        if entry_count(order) != entries.len() {
            return Err(Error::MalformedState {
                expected: entry_count(order),
                actual: entries.len(),
            });
        }
        Ok(Self { order, entries })
    }

    /// The strictly upper entries in storage order.
    pub fn off_diagonal(&self) -> impl Iterator<Item = u8> + '_ {
        (0..self.order)
            .flat_map(move |j| (0..j).map(move |i| self.entries[index(i, j)]))
    }

    /// Matrix product `self * rhs` modulo 256.
    pub fn mul(&self, rhs: &Self) -> Result<Self> {
        if self.order != rhs.order {
            warn!(
                "refusing to multiply matrices of order {} and {}",
                self.order, rhs.order
            );
            return Err(Error::MatrixOrderMismatch {
                left: self.order,
                right: rhs.order,
            });
        }
        let (a, b) = (&self.entries, &rhs.entries);
        let entries: Vec<u8> = (0..self.order)
            .into_par_iter()
            .flat_map_iter(|j| {
                (0..=j).map(move |i| {
                    (i..=j).fold(0u8, |sum, k| {
                        sum.wrapping_add(a[index(i, k)].wrapping_mul(b[index(k, j)]))
                    })
                })
            })
            .collect();
        Ok(Self {
            order: self.order,
            entries,
        })
    }
}
