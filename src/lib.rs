//! Incremental, set-homomorphic hash functions.
//!
//! Every construction maps raw items into an algebraic domain, combines the
//! images with the domain's group (or semigroup) operation and finally
//! serializes the running value into a fixed-size digest.
//!
//! Ref: https://cseweb.ucsd.edu/~mihir/papers/inc-hash.pdf

#![cfg_attr(not(test), warn(clippy::unwrap_used))]

#[macro_use]
extern crate tracing;

pub mod acc;
pub mod digest;
pub mod error;
pub mod utils;

pub use acc::{
    LtHash, MatrixHash, MuHash, RistrettoMultisetHash, SetHash, Witness, DEFAULT_LANES,
};
pub use digest::{Digest, Digestible, LaneDigest};
pub use error::{Error, Result};
