//! Serde support for accumulators: hex strings for human readable formats,
//! raw bytes otherwise.
//!
//! Only the algebraic state is persisted. Restored accumulators use the default
//! hashing strategies.

use super::{ec::EcMultisetHash, group::PrimeOrderGroup, LtHash, MatrixHash, MuHash};
use crate::error::Result;
use core::marker::PhantomData;
use serde::{
    de::{Deserializer, Visitor},
    ser::Serializer,
    Deserialize, Serialize,
};

/// Canonical byte encoding of an accumulator's running value.
pub trait StateBytes: Sized {
    fn encode_state(&self) -> Result<Vec<u8>>;

    fn decode_state(bytes: &[u8]) -> Result<Self>;
}

impl<G: PrimeOrderGroup> StateBytes for EcMultisetHash<G> {
    fn encode_state(&self) -> Result<Vec<u8>> {
        Ok(self.to_state_bytes())
    }

    fn decode_state(bytes: &[u8]) -> Result<Self> {
        Self::from_state_bytes(bytes)
    }
}

impl StateBytes for LtHash {
    fn encode_state(&self) -> Result<Vec<u8>> {
        Ok(self.to_state_bytes())
    }

    fn decode_state(bytes: &[u8]) -> Result<Self> {
        Self::from_state_bytes(bytes)
    }
}

impl StateBytes for MuHash {
    fn encode_state(&self) -> Result<Vec<u8>> {
        self.to_state_bytes()
    }

    fn decode_state(bytes: &[u8]) -> Result<Self> {
        Self::from_state_bytes(bytes)
    }
}

impl StateBytes for MatrixHash {
    fn encode_state(&self) -> Result<Vec<u8>> {
        Ok(self.to_state_bytes())
    }

    fn decode_state(bytes: &[u8]) -> Result<Self> {
        Self::from_state_bytes(bytes)
    }
}

pub fn serialize<S: Serializer, T: StateBytes>(t: &T, s: S) -> Result<S::Ok, S::Error> {
    let buf = t
        .encode_state()
        .map_err(<S::Error as serde::ser::Error>::custom)?;
    if s.is_human_readable() {
        s.serialize_str(&hex::encode(&buf))
    } else {
        s.serialize_bytes(&buf)
    }
}

pub fn deserialize<'de, D: Deserializer<'de>, T: StateBytes>(d: D) -> Result<T, D::Error> {
    use core::fmt;
    use serde::de::Error as DeError;

    struct HexVisitor<T>(PhantomData<T>);

    impl<'de, T: StateBytes> Visitor<'de> for HexVisitor<T> {
        type Value = T;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("hex encoded accumulator state")
        }

        fn visit_str<E: DeError>(self, value: &str) -> Result<T, E> {
            let data = hex::decode(value).map_err(E::custom)?;
            T::decode_state(&data[..]).map_err(E::custom)
        }
    }

    struct BytesVisitor<T>(PhantomData<T>);

    impl<'de, T: StateBytes> Visitor<'de> for BytesVisitor<T> {
        type Value = T;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("accumulator state bytes")
        }

        fn visit_bytes<E: DeError>(self, v: &[u8]) -> Result<T, E> {
            T::decode_state(v).map_err(E::custom)
        }
    }

    if d.is_human_readable() {
        d.deserialize_str(HexVisitor(PhantomData))
    } else {
        d.deserialize_bytes(BytesVisitor(PhantomData))
    }
}

macro_rules! impl_serde_via_state {
    ($($ty: ty),*) => {
        $(
            impl Serialize for $ty {
                fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
                    serialize(self, s)
                }
            }

            impl<'de> Deserialize<'de> for $ty {
                fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
                    deserialize(d)
                }
            }
        )*
    };
}

impl_serde_via_state!(LtHash, MuHash, MatrixHash);

impl<G: PrimeOrderGroup> Serialize for EcMultisetHash<G> {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        serialize(self, s)
    }
}

impl<'de, G: PrimeOrderGroup> Deserialize<'de> for EcMultisetHash<G> {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        deserialize(d)
    }
}
