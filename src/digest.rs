//! handles hash digests: the 32-byte outputs of the fixed-size constructions
//! and the wide lane-array output of the lattice construction

use core::fmt;
use serde::{
    de::{Deserializer, SeqAccess, Visitor},
    ser::Serializer,
    Deserialize, Serialize,
};
use sha2::{Digest as _, Sha256};

pub const DIGEST_LEN: usize = 32;

#[derive(Clone, Copy, Eq, PartialEq, Hash, Default)]
pub struct Digest(pub [u8; DIGEST_LEN]);

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}

impl Digest {
    #[inline]
    pub fn as_bytes(&self) -> &'_ [u8] {
        &self.0
    }

    pub fn zero() -> Self {
        Self([0; DIGEST_LEN])
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    /// Copy of the digest with its byte order reversed.
    ///
    /// Some implementations print 256-bit values big-endian, this is what
    /// their test vectors are written against.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let mut out = self.0;
        out.reverse();
        Self(out)
    }

    pub fn from_hex(input: &str) -> Result<Self, hex::FromHexError> {
        let mut out = Self::default();
        hex::decode_to_slice(input, &mut out.0)?;
        Ok(out)
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; DIGEST_LEN]> for Digest {
    fn from(input: [u8; DIGEST_LEN]) -> Self {
        Self(input)
    }
}

fn serialize_hex_or_bytes<S: Serializer>(bytes: &[u8], s: S) -> Result<S::Ok, S::Error> {
    if s.is_human_readable() {
        s.serialize_str(&hex::encode(bytes))
    } else {
        s.serialize_bytes(bytes)
    }
}

fn deserialize_hex_or_bytes<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
    use serde::de::Error as DeError;

    struct ByteBufVisitor;

    impl<'de> Visitor<'de> for ByteBufVisitor {
        type Value = Vec<u8>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a hex string or a byte array")
        }

        fn visit_str<E: DeError>(self, value: &str) -> Result<Vec<u8>, E> {
            hex::decode(value).map_err(E::custom)
        }

        fn visit_bytes<E: DeError>(self, v: &[u8]) -> Result<Vec<u8>, E> {
            Ok(v.to_vec())
        }

        fn visit_seq<V: SeqAccess<'de>>(self, mut seq: V) -> Result<Vec<u8>, V::Error> {
            let mut out = Vec::with_capacity(seq.size_hint().unwrap_or(0));
            while let Some(b) = seq.next_element()? {
                out.push(b);
            }
            Ok(out)
        }
    }

    if d.is_human_readable() {
        d.deserialize_str(ByteBufVisitor)
    } else {
        d.deserialize_bytes(ByteBufVisitor)
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        serialize_hex_or_bytes(&self.0, s)
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let data = deserialize_hex_or_bytes(d)?;
        if data.len() != DIGEST_LEN {
            return Err(<D::Error as serde::de::Error>::invalid_length(
                data.len(),
                &"32 bytes",
            ));
        }
        let mut out = Self::default();
        out.0.copy_from_slice(&data);
        Ok(out)
    }
}

/// Output of the lattice construction: the raw little-endian lane array.
#[derive(
    Clone, Eq, PartialEq, Hash, Default, derive_more::Deref, derive_more::From, derive_more::Into,
)]
pub struct LaneDigest(Vec<u8>);

impl fmt::Display for LaneDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}

impl fmt::Debug for LaneDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LaneDigest({} bytes)", self.0.len())
    }
}

impl AsRef<[u8]> for LaneDigest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for LaneDigest {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        serialize_hex_or_bytes(&self.0, s)
    }
}

impl<'de> Deserialize<'de> for LaneDigest {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        deserialize_hex_or_bytes(d).map(Self)
    }
}

pub trait Digestible {
    /// SHA-256 of the value's byte representation.
    fn to_digest(&self) -> Digest;
}

impl Digestible for [u8] {
    fn to_digest(&self) -> Digest {
        Digest(Sha256::digest(self).into())
    }
}

impl Digestible for str {
    fn to_digest(&self) -> Digest {
        self.as_bytes().to_digest()
    }
}

impl Digestible for String {
    fn to_digest(&self) -> Digest {
        self.as_bytes().to_digest()
    }
}
