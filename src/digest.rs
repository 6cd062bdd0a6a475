use std::fmt;

use md5::{Digest, Md5};
use murmurhash3::murmurhash3_x64_128;

/// A 128-bit digest rendered as lowercase hex.
///
/// All keys have the same width, so lexicographic order on the string is the
/// same as numeric order on the digest.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PositionKey(String);

impl PositionKey {
    pub fn from_digest(bytes: [u8; 16]) -> Self {
        PositionKey(hex::encode(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PositionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub trait PositionDigest {
    fn digest(input: &[u8]) -> [u8; 16];

    fn position(input: &str) -> PositionKey {
        PositionKey::from_digest(Self::digest(input.as_bytes()))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Md5Digest;

impl PositionDigest for Md5Digest {
    fn digest(input: &[u8]) -> [u8; 16] {
        let mut out = [0u8; 16];
        out.copy_from_slice(&Md5::digest(input));
        out
    }
}

/// MurmurHash3 x64/128 with seed 0. Not compatible with MD5 rings.
#[derive(Debug, Clone, Copy, Default)]
pub struct Murmur3Digest;

impl PositionDigest for Murmur3Digest {
    fn digest(input: &[u8]) -> [u8; 16] {
        let (h1, h2) = murmurhash3_x64_128(input, 0);
        let mut out = [0u8; 16];
        out[..8].copy_from_slice(&h1.to_be_bytes());
        out[8..].copy_from_slice(&h2.to_be_bytes());
        out
    }
}
