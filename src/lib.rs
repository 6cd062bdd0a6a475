//! Consistent hashing: map client keys onto a changing set of servers so
//! that membership changes only move the keys of the affected positions.

pub mod digest;
pub mod hash_ring;
pub mod log;
pub mod partition;
pub mod shared;

pub use digest::{Md5Digest, Murmur3Digest, PositionDigest, PositionKey};
pub use hash_ring::{HashRing, Node, Server, DEFAULT_REPLICAS};
pub use partition::simple_partition;
pub use shared::SharedHashRing;
