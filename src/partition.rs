use log::trace;

use crate::digest::{Md5Digest, PositionDigest};

/// Maps `key` onto one of `partition_count` fixed partitions.
///
/// This is plain modulo hashing, kept as a baseline to compare the ring
/// against: changing `partition_count` remaps almost every key.
///
/// The MD5 digest is read as a big-endian integer and rounded to the nearest
/// `f64` before taking the remainder, so results agree with implementations
/// that parse the hex digest into a double. Returns `None` for zero partitions.
pub fn simple_partition(partition_count: u64, key: &str) -> Option<u64> {
    if partition_count == 0 {
        return None;
    }
    let value = u128::from_be_bytes(Md5Digest::digest(key.as_bytes())) as f64;
    let partition = (value % partition_count as f64) as u64;
    trace!("Partition: {} -> {} of {}", key, partition, partition_count);
    Some(partition)
}
