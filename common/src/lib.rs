//! Pieces of the word count cluster shared by every process: the cluster
//! configuration value object, the error kinds that cross component
//! boundaries, and the hash used to shard words across reducers.

pub mod config;
pub mod error;

use std::collections::HashMap;

pub use config::Config;
pub use error::{JobError, TaskKind};

/// Word occurrence counts accumulated by a single map or reduce task.
///
/// Every task builds its own mapping; tasks only ever share data through
/// the intermediate files on disk.
pub type WordCount = HashMap<String, u64>;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// 32-bit FNV-1a over the UTF-8 bytes of a key.
pub fn fnv1a_32(bytes: &[u8]) -> u32 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u32::from(*byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Compute the reducer shard responsible for a word.
///
/// Every mapper must agree on this assignment: partial counts for a word
/// can only be merged if the word lands in the same shard no matter which
/// mapper counted it.
pub fn shard_for(word: &str, num_shards: usize) -> usize {
    fnv1a_32(word.as_bytes()) as usize % num_shards
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fnv1a_matches_known_vectors() {
        assert_eq!(fnv1a_32(b""), 0x811c_9dc5);
        assert_eq!(fnv1a_32(b"a"), 0xe40c_292c);
        assert_eq!(fnv1a_32(b"hello"), 0x4f9f_2cab);
    }

    #[test]
    fn shard_assignment_is_pure() {
        for word in ["hello", "world", "a", "zürich"] {
            for num_shards in 1..8 {
                let shard = shard_for(word, num_shards);
                assert_eq!(shard, shard_for(word, num_shards));
                assert!(shard < num_shards);
            }
        }
    }
}
