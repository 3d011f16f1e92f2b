//! Archive file header and checksum domain.
//!
//! Header layout (100 bytes, packed, little-endian):
//!
//! | Offset | Size | Field        |
//! |--------|------|--------------|
//! | 0      | 4    | magic        |
//! | 4      | 2    | version      |
//! | 6      | 4    | record_count |
//! | 10     | 64   | hash         |
//! | 74     | 26   | reserved     |
//!
//! The hash is the lowercase hex SHA-256 of the record bytes that follow the
//! header. The header itself is never part of the digest.

use sha2::{Digest, Sha256};

use crate::record::RECORD_SIZE;
use crate::util::{read_array, read_u16_le, read_u32_le, write_bytes};

/// `"PMET"` when viewed as little-endian bytes.
pub const FILE_MAGIC: u32 = 0x5445_4D50;
/// Highest format version this build reads and the version it writes.
pub const FORMAT_VERSION: u16 = 4;
pub const HEADER_SIZE: usize = 100;

const HASH_LEN: usize = 64;

const OFF_MAGIC: usize = 0;
const OFF_VERSION: usize = 4;
const OFF_COUNT: usize = 6;
const OFF_HASH: usize = 10;
const OFF_RESERVED: usize = OFF_HASH + HASH_LEN;

const _: () = assert!(OFF_RESERVED + 26 == HEADER_SIZE);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEnvelope {
    pub magic: u32,
    pub version: u16,
    pub record_count: u32,
    hash: [u8; HASH_LEN],
}

impl FileEnvelope {
    /// Build the header for a concatenation of encoded records.
    ///
    /// `record_bytes.len()` must be a multiple of [`RECORD_SIZE`].
    pub fn build(record_bytes: &[u8]) -> Self {
        debug_assert_eq!(record_bytes.len() % RECORD_SIZE, 0);
        Self::with_hash(
            (record_bytes.len() / RECORD_SIZE) as u32,
            &sha256_hex(record_bytes),
        )
    }

    /// Header for `record_count` records with a precomputed digest.
    pub fn with_hash(record_count: u32, hash_hex: &str) -> Self {
        let mut hash = [0u8; HASH_LEN];
        let len = hash_hex.len().min(HASH_LEN);
        hash[..len].copy_from_slice(&hash_hex.as_bytes()[..len]);
        Self {
            magic: FILE_MAGIC,
            version: FORMAT_VERSION,
            record_count,
            hash,
        }
    }

    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut buf = [0u8; HEADER_SIZE];
        write_bytes(&mut buf, OFF_MAGIC, &self.magic.to_le_bytes());
        write_bytes(&mut buf, OFF_VERSION, &self.version.to_le_bytes());
        write_bytes(&mut buf, OFF_COUNT, &self.record_count.to_le_bytes());
        write_bytes(&mut buf, OFF_HASH, &self.hash);
        buf
    }

    /// Parse a header image. Reserved bytes are ignored.
    pub fn from_bytes(buf: &[u8; HEADER_SIZE]) -> Self {
        Self {
            magic: read_u32_le(buf, OFF_MAGIC),
            version: read_u16_le(buf, OFF_VERSION),
            record_count: read_u32_le(buf, OFF_COUNT),
            hash: read_array(buf, OFF_HASH),
        }
    }

    /// The stored digest, up to the first zero byte.
    pub fn stored_hash(&self) -> String {
        let end = self.hash.iter().position(|&b| b == 0).unwrap_or(HASH_LEN);
        String::from_utf8_lossy(&self.hash[..end]).into_owned()
    }
}

/// Lowercase hex SHA-256 of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

#[cfg(test)]
#[path = "tests/envelope_tests.rs"]
mod tests;
