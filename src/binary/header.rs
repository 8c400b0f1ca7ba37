//! Fixed-width header and footer framing for the cache file.
//!
//! Layout: `[MAGIC: 4 bytes][VERSION: u16][payload_len: u64]` followed by
//! the payload, then `[FOOTER_MAGIC: 4 bytes][crc32: u32]`.

use crate::error::{Result, SearchError};

const MAGIC: &[u8; 4] = b"IRC1";
const FOOTER_MAGIC: &[u8; 4] = b"IRCF";
const VERSION: u16 = 1;

/// Upper bound on a single cache payload, guarding against a corrupt
/// length prefix driving an unbounded allocation on load.
const MAX_PAYLOAD_LEN: u64 = 1024 * 1024 * 1024;

pub struct Header {
    pub payload_len: u64,
}

impl Header {
    pub const SIZE: usize = 4 + 2 + 8;

    pub fn new(payload_len: u64) -> Self {
        Header { payload_len }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::SIZE);
        out.extend_from_slice(MAGIC);
        out.extend_from_slice(&VERSION.to_le_bytes());
        out.extend_from_slice(&self.payload_len.to_le_bytes());
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < Self::SIZE {
            return Err(SearchError::CorruptCache("header truncated".to_string()));
        }
        if &bytes[0..4] != MAGIC {
            return Err(SearchError::CorruptCache("bad magic".to_string()));
        }
        let version = u16::from_le_bytes([bytes[4], bytes[5]]);
        if version != VERSION {
            return Err(SearchError::CorruptCache(format!("unsupported cache version {version}")));
        }
        let payload_len = u64::from_le_bytes(bytes[6..14].try_into().unwrap());
        if payload_len > MAX_PAYLOAD_LEN {
            return Err(SearchError::CorruptCache(format!("payload length {payload_len} exceeds limit")));
        }
        Ok(Header { payload_len })
    }
}

pub struct Footer {
    pub crc32: u32,
}

impl Footer {
    pub const SIZE: usize = 4 + 4;

    pub fn for_payload(payload: &[u8]) -> Self {
        Footer { crc32: crc32fast::hash(payload) }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::SIZE);
        out.extend_from_slice(FOOTER_MAGIC);
        out.extend_from_slice(&self.crc32.to_le_bytes());
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < Self::SIZE {
            return Err(SearchError::CorruptCache("footer truncated".to_string()));
        }
        if &bytes[0..4] != FOOTER_MAGIC {
            return Err(SearchError::CorruptCache("bad footer magic".to_string()));
        }
        let crc32 = u32::from_le_bytes(bytes[4..8].try_into().unwrap());
        Ok(Footer { crc32 })
    }

    pub fn verify(&self, payload: &[u8]) -> Result<()> {
        let actual = crc32fast::hash(payload);
        if actual != self.crc32 {
            return Err(SearchError::CorruptCache(format!(
                "CRC mismatch: expected {}, computed {actual}",
                self.crc32
            )));
        }
        Ok(())
    }
}
