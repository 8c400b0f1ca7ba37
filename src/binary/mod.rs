//! The on-disk cache format: a tagged, length-prefixed binary layout with a
//! fixed magic/version header and a CRC32 footer for corruption detection.
//!
//! Trimmed from the teacher's `binary/` module down to the sections this
//! crate actually needs (postings, vocabulary, documents, via the
//! serialised [`PositionalIndex`]) — the WASM/brotli/section-streaming
//! machinery of the original has no counterpart here.

pub mod header;

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use header::{Footer, Header};

use crate::error::{Result, SearchError};
use crate::index::PositionalIndex;

/// Serialise `index` to JSON, wrap it in a header/footer, and write it to
/// `path`.
pub fn save(index: &PositionalIndex, path: &Path) -> Result<()> {
    let payload = serde_json::to_vec(index).map_err(|e| SearchError::InvalidJson(e.to_string()))?;
    let header = Header::new(payload.len() as u64);
    let footer = Footer::for_payload(&payload);

    let mut file = File::create(path)?;
    file.write_all(&header.to_bytes())?;
    file.write_all(&payload)?;
    file.write_all(&footer.to_bytes())?;
    Ok(())
}

/// Read, validate, and deserialise a cache written by [`save`].
pub fn load(path: &Path) -> Result<PositionalIndex> {
    let mut file = File::open(path)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;

    if bytes.len() < Header::SIZE + Footer::SIZE {
        return Err(SearchError::CorruptCache("file too short for header and footer".to_string()));
    }

    let header = Header::from_bytes(&bytes[..Header::SIZE])?;
    let payload_end = Header::SIZE + header.payload_len as usize;
    if bytes.len() != payload_end + Footer::SIZE {
        return Err(SearchError::CorruptCache("payload length does not match file size".to_string()));
    }

    let payload = &bytes[Header::SIZE..payload_end];
    let footer = Footer::from_bytes(&bytes[payload_end..])?;
    footer.verify(payload)?;

    serde_json::from_slice(payload).map_err(|e| SearchError::CorruptCache(format!("malformed payload: {e}")))
}
