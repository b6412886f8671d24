//! Record Reader
//!
//! Parses the one record that starts at a known offset.

use std::io::{Read, Seek, SeekFrom};

use tar::Archive;

use crate::error::{Result, StoreError};

/// A record read back from the archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub name: String,
    pub payload: Vec<u8>,
}

/// Seek to `offset` and parse exactly one record there.
///
/// Returns `Ok(None)` when the offset lands on the trailer or past the end
/// of the file. A payload that runs past the end of the file is a format
/// error, checked before any payload byte is buffered.
pub fn read_record_at<R: Read + Seek>(reader: &mut R, offset: u64) -> Result<Option<Record>> {
    let stream_len = reader.seek(SeekFrom::End(0))?;
    reader.seek(SeekFrom::Start(offset))?;

    // A fresh Archive counts positions from wherever the reader now sits
    let mut archive = Archive::new(reader);
    let mut entries = archive.entries().map_err(StoreError::from_archive)?;

    let mut entry = match entries.next() {
        Some(entry) => entry.map_err(StoreError::from_archive)?,
        None => return Ok(None),
    };

    let name = String::from_utf8_lossy(&entry.path_bytes()).into_owned();
    let size = entry.size();

    // Positions inside `archive` are relative to `offset`
    let data_end = offset
        .saturating_add(entry.raw_file_position())
        .saturating_add(size);
    if data_end > stream_len {
        return Err(StoreError::Format(format!(
            "record {:?} at offset {} truncated: payload ends at {}, file ends at {}",
            name, offset, data_end, stream_len
        )));
    }

    let mut payload = Vec::new();
    entry.read_to_end(&mut payload)?;

    if payload.len() as u64 != size {
        return Err(StoreError::Format(format!(
            "record {:?} at offset {} truncated: expected {} bytes, got {}",
            name,
            offset,
            size,
            payload.len()
        )));
    }

    Ok(Some(Record { name, payload }))
}
