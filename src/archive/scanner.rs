//! Archive Scanner
//!
//! Single forward pass over an archive, used to build the key index.

use std::io::{Read, Seek, SeekFrom};

use tar::Archive;

use crate::error::{Result, StoreError};

use super::{padded_size, RecordMeta};

/// Walk every record from the reader's current position to the trailer.
///
/// Offsets are relative to where the reader started. Extension headers
/// (GNU long names, pax) are folded into the record that follows them, so a
/// record's `offset` is the end of the previous record rather than the
/// position of its main header.
///
/// Stops cleanly at the trailer or at end of file; any other failure is
/// returned. Payloads are skipped with seeks rather than read, so a record
/// whose payload runs past the end of the stream is rejected explicitly.
pub fn scan_records<R: Read + Seek>(mut reader: R) -> Result<Vec<RecordMeta>> {
    let start = reader.stream_position()?;
    let stream_len = reader.seek(SeekFrom::End(0))?.saturating_sub(start);
    reader.seek(SeekFrom::Start(start))?;

    let mut archive = Archive::new(reader);
    let entries = archive
        .entries_with_seek()
        .map_err(StoreError::from_archive)?;

    let mut records = Vec::new();
    let mut next_offset = 0u64;

    for entry in entries {
        let entry = entry.map_err(StoreError::from_archive)?;

        let name = String::from_utf8_lossy(&entry.path_bytes()).into_owned();
        let size = entry.size();
        let data_end = entry.raw_file_position().saturating_add(size);
        if data_end > stream_len {
            return Err(StoreError::Format(format!(
                "record {:?} at offset {} truncated: payload ends at {}, stream ends at {}",
                name, next_offset, data_end, stream_len
            )));
        }
        let end = entry.raw_file_position() + padded_size(size);

        records.push(RecordMeta {
            name,
            size,
            offset: next_offset,
            end,
        });
        next_offset = end;
    }

    Ok(records)
}
