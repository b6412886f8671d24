//! Record Appender
//!
//! Writes records into the archive through a dedicated read/write handle.

use std::fs::{File, OpenOptions};
use std::io::{Seek, SeekFrom};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use tar::{Builder, EntryType, Header};

use crate::error::Result;

use super::TRAILER_SIZE;

/// Appends records to an existing archive file
pub struct RecordAppender {
    /// Read/write handle, separate from the store's read handle
    file: File,
}

impl RecordAppender {
    /// Open the archive for writing (the file must already exist)
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new().read(true).write(true).open(path)?;
        Ok(Self { file })
    }

    /// Write one record starting at `offset`, followed by a fresh trailer.
    ///
    /// Whatever was at `offset` (normally the old trailer) is overwritten.
    /// Returns the offset just past the new record, which is where the
    /// trailer now begins and where the next record belongs.
    pub fn append(&mut self, offset: u64, name: &str, payload: &[u8], mode: u32) -> Result<u64> {
        self.file.seek(SeekFrom::Start(offset))?;

        let mut header = Header::new_gnu();
        header.set_entry_type(EntryType::Regular);
        header.set_size(payload.len() as u64);
        header.set_mode(mode);
        header.set_mtime(unix_now());

        // Builder emits a GNU long-name header first when the name needs it
        let mut builder = Builder::new(&mut self.file);
        builder.append_data(&mut header, name, payload)?;
        builder.into_inner()?;

        let end = self.file.stream_position()? - TRAILER_SIZE;
        Ok(end)
    }

    /// Flush appended records to disk
    pub fn sync(&self) -> Result<()> {
        self.file.sync_data()?;
        Ok(())
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
