//! Store Module
//!
//! The indexed key-value store layered over a single tar archive.
//!
//! ## Responsibilities
//! - Build the key index with one scan when the archive is opened
//! - Serve reads by seeking straight to the indexed record
//! - Append writes at the end-of-data cursor and re-index the key
//! - Serialize every operation behind one lock

use std::fs::File;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::archive::{self, RecordAppender};
use crate::config::{Config, SyncStrategy};
use crate::error::{Result, StoreError};
use crate::index::KeyIndex;

/// A key-value store backed by one tar archive
///
/// ## Concurrency Model: One Operation At A Time
///
/// Every public method takes `inner` for its whole duration, so reads,
/// writes and lookups never interleave. Both file handles share the lock
/// with the index because a read moves the reader's cursor and a write
/// moves the end-of-data cursor.
///
/// Two stores over the same file are not coordinated in any way.
pub struct Store {
    /// Archive path, fixed for the life of the store
    path: PathBuf,

    /// Store configuration
    config: Config,

    /// Handles, index and cursor
    inner: Mutex<StoreInner>,
}

/// Mutable state, only touched with the lock held
struct StoreInner {
    /// Read-only handle, opened with the store
    reader: File,

    /// Read/write handle, opened by the first write
    writer: Option<RecordAppender>,

    /// Key → offset of the key's newest record
    index: KeyIndex,

    /// First byte past the last valid record (the trailer starts here)
    end_of_data: u64,

    /// Writes not yet covered by an fsync
    writes_since_sync: usize,
}

impl Store {
    /// Open or create a store with the given config
    ///
    /// On startup:
    /// 1. Create an empty archive file if none exists
    /// 2. Scan every record once, indexing name → offset
    /// 3. Remember where the last record ends as the append point
    pub fn open_with(config: Config) -> Result<Self> {
        let path = config.path.clone();

        // Step 1: Create the file if it doesn't exist
        if !path.exists() {
            tracing::debug!("Creating empty archive at {}", path.display());
            File::create(&path)?;
        }

        // Step 2: Scan the archive and build the index
        let mut reader = File::open(&path)?;
        let records = archive::scan_records(&mut reader)?;

        let mut index = KeyIndex::new();
        let mut end_of_data = 0;
        let record_count = records.len();

        for record in records {
            tracing::debug!(
                "Loading {} ({} bytes) at offset {}",
                record.name,
                record.size,
                record.offset
            );
            if let Some(previous) = index.insert(record.name.clone(), record.offset) {
                tracing::warn!(
                    "Superseding previous version of {} at offset {} with offset {}",
                    record.name,
                    previous,
                    record.offset
                );
            }
            end_of_data = record.end;
        }

        tracing::info!(
            "Opened {}: {} records, {} keys, end of data at {}",
            path.display(),
            record_count,
            index.len(),
            end_of_data
        );

        Ok(Self {
            path,
            config,
            inner: Mutex::new(StoreInner {
                reader,
                writer: None,
                index,
                end_of_data,
                writes_since_sync: 0,
            }),
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified archive path
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let config = Config::builder().path(path.as_ref()).build();
        Self::open_with(config)
    }

    /// Check whether a key is indexed (no I/O)
    pub fn exists(&self, key: &str) -> bool {
        self.inner.lock().index.contains(key)
    }

    /// All indexed keys, in no particular order
    pub fn keys(&self) -> Vec<String> {
        self.inner.lock().index.keys()
    }

    /// Read the payload of a key's newest record
    ///
    /// Returns:
    /// - `Ok(payload)` — the record was found at its indexed offset
    /// - `Ok(vec![])` — the offset points at or past the end of the archive
    /// - `Err(NotFound)` — the key is not indexed
    pub fn read(&self, key: &str) -> Result<Vec<u8>> {
        let mut inner = self.inner.lock();

        let offset = inner
            .index
            .get(key)
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;

        match archive::read_record_at(&mut inner.reader, offset)? {
            Some(record) => {
                if record.name != key {
                    tracing::warn!(
                        "Record at offset {} is named {}, expected {}",
                        offset,
                        record.name,
                        key
                    );
                }
                Ok(record.payload)
            }
            None => {
                tracing::warn!(
                    "No record for {} at offset {}: index is ahead of the archive",
                    key,
                    offset
                );
                Ok(Vec::new())
            }
        }
    }

    /// Store a payload under a key
    ///
    /// Steps:
    /// 1. Validate the key
    /// 2. Open the writer on first use
    /// 3. Append the record (plus trailer) at the end-of-data cursor
    /// 4. Sync if the strategy asks for it
    /// 5. Point the key at the new record and advance the cursor
    ///
    /// Writing an existing key is allowed; the older record stays in the
    /// archive but is no longer reachable.
    pub fn write(&self, key: &str, payload: &[u8]) -> Result<()> {
        archive::validate_name(key)?;

        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        // Step 2: The writer is created once and reused afterwards
        let writer = match inner.writer.take() {
            Some(writer) => writer,
            None => {
                tracing::debug!("Opening writer for {}", self.path.display());
                RecordAppender::open(&self.path)?
            }
        };
        let writer = inner.writer.insert(writer);

        // Step 3: Append at the cursor, overwriting the old trailer
        let offset = inner.end_of_data;
        let end = writer.append(offset, key, payload, self.config.file_mode)?;

        // Step 4: Durability
        let pending = inner.writes_since_sync + 1;
        let sync_now = match self.config.sync_strategy {
            SyncStrategy::EveryWrite => true,
            SyncStrategy::EveryNWrites { count } => pending >= count.max(1),
            SyncStrategy::OnClose => false,
        };
        if sync_now {
            writer.sync()?;
            inner.writes_since_sync = 0;
        } else {
            inner.writes_since_sync = pending;
        }

        // Step 5: Only now does the record become visible
        if let Some(previous) = inner.index.insert(key, offset) {
            tracing::debug!(
                "Superseding {} at offset {} with offset {}",
                key,
                previous,
                offset
            );
        }
        inner.end_of_data = end;

        tracing::trace!("Wrote {} ({} bytes) at offset {}", key, payload.len(), offset);
        Ok(())
    }

    /// Close the store
    ///
    /// Syncs any written records and releases both file handles
    pub fn close(self) -> Result<()> {
        let inner = self.inner.into_inner();

        if let Some(writer) = &inner.writer {
            writer.sync()?;
        }

        tracing::debug!(
            "Closed {} ({} keys, end of data at {})",
            self.path.display(),
            inner.index.len(),
            inner.end_of_data
        );
        Ok(())
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Get the archive path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the number of indexed keys
    pub fn len(&self) -> usize {
        self.inner.lock().index.len()
    }

    /// Check whether no keys are indexed
    pub fn is_empty(&self) -> bool {
        self.inner.lock().index.is_empty()
    }

    /// Get the append point (offset just past the last valid record)
    pub fn end_of_data(&self) -> u64 {
        self.inner.lock().end_of_data
    }
}
