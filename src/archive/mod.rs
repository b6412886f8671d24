//! Archive Module
//!
//! Thin record-level layer over the `tar` crate.
//!
//! ## Responsibilities
//! - Walk an archive once and report where every record starts and ends
//! - Parse the single record found at an arbitrary offset
//! - Append a record at a given offset and re-terminate the archive
//!
//! ## File Layout
//! ```text
//! ┌─────────────────────────────────────────┐ ← record start (indexed offset)
//! │ [GNU long-name header + name blocks]    │   only for names > 100 bytes
//! │ Header (512)                            │
//! │ Payload (size, padded to 512)           │
//! ├─────────────────────────────────────────┤
//! │ ... more records ...                    │
//! ├─────────────────────────────────────────┤ ← end_of_data (append point)
//! │ Trailer: 2 x 512 zero blocks            │
//! └─────────────────────────────────────────┘
//! ```

mod appender;
mod name;
mod reader;
mod scanner;

pub use appender::RecordAppender;
pub use name::validate_name;
pub use reader::{read_record_at, Record};
pub use scanner::scan_records;

// =============================================================================
// Shared Constants
// =============================================================================

/// Tar block size; headers and payloads are aligned to it
pub const BLOCK_SIZE: u64 = 512;

/// End-of-archive marker: two zero blocks
pub const TRAILER_SIZE: u64 = 2 * BLOCK_SIZE;

/// Round a payload length up to the next block boundary
pub fn padded_size(size: u64) -> u64 {
    size.div_ceil(BLOCK_SIZE) * BLOCK_SIZE
}

/// Location of one record, as observed while scanning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordMeta {
    /// Record name (the store key)
    pub name: String,

    /// Payload length in bytes (unpadded)
    pub size: u64,

    /// Offset of the first header block belonging to this record
    pub offset: u64,

    /// Offset just past the padded payload
    pub end: u64,
}
