//! # tarkv
//!
//! An append-only key-value store kept inside a single tar archive:
//! - One forward scan at open time builds a key → offset index
//! - Reads seek straight to a record and parse only that record
//! - Writes append a record and rewrite the end-of-archive trailer
//! - One mutex serializes every operation on a store
//!
//! The archive stays readable by any tar tool. Overwritten keys leave their
//! old records in place as duplicate entries.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Store                               │
//! │         (Mutex: reader, writer, index, end_of_data)         │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌──────────────────────────┐
//!   │  KeyIndex   │          │         archive          │
//!   │ key → offset│          │ scan / read_at / append  │
//!   └─────────────┘          └────────────┬─────────────┘
//!                                         │
//!                                         ▼
//!                                 ┌──────────────┐
//!                                 │  store.tar   │
//!                                 └──────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod archive;
pub mod index;
pub mod keygen;
pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, StoreError};
pub use config::{Config, SyncStrategy};
pub use store::Store;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of tarkv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
