//! Configuration for tarkv
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Main configuration for a Store
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Path of the backing tar archive (created empty if missing)
    pub path: PathBuf,

    /// Sync strategy: how often to fsync appended records
    pub sync_strategy: SyncStrategy,

    // -------------------------------------------------------------------------
    // Record Metadata
    // -------------------------------------------------------------------------
    /// Permission bits stamped into every record header
    pub file_mode: u32,
}

/// Sync strategy for appended records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStrategy {
    /// fsync after every write (safest, slowest)
    EveryWrite,

    /// fsync after N writes
    EveryNWrites { count: usize },

    /// fsync only when the store is closed
    OnClose,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./store.tar"),
            sync_strategy: SyncStrategy::OnClose,
            file_mode: 0o600,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the archive path
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.path = path.into();
        self
    }

    /// Set the sync strategy
    pub fn sync_strategy(mut self, strategy: SyncStrategy) -> Self {
        self.config.sync_strategy = strategy;
        self
    }

    /// Set the mode bits written into record headers
    pub fn file_mode(mut self, mode: u32) -> Self {
        self.config.file_mode = mode;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
