//! Periodic buffer flushes and the final commit.

use log::debug;
use std::path::{Path, PathBuf};

use crate::Label;
use crate::store::{LabelStore, StoreResult, remove_if_exists, write_entries};

/// Owns the pending delta (labels assigned since the last flush) and decides when to persist.
///
/// Every `save_every` displayed images the delta overwrites the buffer file, then the full
/// store is checkpointed to the main file. A crash therefore loses fewer than `save_every`
/// iterations of labels; on restart the buffer is merged back idempotently.
pub struct Durability {
    main_path: PathBuf,
    buffer_path: PathBuf,
    save_every: u64,
    iteration: u64,
    flushes: u64,
    pending: LabelStore,
}

impl Durability {
    /// `save_every` below 1 is treated as 1.
    pub fn new(main_path: PathBuf, buffer_path: PathBuf, save_every: u32) -> Self {
        Self {
            main_path,
            buffer_path,
            save_every: u64::from(save_every.max(1)),
            iteration: 0,
            flushes: 0,
            pending: LabelStore::new(),
        }
    }

    pub fn main_path(&self) -> &Path {
        &self.main_path
    }

    pub fn buffer_path(&self) -> &Path {
        &self.buffer_path
    }

    /// Images displayed so far.
    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    pub fn flushes(&self) -> u64 {
        self.flushes
    }

    /// Labels assigned since the last flush.
    pub fn pending(&self) -> &LabelStore {
        &self.pending
    }

    /// Count one displayed image.
    pub fn tick(&mut self) {
        self.iteration += 1;
    }

    pub fn record(&mut self, identifier: &str, label: Label) {
        self.pending.set(identifier.to_string(), label);
    }

    pub fn flush_due(&self) -> bool {
        self.iteration > 0 && self.iteration.is_multiple_of(self.save_every)
    }

    /// Flush if this iteration is a multiple of `save_every`. Returns whether it flushed.
    pub fn maybe_flush(&mut self, store: &LabelStore) -> StoreResult<bool> {
        if !self.flush_due() {
            return Ok(false);
        }
        self.flush(store)?;
        Ok(true)
    }

    /// Overwrite the buffer with exactly the pending delta, checkpoint the main file, clear the delta.
    pub fn flush(&mut self, store: &LabelStore) -> StoreResult<()> {
        write_entries(&self.buffer_path, self.pending.iter())?;
        store.save(&self.main_path)?;
        debug!(
            "Flushed {} pending labels at iteration {}",
            self.pending.len(),
            self.iteration
        );
        self.pending = LabelStore::new();
        self.flushes += 1;
        Ok(())
    }

    /// Clean shutdown: write the whole store to the main file, then drop the buffer.
    pub fn commit(&mut self, store: &LabelStore) -> StoreResult<()> {
        store.save(&self.main_path)?;
        if remove_if_exists(&self.buffer_path)? {
            debug!("Removed buffer file {}", self.buffer_path.display());
        }
        self.pending = LabelStore::new();
        Ok(())
    }
}
