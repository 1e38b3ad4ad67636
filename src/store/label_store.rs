//! In-memory label store backed by the main label file and the buffer file.

use log::{debug, info};
use std::fs;
use std::io;
use std::path::Path;

use crate::utils::write_atomic;
use crate::{Label, LabelMap};

use super::error::{StoreError, StoreResult};
use super::format::{LineError, format_line, parse_line};

/// Identifier → label map plus the order in which identifiers were first labeled.
///
/// The map answers lookups; `order` is the append log that the visited sequence is rebuilt
/// from on resume. An identifier appears in `order` at most once, and only if it is in the map.
#[derive(Clone, Debug, Default)]
pub struct LabelStore {
    labels: LabelMap,
    order: Vec<String>,
}

impl LabelStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a label file. A missing file is an empty store; any malformed line is fatal.
    /// Repeated identifiers keep their first position and their last label.
    pub fn load(path: &Path) -> StoreResult<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No label file at {}", path.display());
                return Ok(Self::new());
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let mut store = Self::new();
        for (idx, line) in text.lines().enumerate() {
            let (identifier, label) = parse_line(line).map_err(|e| match e {
                LineError::Malformed => StoreError::Malformed {
                    path: path.to_path_buf(),
                    line: idx + 1,
                    content: line.to_string(),
                },
                LineError::UnknownLabel(label) => StoreError::UnknownLabel {
                    path: path.to_path_buf(),
                    line: idx + 1,
                    label,
                },
            })?;
            store.set(identifier, label);
        }
        debug!("Loaded {} labels from {}", store.len(), path.display());
        Ok(store)
    }

    /// Write every entry in first-labeled order, replacing the file atomically.
    pub fn save(&self, path: &Path) -> StoreResult<()> {
        write_entries(path, self.iter())?;
        debug!("Saved {} labels to {}", self.len(), path.display());
        Ok(())
    }

    /// Overlay `newer` onto this store: its labels win, unseen identifiers are appended in its order.
    pub fn overlay(&mut self, newer: LabelStore) {
        let LabelStore { mut labels, order } = newer;
        for identifier in order {
            if let Some(label) = labels.remove(&identifier) {
                self.set(identifier, label);
            }
        }
    }

    /// Overlay the buffer file in memory only. Returns false when there is no buffer file.
    pub fn overlay_file(&mut self, buffer_path: &Path) -> StoreResult<bool> {
        if !buffer_path.exists() {
            return Ok(false);
        }
        let buffered = Self::load(buffer_path)?;
        debug!(
            "Overlaying {} buffered labels from {}",
            buffered.len(),
            buffer_path.display()
        );
        self.overlay(buffered);
        Ok(true)
    }

    /// Startup recovery: overlay the buffer left by an unclean shutdown, persist the merged
    /// map to `main_path`, then remove the buffer so it cannot be applied twice.
    /// Returns false (and writes nothing) when there is no buffer file.
    pub fn merge_buffer(&mut self, main_path: &Path, buffer_path: &Path) -> StoreResult<bool> {
        if !self.overlay_file(buffer_path)? {
            return Ok(false);
        }
        info!("Restoring labels from buffer file, do not close the window");
        self.save(main_path)?;
        remove_if_exists(buffer_path)?;
        Ok(true)
    }

    /// Set a label. Returns the previous one.
    pub fn set(&mut self, identifier: String, label: Label) -> Option<Label> {
        if let Some(slot) = self.labels.get_mut(&identifier) {
            return Some(std::mem::replace(slot, label));
        }
        self.order.push(identifier.clone());
        self.labels.insert(identifier, label);
        None
    }

    pub fn get(&self, identifier: &str) -> Option<Label> {
        self.labels.get(identifier).copied()
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.labels.contains_key(identifier)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &LabelMap {
        &self.labels
    }

    /// Identifiers in first-labeled order.
    pub fn order(&self) -> &[String] {
        &self.order
    }

    /// Entries in first-labeled order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Label)> + '_ {
        self.order
            .iter()
            .filter_map(|id| self.labels.get(id).map(|label| (id.as_str(), *label)))
    }
}

/// Replace `path` with exactly `entries`, one line each.
pub fn write_entries<'a, I>(path: &Path, entries: I) -> StoreResult<()>
where
    I: IntoIterator<Item = (&'a str, Label)>,
{
    let mut out = String::new();
    for (identifier, label) in entries {
        out.push_str(&format_line(identifier, label));
    }
    write_atomic(path, out.as_bytes()).map_err(|source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Remove `path`; absent is not an error. Returns whether a file was removed.
pub fn remove_if_exists(path: &Path) -> StoreResult<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(StoreError::Remove {
            path: path.to_path_buf(),
            source,
        }),
    }
}
