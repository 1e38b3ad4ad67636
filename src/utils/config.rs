//! Application configuration constants.
//! Defaults and derived file names in one place.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived names: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    config_filename: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache names from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                config_filename: format!(".{pkg}.toml"),
            }
        })
    }

    /// Per-root config file (`.binlabel.toml`).
    pub fn config_filename(&self) -> &str {
        &self.config_filename
    }
}

// ---- Session defaults ----

/// Built-in defaults, overridden by `.binlabel.toml` then by CLI flags.
pub struct Defaults;

impl Defaults {
    pub const EXTENSION: &'static str = ".png";
    pub const LABEL_FILE: &'static str = "labels.txt";
    /// Flush the pending buffer every this many displayed images.
    pub const SAVE_EVERY: u32 = 20;

    pub const POSITIVE_KEYS: &'static [&'static str] = &["Up", "w"];
    pub const NEGATIVE_KEYS: &'static [&'static str] = &["Down", "s"];
    pub const ADVANCE_KEYS: &'static [&'static str] = &["Right", "d"];
    pub const RETREAT_KEYS: &'static [&'static str] = &["Left", "a"];
    pub const QUIT_KEYS: &'static [&'static str] = &["q", "Esc"];
}

// ---- Label file format ----

/// Separates the label field from the identifier on each line.
pub const FIELD_DELIMITER: char = '|';

/// Marker inserted between the label file stem and its extension to name the buffer file.
pub const BUFFER_SUFFIX: &str = "_buffer";

/// Extension used for the buffer file when the label file has none.
const BUFFER_FALLBACK_EXT: &str = "txt";

/// Buffer file for `label_path`: `labels.txt` → `labels_buffer.txt`, same directory.
pub fn buffer_path_for(label_path: &Path) -> PathBuf {
    let stem = label_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| Defaults::LABEL_FILE.to_string());
    let ext = label_path
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| BUFFER_FALLBACK_EXT.to_string());
    label_path
        .parent()
        .unwrap_or(Path::new("."))
        .join(format!("{stem}{BUFFER_SUFFIX}.{ext}"))
}
