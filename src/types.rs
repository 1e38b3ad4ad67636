//! Public and internal types for the binlabel API and session.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use crate::utils::config::Defaults;

/// One of the two persisted classes. "Unset" is the absence of an entry, never a variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Label {
    Negative,
    Positive,
}

impl Label {
    /// Field written to the label file (`0` or `1`).
    pub fn as_field(self) -> char {
        match self {
            Label::Negative => '0',
            Label::Positive => '1',
        }
    }

    /// Parse a trimmed label field. Anything other than `0`/`1` is rejected.
    pub fn from_field(field: &str) -> Option<Label> {
        match field {
            "0" => Some(Label::Negative),
            "1" => Some(Label::Positive),
            _ => None,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_field())
    }
}

/// Semantic result of one keypress. Exactly one per key; label intents imply an advance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Intent {
    LabelPositive,
    LabelNegative,
    Advance,
    Retreat,
    Quit,
}

impl Intent {
    /// Label assigned by this intent, if any.
    pub fn label(self) -> Option<Label> {
        match self {
            Intent::LabelPositive => Some(Label::Positive),
            Intent::LabelNegative => Some(Label::Negative),
            _ => None,
        }
    }
}

/// Identifier → label. Root-relative, `/`-separated identifiers.
pub type LabelMap = HashMap<String, Label>;

/// Key names per intent, as they appear in `.binlabel.toml` (`"Up"`, `"w"`, ...).
#[derive(Clone, Debug)]
pub struct KeyBindings {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
    pub advance: Vec<String>,
    pub retreat: Vec<String>,
    pub quit: Vec<String>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let owned =
            |keys: &[&str]| -> Vec<String> { keys.iter().map(|k| k.to_string()).collect() };
        Self {
            positive: owned(Defaults::POSITIVE_KEYS),
            negative: owned(Defaults::NEGATIVE_KEYS),
            advance: owned(Defaults::ADVANCE_KEYS),
            retreat: owned(Defaults::RETREAT_KEYS),
            quit: owned(Defaults::QUIT_KEYS),
        }
    }
}

/// Fully resolved options (defaults → `.binlabel.toml` → CLI).
#[derive(Clone, Debug)]
pub struct Opts {
    /// Image root. Identifiers are relative to it.
    pub root: PathBuf,
    /// Accepted extensions, each with its leading `.`. Case-sensitive.
    pub extensions: Vec<String>,
    /// Label file name or path, joined onto `root`.
    pub label_file: PathBuf,
    /// Flush the pending buffer every this many displayed images (≥ 1).
    pub save_every: u32,
    /// External viewer command spawned with the absolute image path.
    pub viewer: Option<String>,
    /// Fail on the first walk error instead of skipping.
    pub strict: bool,
    /// Debug logging.
    pub verbose: bool,
    pub keys: KeyBindings,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            extensions: vec![Defaults::EXTENSION.to_string()],
            label_file: PathBuf::from(Defaults::LABEL_FILE),
            save_every: Defaults::SAVE_EVERY,
            viewer: None,
            strict: false,
            verbose: false,
            keys: KeyBindings::default(),
        }
    }
}

impl Opts {
    /// Options for `root` with every other field at its default.
    pub fn for_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Absolute path of the main label file.
    pub fn label_path(&self) -> PathBuf {
        self.root.join(&self.label_file)
    }

    /// Absolute path of the buffer file derived from the label file.
    pub fn buffer_path(&self) -> PathBuf {
        crate::utils::buffer_path_for(&self.label_path())
    }
}

/// How a session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEnd {
    /// Quit intent; the full mapping was committed.
    Quit,
    /// Nothing to show: no images and no history. Nothing was written.
    NoImages,
}

/// Returned by [`label_dir`](crate::label_dir).
#[derive(Clone, Debug)]
pub struct SessionReport {
    pub end: SessionEnd,
    /// Images displayed (iterations of the session loop).
    pub displayed: u64,
    /// Labels assigned during this session, relabels included.
    pub assigned: u64,
    /// Periodic flushes performed.
    pub flushes: u64,
    /// Entries in the label store when the session ended.
    pub total_labels: usize,
    /// True when a buffer file from an unclean shutdown was merged at startup.
    pub recovered: bool,
}

/// Result of [`summarize`](crate::summarize): a read-only view of labeling progress.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub positive: usize,
    pub negative: usize,
    pub unlabeled: usize,
    /// Labeled identifiers whose image is no longer under the root.
    pub missing: Vec<String>,
    /// A buffer file was present and overlaid in memory.
    pub pending_buffer: bool,
}
