//! Image enumerator: a lazy, sorted walk of the root yielding identifiers of accepted images.

use anyhow::Result;
use log::warn;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::Opts;
use crate::engine::tools::{
    has_accepted_extension, is_os_hidden_file, path_relative_to, path_to_identifier,
};
use crate::store::is_storable;
use crate::utils::temp_path_for;

/// One result from the directory walk: either an entry to consider or an error with optional path.
pub enum WalkOutcome {
    Ok(walkdir::DirEntry),
    Err { msg: String, path: Option<PathBuf> },
}

/// Convert a walkdir result into [`WalkOutcome`].
pub fn to_outcome_walkdir(r: Result<walkdir::DirEntry, walkdir::Error>) -> WalkOutcome {
    match r {
        Ok(entry) => WalkOutcome::Ok(entry),
        Err(err) => WalkOutcome::Err {
            msg: format!("{}", err),
            path: err.path().map(PathBuf::from),
        },
    }
}

/// Iterator over image identifiers under `root`. `None` means the tree is exhausted; `Some(Err)`
/// is a walk error, only produced in strict mode (otherwise errors are logged and skipped).
pub struct ImageWalker {
    root: PathBuf,
    extensions: Vec<String>,
    /// Files the session itself writes (label, buffer and their temp siblings).
    own_files: Vec<PathBuf>,
    strict: bool,
    inner: Box<dyn Iterator<Item = WalkOutcome>>,
    skipped: usize,
}

impl ImageWalker {
    pub fn new(root: &Path, extensions: &[String], own_files: Vec<PathBuf>, strict: bool) -> Self {
        let inner = WalkDir::new(root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .map(to_outcome_walkdir);
        Self {
            root: root.to_path_buf(),
            extensions: extensions.to_vec(),
            own_files,
            strict,
            inner: Box::new(inner),
            skipped: 0,
        }
    }

    /// Walker for a resolved [`Opts`], excluding the session's own files.
    pub fn from_opts(opts: &Opts) -> Self {
        let label_path = opts.label_path();
        let buffer_path = opts.buffer_path();
        let own_files = vec![
            temp_path_for(&label_path),
            temp_path_for(&buffer_path),
            label_path,
            buffer_path,
        ];
        Self::new(&opts.root, &opts.extensions, own_files, opts.strict)
    }

    /// Entries skipped so far because of walk errors, non-UTF-8 or unstorable names.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    fn identifier_for(&mut self, entry: &walkdir::DirEntry) -> Option<String> {
        let path = entry.path();
        if !entry.file_type().is_file()
            || is_os_hidden_file(path)
            || !has_accepted_extension(path, &self.extensions)
            || self.own_files.iter().any(|own| own == path)
        {
            return None;
        }
        let rel = path_relative_to(path, &self.root)?;
        let Some(identifier) = path_to_identifier(&rel) else {
            warn!("Skipping {}: name is not valid UTF-8", path.display());
            self.skipped += 1;
            return None;
        };
        if !is_storable(&identifier) {
            warn!("Skipping {}: name cannot be stored in the label file", path.display());
            self.skipped += 1;
            return None;
        }
        Some(identifier)
    }
}

impl Iterator for ImageWalker {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.inner.next()? {
                WalkOutcome::Ok(entry) => {
                    if let Some(identifier) = self.identifier_for(&entry) {
                        return Some(Ok(identifier));
                    }
                }
                WalkOutcome::Err { msg, path } => {
                    if self.strict {
                        return Some(Err(anyhow::anyhow!("{}", msg)));
                    }
                    self.skipped += 1;
                    match path {
                        Some(p) => warn!("Skipping {}: {}", p.display(), msg),
                        None => warn!("Skipping entry: {}", msg),
                    }
                }
            }
        }
    }
}
