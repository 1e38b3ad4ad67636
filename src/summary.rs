//! Read-only progress report: compares the label store to the images currently on disk.

use anyhow::Result;
use log::{debug, info};
use std::collections::HashSet;

use crate::store::LabelStore;
use crate::utils::Colors;
use crate::walk::ImageWalker;
use crate::{Label, Opts, Summary};

/// Count positive/negative/unlabeled images under `opts.root`. Overlays the buffer file in
/// memory when present; never writes.
pub fn summarize(opts: &Opts) -> Result<Summary> {
    let mut store = LabelStore::load(&opts.label_path())?;
    let pending_buffer = store.overlay_file(&opts.buffer_path())?;

    let mut summary = Summary {
        pending_buffer,
        ..Summary::default()
    };
    let mut on_disk = HashSet::new();
    for identifier in ImageWalker::from_opts(opts) {
        let identifier = identifier?;
        match store.get(&identifier) {
            Some(Label::Positive) => summary.positive += 1,
            Some(Label::Negative) => summary.negative += 1,
            None => summary.unlabeled += 1,
        }
        on_disk.insert(identifier);
    }
    summary.missing = store
        .order()
        .iter()
        .filter(|id| !on_disk.contains(*id))
        .cloned()
        .collect();

    print_summary(&summary);
    Ok(summary)
}

fn print_summary(summary: &Summary) {
    if summary.pending_buffer {
        info!("Buffer file present: the last session did not shut down cleanly");
    }
    info!(
        "{} | {} | {}",
        Colors::colorize(Colors::POSITIVE, &format!("Positive: {}", summary.positive)),
        Colors::colorize(Colors::NEGATIVE, &format!("Negative: {}", summary.negative)),
        Colors::colorize(Colors::UNSET, &format!("Unlabeled: {}", summary.unlabeled))
    );
    if !summary.missing.is_empty() {
        info!(
            "{} labeled images are no longer on disk",
            summary.missing.len()
        );
        for id in &summary.missing {
            debug!("  missing: {}", id);
        }
    }
}
