//! binlabel: crash-resilient binary labeling of image trees

pub mod engine;
pub mod session;
pub mod store;
pub mod summary;
pub mod types;
pub mod utils;
pub mod walk;

/// Re-export types for API
pub use types::*;

pub use session::{Presenter, View};
pub use summary::summarize;

use log::debug;

use crate::session::{Durability, Navigator, Session};
use crate::store::LabelStore;
use crate::utils::remove_stale_temp;
use crate::walk::ImageWalker;

/// Result alias used by public binlabel API
pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Single entry point: resume from the label and buffer files under `opts.root`, then label
/// images through `presenter` until Quit (full commit) or until there is nothing to show.
///
/// - A buffer file left by a crash is merged into the main file (buffer wins) and removed
///   before the first image is shown.
/// - Images already labeled are never offered again as new work; with nothing new left the
///   session falls back to reviewing the visited history.
/// - An empty tree with no history returns [`SessionEnd::NoImages`] and writes nothing.
pub fn label_dir<P: Presenter>(opts: &Opts, presenter: &mut P) -> Result<SessionReport> {
    let config_str = format!(
        "{} CONFIG:{:#?}",
        env!("CARGO_PKG_NAME").to_string().to_uppercase(),
        opts
    );
    debug!("{}", config_str);

    if !opts.root.is_dir() {
        anyhow::bail!("Image folder does not exist: {}", opts.root.display());
    }
    let label_path = opts.label_path();
    let buffer_path = opts.buffer_path();
    for path in [&label_path, &buffer_path] {
        if remove_stale_temp(path)? {
            debug!("Removed interrupted write next to {}", path.display());
        }
    }

    let mut store = LabelStore::load(&label_path)?;
    let recovered = store.merge_buffer(&label_path, &buffer_path)?;

    let navigator = Navigator::new(store.order().to_vec(), ImageWalker::from_opts(opts));
    let durability = Durability::new(label_path, buffer_path, opts.save_every);
    let mut session = Session::new(store, navigator, durability);

    let mut report = session.run(presenter)?;
    report.recovered = recovered;
    Ok(report)
}
