//! CLI command handler: resolve paths and options, confirm, then label (or summarize with --summary).

use anyhow::{Context, Result, bail};
use colored::Colorize;
use log::{debug, info, warn};
use std::io::{self, BufRead, Write};

use crate::engine::arg_parser::Cli;
use crate::engine::tools::{normalize_extensions, resolve_root};
use crate::session::{KeyMap, TerminalPresenter};
use crate::utils::{apply_file_to_opts, load_label_toml, setup_logging};
use crate::{Opts, SessionEnd, label_dir, summarize};

/// Defaults → `.binlabel.toml` in the resolved root → CLI flags. Starts logging once the
/// verbosity is known; an unusable config file is then warned about and ignored.
pub fn setup_opts(cli: &Cli) -> Result<Opts> {
    let root = resolve_root(&cli.folder)?;
    let mut opts = Opts::for_root(root);
    let file = load_label_toml(&opts.root);
    if let Ok(Some(ref file)) = file {
        apply_file_to_opts(file, &mut opts);
    }
    if !cli.ext.is_empty() {
        opts.extensions = cli.ext.clone();
    }
    if let Some(ref label) = cli.label {
        opts.label_file = label.clone();
    }
    if let Some(save) = cli.save {
        opts.save_every = save;
    }
    if cli.viewer.is_some() {
        opts.viewer = cli.viewer.clone();
    }
    if let Some(strict) = cli.strict {
        opts.strict = strict;
    }
    if let Some(verbose) = cli.verbose {
        opts.verbose = verbose;
    }
    setup_logging(opts.verbose);
    if let Err(e) = file {
        warn!("Ignoring config file: {:#}", e);
    }

    opts.extensions = normalize_extensions(&opts.extensions);
    if opts.extensions.is_empty() {
        bail!("No image extensions given");
    }
    if opts.save_every == 0 {
        bail!("Save frequency must be at least 1");
    }
    Ok(opts)
}

/// Print resolved paths and ask before touching anything. Only `n` declines.
fn confirm_paths(opts: &Opts) -> Result<bool> {
    info!("Loading from folder: {}", opts.root.display());
    info!("Saving to labels file: {}", opts.label_path().display());
    let label = format!("[{}]", env!("CARGO_PKG_NAME")).cyan().bold();
    print!("{} Are these file paths correct? (n for no) ", label);
    io::stdout().flush().context("flush prompt")?;
    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("read confirmation")?;
    Ok(!answer.trim().eq_ignore_ascii_case("n"))
}

/// Run a labeling session (default) or a read-only summary when --summary.
pub fn handle_run(cli: &Cli) -> Result<()> {
    let opts = setup_opts(cli)?;

    if cli.summary {
        summarize(&opts)?;
        return Ok(());
    }
    if !cli.yes && !confirm_paths(&opts)? {
        info!("Aborted. Nothing was written.");
        return Ok(());
    }

    let keymap = KeyMap::from_bindings(&opts.keys)?;
    let mut presenter = TerminalPresenter::new(&opts.root, keymap, opts.viewer.clone());
    let report = label_dir(&opts, &mut presenter)?;
    debug!("{:?}", report);
    if report.end == SessionEnd::Quit {
        info!(
            "Saved {} labels to {} ({} assigned this session)",
            report.total_labels,
            opts.label_path().display(),
            report.assigned
        );
    }
    Ok(())
}
