//! Terminal presenter: prints the current image, optionally opens it in an external viewer,
//! and reads single keys in raw mode.

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal;
use log::{debug, warn};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use crate::Intent;
use crate::utils::Colors;

use super::keymap::KeyMap;
use super::presenter::{Presenter, View};

pub struct TerminalPresenter {
    root: PathBuf,
    keymap: KeyMap,
    viewer: Option<String>,
    child: Option<Child>,
}

impl TerminalPresenter {
    pub fn new(root: &Path, keymap: KeyMap, viewer: Option<String>) -> Self {
        Self {
            root: root.to_path_buf(),
            keymap,
            viewer,
            child: None,
        }
    }

    fn close_viewer(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }

    /// Replace the running viewer with one showing `path`. A viewer that cannot start is
    /// disabled for the rest of the session; labeling continues from the printed path.
    fn open_in_viewer(&mut self, path: &Path) {
        let Some(cmd) = self.viewer.clone() else {
            return;
        };
        self.close_viewer();
        let mut parts = cmd.split_whitespace();
        let Some(program) = parts.next() else {
            return;
        };
        match Command::new(program)
            .args(parts)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(child) => self.child = Some(child),
            Err(e) => {
                warn!("Cannot start viewer {program:?}: {e}. Continuing without it.");
                self.viewer = None;
            }
        }
    }
}

impl Presenter for TerminalPresenter {
    fn display(&mut self, view: &View) -> Result<()> {
        let path = self.root.join(&view.identifier);
        println!("Displaying image: {}", view.identifier);
        println!("Index: {}\t | Label: {}", view.index, Colors::label(view.label));
        debug!("Absolute path: {}", path.display());
        self.open_in_viewer(&path);
        Ok(())
    }

    fn wait_for_intent(&mut self) -> Result<Intent> {
        let _raw = RawMode::enable()?;
        loop {
            let Event::Key(key) = event::read().context("read key event")? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Some(intent) = self.keymap.intent_for(&key) {
                return Ok(intent);
            }
        }
    }
}

impl Drop for TerminalPresenter {
    fn drop(&mut self) {
        self.close_viewer();
    }
}

/// Raw mode for the duration of one key read; restored on drop, including on error.
struct RawMode;

impl RawMode {
    fn enable() -> Result<Self> {
        terminal::enable_raw_mode().context("enable raw terminal mode")?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}
