//! Shared fixtures: image trees in temp dirs and a presenter driven by a fixed key script.

#![allow(dead_code)]

use binlabel::{Intent, Opts, Presenter, View};
use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Temp dir holding empty files at `rel_paths` (parents created).
pub fn image_tree(rel_paths: &[&str]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for rel in rel_paths {
        let path = dir.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"").unwrap();
    }
    dir
}

/// Opts for a test root with the confirmation-free defaults and `.png` images.
pub fn opts_for(root: &Path, save_every: u32) -> Opts {
    Opts {
        save_every,
        ..Opts::for_root(root.canonicalize().unwrap())
    }
}

/// Replays `script`; records every view it was asked to display. Quits when the script runs out.
pub struct ScriptedPresenter {
    script: VecDeque<Intent>,
    pub shown: Vec<View>,
}

impl ScriptedPresenter {
    pub fn new(script: &[Intent]) -> Self {
        Self {
            script: script.iter().copied().collect(),
            shown: Vec::new(),
        }
    }

    pub fn shown_ids(&self) -> Vec<&str> {
        self.shown.iter().map(|v| v.identifier.as_str()).collect()
    }
}

impl Presenter for ScriptedPresenter {
    fn display(&mut self, view: &View) -> anyhow::Result<()> {
        self.shown.push(view.clone());
        Ok(())
    }

    fn wait_for_intent(&mut self) -> anyhow::Result<Intent> {
        Ok(self.script.pop_front().unwrap_or(Intent::Quit))
    }
}

/// Presenter that fails once the script is exhausted, standing in for a killed process:
/// the session stops without reaching its final commit.
pub struct CrashingPresenter {
    script: VecDeque<Intent>,
}

impl CrashingPresenter {
    pub fn new(script: &[Intent]) -> Self {
        Self {
            script: script.iter().copied().collect(),
        }
    }
}

impl Presenter for CrashingPresenter {
    fn display(&mut self, _view: &View) -> anyhow::Result<()> {
        Ok(())
    }

    fn wait_for_intent(&mut self) -> anyhow::Result<Intent> {
        self.script
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("simulated crash"))
    }
}
