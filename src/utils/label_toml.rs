//! Load `.binlabel.toml` from the image root (CLI only). Library callers build [`Opts`] directly.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::Opts;
use crate::utils::config::PackagePaths;

#[derive(Debug, Default, Deserialize)]
pub struct LabelToml {
    #[serde(default)]
    settings: SettingsSection,
    #[serde(default)]
    keys: KeysSection,
}

#[derive(Debug, Default, Deserialize)]
struct SettingsSection {
    ext: Option<Vec<String>>,
    label: Option<String>,
    save: Option<u32>,
    viewer: Option<String>,
    strict: Option<bool>,
    verbose: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct KeysSection {
    positive: Option<Vec<String>>,
    negative: Option<Vec<String>>,
    advance: Option<Vec<String>>,
    retreat: Option<Vec<String>>,
    quit: Option<Vec<String>>,
}

/// Load `.binlabel.toml` from `dir`. `Ok(None)` when there is no such file; unreadable or
/// invalid files are errors, which the CLI reports once logging is up and then ignores.
pub fn load_label_toml(dir: &Path) -> Result<Option<LabelToml>> {
    let path = dir.join(PackagePaths::get().config_filename());
    let s = match std::fs::read_to_string(&path) {
        Ok(s) => s,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("read {}", path.display())),
    };
    let file = parse_label_toml(&s).with_context(|| format!("parse {}", path.display()))?;
    Ok(Some(file))
}

pub fn parse_label_toml(s: &str) -> Result<LabelToml, toml::de::Error> {
    toml::from_str(s)
}

/// Overwrite opts field from file when present.
macro_rules! apply_file_opt {
    ($section:expr, $opts:expr, $field:ident => $opts_field:ident) => {
        if let Some(v) = $section.$field.clone() {
            $opts.$opts_field = v;
        }
    };
}

/// Apply file config to opts (only fields present in the file). Call before applying CLI.
pub fn apply_file_to_opts(file: &LabelToml, opts: &mut Opts) {
    let s = &file.settings;
    apply_file_opt!(s, opts, ext => extensions);
    if let Some(ref label) = s.label {
        opts.label_file = PathBuf::from(label);
    }
    apply_file_opt!(s, opts, save => save_every);
    if let Some(ref viewer) = s.viewer {
        opts.viewer = Some(viewer.clone());
    }
    apply_file_opt!(s, opts, strict => strict);
    apply_file_opt!(s, opts, verbose => verbose);

    let k = &file.keys;
    apply_file_opt!(k, opts.keys, positive => positive);
    apply_file_opt!(k, opts.keys, negative => negative);
    apply_file_opt!(k, opts.keys, advance => advance);
    apply_file_opt!(k, opts.keys, retreat => retreat);
    apply_file_opt!(k, opts.keys, quit => quit);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_overrides_only_present_fields() {
        let file = parse_label_toml(
            r#"
            [settings]
            ext = [".jpg"]
            save = 5

            [keys]
            quit = ["x"]
            "#,
        )
        .unwrap();
        let mut opts = Opts::default();
        apply_file_to_opts(&file, &mut opts);
        assert_eq!(opts.extensions, vec![".jpg".to_string()]);
        assert_eq!(opts.save_every, 5);
        assert_eq!(opts.keys.quit, vec!["x".to_string()]);
        assert_eq!(opts.label_file, PathBuf::from("labels.txt"));
        assert_eq!(opts.keys.positive, vec!["Up".to_string(), "w".to_string()]);
    }

    #[test]
    fn empty_file_is_valid() {
        let file = parse_label_toml("").unwrap();
        let mut opts = Opts::default();
        apply_file_to_opts(&file, &mut opts);
        assert_eq!(opts.save_every, 20);
    }

    #[test]
    fn wrong_type_is_rejected() {
        assert!(parse_label_toml("[settings]\nsave = \"often\"\n").is_err());
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_label_toml(dir.path()).unwrap().is_none());
    }

    #[test]
    fn invalid_file_error_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".binlabel.toml"), "[settings\n").unwrap();
        let err = load_label_toml(dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains(".binlabel.toml"));
    }
}
