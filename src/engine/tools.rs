//! Path and filter utilities

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Convert absolute path to relative path from base
pub fn path_relative_to(path: &Path, base: &Path) -> Option<PathBuf> {
    path.strip_prefix(base).ok().map(|p| p.to_path_buf())
}

/// Identifier string for a root-relative path: components joined with `/` on every platform.
/// `None` for paths that are not valid UTF-8; a lossy conversion would merge distinct files.
pub fn path_to_identifier(path: &Path) -> Option<String> {
    let s = path.to_str()?;
    if std::path::MAIN_SEPARATOR == '\\' {
        Some(s.replace('\\', "/"))
    } else {
        Some(s.to_string())
    }
}

/// Check if a file should be excluded based on OS-specific hidden files
pub fn is_os_hidden_file(path: &Path) -> bool {
    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
        match name {
            // macOS
            ".DS_Store" | ".AppleDouble" | ".LSOverride" => true,
            // Windows
            "Thumbs.db" | "ehthumbs.db" | "Desktop.ini" => true,
            // Linux
            ".directory" => true,
            // macOS resource fork files start with ._
            _ => name.starts_with("._"),
        }
    } else {
        false
    }
}

/// Ensure every extension carries its leading `.` (`png` → `.png`). Case is preserved.
pub fn normalize_extensions(exts: &[String]) -> Vec<String> {
    exts.iter()
        .map(|e| e.trim())
        .filter(|e| !e.is_empty())
        .map(|e| {
            if e.starts_with('.') {
                e.to_string()
            } else {
                format!(".{e}")
            }
        })
        .collect()
}

/// Case-sensitive match of the file's final extension (with its `.`) against `exts`.
pub fn has_accepted_extension(path: &Path, exts: &[String]) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    exts.iter()
        .any(|accepted| accepted.strip_prefix('.') == Some(ext))
}

/// Resolve the image root: as given (relative to cwd), else relative to the executable's
/// directory. Errors if neither is a directory.
pub fn resolve_root(dir: &Path) -> Result<PathBuf> {
    if dir.is_dir() {
        return dir
            .canonicalize()
            .with_context(|| format!("canonicalize {}", dir.display()));
    }
    if dir.is_relative()
        && let Some(exe_dir) = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        let candidate = exe_dir.join(dir);
        if candidate.is_dir() {
            return candidate
                .canonicalize()
                .with_context(|| format!("canonicalize {}", candidate.display()));
        }
    }
    anyhow::bail!("Image folder does not exist: {}", dir.display())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extensions_gain_leading_dot() {
        let exts = normalize_extensions(&["png".into(), ".JPG".into(), " ".into()]);
        assert_eq!(exts, vec![".png".to_string(), ".JPG".to_string()]);
    }

    #[test]
    fn extension_match_is_case_sensitive() {
        let exts = vec![".png".to_string()];
        assert!(has_accepted_extension(Path::new("a/b.png"), &exts));
        assert!(!has_accepted_extension(Path::new("a/b.PNG"), &exts));
        assert!(!has_accepted_extension(Path::new("a/png"), &exts));
        assert!(!has_accepted_extension(Path::new("a/b.png.bak"), &exts));
    }

    #[test]
    fn hidden_files() {
        assert!(is_os_hidden_file(Path::new("x/.DS_Store")));
        assert!(is_os_hidden_file(Path::new("x/._a.png")));
        assert!(!is_os_hidden_file(Path::new("x/a.png")));
    }

    #[test]
    fn identifier_uses_forward_slashes() {
        let rel = Path::new("cats").join("a.png");
        assert_eq!(path_to_identifier(&rel).as_deref(), Some("cats/a.png"));
    }

    #[cfg(unix)]
    #[test]
    fn identifier_keeps_backslash_and_rejects_invalid_utf8() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        assert_eq!(
            path_to_identifier(Path::new("a\\b.png")).as_deref(),
            Some("a\\b.png")
        );
        let raw = Path::new(OsStr::from_bytes(b"\xff.png"));
        assert_eq!(path_to_identifier(raw), None);
    }

    #[test]
    fn missing_root_is_config_error() {
        let err = resolve_root(Path::new("/definitely/not/here/binlabel")).unwrap_err();
        assert!(err.to_string().contains("Image folder does not exist"));
    }
}
