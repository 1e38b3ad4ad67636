use colored::{ColoredString, Colorize};
use env_logger::Builder;
use log::Level;
use std::io::Write;

/// Colors used for label and summary output.
pub struct Colors;

impl Colors {
    pub const POSITIVE: &'static str = "green";
    pub const NEGATIVE: &'static str = "red";
    pub const UNSET: &'static str = "yellow";

    pub fn colorize(color: &str, text: &str) -> ColoredString {
        text.color(color)
    }

    /// Colored rendering of an optional label: `1`, `0` or `None`.
    pub fn label(label: Option<crate::Label>) -> ColoredString {
        match label {
            Some(crate::Label::Positive) => Self::colorize(Self::POSITIVE, "1"),
            Some(crate::Label::Negative) => Self::colorize(Self::NEGATIVE, "0"),
            None => Self::colorize(Self::UNSET, "None"),
        }
    }
}

pub fn setup_logging(verbose: bool) {
    use log::LevelFilter;

    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // try_init: library callers and tests may already have a logger installed
    let _ = Builder::from_default_env()
        .filter_level(LevelFilter::Warn) // Default: only warnings from dependencies
        .filter_module(env!("CARGO_PKG_NAME"), level) // Our crate: use requested level
        .format(|buf, record| {
            let name = env!("CARGO_PKG_NAME");
            let line = match record.level() {
                Level::Error | Level::Warn => {
                    let level_str = match record.level() {
                        Level::Warn => "WARN".yellow(),
                        Level::Error => "ERROR".red(),
                        _ => unreachable!(),
                    };
                    let path = record.target().to_string().white();
                    format!("[{} {} {}] {}", name.cyan(), level_str, path, record.args())
                }
                _ => format!("[{}] {}", name.cyan(), record.args()),
            };
            writeln!(buf, "{}", line)
        })
        .try_init();
}
