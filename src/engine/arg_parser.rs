use clap::Parser;
use std::path::PathBuf;

/// Binary image labeling from the keyboard, resumable after crashes.
#[derive(Clone, Parser)]
#[command(name = "binlabel")]
#[command(
    about = "Label images under FOLDER as 1/0 one key at a time; progress survives crashes."
)]
pub struct Cli {
    /// Highest-level image folder, explored recursively. Absolute, relative to the current
    /// directory, or relative to the binary's directory.
    #[arg(value_name = "FOLDER")]
    pub folder: PathBuf,

    /// Image extensions to look for (case-sensitive). Default: .png
    #[arg(long, short = 'e', num_args = 1..)]
    pub ext: Vec<String>,

    /// Label file, nested in FOLDER at the highest level. Default: labels.txt
    #[arg(long, short = 'l')]
    pub label: Option<PathBuf>,

    /// Flush buffered labels every N displayed images. Default: 20
    #[arg(long, short = 's', value_parser = clap::value_parser!(u32).range(1..))]
    pub save: Option<u32>,

    /// External viewer command run with each image path (e.g. "feh -F").
    #[arg(long)]
    pub viewer: Option<String>,

    /// Report labeling progress and exit without starting a session. Writes nothing.
    #[arg(long)]
    pub summary: bool,

    /// Skip the path confirmation prompt.
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Strict mode: fail on the first unreadable directory instead of skipping it.
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub strict: Option<bool>,

    /// Verbose output.
    #[arg(long, short = 'v', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub verbose: Option<bool>,
}
