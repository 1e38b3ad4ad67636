pub mod config;
pub mod label_toml;
pub mod logger;
pub mod tempfiles;

pub use config::*;
pub use label_toml::{LabelToml, apply_file_to_opts, load_label_toml};
pub use logger::{Colors, setup_logging};
pub use tempfiles::{remove_stale_temp, temp_path_for, write_atomic};
