//! Engine module: CLI parsing, command handling and path helpers

pub mod arg_parser;
pub mod cli;
pub mod tools;

// Re-export commonly used functions
pub use arg_parser::Cli;
pub use cli::{handle_run, setup_opts};
pub use tools::{
    has_accepted_extension, is_os_hidden_file, normalize_extensions, path_relative_to,
    path_to_identifier, resolve_root,
};
