//! Label store: in-memory map, label/buffer file codec, startup merge.

mod error;
mod format;
mod label_store;

pub use error::{StoreError, StoreResult};
pub use format::{LineError, format_line, is_storable, parse_line};
pub use label_store::{LabelStore, remove_if_exists, write_entries};
