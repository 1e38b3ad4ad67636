//! Line codec for label and buffer files: `<label> |<identifier>\n`.

use crate::Label;
use crate::utils::config::FIELD_DELIMITER;

/// Why a single line failed to parse. Mapped to [`StoreError`](super::StoreError) with file and line.
#[derive(Debug, PartialEq, Eq)]
pub enum LineError {
    Malformed,
    UnknownLabel(String),
}

/// Render one entry. Output always ends with `\n`.
pub fn format_line(identifier: &str, label: Label) -> String {
    format!("{} {}{}\n", label.as_field(), FIELD_DELIMITER, identifier)
}

/// Parse one line (without its terminator). The label field is trimmed; the identifier is kept
/// verbatim except for one leading `/`, which older label files wrote before every identifier.
pub fn parse_line(line: &str) -> Result<(String, Label), LineError> {
    let (label_field, identifier) = line
        .split_once(FIELD_DELIMITER)
        .ok_or(LineError::Malformed)?;
    let identifier = identifier.strip_prefix('/').unwrap_or(identifier);
    if identifier.is_empty() || identifier.contains(FIELD_DELIMITER) {
        return Err(LineError::Malformed);
    }
    let label_field = label_field.trim();
    let label = Label::from_field(label_field)
        .ok_or_else(|| LineError::UnknownLabel(label_field.to_string()))?;
    Ok((identifier.to_string(), label))
}

/// True if `identifier` can be written and read back unchanged.
pub fn is_storable(identifier: &str) -> bool {
    !identifier.is_empty()
        && !identifier.contains(FIELD_DELIMITER)
        && !identifier.contains(['\n', '\r'])
}
