//! Post-fill verification of generated archives

use std::path::Path;

use crate::archive::read_part;
use crate::errors::EngineError;
use crate::placeholder::PlaceholderTable;

pub use crate::xml::is_well_formed;

/// Markers of `table` still present in `part` of the archive at `path`
pub fn unreplaced_markers(
    path: &Path,
    part: &str,
    table: &PlaceholderTable,
) -> Result<Vec<String>, EngineError> {
    let text = read_part(path, part)?;
    Ok(table
        .unreplaced(&text)
        .into_iter()
        .map(str::to_string)
        .collect())
}
