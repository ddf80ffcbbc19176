// Field projector: keeps the required columns, in order, and drops the rest.
use shared::models::Table;

use crate::error::{EngineError, EngineResult};
use crate::models::columns::REQUIRED_COLUMNS;

/// Returns a new table holding exactly [`REQUIRED_COLUMNS`].
///
/// Fails with [`EngineError::MissingColumns`] naming every absent column, so
/// the caller can report them all at once.
pub fn project(table: &Table) -> EngineResult<Table> {
    let mut indices = Vec::with_capacity(REQUIRED_COLUMNS.len());
    let mut missing = Vec::new();

    for name in REQUIRED_COLUMNS {
        match table.column_index(name) {
            Some(idx) => indices.push(idx),
            None => missing.push(name.to_string()),
        }
    }

    if !missing.is_empty() {
        tracing::error!(missing = ?missing, "Input is missing required columns");
        return Err(EngineError::MissingColumns(missing));
    }

    let dropped = table.columns.len() - indices.len();
    let mut projected = Table::new(REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect());
    for row in &table.rows {
        projected.push_row(indices.iter().map(|&i| row[i].clone()).collect());
    }

    tracing::debug!(kept = indices.len(), dropped, "Projected required columns");
    Ok(projected)
}
