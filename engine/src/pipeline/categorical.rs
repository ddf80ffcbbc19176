// Categorical normalizer: program alias, status normalization, installment
// coercion and removal of proposals that never became active.
use serde::Serialize;
use shared::models::{Cell, Table};

use crate::models::columns::{PARCELAS_ABERTO, PROGRAMA_BENEFICIO, STATUS_PARTICIPACAO};

/// Exact-match rewrites applied to `programa_beneficio`.
pub const PROGRAM_ALIASES: [(&str, &str); 1] = [("VIVERMAIS", "VIVERMAIS PROTEÇÃO")];

/// A status containing any of these (case-insensitive) is excluded from billing.
pub const EXCLUDED_STATUS_TERMS: [&str; 3] = ["cancelamento", "recusada", "pendente"];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterReport {
    pub dropped_null_status: usize,
    pub dropped_excluded_status: usize,
    /// Non-empty installment values that were not numbers.
    pub invalid_installments: usize,
}

pub fn normalize_program(name: &str) -> String {
    PROGRAM_ALIASES
        .iter()
        .find(|(from, _)| *from == name)
        .map_or_else(|| name.to_string(), |(_, to)| to.to_string())
}

/// Lowercases and spells the ordinal "1ª" as "1a".
pub fn normalize_status(status: &str) -> String {
    status.to_lowercase().replace("1ª", "1a")
}

pub fn parse_installments(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

pub fn coerce_installments(cell: Cell) -> Cell {
    match cell {
        Cell::Number(v) if !v.is_nan() => Cell::Number(v),
        Cell::Integer(i) => Cell::Number(i as f64),
        Cell::Text(s) => parse_installments(&s).map_or(Cell::Null, Cell::Number),
        _ => Cell::Null,
    }
}

pub fn is_excluded_status(status: &str) -> bool {
    let lowered = status.to_lowercase();
    EXCLUDED_STATUS_TERMS.iter().any(|term| lowered.contains(term))
}

/// Applies the categorical rules and drops rows with a null or excluded status.
pub fn normalize_categories(mut table: Table) -> (Table, FilterReport) {
    let mut report = FilterReport::default();

    if let Some(idx) = table.column_index(PROGRAMA_BENEFICIO) {
        table.map_column(idx, |cell| match cell {
            Cell::Text(s) => Cell::Text(normalize_program(&s)),
            other => other,
        });
    }

    let status_idx = table.column_index(STATUS_PARTICIPACAO);
    if let Some(idx) = status_idx {
        // Non-text statuses cannot be matched, so they count as missing.
        table.map_column(idx, |cell| match cell {
            Cell::Text(s) => Cell::Text(normalize_status(&s)),
            _ => Cell::Null,
        });
    }

    if let Some(idx) = table.column_index(PARCELAS_ABERTO) {
        table.map_column(idx, |cell| {
            let was_text = cell.as_text().is_some();
            let coerced = coerce_installments(cell);
            if was_text && coerced.is_null() {
                report.invalid_installments += 1;
            }
            coerced
        });
    }

    let status_of = |row: &[Cell]| status_idx.and_then(|i| row[i].as_text().map(str::to_string));

    report.dropped_null_status = table.retain_rows(|row| status_of(row).is_some());
    report.dropped_excluded_status = table.retain_rows(|row| match status_of(row) {
        Some(status) => !is_excluded_status(&status),
        None => true,
    });

    tracing::info!(
        kept = table.len(),
        dropped_null_status = report.dropped_null_status,
        dropped_excluded_status = report.dropped_excluded_status,
        "Filtered rows by participation status"
    );
    if report.invalid_installments > 0 {
        tracing::debug!(count = report.invalid_installments, "Unparseable installment counts set to null");
    }

    (table, report)
}
