// Type & derived-field normalizer: date/currency coercion, age, age bracket, region.
use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use shared::models::{Cell, Table};
use shared::utils::brazilian_format;

use crate::config::EngineSettings;
use crate::models::columns::{DATA_NASCIMENTO, DATE_COLUMNS, END_UF, FAIXA_ETARIA, IDADE, REGIAO_UF};
use crate::models::{AgeBracket, Region};

/// Mean Gregorian year length used for the age computation.
pub const DAYS_PER_YEAR: f64 = 365.2425;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizeReport {
    /// Per date column, how many non-empty values could not be parsed.
    pub invalid_dates: BTreeMap<String, usize>,
    /// Non-empty currency values that were not numbers.
    pub invalid_currency: usize,
    /// UF values outside the 27 known codes (still classified as "sul").
    pub unrecognized_uf: usize,
}

/// Tries each chrono format in order; date-time formats keep only the date.
pub fn parse_date(text: &str, formats: &[String]) -> Option<NaiveDate> {
    let text = text.trim();
    formats.iter().find_map(|fmt| {
        NaiveDateTime::parse_from_str(text, fmt)
            .map(|dt| dt.date())
            .or_else(|_| NaiveDate::parse_from_str(text, fmt))
            .ok()
    })
}

pub fn coerce_date(cell: Cell, formats: &[String]) -> Cell {
    match cell {
        Cell::Date(d) => Cell::Date(d),
        Cell::Text(s) => parse_date(&s, formats).map_or(Cell::Null, Cell::Date),
        _ => Cell::Null,
    }
}

/// Whole years between `birth` and `reference`, rounded down.
pub fn compute_age(birth: NaiveDate, reference: NaiveDate) -> i64 {
    let days = reference.signed_duration_since(birth).num_days();
    (days as f64 / DAYS_PER_YEAR).floor() as i64
}

pub fn age_bracket(age: Option<i64>) -> Option<AgeBracket> {
    age.map(AgeBracket::from_age)
}

pub fn region(uf: Option<&str>) -> Option<Region> {
    uf.map(Region::from_uf)
}

fn coerce_currency(cell: Cell) -> Cell {
    match cell {
        Cell::Number(v) => Cell::Number(v),
        Cell::Integer(i) => Cell::Number(i as f64),
        Cell::Text(s) => brazilian_format::parse_currency(Some(&s)).map_or(Cell::Null, Cell::Number),
        Cell::Null => brazilian_format::parse_currency(None).map_or(Cell::Null, Cell::Number),
        Cell::Date(_) => Cell::Null,
    }
}

fn label_cell(label: Option<&'static str>) -> Cell {
    label.map_or(Cell::Null, |l| Cell::Text(l.to_string()))
}

/// Coerces the date and currency columns, then appends `idade`,
/// `faixa_etaria` and `regiao_uf`. Columns absent from `table` are skipped and
/// their derived values are null.
pub fn normalize_types(
    mut table: Table,
    settings: &EngineSettings,
    reference_date: NaiveDate,
) -> (Table, NormalizeReport) {
    let mut report = NormalizeReport::default();

    for name in DATE_COLUMNS {
        let Some(idx) = table.column_index(name) else { continue };
        let mut invalid = 0;
        table.map_column(idx, |cell| {
            let was_text = cell.as_text().is_some();
            let coerced = coerce_date(cell, &settings.date_formats);
            if was_text && coerced.is_null() {
                invalid += 1;
            }
            coerced
        });
        if invalid > 0 {
            tracing::debug!(column = name, invalid, "Unparseable dates set to null");
        }
        report.invalid_dates.insert(name.to_string(), invalid);
    }

    for name in &settings.currency_columns {
        let Some(idx) = table.column_index(name) else {
            tracing::warn!(column = %name, "Configured currency column not present; skipped");
            continue;
        };
        table.map_column(idx, |cell| {
            let was_text = cell.as_text().is_some();
            let coerced = coerce_currency(cell);
            if was_text && coerced.is_null() {
                report.invalid_currency += 1;
            }
            coerced
        });
    }

    let birth_idx = table.column_index(DATA_NASCIMENTO);
    table.append_column(IDADE, |row| {
        birth_idx
            .and_then(|i| row[i].as_date())
            .map_or(Cell::Null, |birth| Cell::Integer(compute_age(birth, reference_date)))
    });

    let age_idx = table.columns.len() - 1;
    table.append_column(FAIXA_ETARIA, |row| {
        let age = match row[age_idx] {
            Cell::Integer(a) => Some(a),
            _ => None,
        };
        label_cell(age_bracket(age).map(AgeBracket::label))
    });

    let uf_idx = table.column_index(END_UF);
    table.append_column(REGIAO_UF, |row| {
        let uf = uf_idx.and_then(|i| row[i].as_text());
        if let Some(code) = uf {
            if !Region::is_known_uf(code) {
                report.unrecognized_uf += 1;
            }
        }
        label_cell(region(uf).map(Region::label))
    });

    if report.unrecognized_uf > 0 {
        tracing::warn!(
            count = report.unrecognized_uf,
            "UF values outside the 27 known codes were classified as 'sul'"
        );
    }

    (table, report)
}
