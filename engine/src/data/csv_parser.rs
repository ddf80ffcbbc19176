use std::collections::HashSet;
use std::path::Path;

use csv::ReaderBuilder;
use encoding_rs::Encoding;
use shared::models::{Cell, Table};

use crate::config::EngineSettings;
use crate::error::{EngineError, EngineResult};

/// Looks up an encoding by WHATWG label, also accepting the Python-style
/// spellings "latin-1" / "utf_8" by retrying without '-' and '_'.
pub fn resolve_encoding(label: &str) -> EngineResult<&'static Encoding> {
    let trimmed = label.trim();
    Encoding::for_label(trimmed.as_bytes())
        .or_else(|| {
            let compact: String = trimmed.chars().filter(|c| *c != '-' && *c != '_').collect();
            Encoding::for_label(compact.as_bytes())
        })
        .ok_or_else(|| EngineError::UnsupportedEncoding(label.to_string()))
}

pub struct BrazilianCsvParser;

impl BrazilianCsvParser {
    // Header row required; column order is free since stages look columns up by name.
    // Example: participacao;proposta;...;status_participacao
    pub fn load_table_from_path(path: &Path, settings: &EngineSettings) -> EngineResult<Table> {
        let bytes = std::fs::read(path)?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "Read CSV file");
        Self::load_table_from_bytes(&bytes, settings)
    }

    /// Decodes `bytes` with the configured encoding and parses them into a table
    /// of `Text`/`Null` cells. Empty fields and the configured `na_values`
    /// become `Null`.
    pub fn load_table_from_bytes(bytes: &[u8], settings: &EngineSettings) -> EngineResult<Table> {
        let encoding = resolve_encoding(&settings.encoding)?;
        let (text, used, had_errors) = encoding.decode(bytes);
        if had_errors {
            tracing::warn!(encoding = used.name(), "Input contained byte sequences invalid for the encoding; replaced");
        }

        let mut rdr = ReaderBuilder::new()
            .delimiter(settings.delimiter_byte()?)
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let na_values: HashSet<&str> = settings.na_values.iter().map(String::as_str).collect();
        let to_cell = |field: &str| {
            if na_values.contains(field) {
                Cell::Null
            } else {
                Cell::from_field(field)
            }
        };

        let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.to_string()).collect();
        let mut table = Table::new(headers);

        let mut records = rdr.records().enumerate();
        while let Some((idx, result)) = records.next() {
            let record = result.map_err(|e| {
                EngineError::CsvDataFormatError(format!("Error reading CSV record at line {}: {}", idx + 2, e))
            })?;

            if record.len() > table.columns.len() {
                return Err(EngineError::CsvDataFormatError(format!(
                    "Line {} has {} fields but the header has {}",
                    idx + 2,
                    record.len(),
                    table.columns.len()
                )));
            }

            if let Some(limit) = settings.max_rows {
                if table.len() >= limit {
                    let actual = table.len() + 1 + records.by_ref().count();
                    return Err(EngineError::RowLimitExceeded { limit, actual });
                }
            }

            table.push_row(record.iter().map(to_cell).collect());
        }

        tracing::info!(
            rows = table.len(),
            columns = table.columns.len(),
            encoding = used.name(),
            "Loaded CSV table"
        );
        Ok(table)
    }
}
