// Engine settings: embedded defaults, optionally overridden by a JSON file.
use std::path::Path;

use serde::Deserialize;

use crate::data::csv_parser::resolve_encoding;
use crate::error::{EngineError, EngineResult};

const DEFAULT_SETTINGS_JSON: &str = include_str!("../../assets/config/default.json");

/// Upper bound for `preview_rows`; the preview is meant to be read on a terminal.
pub const MAX_PREVIEW_ROWS: usize = 1000;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct EngineSettings {
    /// Field delimiter of the input CSV. Must be a single ASCII character.
    pub csv_delimiter: String,
    /// WHATWG encoding label of the input bytes ("latin-1", "utf-8", ...).
    pub encoding: String,
    /// chrono formats tried in order when coercing the date columns.
    pub date_formats: Vec<String>,
    pub output_file_name: String,
    pub sheet_name: String,
    pub preview_rows: usize,
    /// Optional ceiling on input rows; `None` means unlimited.
    pub max_rows: Option<usize>,
    /// Columns converted with the Brazilian currency parser ("R$ 1.234,56").
    pub currency_columns: Vec<String>,
    /// Field values read as missing, matched exactly. Empty fields are always missing.
    pub na_values: Vec<String>,
}

/// Missing-value markers recognized by default, as exported by common spreadsheet
/// and dataframe tools.
pub const DEFAULT_NA_VALUES: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>", "N/A",
    "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            csv_delimiter: ";".to_string(),
            encoding: "latin-1".to_string(),
            date_formats: vec![
                "%Y-%m-%d".to_string(),
                "%Y-%m-%d %H:%M:%S".to_string(),
                "%Y-%m-%d %H:%M".to_string(),
                "%Y-%m-%dT%H:%M:%S".to_string(),
                "%d/%m/%Y".to_string(),
                "%d/%m/%Y %H:%M:%S".to_string(),
                "%d/%m/%Y %H:%M".to_string(),
            ],
            output_file_name: "faturamento_mensal.xlsx".to_string(),
            sheet_name: "Sheet1".to_string(),
            preview_rows: 5,
            max_rows: None,
            currency_columns: Vec::new(),
            na_values: DEFAULT_NA_VALUES.iter().map(|v| v.to_string()).collect(),
        }
    }
}

impl EngineSettings {
    /// Settings bundled with the binary.
    pub fn load_default() -> EngineResult<Self> {
        Self::from_json(DEFAULT_SETTINGS_JSON)
    }

    /// Reads a JSON settings file. Keys absent from the file keep their defaults.
    pub fn from_file(path: &Path) -> EngineResult<Self> {
        let text = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "Loaded settings file");
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> EngineResult<Self> {
        let settings: EngineSettings = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> EngineResult<()> {
        self.delimiter_byte()?;
        resolve_encoding(&self.encoding)?;
        if self.date_formats.is_empty() {
            return Err(EngineError::ConfigError("date_formats cannot be empty".to_string()));
        }
        if self.output_file_name.trim().is_empty() {
            return Err(EngineError::ConfigError("output_file_name cannot be empty".to_string()));
        }
        if self.sheet_name.trim().is_empty() || self.sheet_name.chars().count() > 31 {
            return Err(EngineError::ConfigError(
                "sheet_name must have between 1 and 31 characters".to_string(),
            ));
        }
        if self.preview_rows > MAX_PREVIEW_ROWS {
            return Err(EngineError::ConfigError(format!(
                "preview_rows must be at most {MAX_PREVIEW_ROWS}"
            )));
        }
        Ok(())
    }

    /// The delimiter as the single byte the CSV reader expects.
    pub fn delimiter_byte(&self) -> EngineResult<u8> {
        match self.csv_delimiter.as_bytes() {
            [b] if b.is_ascii() => Ok(*b),
            _ => Err(EngineError::ConfigError(format!(
                "csv_delimiter must be a single ASCII character, got '{}'",
                self.csv_delimiter
            ))),
        }
    }
}
