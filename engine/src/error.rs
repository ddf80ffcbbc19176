use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Configuration file is not valid JSON: {source}")]
    ConfigParseError {
        #[from]
        source: serde_json::Error,
    },

    #[error("Unsupported input encoding '{0}'")]
    UnsupportedEncoding(String),

    #[error("CSV parsing system error: {source}")]
    CsvSystemError {
        #[from]
        source: csv::Error,
    },

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("CSV data format error: {0}")]
    CsvDataFormatError(String),

    // Fatal for the invocation: nothing downstream runs on a partial table.
    #[error("Missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Input has {actual} rows, above the configured limit of {limit}")]
    RowLimitExceeded { limit: usize, actual: usize },

    #[error("Spreadsheet export error: {source}")]
    SpreadsheetError {
        #[from]
        source: rust_xlsxwriter::XlsxError,
    },
}

pub type EngineResult<T> = Result<T, EngineError>;
