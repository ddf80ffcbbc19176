// Billing engine library root.
// `pipeline` is the pure transformation core; `data` and `services` are the
// adapters that read the CSV export and write the spreadsheet.

pub mod config;
pub mod data;
pub mod error;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod services;

pub use error::{EngineError, EngineResult};
