// Shared data model for the billing workspace.
// `models` holds the in-memory table the pipeline stages pass along,
// `utils` the Brazilian number-format helpers.
pub mod models;
pub mod utils;

pub use models::{Cell, Table};
