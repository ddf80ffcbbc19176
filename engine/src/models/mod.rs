// Engine-specific data models.
// The table itself lives in the `shared` crate; this module names its
// columns and the label sets written into the derived ones.
pub mod columns;
pub mod labels;

pub use labels::{AgeBracket, BillingCategory, Region};
