// Service layer: ties the CSV adapter, the pipeline and the XLSX exporter together.
pub mod billing_service;

pub use billing_service::{BillingService, ProcessOutcome};
