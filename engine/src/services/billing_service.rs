// Single synchronous entry point for front ends: load, run the pipeline, export.
use std::path::Path;

use chrono::NaiveDate;
use shared::models::Table;

use crate::config::EngineSettings;
use crate::data::csv_parser::BrazilianCsvParser;
use crate::data::xlsx_writer::XlsxExporter;
use crate::error::EngineResult;
use crate::pipeline::{self, PipelineReport};

/// Result of a processed upload: the raw and treated tables plus the run report.
#[derive(Debug, Clone)]
pub struct ProcessOutcome {
    pub raw: Table,
    pub treated: Table,
    pub report: PipelineReport,
}

pub struct BillingService {
    settings: EngineSettings,
}

impl BillingService {
    pub fn new(settings: EngineSettings) -> Self {
        BillingService { settings }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn load_table(&self, path: &Path) -> EngineResult<Table> {
        BrazilianCsvParser::load_table_from_path(path, &self.settings)
    }

    pub fn process_table(&self, raw: Table, reference_date: NaiveDate) -> EngineResult<ProcessOutcome> {
        let output = pipeline::run(&raw, &self.settings, reference_date)?;
        Ok(ProcessOutcome {
            raw,
            treated: output.table,
            report: output.report,
        })
    }

    /// Processes uploaded CSV bytes and returns the outcome with the workbook bytes.
    pub fn process_bytes(&self, bytes: &[u8], reference_date: NaiveDate) -> EngineResult<(ProcessOutcome, Vec<u8>)> {
        let raw = BrazilianCsvParser::load_table_from_bytes(bytes, &self.settings)?;
        let outcome = self.process_table(raw, reference_date)?;
        let workbook = self.exporter().to_bytes(&outcome.treated)?;
        Ok((outcome, workbook))
    }

    pub fn process_file(&self, input: &Path, output: &Path, reference_date: NaiveDate) -> EngineResult<ProcessOutcome> {
        tracing::info!(input = %input.display(), output = %output.display(), "Processing billing file");
        let raw = self.load_table(input)?;
        let outcome = self.process_table(raw, reference_date)?;
        self.exporter().write_to_path(&outcome.treated, output)?;
        Ok(outcome)
    }

    fn exporter(&self) -> XlsxExporter {
        XlsxExporter::new(self.settings.sheet_name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::columns::REQUIRED_COLUMNS;
    use shared::models::Cell;

    fn csv_rows(rows: &[(&str, &str, &str)]) -> Vec<u8> {
        let mut text = REQUIRED_COLUMNS.join(";");
        text.push('\n');
        for (status, parcelas, uf) in rows {
            let values: Vec<&str> = REQUIRED_COLUMNS
                .iter()
                .map(|c| match *c {
                    "status_participacao" => *status,
                    "parcelas_aberto" => *parcelas,
                    "end_uf" => *uf,
                    _ => "",
                })
                .collect();
            text.push_str(&values.join(";"));
            text.push('\n');
        }
        text.into_bytes()
    }

    fn csv_with(status: &str, parcelas: &str) -> Vec<u8> {
        csv_rows(&[(status, parcelas, "MG")])
    }

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[test]
    fn process_bytes_returns_workbook() {
        let service = BillingService::new(EngineSettings::default());
        let (outcome, workbook) = service.process_bytes(&csv_with("Ativo", "0"), reference()).unwrap();

        assert_eq!(outcome.raw.len(), 1);
        assert_eq!(outcome.treated.len(), 1);
        assert_eq!(outcome.report.rows_out, 1);
        assert_eq!(&workbook[..2], b"PK");
    }

    #[test]
    fn null_markers_are_treated_as_missing_values() {
        let service = BillingService::new(EngineSettings::default());
        let bytes = csv_rows(&[("NULL", "0", "SP"), ("N/A", "1", "RJ"), ("Ativo", "0", "NA")]);
        let (outcome, _) = service.process_bytes(&bytes, reference()).unwrap();

        assert_eq!(outcome.report.rows_in, 3);
        assert_eq!(outcome.report.rows_out, 1);
        assert_eq!(outcome.report.dropped_null_status, 2);
        assert_eq!(outcome.report.unrecognized_uf, 0);
        assert_eq!(outcome.treated.get(0, "regiao_uf"), Some(&Cell::Null));
        assert_eq!(outcome.treated.get(0, "tipo_faturamento"), Some(&Cell::Text("pagamento regular".into())));
    }

    #[test]
    fn process_bytes_surfaces_missing_columns() {
        let service = BillingService::new(EngineSettings::default());
        let err = service.process_bytes(b"status_participacao\nativo\n", reference()).unwrap_err();
        assert!(matches!(err, EngineError::MissingColumns(_)));
    }

    #[test]
    fn process_file_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("base.csv");
        let output = dir.path().join("faturamento_mensal.xlsx");
        std::fs::write(&input, csv_with("Suspenso", "4")).unwrap();

        let service = BillingService::new(EngineSettings::default());
        let outcome = service.process_file(&input, &output, reference()).unwrap();

        assert_eq!(outcome.report.billing_categories.get("regularização"), Some(&1));
        assert!(output.exists());
    }
}
