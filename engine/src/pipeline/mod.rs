//! Billing pipeline: four pure stages applied in sequence to one table.
//!
//! ```text
//!  raw table
//!      │
//!      ▼
//!  projector    keep the 25 required columns, fail on missing ones
//!      │
//!      ▼
//!  normalizer   dates, currency, idade / faixa_etaria / regiao_uf
//!      │
//!      ▼
//!  categorical  program alias, status, installments, row filtering
//!      │
//!      ▼
//!  classifier   tipo_faturamento
//! ```
pub mod categorical;
pub mod classifier;
pub mod normalizer;
pub mod projector;

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use shared::models::Table;

use crate::config::EngineSettings;
use crate::error::EngineResult;

/// What happened to the rows of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineReport {
    pub reference_date: NaiveDate,
    pub rows_in: usize,
    pub rows_out: usize,
    pub dropped_null_status: usize,
    pub dropped_excluded_status: usize,
    pub invalid_dates: BTreeMap<String, usize>,
    pub invalid_installments: usize,
    pub invalid_currency: usize,
    pub unrecognized_uf: usize,
    pub billing_categories: BTreeMap<String, usize>,
}

#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub table: Table,
    pub report: PipelineReport,
}

/// Runs every stage on a copy of `raw`. `reference_date` is the "today" used
/// for ages, so a fixed date gives reproducible output.
pub fn run(raw: &Table, settings: &EngineSettings, reference_date: NaiveDate) -> EngineResult<PipelineOutput> {
    let rows_in = raw.len();
    tracing::info!(rows = rows_in, %reference_date, "Starting billing pipeline");

    let projected = projector::project(raw)?;
    let (typed, normalize_report) = normalizer::normalize_types(projected, settings, reference_date);
    let (mut filtered, filter_report) = categorical::normalize_categories(typed);
    let billing_categories = classifier::classify_table(&mut filtered);

    let report = PipelineReport {
        reference_date,
        rows_in,
        rows_out: filtered.len(),
        dropped_null_status: filter_report.dropped_null_status,
        dropped_excluded_status: filter_report.dropped_excluded_status,
        invalid_dates: normalize_report.invalid_dates,
        invalid_installments: filter_report.invalid_installments,
        invalid_currency: normalize_report.invalid_currency,
        unrecognized_uf: normalize_report.unrecognized_uf,
        billing_categories,
    };

    tracing::info!(
        rows_in = report.rows_in,
        rows_out = report.rows_out,
        dropped = report.dropped_null_status + report.dropped_excluded_status,
        "Billing pipeline finished"
    );

    Ok(PipelineOutput { table: filtered, report })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::columns::{
        DATA_NASCIMENTO, DERIVED_COLUMNS, END_UF, FAIXA_ETARIA, IDADE, PARCELAS_ABERTO, PROGRAMA_BENEFICIO, REGIAO_UF,
        REQUIRED_COLUMNS, STATUS_PARTICIPACAO, TIPO_FATURAMENTO,
    };
    use shared::models::Cell;

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn raw_table(rows: &[&[(&str, &str)]]) -> Table {
        let mut columns: Vec<String> = REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect();
        columns.push("observacao".to_string());
        let mut table = Table::new(columns);
        for values in rows {
            let row = table
                .columns
                .iter()
                .map(|col| {
                    values
                        .iter()
                        .find(|(k, _)| k == col)
                        .map_or(Cell::Null, |(_, v)| Cell::from_field(v))
                })
                .collect();
            table.push_row(row);
        }
        table
    }

    #[test]
    fn end_to_end_single_active_row() {
        let raw = raw_table(&[&[
            (STATUS_PARTICIPACAO, "Ativo"),
            (PARCELAS_ABERTO, "0"),
            (END_UF, "SP"),
            (DATA_NASCIMENTO, "1990-01-01"),
            (PROGRAMA_BENEFICIO, "VIVERMAIS"),
        ]]);

        let out = run(&raw, &EngineSettings::default(), reference()).unwrap();
        let t = &out.table;

        assert_eq!(t.columns.len(), REQUIRED_COLUMNS.len() + DERIVED_COLUMNS.len());
        assert_eq!(t.columns[..REQUIRED_COLUMNS.len()], REQUIRED_COLUMNS);
        assert_eq!(t.columns[REQUIRED_COLUMNS.len()..], DERIVED_COLUMNS);
        assert!(t.column_index("observacao").is_none());
        assert_eq!(t.get(0, REGIAO_UF), Some(&Cell::Text("sudeste".into())));
        assert_eq!(t.get(0, PROGRAMA_BENEFICIO), Some(&Cell::Text("VIVERMAIS PROTEÇÃO".into())));
        assert_eq!(t.get(0, TIPO_FATURAMENTO), Some(&Cell::Text("pagamento regular".into())));
        assert_eq!(t.get(0, IDADE), Some(&Cell::Integer(36)));
        assert_eq!(t.get(0, FAIXA_ETARIA), Some(&Cell::Text("35 a 44".into())));
        assert_eq!(out.report.rows_in, 1);
        assert_eq!(out.report.rows_out, 1);
    }

    #[test]
    fn report_counts_drops_and_categories() {
        let raw = raw_table(&[
            &[(STATUS_PARTICIPACAO, "ATIVO"), (PARCELAS_ABERTO, "2")],
            &[(STATUS_PARTICIPACAO, "CANCELAMENTO SOLICITADO"), (PARCELAS_ABERTO, "0")],
            &[(PARCELAS_ABERTO, "1")],
            &[(STATUS_PARTICIPACAO, "Aguardando 1ª parcela"), (PARCELAS_ABERTO, "1")],
            &[(STATUS_PARTICIPACAO, "Suspenso"), (PARCELAS_ABERTO, "abc"), (END_UF, "ZZ")],
        ]);

        let out = run(&raw, &EngineSettings::default(), reference()).unwrap();
        let r = &out.report;

        assert_eq!(r.rows_in, 5);
        assert_eq!(r.rows_out, 3);
        assert_eq!(r.dropped_null_status, 1);
        assert_eq!(r.dropped_excluded_status, 1);
        assert_eq!(r.invalid_installments, 1);
        assert_eq!(r.unrecognized_uf, 1);
        assert_eq!(r.billing_categories.get("pagamento regular"), Some(&1));
        assert_eq!(r.billing_categories.get("pagamento adesão"), Some(&1));
        // Null installments win over the "suspenso" rule.
        assert_eq!(r.billing_categories.get("inválido"), Some(&1));
    }

    #[test]
    fn missing_column_stops_the_run() {
        let table = Table::new(vec![STATUS_PARTICIPACAO.to_string()]);
        let err = run(&table, &EngineSettings::default(), reference()).unwrap_err();
        assert!(matches!(err, EngineError::MissingColumns(ref m) if m.len() == REQUIRED_COLUMNS.len() - 1));
    }

    #[test]
    fn rerun_on_own_output_is_stable() {
        let raw = raw_table(&[
            &[
                (STATUS_PARTICIPACAO, "Ativo"),
                (PARCELAS_ABERTO, "0"),
                (END_UF, "BA"),
                (DATA_NASCIMENTO, "15/06/1950"),
            ],
            &[(STATUS_PARTICIPACAO, "1ª parcela"), (PARCELAS_ABERTO, "3"), (END_UF, "RS")],
        ]);
        let settings = EngineSettings::default();

        let first = run(&raw, &settings, reference()).unwrap().table;
        let again = run(&projector::project(&first).unwrap(), &settings, reference())
            .unwrap()
            .table;

        assert_eq!(first, again);
    }

    #[test]
    fn report_serializes_to_json() {
        let raw = raw_table(&[&[(STATUS_PARTICIPACAO, "ativo"), (PARCELAS_ABERTO, "0")]]);
        let out = run(&raw, &EngineSettings::default(), reference()).unwrap();
        let json = serde_json::to_value(&out.report).unwrap();
        assert_eq!(json["reference_date"], "2026-10-18");
        assert_eq!(json["billing_categories"]["pagamento regular"], 1);
    }
}
