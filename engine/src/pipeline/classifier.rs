// Billing classifier: ordered substring rules over (status, open installments).
use std::collections::BTreeMap;

use shared::models::{Cell, Table};

use crate::models::columns::{PARCELAS_ABERTO, STATUS_PARTICIPACAO, TIPO_FATURAMENTO};
use crate::models::BillingCategory;

/// One classification rule. Rules are evaluated in order; the first match wins.
pub struct BillingRule {
    pub tag: &'static str,
    pub category: BillingCategory,
    matches: fn(&str, f64) -> bool,
}

impl BillingRule {
    pub fn matches(&self, status: &str, installments: f64) -> bool {
        (self.matches)(status, installments)
    }
}

// A status such as "ativo 1a parcela" must fall past the regular-payment rule.
pub const BILLING_RULES: [BillingRule; 4] = [
    BillingRule {
        tag: "active",
        category: BillingCategory::RegularPayment,
        matches: |s, n| s.contains("ativo") && !s.contains("1a") && !s.contains("suspenso") && n >= 0.0,
    },
    BillingRule {
        tag: "first-installment",
        category: BillingCategory::EnrollmentPayment,
        matches: |s, n| s.contains("1a") && n == 1.0,
    },
    BillingRule {
        tag: "first-installment-retry",
        category: BillingCategory::EnrollmentRetry,
        matches: |s, n| s.contains("1a") && n > 1.0,
    },
    BillingRule {
        tag: "suspended",
        category: BillingCategory::Regularization,
        matches: |s, _| s.contains("suspenso"),
    },
];

/// Maps a participation status and open-installment count to a billing category.
/// Missing inputs (or a NaN count) are always [`BillingCategory::Invalid`].
pub fn classify(status: Option<&str>, installments: Option<f64>) -> BillingCategory {
    let (Some(status), Some(installments)) = (status, installments.filter(|n| !n.is_nan())) else {
        return BillingCategory::Invalid;
    };
    let status = status.to_lowercase();
    BILLING_RULES
        .iter()
        .find(|rule| rule.matches(&status, installments))
        .map_or(BillingCategory::Invalid, |rule| rule.category)
}

/// Appends `tipo_faturamento` and returns how many rows fell in each category.
pub fn classify_table(table: &mut Table) -> BTreeMap<String, usize> {
    let status_idx = table.column_index(STATUS_PARTICIPACAO);
    let installments_idx = table.column_index(PARCELAS_ABERTO);
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();

    table.append_column(TIPO_FATURAMENTO, |row| {
        let status = status_idx.and_then(|i| row[i].as_text());
        let installments = installments_idx.and_then(|i| row[i].as_f64());
        let category = classify(status, installments);
        *counts.entry(category.label().to_string()).or_default() += 1;
        Cell::Text(category.label().to_string())
    });

    tracing::info!(categories = ?counts, "Classified billing types");
    counts
}
