use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

use crate::aggregate::sum;
use crate::models::{AccountType, ReconciliationAccount};

/// Differences below one cent are treated as floating-point noise.
pub const MATCH_TOLERANCE: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReconciliationStatus {
    Matched,
    /// Internal books exceed the statement by this amount.
    OverBy(f64),
    /// Internal books fall short of the statement by this amount.
    UnderBy(f64),
}

impl ReconciliationStatus {
    pub fn amount(&self) -> f64 {
        match self {
            ReconciliationStatus::Matched => 0.0,
            ReconciliationStatus::OverBy(a) | ReconciliationStatus::UnderBy(a) => *a,
        }
    }

    pub fn is_matched(&self) -> bool {
        matches!(self, ReconciliationStatus::Matched)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReconciliationStatus::Matched => "Matched",
            ReconciliationStatus::OverBy(_) => "OverBy",
            ReconciliationStatus::UnderBy(_) => "UnderBy",
        }
    }
}

/// Always `{status, amount}`; a match carries an amount of zero.
impl Serialize for ReconciliationStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ReconciliationStatus", 2)?;
        state.serialize_field("status", self.label())?;
        state.serialize_field("amount", &self.amount())?;
        state.end()
    }
}

pub fn compute_reconciliation_status(
    internal_balance: f64,
    bank_statement_balance: f64,
) -> ReconciliationStatus {
    let difference = internal_balance - bank_statement_balance;
    if difference.abs() < MATCH_TOLERANCE {
        ReconciliationStatus::Matched
    } else if difference > 0.0 {
        ReconciliationStatus::OverBy(difference.abs())
    } else {
        ReconciliationStatus::UnderBy(difference.abs())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconciliationLine {
    pub name: String,
    pub account_type: AccountType,
    pub internal_balance: f64,
    pub bank_statement_balance: f64,
    pub status: ReconciliationStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconciliationSummary {
    pub lines: Vec<ReconciliationLine>,
    pub matched: usize,
    pub unmatched: usize,
    pub total_internal: f64,
    pub total_statement: f64,
    /// Sum of absolute per-account differences, so overs and unders don't cancel.
    pub total_discrepancy: f64,
}

pub fn reconcile_accounts(accounts: &[ReconciliationAccount]) -> ReconciliationSummary {
    let lines: Vec<ReconciliationLine> = accounts
        .iter()
        .map(|a| ReconciliationLine {
            name: a.name.clone(),
            account_type: a.account_type,
            internal_balance: a.internal_balance,
            bank_statement_balance: a.bank_statement_balance,
            status: compute_reconciliation_status(a.internal_balance, a.bank_statement_balance),
        })
        .collect();

    let matched = lines.iter().filter(|l| l.status.is_matched()).count();
    ReconciliationSummary {
        matched,
        unmatched: lines.len() - matched,
        total_internal: sum(accounts, |a| a.internal_balance),
        total_statement: sum(accounts, |a| a.bank_statement_balance),
        total_discrepancy: sum(&lines, |l| l.status.amount()),
        lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(name: &str, internal: f64, bank: f64) -> ReconciliationAccount {
        ReconciliationAccount {
            name: name.to_string(),
            account_type: AccountType::Bank,
            internal_balance: internal,
            bank_statement_balance: bank,
        }
    }

    #[test]
    fn test_over() {
        let s = compute_reconciliation_status(125_000.0, 124_500.0);
        assert_eq!(s, ReconciliationStatus::OverBy(500.0));
        assert_eq!(s.amount(), 500.0);
    }

    #[test]
    fn test_matching_balance() {
        let s = compute_reconciliation_status(22_000.0, 22_000.0);
        assert!(s.is_matched());
        assert_eq!(s.amount(), 0.0);
    }

    #[test]
    fn test_under() {
        let s = compute_reconciliation_status(900.0, 1000.0);
        assert_eq!(s, ReconciliationStatus::UnderBy(100.0));
    }

    #[test]
    fn test_sub_cent_noise_is_matched() {
        assert!(compute_reconciliation_status(0.1 + 0.2, 0.3).is_matched());
        assert!(compute_reconciliation_status(100.004, 100.0).is_matched());
        assert!(!compute_reconciliation_status(100.02, 100.0).is_matched());
    }

    #[test]
    fn test_status_serializes_with_amount() {
        let json = serde_json::to_string(&ReconciliationStatus::OverBy(500.0)).unwrap();
        assert_eq!(json, r#"{"status":"OverBy","amount":500.0}"#);
        let json = serde_json::to_string(&ReconciliationStatus::Matched).unwrap();
        assert_eq!(json, r#"{"status":"Matched","amount":0.0}"#);
    }

    #[test]
    fn test_matched_line_serializes_zero_amount() {
        let summary = reconcile_accounts(&[account("Petty Cash", 22_000.0, 22_000.0)]);
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["lines"][0]["status"]["status"], "Matched");
        assert_eq!(value["lines"][0]["status"]["amount"], 0.0);
    }

    #[test]
    fn test_summary_counts_and_discrepancy() {
        let accounts = vec![
            account("Main Checking", 125_000.0, 124_500.0),
            account("Petty Cash", 22_000.0, 22_000.0),
            account("M-Pesa", 4_000.0, 4_250.0),
        ];
        let summary = reconcile_accounts(&accounts);
        assert_eq!(summary.matched, 1);
        assert_eq!(summary.unmatched, 2);
        assert_eq!(summary.total_discrepancy, 750.0);
        assert_eq!(summary.total_internal, 151_000.0);
        assert_eq!(summary.total_statement, 150_750.0);
        assert_eq!(summary.lines[2].status, ReconciliationStatus::UnderBy(250.0));
    }
}
