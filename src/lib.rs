//! Derived metrics for a small-business ERP: project profitability, task
//! schedule adherence, payroll net pay, account reconciliation and balance
//! sheet totals. Every calculator is a pure function over borrowed records.

pub mod aggregate;
pub mod balance_sheet;
pub mod cli;
pub mod dataset;
pub mod demo;
pub mod error;
pub mod fmt;
pub mod logging;
pub mod models;
pub mod payroll;
pub mod profitability;
pub mod reconciler;
pub mod schedule;
pub mod settings;

pub use balance_sheet::{compute_ledger_totals, BalanceSheetSections, LedgerTotals};
pub use error::{MetricsError, Result};
pub use payroll::{compute_payroll, PayrollBreakdown};
pub use profitability::{compute_project_profitability, ProfitabilityMetrics};
pub use reconciler::{compute_reconciliation_status, ReconciliationStatus};
pub use schedule::{compute_project_task_metrics, TaskMetrics};
