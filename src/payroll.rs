use serde::Serialize;

use crate::aggregate::{group_by, sum};
use crate::models::PayrollEntry;

/// Employee pension contribution, as a share of base salary.
pub const PENSION_RATE: f64 = 0.07;
/// Flat PAYE rate applied to gross pay less pension.
pub const PAYE_RATE: f64 = 0.10;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayrollBreakdown {
    pub gross_pay: f64,
    pub pension: f64,
    pub paye: f64,
    pub net_pay: f64,
}

/// Net pay under the flat 7% pension / 10% PAYE policy. Inputs are not
/// validated; negative figures flow through the arithmetic unchanged.
pub fn compute_payroll(base_salary: f64, allowances: f64, deductions: f64) -> PayrollBreakdown {
    let pension = base_salary * PENSION_RATE;
    let gross_pay = base_salary + allowances;
    let taxable_income = gross_pay - pension;
    let paye = taxable_income * PAYE_RATE;
    PayrollBreakdown {
        gross_pay,
        pension,
        paye,
        net_pay: gross_pay - deductions - pension - paye,
    }
}

pub fn compute_entry(entry: &PayrollEntry) -> PayrollBreakdown {
    compute_payroll(entry.base_salary, entry.allowances, entry.deductions)
}

// ---------------------------------------------------------------------------
// Period summaries
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayslipLine {
    pub employee_id: String,
    pub employee_name: String,
    pub base_salary: f64,
    pub allowances: f64,
    pub deductions: f64,
    #[serde(flatten)]
    pub breakdown: PayrollBreakdown,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayrollPeriodSummary {
    pub period: String,
    pub employees: usize,
    pub lines: Vec<PayslipLine>,
    pub total_gross: f64,
    pub total_pension: f64,
    pub total_paye: f64,
    pub total_deductions: f64,
    pub total_net: f64,
}

/// One summary per pay period, in ascending period order. Lines keep the
/// order the entries were supplied in.
pub fn summarize_payroll(entries: &[PayrollEntry]) -> Vec<PayrollPeriodSummary> {
    group_by(entries, |e| e.period.clone())
        .into_iter()
        .map(|(period, group)| {
            let lines: Vec<PayslipLine> = group
                .into_iter()
                .map(|e| PayslipLine {
                    employee_id: e.employee_id.clone(),
                    employee_name: e.employee_name.clone(),
                    base_salary: e.base_salary,
                    allowances: e.allowances,
                    deductions: e.deductions,
                    breakdown: compute_entry(e),
                })
                .collect();
            PayrollPeriodSummary {
                period,
                employees: lines.len(),
                total_gross: sum(&lines, |l| l.breakdown.gross_pay),
                total_pension: sum(&lines, |l| l.breakdown.pension),
                total_paye: sum(&lines, |l| l.breakdown.paye),
                total_deductions: sum(&lines, |l| l.deductions),
                total_net: sum(&lines, |l| l.breakdown.net_pay),
                lines,
            }
        })
        .collect()
}
