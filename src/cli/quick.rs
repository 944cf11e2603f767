use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::print_json;
use crate::error::Result;
use crate::fmt::money;
use crate::payroll::compute_payroll;
use crate::reconciler::{compute_reconciliation_status, ReconciliationStatus};
use crate::settings::load_settings;

pub fn payroll(base: f64, allowances: f64, deductions: f64, json: bool) -> Result<()> {
    let p = compute_payroll(base, allowances, deductions);
    if json {
        return print_json(&p);
    }
    let symbol = load_settings().currency_symbol;

    let mut table = Table::new();
    table.set_header(vec!["Item", "Amount"]);
    table.add_row(vec![Cell::new("Base salary"), Cell::new(money(base, &symbol))]);
    table.add_row(vec![Cell::new("Allowances"), Cell::new(money(allowances, &symbol))]);
    table.add_row(vec![Cell::new("Gross pay".bold()), Cell::new(money(p.gross_pay, &symbol))]);
    table.add_row(vec![Cell::new("Pension (7%)"), Cell::new(money(p.pension, &symbol))]);
    table.add_row(vec![Cell::new("PAYE (10%)"), Cell::new(money(p.paye, &symbol))]);
    table.add_row(vec![Cell::new("Deductions"), Cell::new(money(deductions, &symbol))]);
    table.add_row(vec![Cell::new("NET PAY".green().bold()), Cell::new(money(p.net_pay, &symbol))]);
    println!("Payslip\n{table}");
    Ok(())
}

pub fn reconcile(internal: f64, statement: f64, json: bool) -> Result<()> {
    let status = compute_reconciliation_status(internal, statement);
    if json {
        return print_json(&status);
    }
    let symbol = load_settings().currency_symbol;

    match status {
        ReconciliationStatus::Matched => {
            println!("{} {}", "Matched.".green().bold(), money(internal, &symbol));
        }
        ReconciliationStatus::OverBy(amount) | ReconciliationStatus::UnderBy(amount) => {
            let direction = if matches!(status, ReconciliationStatus::OverBy(_)) {
                "OVER"
            } else {
                "UNDER"
            };
            println!(
                "{} by {}\n  Internal:   {}\n  Statement:  {}",
                direction.red().bold(),
                money(amount, &symbol),
                money(internal, &symbol),
                money(statement, &symbol)
            );
        }
    }
    Ok(())
}
