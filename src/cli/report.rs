use colored::Colorize;
use comfy_table::{Cell, Table};
use tracing::{debug, warn};

use crate::balance_sheet::{compute_ledger_totals, BalanceSheetSections, LedgerTotals};
use crate::cli::{parse_as_of, print_json, validate_period, ReportCommands, ReportContext};
use crate::error::Result;
use crate::fmt::{hours, pct};
use crate::models::{BalanceSheetSection, Task, TaskStatus};
use crate::payroll::{summarize_payroll, PayrollPeriodSummary};
use crate::profitability::{
    compute_project_profitability, summarize_portfolio, PortfolioSummary, ProjectProfitability,
};
use crate::reconciler::{reconcile_accounts, ReconciliationStatus, ReconciliationSummary};
use crate::schedule::{compute_project_task_metrics, TaskMetrics};

pub fn run(command: ReportCommands, dataset: Option<&str>, json: bool) -> Result<()> {
    let ctx = ReportContext::load(dataset)?;
    let body = match command {
        ReportCommands::Profitability { project } => {
            warn_if_unpriced(&ctx);
            let rows = profitability_rows(&ctx, project.as_deref())?;
            if json {
                return print_json(&rows);
            }
            format_profitability(&ctx, &rows)
        }
        ReportCommands::Tasks { project, as_of } => {
            let now = parse_as_of(as_of.as_deref())?;
            let tasks: Vec<&Task> = match project.as_deref() {
                Some(id) => {
                    ctx.dataset.project(id)?;
                    ctx.dataset.tasks_for(id)
                }
                None => ctx.dataset.tasks.iter().collect(),
            };
            debug!(count = tasks.len(), %now, "computing task metrics");
            let metrics = compute_project_task_metrics(&tasks, now);
            if json {
                return print_json(&metrics);
            }
            format_tasks(&metrics)
        }
        ReportCommands::Payroll { period } => {
            if let Some(p) = period.as_deref() {
                validate_period(p)?;
            }
            let summaries: Vec<PayrollPeriodSummary> = summarize_payroll(&ctx.dataset.payroll)
                .into_iter()
                .filter(|s| period.as_deref().map_or(true, |p| s.period == p))
                .collect();
            if json {
                return print_json(&summaries);
            }
            format_payroll(&ctx, &summaries)
        }
        ReportCommands::Reconciliation => {
            let summary = reconcile_accounts(&ctx.dataset.accounts);
            if json {
                return print_json(&summary);
            }
            format_reconciliation(&ctx, &summary)
        }
        ReportCommands::Balance => {
            let sheet = ctx.dataset.ledger_sections();
            let totals = compute_ledger_totals(&sheet);
            if json {
                return print_json(&BalanceJson::new(&totals));
            }
            format_balance(&ctx, &sheet, &totals)
        }
        ReportCommands::Portfolio => {
            warn_if_unpriced(&ctx);
            let d = &ctx.dataset;
            let summary = summarize_portfolio(&d.projects, &d.financials, &d.tasks, &d.rates);
            if json {
                return print_json(&summary);
            }
            format_portfolio(&ctx, &summary)
        }
    };
    println!("{}", ctx.with_header(body));
    Ok(())
}

/// Totals plus the identity check, so JSON consumers get the same signal as
/// the table.
#[derive(serde::Serialize)]
struct BalanceJson {
    #[serde(flatten)]
    totals: LedgerTotals,
    identity_gap: f64,
    is_balanced: bool,
}

impl BalanceJson {
    fn new(totals: &LedgerTotals) -> Self {
        Self {
            totals: *totals,
            identity_gap: totals.identity_gap(),
            is_balanced: totals.is_balanced(),
        }
    }
}

fn profitability_rows(ctx: &ReportContext, only: Option<&str>) -> Result<Vec<ProjectProfitability>> {
    let d = &ctx.dataset;
    let projects = match only {
        Some(id) => vec![d.project(id)?],
        None => d.projects.iter().collect(),
    };
    Ok(projects
        .into_iter()
        .map(|p| ProjectProfitability {
            project_id: p.id.clone(),
            project_name: p.name.clone(),
            metrics: compute_project_profitability(
                p,
                d.financials_for(&p.id),
                &d.tasks_for(&p.id),
                &d.rates,
            ),
        })
        .collect())
}

fn warn_if_unpriced(ctx: &ReportContext) {
    if ctx.dataset.rates.is_empty() && !ctx.dataset.tasks.is_empty() {
        warn!("no employee rates on record, labor costs will be zero");
    }
}

fn signed(text: String, value: f64) -> Cell {
    if value < 0.0 {
        Cell::new(text.red())
    } else {
        Cell::new(text.green())
    }
}

// ---------------------------------------------------------------------------
// Formatters
// ---------------------------------------------------------------------------

pub fn format_profitability(ctx: &ReportContext, rows: &[ProjectProfitability]) -> String {
    let mut out = String::new();
    for row in rows {
        let m = &row.metrics;
        let mut table = Table::new();
        table.set_header(vec!["Metric", "Value"]);
        table.add_row(vec![Cell::new("Revenue"), Cell::new(ctx.money(m.revenue))]);
        table.add_row(vec![Cell::new("  Direct costs"), Cell::new(ctx.money(m.direct_costs))]);
        table.add_row(vec![Cell::new("  Overhead costs"), Cell::new(ctx.money(m.overhead_costs))]);
        table.add_row(vec![Cell::new("  Labor costs"), Cell::new(ctx.money(m.labor_costs))]);
        table.add_row(vec![Cell::new("Total costs".bold()), Cell::new(ctx.money(m.total_costs))]);
        table.add_row(vec![
            Cell::new("Profit / Loss".bold()),
            signed(ctx.money(m.profit_loss), m.profit_loss),
        ]);
        table.add_row(vec![Cell::new("Profit margin"), signed(pct(m.profit_margin), m.profit_margin)]);
        table.add_row(vec![Cell::new("ROI"), signed(pct(m.roi), m.roi)]);
        table.add_row(vec![
            Cell::new("Cost variance"),
            signed(ctx.money(m.cost_variance), m.cost_variance),
        ]);
        table.add_row(vec![Cell::new("Estimated hours"), Cell::new(hours(m.total_estimated_hours))]);
        table.add_row(vec![Cell::new("Revenue per hour"), Cell::new(ctx.money(m.revenue_per_hour))]);
        out.push_str(&format!("{} ({})\n{table}\n", row.project_name, row.project_id));
    }
    if out.is_empty() {
        out.push_str("No projects in dataset.\n");
    }
    out
}

pub fn format_tasks(m: &TaskMetrics) -> String {
    let mut status = Table::new();
    status.set_header(vec!["Status", "Tasks"]);
    for s in TaskStatus::ALL {
        status.add_row(vec![
            Cell::new(s.label()),
            Cell::new(m.task_distribution.get(&s).copied().unwrap_or(0)),
        ]);
    }
    status.add_row(vec![Cell::new("Total".bold()), Cell::new(m.total_tasks)]);
    let overdue = if m.overdue_tasks > 0 {
        Cell::new(m.overdue_tasks.to_string().red().bold())
    } else {
        Cell::new(m.overdue_tasks)
    };
    status.add_row(vec![Cell::new("Overdue"), overdue]);

    let mut team = Table::new();
    team.set_header(vec!["Assignee", "Assigned", "Completed", "Rate", "Est.", "Actual"]);
    for (name, perf) in &m.team_performance {
        team.add_row(vec![
            Cell::new(name),
            Cell::new(perf.assigned),
            Cell::new(perf.completed),
            Cell::new(pct(perf.completion_rate())),
            Cell::new(hours(perf.total_estimated_hours)),
            Cell::new(hours(perf.total_actual_hours)),
        ]);
    }

    let mut schedule = Table::new();
    schedule.set_header(vec!["Schedule", "Tasks"]);
    schedule.add_row(vec![Cell::new("Ahead".green()), Cell::new(m.tasks_ahead_schedule)]);
    schedule.add_row(vec![Cell::new("On schedule"), Cell::new(m.tasks_on_schedule)]);
    schedule.add_row(vec![Cell::new("Behind".red()), Cell::new(m.tasks_behind_schedule)]);
    schedule.add_row(vec![
        Cell::new("Variance (days)".bold()),
        Cell::new(m.schedule_variance_days),
    ]);

    format!(
        "Task Status ({} complete)\n{status}\n\nTeam Performance\n{team}\n\nSchedule Adherence\n{schedule}",
        pct(m.completion_rate())
    )
}

pub fn format_payroll(ctx: &ReportContext, summaries: &[PayrollPeriodSummary]) -> String {
    if summaries.is_empty() {
        return "No payroll entries for the selected period.".to_string();
    }
    let mut out = String::new();
    for s in summaries {
        let mut table = Table::new();
        table.set_header(vec!["Employee", "Gross", "Pension", "PAYE", "Deductions", "Net"]);
        for line in &s.lines {
            let name = if line.employee_name.is_empty() {
                line.employee_id.clone()
            } else {
                line.employee_name.clone()
            };
            table.add_row(vec![
                Cell::new(name),
                Cell::new(ctx.money(line.breakdown.gross_pay)),
                Cell::new(ctx.money(line.breakdown.pension)),
                Cell::new(ctx.money(line.breakdown.paye)),
                Cell::new(ctx.money(line.deductions)),
                Cell::new(ctx.money(line.breakdown.net_pay)),
            ]);
        }
        table.add_row(vec![
            Cell::new("Total".bold()),
            Cell::new(ctx.money(s.total_gross)),
            Cell::new(ctx.money(s.total_pension)),
            Cell::new(ctx.money(s.total_paye)),
            Cell::new(ctx.money(s.total_deductions)),
            Cell::new(ctx.money(s.total_net).bold()),
        ]);
        out.push_str(&format!("Payroll {} ({} employees)\n{table}\n", s.period, s.employees));
    }
    out
}

pub fn format_reconciliation(ctx: &ReportContext, summary: &ReconciliationSummary) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Account", "Type", "Internal", "Statement", "Status"]);
    for line in &summary.lines {
        let status = match line.status {
            ReconciliationStatus::Matched => Cell::new("Matched".green()),
            ReconciliationStatus::OverBy(a) => {
                Cell::new(format!("Over by {}", ctx.money(a)).red())
            }
            ReconciliationStatus::UnderBy(a) => {
                Cell::new(format!("Under by {}", ctx.money(a)).red())
            }
        };
        table.add_row(vec![
            Cell::new(&line.name),
            Cell::new(line.account_type),
            Cell::new(ctx.money(line.internal_balance)),
            Cell::new(ctx.money(line.bank_statement_balance)),
            status,
        ]);
    }
    table.add_row(vec![
        Cell::new("Total".bold()),
        Cell::new(""),
        Cell::new(ctx.money(summary.total_internal)),
        Cell::new(ctx.money(summary.total_statement)),
        Cell::new(format!("{} matched, {} unmatched", summary.matched, summary.unmatched)),
    ]);
    format!(
        "Reconciliation\n{table}\nTotal discrepancy: {}",
        ctx.money(summary.total_discrepancy)
    )
}

pub fn format_balance(
    ctx: &ReportContext,
    sheet: &BalanceSheetSections,
    totals: &LedgerTotals,
) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Line", "Amount"]);

    let section = |table: &mut Table, s: BalanceSheetSection, subtotal: f64| {
        table.add_row(vec![Cell::new(s.label().bold()), Cell::new("")]);
        for item in sheet.section(s) {
            table.add_row(vec![
                Cell::new(format!("  {}", item.label)),
                Cell::new(ctx.money(item.value)),
            ]);
        }
        table.add_row(vec![
            Cell::new(format!("Total {}", s.label())),
            Cell::new(ctx.money(subtotal)),
        ]);
    };

    section(&mut table, BalanceSheetSection::CurrentAssets, totals.current_assets);
    section(&mut table, BalanceSheetSection::NonCurrentAssets, totals.non_current_assets);
    table.add_row(vec![Cell::new("TOTAL ASSETS".bold()), Cell::new(ctx.money(totals.total_assets))]);
    section(&mut table, BalanceSheetSection::CurrentLiabilities, totals.current_liabilities);
    section(&mut table, BalanceSheetSection::LongTermLiabilities, totals.long_term_liabilities);
    table.add_row(vec![
        Cell::new("TOTAL LIABILITIES".bold()),
        Cell::new(ctx.money(totals.total_liabilities)),
    ]);
    section(&mut table, BalanceSheetSection::Equity, totals.total_equity);
    table.add_row(vec![
        Cell::new("LIABILITIES + EQUITY".bold()),
        Cell::new(ctx.money(totals.total_liabilities + totals.total_equity)),
    ]);

    let check = if totals.is_balanced() {
        "Balanced".green().bold().to_string()
    } else {
        format!("OUT OF BALANCE by {}", ctx.money(totals.identity_gap()))
            .red()
            .bold()
            .to_string()
    };
    format!("Balance Sheet\n{table}\n{check}")
}

pub fn format_portfolio(ctx: &ReportContext, summary: &PortfolioSummary) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Project", "Revenue", "Costs", "Profit / Loss", "Margin", "ROI"]);
    for row in &summary.projects {
        let m = &row.metrics;
        table.add_row(vec![
            Cell::new(&row.project_name),
            Cell::new(ctx.money(m.revenue)),
            Cell::new(ctx.money(m.total_costs)),
            signed(ctx.money(m.profit_loss), m.profit_loss),
            Cell::new(pct(m.profit_margin)),
            Cell::new(pct(m.roi)),
        ]);
    }
    table.add_row(vec![
        Cell::new("Portfolio".bold()),
        Cell::new(ctx.money(summary.total_revenue)),
        Cell::new(ctx.money(summary.total_costs)),
        signed(ctx.money(summary.total_profit_loss), summary.total_profit_loss),
        Cell::new(pct(summary.profit_margin)),
        Cell::new(pct(summary.roi)),
    ]);
    format!(
        "Portfolio Profitability\n{table}\n{} profitable, {} loss-making, budget {}",
        summary.profitable_projects,
        summary.loss_making_projects,
        ctx.money(summary.total_budget)
    )
}
