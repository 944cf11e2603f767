use std::borrow::Borrow;

use serde::Serialize;
use tracing::debug;

use crate::aggregate::{ratio_or_zero, sum};
use crate::models::{EmployeeRates, Project, ProjectFinancials, Task};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfitabilityMetrics {
    pub revenue: f64,
    pub direct_costs: f64,
    pub overhead_costs: f64,
    pub labor_costs: f64,
    pub total_costs: f64,
    pub profit_loss: f64,
    /// Percent of revenue.
    pub profit_margin: f64,
    /// Percent of total costs.
    pub roi: f64,
    /// Budget minus total costs; negative means over budget.
    pub cost_variance: f64,
    pub revenue_per_hour: f64,
    pub total_estimated_hours: f64,
}

/// Labor is priced at estimated hours times the assignee's hourly rate.
/// Unknown assignees cost nothing and missing financials read as zero.
pub fn compute_project_profitability<T: Borrow<Task>>(
    project: &Project,
    financials: Option<&ProjectFinancials>,
    tasks: &[T],
    rates: &EmployeeRates,
) -> ProfitabilityMetrics {
    let financials = match financials {
        Some(f) => f.clone(),
        None => {
            debug!(project = %project.id, "no financials on record, using zeros");
            ProjectFinancials {
                project_id: project.id.clone(),
                ..ProjectFinancials::default()
            }
        }
    };

    let labor_costs = sum(tasks, |t| {
        let task: &Task = t.borrow();
        task.estimated_hours * rate_for(rates, &task.assigned_to)
    });
    let total_estimated_hours = sum(tasks, |t| {
        let task: &Task = t.borrow();
        task.estimated_hours
    });

    let revenue = financials.revenue;
    let total_costs = financials.direct_costs + financials.overhead_costs + labor_costs;
    let profit_loss = revenue - total_costs;

    ProfitabilityMetrics {
        revenue,
        direct_costs: financials.direct_costs,
        overhead_costs: financials.overhead_costs,
        labor_costs,
        total_costs,
        profit_loss,
        profit_margin: ratio_or_zero(profit_loss, revenue) * 100.0,
        roi: ratio_or_zero(profit_loss, total_costs) * 100.0,
        cost_variance: project.budget - total_costs,
        revenue_per_hour: ratio_or_zero(revenue, total_estimated_hours),
        total_estimated_hours,
    }
}

fn rate_for(rates: &EmployeeRates, assignee: &str) -> f64 {
    rates.get(assignee).unwrap_or_else(|| {
        debug!(assignee, "no hourly rate on record, labor priced at zero");
        0.0
    })
}

// ---------------------------------------------------------------------------
// Portfolio
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectProfitability {
    pub project_id: String,
    pub project_name: String,
    pub metrics: ProfitabilityMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioSummary {
    pub projects: Vec<ProjectProfitability>,
    pub total_budget: f64,
    pub total_revenue: f64,
    pub total_costs: f64,
    pub total_profit_loss: f64,
    pub profit_margin: f64,
    pub roi: f64,
    pub profitable_projects: usize,
    pub loss_making_projects: usize,
}

/// Runs the profitability calculation for every project, pairing each with
/// its own financials and tasks, and rolls the results up.
pub fn summarize_portfolio(
    projects: &[Project],
    financials: &[ProjectFinancials],
    tasks: &[Task],
    rates: &EmployeeRates,
) -> PortfolioSummary {
    let rows: Vec<ProjectProfitability> = projects
        .iter()
        .map(|project| {
            let project_financials = financials.iter().find(|f| f.project_id == project.id);
            let project_tasks: Vec<&Task> =
                tasks.iter().filter(|t| t.project_id == project.id).collect();
            ProjectProfitability {
                project_id: project.id.clone(),
                project_name: project.name.clone(),
                metrics: compute_project_profitability(
                    project,
                    project_financials,
                    &project_tasks,
                    rates,
                ),
            }
        })
        .collect();

    let total_budget = sum(projects, |p| p.budget);
    let total_revenue = sum(&rows, |r| r.metrics.revenue);
    let total_costs = sum(&rows, |r| r.metrics.total_costs);
    let total_profit_loss = total_revenue - total_costs;

    PortfolioSummary {
        profitable_projects: rows.iter().filter(|r| r.metrics.profit_loss > 0.0).count(),
        loss_making_projects: rows.iter().filter(|r| r.metrics.profit_loss < 0.0).count(),
        projects: rows,
        total_budget,
        total_revenue,
        total_costs,
        total_profit_loss,
        profit_margin: ratio_or_zero(total_profit_loss, total_revenue) * 100.0,
        roi: ratio_or_zero(total_profit_loss, total_costs) * 100.0,
    }
}
