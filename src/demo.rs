use chrono::NaiveDate;

use crate::balance_sheet::BalanceSheetSections;
use crate::dataset::Dataset;
use crate::models::{
    AccountType, EmployeeRates, LedgerLineItem, PayrollEntry, Project, ProjectFinancials,
    ReconciliationAccount, Task, TaskStatus,
};

struct DemoProject {
    id: &'static str,
    name: &'static str,
    budget: f64,
    progress: f64,
    start: &'static str,
    end: &'static str,
    /// (revenue, direct costs, overhead costs); `None` leaves the project
    /// without a financial record.
    financials: Option<(f64, f64, f64)>,
}

const PROJECTS: &[DemoProject] = &[
    DemoProject {
        id: "PRJ-001",
        name: "Website Redesign",
        budget: 150_000.0,
        progress: 65.0,
        start: "2024-01-08",
        end: "2024-06-28",
        financials: Some((180_000.0, 100_000.0, 20_000.0)),
    },
    DemoProject {
        id: "PRJ-002",
        name: "Mobile Banking App",
        budget: 90_000.0,
        progress: 40.0,
        start: "2024-02-05",
        end: "2024-09-30",
        financials: Some((140_000.0, 25_000.0, 8_000.0)),
    },
    DemoProject {
        id: "PRJ-003",
        name: "Warehouse ERP Rollout",
        budget: 60_000.0,
        progress: 10.0,
        start: "2024-04-01",
        end: "2024-12-20",
        financials: None,
    },
];

struct DemoTask {
    id: &'static str,
    project: &'static str,
    title: &'static str,
    assignee: &'static str,
    estimated: f64,
    actual: f64,
    status: TaskStatus,
    planned: (&'static str, &'static str),
    actual_dates: (&'static str, &'static str),
    dependencies: &'static [&'static str],
}

const TASKS: &[DemoTask] = &[
    DemoTask {
        id: "T-101",
        project: "PRJ-001",
        title: "Discovery and wireframes",
        assignee: "Grace Wanjiru",
        estimated: 120.0,
        actual: 110.0,
        status: TaskStatus::Completed,
        planned: ("2024-01-08", "2024-02-16"),
        actual_dates: ("2024-01-08", "2024-02-14"),
        dependencies: &[],
    },
    DemoTask {
        id: "T-102",
        project: "PRJ-001",
        title: "Frontend build",
        assignee: "David Otieno",
        estimated: 80.0,
        actual: 64.0,
        status: TaskStatus::InProgress,
        planned: ("2024-02-19", "2024-05-31"),
        actual_dates: ("2024-02-21", ""),
        dependencies: &["T-101"],
    },
    DemoTask {
        id: "T-201",
        project: "PRJ-002",
        title: "API integration",
        assignee: "Amina Hassan",
        estimated: 90.0,
        actual: 96.0,
        status: TaskStatus::Completed,
        planned: ("2024-02-05", "2024-03-29"),
        actual_dates: ("2024-02-05", "2024-04-03"),
        dependencies: &[],
    },
    DemoTask {
        id: "T-202",
        project: "PRJ-002",
        title: "Security review",
        assignee: "Peter Kamau",
        estimated: 40.0,
        actual: 0.0,
        status: TaskStatus::Blocked,
        planned: ("2024-04-01", "2024-04-26"),
        actual_dates: ("", ""),
        dependencies: &["T-201"],
    },
    DemoTask {
        id: "T-203",
        project: "PRJ-002",
        title: "App store release",
        assignee: "Amina Hassan",
        estimated: 24.0,
        actual: 0.0,
        status: TaskStatus::ToDo,
        planned: ("2024-09-02", "2024-09-27"),
        actual_dates: ("", ""),
        dependencies: &["T-202"],
    },
    DemoTask {
        id: "T-301",
        project: "PRJ-003",
        title: "Inventory data migration",
        assignee: "Contractor",
        estimated: 60.0,
        actual: 0.0,
        status: TaskStatus::NotStarted,
        planned: ("2024-04-15", "2024-06-14"),
        actual_dates: ("", ""),
        dependencies: &[],
    },
];

const RATES: &[(&str, f64)] = &[
    ("Grace Wanjiru", 500.0),
    ("David Otieno", 500.0),
    ("Amina Hassan", 450.0),
    ("Peter Kamau", 400.0),
];

/// (employee id, name, base salary, allowances, deductions)
const STAFF: &[(&str, &str, f64, f64, f64)] = &[
    ("EMP-01", "Grace Wanjiru", 10_000.0, 0.0, 0.0),
    ("EMP-02", "David Otieno", 8_500.0, 1_200.0, 250.0),
    ("EMP-03", "Amina Hassan", 9_200.0, 800.0, 0.0),
    ("EMP-04", "Peter Kamau", 7_000.0, 500.0, 1_000.0),
];

const PAY_PERIODS: &[&str] = &["2024-04", "2024-05"];

fn date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

fn line_items(pairs: &[(&str, f64)]) -> Vec<LedgerLineItem> {
    pairs.iter().map(|(l, v)| LedgerLineItem::new(*l, *v)).collect()
}

/// Sample records covering every calculator, including one project with
/// no financials and one task whose assignee has no rate.
pub fn demo_dataset() -> Dataset {
    let projects = PROJECTS
        .iter()
        .map(|p| Project {
            id: p.id.to_string(),
            name: p.name.to_string(),
            budget: p.budget,
            progress: p.progress,
            start_date: date(p.start),
            end_date: date(p.end),
        })
        .collect();

    let financials = PROJECTS
        .iter()
        .filter_map(|p| {
            p.financials.map(|(revenue, direct, overhead)| ProjectFinancials {
                project_id: p.id.to_string(),
                revenue,
                direct_costs: direct,
                overhead_costs: overhead,
            })
        })
        .collect();

    let tasks = TASKS
        .iter()
        .map(|t| Task {
            id: t.id.to_string(),
            project_id: t.project.to_string(),
            title: t.title.to_string(),
            assigned_to: t.assignee.to_string(),
            estimated_hours: t.estimated,
            actual_hours: t.actual,
            status: t.status,
            planned_start_date: date(t.planned.0),
            planned_end_date: date(t.planned.1),
            actual_start_date: date(t.actual_dates.0),
            actual_end_date: date(t.actual_dates.1),
            dependencies: t.dependencies.iter().map(|d| d.to_string()).collect(),
        })
        .collect();

    let rates: EmployeeRates = RATES.iter().copied().collect();

    let payroll = PAY_PERIODS
        .iter()
        .flat_map(|period| {
            STAFF.iter().map(move |(id, name, base, allowances, deductions)| PayrollEntry {
                employee_id: id.to_string(),
                employee_name: name.to_string(),
                period: period.to_string(),
                base_salary: *base,
                allowances: *allowances,
                deductions: *deductions,
            })
        })
        .collect();

    let accounts = vec![
        ReconciliationAccount {
            name: "Equity Bank Current".to_string(),
            account_type: AccountType::Bank,
            internal_balance: 125_000.0,
            bank_statement_balance: 124_500.0,
        },
        ReconciliationAccount {
            name: "Petty Cash".to_string(),
            account_type: AccountType::Cash,
            internal_balance: 22_000.0,
            bank_statement_balance: 22_000.0,
        },
        ReconciliationAccount {
            name: "M-Pesa Till".to_string(),
            account_type: AccountType::MobileMoney,
            internal_balance: 8_450.0,
            bank_statement_balance: 8_700.0,
        },
    ];

    let balance_sheet = BalanceSheetSections {
        current_assets: line_items(&[
            ("Cash and Bank", 155_450.0),
            ("Accounts Receivable", 64_000.0),
            ("Inventory", 38_550.0),
        ]),
        non_current_assets: line_items(&[
            ("Office Equipment", 95_000.0),
            ("Vehicles", 70_000.0),
            ("Accumulated Depreciation", -33_000.0),
        ]),
        current_liabilities: line_items(&[("Accounts Payable", 41_000.0), ("PAYE Payable", 7_000.0)]),
        long_term_liabilities: line_items(&[("Bank Loan", 120_000.0)]),
        equity: line_items(&[("Share Capital", 150_000.0), ("Retained Earnings", 72_000.0)]),
    };

    Dataset {
        projects,
        financials,
        tasks,
        rates,
        payroll,
        accounts,
        balance_sheet,
        balance_sheet_items: Vec::new(),
    }
}
