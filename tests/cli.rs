use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

struct Env {
    dir: TempDir,
}

impl Env {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    fn dataset(&self) -> PathBuf {
        self.dir.path().join("data").join("dataset.json")
    }

    fn config_dir(&self) -> PathBuf {
        self.dir.path().join("config")
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("erp-metrics").unwrap();
        cmd.env("ERP_METRICS_CONFIG_DIR", self.config_dir())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        cmd
    }

    fn with_demo(self) -> Self {
        self.cmd()
            .args(["demo", "--output"])
            .arg(self.dataset())
            .assert()
            .success()
            .stdout(predicate::str::contains("Demo dataset written"))
            .stdout(predicate::str::contains("Rates:     4"));
        self
    }

    fn report(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.cmd()
            .arg("--dataset")
            .arg(self.dataset())
            .arg("report")
            .args(args)
            .assert()
    }
}

fn write(path: &Path, content: &str) {
    std::fs::write(path, content).unwrap();
}

#[test]
fn test_payroll_quick_calculation_json() {
    let env = Env::new();
    env.cmd()
        .args(["--json", "payroll", "10000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"pension\": 700.0"))
        .stdout(predicate::str::contains("\"paye\": 930.0"))
        .stdout(predicate::str::contains("\"net_pay\": 8370.0"));
}

#[test]
fn test_payroll_quick_calculation_table() {
    let env = Env::new();
    env.cmd()
        .args(["payroll", "10000", "--allowances", "2000", "--deductions", "500"])
        .assert()
        .success()
        .stdout(predicate::str::contains("NET PAY"))
        .stdout(predicate::str::contains("$9,670.00"));
}

#[test]
fn test_reconcile_over_and_matched() {
    let env = Env::new();
    env.cmd()
        .args(["--json", "reconcile", "125000", "124500"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"OverBy\""))
        .stdout(predicate::str::contains("\"amount\": 500.0"));
    env.cmd()
        .args(["reconcile", "22000", "22000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Matched."));
    env.cmd()
        .args(["--json", "reconcile", "22000", "22000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"Matched\""))
        .stdout(predicate::str::contains("\"amount\": 0.0"));
    env.cmd()
        .args(["reconcile", "900", "1000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("UNDER by $100.00"));
}

#[test]
fn test_profitability_report_for_scenario_project() {
    let env = Env::new().with_demo();
    env.report(&["profitability", "--project", "PRJ-001"])
        .success()
        .stdout(predicate::str::contains("Website Redesign (PRJ-001)"))
        .stdout(predicate::str::contains("$220,000.00"))
        .stdout(predicate::str::contains("-$40,000.00"))
        .stdout(predicate::str::contains("-22.2%"))
        .stdout(predicate::str::contains("-$70,000.00"));
}

#[test]
fn test_profitability_project_without_financials_defaults_to_zero() {
    let env = Env::new().with_demo();
    env.report(&["profitability", "--project", "PRJ-003", "--json"])
        .success()
        .stdout(predicate::str::contains("\"revenue\": 0.0"))
        .stdout(predicate::str::contains("\"labor_costs\": 0.0"))
        .stdout(predicate::str::contains("\"profit_margin\": 0.0"));
}

#[test]
fn test_unknown_project_fails() {
    let env = Env::new().with_demo();
    env.report(&["profitability", "--project", "PRJ-999"])
        .failure()
        .stderr(predicate::str::contains("Unknown project: PRJ-999"));
}

#[test]
fn test_task_report_as_of_date() {
    let env = Env::new().with_demo();
    env.report(&["tasks", "--as-of", "2024-06-03", "--json"])
        .success()
        .stdout(predicate::str::contains("\"total_tasks\": 6"))
        .stdout(predicate::str::contains("\"overdue_tasks\": 2"))
        .stdout(predicate::str::contains("\"tasks_behind_schedule\": 3"))
        .stdout(predicate::str::contains("\"tasks_ahead_schedule\": 1"))
        .stdout(predicate::str::contains("\"schedule_variance_days\": -3"))
        .stdout(predicate::str::contains("\"Not Started\": 1"));
}

#[test]
fn test_task_report_rejects_bad_date() {
    let env = Env::new().with_demo();
    env.report(&["tasks", "--as-of", "June 3"])
        .failure()
        .stderr(predicate::str::contains("Invalid date"));
}

#[test]
fn test_payroll_report_period_filter() {
    let env = Env::new().with_demo();
    env.report(&["payroll", "--period", "2024-05"])
        .success()
        .stdout(predicate::str::contains("Payroll 2024-05 (4 employees)"))
        .stdout(predicate::str::contains("Payroll 2024-04").not());
    env.report(&["payroll", "--period", "May"])
        .failure()
        .stderr(predicate::str::contains("Invalid period"));
}

#[test]
fn test_reconciliation_and_balance_reports() {
    let env = Env::new().with_demo();
    env.report(&["reconciliation"])
        .success()
        .stdout(predicate::str::contains("Over by $500.00"))
        .stdout(predicate::str::contains("1 matched, 2 unmatched"));
    env.report(&["balance"])
        .success()
        .stdout(predicate::str::contains("TOTAL ASSETS"))
        .stdout(predicate::str::contains("$390,000.00"))
        .stdout(predicate::str::contains("Balanced"));
    env.report(&["balance", "--json"])
        .success()
        .stdout(predicate::str::contains("\"is_balanced\": true"));
}

#[test]
fn test_portfolio_report() {
    let env = Env::new().with_demo();
    env.report(&["portfolio"])
        .success()
        .stdout(predicate::str::contains("Portfolio Profitability"))
        .stdout(predicate::str::contains("Mobile Banking App"))
        .stdout(predicate::str::contains("1 profitable, 1 loss-making"));
}

#[test]
fn test_missing_dataset_reports_error() {
    let env = Env::new();
    env.report(&["balance"])
        .failure()
        .stderr(predicate::str::contains("cannot read dataset"));
}

#[test]
fn test_import_tasks_then_report() {
    let env = Env::new().with_demo();
    let csv = env.dir.path().join("tasks.csv");
    write(
        &csv,
        "id,title,assigned_to,estimated_hours,actual_hours,status,planned_start,planned_end,actual_start,actual_end,dependencies\n\
         T-302,Stock count,Peter Kamau,16,16,Completed,2024-04-01,2024-04-05,2024-04-01,2024-04-05,\n\
         T-303,Go-live,Contractor,8,,To Do,2024-12-01,2024-12-20,,,T-301;T-302\n",
    );
    env.cmd()
        .arg("--dataset")
        .arg(env.dataset())
        .arg("import-tasks")
        .arg(&csv)
        .args(["--project", "PRJ-003"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 added, 0 replaced"));

    env.report(&["tasks", "--project", "PRJ-003", "--as-of", "2024-06-03", "--json"])
        .success()
        .stdout(predicate::str::contains("\"total_tasks\": 3"))
        .stdout(predicate::str::contains("\"tasks_on_schedule\": 1"));
}

#[test]
fn test_init_settings_drive_reports() {
    let env = Env::new().with_demo();
    env.cmd()
        .arg("init")
        .arg("--dataset-path")
        .arg(env.dataset())
        .args(["--company", "Acme Holdings", "--currency", "KSh "])
        .assert()
        .success()
        .stdout(predicate::str::contains("Settings saved"));
    assert!(env.config_dir().join("settings.json").exists());

    env.cmd()
        .args(["report", "reconciliation"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Acme Holdings"))
        .stdout(predicate::str::contains("Over by KSh 500.00"));
}

#[test]
fn test_profitability_warns_when_no_rates_on_record() {
    let env = Env::new();
    std::fs::create_dir_all(env.dataset().parent().unwrap()).unwrap();
    write(
        &env.dataset(),
        r#"{
  "projects": [{"id": "p1", "name": "Fit-out", "budget": 1000.0}],
  "tasks": [{"id": "t1", "project_id": "p1", "assigned_to": "Ann", "estimated_hours": 10.0, "status": "To Do"}]
}"#,
    );
    env.report(&["profitability", "--json"])
        .success()
        .stdout(predicate::str::contains("\"labor_costs\": 0.0"))
        .stderr(predicate::str::contains("no employee rates on record"));
}

#[test]
fn test_balance_report_reads_flat_ledger_items() {
    let env = Env::new();
    std::fs::create_dir_all(env.dataset().parent().unwrap()).unwrap();
    write(
        &env.dataset(),
        r#"{
  "balance_sheet_items": [
    {"section": "current_assets", "label": "Cash", "value": 500.0},
    {"section": "current_liabilities", "label": "Payables", "value": 200.0},
    {"section": "equity", "label": "Capital", "value": 250.0}
  ]
}"#,
    );
    env.report(&["balance", "--json"])
        .success()
        .stdout(predicate::str::contains("\"total_assets\": 500.0"))
        .stdout(predicate::str::contains("\"identity_gap\": 50.0"))
        .stdout(predicate::str::contains("\"is_balanced\": false"));
    env.report(&["balance"])
        .success()
        .stdout(predicate::str::contains("Payables"))
        .stdout(predicate::str::contains("OUT OF BALANCE by $50.00"));
}
