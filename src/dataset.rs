use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::balance_sheet::{sections_from_items, BalanceSheetSections};
use crate::error::{MetricsError, Result};
use crate::models::{
    EmployeeRates, PayrollEntry, Project, ProjectFinancials, ReconciliationAccount,
    SectionedLineItem, Task,
};

/// Everything the calculators consume, as one JSON document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub financials: Vec<ProjectFinancials>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub rates: EmployeeRates,
    #[serde(default)]
    pub payroll: Vec<PayrollEntry>,
    #[serde(default)]
    pub accounts: Vec<ReconciliationAccount>,
    #[serde(default)]
    pub balance_sheet: BalanceSheetSections,
    /// Ledger lines exported flat, each tagged with its section.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub balance_sheet_items: Vec<SectionedLineItem>,
}

impl Dataset {
    pub fn project(&self, id: &str) -> Result<&Project> {
        self.projects
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| MetricsError::UnknownProject(id.to_string()))
    }

    pub fn financials_for(&self, project_id: &str) -> Option<&ProjectFinancials> {
        self.financials.iter().find(|f| f.project_id == project_id)
    }

    /// The sectioned balance sheet with any flat tagged items appended.
    pub fn ledger_sections(&self) -> BalanceSheetSections {
        let mut sections = self.balance_sheet.clone();
        sections.append(sections_from_items(&self.balance_sheet_items));
        sections
    }

    pub fn tasks_for(&self, project_id: &str) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| t.project_id == project_id)
            .collect()
    }
}

pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        MetricsError::Other(format!("cannot read dataset {}: {e}", path.display()))
    })?;
    let dataset: Dataset = serde_json::from_str(&content)?;
    info!(
        path = %path.display(),
        projects = dataset.projects.len(),
        tasks = dataset.tasks.len(),
        "dataset loaded"
    );
    Ok(dataset)
}

pub fn save_dataset(path: &Path, dataset: &Dataset) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(dataset)?;
    std::fs::write(path, format!("{json}\n"))?;
    debug!(path = %path.display(), "dataset written");
    Ok(())
}

// ---------------------------------------------------------------------------
// CSV task import
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct TaskRow {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    assigned_to: String,
    #[serde(default)]
    estimated_hours: String,
    #[serde(default)]
    actual_hours: String,
    status: String,
    #[serde(default)]
    planned_start: String,
    #[serde(default)]
    planned_end: String,
    #[serde(default)]
    actual_start: String,
    #[serde(default)]
    actual_end: String,
    #[serde(default)]
    dependencies: String,
}

fn parse_hours(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or(0.0)
}

pub fn parse_optional_date(raw: &str) -> Result<Option<NaiveDate>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| MetricsError::InvalidDate(raw.to_string()))
}

/// Reads a task export. Blank hours and dates are tolerated; an unknown
/// status or malformed date rejects the file.
pub fn import_tasks_csv(path: &Path, project_id: &str) -> Result<Vec<Task>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)?;

    let mut tasks = Vec::new();
    for row in reader.deserialize::<TaskRow>() {
        let row = row?;
        tasks.push(Task {
            id: row.id,
            project_id: project_id.to_string(),
            title: row.title,
            assigned_to: row.assigned_to,
            estimated_hours: parse_hours(&row.estimated_hours),
            actual_hours: parse_hours(&row.actual_hours),
            status: row.status.parse()?,
            planned_start_date: parse_optional_date(&row.planned_start)?,
            planned_end_date: parse_optional_date(&row.planned_end)?,
            actual_start_date: parse_optional_date(&row.actual_start)?,
            actual_end_date: parse_optional_date(&row.actual_end)?,
            dependencies: row
                .dependencies
                .split(';')
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(String::from)
                .collect(),
        });
    }
    info!(path = %path.display(), count = tasks.len(), "tasks imported");
    Ok(tasks)
}

/// Appends imported tasks, replacing any existing task with the same id in
/// the same project.
pub fn merge_tasks(dataset: &mut Dataset, imported: Vec<Task>) -> (usize, usize) {
    let mut added = 0;
    let mut replaced = 0;
    for task in imported {
        match dataset
            .tasks
            .iter_mut()
            .find(|t| t.id == task.id && t.project_id == task.project_id)
        {
            Some(existing) => {
                *existing = task;
                replaced += 1;
            }
            None => {
                dataset.tasks.push(task);
                added += 1;
            }
        }
    }
    (added, replaced)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskStatus;

    const CSV: &str = "\
id,title,assigned_to,estimated_hours,actual_hours,status,planned_start,planned_end,actual_start,actual_end,dependencies
t1,Wireframes,Alice,40,38,Completed,2024-01-02,2024-01-12,2024-01-02,2024-01-11,
t2,Build API,Bob,60,,In Progress,2024-01-15,2024-02-15,2024-01-16,,t1
t3,QA pass,Carol,abc,,Not Started,2024-02-16,2024-02-28,,,t1; t2
";

    #[test]
    fn test_import_tasks_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.csv");
        std::fs::write(&path, CSV).unwrap();

        let tasks = import_tasks_csv(&path, "p7").unwrap();
        assert_eq!(tasks.len(), 3);
        assert!(tasks.iter().all(|t| t.project_id == "p7"));
        assert_eq!(tasks[0].status, TaskStatus::Completed);
        assert_eq!(tasks[0].actual_end_date, NaiveDate::from_ymd_opt(2024, 1, 11));
        assert_eq!(tasks[1].actual_hours, 0.0);
        assert!(tasks[1].actual_end_date.is_none());
        assert_eq!(tasks[1].dependencies, vec!["t1".to_string()]);
        assert_eq!(tasks[2].estimated_hours, 0.0);
        assert_eq!(tasks[2].dependencies, vec!["t1".to_string(), "t2".to_string()]);
    }

    #[test]
    fn test_import_rejects_unknown_status() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.csv");
        std::fs::write(
            &path,
            "id,assigned_to,status\nt1,Alice,Overdue\n",
        )
        .unwrap();
        let err = import_tasks_csv(&path, "p1").unwrap_err();
        assert!(err.to_string().contains("Unknown task status"), "got: {err}");
    }

    #[test]
    fn test_import_rejects_bad_date() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.csv");
        std::fs::write(
            &path,
            "id,assigned_to,status,planned_end\nt1,Alice,To Do,12/01/2024\n",
        )
        .unwrap();
        assert!(matches!(
            import_tasks_csv(&path, "p1"),
            Err(MetricsError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("dataset.json");
        let mut dataset = Dataset::default();
        dataset.rates.insert("Alice", 500.0);
        save_dataset(&path, &dataset).unwrap();
        let loaded = load_dataset(&path).unwrap();
        assert_eq!(loaded, dataset);
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_dataset(&dir.path().join("nope.json")).unwrap_err();
        assert!(err.to_string().contains("cannot read dataset"), "got: {err}");
    }

    #[test]
    fn test_partial_document_defaults_missing_collections() {
        let dataset: Dataset = serde_json::from_str(r#"{"rates": {"Ann": 20.0}}"#).unwrap();
        assert!(dataset.projects.is_empty());
        assert_eq!(dataset.rates.get("Ann"), Some(20.0));
    }

    #[test]
    fn test_flat_ledger_items_join_their_sections() {
        let json = r#"{
            "balance_sheet": {"current_assets": [{"label": "Cash", "value": 700.0}]},
            "balance_sheet_items": [
                {"section": "current_assets", "label": "Stock", "value": 300.0},
                {"section": "equity", "label": "Capital", "value": 1000.0}
            ]
        }"#;
        let dataset: Dataset = serde_json::from_str(json).unwrap();
        let sections = dataset.ledger_sections();
        let labels: Vec<&str> = sections.current_assets.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, vec!["Cash", "Stock"]);
        assert_eq!(sections.equity.len(), 1);
        assert!(crate::balance_sheet::compute_ledger_totals(&sections).is_balanced());
    }

    #[test]
    fn test_lookups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.csv");
        std::fs::write(&path, CSV).unwrap();
        let mut dataset = Dataset::default();
        let imported = import_tasks_csv(&path, "p7").unwrap();
        assert_eq!(merge_tasks(&mut dataset, imported.clone()), (3, 0));
        assert_eq!(merge_tasks(&mut dataset, imported), (0, 3));
        assert_eq!(dataset.tasks_for("p7").len(), 3);
        assert!(std::ptr::eq(dataset.tasks_for("p7")[0], &dataset.tasks[0]));
        assert!(dataset.tasks_for("p1").is_empty());
        assert!(dataset.financials_for("p7").is_none());
        assert!(matches!(dataset.project("p7"), Err(MetricsError::UnknownProject(_))));
    }
}
