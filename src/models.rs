use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::MetricsError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub budget: f64,
    /// Percent complete, 0-100.
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectFinancials {
    pub project_id: String,
    #[serde(default)]
    pub revenue: f64,
    #[serde(default)]
    pub direct_costs: f64,
    #[serde(default)]
    pub overhead_costs: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    Blocked,
    #[serde(rename = "To Do")]
    ToDo,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 5] = [
        TaskStatus::NotStarted,
        TaskStatus::InProgress,
        TaskStatus::Completed,
        TaskStatus::Blocked,
        TaskStatus::ToDo,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::NotStarted => "Not Started",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
            TaskStatus::Blocked => "Blocked",
            TaskStatus::ToDo => "To Do",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TaskStatus {
    type Err = MetricsError;

    /// Accepts the display spelling as well as snake/kebab variants
    /// ("in_progress", "to-do").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "notstarted" => Ok(TaskStatus::NotStarted),
            "inprogress" => Ok(TaskStatus::InProgress),
            "completed" | "done" => Ok(TaskStatus::Completed),
            "blocked" => Ok(TaskStatus::Blocked),
            "todo" => Ok(TaskStatus::ToDo),
            _ => Err(MetricsError::UnknownStatus(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub project_id: String,
    #[serde(default)]
    pub title: String,
    pub assigned_to: String,
    #[serde(default)]
    pub estimated_hours: f64,
    #[serde(default)]
    pub actual_hours: f64,
    pub status: TaskStatus,
    #[serde(default)]
    pub planned_start_date: Option<NaiveDate>,
    #[serde(default)]
    pub planned_end_date: Option<NaiveDate>,
    #[serde(default)]
    pub actual_start_date: Option<NaiveDate>,
    #[serde(default)]
    pub actual_end_date: Option<NaiveDate>,
    /// Ids of tasks this one waits on. Not checked for self-reference or cycles.
    #[serde(default)]
    pub dependencies: Vec<String>,
}

/// Hourly rate per assignee name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeRates(BTreeMap<String, f64>);

impl EmployeeRates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, rate: f64) {
        self.0.insert(name.into(), rate);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for EmployeeRates {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollEntry {
    pub employee_id: String,
    #[serde(default)]
    pub employee_name: String,
    /// Pay period, YYYY-MM.
    pub period: String,
    pub base_salary: f64,
    #[serde(default)]
    pub allowances: f64,
    #[serde(default)]
    pub deductions: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountType {
    Bank,
    Cash,
    #[serde(rename = "Mobile Money")]
    MobileMoney,
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AccountType::Bank => "Bank",
            AccountType::Cash => "Cash",
            AccountType::MobileMoney => "Mobile Money",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationAccount {
    pub name: String,
    pub account_type: AccountType,
    pub internal_balance: f64,
    pub bank_statement_balance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceSheetSection {
    CurrentAssets,
    NonCurrentAssets,
    CurrentLiabilities,
    LongTermLiabilities,
    Equity,
}

impl BalanceSheetSection {
    pub fn label(self) -> &'static str {
        match self {
            BalanceSheetSection::CurrentAssets => "Current Assets",
            BalanceSheetSection::NonCurrentAssets => "Non-Current Assets",
            BalanceSheetSection::CurrentLiabilities => "Current Liabilities",
            BalanceSheetSection::LongTermLiabilities => "Long-Term Liabilities",
            BalanceSheetSection::Equity => "Equity",
        }
    }
}

/// A signed balance sheet amount; contra accounts such as accumulated
/// depreciation carry negative values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerLineItem {
    pub label: String,
    pub value: f64,
}

impl LedgerLineItem {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// A line item tagged with the section it belongs to, as it appears in a
/// flat chart-of-accounts export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionedLineItem {
    pub section: BalanceSheetSection,
    #[serde(flatten)]
    pub item: LedgerLineItem,
}
