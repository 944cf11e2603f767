use std::borrow::Borrow;
use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::aggregate::ratio_or_zero;
use crate::models::{Task, TaskStatus};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TeamMemberPerformance {
    pub assigned: usize,
    pub completed: usize,
    /// Actual hours logged on completed tasks only.
    pub total_actual_hours: f64,
    pub total_estimated_hours: f64,
}

impl TeamMemberPerformance {
    /// Percent of assigned tasks that are completed.
    pub fn completion_rate(&self) -> f64 {
        ratio_or_zero(self.completed as f64, self.assigned as f64) * 100.0
    }

    /// Estimated over actual hours for completed work; above 1.0 means the
    /// work took less time than estimated.
    pub fn efficiency(&self) -> f64 {
        ratio_or_zero(self.total_estimated_hours, self.total_actual_hours)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskMetrics {
    /// Every status is present, even with a zero count.
    pub task_distribution: BTreeMap<TaskStatus, usize>,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub in_progress_tasks: usize,
    pub not_started_tasks: usize,
    pub overdue_tasks: usize,
    pub team_performance: BTreeMap<String, TeamMemberPerformance>,
    /// Sum of (planned end - actual end) over completed tasks, in days.
    pub schedule_variance_days: i64,
    pub tasks_on_schedule: usize,
    pub tasks_behind_schedule: usize,
    pub tasks_ahead_schedule: usize,
}

impl TaskMetrics {
    pub fn completion_rate(&self) -> f64 {
        ratio_or_zero(self.completed_tasks as f64, self.total_tasks as f64) * 100.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Adherence {
    Ahead,
    OnSchedule,
    Behind,
}

/// Status tallies, per-assignee performance and schedule adherence for a
/// task list, evaluated at `now`.
pub fn compute_project_task_metrics<T: Borrow<Task>>(
    tasks: &[T],
    now: NaiveDateTime,
) -> TaskMetrics {
    let mut task_distribution: BTreeMap<TaskStatus, usize> =
        TaskStatus::ALL.iter().map(|s| (*s, 0)).collect();
    let mut team_performance: BTreeMap<String, TeamMemberPerformance> = BTreeMap::new();
    let mut overdue_tasks = 0;
    let mut schedule_variance_days = 0i64;
    let (mut ahead, mut on_schedule, mut behind) = (0, 0, 0);

    for task in tasks {
        let task: &Task = task.borrow();
        *task_distribution.entry(task.status).or_insert(0) += 1;

        if task.status != TaskStatus::Completed
            && task.planned_end_date.is_some_and(|d| is_before(d, now))
        {
            overdue_tasks += 1;
        }

        let member = team_performance.entry(task.assigned_to.clone()).or_default();
        member.assigned += 1;
        member.total_estimated_hours += task.estimated_hours;
        if task.status == TaskStatus::Completed {
            member.completed += 1;
            member.total_actual_hours += task.actual_hours;
        }

        let (variance, adherence) = schedule_adherence(task, now);
        schedule_variance_days += variance;
        match adherence {
            Some(Adherence::Ahead) => ahead += 1,
            Some(Adherence::OnSchedule) => on_schedule += 1,
            Some(Adherence::Behind) => behind += 1,
            None => {}
        }
    }

    let count = |status: TaskStatus| task_distribution.get(&status).copied().unwrap_or(0);

    TaskMetrics {
        total_tasks: tasks.len(),
        completed_tasks: count(TaskStatus::Completed),
        in_progress_tasks: count(TaskStatus::InProgress),
        not_started_tasks: count(TaskStatus::NotStarted),
        overdue_tasks,
        task_distribution,
        team_performance,
        schedule_variance_days,
        tasks_on_schedule: on_schedule,
        tasks_behind_schedule: behind,
        tasks_ahead_schedule: ahead,
    }
}

/// Variance in days (completed tasks only) and the adherence bucket, if any.
fn schedule_adherence(task: &Task, now: NaiveDateTime) -> (i64, Option<Adherence>) {
    match task.status {
        TaskStatus::Completed => match (task.planned_end_date, task.actual_end_date) {
            (Some(planned), Some(actual)) => {
                let variance = (planned - actual).num_days();
                let adherence = match variance {
                    v if v > 0 => Adherence::Ahead,
                    v if v < 0 => Adherence::Behind,
                    _ => Adherence::OnSchedule,
                };
                (variance, Some(adherence))
            }
            _ => (0, None),
        },
        TaskStatus::InProgress => match task.planned_end_date {
            Some(planned) if is_before(planned, now) => (0, Some(Adherence::Behind)),
            Some(_) => (0, Some(Adherence::OnSchedule)),
            None => (0, None),
        },
        TaskStatus::NotStarted => match task.planned_start_date {
            Some(planned) if is_before(planned, now) => (0, Some(Adherence::Behind)),
            _ => (0, None),
        },
        TaskStatus::Blocked | TaskStatus::ToDo => (0, None),
    }
}

/// Dates are compared as midnight at the start of the day.
fn is_before(date: NaiveDate, now: NaiveDateTime) -> bool {
    date.and_time(NaiveTime::MIN) < now
}
