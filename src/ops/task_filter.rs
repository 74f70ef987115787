use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::task::{Task, Urgency};
use crate::util::dates::{days_between, format_date};

/// Which slice of the task list is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// Pending tasks assigned to the current user
    #[default]
    My,
    /// Every pending task
    All,
    /// Every completed task
    Completed,
}

impl FilterMode {
    pub fn parse(s: &str) -> Result<FilterMode, String> {
        match s {
            "my" => Ok(FilterMode::My),
            "all" => Ok(FilterMode::All),
            "completed" => Ok(FilterMode::Completed),
            _ => Err(format!(
                "unknown filter '{}' (expected: my, all, completed)",
                s
            )),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FilterMode::My => "my",
            FilterMode::All => "all",
            FilterMode::Completed => "completed",
        }
    }

    fn admits(self, task: &Task, current_user: u32) -> bool {
        match self {
            FilterMode::My => task.is_assigned_to(current_user) && !task.is_completed(),
            FilterMode::All => !task.is_completed(),
            FilterMode::Completed => task.is_completed(),
        }
    }
}

/// Style of the date pill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DateTone {
    Done,
    Overdue,
    Today,
    Pending,
}

/// Text and style class of an urgency pill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UrgencyBadge {
    pub label: &'static str,
    pub class: &'static str,
}

/// A task with its derived display status
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayTask {
    #[serde(flatten)]
    pub task: Task,
    pub date_label: String,
    pub date_tone: DateTone,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgency_badge: Option<UrgencyBadge>,
}

/// Filter `tasks` for `mode`, keeping collection order, and derive labels
/// relative to `today`.
pub fn filter(tasks: &[Task], mode: FilterMode, current_user: u32, today: NaiveDate) -> Vec<DisplayTask> {
    tasks
        .iter()
        .filter(|t| mode.admits(t, current_user))
        .map(|t| {
            let (date_label, date_tone) = date_label(t, today);
            DisplayTask {
                task: t.clone(),
                date_label,
                date_tone,
                urgency_badge: urgency_badge(t.urgency),
            }
        })
        .collect()
}

/// Date pill for a task. Time of day never matters; only calendar days.
pub fn date_label(task: &Task, today: NaiveDate) -> (String, DateTone) {
    if task.is_completed() {
        return ("Completed".to_string(), DateTone::Done);
    }
    let diff = days_between(today, task.due_date);
    match diff {
        d if d < 0 => ("Overdue".to_string(), DateTone::Overdue),
        0 => ("Today".to_string(), DateTone::Today),
        1 => ("Tomorrow".to_string(), DateTone::Pending),
        2..=7 => (format!("In {} days", diff), DateTone::Pending),
        _ => (format_date(task.due_date, today), DateTone::Pending),
    }
}

pub fn urgency_badge(urgency: Option<Urgency>) -> Option<UrgencyBadge> {
    let badge = match urgency? {
        Urgency::High => UrgencyBadge {
            label: "High",
            class: "urgency-high",
        },
        Urgency::Moderate => UrgencyBadge {
            label: "Moderate",
            class: "urgency-moderate",
        },
        Urgency::Low => UrgencyBadge {
            label: "Low",
            class: "urgency-low",
        },
    };
    Some(badge)
}

/// Heading and hint shown when a filter matches nothing
pub fn empty_state(mode: FilterMode) -> (&'static str, &'static str) {
    match mode {
        FilterMode::Completed => ("No completed tasks yet", "Complete tasks to see them here"),
        _ => (
            "No tasks found",
            "Click \"Add Task\" to create your first task",
        ),
    }
}
