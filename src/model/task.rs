use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Task completion state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Completed,
}

impl TaskStatus {
    /// pending ↔ completed
    pub fn toggled(self) -> TaskStatus {
        match self {
            TaskStatus::Pending => TaskStatus::Completed,
            TaskStatus::Completed => TaskStatus::Pending,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Recurrence {
    #[default]
    OneTime,
    Weekly,
    Monthly,
}

impl Recurrence {
    pub fn as_str(self) -> &'static str {
        match self {
            Recurrence::OneTime => "one-time",
            Recurrence::Weekly => "weekly",
            Recurrence::Monthly => "monthly",
        }
    }

    pub fn parse(s: &str) -> Option<Recurrence> {
        match s {
            "one-time" => Some(Recurrence::OneTime),
            "weekly" => Some(Recurrence::Weekly),
            "monthly" => Some(Recurrence::Monthly),
            _ => None,
        }
    }
}

/// Urgency level. "None" is modeled as `Option::None` on the task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Moderate,
    High,
}

impl Urgency {
    pub fn parse(s: &str) -> Option<Urgency> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Some(Urgency::Low),
            "moderate" => Some(Urgency::Moderate),
            "high" => Some(Urgency::High),
            _ => None,
        }
    }
}

/// A shared chore
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Roommate ids; never empty once saved
    pub assignees: Vec<u32>,
    pub due_date: NaiveDate,
    pub status: TaskStatus,
    #[serde(default)]
    pub recurrence: Recurrence,
    #[serde(default)]
    pub urgency: Option<Urgency>,
}

impl Task {
    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    pub fn is_assigned_to(&self, roommate_id: u32) -> bool {
        self.assignees.contains(&roommate_id)
    }
}

/// User-supplied fields for creating or editing a task.
///
/// Everything is optional or free-form here; `validate` in the store turns a
/// draft into a task or names the first missing field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub assignees: Vec<u32>,
    pub due_date: Option<NaiveDate>,
    pub recurrence: Recurrence,
    pub urgency: Option<Urgency>,
}

impl TaskDraft {
    /// Pre-fill a draft from an existing task (edit form).
    pub fn from_task(task: &Task) -> Self {
        TaskDraft {
            title: task.title.clone(),
            description: task.description.clone(),
            assignees: task.assignees.clone(),
            due_date: Some(task.due_date),
            recurrence: task.recurrence,
            urgency: task.urgency,
        }
    }
}
