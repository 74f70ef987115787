use chrono::NaiveDate;

use super::{EntityKind, EntityStore, StoreError, TASKS_KEY, ValidationError, commit, next_id};
use crate::model::task::{Recurrence, Task, TaskDraft, TaskStatus};

const MISSING_TITLE_OR_DUE: &str = "Please fill in the title and due date";
const MISSING_ASSIGNEE: &str = "Please select at least one assignee";

/// Fields of a draft that passed validation
struct ValidTask {
    title: String,
    description: String,
    assignees: Vec<u32>,
    due_date: NaiveDate,
}

impl EntityStore {
    /// Create a pending task from `draft`.
    pub fn add_task(&mut self, draft: TaskDraft) -> Result<Task, StoreError> {
        let valid = self.validate_task(&draft).inspect_err(|e| {
            tracing::warn!(field = e.field, "task rejected");
        })?;
        let task = Task {
            id: next_id("task", self.tasks.iter().map(|t| t.id))?,
            title: valid.title,
            description: valid.description,
            assignees: valid.assignees,
            due_date: valid.due_date,
            status: TaskStatus::Pending,
            recurrence: draft.recurrence,
            urgency: draft.urgency,
        };

        let mut next = self.tasks.clone();
        next.push(task.clone());
        commit(self.kv.as_mut(), TASKS_KEY, &mut self.tasks, next)?;
        tracing::info!(id = task.id, "task added");
        Ok(task)
    }

    /// One-line add: assigned to the current user, due `today`, one-time,
    /// no urgency.
    pub fn quick_add_task(&mut self, title: &str, today: NaiveDate) -> Result<Task, StoreError> {
        if title.trim().is_empty() {
            tracing::warn!("quick add rejected: empty title");
            return Err(ValidationError::new("title", "Please enter a task name").into());
        }
        self.add_task(TaskDraft {
            title: title.to_string(),
            description: String::new(),
            assignees: vec![self.current_user],
            due_date: Some(today),
            recurrence: Recurrence::OneTime,
            urgency: None,
        })
    }

    /// Replace every editable field of task `id`; status is kept.
    pub fn edit_task(&mut self, id: u32, draft: TaskDraft) -> Result<Task, StoreError> {
        let index = self.task_index(id)?;
        let valid = self.validate_task(&draft).inspect_err(|e| {
            tracing::warn!(id, field = e.field, "task edit rejected");
        })?;

        let mut next = self.tasks.clone();
        let task = &mut next[index];
        task.title = valid.title;
        task.description = valid.description;
        task.assignees = valid.assignees;
        task.due_date = valid.due_date;
        task.recurrence = draft.recurrence;
        task.urgency = draft.urgency;
        let updated = task.clone();

        commit(self.kv.as_mut(), TASKS_KEY, &mut self.tasks, next)?;
        tracing::info!(id, "task updated");
        Ok(updated)
    }

    /// Remove task `id`, returning it.
    pub fn delete_task(&mut self, id: u32) -> Result<Task, StoreError> {
        let index = self.task_index(id)?;
        let mut next = self.tasks.clone();
        let removed = next.remove(index);
        commit(self.kv.as_mut(), TASKS_KEY, &mut self.tasks, next)?;
        tracing::info!(id, "task deleted");
        Ok(removed)
    }

    /// pending ↔ completed
    pub fn toggle_task_status(&mut self, id: u32) -> Result<Task, StoreError> {
        let index = self.task_index(id)?;
        let mut next = self.tasks.clone();
        next[index].status = next[index].status.toggled();
        let updated = next[index].clone();
        commit(self.kv.as_mut(), TASKS_KEY, &mut self.tasks, next)?;
        tracing::info!(id, status = updated.status.as_str(), "task toggled");
        Ok(updated)
    }

    fn task_index(&self, id: u32) -> Result<usize, StoreError> {
        self.tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(StoreError::missing(EntityKind::Task, id))
    }

    fn validate_task(&self, draft: &TaskDraft) -> Result<ValidTask, ValidationError> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(ValidationError::new("title", MISSING_TITLE_OR_DUE));
        }
        let Some(due_date) = draft.due_date else {
            return Err(ValidationError::new("dueDate", MISSING_TITLE_OR_DUE));
        };

        let mut assignees: Vec<u32> = Vec::with_capacity(draft.assignees.len());
        for &id in &draft.assignees {
            if !self.roster.contains_id(id) {
                return Err(ValidationError::new(
                    "assignees",
                    format!("Unknown roommate: {}", id),
                ));
            }
            if !assignees.contains(&id) {
                assignees.push(id);
            }
        }
        if assignees.is_empty() {
            return Err(ValidationError::new("assignees", MISSING_ASSIGNEE));
        }

        Ok(ValidTask {
            title: title.to_string(),
            description: draft.description.trim().to_string(),
            assignees,
            due_date,
        })
    }
}
