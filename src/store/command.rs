//! Explicit commands for every user action, and the page each one
//! leaves needing a re-render.

use chrono::NaiveDateTime;
use serde::Serialize;

use super::{EntityStore, StoreError};
use crate::model::expense::ExpenseDraft;
use crate::model::task::{TaskDraft, TaskStatus};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddTask(TaskDraft),
    /// Title only; due today for the current user
    QuickAddTask(String),
    EditTask { id: u32, draft: TaskDraft },
    DeleteTask(u32),
    ToggleTask(u32),
    AddExpense(ExpenseDraft),
    EditExpense { id: u32, draft: ExpenseDraft },
    DeleteExpense(u32),
    OpenDirectChat(u32),
    CreateGroupChat { name: String, participants: Vec<u32> },
    SendMessage { conversation_id: u32, text: String },
    ToggleMute(u32),
    SetMute { conversation_id: u32, muted: bool },
}

/// Page to re-render after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Tasks,
    Expenses,
    Chats,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewUpdate {
    pub view: View,
    /// Entity the command created or touched
    pub id: i64,
    /// Toast text for the user
    pub notice: String,
}

impl ViewUpdate {
    fn new(view: View, id: impl Into<i64>, notice: impl Into<String>) -> Self {
        ViewUpdate {
            view,
            id: id.into(),
            notice: notice.into(),
        }
    }
}

impl EntityStore {
    /// Apply `command` as the current user at `now`.
    pub fn handle(&mut self, command: Command, now: NaiveDateTime) -> Result<ViewUpdate, StoreError> {
        let update = match command {
            Command::AddTask(draft) => {
                let task = self.add_task(draft)?;
                ViewUpdate::new(View::Tasks, task.id, "Task added successfully!")
            }
            Command::QuickAddTask(title) => {
                let task = self.quick_add_task(&title, now.date())?;
                ViewUpdate::new(View::Tasks, task.id, "Task added successfully!")
            }
            Command::EditTask { id, draft } => {
                self.edit_task(id, draft)?;
                ViewUpdate::new(View::Tasks, id, "Task updated successfully!")
            }
            Command::DeleteTask(id) => {
                self.delete_task(id)?;
                ViewUpdate::new(View::Tasks, id, "Task deleted successfully!")
            }
            Command::ToggleTask(id) => {
                let task = self.toggle_task_status(id)?;
                let notice = match task.status {
                    TaskStatus::Completed => "Task marked as completed!",
                    TaskStatus::Pending => "Task marked as pending!",
                };
                ViewUpdate::new(View::Tasks, id, notice)
            }
            Command::AddExpense(draft) => {
                let expense = self.add_expense(draft)?;
                ViewUpdate::new(View::Expenses, expense.id, "Expense added successfully!")
            }
            Command::EditExpense { id, draft } => {
                self.edit_expense(id, draft)?;
                ViewUpdate::new(View::Expenses, id, "Expense updated successfully!")
            }
            Command::DeleteExpense(id) => {
                self.delete_expense(id)?;
                ViewUpdate::new(View::Expenses, id, "Expense deleted successfully!")
            }
            Command::OpenDirectChat(roommate_id) => {
                let (conversation, created) = self.open_direct_chat(roommate_id)?;
                let notice = if created {
                    format!("Chat with {} created!", conversation.name)
                } else {
                    format!("Opened chat with {}", conversation.name)
                };
                ViewUpdate::new(View::Chats, conversation.id, notice)
            }
            Command::CreateGroupChat { name, participants } => {
                let conversation = self.create_group_chat(&name, &participants)?;
                let notice = format!("Group \"{}\" created!", conversation.name);
                ViewUpdate::new(View::Chats, conversation.id, notice)
            }
            Command::SendMessage {
                conversation_id,
                text,
            } => {
                let message = self.append_message(conversation_id, self.current_user, &text, now)?;
                ViewUpdate::new(View::Chats, message.id, "Message sent!")
            }
            Command::ToggleMute(conversation_id) => {
                let muted = self.toggle_mute(conversation_id)?;
                self.mute_update(conversation_id, muted)
            }
            Command::SetMute {
                conversation_id,
                muted,
            } => {
                let muted = self.set_mute(conversation_id, muted)?;
                self.mute_update(conversation_id, muted)
            }
        };
        Ok(update)
    }

    fn mute_update(&self, conversation_id: u32, muted: bool) -> ViewUpdate {
        let name = self
            .conversation(conversation_id)
            .map_or("Conversation", |c| c.name.as_str());
        let state = if muted { "muted" } else { "unmuted" };
        ViewUpdate::new(View::Chats, conversation_id, format!("{} {}", name, state))
    }
}
