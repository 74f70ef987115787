//! Pull-based snapshots for the presentation layer. Each one is derived
//! fresh from the store's collections; nothing here is cached.

use chrono::NaiveDate;
use serde::Serialize;

use super::{EntityStore, StoreError};
use crate::model::chat::ConversationKind;
use crate::ops::balance::{self, BalanceSummary};
use crate::ops::calendar::{self, CalendarGrid};
use crate::ops::chat_ops::{self, ConversationRow, DirectCandidate, MessageRow};
use crate::ops::expense_ops::{self, ExpenseRow};
use crate::ops::feed::{self, FeedSection};
use crate::ops::task_filter::{self, DisplayTask, FilterMode};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskListView {
    pub mode: FilterMode,
    pub tasks: Vec<DisplayTask>,
    /// Heading and hint when `tasks` is empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty: Option<(&'static str, &'static str)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagesView {
    pub conversation_id: u32,
    pub name: String,
    pub kind: ConversationKind,
    pub muted: bool,
    pub messages: Vec<MessageRow>,
}

impl EntityStore {
    pub fn task_list_view(&self, mode: FilterMode, today: NaiveDate) -> TaskListView {
        let tasks = task_filter::filter(&self.tasks, mode, self.current_user, today);
        let empty = tasks.is_empty().then(|| task_filter::empty_state(mode));
        TaskListView { mode, tasks, empty }
    }

    /// Balances of the current user over pending expenses
    pub fn balance_summary(&self) -> BalanceSummary {
        balance::compute_balances(&self.expenses, &self.me.name)
    }

    pub fn calendar_grid(&self, today: NaiveDate) -> CalendarGrid {
        calendar::project(&self.tasks, today)
    }

    /// Grid for the month containing `month`
    pub fn calendar_for_month(&self, month: NaiveDate, today: NaiveDate) -> CalendarGrid {
        calendar::project_month(&self.tasks, month, today)
    }

    pub fn expense_list_view(&self, today: NaiveDate) -> Vec<ExpenseRow> {
        expense_ops::expense_rows(&self.expenses, &self.roster, today)
    }

    pub fn conversation_list_view(&self) -> Vec<ConversationRow> {
        chat_ops::conversation_rows(&self.conversations, &self.chat_settings)
    }

    pub fn messages_view(&self, conversation_id: u32) -> Result<MessagesView, StoreError> {
        let conversation = self
            .conversation(conversation_id)
            .ok_or(StoreError::InvalidConversation(conversation_id))?;
        Ok(MessagesView {
            conversation_id,
            name: conversation.name.clone(),
            kind: conversation.kind,
            muted: chat_ops::is_muted(&self.chat_settings, conversation_id),
            messages: chat_ops::message_rows(self.messages(conversation_id), &self.roster),
        })
    }

    pub fn direct_chat_candidates(&self) -> Vec<DirectCandidate> {
        chat_ops::direct_candidates(&self.roster, &self.conversations, self.current_user)
    }

    pub fn feed_view(&self) -> Vec<FeedSection<'_>> {
        feed::feed_sections(&self.feed)
    }
}
